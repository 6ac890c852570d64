use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use noor_model::OutputGroup;

use crate::types::{GroupSummary, RunResult};

pub fn print_summary(result: &RunResult) {
    for input in &result.inputs {
        println!("Input: {}", input.display());
    }
    if result.dry_run {
        println!("Dry run: no files written");
    }
    println!("{}", group_table(result));
    if !result.exclusions.is_empty() {
        println!();
        println!("Exclusions:");
        println!("{}", exclusion_table(result));
    }
}

pub fn group_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Records"),
        header_cell("File"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for summary in &result.groups {
        table.add_row(vec![
            group_cell(summary.group),
            count_cell(summary.records, group_color(summary.group)),
            file_cell(summary, result.dry_run),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.total_records()).add_attribute(Attribute::Bold),
        dim_cell(format!("{} rows read", result.rows_read)),
    ]);
    table
}

pub fn exclusion_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Reason"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (reason, count) in &result.exclusions {
        table.add_row(vec![Cell::new(reason), count_cell(*count, Color::Red)]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn group_color(group: OutputGroup) -> Color {
    match group {
        OutputGroup::Clean => Color::Green,
        OutputGroup::Excluded => Color::Red,
        OutputGroup::DuplicatePhone | OutputGroup::IncompleteName => Color::Yellow,
    }
}

fn group_cell(group: OutputGroup) -> Cell {
    Cell::new(group.label())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn file_cell(summary: &GroupSummary, dry_run: bool) -> Cell {
    match &summary.path {
        Some(path) if dry_run => dim_cell(path.display()),
        Some(path) => Cell::new(path.display()),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
