//! End-to-end runs of the `noor-queue` command against temporary exports.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use noor_cli::cli::Cli;
use noor_cli::commands::run;
use noor_cli::summary::{exclusion_table, group_table};
use noor_model::OutputGroup;
use tempfile::TempDir;

const EXPORT: &str = "\
ردیف,کد ملی,بیمار,شماره موبایل,تاریخ اخذ,وضعیت
1,0012345678,علی رضایی,09121234567,1403/02/12 14:30,چاپ نوبت
2,0087654321,سارا احمدی,,1403/02/13,
3,123,مریم کریمی,09351234567,1403/02/14,
";

struct Fixture {
    dir: TempDir,
    input: PathBuf,
    lookup_dir: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("queue.csv");
        fs::write(&input, EXPORT).unwrap();
        let lookup_dir = dir.path().join("lookup");
        fs::create_dir(&lookup_dir).unwrap();
        Self {
            dir,
            input,
            lookup_dir,
        }
    }

    fn cli(&self, extra: &[&str]) -> Cli {
        let mut args = vec![
            "noor-queue".to_string(),
            self.input.display().to_string(),
            "--lookup-dir".to_string(),
            self.lookup_dir.display().to_string(),
        ];
        args.extend(extra.iter().map(ToString::to_string));
        Cli::try_parse_from(args).unwrap()
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn group_counts(result: &noor_cli::types::RunResult) -> String {
    result
        .groups
        .iter()
        .map(|summary| format!("{}: {}", summary.group.label(), summary.records))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn writes_clean_and_excluded_files() {
    let fixture = Fixture::new();
    let result = run(&fixture.cli(&[])).unwrap();

    insta::assert_snapshot!(group_counts(&result), @r"
    Clean: 2
    Excluded: 1
    Duplicate phone: 0
    Incomplete name: 0
    ");
    assert_eq!(result.rows_read, 3);
    assert_eq!(result.total_records(), 3);
    assert!(fixture.path("queue_cleaned.csv").exists());
    assert!(fixture.path("queue_cleaned_excluded.csv").exists());
    assert!(!fixture.path("queue_cleaned_duplicate_phone.csv").exists());

    let excluded = fs::read_to_string(fixture.path("queue_cleaned_excluded.csv")).unwrap();
    assert!(excluded.starts_with("row,reason,national_id"));
    assert!(excluded.contains("3,invalid national id,123"));
    let header = excluded.lines().next().unwrap();
    assert!(header.ends_with(",tags,detail"));
}

#[test]
fn dry_run_writes_nothing() {
    let fixture = Fixture::new();
    let result = run(&fixture.cli(&["--dry-run"])).unwrap();
    assert!(result.dry_run);
    let clean = &result.groups[0];
    assert_eq!(clean.group, OutputGroup::Clean);
    assert_eq!(clean.path, Some(fixture.path("queue_cleaned.csv")));
    assert!(!fixture.path("queue_cleaned.csv").exists());
}

#[test]
fn existing_output_needs_overwrite() {
    let fixture = Fixture::new();
    let output = fixture.path("out.csv");
    fs::write(&output, "keep me").unwrap();
    let output_arg = output.display().to_string();

    let err = run(&fixture.cli(&["-o", &output_arg])).unwrap_err();
    assert!(format!("{err:#}").contains("already exists"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");

    run(&fixture.cli(&["-o", &output_arg, "--overwrite"])).unwrap();
    assert_ne!(fs::read_to_string(&output).unwrap(), "keep me");
}

#[test]
fn missing_input_reports_path() {
    let fixture = Fixture::new();
    let mut cli = fixture.cli(&[]);
    cli.inputs = vec![Path::new("/nonexistent/export.csv").to_path_buf()];
    let err = run(&cli).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("read exports"));
    assert!(message.contains("/nonexistent/export.csv"));
}

#[test]
fn summary_tables_list_groups_and_reasons() {
    let fixture = Fixture::new();
    let result = run(&fixture.cli(&["--dry-run"])).unwrap();
    let groups = group_table(&result).to_string();
    for label in ["Clean", "Excluded", "Duplicate phone", "Incomplete name", "TOTAL"] {
        assert!(groups.contains(label), "missing {label}");
    }
    let reasons = exclusion_table(&result).to_string();
    assert!(reasons.contains("invalid national id"));
}
