//! End-to-end pipeline behavior.

use proptest::prelude::*;

use noor_core::normalize;
use noor_lookup::LookupTables;
use noor_model::{
    ExclusionReason, Gender, NormalizationOptions, NormalizedRecord, OutputBatches, OutputRow,
    RawRow, RecencyOrder,
};

fn lookups() -> LookupTables {
    let mut tables = LookupTables::builtin();
    tables.names.insert_primary("Ali", Gender::Male);
    tables.names.insert_primary("Sara", Gender::Female);
    tables
}

fn run(rows: &[RawRow]) -> OutputBatches {
    normalize(rows, &lookups(), &NormalizationOptions::default())
}

fn output(record: &NormalizedRecord) -> String {
    OutputRow::from(record).values().join("|")
}

#[test]
fn clean_row_output_shape() {
    let rows = [RawRow::new("0012345678", "Ali Rezaei")
        .with_mobile("9121234567")
        .with_visit_date("1403/02/12 14:30")
        .with_appointment_type("فالوآپ")];
    let batches = run(&rows);
    assert_eq!(batches.clean.len(), 1);
    insta::assert_snapshot!(
        output(&batches.clean[0]),
        @"0012345678|Ali|Rezaei|male|09121234567|2024-05-01|1403/02/12|1403/02/12 14:30|2024-05-01T14:30:00|noor_hospital_queue,patient,phone_user"
    );
}

#[test]
fn national_id_rule() {
    let rows = [
        RawRow::new("0000000000", "Ali Rezaei"),
        RawRow::new("0012345678", "Ali Rezaei"),
        RawRow::new("123", "Sara Ahmadi"),
    ];
    let batches = run(&rows);
    assert_eq!(batches.clean.len(), 1);
    assert_eq!(batches.clean[0].national_id, "0012345678");
    let reasons: Vec<_> = batches.excluded.iter().map(|r| (r.row, r.reason.clone())).collect();
    assert_eq!(
        reasons,
        vec![
            (0, ExclusionReason::InvalidNationalId),
            (2, ExclusionReason::InvalidNationalId),
        ]
    );
}

#[test]
fn name_completion_from_older_record() {
    let rows = [
        RawRow::new("0012345678", "Ali Rezaei").with_visit_date("1403/01/10"),
        RawRow::new("0012345678", "Ali").with_visit_date("1403/02/10"),
    ];
    let batches = run(&rows);
    assert_eq!(batches.clean.len(), 1);
    assert!(batches.incomplete_name.is_empty());
    let merged = &batches.clean[0];
    assert_eq!(merged.row, 1);
    assert_eq!(merged.first_name, "Ali");
    assert_eq!(merged.last_name, "Rezaei");
    assert_eq!(OutputRow::from(merged).visit_date_ui, "1403/02/10");
}

#[test]
fn name_that_cannot_be_completed() {
    let rows = [RawRow::new("0012345678", "Ali")];
    let batches = run(&rows);
    assert!(batches.clean.is_empty());
    assert_eq!(batches.incomplete_name.len(), 1);
    assert_eq!(batches.total(), 1);
}

#[test]
fn phone_duplicates_across_patients() {
    let rows = [
        RawRow::new("0012345678", "Ali Rezaei").with_mobile("09121234567"),
        RawRow::new("0087654321", "Sara Ahmadi").with_mobile("+98 912 123 4567"),
        RawRow::new("0011223344", "Reza Karimi").with_mobile("09351234567"),
    ];
    let batches = run(&rows);
    let rows_of = |records: &[NormalizedRecord]| records.iter().map(|r| r.row).collect::<Vec<_>>();
    assert_eq!(rows_of(&batches.duplicate_phone), vec![0, 1]);
    assert_eq!(rows_of(&batches.clean), vec![2]);
}

#[test]
fn later_row_wins_when_recency_ties() {
    let rows = [
        RawRow::new("0012345678", "Ali Rezaei").with_visit_date("1403/02/12"),
        RawRow::new("0012345678", "Ali Rezaee").with_visit_date("1403/02/12"),
    ];
    let batches = run(&rows);
    assert_eq!(batches.clean[0].last_name, "Rezaee");
    assert_eq!(
        batches.excluded[0].reason,
        ExclusionReason::Superseded { by_row: 1 }
    );
}

#[test]
fn recency_can_follow_input_order() {
    let rows = [
        RawRow::new("0012345678", "Ali Later").with_visit_date("1403/05/01"),
        RawRow::new("0012345678", "Ali Earlier").with_visit_date("1403/01/01"),
    ];
    let by_date = run(&rows);
    assert_eq!(by_date.clean[0].last_name, "Later");

    let options = NormalizationOptions::new().with_recency(RecencyOrder::InputOrder);
    let by_row = normalize(&rows, &lookups(), &options);
    assert_eq!(by_row.clean[0].last_name, "Earlier");
}

#[test]
fn clean_output_is_stable_when_fed_back() {
    let rows = [RawRow::new("۰۰۱۲۳۴۵۶۷۸", "علي  رضایی")
        .with_mobile("00989121234567")
        .with_visit_date("1403/12/29 08:05")
        .with_status("چاپ نوبت")
        .with_clinic("کلینیک تخصصی چشم")];
    let first = run(&rows);
    let record = &first.clean[0];

    let fed_back = [RawRow::new(record.national_id.clone(), record.full_name())
        .with_mobile(record.mobile.clone().unwrap_or_default())
        .with_visit_date(OutputRow::from(record).visit_date_db)
        .with_tags(record.tags_joined())];
    let second = run(&fed_back);
    assert_eq!(second.clean.len(), 1);
    assert_eq!(OutputRow::from(&second.clean[0]), OutputRow::from(record));
}

fn raw_row() -> impl Strategy<Value = RawRow> {
    let ids = prop::sample::select(vec![
        "0012345678",
        "0087654321",
        "1234567890",
        "0000000000",
        "123",
    ]);
    let names = prop::sample::select(vec![
        "Ali Rezaei",
        "Ali",
        "Sara Ahmadi",
        "Sara",
        "Al",
        "کاربر تلفنی",
        "",
    ]);
    let mobiles = prop::sample::select(vec!["", "09121234567", "09351234567", "12345"]);
    let dates = prop::sample::select(vec![
        "",
        "1403/02/12",
        "1403/02/12 10:00",
        "2024-05-01T09:00:00",
        "1404/12/30",
        "01/02/2024",
        "45413",
    ]);
    (ids, names, mobiles, dates).prop_map(|(id, name, mobile, date)| {
        RawRow::new(id, name)
            .with_mobile(mobile)
            .with_visit_date(date)
    })
}

proptest! {
    #[test]
    fn every_row_lands_in_exactly_one_group(rows in prop::collection::vec(raw_row(), 0..40)) {
        let batches = run(&rows);
        prop_assert_eq!(batches.total(), rows.len());

        let mut seen: Vec<usize> = batches
            .clean
            .iter()
            .chain(&batches.duplicate_phone)
            .chain(&batches.incomplete_name)
            .map(|r| r.row)
            .chain(batches.excluded.iter().map(|r| r.row))
            .collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..rows.len()).collect::<Vec<_>>());
    }

    #[test]
    fn repeated_runs_are_identical(rows in prop::collection::vec(raw_row(), 0..40)) {
        prop_assert_eq!(run(&rows), run(&rows));
    }

    #[test]
    fn groups_keep_input_order(rows in prop::collection::vec(raw_row(), 0..40)) {
        let batches = run(&rows);
        for group in [&batches.clean, &batches.duplicate_phone, &batches.incomplete_name] {
            prop_assert!(group.windows(2).all(|w| w[0].row < w[1].row));
        }
        prop_assert!(batches.excluded.windows(2).all(|w| w[0].row < w[1].row));
    }
}
