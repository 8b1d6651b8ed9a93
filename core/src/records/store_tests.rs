//! Tests for practice record persistence.

use apnea_types::{CycleResult, PracticeRecord};
use chrono::{TimeZone, Utc};

use super::store::{load_records_from, record_filename, save_record_in};

fn record(hour: u32) -> PracticeRecord {
    PracticeRecord {
        table_id: "co2-beginner".to_string(),
        table_name: "CO2 Beginner".to_string(),
        completed_at: Utc.with_ymd_and_hms(2025, 6, 1, hour, 30, 0).single().expect("valid date"),
        results: vec![CycleResult {
            cycle_index: 0,
            breathe_time: 60,
            hold_time: 90,
            actual_hold_time: 87,
            was_tap_mode: false,
        }],
    }
}

#[test]
fn filename_is_derived_from_completion_time() {
    let r = record(14);
    assert_eq!(record_filename(&r.completed_at), "20250601T143000.toml");
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let r = record(9);

    save_record_in(dir.path(), &r).expect("save");
    let loaded = load_records_from(dir.path()).expect("load");
    assert_eq!(loaded, vec![r]);
}

#[test]
fn records_load_sorted_by_completion_time() {
    let dir = tempfile::tempdir().expect("tempdir");
    save_record_in(dir.path(), &record(18)).expect("save");
    save_record_in(dir.path(), &record(7)).expect("save");
    save_record_in(dir.path(), &record(12)).expect("save");

    let loaded = load_records_from(dir.path()).expect("load");
    let hours: Vec<u32> = loaded
        .iter()
        .map(|r| r.completed_at.format("%H").to_string().parse().expect("hour"))
        .collect();
    assert_eq!(hours, vec![7, 12, 18]);
}

#[test]
fn unparseable_record_files_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    save_record_in(dir.path(), &record(10)).expect("save");
    std::fs::write(dir.path().join("junk.toml"), "results = 12").expect("write");

    let loaded = load_records_from(dir.path()).expect("load");
    assert_eq!(loaded.len(), 1);
}
