//! Ingest-to-report integration tests
//!
//! Feeds the three source CSVs through the loaders and runs a report on
//! the result, covering the malformed-row policy end to end.

mod common;

use common::create_unique_test_db_path;
use std::io::Write;
use std::path::PathBuf;
use store_uptime_monitor::config::EngineConfig;
use store_uptime_monitor::database::{
    Database, HoursOperations, ReportOperations, StatusOperations, TimezoneOperations,
};
use store_uptime_monitor::ingest::{ingest_hours_csv, ingest_status_csv, ingest_timezones_csv};
use store_uptime_monitor::report::ReportOrchestrator;
use store_uptime_monitor::types::ReportStatus;

fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[tokio::test]
async fn csv_sources_flow_through_to_a_complete_report() {
    let db_path = create_unique_test_db_path("ingest_to_report");
    let fixtures = tempfile::tempdir().unwrap();
    let reports_dir = tempfile::tempdir().unwrap();

    // 2023-01-25 is a Wednesday; the last poll fixes the reference instant
    // at 22:00 UTC = 16:00 Chicago, inside the 08:00-17:00 window.
    let status_csv = write_fixture(
        &fixtures,
        "store_status.csv",
        "store_id,status,timestamp_utc\n\
         s1,inactive,2023-01-25 20:30:00 UTC\n\
         s1,active,2023-01-25 21:30:00 UTC\n\
         s1,active,2023-01-25 22:00:00 UTC\n\
         s1,not-a-status,2023-01-25 21:45:00 UTC\n\
         s1,active,garbled-timestamp\n",
    );
    let hours_csv = write_fixture(
        &fixtures,
        "menu_hours.csv",
        "store_id,dayOfWeek,start_time_local,end_time_local\n\
         s1,0,08:00:00,17:00:00\n\
         s1,1,08:00:00,17:00:00\n\
         s1,2,08:00:00,17:00:00\n\
         s1,3,08:00:00,17:00:00\n\
         s1,4,08:00:00,17:00:00\n",
    );
    let timezones_csv = write_fixture(
        &fixtures,
        "timezones.csv",
        "store_id,timezone_str\n\
         s1,America/Chicago\n",
    );

    let mut db = Database::new(&db_path).unwrap();

    let status_stats = ingest_status_csv(&mut db, &status_csv, 1000).unwrap();
    assert_eq!(status_stats.inserted, 3);
    assert_eq!(status_stats.malformed, 2);

    let hours_stats = ingest_hours_csv(&mut db, &hours_csv, 1000).unwrap();
    assert_eq!(hours_stats.inserted, 5);

    let timezone_stats = ingest_timezones_csv(&mut db, &timezones_csv, 1000).unwrap();
    assert_eq!(timezone_stats.inserted, 1);

    assert_eq!(db.count_status_rows().unwrap(), 3);
    assert_eq!(db.hours_for_store("s1").unwrap().len(), 5);
    assert!(db.timezone_for_store("s1").unwrap().is_some());
    drop(db);

    let orchestrator = ReportOrchestrator::new(
        PathBuf::from(&db_path),
        reports_dir.path().to_path_buf(),
        EngineConfig::default(),
    )
    .unwrap();
    let (report_id, handle) = orchestrator.trigger(None).unwrap();
    handle.await.unwrap();

    let db = Database::new(&db_path).unwrap();
    let job = db.get_report(&report_id).unwrap().unwrap();
    assert_eq!(job.status, ReportStatus::Complete);

    let output_path = job.output_path.unwrap();
    let mut reader = csv::Reader::from_path(&output_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "s1");
    // Last hour: 21:00-21:30 inactive (seeded from the 20:30 poll), then
    // 21:30-22:00 active; the malformed rows changed nothing.
    assert_eq!(&rows[0][1], "30.00");
    assert_eq!(&rows[0][4], "30.00");
}
