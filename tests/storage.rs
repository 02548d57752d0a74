#![forbid(unsafe_code)]
use chrono::{Local, NaiveDateTime, TimeZone, Utc};
use shiftswap::io::{export_requests_csv, export_shifts_csv, import_shifts_csv};
use shiftswap::model::{SwapRequest, SwapStatus};
use shiftswap::{seed_shifts, JsonStorage, Storage};
use std::fs;
use tempfile::tempdir;

fn sample_requests() -> Vec<SwapRequest> {
    let t = Utc.with_ymd_and_hms(2024, 3, 18, 9, 0, 0).unwrap();
    let mut second = SwapRequest::new(2, 3, "Jane Smith", "training day", t);
    second.status = SwapStatus::Declined;
    vec![
        SwapRequest::new(1, 1, "John Doe", "family emergency", t),
        second,
    ]
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("data.json")).unwrap();
    assert!(storage.load().unwrap().is_empty());
}

#[test]
fn save_then_load_roundtrip() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("data.json")).unwrap();
    let requests = sample_requests();

    storage.save(&requests).unwrap();
    let loaded = storage.load().unwrap();
    assert_eq!(loaded, requests);
}

#[test]
fn file_uses_swap_requests_key_and_plain_status() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    let storage = JsonStorage::open(&path).unwrap();
    storage.save(&sample_requests()).unwrap();

    let raw: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    let entries = raw["swap_requests"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["status"], "Declined");
    assert_eq!(entries[0]["request_id"], 1);
    let created = entries[0]["created_at"].as_str().unwrap();
    assert_eq!(
        created.parse::<chrono::DateTime<Utc>>().unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 18, 9, 0, 0).unwrap()
    );
}

#[test]
fn save_overwrites_previous_content() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("data.json")).unwrap();
    storage.save(&sample_requests()).unwrap();
    storage.save(&sample_requests()[..1]).unwrap();
    assert_eq!(storage.load().unwrap().len(), 1);
}

#[test]
fn loads_timestamps_written_without_offset() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(
        &path,
        r#"{"swap_requests": [{"request_id": 1, "shift_id": 1, "requester": "John Doe",
            "reason": "family emergency", "status": "Accepted",
            "created_at": "2024-03-18T09:00:00.123456"}]}"#,
    )
    .unwrap();

    let loaded = JsonStorage::open(&path).unwrap().load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].status, SwapStatus::Accepted);

    let naive =
        NaiveDateTime::parse_from_str("2024-03-18T09:00:00.123456", "%Y-%m-%dT%H:%M:%S%.f")
            .unwrap();
    let expected = Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap()
        .with_timezone(&Utc);
    assert_eq!(loaded[0].created_at, expected);
}

#[test]
fn file_without_requests_key_loads_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, "{}").unwrap();
    assert!(JsonStorage::open(&path).unwrap().load().unwrap().is_empty());
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, "{ not json").unwrap();
    let storage = JsonStorage::open(&path).unwrap();
    assert!(storage.load().is_err());

    fs::write(&path, r#"{"swap_requests":[{"request_id":"one"}]}"#).unwrap();
    assert!(storage.load().is_err());
}

#[test]
fn shifts_csv_roundtrip_and_bad_dates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shifts.csv");
    let seed = seed_shifts().unwrap();
    export_shifts_csv(&path, &seed).unwrap();
    assert_eq!(import_shifts_csv(&path).unwrap(), seed);

    fs::write(
        &path,
        "shift_id,nurse_name,date,time\n1,John Doe,2024-02-30,morning\n",
    )
    .unwrap();
    let err = import_shifts_csv(&path).unwrap_err();
    assert!(format!("{err:#}").contains("line 2"));
}

#[test]
fn requests_csv_export() {
    let mut out = Vec::new();
    export_requests_csv(&mut out, &sample_requests()).unwrap();
    let text = String::from_utf8(out).unwrap();
    insta::assert_snapshot!(text.trim_end(), @r"
request_id,shift_id,requester,reason,status,created_at
1,1,John Doe,family emergency,Pending,2024-03-18T09:00:00+00:00
2,3,Jane Smith,training day,Declined,2024-03-18T09:00:00+00:00
");
}
