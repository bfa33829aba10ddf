#![forbid(unsafe_code)]
use chrono::{NaiveDate, TimeZone, Utc};
use presence::{
    io::{self, AvailabilityBatch},
    leave::{self, LeaveRequest},
    model::{Member, Planner},
    notification::{prepare_decision_notice, TextNotice},
    schedule::{from_12_hour, Meridiem},
    storage::{JsonStorage, Storage},
};
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn batch_body_matches_backend_contract() {
    let batch = AvailabilityBatch::new(
        vec![date(2024, 1, 1), date(2024, 1, 3)],
        from_12_hour(9, 0, Meridiem::Am).unwrap(),
        from_12_hour(5, 0, Meridiem::Pm).unwrap(),
    );
    let value: serde_json::Value = serde_json::from_str(&batch.to_json().unwrap()).unwrap();
    assert_eq!(value["dates"][0], "2024-01-01");
    assert_eq!(value["dates"][1], "2024-01-03");
    assert_eq!(value["start_time"], "09:00");
    assert_eq!(value["end_time"], "17:00");
    assert_eq!(value["type"], "availability");
    assert_eq!(value["recurring"], true);
}

#[test]
fn backend_responses_parse() {
    let ok = io::parse_api_response(r#"{"success": true, "id": 42}"#).unwrap();
    assert!(ok.success);
    assert_eq!(ok.id, Some(42));
    assert_eq!(ok.error, None);

    let err = io::parse_api_response(r#"{"success": false, "error": "end before start"}"#).unwrap();
    assert!(!err.success);
    assert_eq!(err.error.as_deref(), Some("end before start"));

    assert!(io::parse_api_response("not json").is_err());
}

#[test]
fn storage_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("planner.json");
    let storage = JsonStorage::open(&path).unwrap();

    // fichier absent : état vide
    let empty = storage.load_or_init().unwrap();
    assert!(empty.members.is_empty());

    let mut planner = Planner::default();
    planner.members.push(Member::new("alice", "alice@example.com"));
    storage.save(&planner).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.members.len(), 1);
    assert_eq!(loaded.members[0].username, "alice");
}

#[test]
fn decision_notice_renders_after_approval() {
    let mut planner = Planner::default();
    let member = Member::new("alice", "alice@example.com");
    let member_id = member.id.clone();
    planner.members.push(member);

    let request =
        LeaveRequest::new(member_id, date(2024, 7, 10), date(2024, 7, 12), "Vacation", "trip")
            .unwrap();
    let request_id = request.id.clone();
    planner.requests.push(request);

    let now = Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap();
    let renderer = TextNotice;

    // pas d'avis tant que la demande est en attente
    assert!(prepare_decision_notice(&planner, &request_id, now, &renderer).is_err());

    leave::approve(&mut planner, &request_id, now, None).unwrap();
    let notice = prepare_decision_notice(&planner, &request_id, now, &renderer).unwrap();
    assert_eq!(notice.recipient, "alice@example.com");
    assert!(notice.content.contains("approuvée"));
    assert!(notice.content.contains("3 jour(s)"));
}
