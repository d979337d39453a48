use chrono::NaiveDate;
use gantt_rs::api::{
    ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, TimelineEngine, TimelineEngineConfig,
};
use gantt_rs::core::{GranularityLevel, ItemStatus, LicenseRecord, Viewport};
use gantt_rs::interaction::SyncPhase;
use gantt_rs::render::{NullRenderer, RenderStrategy};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn engine_with_records() -> TimelineEngine<NullRenderer> {
    let config = TimelineEngineConfig::new(Viewport::new(1200, 800)).with_today(date(2024, 6, 1));
    let mut engine = TimelineEngine::new(NullRenderer::default(), config).expect("engine init");
    engine
        .set_records(vec![
            LicenseRecord::new("Office", "Acme", "2023-02-01"),
            LicenseRecord::new("Cad", "Globex", "2024-06-10"),
            LicenseRecord::new("Mail", "Initech", "2025-09-01"),
            LicenseRecord::new("Crm", "Hooli", "2026-11-15"),
        ])
        .expect("set records");
    engine
}

#[test]
fn snapshot_reports_view_state() {
    let engine = engine_with_records();
    let snapshot = engine.snapshot().expect("snapshot");

    assert_eq!(snapshot.item_count, 4);
    assert_eq!(snapshot.visible_count, 4);
    assert_eq!(snapshot.granularity, GranularityLevel::Year);
    assert_eq!(snapshot.lod, RenderStrategy::Vector);
    assert_eq!(snapshot.active_layer, RenderStrategy::Vector);
    assert_eq!(snapshot.sync_phase, SyncPhase::Idle);
    let statuses: Vec<(ItemStatus, usize)> = snapshot
        .status_counts
        .iter()
        .map(|(status, count)| (*status, *count))
        .collect();
    assert_eq!(
        statuses,
        vec![
            (ItemStatus::Active, 2),
            (ItemStatus::Renewal, 1),
            (ItemStatus::Expired, 1),
        ]
    );
}

#[test]
fn snapshot_contract_round_trips() {
    let engine = engine_with_records();
    let snapshot = engine.snapshot().expect("snapshot");
    let json = snapshot
        .to_json_contract_v1_pretty()
        .expect("serialize contract");
    assert!(json.contains("\"schema_version\": 1"));

    let parsed = EngineSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed.item_count, snapshot.item_count);
    assert_eq!(parsed.status_counts, snapshot.status_counts);
    assert_eq!(parsed.granularity, snapshot.granularity);
    assert_eq!(parsed.time_selection.is_some(), snapshot.time_selection.is_some());
    assert_eq!(parsed.extent.time_start, snapshot.extent.time_start);

    let bare = engine.snapshot_json_pretty().expect("serialize bare");
    let parsed_bare = EngineSnapshot::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(parsed_bare.item_count, 4);
}

#[test]
fn unknown_snapshot_schema_is_rejected() {
    let engine = engine_with_records();
    let json = engine
        .snapshot()
        .expect("snapshot")
        .to_json_contract_v1_pretty()
        .expect("serialize");
    let bumped = json.replace(
        &format!("\"schema_version\": {ENGINE_SNAPSHOT_JSON_SCHEMA_V1}"),
        "\"schema_version\": 99",
    );
    assert!(EngineSnapshot::from_json_compat_str(&bumped).is_err());
}
