use std::fs;

use handsim_engine::condition::{Condition, Operator, TargetHand};
use handsim_engine::logger::{format_run_id, RunLogger, RunRecord, TargetSummary};
use handsim_engine::simulation::SimulationResult;

fn sample_record() -> RunRecord {
    RunRecord {
        run_id: "20250102-000123".to_string(),
        seed: 42,
        trials: 1000,
        hand_size: 5,
        deck_size: 40,
        exclusive: false,
        targets: vec![TargetSummary {
            name: "starter".to_string(),
            hits: 337,
            percent: 33.7,
        }],
        missing_metadata: vec![],
        ts: None,
    }
}

#[test]
fn run_record_serializes_and_deserializes() {
    let rec = sample_record();
    let s = serde_json::to_string(&rec).expect("serialize");
    let back: RunRecord = serde_json::from_str(&s).expect("deserialize");
    assert_eq!(rec, back);
    assert!(!s.contains("missing_metadata"));
}

#[test]
fn id_format_is_date_and_sequence() {
    let id = format_run_id("20251231", 42);
    assert_eq!(id, "20251231-000042");
}

#[test]
fn record_is_built_from_result() {
    let targets = vec![
        TargetHand::named("x", vec![Condition::card("X", Operator::AtLeast, 1)]),
        TargetHand::new(vec![Condition::card("Y", Operator::AtLeast, 1)]),
    ];
    let result = SimulationResult {
        trials: 3,
        seed: 9,
        exclusive: true,
        hits: vec![1, 2],
        missing_metadata: vec!["ghost".into()],
    };
    let rec = RunRecord::from_result("20250101-000001".into(), &targets, 5, 40, &result);
    assert_eq!(rec.targets[0].name, "x");
    assert_eq!(rec.targets[1].name, "#1");
    assert_eq!(rec.targets[0].percent, 33.33);
    assert_eq!(rec.targets[1].percent, 66.67);
    assert_eq!(rec.missing_metadata, vec!["ghost".to_string()]);
    assert!(rec.exclusive);
}

#[test]
fn writes_jsonl_with_lf_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs.jsonl");
    let mut logger = RunLogger::create(&path).expect("create logger");
    logger.write(&sample_record()).expect("write");
    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
}

#[test]
fn sequential_ids_increment() {
    let mut logger = RunLogger::with_seq_for_test("20251231");
    assert_eq!(logger.next_id(), "20251231-000001");
    assert_eq!(logger.next_id(), "20251231-000002");
}

#[test]
fn sequence_continues_after_existing_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("runs.jsonl");
    {
        let mut logger = RunLogger::create(&path).unwrap();
        logger.write(&sample_record()).unwrap();
        logger.write(&sample_record()).unwrap();
    }
    let mut logger = RunLogger::create(&path).unwrap();
    assert!(logger.next_id().ends_with("-000003"));
}

#[test]
fn ts_is_generated_when_missing_and_preserved_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs_ts.jsonl");
    let mut logger = RunLogger::create(&path).expect("create logger");
    let rec = sample_record();
    logger.write(&rec).expect("write");
    let line = fs::read_to_string(&path).unwrap();
    assert!(line.contains("\"ts\":"), "ts should be injected");

    let preset = "2030-01-01T00:00:00Z".to_string();
    let rec2 = RunRecord {
        ts: Some(preset.clone()),
        ..rec
    };
    logger.write(&rec2).expect("write2");
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains(&preset), "preset ts must be kept");
}
