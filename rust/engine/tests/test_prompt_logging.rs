use std::fs;
use std::path::PathBuf;

use seatread_engine::logger::{PromptLogger, PromptRecord};
use seatread_engine::session::Advice;
use seatread_engine::stage::Stage;

fn tmp_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("target");
    p.push(format!("{}_{}.jsonl", name, std::process::id()));
    let _ = fs::remove_file(&p);
    p
}

fn advice() -> Advice {
    Advice {
        prompt: "Table (small blind first):\n- SB: you".to_string(),
        stage: Stage::Turn,
        first_prompt: false,
    }
}

#[test]
fn writes_jsonl_with_lf_only() {
    let path = tmp_path("promptlog");
    let mut logger = PromptLogger::open(&path).expect("open logger");
    logger
        .write(&PromptRecord::from_advice(Some("t-1"), &advice()))
        .expect("write");
    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));

    let line = String::from_utf8(bytes).unwrap();
    let rec: PromptRecord = serde_json::from_str(line.trim_end()).expect("parse line");
    assert_eq!(rec.table_id.as_deref(), Some("t-1"));
    assert_eq!(rec.stage, Stage::Turn);
    assert_eq!(rec.prompt, advice().prompt);
}

#[test]
fn appends_across_reopen() {
    let path = tmp_path("promptlog_append");
    for _ in 0..2 {
        let mut logger = PromptLogger::open(&path).expect("open logger");
        logger
            .write(&PromptRecord::from_advice(None, &advice()))
            .expect("write");
    }
    let content = fs::read_to_string(&path).expect("read");
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn ts_is_generated_when_missing_and_preserved_when_present() {
    let path = tmp_path("promptlog_ts");
    let mut logger = PromptLogger::open(&path).expect("open logger");
    let rec = PromptRecord::from_advice(None, &advice());
    logger.write(&rec).expect("write");
    let line = fs::read_to_string(&path).unwrap();
    assert!(line.contains("\"ts\":\""), "ts should be injected");

    let preset = "2030-01-01T00:00:00Z".to_string();
    let rec2 = PromptRecord {
        ts: Some(preset.clone()),
        ..rec
    };
    logger.write(&rec2).expect("write2");
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains(&preset), "preset ts must be kept");
}

#[test]
fn disabled_logger_accepts_records() {
    let mut logger = PromptLogger::disabled();
    assert!(!logger.is_enabled());
    logger
        .write(&PromptRecord::from_advice(None, &advice()))
        .expect("write");
}
