#![allow(dead_code)]

use once_cell::sync::Lazy;
use serde_json::{Value, json};
use std::path::PathBuf;

/// Six-handed table, dealer at seat 3, viewer at seat 1 with blinds posted.
pub static SIX_HANDED: Lazy<Value> = Lazy::new(|| {
    json!({
        "players": [
            { "name": "Alice", "chips": 150, "position": 1, "isDealer": false,
              "bets": { "preflop": "" },
              "holeCards": { "card1": "SA", "card2": "HK" } },
            { "name": "Bob", "chips": 200, "position": 2, "isDealer": false },
            { "name": "Cara", "chips": 180, "position": 3, "isDealer": true },
            { "name": "Dan", "chips": 90, "position": 4, "bets": { "preflop": "1" } },
            { "name": "Eve", "chips": 300, "position": 5, "bets": { "preflop": 2 } },
            { "name": "Finn", "chips": 120, "position": 6 }
        ],
        "cards": { "flop": ["", "", ""], "turn": "", "river": "" }
    })
});

pub fn write_json(dir: &tempfile::TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string(value).expect("serialize")).expect("write");
    path
}

pub struct Output {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run(args: &[&str]) -> Output {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let argv = std::iter::once("seatread").chain(args.iter().copied());
    let code = seatread_cli::run(argv, &mut out, &mut err);
    Output {
        code,
        stdout: String::from_utf8(out).expect("utf-8 stdout"),
        stderr: String::from_utf8(err).expect("utf-8 stderr"),
    }
}

/// Clears every `SEATREAD_*` variable for the duration of a test.
pub struct EnvGuard {
    restores: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    pub fn clean() -> Self {
        Self::apply(&[])
    }

    pub fn apply(pairs: &[(&'static str, &str)]) -> Self {
        let keys = [
            seatread_cli::config::CONFIG_ENV,
            seatread_cli::config::PLAY_STYLE_ENV,
            seatread_cli::config::PROMPT_LOG_ENV,
        ];
        let restores = keys.iter().map(|k| (*k, std::env::var(k).ok())).collect();
        for key in keys {
            unsafe { std::env::remove_var(key) };
        }
        for (key, value) in pairs {
            unsafe { std::env::set_var(key, value) };
        }
        EnvGuard { restores }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in &self.restores {
            match previous {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}
