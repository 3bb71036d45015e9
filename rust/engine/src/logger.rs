use serde::{Deserialize, Serialize};

use crate::session::Advice;
use crate::stage::Stage;

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// One rendered scene description as written to the prompt log.
/// Serialized as a single JSON line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PromptRecord {
    /// Timestamp when the prompt was rendered (RFC3339, UTC)
    #[serde(default)]
    pub ts: Option<String>,
    /// Table the prompt belongs to, when the caller tracks tables
    #[serde(default)]
    pub table_id: Option<String>,
    pub stage: Stage,
    pub first_prompt: bool,
    pub prompt: String,
}

impl PromptRecord {
    pub fn from_advice(table_id: Option<&str>, advice: &Advice) -> Self {
        Self {
            ts: None,
            table_id: table_id.map(str::to_string),
            stage: advice.stage,
            first_prompt: advice.first_prompt,
            prompt: advice.prompt.clone(),
        }
    }
}

/// Append-only JSONL writer for rendered prompts.
pub struct PromptLogger {
    writer: Option<BufWriter<File>>,
}

impl PromptLogger {
    /// Opens `path` for appending, creating it and its parent directory.
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
        })
    }

    /// Logger that accepts records and writes nothing.
    pub fn disabled() -> Self {
        Self { writer: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    pub fn write(&mut self, record: &PromptRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for PromptLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptLogger")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
