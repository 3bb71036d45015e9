//! Reading table snapshots from disk or stdin.

use seatread_engine::board::CommunityCards;
use seatread_engine::player::Player;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Table data as written by the web client: players plus the board.
///
/// A bare JSON array is accepted as a player list with no board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Snapshot {
    pub players: Vec<Player>,
    #[serde(default, alias = "communityCards")]
    pub cards: CommunityCards,
}

/// Reads a text file, or stdin when `path` is `-`. A UTF-8 BOM is stripped.
pub fn read_text(path: &str) -> Result<String, String> {
    let mut content = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        buf
    } else {
        std::fs::read_to_string(Path::new(path))
            .map_err(|e| format!("Failed to read {}: {}", path, e))?
    };
    if content.starts_with('\u{feff}') {
        content.drain(..'\u{feff}'.len_utf8());
    }
    Ok(content)
}

pub fn parse_snapshot(text: &str) -> Result<Snapshot, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if value.is_array() {
        return Ok(Snapshot {
            players: serde_json::from_value(value)?,
            cards: CommunityCards::default(),
        });
    }
    serde_json::from_value(value)
}
