//! CLI command implementations.

pub mod events;
pub mod info;
pub mod stats;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bsor_core::{ByteBuffer, Decoder, Replay};
use serde::Serialize;
use tracing::debug;

use crate::config::CliConfig;

/// Read and decode a replay file with the configured limits.
pub fn load_replay(path: &Path, config: &CliConfig) -> Result<Replay> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    debug!("Read {} bytes from {}", data.len(), path.display());

    Decoder::with_config(ByteBuffer::new(&data), config.decode)
        .decode()
        .with_context(|| format!("Failed to decode {}", path.display()))
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsor_core::mock::{MockNote, MockReplayBuilder};

    #[test]
    fn test_load_replay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("play.bsor");
        let data = MockReplayBuilder::new()
            .notes(&[MockNote::perfect(30_000, 1.0)])
            .build();
        fs::write(&path, data).unwrap();

        let replay = load_replay(&path, &CliConfig::default()).unwrap();
        assert_eq!(replay.notes.len(), 1);
    }

    #[test]
    fn test_load_invalid_replay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.bsor");
        fs::write(&path, b"not a replay").unwrap();

        let err = load_replay(&path, &CliConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to decode"));
    }

    #[test]
    fn test_to_json_compact_and_pretty() {
        let value = serde_json::json!({ "a": 1 });
        assert_eq!(to_json(&value, false).unwrap(), "{\"a\":1}");
        assert!(to_json(&value, true).unwrap().contains('\n'));
    }
}
