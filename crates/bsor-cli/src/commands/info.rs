//! Info command: header and play metadata.

use std::path::Path;

use anyhow::Result;
use bsor_core::{Header, Info, Replay};
use serde::Serialize;

use crate::config::CliConfig;
use crate::console;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InfoOutput<'a> {
    header: &'a Header,
    info: &'a Info,
    played_at: Option<String>,
    frames: usize,
    notes: usize,
    walls: usize,
    pauses: usize,
}

fn render(replay: &Replay, summary: bool, pretty: bool) -> Result<String> {
    if summary {
        return Ok(console::format_info_summary(replay));
    }

    let output = InfoOutput {
        header: &replay.header,
        info: &replay.info,
        played_at: replay.info.played_at().map(|t| t.to_rfc3339()),
        frames: replay.frames.len(),
        notes: replay.notes.len(),
        walls: replay.walls.len(),
        pauses: replay.pauses.len(),
    };
    super::to_json(&output, pretty)
}

pub fn run(file: &Path, summary: bool, config: &CliConfig, pretty: bool) -> Result<()> {
    let replay = super::load_replay(file, config)?;
    println!("{}", render(&replay, summary, pretty)?);
    Ok(())
}
