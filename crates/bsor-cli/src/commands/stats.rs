//! Stats command: per-hand statistics.

use std::path::Path;

use anyhow::Result;
use bsor_core::{Replay, ReplayEvents, ReplayStats};

use crate::config::CliConfig;
use crate::console;

fn render(replay: &Replay, summary: bool, pretty: bool) -> Result<String> {
    let events = ReplayEvents::from_replay(replay);
    let stats = ReplayStats::from_events(&events);

    if summary {
        Ok(console::format_stats_summary(&stats))
    } else {
        super::to_json(&stats, pretty)
    }
}

pub fn run(file: &Path, summary: bool, config: &CliConfig, pretty: bool) -> Result<()> {
    let replay = super::load_replay(file, config)?;
    println!("{}", render(&replay, summary, pretty)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsor_core::decode_bytes;
    use bsor_core::mock::{MockNote, MockReplayBuilder};

    #[test]
    fn test_render_stats_json() {
        let data = MockReplayBuilder::new()
            .notes(&[MockNote::perfect(30_000, 1.0), MockNote::miss(31_010, 2.0)])
            .build();
        let replay = decode_bytes(&data).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&render(&replay, false, false).unwrap()).unwrap();
        assert_eq!(json["info"]["calcScore"], 115);
        assert_eq!(json["stats"]["left"]["notes"], 1);
        assert_eq!(json["stats"]["right"]["misses"], 1);
        assert_eq!(json["stats"]["total"]["positionGrid"]["count"][8], 1);
    }
}
