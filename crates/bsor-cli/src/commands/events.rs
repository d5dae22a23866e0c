//! Events command: reconstructed events with running score values.

use std::path::Path;

use anyhow::Result;
use bsor_core::ReplayEvents;

use crate::config::CliConfig;

pub fn run(file: &Path, config: &CliConfig, pretty: bool) -> Result<()> {
    let replay = super::load_replay(file, config)?;
    let events = ReplayEvents::from_replay(&replay);

    if !events.score_matches() {
        eprintln!(
            "warning: calculated score {} does not match declared score {}",
            events.info.calc_score, events.info.info.score
        );
    }

    println!("{}", super::to_json(&events, pretty)?);
    Ok(())
}
