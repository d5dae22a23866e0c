//! Colored console summaries

use std::fmt::Write as _;

use bsor_core::{HandStats, Replay, ReplayStats};
use owo_colors::OwoColorize;

const BORDER_WIDTH: usize = 50;

fn border() -> String {
    "━".repeat(BORDER_WIDTH).dimmed().to_string()
}

fn format_accuracy(accuracy: f64) -> String {
    let text = format!("{:.2}%", accuracy);
    if accuracy >= 95.0 {
        text.bright_cyan().to_string()
    } else if accuracy >= 90.0 {
        text.green().to_string()
    } else if accuracy >= 80.0 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

/// Player, song and settings of a replay.
pub fn format_info_summary(replay: &Replay) -> String {
    let info = &replay.info;
    let mut output = String::new();

    let _ = writeln!(output, "{}", border());
    let _ = writeln!(
        output,
        "  {} [{} {}]",
        info.song_name.bold(),
        info.difficulty,
        info.mode
    );
    let _ = writeln!(output, "{}", border());
    let _ = writeln!(output, "  PLAYER  : {} ({})", info.player_name, info.player_id);
    let _ = writeln!(output, "  MAPPER  : {}", info.mapper);
    if let Some(played_at) = info.played_at() {
        let _ = writeln!(output, "  PLAYED  : {}", played_at.format("%Y-%m-%d %H:%M UTC"));
    }
    let _ = writeln!(output, "  SCORE   : {}", info.score.to_string().bold());
    let modifiers: Vec<&str> = info.modifier_list().collect();
    if !modifiers.is_empty() {
        let _ = writeln!(output, "  MODS    : {}", modifiers.join(", "));
    }
    let _ = writeln!(output, "  HMD     : {} / {}", info.hmd, info.controller);
    if info.failed() {
        let _ = writeln!(output, "  FAILED  : {}", format!("{:.2}s", info.fail_time).red());
    }
    let _ = write!(output, "{}", border());

    output
}

fn format_hand(output: &mut String, label: &str, hand: &HandStats) {
    let _ = writeln!(
        output,
        "  {:<6}: {:>4} notes  {:>3} miss  {:>3} bad  combo {:>4}  avg {:>6.2}",
        label,
        hand.notes,
        hand.misses.to_string().red(),
        hand.bad_cuts.to_string().yellow(),
        hand.max_combo,
        hand.score.avg
    );
}

/// Accuracy, score and per-hand counts.
pub fn format_stats_summary(stats: &ReplayStats) -> String {
    let info = &stats.info;
    let mut output = String::new();

    let _ = writeln!(output, "{}", border());
    let _ = writeln!(
        output,
        "  {} [{}] by {}",
        info.info.song_name.bold(),
        info.info.difficulty,
        info.info.player_name
    );
    let _ = writeln!(output, "{}", border());

    let score = if info.calc_score == info.info.score {
        info.calc_score.to_string().green().to_string()
    } else {
        format!(
            "{} (declared {})",
            info.calc_score.to_string().yellow(),
            info.info.score
        )
    };
    let _ = writeln!(output, "  SCORE    : {}", score);
    let _ = writeln!(output, "  ACCURACY : {}", format_accuracy(info.accuracy));
    let _ = writeln!(output, "  FC ACC   : {}", format_accuracy(info.fc_accuracy));
    let _ = writeln!(
        output,
        "  WALLS    : {}  PAUSES: {}",
        info.wall_hits, info.pauses
    );
    let _ = writeln!(output, "{}", border());

    format_hand(&mut output, "LEFT", &stats.stats.left);
    format_hand(&mut output, "RIGHT", &stats.stats.right);
    format_hand(&mut output, "TOTAL", &stats.stats.total);
    let _ = write!(output, "{}", border());

    output
}
