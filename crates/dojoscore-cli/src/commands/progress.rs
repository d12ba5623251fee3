//! The `dojoscore progress` command.

use std::path::PathBuf;

use anyhow::Result;

use dojoscore_core::belts::{current_belt, next_belt, NextBelt};

use super::open_tracker;

pub async fn execute(username: String, config: Option<PathBuf>) -> Result<()> {
    let (_, tracker) = open_tracker(config.as_ref())?;
    let progress = tracker.get(&username).await;

    let belt = current_belt(progress.score);
    let next = next_belt(progress.score);

    println!("User:     {username}");
    println!("Score:    {}", progress.score);
    println!("Belt:     {} ({})", belt.name, belt.color);
    println!("Sessions: {}", progress.active_sessions);

    match next {
        NextBelt::Next { tier, progress: p } => {
            println!(
                "Next:     {} at {} pts  [{}] {:.0}%",
                tier.name,
                tier.threshold,
                bar(p),
                p * 100.0
            );
        }
        NextBelt::MaxLevel => {
            println!("Next:     {} ({} pts)", next.label(), progress.score);
        }
    }

    Ok(())
}

/// Ten-slot ASCII progress bar.
fn bar(progress: f64) -> String {
    let filled = (progress * 10.0).round() as usize;
    let filled = filled.min(10);
    format!("{}{}", "#".repeat(filled), "-".repeat(10 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(0.0), "----------");
        assert_eq!(bar(0.5), "#####-----");
        assert_eq!(bar(1.0), "##########");
    }
}
