//! The `dojoscore record` command.

use std::path::PathBuf;

use anyhow::Result;

use super::open_tracker;

pub async fn execute(
    username: String,
    set_score: Option<u64>,
    add_points: Option<u64>,
    session: bool,
    checked: bool,
    config: Option<PathBuf>,
) -> Result<()> {
    if set_score.is_some() && add_points.is_some() {
        anyhow::bail!("--set-score and --add-points are mutually exclusive");
    }
    if set_score.is_none() && add_points.is_none() && !session {
        anyhow::bail!("nothing to record; pass --set-score, --add-points, or --session");
    }

    let (_, tracker) = open_tracker(config.as_ref())?;

    // The store overwrites scores unconditionally, so additions read the
    // current value first — the read-modify-add lives here, on purpose.
    let score = match (set_score, add_points) {
        (Some(score), _) => Some(score),
        (None, Some(points)) => Some(tracker.get(&username).await.score + points),
        (None, None) => None,
    };

    if checked {
        tracker.set_checked(&username, score, session).await?;
    } else {
        tracker.set(&username, score, session).await?;
    }
    tracing::info!(username = %username, checked, store = tracker.store_name(), "progress write committed");

    let progress = tracker.get(&username).await;
    println!(
        "Recorded: {} now at {} pts, {} session(s)",
        username, progress.score, progress.active_sessions
    );

    Ok(())
}
