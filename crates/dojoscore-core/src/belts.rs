//! The belt ladder: tier table, resolver, and next-belt progress.
//!
//! Belts double as the individual progress display and as the weighting
//! function for the fleet-wide ROI evolution multiplier.

use serde::Serialize;

/// A named rank unlocked at a score threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BeltTier {
    /// Human-readable tier name.
    pub name: &'static str,
    /// Display color as a hex string.
    pub color: &'static str,
    /// Minimum score at which this tier is held.
    pub threshold: u64,
}

/// The belt ladder, ascending by threshold.
///
/// Invariants: thresholds strictly increasing, the first threshold is 0
/// (so every score resolves to a tier).
pub const BELTS: [BeltTier; 7] = [
    BeltTier { name: "White Belt", color: "#ffffff", threshold: 0 },
    BeltTier { name: "Yellow Belt", color: "#ffff00", threshold: 50 },
    BeltTier { name: "Orange Belt", color: "#ffa500", threshold: 150 },
    BeltTier { name: "Green Belt", color: "#008000", threshold: 300 },
    BeltTier { name: "Blue Belt", color: "#0000ff", threshold: 500 },
    BeltTier { name: "Brown Belt", color: "#a52a2a", threshold: 800 },
    BeltTier { name: "Black Belt", color: "#000000", threshold: 1200 },
];

/// Sentinel text rendered by display layers when no next belt exists.
pub const MAX_LEVEL_LABEL: &str = "Max level reached";

/// Resolve the belt held at `score`: the tier with the greatest
/// threshold not exceeding it.
pub fn current_belt(score: u64) -> &'static BeltTier {
    let mut current = &BELTS[0];
    for belt in &BELTS {
        if score >= belt.threshold {
            current = belt;
        } else {
            break;
        }
    }
    current
}

/// 0-based position of the belt held at `score` within [`BELTS`].
pub fn belt_index(score: u64) -> usize {
    BELTS
        .iter()
        .rposition(|b| score >= b.threshold)
        .unwrap_or(0)
}

/// Progress toward the next belt, or the end of the ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NextBelt {
    /// There is a higher belt to earn.
    Next {
        /// The next unattained tier.
        tier: &'static BeltTier,
        /// Fraction of the way from the current threshold to the next,
        /// clamped to [0, 1].
        progress: f64,
    },
    /// The score is at or above the top threshold.
    MaxLevel,
}

impl NextBelt {
    /// Progress in [0, 1]; 1.0 exactly when the ladder is exhausted.
    pub fn progress(&self) -> f64 {
        match self {
            NextBelt::Next { progress, .. } => *progress,
            NextBelt::MaxLevel => 1.0,
        }
    }

    /// Name to display for the next tier.
    pub fn label(&self) -> &'static str {
        match self {
            NextBelt::Next { tier, .. } => tier.name,
            NextBelt::MaxLevel => MAX_LEVEL_LABEL,
        }
    }
}

/// Find the smallest threshold strictly greater than the current tier's,
/// and how far `score` has advanced toward it.
///
/// The clamp matters: a score can sit exactly on a boundary, and scores
/// read from corrupted storage can land outside the expected range.
pub fn next_belt(score: u64) -> NextBelt {
    let current = current_belt(score);
    let Some(next) = BELTS.iter().find(|b| b.threshold > current.threshold) else {
        return NextBelt::MaxLevel;
    };

    let span = (next.threshold - current.threshold) as f64;
    let gained = score.saturating_sub(current.threshold) as f64;
    NextBelt::Next {
        tier: next,
        progress: (gained / span).clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_and_thresholds_match_the_deployed_table() {
        // The deployed ladder, color-for-color. Names are the English
        // equivalents of its labels; the data must not drift.
        let expected = [
            ("#ffffff", 0),
            ("#ffff00", 50),
            ("#ffa500", 150),
            ("#008000", 300),
            ("#0000ff", 500),
            ("#a52a2a", 800),
            ("#000000", 1200),
        ];
        for (belt, (color, threshold)) in BELTS.iter().zip(expected) {
            assert_eq!(belt.color, color);
            assert_eq!(belt.threshold, threshold);
        }
    }

    #[test]
    fn table_invariants() {
        assert_eq!(BELTS[0].threshold, 0);
        for pair in BELTS.windows(2) {
            assert!(pair[0].threshold < pair[1].threshold);
        }
    }

    #[test]
    fn current_belt_is_greatest_threshold_not_exceeding_score() {
        for score in 0..=1500 {
            let belt = current_belt(score);
            assert!(belt.threshold <= score);
            for other in &BELTS {
                if other.threshold <= score {
                    assert!(other.threshold <= belt.threshold);
                }
            }
        }
    }

    #[test]
    fn boundaries_resolve_to_the_new_belt() {
        assert_eq!(current_belt(0).name, "White Belt");
        assert_eq!(current_belt(49).name, "White Belt");
        assert_eq!(current_belt(50).name, "Yellow Belt");
        assert_eq!(current_belt(1199).name, "Brown Belt");
        assert_eq!(current_belt(1200).name, "Black Belt");
        assert_eq!(current_belt(50_000).name, "Black Belt");
    }

    #[test]
    fn belt_index_matches_current_belt() {
        for score in [0, 49, 50, 150, 700, 1200, 9999] {
            assert_eq!(BELTS[belt_index(score)].name, current_belt(score).name);
        }
        assert_eq!(belt_index(1200), 6);
    }

    #[test]
    fn next_belt_progress_stays_in_unit_interval() {
        for score in 0..=2000 {
            let p = next_belt(score).progress();
            assert!((0.0..=1.0).contains(&p), "score {score} gave progress {p}");
        }
    }

    #[test]
    fn progress_is_one_exactly_at_or_above_the_top() {
        for score in 0..1200 {
            assert!(next_belt(score).progress() < 1.0, "score {score}");
        }
        assert_eq!(next_belt(1200), NextBelt::MaxLevel);
        assert_eq!(next_belt(1200).progress(), 1.0);
        assert_eq!(next_belt(1200).label(), MAX_LEVEL_LABEL);
    }

    #[test]
    fn linear_interpolation_between_thresholds() {
        // White (0) -> Yellow (50): score 25 is halfway.
        match next_belt(25) {
            NextBelt::Next { tier, progress } => {
                assert_eq!(tier.name, "Yellow Belt");
                assert!((progress - 0.5).abs() < f64::EPSILON);
            }
            NextBelt::MaxLevel => panic!("score 25 is not max level"),
        }
    }
}
