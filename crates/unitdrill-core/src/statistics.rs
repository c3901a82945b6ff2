//! Accuracy and pace statistics for a finished session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::session::SessionSummary;

/// Statistics for one unit group within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub group: String,
    pub answered: usize,
    pub correct: usize,
    /// Fraction answered correctly (0.0–1.0).
    pub accuracy: f64,
}

/// Aggregate statistics across a whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// Fraction answered correctly (0.0 when nothing was answered).
    pub accuracy: f64,
    /// Answers per minute of play time.
    pub answers_per_minute: f64,
    /// Per-group breakdown ordered by group name.
    pub per_group: Vec<GroupStats>,
}

fn accuracy(correct: usize, answered: usize) -> f64 {
    if answered == 0 {
        0.0
    } else {
        correct as f64 / answered as f64
    }
}

/// Compute statistics from a session summary.
pub fn compute_session_stats(summary: &SessionSummary) -> SessionStats {
    let answered = summary.solved.len();
    let correct = summary.correct_count();

    let mut grouped: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for p in &summary.solved {
        let entry = grouped.entry(p.group.as_str()).or_default();
        entry.0 += 1;
        if p.is_correct {
            entry.1 += 1;
        }
    }

    let per_group = grouped
        .into_iter()
        .map(|(group, (answered, correct))| GroupStats {
            group: group.to_string(),
            answered,
            correct,
            accuracy: accuracy(correct, answered),
        })
        .collect();

    let answers_per_minute = if summary.elapsed_secs == 0 {
        0.0
    } else {
        answered as f64 * 60.0 / f64::from(summary.elapsed_secs)
    };

    SessionStats {
        answered,
        correct,
        incorrect: answered - correct,
        accuracy: accuracy(correct, answered),
        answers_per_minute,
        per_group,
    }
}
