//! Collaborator traits.
//!
//! The score reporter is implemented by the `unitdrill-reporters` crate.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::session::SessionSummary;

// ---------------------------------------------------------------------------
// Score reporter trait
// ---------------------------------------------------------------------------

/// Trait for external services that collect final scores.
#[async_trait]
pub trait ScoreReporter: Send + Sync {
    /// Human-readable reporter name (e.g. "webhook").
    fn name(&self) -> &str;

    /// Whether the reporter has enough configuration to submit anything.
    fn is_configured(&self) -> bool;

    /// Submit a final score.
    async fn submit_score(&self, submission: &ScoreSubmission) -> anyhow::Result<()>;
}

/// A final score sent to a [`ScoreReporter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    /// Player name.
    pub name: String,
    pub score: i64,
    pub metadata: ScoreMetadata,
}

/// Context sent along with a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreMetadata {
    /// Game mode; always "practice" for timed sessions.
    pub mode: String,
    pub duration_secs: u32,
    pub answered: usize,
    pub correct: usize,
}

/// Game mode reported for timed practice sessions.
pub const PRACTICE_MODE: &str = "practice";

impl ScoreSubmission {
    /// Build a practice-mode submission from a session summary.
    pub fn from_summary(name: impl Into<String>, summary: &SessionSummary) -> Self {
        Self {
            name: name.into(),
            score: summary.final_score,
            metadata: ScoreMetadata {
                mode: PRACTICE_MODE.to_string(),
                duration_secs: summary.duration_secs,
                answered: summary.solved.len(),
                correct: summary.correct_count(),
            },
        }
    }
}

/// Submit a score without blocking the caller.
///
/// Failures are logged and swallowed. Returns `None` when the reporter is
/// not configured; otherwise a handle the caller may await before exit.
pub fn submit_in_background(
    reporter: Arc<dyn ScoreReporter>,
    submission: ScoreSubmission,
) -> Option<JoinHandle<()>> {
    if !reporter.is_configured() {
        tracing::debug!(reporter = reporter.name(), "reporter not configured, skipping");
        return None;
    }

    Some(tokio::spawn(async move {
        match reporter.submit_score(&submission).await {
            Ok(()) => tracing::info!(
                reporter = reporter.name(),
                score = submission.score,
                "score submitted"
            ),
            Err(e) => tracing::warn!(reporter = reporter.name(), "score submission failed: {e:#}"),
        }
    }))
}
