//! Mock reporter for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use unitdrill_core::traits::{ScoreReporter, ScoreSubmission};

use crate::error::ReporterError;

/// A mock score reporter that records every submission it receives.
pub struct MockReporter {
    configured: bool,
    fail_with_status: Option<u16>,
    call_count: AtomicU32,
    submissions: Mutex<Vec<ScoreSubmission>>,
}

impl MockReporter {
    /// A configured reporter that accepts every submission.
    pub fn new() -> Self {
        Self {
            configured: true,
            fail_with_status: None,
            call_count: AtomicU32::new(0),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// A configured reporter that rejects every submission with `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::new()
        }
    }

    /// A reporter that reports itself as not configured.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Submissions accepted so far.
    pub fn submissions(&self) -> Vec<ScoreSubmission> {
        self.submissions
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

impl Default for MockReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScoreReporter for MockReporter {
    fn name(&self) -> &str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn submit_score(&self, submission: &ScoreSubmission) -> anyhow::Result<()> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        if let Some(status) = self.fail_with_status {
            return Err(ReporterError::Rejected {
                status,
                message: "mock failure".into(),
            }
            .into());
        }

        if let Ok(mut submissions) = self.submissions.lock() {
            submissions.push(submission.clone());
        }
        Ok(())
    }
}
