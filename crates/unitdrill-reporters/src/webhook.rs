//! HTTP webhook score reporter.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::instrument;

use unitdrill_core::traits::{ScoreReporter, ScoreSubmission};

use crate::error::ReporterError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Posts final scores as JSON to a configured URL.
pub struct WebhookReporter {
    url: String,
    token: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl WebhookReporter {
    pub fn new(url: &str, token: Option<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            url: url.trim().to_string(),
            token: token.filter(|t| !t.is_empty()),
            timeout_secs,
            client,
        })
    }
}

impl std::fmt::Debug for WebhookReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookReporter")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[async_trait]
impl ScoreReporter for WebhookReporter {
    fn name(&self) -> &str {
        "webhook"
    }

    fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }

    #[instrument(skip(self, submission), fields(score = submission.score))]
    async fn submit_score(&self, submission: &ScoreSubmission) -> anyhow::Result<()> {
        if !self.is_configured() {
            return Err(ReporterError::NotConfigured.into());
        }

        let mut req = self
            .client
            .post(&self.url)
            .header("content-type", "application/json");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let response = req.json(submission).send().await.map_err(|e| {
            if e.is_timeout() {
                ReporterError::Timeout(self.timeout_secs)
            } else {
                ReporterError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ReporterError::Rejected {
                status,
                message: body,
            }
            .into());
        }

        tracing::debug!(status, "webhook accepted score");
        Ok(())
    }
}
