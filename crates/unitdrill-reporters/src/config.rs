//! Drill configuration and reporter factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use unitdrill_core::session::DEFAULT_DURATION_SECS;
use unitdrill_core::traits::ScoreReporter;

use crate::webhook::{WebhookReporter, DEFAULT_TIMEOUT_SECS};

/// Player name used when none is configured.
pub const ANONYMOUS_PLAYER: &str = "Anonymous";

/// Configuration for the score reporter.
///
/// Note: Custom Debug impl masks tokens to prevent accidental exposure in logs.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReporterConfig {
    Webhook {
        url: String,
        #[serde(default)]
        token: Option<String>,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
    #[default]
    None,
}

impl std::fmt::Debug for ReporterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReporterConfig::Webhook {
                url,
                token,
                timeout_secs,
            } => f
                .debug_struct("Webhook")
                .field("url", url)
                .field("token", &token.as_ref().map(|_| "***"))
                .field("timeout_secs", timeout_secs)
                .finish(),
            ReporterConfig::None => f.write_str("None"),
        }
    }
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Top-level unitdrill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Player name attached to reports and submitted scores.
    #[serde(default)]
    pub player: Option<String>,
    /// Session length when `--duration` is not given.
    #[serde(default = "default_duration")]
    pub default_duration_secs: u32,
    /// Pause after each answer before the next question is shown.
    #[serde(default = "default_feedback_delay")]
    pub feedback_delay_ms: u64,
    /// Output directory for session reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Catalog file or directory to use instead of the built-in units.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    #[serde(default)]
    pub reporter: ReporterConfig,
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_SECS
}
fn default_feedback_delay() -> u64 {
    150
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./unitdrill-results")
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            player: None,
            default_duration_secs: default_duration(),
            feedback_delay_ms: default_feedback_delay(),
            output_dir: default_output_dir(),
            catalog: None,
            reporter: ReporterConfig::None,
        }
    }
}

impl DrillConfig {
    /// The configured player name, or "Anonymous".
    pub fn player_name(&self) -> &str {
        self.player
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(ANONYMOUS_PLAYER)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Substituted values are copied as-is and never scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_reporter_config(config: &ReporterConfig) -> ReporterConfig {
    match config {
        ReporterConfig::Webhook {
            url,
            token,
            timeout_secs,
        } => ReporterConfig::Webhook {
            url: resolve_env_vars(url),
            token: token.as_ref().map(|t| resolve_env_vars(t)),
            timeout_secs: *timeout_secs,
        },
        ReporterConfig::None => ReporterConfig::None,
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `unitdrill.toml` in the current directory
/// 2. `~/.config/unitdrill/config.toml`
///
/// Environment variable overrides: `UNITDRILL_SCORE_URL`, `UNITDRILL_SCORE_TOKEN`.
pub fn load_config_from(path: Option<&Path>) -> Result<DrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("unitdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => DrillConfig::default(),
    };

    Ok(apply_environment(
        config,
        std::env::var("UNITDRILL_SCORE_URL").ok(),
        std::env::var("UNITDRILL_SCORE_TOKEN").ok(),
    ))
}

/// `${VAR}` references are resolved in file values only; overrides are taken verbatim.
fn apply_environment(
    mut config: DrillConfig,
    url: Option<String>,
    token: Option<String>,
) -> DrillConfig {
    config.reporter = resolve_reporter_config(&config.reporter);
    apply_env_overrides(&mut config, url, token);
    config
}

/// Parse a config document.
pub fn parse_config(content: &str) -> Result<DrillConfig> {
    Ok(toml::from_str::<DrillConfig>(content)?)
}

/// A score URL switches the reporter to a webhook, keeping any configured token.
/// A token only applies when a webhook is configured.
fn apply_env_overrides(config: &mut DrillConfig, url: Option<String>, token: Option<String>) {
    if let Some(new_url) = url {
        match &mut config.reporter {
            ReporterConfig::Webhook { url, .. } => *url = new_url,
            ReporterConfig::None => {
                config.reporter = ReporterConfig::Webhook {
                    url: new_url,
                    token: None,
                    timeout_secs: DEFAULT_TIMEOUT_SECS,
                };
            }
        }
    }

    if let Some(new_token) = token {
        if let ReporterConfig::Webhook { token, .. } = &mut config.reporter {
            *token = Some(new_token);
        }
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("unitdrill"))
}

/// Create a reporter from its configuration. `None` means scores are not submitted.
pub fn create_reporter(config: &ReporterConfig) -> Result<Option<Arc<dyn ScoreReporter>>> {
    match config {
        ReporterConfig::Webhook {
            url,
            token,
            timeout_secs,
        } => {
            let reporter = WebhookReporter::new(url, token.clone(), *timeout_secs)?;
            Ok(Some(Arc::new(reporter)))
        }
        ReporterConfig::None => Ok(None),
    }
}
