//! Harness configuration
//!
//! Loaded from TOML, then overridden from `VRTK_*` environment variables.
//! Every key is optional; a missing file yields the defaults.

use crate::error::{HarnessError, Result};
use crate::markup::MarkupMode;
use crate::reporter::{ReporterStyle, DEFAULT_SEPARATOR_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration shared by the harness binary and embedding hosts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Rich-text tags or bare text
    pub markup: MarkupMode,
    /// Width of the tear-down separator
    pub separator_width: usize,
    /// Simulated frame period in milliseconds
    pub frame_interval_ms: u64,
    /// Frames driven before pending activations are joined
    pub frames: u64,
    /// `tracing-subscriber` env filter directive
    pub log_filter: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            markup: MarkupMode::RichText,
            separator_width: DEFAULT_SEPARATOR_WIDTH,
            frame_interval_ms: 16,
            frames: 2,
            log_filter: "info".to_string(),
        }
    }
}

impl HarnessConfig {
    /// Parse from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| HarnessError::config(format!("Invalid TOML: {e}")))
    }

    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            HarnessError::Config(msg) => {
                HarnessError::config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Serialise as pretty TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| HarnessError::config(format!("Failed to serialize config: {e}")))
    }

    /// Apply `VRTK_*` environment overrides
    pub fn merge_with_env(&mut self) -> Result<()> {
        self.merge_with_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn merge_with_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(markup) = lookup("VRTK_MARKUP") {
            self.markup = markup
                .parse()
                .map_err(|e| HarnessError::config(format!("VRTK_MARKUP: {e}")))?;
        }
        if let Some(width) = lookup("VRTK_SEPARATOR_WIDTH") {
            self.separator_width = width
                .parse()
                .map_err(|_| HarnessError::config("Invalid width in VRTK_SEPARATOR_WIDTH"))?;
        }
        if let Some(interval) = lookup("VRTK_FRAME_INTERVAL_MS") {
            self.frame_interval_ms = interval
                .parse()
                .map_err(|_| HarnessError::config("Invalid interval in VRTK_FRAME_INTERVAL_MS"))?;
        }
        if let Some(frames) = lookup("VRTK_FRAMES") {
            self.frames = frames
                .parse()
                .map_err(|_| HarnessError::config("Invalid frame count in VRTK_FRAMES"))?;
        }
        if let Some(filter) = lookup("VRTK_LOG_FILTER") {
            self.log_filter = filter;
        }
        Ok(())
    }

    /// Reject values the harness cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.separator_width == 0 {
            return Err(HarnessError::config("separator_width cannot be 0"));
        }
        if self.frames == 0 {
            return Err(HarnessError::config("frames cannot be 0"));
        }
        if self.log_filter.trim().is_empty() {
            return Err(HarnessError::config("log_filter cannot be empty"));
        }
        Ok(())
    }

    /// Simulated frame period
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Reporter presentation derived from this config
    pub fn reporter_style(&self) -> ReporterStyle {
        ReporterStyle {
            markup: self.markup,
            separator_width: self.separator_width,
        }
    }
}
