#![forbid(unsafe_code)]

//! Deck configuration.
//!
//! Loaded from TOML at startup. Every field has a default, so an empty file
//! (or no file) yields the stock behavior.
//!
//! ```toml
//! # mlshare.toml
//! [scroll]
//! behavior = "smooth"
//! smooth_duration_ms = 320
//! line_step = 3
//!
//! [nav]
//! focus_on_start = false
//!
//! [terminal]
//! mouse = true
//! frame_ms = 16
//! ```

use std::path::Path;
use std::time::Duration;

use mlshare_runtime::program::ProgramConfig;
use mlshare_runtime::viewport::ScrollBehavior;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest smooth scroll accepted.
pub const MAX_SMOOTH_DURATION_MS: u64 = 5_000;

/// Top-level deck configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub scroll: ScrollConfig,
    pub nav: NavConfig,
    pub terminal: TerminalConfig,
}

/// Scroll behavior as written in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollMode {
    #[default]
    Smooth,
    Instant,
}

impl From<ScrollMode> for ScrollBehavior {
    fn from(mode: ScrollMode) -> Self {
        match mode {
            ScrollMode::Smooth => ScrollBehavior::Smooth,
            ScrollMode::Instant => ScrollBehavior::Instant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Behavior of navigation scrolls. Default: smooth.
    pub behavior: ScrollMode,
    /// Smooth scroll duration. Default: 320.
    pub smooth_duration_ms: u64,
    /// Rows per wheel notch or arrow key. Default: 3.
    pub line_step: u16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            behavior: ScrollMode::Smooth,
            smooth_duration_ms: 320,
            line_step: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Start with keyboard focus on the first nav entry.
    pub focus_on_start: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Capture mouse clicks and wheel. Default: true.
    pub mouse: bool,
    /// Frame interval driving animations. Default: 16.
    pub frame_ms: u64,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            mouse: true,
            frame_ms: 16,
        }
    }
}

/// Errors from loading a [`DeckConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl DeckConfig {
    /// Parse from a TOML string. Does not validate.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        config.validated()
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.scroll.smooth_duration_ms == 0 {
            errors.push("scroll.smooth_duration_ms must be > 0".into());
        }
        if self.scroll.smooth_duration_ms > MAX_SMOOTH_DURATION_MS {
            errors.push(format!(
                "scroll.smooth_duration_ms must be <= {MAX_SMOOTH_DURATION_MS}, got {}",
                self.scroll.smooth_duration_ms
            ));
        }
        if self.scroll.line_step == 0 {
            errors.push("scroll.line_step must be > 0".into());
        }
        if self.terminal.frame_ms == 0 {
            errors.push("terminal.frame_ms must be > 0".into());
        }
        errors
    }

    /// `self` if valid, the collected errors otherwise.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    #[must_use]
    pub fn scroll_behavior(&self) -> ScrollBehavior {
        self.scroll.behavior.into()
    }

    #[must_use]
    pub fn smooth_duration(&self) -> Duration {
        Duration::from_millis(self.scroll.smooth_duration_ms)
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.terminal.frame_ms)
    }

    /// Runtime settings derived from this config.
    #[must_use]
    pub fn program_config(&self) -> ProgramConfig {
        ProgramConfig::default().with_line_step(self.scroll.line_step)
    }
}
