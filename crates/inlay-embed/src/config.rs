//! Embed configuration.
//!
//! The configuration surface is what a UI binding layer would expose as
//! component properties: the markup and the mode, plus the knobs of the
//! font-face block and the scheduler.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::ConfigError;
use crate::fonts::DEFAULT_FONT_BLOCK_ID;
use crate::scripts::SchedulerOptions;

/// Where and how markup is rendered.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RenderMode {
    /// Insert into the regular document tree and execute embedded scripts.
    #[default]
    Direct,
    /// Insert into an isolation root, never executing scripts and hoisting
    /// `@font-face` rules to the page head.
    Isolated,
}

/// Properties of one embedded-HTML instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// The markup to render. Trusted: it is not sanitized.
    pub markup: String,
    /// Rendering mode.
    #[serde(default)]
    pub mode: RenderMode,
    /// Id of the shared `<style>` element that collects hoisted font faces.
    #[serde(default = "default_font_block_id")]
    pub font_block_id: String,
    /// Whether module scripts without `async` wait for the deferred phase.
    #[serde(default = "default_true")]
    pub modules_defer_by_default: bool,
}

fn default_font_block_id() -> String {
    DEFAULT_FONT_BLOCK_ID.to_string()
}

const fn default_true() -> bool {
    true
}

impl EmbedConfig {
    /// Configuration for `markup` with every other field at its default.
    #[must_use]
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            mode: RenderMode::default(),
            font_block_id: default_font_block_id(),
            modules_defer_by_default: true,
        }
    }

    /// Same configuration with a different mode.
    #[must_use]
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Parse a configuration from JSON, e.g.
    /// `{"markup": "<p>hi</p>", "mode": "isolated"}`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the JSON is malformed or lacks
    /// `markup`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The scheduler options this configuration selects.
    #[must_use]
    pub const fn scheduler_options(&self) -> SchedulerOptions {
        SchedulerOptions {
            modules_defer_by_default: self.modules_defer_by_default,
        }
    }
}
