//! Quiz configuration.
//!
//! All fields have defaults, so an empty JSON object (`{}`) is a valid
//! config file. Scoring weights and the option count are fixed game rules
//! and live in [`crate::quiz_engine::session`], not here.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::quiz_engine::error::{QuizError, Result};

/// Placeholder replaced by the country code in [`QuizConfig::flag_url_template`].
pub const CODE_PLACEHOLDER: &str = "{code}";

/// Runtime tunables for the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// How long feedback stays on screen before the next flag appears.
    pub advance_delay_ms: u64,
    /// Flag locator template; must contain `{code}`.
    pub flag_url_template: String,
    /// Key the best score is stored under.
    pub best_score_key: String,
    /// Question count suggested to the player when starting a game.
    pub default_question_count: usize,
    /// Fixed seed for reproducible games; entropy when `None`.
    pub rng_seed: Option<u64>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        QuizConfig {
            advance_delay_ms: 1500,
            flag_url_template: "https://flagcdn.com/w640/{code}.webp".to_string(),
            best_score_key: "flag_quiz.best_score".to_string(),
            default_question_count: 10,
            rng_seed: None,
        }
    }
}

impl QuizConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: QuizConfig =
            serde_json::from_str(json).map_err(|e| QuizError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| QuizError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.flag_url_template.contains(CODE_PLACEHOLDER) {
            return Err(QuizError::Config(format!(
                "flag_url_template must contain {CODE_PLACEHOLDER}"
            )));
        }
        if self.best_score_key.trim().is_empty() {
            return Err(QuizError::Config("best_score_key must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    /// Derive the flag locator for `code`.
    pub fn flag_url(&self, code: &str) -> String {
        self.flag_url_template.replace(CODE_PLACEHOLDER, code)
    }
}
