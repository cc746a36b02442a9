pub mod loader;

pub use loader::{load_config, load_config_or_default, parse_config, ConfigFormat};

use crate::rules::RuleSet;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: f64 = 6.0;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub classification: ClassificationConfig,
    pub rules: RuleSet,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Scores at or above this are reported as likely phishing.
    pub threshold: f64,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}
