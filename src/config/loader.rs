use super::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// `.yaml` and `.yml` files are YAML, everything else is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ConfigFormat::Yaml
            }
            _ => ConfigFormat::Toml,
        }
    }
}

pub fn parse_config(content: &str, format: ConfigFormat) -> Result<Config> {
    let config: Config = match format {
        ConfigFormat::Toml => toml::from_str(content).context("Failed to parse TOML config")?,
        ConfigFormat::Yaml => {
            serde_yaml::from_str(content).context("Failed to parse YAML config")?
        }
    };

    config.rules.validate().context("Invalid rule table")?;

    let threshold = config.classification.threshold;
    if !threshold.is_finite() {
        anyhow::bail!("Invalid classification threshold: {}", threshold);
    }

    Ok(config)
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content, ConfigFormat::from_path(path))
        .with_context(|| format!("Failed to load config: {}", path.display()))
}

pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Config {
    match load_config(&path) {
        Ok(config) => {
            log::info!("Loaded configuration from: {}", path.as_ref().display());
            config
        }
        Err(e) => {
            log::warn!("Failed to load config ({:#}), using defaults", e);
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RiskLevel;

    const SHIPPED_CONFIG: &str = include_str!("../../config/phish-score.toml");

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = parse_config(SHIPPED_CONFIG, ConfigFormat::Toml).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("", ConfigFormat::Toml).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let content = r#"
[classification]
threshold = 4.5

[rules.link_volume]
max_links = 5
weight = 1.0
"#;
        let config = parse_config(content, ConfigFormat::Toml).unwrap();
        assert_eq!(config.classification.threshold, 4.5);
        assert_eq!(config.rules.link_volume.max_links, 5);
        // untouched sections keep their defaults
        assert_eq!(config.rules.keywords, Config::default().rules.keywords);
    }

    #[test]
    fn test_yaml_config() {
        let content = r#"
classification:
  threshold: 3.0
rules:
  keywords:
    - level: medium
      weight: 1.0
      keywords: ["gift card"]
  combinations: []
"#;
        let config = parse_config(content, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.classification.threshold, 3.0);
        assert_eq!(config.rules.keywords.len(), 1);
        assert_eq!(config.rules.keywords[0].level, RiskLevel::Medium);
        assert!(config.rules.combinations.is_empty());
        assert_eq!(config.rules.domain.max_length, 25);
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let content = r#"
[rules.domain]
digit_weight = -3.0
max_length = 25
long_weight = 2.0
"#;
        let err = parse_config(content, ConfigFormat::Toml).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid rule table"));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("rules.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("rules.YML")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("rules.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("rules")), ConfigFormat::Toml);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = load_config_or_default("/nonexistent/phish-score.toml");
        assert_eq!(config, Config::default());
        assert!(load_config("/nonexistent/phish-score.toml").is_err());
    }
}
