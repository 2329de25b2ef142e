use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use factbot_core::SessionConfig;
use factbot_rules::RuleSet;
use factbot_tools::WikipediaConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub retrieval: WikipediaConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct RulesConfig {
    #[serde(default)]
    pub rule_set: RuleSet,
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("factbot"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'factbot init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    /// Load the config file, or fall back to defaults when there is none.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            let config = Self::load_from(&config_path)?;
            info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            info!(
                "No config at {}, using defaults",
                config_path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");
        Self::write_default(&config_path)?;

        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Configuration options:");
        println!("   - retrieval.endpoint: MediaWiki API to query");
        println!("   - retrieval.timeout / retry_delays: request timeout and retry backoff (seconds)");
        println!("   - rules.rule_set: country_profile or country_leaders");
        println!("   - session.welcome / prompt / farewell: interactive texts");
        println!();
        println!("Run 'factbot chat' to start asking questions.");
        Ok(())
    }

    /// Write the default configuration to `path`, refusing to overwrite.
    pub fn write_default(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }
        let content = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("factbot-config-{}", std::process::id()));
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join(name);
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn empty_object_uses_defaults() {
        let Ok(config) = serde_json::from_str::<Config>("{}") else {
            panic!("empty config should parse");
        };
        assert_eq!(config, Config::default());
        assert_eq!(config.rules.rule_set, RuleSet::CountryProfile);
        assert_eq!(config.session.prompt, "Your query? ");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let json = r#"{
  "rules": { "rule_set": "country_leaders" },
  "retrieval": { "timeout": 30 }
}"#;
        let Ok(config) = serde_json::from_str::<Config>(json) else {
            panic!("partial config should parse");
        };
        assert_eq!(config.rules.rule_set, RuleSet::CountryLeaders);
        assert_eq!(config.retrieval.timeout, 30);
        assert_eq!(config.retrieval.retry_delays, vec![1, 2]);
        assert_eq!(config.session, SessionConfig::default());
    }

    #[test]
    fn unknown_rule_set_is_rejected() {
        let json = r#"{ "rules": { "rule_set": "capitals" } }"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn write_default_then_load_from() {
        let path = scratch_file("roundtrip.json");
        assert!(Config::write_default(&path).is_ok());

        let Ok(config) = Config::load_from(&path) else {
            panic!("written config should load");
        };
        assert_eq!(config, Config::default());

        assert!(Config::write_default(&path).is_err(), "must not overwrite");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_from_reports_invalid_json() {
        let path = scratch_file("broken.json");
        assert!(std::fs::write(&path, "{ not json").is_ok());

        let Err(error) = Config::load_from(&path) else {
            panic!("broken config should not load");
        };
        assert!(error.to_string().contains("Invalid config file"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_from_missing_file_fails() {
        let path = scratch_file("missing.json");
        assert!(Config::load_from(&path).is_err());
    }
}
