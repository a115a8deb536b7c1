// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Snake Battle agent

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub strategy: StrategyConfig,
    pub debug: DebugConfig,
}

/// Game server connection settings
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectionConfig {
    /// Player URL as issued by the contest (http scheme)
    pub server_url: String,
    /// Literal prefix every inbound board frame starts with
    pub response_prefix: String,
}

/// Strategy tuning constants
#[derive(Debug, Deserialize, Clone)]
pub struct StrategyConfig {
    /// How many recently targeted points are kept for loop avoidance
    pub history_capacity: usize,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            connection: ConnectionConfig {
                server_url: "http://localhost:8080/codenjoy-contest/board/player/PLAYER_ID?code=PLAYER_CODE&gameName=snakebattle".to_string(),
                response_prefix: "board=".to_string(),
            },
            strategy: StrategyConfig {
                history_capacity: 7,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "snakebattle_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load Snake.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_can_be_created() {
        let config = Config::default_hardcoded();
        assert_eq!(config.strategy.history_capacity, 7);
        assert_eq!(config.connection.response_prefix, "board=");
        assert!(!config.debug.enabled);
    }

    #[test]
    fn test_snake_toml_can_be_parsed() {
        let result = Config::from_file("Snake.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Snake.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_all_config_values_match_hardcoded_defaults() {
        let file_config = Config::from_file("Snake.toml").expect("Snake.toml should be parseable");
        let hardcoded_config = Config::default_hardcoded();

        assert_eq!(
            file_config.connection.server_url,
            hardcoded_config.connection.server_url
        );
        assert_eq!(
            file_config.connection.response_prefix,
            hardcoded_config.connection.response_prefix
        );
        assert_eq!(
            file_config.strategy.history_capacity,
            hardcoded_config.strategy.history_capacity
        );
        assert_eq!(file_config.debug.enabled, hardcoded_config.debug.enabled);
        assert_eq!(
            file_config.debug.log_file_path,
            hardcoded_config.debug.log_file_path
        );
    }

    #[test]
    fn test_load_or_default_works() {
        let config = Config::load_or_default();
        assert_eq!(config.strategy.history_capacity, 7);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let result = Config::from_file("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[strategy]\nhistory_capacity = 3\n");
        assert!(result.is_err());
    }
}
