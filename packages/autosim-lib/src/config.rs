use serde::{Deserialize, Serialize};

use crate::logger::LogLevel;

/// Runtime configuration, read from an optional toml file. Every field has
/// a default, so a missing file and a partial file both work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Rewrite spaces in a nondeterministic input string to `ε` before
    /// validation, so a space consumes an explicit epsilon transition. This
    /// is the input convention of the simulator; turning it off makes a
    /// space an ordinary (and thus invalid) input symbol.
    pub whitespace_as_epsilon: bool,
    pub logger: LoggerConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            whitespace_as_epsilon: true,
            logger: LoggerConfig::default(),
        }
    }
}

impl SimulatorConfig {
    pub fn from_optional_file(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                Ok(toml::from_str(&content)?)
            }
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub enabled: bool,
    pub log_file: bool,
    pub log_level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            enabled: true,
            log_file: false,
            log_level: LogLevel::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config: SimulatorConfig = toml::from_str(
            r#"
            whitespace_as_epsilon = false

            [logger]
            log_level = "Warn"
            "#,
        )
        .unwrap();

        assert!(!config.whitespace_as_epsilon);
        assert!(config.logger.enabled);
        assert_eq!(config.logger.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_empty_config() {
        let config: SimulatorConfig = toml::from_str("").unwrap();

        assert!(config.whitespace_as_epsilon);
        assert!(!config.logger.log_file);
    }
}
