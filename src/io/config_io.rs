use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::model::config::Config;

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Parse configuration text. Missing sections and fields take their defaults.
pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(text)?)
}

/// Read and parse a configuration file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = parse_config(&text)?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Like `load_config`, but a missing file yields the defaults.
pub fn load_config_or_default(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        info!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    load_config(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Axis;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_config() -> &'static str {
        r#"[activation]
delay_ms = 150
tolerance = 4.5

[keyboard]
cancel = ["Escape", "Backspace"]

[sorting]
item_axis = "horizontal"
"#
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.activation.delay_ms, 250);
        assert_eq!(config.activation.distance, 3.0);
        assert_eq!(config.activation.tolerance, 10.0);
        assert_eq!(config.keyboard.start, vec!["Space", "Enter"]);
        assert_eq!(config.keyboard.cancel, vec!["Escape"]);
        assert_eq!(config.keyboard.end, vec!["Space", "Enter"]);
        assert_eq!(config.sorting.item_axis, Axis::Vertical);
    }

    #[test]
    fn test_partial_overrides() {
        let config = parse_config(sample_config()).unwrap();
        assert_eq!(config.activation.delay_ms, 150);
        assert_eq!(config.activation.distance, 3.0);
        assert_eq!(config.activation.tolerance, 4.5);
        assert_eq!(config.keyboard.start, vec!["Space", "Enter"]);
        assert_eq!(config.keyboard.cancel, vec!["Escape", "Backspace"]);
        assert_eq!(config.sorting.item_axis, Axis::Horizontal);
    }

    #[test]
    fn test_bad_config() {
        let err = parse_config("[activation]\ndelay_ms = \"soon\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("corkboard.toml");
        fs::write(&path, sample_config()).unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.activation.delay_ms, 150);
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.toml");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains("absent.toml"));
        assert_eq!(load_config_or_default(&path).unwrap(), Config::default());
    }
}
