use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::avtp_common_rs::packet::core::exceptions::{AvtpResult, ConfigError};
use crate::avtp_common_rs::packet::core::validation::ValidationPolicy;
use crate::avtp_common_rs::utils::log_config::{LogConfig, LogLevel};

/// コーデック設定 (検証ポリシーとログ設定)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub validation: ValidationPolicy,
    pub logging: LogConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat { Json, Toml }

fn format_of(path: &Path) -> Result<ConfigFormat, ConfigError> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        _ => Err(ConfigError::Invalid(format!("未対応の設定ファイル形式: {}", path.display()))),
    }
}

/// 設定ファイルローダ
///
/// 候補パスを順に探し、最初に見つかったファイルを読み込む。
/// どれも無ければ既定値を使う。
pub struct ConfigLoader { config_paths: Vec<PathBuf> }

impl ConfigLoader {
    pub fn new() -> Self { Self { config_paths: vec![PathBuf::from("avtp.config.json"), PathBuf::from("avtp.config.toml")] } }
    pub fn with_paths(paths: Vec<PathBuf>) -> Self { Self { config_paths: paths } }

    pub fn load(&self) -> AvtpResult<CodecConfig> {
        for path in &self.config_paths {
            if path.exists() {
                let config = Self::load_from_file(path)?;
                debug!("config loaded from {}", path.display());
                return Ok(config);
            }
        }
        debug!("no config file found, using defaults");
        Ok(CodecConfig::default())
    }

    /// 拡張子 (json/toml) で形式を判定して読み込み、検証する
    pub fn load_from_file(path: &Path) -> AvtpResult<CodecConfig> {
        let format = format_of(path)?;
        let content = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config = match format {
            ConfigFormat::Json => Self::from_json_str(&content),
            ConfigFormat::Toml => Self::from_toml_str(&content),
        };
        if let Err(e) = &config {
            warn!("failed to load config from {}: {}", path.display(), e);
        }
        config
    }

    pub fn from_json_str(json: &str) -> AvtpResult<CodecConfig> {
        let config: CodecConfig = serde_json::from_str(json).map_err(|e| ConfigError::Parse(format!("JSON: {}", e)))?;
        Self::validate_config(&config)?;
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> AvtpResult<CodecConfig> {
        let config: CodecConfig = toml::from_str(text).map_err(|e| ConfigError::Parse(format!("TOML: {}", e)))?;
        Self::validate_config(&config)?;
        Ok(config)
    }

    pub fn validate_config(config: &CodecConfig) -> Result<(), ConfigError> {
        LogLevel::from_str(&config.logging.level)?;
        Ok(())
    }

    pub fn save_config(config: &CodecConfig, path: &Path) -> AvtpResult<()> {
        let content = match format_of(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| ConfigError::Parse(e.to_string()))?,
            ConfigFormat::Toml => toml::to_string_pretty(config).map_err(|e| ConfigError::Parse(e.to_string()))?,
        };
        fs::write(path, content).map_err(ConfigError::from)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avtp_common_rs::packet::core::exceptions::AvtpError;

    #[test]
    fn test_defaults_are_strict() {
        let config = ConfigLoader::from_json_str("{}").unwrap();
        assert_eq!(config.validation, ValidationPolicy::default());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_toml_partial() {
        let config = ConfigLoader::from_toml_str(
            r#"
            [validation]
            reject_nonzero_reserved = false

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert!(!config.validation.reject_nonzero_reserved);
        assert!(config.validation.require_stream_id_valid);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_level_rejected() {
        let err = ConfigLoader::from_json_str(r#"{"logging": {"level": "shout"}}"#).unwrap_err();
        assert!(matches!(err, AvtpError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_error() {
        let err = ConfigLoader::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, AvtpError::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let loader = ConfigLoader::with_paths(vec![PathBuf::from("/nonexistent/avtp.json")]);
        assert_eq!(loader.load().unwrap(), CodecConfig::default());
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(ConfigLoader::load_from_file(Path::new("avtp.yaml")).is_err());
    }
}
