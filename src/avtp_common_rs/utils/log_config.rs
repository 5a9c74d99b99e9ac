use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::avtp_common_rs::packet::core::exceptions::{AvtpResult, ConfigError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel { Off=0, Error=1, Warn=2, Info=3, Debug=4, Trace=5 }
impl LogLevel {
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(ConfigError::Invalid(format!("不正なログレベル: {}", s))),
        }
    }
    pub fn as_str(&self) -> &'static str { match self { LogLevel::Off=>"OFF", LogLevel::Error=>"ERROR", LogLevel::Warn=>"WARN", LogLevel::Info=>"INFO", LogLevel::Debug=>"DEBUG", LogLevel::Trace=>"TRACE" } }
    pub fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// ログ設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    /// ターゲット (モジュールパス) 付きで出力するか
    pub show_target: bool,
}
impl Default for LogConfig { fn default() -> Self { Self { level: "warn".into(), show_target: true } } }

impl LogConfig {
    pub fn level(&self) -> Result<LogLevel, ConfigError> { LogLevel::from_str(&self.level) }
}

/// env_logger を設定に従って初期化する
///
/// 既にロガーが登録済みの場合は何もしない。
pub fn init_logging(config: &LogConfig) -> AvtpResult<()> {
    let level = config.level()?;
    let result = env_logger::Builder::new()
        .filter_level(level.to_filter())
        .format_target(config.show_target)
        .try_init();
    if result.is_err() {
        log::debug!("logger already initialised, keeping existing one");
    }
    Ok(())
}
