/// 設定とログ初期化
pub mod config_loader;
pub mod log_config;

pub use config_loader::{CodecConfig, ConfigLoader};
pub use log_config::{init_logging, LogConfig, LogLevel};
