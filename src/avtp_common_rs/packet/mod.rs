/// AVTP パケット処理
pub mod core;
pub mod debug;
pub mod types;
