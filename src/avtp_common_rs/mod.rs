/// AVTP 共通ライブラリ
pub mod packet;
pub mod utils;
