/// PDU デバッグ出力
pub mod debug_logger;

pub use debug_logger::{acf_type_name, subtype_name, PduDebugLogger};
