//! パケットコア機能
//! ビットフィールドコーデック、PDU ビュー、検証、エラー処理等のコア機能

pub mod defines;
pub mod exceptions;
pub mod field_codec;
pub mod format_base;
pub mod layout_spec;
pub mod validation;

// 便利な再エクスポート
pub use exceptions::{AvtpError, AvtpResult, ConfigError, FieldAccessError, MalformedPdu};
pub use field_codec::{descriptors_fit, get_field, read_field, set_field, write_field, Field, FieldDescriptor};
pub use format_base::{is_valid, validate, validate_with, Pdu, PduFormat};
pub use layout_spec::{DynamicLayout, FieldSpec, LayoutSpec};
pub use validation::ValidationPolicy;
