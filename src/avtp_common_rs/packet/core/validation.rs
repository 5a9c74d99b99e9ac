/// PDU 検証の共通部品
/// 各フォーマットの `PduFormat::check` から使う

use serde::{Deserialize, Serialize};

use super::exceptions::MalformedPdu;

/// 検証ポリシー
///
/// サイズと長さフィールドの検査は常に行い、ここでは切り替えられない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// 予約フィールドが 0 以外なら拒否する
    pub reject_nonzero_reserved: bool,
    /// ストリーム系フォーマットで sv=0 を拒否する
    pub require_stream_id_valid: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self { reject_nonzero_reserved: true, require_stream_id_valid: true }
    }
}

impl ValidationPolicy {
    /// 予約ビットとストリーム ID 有効フラグを無視する緩いポリシー
    pub const fn lenient() -> Self {
        Self { reject_nonzero_reserved: false, require_stream_id_valid: false }
    }
}

/// バッファがヘッダ長以上あるか
pub fn check_header_len(required: usize, actual: usize) -> Result<(), MalformedPdu> {
    if actual < required {
        return Err(MalformedPdu::BufferTooShort { required, actual });
    }
    Ok(())
}

/// 長さフィールドが申告する総バイト数がヘッダ長以上、実バッファ以下か
pub fn check_length_claim(claimed: usize, header: usize, actual: usize) -> Result<(), MalformedPdu> {
    if claimed > actual {
        return Err(MalformedPdu::LengthExceedsBuffer { claimed, actual });
    }
    if claimed < header {
        return Err(MalformedPdu::LengthBelowHeader { claimed, header });
    }
    Ok(())
}

pub fn expect_value(field: &'static str, expected: u64, actual: u64) -> Result<(), MalformedPdu> {
    if expected != actual {
        return Err(MalformedPdu::UnexpectedValue { field, expected, actual });
    }
    Ok(())
}

/// 予約フィールドの検査 (ポリシーで無効化可能)
pub fn expect_reserved_zero(
    policy: &ValidationPolicy,
    fields: &[(&'static str, u64)],
) -> Result<(), MalformedPdu> {
    if !policy.reject_nonzero_reserved {
        return Ok(());
    }
    match fields.iter().find(|(_, value)| *value != 0) {
        Some(&(field, value)) => Err(MalformedPdu::ReservedNotZero { field, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_len() {
        assert!(check_header_len(20, 20).is_ok());
        assert_eq!(
            check_header_len(20, 19),
            Err(MalformedPdu::BufferTooShort { required: 20, actual: 19 })
        );
    }

    #[test]
    fn test_length_claim() {
        assert!(check_length_claim(20, 20, 20).is_ok());
        assert!(check_length_claim(24, 20, 32).is_ok());
        assert_eq!(
            check_length_claim(36, 20, 32),
            Err(MalformedPdu::LengthExceedsBuffer { claimed: 36, actual: 32 })
        );
        assert_eq!(
            check_length_claim(16, 20, 32),
            Err(MalformedPdu::LengthBelowHeader { claimed: 16, header: 20 })
        );
    }

    #[test]
    fn test_reserved_policy() {
        let fields = [("Reserved", 0), ("Reserved2", 3)];
        assert_eq!(
            expect_reserved_zero(&ValidationPolicy::default(), &fields),
            Err(MalformedPdu::ReservedNotZero { field: "Reserved2", value: 3 })
        );
        assert!(expect_reserved_zero(&ValidationPolicy::lenient(), &fields).is_ok());
    }

    #[test]
    fn test_policy_deserialize_defaults() {
        let policy: ValidationPolicy = serde_json::from_str(r#"{"require_stream_id_valid": false}"#).unwrap();
        assert!(policy.reject_nonzero_reserved);
        assert!(!policy.require_stream_id_valid);
    }
}
