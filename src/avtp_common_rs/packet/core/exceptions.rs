/// AVTP ヘッダ処理用エラー型定義
/// フィールドアクセス、PDU 検証、設定読み込みの各エラーを扱う

use std::error::Error;
use std::fmt;

/// フィールドアクセスエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAccessError {
    /// フィールド番号がテーブル範囲外
    UnknownField { index: usize, count: usize },
    /// バッファが短すぎる
    BufferTooShort { required: usize, actual: usize },
    /// ディスクリプタ自体が不正
    InvalidDescriptor { quadlet: u8, offset: u8, bits: u8 },
    /// 値がフィールド幅に収まらない
    ValueOutOfRange { field: &'static str, value: u64, bits: u8 },
    /// バッファが渡されなかった
    InvalidArgument(&'static str),
}

impl fmt::Display for FieldAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldAccessError::UnknownField { index, count } => {
                write!(f, "不明なフィールド番号: {} (フィールド数: {})", index, count)
            }
            FieldAccessError::BufferTooShort { required, actual } => {
                write!(f, "バッファが不足しています: 必要 {}バイト, 実際 {}バイト", required, actual)
            }
            FieldAccessError::InvalidDescriptor { quadlet, offset, bits } => {
                write!(
                    f,
                    "不正なフィールド定義: quadlet={}, offset={}, bits={}",
                    quadlet, offset, bits
                )
            }
            FieldAccessError::ValueOutOfRange { field, value, bits } => {
                write!(f, "フィールド '{}' の値が範囲外: {} ({}ビット)", field, value, bits)
            }
            FieldAccessError::InvalidArgument(what) => {
                write!(f, "不正な引数: {}", what)
            }
        }
    }
}

impl Error for FieldAccessError {}

/// PDU 検証エラー
///
/// 最初に違反したルールのみを報告する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedPdu {
    /// ヘッダ長に満たないバッファ
    BufferTooShort { required: usize, actual: usize },
    /// 長さフィールドが実バッファを超える
    LengthExceedsBuffer { claimed: usize, actual: usize },
    /// 長さフィールドがヘッダ長より小さい
    LengthBelowHeader { claimed: usize, header: usize },
    /// 固定値フィールドの値が違う
    UnexpectedValue { field: &'static str, expected: u64, actual: u64 },
    /// 列挙値が定義範囲外
    ValueOutOfRange { field: &'static str, value: u64 },
    /// 予約ビットが 0 ではない
    ReservedNotZero { field: &'static str, value: u64 },
    /// 同時に立ててはいけないフラグの組み合わせ
    ConflictingFlags { flag: &'static str, with: &'static str },
}

impl fmt::Display for MalformedPdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedPdu::BufferTooShort { required, actual } => {
                write!(f, "ヘッダ長に満たないバッファ: 必要 {}バイト, 実際 {}バイト", required, actual)
            }
            MalformedPdu::LengthExceedsBuffer { claimed, actual } => {
                write!(f, "長さフィールドがバッファを超えています: 申告 {}バイト, 実際 {}バイト", claimed, actual)
            }
            MalformedPdu::LengthBelowHeader { claimed, header } => {
                write!(f, "長さフィールドがヘッダ長未満です: 申告 {}バイト, ヘッダ {}バイト", claimed, header)
            }
            MalformedPdu::UnexpectedValue { field, expected, actual } => {
                write!(f, "フィールド '{}' の値が不正: 期待 {:#x}, 実際 {:#x}", field, expected, actual)
            }
            MalformedPdu::ValueOutOfRange { field, value } => {
                write!(f, "フィールド '{}' の値が定義範囲外: {:#x}", field, value)
            }
            MalformedPdu::ReservedNotZero { field, value } => {
                write!(f, "予約フィールド '{}' が 0 ではありません: {:#x}", field, value)
            }
            MalformedPdu::ConflictingFlags { flag, with } => {
                write!(f, "フラグ '{}' は '{}' と両立しません", flag, with)
            }
        }
    }
}

impl Error for MalformedPdu {}

/// 設定読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// JSON/TOML の解析失敗
    Parse(String),
    /// 値の制約違反
    Invalid(String),
    /// ファイル読み書き失敗
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "設定の解析に失敗しました: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "設定値が不正です: {}", msg),
            ConfigError::Io(msg) => write!(f, "設定ファイルの入出力に失敗しました: {}", msg),
        }
    }
}

impl Error for ConfigError {}

/// AVTP コーデックの統合エラー型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvtpError {
    /// フィールドアクセスエラー
    Field(FieldAccessError),
    /// PDU 検証エラー
    Malformed(MalformedPdu),
    /// 設定エラー
    Config(ConfigError),
}

impl fmt::Display for AvtpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvtpError::Field(err) => write!(f, "フィールドエラー: {}", err),
            AvtpError::Malformed(err) => write!(f, "PDU 検証エラー: {}", err),
            AvtpError::Config(err) => write!(f, "設定エラー: {}", err),
        }
    }
}

impl Error for AvtpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AvtpError::Field(err) => Some(err),
            AvtpError::Malformed(err) => Some(err),
            AvtpError::Config(err) => Some(err),
        }
    }
}

// From実装で自動変換をサポート
impl From<FieldAccessError> for AvtpError {
    fn from(err: FieldAccessError) -> Self {
        AvtpError::Field(err)
    }
}

impl From<MalformedPdu> for AvtpError {
    fn from(err: MalformedPdu) -> Self {
        AvtpError::Malformed(err)
    }
}

impl From<ConfigError> for AvtpError {
    fn from(err: ConfigError) -> Self {
        AvtpError::Config(err)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

/// Result型のエイリアス
pub type AvtpResult<T> = Result<T, AvtpError>;

/// エラーヘルパー関数
impl FieldAccessError {
    /// バッファ不足エラーを作成
    pub fn buffer_too_short(required: usize, actual: usize) -> Self {
        FieldAccessError::BufferTooShort { required, actual }
    }

    /// 範囲外フィールド番号エラーを作成
    pub fn unknown_field(index: usize, count: usize) -> Self {
        FieldAccessError::UnknownField { index, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_access_error_display() {
        let err = FieldAccessError::buffer_too_short(24, 16);
        assert_eq!(
            format!("{}", err),
            "バッファが不足しています: 必要 24バイト, 実際 16バイト"
        );

        let err = FieldAccessError::unknown_field(20, 20);
        assert_eq!(format!("{}", err), "不明なフィールド番号: 20 (フィールド数: 20)");
    }

    #[test]
    fn test_malformed_display() {
        let err = MalformedPdu::UnexpectedValue { field: "Subtype", expected: 0x03, actual: 0x02 };
        assert_eq!(
            format!("{}", err),
            "フィールド 'Subtype' の値が不正: 期待 0x3, 実際 0x2"
        );
    }

    #[test]
    fn test_avtp_error_conversion() {
        let field_err = FieldAccessError::unknown_field(99, 3);
        let err: AvtpError = field_err.clone().into();

        match err {
            AvtpError::Field(inner) => assert_eq!(inner, field_err),
            _ => panic!("Conversion failed"),
        }
    }

    #[test]
    fn test_error_chain() {
        let err = AvtpError::from(MalformedPdu::BufferTooShort { required: 20, actual: 19 });
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_error_becomes_config_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AvtpError = ConfigError::from(io).into();
        assert!(matches!(err, AvtpError::Config(ConfigError::Io(_))));
    }
}
