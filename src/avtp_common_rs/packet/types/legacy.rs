/// 旧 API 互換の CVF アクセサ (非推奨)
/// フィールドを生の番号で指定し、バッファ未指定もエラーとして返す

use log::warn;

use crate::avtp_common_rs::packet::core::exceptions::{AvtpResult, FieldAccessError};
use crate::avtp_common_rs::packet::types::cvf::{CvfField, CvfPdu};

fn resolve(field: u8) -> AvtpResult<CvfField> {
    CvfField::try_from(field).map_err(|err| {
        warn!("legacy CVF access with unknown field id {}", field);
        err.into()
    })
}

/// 生のフィールド番号で CVF フィールドを読み出す
#[deprecated(note = "use CvfPdu::get")]
pub fn cvf_pdu_get(pdu: Option<&[u8]>, field: u8) -> AvtpResult<u64> {
    let buffer = pdu.ok_or(FieldAccessError::InvalidArgument("pdu"))?;
    let field = resolve(field)?;
    Ok(CvfPdu::new_checked(buffer)?.get(field))
}

/// 生のフィールド番号で CVF フィールドを書き込む
#[deprecated(note = "use CvfPdu::set")]
pub fn cvf_pdu_set(pdu: Option<&mut [u8]>, field: u8, value: u64) -> AvtpResult<()> {
    let buffer = pdu.ok_or(FieldAccessError::InvalidArgument("pdu"))?;
    let field = resolve(field)?;
    CvfPdu::new_checked(buffer)?.set(field, value);
    Ok(())
}

/// CVF ヘッダを初期化し、フォーマットサブタイプを設定する
#[deprecated(note = "use CvfPdu::init")]
pub fn cvf_pdu_init(pdu: Option<&mut [u8]>, format_subtype: u8) -> AvtpResult<()> {
    let buffer = pdu.ok_or(FieldAccessError::InvalidArgument("pdu"))?;
    CvfPdu::init(buffer)?.set_format_subtype(format_subtype);
    Ok(())
}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use super::*;
    use crate::avtp_common_rs::packet::core::defines::{AVTP_CVF_FORMAT_SUBTYPE_H264, AVTP_SUBTYPE_CVF};
    use crate::avtp_common_rs::packet::core::exceptions::AvtpError;

    #[test]
    fn test_init_get_set() {
        let mut buf = [0u8; 24];
        cvf_pdu_init(Some(&mut buf[..]), AVTP_CVF_FORMAT_SUBTYPE_H264).unwrap();
        assert_eq!(cvf_pdu_get(Some(&buf[..]), CvfField::Subtype as u8).unwrap(), AVTP_SUBTYPE_CVF as u64);
        assert_eq!(
            cvf_pdu_get(Some(&buf[..]), CvfField::FormatSubtype as u8).unwrap(),
            AVTP_CVF_FORMAT_SUBTYPE_H264 as u64
        );

        cvf_pdu_set(Some(&mut buf[..]), CvfField::SequenceNum as u8, 42).unwrap();
        assert_eq!(buf[2], 42);
    }

    #[test]
    fn test_absent_buffer() {
        assert_eq!(
            cvf_pdu_get(None, 0),
            Err(AvtpError::Field(FieldAccessError::InvalidArgument("pdu")))
        );
        assert!(cvf_pdu_set(None, 0, 1).is_err());
        assert!(cvf_pdu_init(None, 0).is_err());
    }

    #[test]
    fn test_field_out_of_range() {
        let mut buf = [0u8; 24];
        assert_eq!(
            cvf_pdu_get(Some(&buf[..]), 20),
            Err(AvtpError::Field(FieldAccessError::UnknownField { index: 20, count: 20 }))
        );
        assert!(cvf_pdu_set(Some(&mut buf[..]), 200, 1).is_err());
        assert_eq!(buf, [0u8; 24]);
    }

    #[test]
    fn test_short_buffer() {
        let buf = [0u8; 16];
        assert_eq!(
            cvf_pdu_get(Some(&buf[..]), 0),
            Err(AvtpError::Field(FieldAccessError::BufferTooShort { required: 24, actual: 16 }))
        );
    }
}
