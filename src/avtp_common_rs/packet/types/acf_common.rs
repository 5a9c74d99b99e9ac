/// ACF メッセージ共通ヘッダ (IEEE 1722-2016 9.4.1)
/// 全 ACF メッセージ先頭の acf_msg_type / acf_msg_length

use crate::avtp_common_rs::packet::core::defines::QUADLET_SIZE;
use crate::avtp_common_rs::packet::core::exceptions::MalformedPdu;
use crate::avtp_common_rs::packet::core::field_codec::{descriptors_fit, Field};
use crate::avtp_common_rs::packet::core::format_base::{Pdu, PduFormat};
use crate::avtp_common_rs::packet::core::validation::{check_length_claim, ValidationPolicy};

crate::avtp_fields! {
    pub enum AcfCommonField {
        AcfMsgType = (0, 0, 7),
        AcfMsgLength = (0, 7, 9),
    }
}

pub struct AcfCommon;

pub type AcfCommonPdu<B> = Pdu<B, AcfCommon>;

impl PduFormat for AcfCommon {
    type Field = AcfCommonField;
    const NAME: &'static str = "ACF common";
    const HEADER_LEN: usize = QUADLET_SIZE;

    fn stamp<B: AsRef<[u8]> + AsMut<[u8]>>(pdu: &mut Pdu<B, Self>) {
        pdu.set_acf_msg_length(1);
    }

    fn check<B: AsRef<[u8]>>(pdu: &Pdu<B, Self>, _policy: &ValidationPolicy) -> Result<(), MalformedPdu> {
        check_length_claim(pdu.acf_msg_length_bytes(), Self::HEADER_LEN, pdu.buffer_len())
    }
}

const _: () = assert!(descriptors_fit(<AcfCommonField as Field>::DESCRIPTORS, AcfCommon::HEADER_LEN));

impl<B: AsRef<[u8]>> Pdu<B, AcfCommon> {
    pub fn acf_msg_type(&self) -> u8 {
        self.get(AcfCommonField::AcfMsgType) as u8
    }

    /// メッセージ長 (クアドレット単位、ヘッダ込み)
    pub fn acf_msg_length(&self) -> u16 {
        self.get(AcfCommonField::AcfMsgLength) as u16
    }

    pub fn acf_msg_length_bytes(&self) -> usize {
        self.acf_msg_length() as usize * QUADLET_SIZE
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Pdu<B, AcfCommon> {
    pub fn set_acf_msg_type(&mut self, value: u8) {
        self.set(AcfCommonField::AcfMsgType, value as u64);
    }

    pub fn set_acf_msg_length(&mut self, value: u16) {
        self.set(AcfCommonField::AcfMsgLength, value as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avtp_common_rs::packet::core::defines::AVTP_ACF_TYPE_CAN;
    use crate::avtp_common_rs::packet::core::format_base::{is_valid, validate};

    #[test]
    fn test_type_and_length_share_first_sixteen_bits() {
        let mut buf = [0u8; 8];
        let mut pdu = AcfCommonPdu::init(&mut buf[..]).unwrap();
        pdu.set_acf_msg_type(AVTP_ACF_TYPE_CAN);
        pdu.set_acf_msg_length(2);
        assert_eq!(&buf[..4], &[0x02, 0x02, 0x00, 0x00]);
    }

    #[test]
    fn test_length_claim() {
        let mut buf = [0u8; 8];
        let mut pdu = AcfCommonPdu::init(&mut buf[..]).unwrap();
        assert!(pdu.is_valid());
        pdu.set_acf_msg_length(3);
        assert_eq!(
            pdu.validate(),
            Err(MalformedPdu::LengthExceedsBuffer { claimed: 12, actual: 8 })
        );
        pdu.set_acf_msg_length(0);
        assert_eq!(pdu.validate(), Err(MalformedPdu::LengthBelowHeader { claimed: 0, header: 4 }));
    }

    #[test]
    fn test_header_boundary() {
        let mut buf = [0u8; 4];
        AcfCommonPdu::init(&mut buf[..]).unwrap();
        assert!(is_valid::<AcfCommon>(&buf));
        assert!(!is_valid::<AcfCommon>(&buf[..3]));
        assert_eq!(
            validate::<AcfCommon>(&buf[..3]),
            Err(MalformedPdu::BufferTooShort { required: 4, actual: 3 })
        );
    }
}
