/// ACF MOST メッセージ (IEEE 1722-2016 9.4.6)
/// 5 クアドレットの固定ヘッダ。先頭 16 ビットは ACF 共通ヘッダと同じ

use crate::avtp_common_rs::packet::core::defines::{AVTP_ACF_TYPE_MOST, QUADLET_SIZE};
use crate::avtp_common_rs::packet::core::exceptions::MalformedPdu;
use crate::avtp_common_rs::packet::core::field_codec::{descriptors_fit, Field};
use crate::avtp_common_rs::packet::core::format_base::{Pdu, PduFormat};
use crate::avtp_common_rs::packet::core::validation::{
    check_length_claim, expect_reserved_zero, expect_value, ValidationPolicy,
};

crate::avtp_fields! {
    /// ACF MOST ヘッダのフィールド
    pub enum MostField {
        AcfMsgType = (0, 0, 7),
        AcfMsgLength = (0, 7, 9),
        Pad = (0, 16, 2),
        Mtv = (0, 18, 1),
        MostNetId = (0, 19, 5),
        Reserved = (0, 24, 8),
        MessageTimestamp = (1, 0, 64),
        DeviceId = (3, 0, 16),
        FblockId = (3, 16, 8),
        InstId = (3, 24, 8),
        FuncId = (4, 0, 12),
        OpType = (4, 12, 4),
        Reserved2 = (4, 16, 16),
    }
}

pub struct Most;

pub type MostPdu<B> = Pdu<B, Most>;

impl Most {
    /// ヘッダのみのメッセージ長 (クアドレット)
    pub const HEADER_QUADLETS: u16 = 5;
}

impl PduFormat for Most {
    type Field = MostField;
    const NAME: &'static str = "ACF MOST";
    const HEADER_LEN: usize = Most::HEADER_QUADLETS as usize * QUADLET_SIZE;

    fn stamp<B: AsRef<[u8]> + AsMut<[u8]>>(pdu: &mut Pdu<B, Self>) {
        pdu.set_acf_msg_type(AVTP_ACF_TYPE_MOST);
        pdu.set_acf_msg_length(Most::HEADER_QUADLETS);
    }

    fn check<B: AsRef<[u8]>>(pdu: &Pdu<B, Self>, policy: &ValidationPolicy) -> Result<(), MalformedPdu> {
        expect_value("AcfMsgType", AVTP_ACF_TYPE_MOST as u64, pdu.get(MostField::AcfMsgType))?;
        // acf_msg_length はクアドレット単位
        check_length_claim(pdu.acf_msg_length() as usize * QUADLET_SIZE, Self::HEADER_LEN, pdu.buffer_len())?;
        expect_reserved_zero(
            policy,
            &[
                ("Reserved", pdu.get(MostField::Reserved)),
                ("Reserved2", pdu.get(MostField::Reserved2)),
            ],
        )
    }
}

const _: () = assert!(descriptors_fit(<MostField as Field>::DESCRIPTORS, Most::HEADER_LEN));

impl<B: AsRef<[u8]>> Pdu<B, Most> {
    pub fn acf_msg_type(&self) -> u8 {
        self.get(MostField::AcfMsgType) as u8
    }

    pub fn acf_msg_length(&self) -> u16 {
        self.get(MostField::AcfMsgLength) as u16
    }

    pub fn pad(&self) -> u8 {
        self.get(MostField::Pad) as u8
    }

    pub fn mtv(&self) -> bool {
        self.get(MostField::Mtv) == 1
    }

    pub fn most_net_id(&self) -> u8 {
        self.get(MostField::MostNetId) as u8
    }

    pub fn message_timestamp(&self) -> u64 {
        self.get(MostField::MessageTimestamp)
    }

    pub fn device_id(&self) -> u16 {
        self.get(MostField::DeviceId) as u16
    }

    pub fn fblock_id(&self) -> u8 {
        self.get(MostField::FblockId) as u8
    }

    pub fn inst_id(&self) -> u8 {
        self.get(MostField::InstId) as u8
    }

    pub fn func_id(&self) -> u16 {
        self.get(MostField::FuncId) as u16
    }

    pub fn op_type(&self) -> u8 {
        self.get(MostField::OpType) as u8
    }

    /// acf_msg_length が示すメッセージ本体 (ヘッダ後、パディング除く)
    ///
    /// 検証済みでない場合や長さが矛盾する場合は `None`。
    pub fn most_payload(&self) -> Option<&[u8]> {
        let total = self.acf_msg_length() as usize * QUADLET_SIZE;
        let end = total.checked_sub(self.pad() as usize)?;
        self.as_bytes().get(Most::HEADER_LEN..end)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Pdu<B, Most> {
    pub fn set_acf_msg_type(&mut self, value: u8) {
        self.set(MostField::AcfMsgType, value as u64);
    }

    pub fn set_acf_msg_length(&mut self, value: u16) {
        self.set(MostField::AcfMsgLength, value as u64);
    }

    pub fn set_pad(&mut self, value: u8) {
        self.set(MostField::Pad, value as u64);
    }

    pub fn enable_mtv(&mut self) {
        self.set(MostField::Mtv, 1);
    }

    pub fn disable_mtv(&mut self) {
        self.set(MostField::Mtv, 0);
    }

    pub fn set_most_net_id(&mut self, value: u8) {
        self.set(MostField::MostNetId, value as u64);
    }

    pub fn set_message_timestamp(&mut self, value: u64) {
        self.set(MostField::MessageTimestamp, value);
    }

    pub fn set_device_id(&mut self, value: u16) {
        self.set(MostField::DeviceId, value as u64);
    }

    pub fn set_fblock_id(&mut self, value: u8) {
        self.set(MostField::FblockId, value as u64);
    }

    pub fn set_inst_id(&mut self, value: u8) {
        self.set(MostField::InstId, value as u64);
    }

    pub fn set_func_id(&mut self, value: u16) {
        self.set(MostField::FuncId, value as u64);
    }

    pub fn set_op_type(&mut self, value: u8) {
        self.set(MostField::OpType, value as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avtp_common_rs::packet::core::format_base::{is_valid, validate};

    #[test]
    fn test_init() {
        let mut buf = [0xFFu8; 20];
        let pdu = MostPdu::init(&mut buf[..]).unwrap();
        assert_eq!(pdu.acf_msg_type(), AVTP_ACF_TYPE_MOST);
        assert_eq!(pdu.acf_msg_length(), 5);
        assert_eq!(pdu.message_timestamp(), 0);
        assert_eq!(&buf[..4], &[0x08, 0x05, 0x00, 0x00]);
        assert!(is_valid::<Most>(&buf));
    }

    #[test]
    fn test_header_boundary() {
        let mut buf = [0u8; 20];
        MostPdu::init(&mut buf[..]).unwrap();
        assert!(is_valid::<Most>(&buf));
        assert_eq!(
            validate::<Most>(&buf[..19]),
            Err(MalformedPdu::BufferTooShort { required: 20, actual: 19 })
        );
    }

    #[test]
    fn test_length_claim_guard() {
        let mut buf = [0u8; 24];
        let mut pdu = MostPdu::init(&mut buf[..]).unwrap();
        pdu.set_acf_msg_length(6);
        assert!(pdu.is_valid());
        pdu.set_acf_msg_length(7);
        assert_eq!(
            pdu.validate(),
            Err(MalformedPdu::LengthExceedsBuffer { claimed: 28, actual: 24 })
        );
        pdu.set_acf_msg_length(4);
        assert_eq!(pdu.validate(), Err(MalformedPdu::LengthBelowHeader { claimed: 16, header: 20 }));
    }

    #[test]
    fn test_wrong_msg_type() {
        let mut buf = [0u8; 20];
        let mut pdu = MostPdu::init(&mut buf[..]).unwrap();
        pdu.set_acf_msg_type(0x01);
        assert!(!pdu.is_valid());
    }

    #[test]
    fn test_field_layout() {
        let mut buf = [0u8; 20];
        let mut pdu = MostPdu::init(&mut buf[..]).unwrap();
        pdu.set_pad(3);
        pdu.enable_mtv();
        pdu.set_most_net_id(0x1F);
        pdu.set_message_timestamp(0x1122_3344_5566_7788);
        pdu.set_device_id(0xBEEF);
        pdu.set_fblock_id(0x52);
        pdu.set_inst_id(0x01);
        pdu.set_func_id(0xABC);
        pdu.set_op_type(0xD);

        assert_eq!(pdu.func_id(), 0xABC);
        assert_eq!(pdu.op_type(), 0xD);
        assert_eq!(
            buf,
            [
                0x08, 0x05, 0xFF, 0x00, //
                0x11, 0x22, 0x33, 0x44, //
                0x55, 0x66, 0x77, 0x88, //
                0xBE, 0xEF, 0x52, 0x01, //
                0xAB, 0xCD, 0x00, 0x00,
            ]
        );
    }

    #[test]
    fn test_most_payload_respects_pad() {
        let mut buf = [0u8; 28];
        let mut pdu = MostPdu::init(&mut buf[..]).unwrap();
        pdu.set_acf_msg_length(7);
        pdu.set_pad(2);
        pdu.payload_mut()[..6].copy_from_slice(b"hello!");
        assert_eq!(pdu.most_payload(), Some(&b"hello!"[..]));
    }

    #[test]
    fn test_reserved_must_be_zero() {
        let mut buf = [0u8; 20];
        let mut pdu = MostPdu::init(&mut buf[..]).unwrap();
        pdu.set(MostField::Reserved, 0x80);
        assert_eq!(pdu.validate(), Err(MalformedPdu::ReservedNotZero { field: "Reserved", value: 0x80 }));
        assert!(pdu.validate_with(&ValidationPolicy::lenient()).is_ok());
    }
}
