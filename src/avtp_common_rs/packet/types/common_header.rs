/// AVTP 共通ヘッダ (IEEE 1722-2016 4.4.3)
/// 全 AVTPDU の先頭クアドレットに共通する subtype / h / version

use crate::avtp_common_rs::packet::core::defines::{AVTP_VERSION, QUADLET_SIZE};
use crate::avtp_common_rs::packet::core::exceptions::MalformedPdu;
use crate::avtp_common_rs::packet::core::field_codec::{descriptors_fit, Field};
use crate::avtp_common_rs::packet::core::format_base::{Pdu, PduFormat};
use crate::avtp_common_rs::packet::core::validation::{expect_value, ValidationPolicy};

crate::avtp_fields! {
    /// AVTP 共通ヘッダのフィールド
    pub enum CommonHeaderField {
        Subtype = (0, 0, 8),
        H = (0, 8, 1),
        Version = (0, 9, 3),
    }
}

/// AVTP 共通ヘッダ
pub struct CommonHeader;

pub type CommonHeaderPdu<B> = Pdu<B, CommonHeader>;

impl PduFormat for CommonHeader {
    type Field = CommonHeaderField;
    const NAME: &'static str = "AVTP common header";
    const HEADER_LEN: usize = QUADLET_SIZE;

    fn check<B: AsRef<[u8]>>(pdu: &Pdu<B, Self>, _policy: &ValidationPolicy) -> Result<(), MalformedPdu> {
        expect_value("Version", AVTP_VERSION as u64, pdu.get(CommonHeaderField::Version))
    }
}

const _: () = assert!(descriptors_fit(
    <CommonHeaderField as Field>::DESCRIPTORS,
    CommonHeader::HEADER_LEN
));

impl<B: AsRef<[u8]>> Pdu<B, CommonHeader> {
    pub fn subtype(&self) -> u8 {
        self.get(CommonHeaderField::Subtype) as u8
    }

    pub fn h(&self) -> bool {
        self.get(CommonHeaderField::H) == 1
    }

    pub fn version(&self) -> u8 {
        self.get(CommonHeaderField::Version) as u8
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Pdu<B, CommonHeader> {
    pub fn set_subtype(&mut self, value: u8) {
        self.set(CommonHeaderField::Subtype, value as u64);
    }

    pub fn enable_h(&mut self) {
        self.set(CommonHeaderField::H, 1);
    }

    pub fn disable_h(&mut self) {
        self.set(CommonHeaderField::H, 0);
    }

    pub fn set_version(&mut self, value: u8) {
        self.set(CommonHeaderField::Version, value as u64);
    }
}
