/// Compressed Video Format (CVF) ヘッダ (IEEE 1722-2016 8)
/// 6 クアドレットの固定ヘッダと、H.264 ペイロード先頭の 1 クアドレットのサブヘッダ

use crate::avtp_common_rs::packet::core::defines::{
    AVTP_CVF_FORMAT_RFC, AVTP_CVF_FORMAT_SUBTYPE_H264, AVTP_CVF_FORMAT_SUBTYPE_JPEG2000,
    AVTP_CVF_FORMAT_SUBTYPE_MJPEG, AVTP_SUBTYPE_CVF, AVTP_VERSION, QUADLET_SIZE,
};
use crate::avtp_common_rs::packet::core::exceptions::{AvtpResult, MalformedPdu};
use crate::avtp_common_rs::packet::core::field_codec::{descriptors_fit, Field};
use crate::avtp_common_rs::packet::core::format_base::{Pdu, PduFormat};
use crate::avtp_common_rs::packet::core::validation::{
    check_length_claim, expect_reserved_zero, expect_value, ValidationPolicy,
};

crate::avtp_fields! {
    /// CVF ヘッダのフィールド
    pub enum CvfField {
        Subtype = (0, 0, 8),
        Sv = (0, 8, 1),
        Version = (0, 9, 3),
        Mr = (0, 12, 1),
        Reserved = (0, 13, 2),
        Tv = (0, 15, 1),
        SequenceNum = (0, 16, 8),
        Reserved2 = (0, 24, 7),
        Tu = (0, 31, 1),
        StreamId = (1, 0, 64),
        AvtpTimestamp = (3, 0, 32),
        Format = (4, 0, 8),
        FormatSubtype = (4, 8, 8),
        Reserved3 = (4, 16, 16),
        StreamDataLength = (5, 0, 16),
        Reserved4 = (5, 16, 2),
        Ptv = (5, 18, 1),
        M = (5, 19, 1),
        Evt = (5, 20, 4),
        Reserved5 = (5, 24, 8),
    }
}

/// CVF フォーマットサブタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CvfFormatSubtype {
    Mjpeg,
    H264,
    Jpeg2000,
}

impl CvfFormatSubtype {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            AVTP_CVF_FORMAT_SUBTYPE_MJPEG => Some(CvfFormatSubtype::Mjpeg),
            AVTP_CVF_FORMAT_SUBTYPE_H264 => Some(CvfFormatSubtype::H264),
            AVTP_CVF_FORMAT_SUBTYPE_JPEG2000 => Some(CvfFormatSubtype::Jpeg2000),
            _ => None,
        }
    }

    pub fn as_raw(self) -> u8 {
        match self {
            CvfFormatSubtype::Mjpeg => AVTP_CVF_FORMAT_SUBTYPE_MJPEG,
            CvfFormatSubtype::H264 => AVTP_CVF_FORMAT_SUBTYPE_H264,
            CvfFormatSubtype::Jpeg2000 => AVTP_CVF_FORMAT_SUBTYPE_JPEG2000,
        }
    }
}

/// CVF ストリーム PDU
pub struct Cvf;

pub type CvfPdu<B> = Pdu<B, Cvf>;

impl PduFormat for Cvf {
    type Field = CvfField;
    const NAME: &'static str = "CVF";
    const HEADER_LEN: usize = 6 * QUADLET_SIZE;

    fn stamp<B: AsRef<[u8]> + AsMut<[u8]>>(pdu: &mut Pdu<B, Self>) {
        pdu.set_subtype(AVTP_SUBTYPE_CVF);
        pdu.set_format(AVTP_CVF_FORMAT_RFC);
        pdu.enable_sv();
    }

    fn check<B: AsRef<[u8]>>(pdu: &Pdu<B, Self>, policy: &ValidationPolicy) -> Result<(), MalformedPdu> {
        expect_value("Subtype", AVTP_SUBTYPE_CVF as u64, pdu.get(CvfField::Subtype))?;

        let claimed = Self::HEADER_LEN + pdu.stream_data_length() as usize;
        check_length_claim(claimed, Self::HEADER_LEN, pdu.buffer_len())?;

        expect_value("Version", AVTP_VERSION as u64, pdu.get(CvfField::Version))?;
        if policy.require_stream_id_valid {
            expect_value("Sv", 1, pdu.get(CvfField::Sv))?;
        }
        expect_value("Format", AVTP_CVF_FORMAT_RFC as u64, pdu.get(CvfField::Format))?;

        let raw_subtype = pdu.format_subtype();
        let format_subtype = CvfFormatSubtype::from_raw(raw_subtype).ok_or(MalformedPdu::ValueOutOfRange {
            field: "FormatSubtype",
            value: raw_subtype as u64,
        })?;

        expect_reserved_zero(
            policy,
            &[
                ("Reserved", pdu.get(CvfField::Reserved)),
                ("Reserved2", pdu.get(CvfField::Reserved2)),
                ("Reserved3", pdu.get(CvfField::Reserved3)),
                ("Reserved4", pdu.get(CvfField::Reserved4)),
                ("Reserved5", pdu.get(CvfField::Reserved5)),
            ],
        )?;

        // ptv は H.264 タイムスタンプの有効フラグ
        if pdu.ptv() && format_subtype != CvfFormatSubtype::H264 {
            return Err(MalformedPdu::ConflictingFlags { flag: "Ptv", with: "FormatSubtype" });
        }

        Ok(())
    }
}

const _: () = assert!(descriptors_fit(<CvfField as Field>::DESCRIPTORS, Cvf::HEADER_LEN));

impl<B: AsRef<[u8]>> Pdu<B, Cvf> {
    pub fn subtype(&self) -> u8 {
        self.get(CvfField::Subtype) as u8
    }

    pub fn sv(&self) -> bool {
        self.get(CvfField::Sv) == 1
    }

    pub fn version(&self) -> u8 {
        self.get(CvfField::Version) as u8
    }

    pub fn mr(&self) -> bool {
        self.get(CvfField::Mr) == 1
    }

    pub fn tv(&self) -> bool {
        self.get(CvfField::Tv) == 1
    }

    pub fn sequence_num(&self) -> u8 {
        self.get(CvfField::SequenceNum) as u8
    }

    pub fn tu(&self) -> bool {
        self.get(CvfField::Tu) == 1
    }

    pub fn stream_id(&self) -> u64 {
        self.get(CvfField::StreamId)
    }

    pub fn avtp_timestamp(&self) -> u32 {
        self.get(CvfField::AvtpTimestamp) as u32
    }

    pub fn format(&self) -> u8 {
        self.get(CvfField::Format) as u8
    }

    pub fn format_subtype(&self) -> u8 {
        self.get(CvfField::FormatSubtype) as u8
    }

    pub fn stream_data_length(&self) -> u16 {
        self.get(CvfField::StreamDataLength) as u16
    }

    pub fn ptv(&self) -> bool {
        self.get(CvfField::Ptv) == 1
    }

    pub fn m(&self) -> bool {
        self.get(CvfField::M) == 1
    }

    pub fn evt(&self) -> u8 {
        self.get(CvfField::Evt) as u8
    }

    /// ペイロード先頭の H.264 サブヘッダ
    pub fn h264_header(&self) -> AvtpResult<CvfH264Pdu<&[u8]>> {
        Pdu::new_checked(self.payload())
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Pdu<B, Cvf> {
    pub fn set_subtype(&mut self, value: u8) {
        self.set(CvfField::Subtype, value as u64);
    }

    pub fn enable_sv(&mut self) {
        self.set(CvfField::Sv, 1);
    }

    pub fn disable_sv(&mut self) {
        self.set(CvfField::Sv, 0);
    }

    pub fn set_version(&mut self, value: u8) {
        self.set(CvfField::Version, value as u64);
    }

    pub fn enable_mr(&mut self) {
        self.set(CvfField::Mr, 1);
    }

    pub fn disable_mr(&mut self) {
        self.set(CvfField::Mr, 0);
    }

    pub fn enable_tv(&mut self) {
        self.set(CvfField::Tv, 1);
    }

    pub fn disable_tv(&mut self) {
        self.set(CvfField::Tv, 0);
    }

    pub fn set_sequence_num(&mut self, value: u8) {
        self.set(CvfField::SequenceNum, value as u64);
    }

    pub fn enable_tu(&mut self) {
        self.set(CvfField::Tu, 1);
    }

    pub fn disable_tu(&mut self) {
        self.set(CvfField::Tu, 0);
    }

    pub fn set_stream_id(&mut self, value: u64) {
        self.set(CvfField::StreamId, value);
    }

    pub fn set_avtp_timestamp(&mut self, value: u32) {
        self.set(CvfField::AvtpTimestamp, value as u64);
    }

    pub fn set_format(&mut self, value: u8) {
        self.set(CvfField::Format, value as u64);
    }

    pub fn set_format_subtype(&mut self, value: u8) {
        self.set(CvfField::FormatSubtype, value as u64);
    }

    pub fn set_stream_data_length(&mut self, value: u16) {
        self.set(CvfField::StreamDataLength, value as u64);
    }

    pub fn enable_ptv(&mut self) {
        self.set(CvfField::Ptv, 1);
    }

    pub fn disable_ptv(&mut self) {
        self.set(CvfField::Ptv, 0);
    }

    pub fn enable_m(&mut self) {
        self.set(CvfField::M, 1);
    }

    pub fn disable_m(&mut self) {
        self.set(CvfField::M, 0);
    }

    /// 4 ビット幅、上位ビットは切り詰め
    pub fn set_evt(&mut self, value: u8) {
        self.set(CvfField::Evt, value as u64);
    }

    pub fn h264_header_mut(&mut self) -> AvtpResult<CvfH264Pdu<&mut [u8]>> {
        Pdu::new_checked(self.payload_mut())
    }
}

crate::avtp_fields! {
    /// CVF H.264 サブヘッダのフィールド
    pub enum CvfH264Field {
        H264Timestamp = (0, 0, 32),
    }
}

/// CVF H.264 ペイロードのサブヘッダ
pub struct CvfH264;

pub type CvfH264Pdu<B> = Pdu<B, CvfH264>;

impl PduFormat for CvfH264 {
    type Field = CvfH264Field;
    const NAME: &'static str = "CVF H.264";
    const HEADER_LEN: usize = QUADLET_SIZE;

    fn check<B: AsRef<[u8]>>(_pdu: &Pdu<B, Self>, _policy: &ValidationPolicy) -> Result<(), MalformedPdu> {
        Ok(())
    }
}

const _: () = assert!(descriptors_fit(<CvfH264Field as Field>::DESCRIPTORS, CvfH264::HEADER_LEN));

impl<B: AsRef<[u8]>> Pdu<B, CvfH264> {
    pub fn h264_timestamp(&self) -> u32 {
        self.get(CvfH264Field::H264Timestamp) as u32
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Pdu<B, CvfH264> {
    pub fn set_h264_timestamp(&mut self, value: u32) {
        self.set(CvfH264Field::H264Timestamp, value as u64);
    }
}
