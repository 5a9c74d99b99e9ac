/// IEEE 1722 共通定数
/// サブタイプ、ACF メッセージ種別、CVF フォーマット値

/// クアドレットのバイト数
pub const QUADLET_SIZE: usize = 4;

/// AVTP バージョン (IEEE 1722-2016 では 0 固定)
pub const AVTP_VERSION: u8 = 0;

// AVTP サブタイプ (IEEE 1722-2016 Table 6)
pub const AVTP_SUBTYPE_61883_IIDC: u8 = 0x00;
pub const AVTP_SUBTYPE_MMA_STREAM: u8 = 0x01;
pub const AVTP_SUBTYPE_AAF: u8 = 0x02;
pub const AVTP_SUBTYPE_CVF: u8 = 0x03;
pub const AVTP_SUBTYPE_CRF: u8 = 0x04;
pub const AVTP_SUBTYPE_TSCF: u8 = 0x05;
pub const AVTP_SUBTYPE_SVF: u8 = 0x06;
pub const AVTP_SUBTYPE_RVF: u8 = 0x07;
pub const AVTP_SUBTYPE_AEF_CONTINUOUS: u8 = 0x6E;
pub const AVTP_SUBTYPE_VSF_STREAM: u8 = 0x6F;
pub const AVTP_SUBTYPE_EF_STREAM: u8 = 0x7F;
pub const AVTP_SUBTYPE_NTSCF: u8 = 0x82;
pub const AVTP_SUBTYPE_ESCF: u8 = 0xEC;
pub const AVTP_SUBTYPE_EECF: u8 = 0xED;
pub const AVTP_SUBTYPE_AEF_DISCRETE: u8 = 0xEE;
pub const AVTP_SUBTYPE_ADP: u8 = 0xFA;
pub const AVTP_SUBTYPE_AECP: u8 = 0xFB;
pub const AVTP_SUBTYPE_ACMP: u8 = 0xFC;
pub const AVTP_SUBTYPE_MAAP: u8 = 0xFE;
pub const AVTP_SUBTYPE_EF_CONTROL: u8 = 0xFF;

// ACF メッセージ種別 (IEEE 1722-2016 Table 22)
pub const AVTP_ACF_TYPE_FLEXRAY: u8 = 0x00;
pub const AVTP_ACF_TYPE_CAN: u8 = 0x01;
pub const AVTP_ACF_TYPE_CAN_BRIEF: u8 = 0x02;
pub const AVTP_ACF_TYPE_LIN: u8 = 0x03;
pub const AVTP_ACF_TYPE_MOST: u8 = 0x04;
pub const AVTP_ACF_TYPE_GPC: u8 = 0x05;
pub const AVTP_ACF_TYPE_SERIAL: u8 = 0x06;
pub const AVTP_ACF_TYPE_PARALLEL: u8 = 0x07;
pub const AVTP_ACF_TYPE_SENSOR: u8 = 0x08;
pub const AVTP_ACF_TYPE_SENSOR_BRIEF: u8 = 0x09;
pub const AVTP_ACF_TYPE_AECP: u8 = 0x0A;
pub const AVTP_ACF_TYPE_ANCILLARY: u8 = 0x0B;

// CVF フォーマット
pub const AVTP_CVF_FORMAT_RFC: u8 = 0x02;

// CVF フォーマットサブタイプ
pub const AVTP_CVF_FORMAT_SUBTYPE_MJPEG: u8 = 0x00;
pub const AVTP_CVF_FORMAT_SUBTYPE_H264: u8 = 0x01;
pub const AVTP_CVF_FORMAT_SUBTYPE_JPEG2000: u8 = 0x02;
