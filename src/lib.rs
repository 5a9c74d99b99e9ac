/// AVTP Rust Implementation
/// IEEE 1722 AVTP / ACF header field codec in Rust

pub mod avtp_common_rs;

// 便利な再エクスポート
pub mod prelude {
    pub use crate::avtp_common_rs::packet::core::{
        AvtpError, AvtpResult, Field, FieldAccessError, MalformedPdu, Pdu, PduFormat, ValidationPolicy,
    };
    pub use crate::avtp_common_rs::packet::types::{
        AcfCommon, AcfCommonField, AcfCommonPdu, CommonHeader, CommonHeaderField, CommonHeaderPdu, Cvf, CvfField,
        CvfFormatSubtype, CvfH264, CvfH264Field, CvfH264Pdu, CvfPdu, Most, MostField, MostPdu, Udp, UdpField, UdpPdu,
    };
}
