/// PDU フォーマット定義
pub mod acf_common;
pub mod common_header;
pub mod cvf;
pub mod legacy;
pub mod most;
pub mod udp;

// 再エクスポート
pub use acf_common::{AcfCommon, AcfCommonField, AcfCommonPdu};
pub use common_header::{CommonHeader, CommonHeaderField, CommonHeaderPdu};
pub use cvf::{Cvf, CvfField, CvfFormatSubtype, CvfH264, CvfH264Field, CvfH264Pdu, CvfPdu};
pub use most::{Most, MostField, MostPdu};
pub use udp::{Udp, UdpField, UdpPdu};
