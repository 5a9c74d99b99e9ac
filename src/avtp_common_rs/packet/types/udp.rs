/// IEEE 1722 UDP カプセル化ヘッダ (IEEE 1722-2016 Annex J)
/// AVTPDU の前に付く 32 ビットのシーケンス番号のみ

use crate::avtp_common_rs::packet::core::defines::QUADLET_SIZE;
use crate::avtp_common_rs::packet::core::exceptions::MalformedPdu;
use crate::avtp_common_rs::packet::core::field_codec::{descriptors_fit, Field};
use crate::avtp_common_rs::packet::core::format_base::{Pdu, PduFormat};
use crate::avtp_common_rs::packet::core::validation::ValidationPolicy;

crate::avtp_fields! {
    pub enum UdpField {
        EncapsulationSeqNo = (0, 0, 32),
    }
}

pub struct Udp;

pub type UdpPdu<B> = Pdu<B, Udp>;

impl PduFormat for Udp {
    type Field = UdpField;
    const NAME: &'static str = "UDP encapsulation";
    const HEADER_LEN: usize = QUADLET_SIZE;

    // サイズ以外に制約はない
    fn check<B: AsRef<[u8]>>(_pdu: &Pdu<B, Self>, _policy: &ValidationPolicy) -> Result<(), MalformedPdu> {
        Ok(())
    }
}

const _: () = assert!(descriptors_fit(<UdpField as Field>::DESCRIPTORS, Udp::HEADER_LEN));

impl<B: AsRef<[u8]>> Pdu<B, Udp> {
    pub fn encapsulation_seq_no(&self) -> u32 {
        self.get(UdpField::EncapsulationSeqNo) as u32
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Pdu<B, Udp> {
    pub fn set_encapsulation_seq_no(&mut self, value: u32) {
        self.set(UdpField::EncapsulationSeqNo, value as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avtp_common_rs::packet::core::format_base::{is_valid, validate};

    #[test]
    fn test_seq_no_occupies_whole_quadlet() {
        let mut buf = [0xFFu8; 8];
        let mut pdu = UdpPdu::init(&mut buf[..]).unwrap();
        assert_eq!(pdu.encapsulation_seq_no(), 0);
        pdu.set_encapsulation_seq_no(0xDEAD_BEEF);
        assert_eq!(pdu.encapsulation_seq_no(), 0xDEAD_BEEF);
        assert_eq!(buf, [0xDE, 0xAD, 0xBE, 0xEF, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_size_boundary() {
        assert!(is_valid::<Udp>(&[0u8; 4]));
        assert_eq!(
            validate::<Udp>(&[0u8; 3]),
            Err(MalformedPdu::BufferTooShort { required: 4, actual: 3 })
        );
    }
}
