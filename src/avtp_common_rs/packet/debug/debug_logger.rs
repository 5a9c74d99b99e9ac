use std::collections::HashMap;
use std::fmt::Write;

use bitvec::prelude::*;
use log::{debug, log_enabled, Level};
use once_cell::sync::Lazy;

use crate::avtp_common_rs::packet::core::defines::*;
use crate::avtp_common_rs::packet::core::field_codec::Field;
use crate::avtp_common_rs::packet::core::format_base::{Pdu, PduFormat};

static SUBTYPE_NAMES: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (AVTP_SUBTYPE_61883_IIDC, "61883/IIDC"),
        (AVTP_SUBTYPE_MMA_STREAM, "MMA stream"),
        (AVTP_SUBTYPE_AAF, "AAF"),
        (AVTP_SUBTYPE_CVF, "CVF"),
        (AVTP_SUBTYPE_CRF, "CRF"),
        (AVTP_SUBTYPE_TSCF, "TSCF"),
        (AVTP_SUBTYPE_SVF, "SVF"),
        (AVTP_SUBTYPE_RVF, "RVF"),
        (AVTP_SUBTYPE_AEF_CONTINUOUS, "AEF continuous"),
        (AVTP_SUBTYPE_VSF_STREAM, "VSF stream"),
        (AVTP_SUBTYPE_EF_STREAM, "EF stream"),
        (AVTP_SUBTYPE_NTSCF, "NTSCF"),
        (AVTP_SUBTYPE_ESCF, "ESCF"),
        (AVTP_SUBTYPE_EECF, "EECF"),
        (AVTP_SUBTYPE_AEF_DISCRETE, "AEF discrete"),
        (AVTP_SUBTYPE_ADP, "ADP"),
        (AVTP_SUBTYPE_AECP, "AECP"),
        (AVTP_SUBTYPE_ACMP, "ACMP"),
        (AVTP_SUBTYPE_MAAP, "MAAP"),
        (AVTP_SUBTYPE_EF_CONTROL, "EF control"),
    ])
});

static ACF_TYPE_NAMES: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (AVTP_ACF_TYPE_FLEXRAY, "FlexRay"),
        (AVTP_ACF_TYPE_CAN, "CAN"),
        (AVTP_ACF_TYPE_CAN_BRIEF, "CAN brief"),
        (AVTP_ACF_TYPE_LIN, "LIN"),
        (AVTP_ACF_TYPE_MOST, "MOST"),
        (AVTP_ACF_TYPE_GPC, "GPC"),
        (AVTP_ACF_TYPE_SERIAL, "Serial"),
        (AVTP_ACF_TYPE_PARALLEL, "Parallel"),
        (AVTP_ACF_TYPE_SENSOR, "Sensor"),
        (AVTP_ACF_TYPE_SENSOR_BRIEF, "Sensor brief"),
        (AVTP_ACF_TYPE_AECP, "AECP"),
        (AVTP_ACF_TYPE_ANCILLARY, "Ancillary"),
    ])
});

/// AVTP サブタイプ名 (未定義なら `None`)
pub fn subtype_name(subtype: u8) -> Option<&'static str> {
    SUBTYPE_NAMES.get(&subtype).copied()
}

/// ACF メッセージ種別名 (未定義なら `None`)
pub fn acf_type_name(msg_type: u8) -> Option<&'static str> {
    ACF_TYPE_NAMES.get(&msg_type).copied()
}

/// PDU ヘッダのデバッグ表示
/// - フィールドごとに `name = value` とワイヤ上のビット列
/// - ヘッダのクアドレットを 16 進で出力
pub struct PduDebugLogger;

impl PduDebugLogger {
    pub fn describe<B: AsRef<[u8]>, F: PduFormat>(pdu: &Pdu<B, F>) -> String {
        let header = pdu.header();
        let bits = BitSlice::<u8, Msb0>::from_slice(header);
        let mut out = String::new();

        let _ = writeln!(out, "[{}] {} bytes (header {})", F::NAME, pdu.buffer_len(), F::HEADER_LEN);
        for (quadlet, chunk) in header.chunks(QUADLET_SIZE).enumerate() {
            let _ = writeln!(out, "  q{}: {}", quadlet, hex::encode(chunk));
        }

        for field in F::Field::ALL.iter().copied() {
            let desc = field.descriptor();
            let value = pdu.get(field);
            let raw = &bits[desc.start_bit()..desc.end_bit()];
            let _ = write!(out, "  {} = {:#x} [{}]", field.name(), value, bit_string(raw));
            if let Some(name) = Self::value_name(field.name(), value) {
                let _ = write!(out, " ({})", name);
            }
            out.push('\n');
        }
        out
    }

    /// `describe` の結果を debug レベルで出力
    pub fn log_pdu<B: AsRef<[u8]>, F: PduFormat>(pdu: &Pdu<B, F>) {
        if log_enabled!(Level::Debug) {
            debug!("{}", Self::describe(pdu).trim_end());
        }
    }

    fn value_name(field: &str, value: u64) -> Option<&'static str> {
        let raw = u8::try_from(value).ok()?;
        match field {
            "Subtype" => subtype_name(raw),
            "AcfMsgType" => acf_type_name(raw),
            _ => None,
        }
    }
}

fn bit_string(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter().by_vals().map(|b| if b { '1' } else { '0' }).collect()
}
