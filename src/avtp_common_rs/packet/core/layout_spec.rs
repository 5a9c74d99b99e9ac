/// 実行時に読み込むフィールドレイアウト
/// JSON/TOML のレイアウト仕様からディスクリプタテーブルを構築し、同じコーデックで読み書きする

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use super::defines::QUADLET_SIZE;
use super::exceptions::{AvtpError, AvtpResult, ConfigError, FieldAccessError};
use super::field_codec::{self, Field, FieldDescriptor};
use super::format_base::PduFormat;

/// レイアウトのヘッダ長上限 (クアドレット)
///
/// クアドレット番号は `u8` なので、最後のクアドレットから 64 ビット幅のフィールドが
/// 3 クアドレットにまたがる場合までを許す。
pub const MAX_HEADER_QUADLETS: usize = u8::MAX as usize + 3;

/// フィールド仕様
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub quadlet: u8,
    pub offset: u8,
    pub bits: u8,
}

/// レイアウト仕様
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub name: String,
    pub header_quadlets: usize,
    pub fields: Vec<FieldSpec>,
}

impl LayoutSpec {
    /// コンパイル済みフォーマットのテーブルを仕様として書き出す
    pub fn of<F: PduFormat>() -> Self {
        let fields = F::Field::ALL
            .iter()
            .map(|field| {
                let desc = field.descriptor();
                FieldSpec {
                    name: field.name().to_string(),
                    quadlet: desc.quadlet,
                    offset: desc.offset,
                    bits: desc.bits,
                }
            })
            .collect();
        Self { name: F::NAME.to_string(), header_quadlets: F::HEADER_LEN / QUADLET_SIZE, fields }
    }

    pub fn to_json(&self) -> AvtpResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }
}

/// 検証済みの実行時レイアウト
#[derive(Debug, Clone)]
pub struct DynamicLayout {
    name: String,
    header_len: usize,
    names: Vec<String>,
    descriptors: Vec<FieldDescriptor>,
}

impl DynamicLayout {
    /// 仕様を検証してレイアウトを構築
    ///
    /// 不正な offset/bits、ヘッダ外のフィールド、名前の重複、ビット範囲の重なりを拒否する。
    pub fn from_spec(spec: LayoutSpec) -> AvtpResult<Self> {
        if spec.header_quadlets > MAX_HEADER_QUADLETS {
            return Err(invalid(format!(
                "ヘッダ長が大きすぎます: {} クアドレット (上限 {})",
                spec.header_quadlets, MAX_HEADER_QUADLETS
            )));
        }
        let header_len = spec
            .header_quadlets
            .checked_mul(QUADLET_SIZE)
            .ok_or_else(|| invalid(format!("ヘッダ長が不正です: {} クアドレット", spec.header_quadlets)))?;
        let mut seen = HashSet::new();
        let mut names = Vec::with_capacity(spec.fields.len());
        let mut descriptors = Vec::with_capacity(spec.fields.len());

        for field in spec.fields {
            let desc = FieldDescriptor::new(field.quadlet, field.offset, field.bits);
            if !desc.is_well_formed() {
                return Err(invalid(format!("フィールド '{}' の定義が不正です: {}", field.name, desc)));
            }
            if desc.required_len() > header_len {
                return Err(invalid(format!(
                    "フィールド '{}' がヘッダ ({}バイト) の外にあります",
                    field.name, header_len
                )));
            }
            if !seen.insert(field.name.clone()) {
                return Err(invalid(format!("フィールド名 '{}' が重複しています", field.name)));
            }
            names.push(field.name);
            descriptors.push(desc);
        }

        let mut order: Vec<usize> = (0..descriptors.len()).collect();
        order.sort_by_key(|&i| descriptors[i].start_bit());
        for pair in order.windows(2) {
            let (a, b) = (&descriptors[pair[0]], &descriptors[pair[1]]);
            if a.end_bit() > b.start_bit() {
                return Err(invalid(format!(
                    "フィールド '{}' と '{}' のビット範囲が重なっています",
                    names[pair[0]], names[pair[1]]
                )));
            }
        }

        debug!("layout '{}' loaded: {} fields, {} bytes", spec.name, names.len(), header_len);
        Ok(Self { name: spec.name, header_len, names, descriptors })
    }

    pub fn from_json_str(json: &str) -> AvtpResult<Self> {
        let spec: LayoutSpec = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_spec(spec)
    }

    pub fn from_toml_str(text: &str) -> AvtpResult<Self> {
        let spec: LayoutSpec = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_spec(spec)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header_len(&self) -> usize {
        self.header_len
    }

    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn get(&self, buffer: &[u8], name: &str) -> AvtpResult<u64> {
        let index = self.lookup(name)?;
        Ok(field_codec::get_field(&self.descriptors, buffer, index)?)
    }

    /// フィールド幅を超える値は切り詰められる
    pub fn set(&self, buffer: &mut [u8], name: &str, value: u64) -> AvtpResult<()> {
        let index = self.lookup(name)?;
        Ok(field_codec::set_field(&self.descriptors, buffer, index, value)?)
    }

    /// ヘッダをゼロクリア
    pub fn init(&self, buffer: &mut [u8]) -> AvtpResult<()> {
        let len = buffer.len();
        let header = buffer
            .get_mut(..self.header_len)
            .ok_or(FieldAccessError::buffer_too_short(self.header_len, len))?;
        header.fill(0);
        Ok(())
    }

    fn lookup(&self, name: &str) -> AvtpResult<usize> {
        self.field_index(name)
            .ok_or_else(|| invalid(format!("不明なフィールド名: {}", name)))
    }
}

fn invalid(msg: String) -> AvtpError {
    ConfigError::Invalid(msg).into()
}
