/// ビットフィールドコーデック
/// クアドレット(32ビット)単位のヘッダバッファから任意幅・任意位置の整数フィールドを読み書きする
///
/// ビット番号はクアドレット内で MSB 起点 (0 = 最上位ビット)、ワイヤ上はビッグエンディアン。
/// 32 ビット境界をまたぐフィールド (64 ビットのストリーム ID など) は連続するクアドレットを
/// 1 つのビッグエンディアン整数として結合する。

use std::fmt;

use super::defines::QUADLET_SIZE;
use super::exceptions::FieldAccessError;

const QUADLET_BITS: u32 = 32;

/// フィールドの位置定義 `{quadlet, offset, bits}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub quadlet: u8,
    pub offset: u8,
    pub bits: u8,
}

impl FieldDescriptor {
    pub const fn new(quadlet: u8, offset: u8, bits: u8) -> Self {
        Self { quadlet, offset, bits }
    }

    /// offset が 0..=31、bits が 1..=64 の範囲にあるか
    pub const fn is_well_formed(&self) -> bool {
        self.offset < 32 && self.bits >= 1 && self.bits <= 64
    }

    /// このフィールドが触れるクアドレット数
    pub const fn quadlet_count(&self) -> usize {
        (self.offset as usize + self.bits as usize + 31) / 32
    }

    /// アクセスに必要なバッファ長 (バイト)
    pub const fn required_len(&self) -> usize {
        (self.quadlet as usize + self.quadlet_count()) * QUADLET_SIZE
    }

    /// ヘッダ先頭からの絶対ビット位置 (開始)
    pub const fn start_bit(&self) -> usize {
        self.quadlet as usize * 32 + self.offset as usize
    }

    /// ヘッダ先頭からの絶対ビット位置 (終了、排他的)
    pub const fn end_bit(&self) -> usize {
        self.start_bit() + self.bits as usize
    }

    /// フィールド幅で表現できる最大値
    pub const fn max_value(&self) -> u64 {
        mask64(self.bits as u32)
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}[{}..{}]", self.quadlet, self.offset, self.offset as u32 + self.bits as u32)
    }
}

/// フォーマットごとのフィールド識別子
///
/// 列挙子の並びとディスクリプタテーブルの並びは一致していなければならない。
/// 通常は `avtp_fields!` マクロで両方を同時に生成する。
pub trait Field: Copy + Eq + fmt::Debug + 'static {
    /// 全フィールド (テーブル順)
    const ALL: &'static [Self];
    /// ディスクリプタテーブル (`ALL` と同じ順)
    const DESCRIPTORS: &'static [FieldDescriptor];

    fn index(self) -> usize;

    fn name(self) -> &'static str;

    fn descriptor(self) -> FieldDescriptor {
        Self::DESCRIPTORS[self.index()]
    }

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// テーブル内の全ディスクリプタが正しい形で、かつ `header_len` に収まるか
///
/// 各フォーマットのテーブルに対してコンパイル時アサーションとして使う。
pub const fn descriptors_fit(table: &[FieldDescriptor], header_len: usize) -> bool {
    let mut i = 0;
    while i < table.len() {
        if !table[i].is_well_formed() || table[i].required_len() > header_len {
            return false;
        }
        i += 1;
    }
    true
}

/// 下位 `bits` ビットのマスク (bits <= 64)
pub const fn mask64(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

const fn mask32(bits: u32) -> u32 {
    if bits >= 32 {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}

fn load_quadlet(buffer: &[u8], quadlet: usize) -> u32 {
    let start = quadlet * QUADLET_SIZE;
    let b = &buffer[start..start + QUADLET_SIZE];
    u32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

fn store_quadlet(buffer: &mut [u8], quadlet: usize, word: u32) {
    let start = quadlet * QUADLET_SIZE;
    buffer[start..start + QUADLET_SIZE].copy_from_slice(&word.to_be_bytes());
}

fn check_access(desc: &FieldDescriptor, len: usize) -> Result<(), FieldAccessError> {
    if !desc.is_well_formed() {
        return Err(FieldAccessError::InvalidDescriptor {
            quadlet: desc.quadlet,
            offset: desc.offset,
            bits: desc.bits,
        });
    }
    if len < desc.required_len() {
        return Err(FieldAccessError::buffer_too_short(desc.required_len(), len));
    }
    Ok(())
}

/// 検証済みディスクリプタでフィールドを読み出す
///
/// 呼び出し側が `check_access` 相当の条件を保証していること。
/// 破られた場合はスライス境界チェックで panic し、範囲外アクセスにはならない。
pub(crate) fn decode(desc: &FieldDescriptor, buffer: &[u8]) -> u64 {
    let mut value = 0u64;
    let mut quadlet = desc.quadlet as usize;
    let mut offset = desc.offset as u32;
    let mut remaining = desc.bits as u32;

    while remaining > 0 {
        let chunk = remaining.min(QUADLET_BITS - offset);
        let shift = QUADLET_BITS - offset - chunk;
        let part = (load_quadlet(buffer, quadlet) >> shift) & mask32(chunk);
        // chunk <= 32 かつ value は高々 64 - chunk ビットなので溢れない
        value = (value << chunk) | part as u64;
        remaining -= chunk;
        quadlet += 1;
        offset = 0;
    }

    value
}

/// 検証済みディスクリプタでフィールドを書き込む
///
/// `value` はフィールド幅で切り詰められる (上位ビットは黙って捨てる)。
/// 対象ビット以外はビット単位で保持される。
pub(crate) fn encode(desc: &FieldDescriptor, buffer: &mut [u8], value: u64) {
    let value = value & mask64(desc.bits as u32);
    let mut quadlet = desc.quadlet as usize;
    let mut offset = desc.offset as u32;
    let mut remaining = desc.bits as u32;

    while remaining > 0 {
        let chunk = remaining.min(QUADLET_BITS - offset);
        remaining -= chunk;
        let shift = QUADLET_BITS - offset - chunk;
        let part = ((value >> remaining) as u32) & mask32(chunk);
        let mask = mask32(chunk) << shift;

        let word = load_quadlet(buffer, quadlet);
        store_quadlet(buffer, quadlet, (word & !mask) | (part << shift));

        quadlet += 1;
        offset = 0;
    }
}

/// ディスクリプタを指定してフィールドを読み出す
pub fn read_field(desc: &FieldDescriptor, buffer: &[u8]) -> Result<u64, FieldAccessError> {
    check_access(desc, buffer.len())?;
    Ok(decode(desc, buffer))
}

/// ディスクリプタを指定してフィールドを書き込む (幅を超える値は切り詰め)
pub fn write_field(desc: &FieldDescriptor, buffer: &mut [u8], value: u64) -> Result<(), FieldAccessError> {
    check_access(desc, buffer.len())?;
    encode(desc, buffer, value);
    Ok(())
}

/// テーブルとフィールド番号でフィールドを読み出す
///
/// Args:
///     table: ディスクリプタテーブル
///     buffer: ヘッダバッファ
///     index: フィールド番号 (`table.len()` 未満)
///
/// Returns:
///     フィールド値。番号が範囲外なら `UnknownField`
pub fn get_field(table: &[FieldDescriptor], buffer: &[u8], index: usize) -> Result<u64, FieldAccessError> {
    let desc = table
        .get(index)
        .ok_or_else(|| FieldAccessError::unknown_field(index, table.len()))?;
    read_field(desc, buffer)
}

/// テーブルとフィールド番号でフィールドを書き込む
///
/// Args:
///     table: ディスクリプタテーブル
///     buffer: ヘッダバッファ
///     index: フィールド番号 (`table.len()` 未満)
///     value: 設定値 (フィールド幅で切り詰め)
pub fn set_field(
    table: &[FieldDescriptor],
    buffer: &mut [u8],
    index: usize,
    value: u64,
) -> Result<(), FieldAccessError> {
    let desc = table
        .get(index)
        .ok_or_else(|| FieldAccessError::unknown_field(index, table.len()))?;
    write_field(desc, buffer, value)
}
