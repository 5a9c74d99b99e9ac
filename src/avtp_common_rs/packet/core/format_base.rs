/// PDU フォーマットの基盤実装
/// フォーマット trait、型付きゼロコピービュー `Pdu`、フィールド定義マクロ

use std::fmt;
use std::marker::PhantomData;

use log::{debug, trace};

use super::exceptions::{AvtpResult, FieldAccessError, MalformedPdu};
use super::field_codec::{self, descriptors_fit, Field};
use super::validation::{check_header_len, ValidationPolicy};

/// PDU フォーマットの基本trait
///
/// フィールド列挙型、固定ヘッダ長、初期化時の固定値、検証ルールをまとめる。
/// ディスクリプタが `HEADER_LEN` に収まらないフォーマットは `Pdu` を作った時点でコンパイルエラーになる。
///
/// ```compile_fail
/// use avtp_rust::avtp_common_rs::packet::core::{MalformedPdu, Pdu, PduFormat, ValidationPolicy};
///
/// avtp_rust::avtp_fields! {
///     pub enum WideField {
///         Id = (1, 0, 64),
///     }
/// }
///
/// struct Wide;
///
/// impl PduFormat for Wide {
///     type Field = WideField;
///     const NAME: &'static str = "Wide";
///     const HEADER_LEN: usize = 4;
///
///     fn check<B: AsRef<[u8]>>(_pdu: &Pdu<B, Self>, _policy: &ValidationPolicy) -> Result<(), MalformedPdu> {
///         Ok(())
///     }
/// }
///
/// let buf = [0u8; 12];
/// let _ = Pdu::<_, Wide>::new_checked(&buf[..]);
/// ```
pub trait PduFormat: Sized + 'static {
    /// このフォーマットのフィールド識別子
    type Field: Field;

    /// ログ出力用の名前
    const NAME: &'static str;

    /// 固定ヘッダ長 (バイト、クアドレット単位)
    const HEADER_LEN: usize;

    /// ゼロクリア後のヘッダに必須の固定値を書き込む
    fn stamp<B: AsRef<[u8]> + AsMut<[u8]>>(_pdu: &mut Pdu<B, Self>) {}

    /// ヘッダ長以外のフォーマット固有ルールを検査する
    fn check<B: AsRef<[u8]>>(pdu: &Pdu<B, Self>, policy: &ValidationPolicy) -> Result<(), MalformedPdu>;
}

/// 呼び出し側のバッファに重ねる型付きビュー
///
/// 生成時にバッファ長がヘッダ長以上であることを確認済みなので、
/// 型付きフィールドの読み書きは失敗しない。バッファは借用するだけで所有しない
/// (`B` に `Vec<u8>` を渡せば所有も可能)。
pub struct Pdu<B, F> {
    buffer: B,
    format: PhantomData<F>,
}

impl<B, F: PduFormat> Pdu<B, F> {
    /// 全ディスクリプタがヘッダ内に収まること (フォーマットごとにコンパイル時評価)
    const LAYOUT_FITS: () = assert!(
        descriptors_fit(F::Field::DESCRIPTORS, F::HEADER_LEN),
        "field descriptor outside HEADER_LEN"
    );
}

impl<B: AsRef<[u8]>, F: PduFormat> Pdu<B, F> {
    /// バッファ長を確認してビューを作る
    pub fn new_checked(buffer: B) -> AvtpResult<Self> {
        #[allow(clippy::let_unit_value)]
        let () = Self::LAYOUT_FITS;
        let len = buffer.as_ref().len();
        if len < F::HEADER_LEN {
            return Err(FieldAccessError::buffer_too_short(F::HEADER_LEN, len).into());
        }
        Ok(Self { buffer, format: PhantomData })
    }

    /// フィールド値を取得
    pub fn get(&self, field: F::Field) -> u64 {
        field_codec::decode(&field.descriptor(), self.buffer.as_ref())
    }

    /// フィールド番号 (生の整数) でフィールド値を取得
    pub fn get_by_index(&self, index: usize) -> AvtpResult<u64> {
        Ok(field_codec::get_field(F::Field::DESCRIPTORS, self.buffer.as_ref(), index)?)
    }

    pub fn header(&self) -> &[u8] {
        &self.buffer.as_ref()[..F::HEADER_LEN]
    }

    /// ヘッダ以降の領域 (コーデックは解釈しない)
    pub fn payload(&self) -> &[u8] {
        &self.buffer.as_ref()[F::HEADER_LEN..]
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.as_ref().len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    pub fn into_inner(self) -> B {
        self.buffer
    }

    /// 既定ポリシーで検証
    pub fn validate(&self) -> Result<(), MalformedPdu> {
        self.validate_with(&ValidationPolicy::default())
    }

    pub fn validate_with(&self, policy: &ValidationPolicy) -> Result<(), MalformedPdu> {
        let result = F::check(self, policy);
        if let Err(err) = &result {
            debug!("{} rejected ({} bytes): {}", F::NAME, self.buffer_len(), err);
        }
        result
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>, F: PduFormat> Pdu<B, F> {
    /// ヘッダをゼロクリアし、フォーマット固有の固定値を書き込む
    ///
    /// ペイロード領域には触れない。
    pub fn init(buffer: B) -> AvtpResult<Self> {
        let mut pdu = Self::new_checked(buffer)?;
        pdu.header_mut().fill(0);
        F::stamp(&mut pdu);
        trace!("{} initialised ({} bytes)", F::NAME, pdu.buffer_len());
        Ok(pdu)
    }

    /// フィールド値を設定
    ///
    /// フィールド幅を超える値は下位ビットだけが格納される (`v mod 2^bits`)。
    /// 切り詰めを許さない場合は `set_checked` を使う。
    pub fn set(&mut self, field: F::Field, value: u64) {
        field_codec::encode(&field.descriptor(), self.buffer.as_mut(), value);
    }

    /// フィールド幅を超える値を拒否する `set`
    pub fn set_checked(&mut self, field: F::Field, value: u64) -> AvtpResult<()> {
        let desc = field.descriptor();
        if value > desc.max_value() {
            return Err(FieldAccessError::ValueOutOfRange { field: field.name(), value, bits: desc.bits }.into());
        }
        self.set(field, value);
        Ok(())
    }

    /// フィールド番号 (生の整数) でフィールド値を設定
    pub fn set_by_index(&mut self, index: usize, value: u64) -> AvtpResult<()> {
        Ok(field_codec::set_field(F::Field::DESCRIPTORS, self.buffer.as_mut(), index, value)?)
    }

    pub fn header_mut(&mut self) -> &mut [u8] {
        &mut self.buffer.as_mut()[..F::HEADER_LEN]
    }

    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.buffer.as_mut()[F::HEADER_LEN..]
    }
}

impl<B: Clone, F> Clone for Pdu<B, F> {
    fn clone(&self) -> Self {
        Self { buffer: self.buffer.clone(), format: PhantomData }
    }
}

impl<B: AsRef<[u8]>, F: PduFormat> fmt::Debug for Pdu<B, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pdu")
            .field("format", &F::NAME)
            .field("len", &self.buffer_len())
            .finish()
    }
}

/// バッファが `F` の PDU として受理できるか
pub fn is_valid<F: PduFormat>(buffer: &[u8]) -> bool {
    validate::<F>(buffer).is_ok()
}

/// 既定ポリシーで検証し、最初に違反したルールを返す
pub fn validate<F: PduFormat>(buffer: &[u8]) -> Result<(), MalformedPdu> {
    validate_with::<F>(buffer, &ValidationPolicy::default())
}

pub fn validate_with<F: PduFormat>(buffer: &[u8], policy: &ValidationPolicy) -> Result<(), MalformedPdu> {
    if let Err(err) = check_header_len(F::HEADER_LEN, buffer.len()) {
        debug!("{} rejected: {}", F::NAME, err);
        return Err(err);
    }
    #[allow(clippy::let_unit_value)]
    let () = Pdu::<&[u8], F>::LAYOUT_FITS;
    Pdu::<&[u8], F> { buffer, format: PhantomData }.validate_with(policy)
}

/// フィールド列挙型とディスクリプタテーブルを同時に定義する
///
/// ```ignore
/// avtp_fields! {
///     pub enum UdpField {
///         EncapsulationSeqNo = (0, 0, 32),
///     }
/// }
/// ```
#[macro_export]
macro_rules! avtp_fields {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = ($quadlet:expr, $offset:expr, $bits:expr) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::avtp_common_rs::packet::core::field_codec::Field for $name {
            const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];
            const DESCRIPTORS: &'static [$crate::avtp_common_rs::packet::core::field_codec::FieldDescriptor] = &[
                $( $crate::avtp_common_rs::packet::core::field_codec::FieldDescriptor::new($quadlet, $offset, $bits) ),+
            ];

            fn index(self) -> usize {
                self as usize
            }

            fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant) ),+
                }
            }
        }

        impl ::std::convert::TryFrom<u8> for $name {
            type Error = $crate::avtp_common_rs::packet::core::exceptions::FieldAccessError;

            fn try_from(raw: u8) -> Result<Self, Self::Error> {
                use $crate::avtp_common_rs::packet::core::field_codec::Field;
                Self::from_index(raw as usize).ok_or_else(|| {
                    $crate::avtp_common_rs::packet::core::exceptions::FieldAccessError::unknown_field(
                        raw as usize,
                        Self::ALL.len(),
                    )
                })
            }
        }
    };
}
