//! Core types for wavhuff

use crate::{WavHuffError, WavHuffResult};
use byteorder::{ByteOrder, LittleEndian};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Numeric interpretation applied to raw audio bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// Complex value made of two 64-bit floats
    ///
    /// This stands in for the 32-byte extended precision `clongdouble` of
    /// the earlier Python tool. Since 16-byte elements are tried first, the
    /// same bytes can sniff to a different dtype than that tool chose, and
    /// its `clongdouble` signal type files are rejected as
    /// [`WavHuffError::UnknownDType`].
    Complex128,
}

impl DType {
    /// All tags, in the order raw bytes are tried against them
    pub const SNIFF_ORDER: [DType; 4] = [DType::Complex128, DType::I64, DType::I32, DType::I16];

    /// Returns the size in bytes of one symbol of this type
    pub fn width(&self) -> usize {
        match self {
            DType::I16 => 2,
            DType::I32 => 4,
            DType::I64 => 8,
            DType::Complex128 => 16,
        }
    }

    /// Whether `bytes` is a valid sequence of symbols of this type
    ///
    /// The length must be a whole number of symbols; complex data must also
    /// be free of NaN components, which integer PCM reinterpreted as floats
    /// tends to produce.
    pub fn accepts(&self, bytes: &[u8]) -> bool {
        if bytes.len() % self.width() != 0 {
            return false;
        }
        match self {
            DType::Complex128 => bytes
                .chunks_exact(8)
                .all(|part| !LittleEndian::read_f64(part).is_nan()),
            _ => true,
        }
    }

    /// Pick the first candidate in [`DType::SNIFF_ORDER`] that accepts `bytes`
    pub fn sniff(bytes: &[u8]) -> WavHuffResult<DType> {
        Self::SNIFF_ORDER
            .into_iter()
            .find(|dtype| dtype.accepts(bytes))
            .ok_or(WavHuffError::UndeterminedDType { len: bytes.len() })
    }

    /// Textual tag stored in the signal type sidecar
    pub fn as_str(&self) -> &'static str {
        match self {
            DType::I16 => "16",
            DType::I32 => "32",
            DType::I64 => "64",
            DType::Complex128 => "complex128",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DType {
    type Err = WavHuffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "16" => Ok(DType::I16),
            "32" => Ok(DType::I32),
            "64" => Ok(DType::I64),
            "complex128" => Ok(DType::Complex128),
            other => Err(WavHuffError::UnknownDType(other.to_string())),
        }
    }
}

/// A value the Huffman codec can count, code and write to a tree file
///
/// The token form must round-trip exactly: `from_token(&s.to_token()) == s`.
pub trait Symbol: Copy + Eq + Hash + fmt::Debug {
    fn to_token(&self) -> String;
    fn from_token(token: &str) -> WavHuffResult<Self>;
}

/// A symbol that is also an audio sample with a fixed little-endian layout
pub trait Sample: Symbol {
    const DTYPE: DType;

    fn decode_le(bytes: &[u8]) -> WavHuffResult<Vec<Self>>;
    fn encode_le(samples: &[Self]) -> Vec<u8>;
}

fn check_width(bytes: &[u8], dtype: DType) -> WavHuffResult<usize> {
    let width = dtype.width();
    if bytes.len() % width != 0 {
        return Err(WavHuffError::InvalidParameter(format!(
            "{} bytes is not a multiple of the {}-byte width of dtype {}",
            bytes.len(),
            width,
            dtype
        )));
    }
    Ok(bytes.len() / width)
}

macro_rules! impl_int_sample {
    ($ty:ty, $dtype:expr, $read_into:ident, $write_into:ident) => {
        impl Symbol for $ty {
            fn to_token(&self) -> String {
                self.to_string()
            }

            fn from_token(token: &str) -> WavHuffResult<Self> {
                token.parse::<$ty>().map_err(|e| {
                    WavHuffError::InvalidParameter(format!(
                        "invalid {} token {:?}: {}",
                        stringify!($ty),
                        token,
                        e
                    ))
                })
            }
        }

        impl Sample for $ty {
            const DTYPE: DType = $dtype;

            fn decode_le(bytes: &[u8]) -> WavHuffResult<Vec<Self>> {
                let count = check_width(bytes, Self::DTYPE)?;
                let mut samples: Vec<$ty> = vec![0; count];
                LittleEndian::$read_into(bytes, &mut samples);
                Ok(samples)
            }

            fn encode_le(samples: &[Self]) -> Vec<u8> {
                let mut bytes = vec![0u8; samples.len() * Self::DTYPE.width()];
                LittleEndian::$write_into(samples, &mut bytes);
                bytes
            }
        }
    };
}

impl_int_sample!(i16, DType::I16, read_i16_into, write_i16_into);
impl_int_sample!(i32, DType::I32, read_i32_into, write_i32_into);
impl_int_sample!(i64, DType::I64, read_i64_into, write_i64_into);

/// Complex sample with 64-bit float components
///
/// Equality and hashing use the raw bit patterns, so every NaN payload and
/// both zeros are distinct, exactly reproducible symbols.
#[derive(Debug, Clone, Copy)]
pub struct ComplexSample {
    pub re: f64,
    pub im: f64,
}

impl ComplexSample {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn from_bits(re: u64, im: u64) -> Self {
        Self::new(f64::from_bits(re), f64::from_bits(im))
    }

    pub fn to_bits(self) -> (u64, u64) {
        (self.re.to_bits(), self.im.to_bits())
    }

    pub fn is_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }
}

impl PartialEq for ComplexSample {
    fn eq(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl Eq for ComplexSample {}

impl Hash for ComplexSample {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_bits().hash(state);
    }
}

impl Symbol for ComplexSample {
    fn to_token(&self) -> String {
        let (re, im) = self.to_bits();
        format!("{re:016x}:{im:016x}")
    }

    fn from_token(token: &str) -> WavHuffResult<Self> {
        let invalid = || WavHuffError::InvalidParameter(format!("invalid complex token {token:?}"));
        let (re, im) = token.split_once(':').ok_or_else(invalid)?;
        let re = u64::from_str_radix(re, 16).map_err(|_| invalid())?;
        let im = u64::from_str_radix(im, 16).map_err(|_| invalid())?;
        Ok(Self::from_bits(re, im))
    }
}

impl Sample for ComplexSample {
    const DTYPE: DType = DType::Complex128;

    fn decode_le(bytes: &[u8]) -> WavHuffResult<Vec<Self>> {
        let count = check_width(bytes, Self::DTYPE)?;
        let mut parts = vec![0f64; count * 2];
        LittleEndian::read_f64_into(bytes, &mut parts);
        Ok(parts
            .chunks_exact(2)
            .map(|pair| ComplexSample::new(pair[0], pair[1]))
            .collect())
    }

    fn encode_le(samples: &[Self]) -> Vec<u8> {
        let parts: Vec<f64> = samples.iter().flat_map(|c| [c.re, c.im]).collect();
        let mut bytes = vec![0u8; parts.len() * 8];
        LittleEndian::write_f64_into(&parts, &mut bytes);
        bytes
    }
}

/// A decoded sample sequence tagged with its numeric interpretation
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    Complex128(Vec<ComplexSample>),
}

impl Samples {
    /// Reinterpret little-endian bytes as samples of the given type
    pub fn from_le_bytes(dtype: DType, bytes: &[u8]) -> WavHuffResult<Self> {
        Ok(match dtype {
            DType::I16 => Samples::I16(i16::decode_le(bytes)?),
            DType::I32 => Samples::I32(i32::decode_le(bytes)?),
            DType::I64 => Samples::I64(i64::decode_le(bytes)?),
            DType::Complex128 => Samples::Complex128(ComplexSample::decode_le(bytes)?),
        })
    }

    pub fn to_le_bytes(&self) -> Vec<u8> {
        match self {
            Samples::I16(s) => i16::encode_le(s),
            Samples::I32(s) => i32::encode_le(s),
            Samples::I64(s) => i64::encode_le(s),
            Samples::Complex128(s) => ComplexSample::encode_le(s),
        }
    }

    pub fn dtype(&self) -> DType {
        match self {
            Samples::I16(_) => DType::I16,
            Samples::I32(_) => DType::I32,
            Samples::I64(_) => DType::I64,
            Samples::Complex128(_) => DType::Complex128,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Samples::I16(s) => s.len(),
            Samples::I32(s) => s.len(),
            Samples::I64(s) => s.len(),
            Samples::Complex128(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_tags() {
        for dtype in DType::SNIFF_ORDER {
            assert_eq!(dtype.as_str().parse::<DType>().unwrap(), dtype);
        }
        assert!(matches!(
            "clongdouble".parse::<DType>(),
            Err(WavHuffError::UnknownDType(_))
        ));
    }

    #[test]
    fn test_sniff_order() {
        // 1.0 + 2.0i as two little-endian f64s
        let mut complex = 1.0f64.to_le_bytes().to_vec();
        complex.extend_from_slice(&2.0f64.to_le_bytes());
        assert_eq!(DType::sniff(&complex).unwrap(), DType::Complex128);

        // Same length, but the real part is a NaN pattern
        let mut nan = vec![0xff; 8];
        nan.extend_from_slice(&2.0f64.to_le_bytes());
        assert_eq!(DType::sniff(&nan).unwrap(), DType::I64);

        assert_eq!(DType::sniff(&[0u8; 12]).unwrap(), DType::I32);
        assert_eq!(DType::sniff(&[0u8; 6]).unwrap(), DType::I16);
        assert_eq!(DType::sniff(&[]).unwrap(), DType::Complex128);
        assert!(matches!(
            DType::sniff(&[0u8; 3]),
            Err(WavHuffError::UndeterminedDType { len: 3 })
        ));
    }

    #[test]
    fn test_int_tokens() {
        assert_eq!(i16::from_token(&(-32768i16).to_token()).unwrap(), -32768);
        assert_eq!(i64::from_token("9223372036854775807").unwrap(), i64::MAX);
        assert!(i32::from_token("1.5").is_err());
    }

    #[test]
    fn test_complex_token_preserves_bits() {
        let nan = ComplexSample::from_bits(0x7ff8_0000_0000_0001, (-0.0f64).to_bits());
        let token = nan.to_token();
        assert_eq!(token, "7ff8000000000001:8000000000000000");
        assert_eq!(ComplexSample::from_token(&token).unwrap(), nan);
        assert_ne!(ComplexSample::new(0.0, 0.0), ComplexSample::new(-0.0, 0.0));
    }

    #[test]
    fn test_le_bytes() {
        let bytes = [0x01, 0x00, 0xff, 0xff];
        let samples = Samples::from_le_bytes(DType::I16, &bytes).unwrap();
        assert_eq!(samples, Samples::I16(vec![1, -1]));
        assert_eq!(samples.to_le_bytes(), bytes);

        assert!(Samples::from_le_bytes(DType::I32, &bytes[..3]).is_err());
    }

    #[test]
    fn test_complex_le_bytes() {
        let samples = vec![ComplexSample::new(1.5, -2.0)];
        let bytes = ComplexSample::encode_le(&samples);
        assert_eq!(bytes.len(), 16);
        assert_eq!(ComplexSample::decode_le(&bytes).unwrap(), samples);
    }
}
