//! Frame metadata persisted next to a compressed payload

use crate::{WavHuffError, WavHuffResult};
use std::fmt;
use std::str::FromStr;

/// Everything needed to rebuild the WAV container around decoded samples
///
/// The textual form is the comma-joined record
/// `sample_rate,frame_count,sample_width,channels,sample_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameMetadata {
    pub sample_rate: u32,
    pub frame_count: u64,
    /// Bytes per sample in the container
    pub sample_width: u16,
    pub channels: u16,
    /// Number of codec symbols in the payload
    pub sample_count: u64,
}

impl FrameMetadata {
    /// Size in bytes of one frame of the container's data chunk
    pub fn frame_size(&self) -> usize {
        self.sample_width as usize * self.channels as usize
    }

    /// Expected size in bytes of the container's data chunk, or `None` if
    /// it does not fit in a `u64`
    pub fn data_len(&self) -> Option<u64> {
        self.frame_count.checked_mul(self.frame_size() as u64)
    }
}

impl fmt::Display for FrameMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.sample_rate, self.frame_count, self.sample_width, self.channels, self.sample_count
        )
    }
}

fn field<T: FromStr>(fields: &[&str], index: usize, name: &str) -> WavHuffResult<T> {
    fields[index]
        .trim()
        .parse()
        .map_err(|_| WavHuffError::InvalidMetadata(format!("invalid {}: {:?}", name, fields[index])))
}

impl FromStr for FrameMetadata {
    type Err = WavHuffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(',').collect();
        if fields.len() != 5 {
            return Err(WavHuffError::InvalidMetadata(format!(
                "expected 5 comma-separated fields, found {}",
                fields.len()
            )));
        }

        Ok(Self {
            sample_rate: field(&fields, 0, "sample rate")?,
            frame_count: field(&fields, 1, "frame count")?,
            sample_width: field(&fields, 2, "sample width")?,
            channels: field(&fields, 3, "channel count")?,
            sample_count: field(&fields, 4, "sample count")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_text() {
        let meta = FrameMetadata {
            sample_rate: 19531,
            frame_count: 98699,
            sample_width: 2,
            channels: 1,
            sample_count: 12337,
        };
        let text = meta.to_string();
        assert_eq!(text, "19531,98699,2,1,12337");
        assert_eq!(text.parse::<FrameMetadata>().unwrap(), meta);
        assert_eq!(meta.data_len(), Some(98699 * 2));
    }

    #[test]
    fn test_metadata_rejects_bad_records() {
        assert!(matches!(
            "1,2,3,4".parse::<FrameMetadata>(),
            Err(WavHuffError::InvalidMetadata(_))
        ));
        assert!("1,2,x,4,5".parse::<FrameMetadata>().is_err());
        assert!("1,2,3,4,5,6".parse::<FrameMetadata>().is_err());
    }

    #[test]
    fn test_metadata_tolerates_trailing_newline() {
        let meta: FrameMetadata = "8000,4,2,2,4\n".parse().unwrap();
        assert_eq!(meta.channels, 2);
        assert_eq!(meta.frame_size(), 4);
    }

    #[test]
    fn test_data_len_overflow() {
        let meta: FrameMetadata = "8000,18446744073709551615,2,1,0".parse().unwrap();
        assert_eq!(meta.data_len(), None);
    }
}
