//! WAV container reading and writing
//!
//! The codec works on the raw bytes of the data chunk. Reading reconstructs
//! those bytes exactly from the integer PCM samples `hound` yields, and
//! writing turns decoded bytes back into samples of the recorded width.

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use wavhuff_core::*;

fn container_err(err: hound::Error) -> WavHuffError {
    match err {
        hound::Error::IoError(e) => WavHuffError::IoError(e),
        hound::Error::Unsupported => {
            WavHuffError::UnsupportedFormat("WAV encoding not supported".to_string())
        }
        other => WavHuffError::Container(other.to_string()),
    }
}

fn check_width(sample_width: u16) -> WavHuffResult<()> {
    match sample_width {
        1..=4 => Ok(()),
        other => Err(WavHuffError::UnsupportedFormat(format!(
            "{}-byte PCM samples",
            other
        ))),
    }
}

/// Raw data chunk and format of a WAV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavContents {
    /// Data chunk bytes, little-endian, 8-bit samples unsigned
    pub raw: Vec<u8>,
    pub sample_rate: u32,
    pub frame_count: u64,
    /// Bytes per sample
    pub sample_width: u16,
    pub channels: u16,
}

impl WavContents {
    /// Metadata record for this file once `sample_count` symbols were coded
    pub fn metadata(&self, sample_count: usize) -> FrameMetadata {
        FrameMetadata {
            sample_rate: self.sample_rate,
            frame_count: self.frame_count,
            sample_width: self.sample_width,
            channels: self.channels,
            sample_count: sample_count as u64,
        }
    }
}

/// Read an integer PCM WAV file
pub fn read_wav<P: AsRef<Path>>(path: P) -> WavHuffResult<WavContents> {
    let path = path.as_ref();
    let mut reader = WavReader::open(path).map_err(container_err)?;
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int {
        return Err(WavHuffError::UnsupportedFormat(
            "floating point WAV data".to_string(),
        ));
    }
    if spec.bits_per_sample % 8 != 0 {
        return Err(WavHuffError::UnsupportedFormat(format!(
            "{}-bit samples",
            spec.bits_per_sample
        )));
    }
    let sample_width = spec.bits_per_sample / 8;
    check_width(sample_width)?;

    let frame_count = reader.duration() as u64;
    let mut raw = Vec::with_capacity(frame_count as usize * spec.channels as usize * sample_width as usize);

    for sample in reader.samples::<i32>() {
        let sample = sample.map_err(container_err)?;
        match sample_width {
            1 => raw.push((sample + 128) as u8),
            2 => raw.write_i16::<LittleEndian>(sample as i16)?,
            3 => raw.write_i24::<LittleEndian>(sample)?,
            _ => raw.write_i32::<LittleEndian>(sample)?,
        }
    }

    info!(
        path = %path.display(),
        sample_rate = spec.sample_rate,
        channels = spec.channels,
        sample_width,
        frame_count,
        "read WAV file"
    );

    Ok(WavContents {
        raw,
        sample_rate: spec.sample_rate,
        frame_count,
        sample_width,
        channels: spec.channels,
    })
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

/// Write raw data chunk bytes as an integer PCM WAV file
///
/// The file is written next to `path` and renamed into place, so a failed
/// write never leaves a truncated WAV behind.
pub fn write_wav<P: AsRef<Path>>(path: P, raw: &[u8], metadata: &FrameMetadata) -> WavHuffResult<()> {
    let path = path.as_ref();
    check_width(metadata.sample_width)?;
    if metadata.channels == 0 {
        return Err(WavHuffError::InvalidMetadata("zero channels".to_string()));
    }
    let data_len = metadata.data_len().ok_or_else(|| {
        WavHuffError::InvalidMetadata(format!(
            "{} frames of {} bytes overflow the data chunk size",
            metadata.frame_count,
            metadata.frame_size()
        ))
    })?;
    if raw.len() as u64 != data_len {
        return Err(WavHuffError::InvalidMetadata(format!(
            "{} data bytes do not make {} frames of {} bytes",
            raw.len(),
            metadata.frame_count,
            metadata.frame_size()
        )));
    }

    let spec = WavSpec {
        channels: metadata.channels,
        sample_rate: metadata.sample_rate,
        bits_per_sample: metadata.sample_width * 8,
        sample_format: SampleFormat::Int,
    };
    let width = metadata.sample_width as usize;
    let partial = partial_path(path);

    let written = (|| -> Result<(), hound::Error> {
        let mut writer = WavWriter::create(&partial, spec)?;
        for chunk in raw.chunks_exact(width) {
            match width {
                1 => writer.write_sample((chunk[0] as i16 - 128) as i8)?,
                2 => writer.write_sample(LittleEndian::read_i16(chunk))?,
                3 => writer.write_sample(LittleEndian::read_i24(chunk))?,
                _ => writer.write_sample(LittleEndian::read_i32(chunk))?,
            }
        }
        writer.finalize()
    })();

    if let Err(err) = written {
        let _ = fs::remove_file(&partial);
        return Err(container_err(err));
    }
    if let Err(err) = fs::rename(&partial, path) {
        let _ = fs::remove_file(&partial);
        return Err(err.into());
    }

    debug!(path = %path.display(), bytes = raw.len(), "wrote WAV file");
    Ok(())
}

/// Write decoded samples as a WAV file
pub fn write_samples<P: AsRef<Path>>(path: P, samples: &Samples, metadata: &FrameMetadata) -> WavHuffResult<()> {
    write_wav(path, &samples.to_le_bytes(), metadata)
}
