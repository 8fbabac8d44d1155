//! File-level encode and decode

use crate::artifacts::{ArtifactPaths, SidecarLayout, Sidecars};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use wavhuff_container::{read_wav, write_samples};
use wavhuff_core::consts::DEFAULT_SIDECAR_DIR;
use wavhuff_core::{DType, EncodedStream, WavHuffError, WavHuffResult};
use wavhuff_decoder::{DecoderOptions, WavHuffDecoder};
use wavhuff_encoder::{EncoderOptions, WavHuffEncoder};

/// Settings shared by [`encode_file`] and [`decode_file`]
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding sidecar files; see [`SidecarLayout`] for how a
    /// relative one is resolved
    pub sidecar_dir: PathBuf,
    pub layout: SidecarLayout,
    pub encoder: EncoderOptions,
    pub decoder: DecoderOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sidecar_dir: PathBuf::from(DEFAULT_SIDECAR_DIR),
            layout: SidecarLayout::default(),
            encoder: EncoderOptions::default(),
            decoder: DecoderOptions::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sidecar_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.sidecar_dir = dir.into();
        self
    }

    pub fn layout(mut self, layout: SidecarLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn encoder(mut self, options: EncoderOptions) -> Self {
        self.encoder = options;
        self
    }

    pub fn decoder(mut self, options: DecoderOptions) -> Self {
        self.decoder = options;
        self
    }
}

/// What [`encode_file`] produced
#[derive(Debug, Clone)]
pub struct EncodeSummary {
    pub input_bytes: usize,
    pub payload_bytes: usize,
    pub dtype: DType,
    pub sample_count: usize,
    pub paths: ArtifactPaths,
}

impl EncodeSummary {
    /// Payload size relative to the WAV data chunk
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.payload_bytes as f64 / self.input_bytes as f64
    }
}

/// Compress the WAV file at `input` into `payload`, writing sidecar files
/// next to the input
pub fn encode_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    payload: Q,
    config: &Config,
) -> WavHuffResult<EncodeSummary> {
    let input = input.as_ref();
    let payload = payload.as_ref();
    let paths = ArtifactPaths::derive_with(input, &config.sidecar_dir, config.layout)?;

    let wav = read_wav(input)?;
    let stream = WavHuffEncoder::new(config.encoder.clone()).encode_bytes(&wav.raw)?;

    paths.write(&Sidecars {
        tree_text: stream.tree_text,
        metadata: wav.metadata(stream.count),
        dtype: stream.dtype,
    })?;
    fs::write(payload, &stream.payload)?;

    let summary = EncodeSummary {
        input_bytes: wav.raw.len(),
        payload_bytes: stream.payload.len(),
        dtype: stream.dtype,
        sample_count: stream.count,
        paths,
    };
    info!(
        input = %input.display(),
        payload = %payload.display(),
        dtype = %summary.dtype,
        samples = summary.sample_count,
        ratio = summary.ratio(),
        "encoded"
    );
    Ok(summary)
}

/// Restore the WAV file compressed into `payload`, reading the sidecar
/// files derived from the payload path
///
/// Missing parent directories of `output` are created.
pub fn decode_file<P: AsRef<Path>, Q: AsRef<Path>>(
    payload: P,
    output: Q,
    config: &Config,
) -> WavHuffResult<()> {
    let payload = payload.as_ref();
    let output = output.as_ref();
    let paths = ArtifactPaths::derive_with(payload, &config.sidecar_dir, config.layout)?;

    let sidecars = paths.read()?;
    let count = usize::try_from(sidecars.metadata.sample_count).map_err(|_| {
        WavHuffError::InvalidMetadata(format!(
            "sample count {} does not fit in memory",
            sidecars.metadata.sample_count
        ))
    })?;
    let stream = EncodedStream {
        payload: fs::read(payload)?,
        tree_text: sidecars.tree_text,
        dtype: sidecars.dtype,
        count,
    };

    let samples = WavHuffDecoder::new(config.decoder.clone()).decode(&stream)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_samples(output, &samples, &sidecars.metadata)?;

    info!(
        payload = %payload.display(),
        output = %output.display(),
        samples = samples.len(),
        "decoded"
    );
    Ok(())
}
