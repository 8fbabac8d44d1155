//! Command-line front end for wavhuff
//!
//! ```text
//! wavhuff encode data/take1.wav data/take1.wav.brainwire
//! wavhuff decode data/take1.wav.brainwire decoded/take1.wav
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};
use wavhuff::consts::{DEFAULT_SIDECAR_DIR, SIDECAR_DIR_ENV};
use wavhuff::{decode_file, encode_file, Config, DType, DecoderOptions, EncoderOptions, SidecarLayout};

#[derive(Debug, Parser)]
#[command(name = "wavhuff", version, about = "Lossless Huffman compression of WAV sample streams")]
struct Cli {
    /// Directory for sidecar files, relative to the input file unless absolute
    #[arg(long, global = true, env = SIDECAR_DIR_ENV, default_value = DEFAULT_SIDECAR_DIR)]
    sidecar_dir: PathBuf,

    /// Resolve a relative sidecar dir next to the input (`input`) or under
    /// the working directory (`cwd`)
    #[arg(long, global = true, default_value = "input")]
    sidecar_layout: SidecarLayout,

    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compress a WAV file into a payload plus sidecar files
    Encode {
        input: PathBuf,
        payload: PathBuf,
        /// Sample interpretation to use instead of sniffing: 16, 32, 64 or complex128
        #[arg(long)]
        dtype: Option<DType>,
    },
    /// Restore a WAV file from a payload and its sidecar files
    Decode {
        payload: PathBuf,
        output: PathBuf,
        /// Fail unless the recorded sample interpretation matches
        #[arg(long)]
        expect_dtype: Option<DType>,
    },
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::new()
        .sidecar_dir(cli.sidecar_dir)
        .layout(cli.sidecar_layout);

    match cli.command {
        Command::Encode {
            input,
            payload,
            dtype,
        } => {
            let mut options = EncoderOptions::new();
            if let Some(dtype) = dtype {
                options = options.dtype(dtype);
            }
            let summary = encode_file(&input, &payload, &config.encoder(options))
                .with_context(|| format!("failed to encode {}", input.display()))?;

            println!(
                "{} -> {} ({} {} samples, {} -> {} bytes, ratio {:.3})",
                input.display(),
                payload.display(),
                summary.sample_count,
                summary.dtype,
                summary.input_bytes,
                summary.payload_bytes,
                summary.ratio()
            );
        }
        Command::Decode {
            payload,
            output,
            expect_dtype,
        } => {
            let mut options = DecoderOptions::new();
            if let Some(dtype) = expect_dtype {
                options = options.expect_dtype(dtype);
            }
            decode_file(&payload, &output, &config.decoder(options))
                .with_context(|| format!("failed to decode {}", payload.display()))?;

            println!("{} -> {}", payload.display(), output.display());
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_encode() {
        let cli = Cli::try_parse_from([
            "wavhuff",
            "--sidecar-dir",
            "meta",
            "--sidecar-layout",
            "cwd",
            "encode",
            "a.wav",
            "a.bin",
            "--dtype",
            "complex128",
        ])
        .unwrap();
        assert_eq!(cli.sidecar_dir, PathBuf::from("meta"));
        assert_eq!(cli.sidecar_layout, SidecarLayout::WorkingDir);
        match cli.command {
            Command::Encode { input, dtype, .. } => {
                assert_eq!(input, PathBuf::from("a.wav"));
                assert_eq!(dtype, Some(DType::Complex128));
            }
            Command::Decode { .. } => panic!("expected encode"),
        }
    }

    #[test]
    fn test_rejects_unknown_dtype() {
        assert!(Cli::try_parse_from(["wavhuff", "decode", "a.bin", "a.wav", "--expect-dtype", "8"]).is_err());
    }
}
