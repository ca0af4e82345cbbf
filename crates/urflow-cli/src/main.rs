//! urflow operator CLI.
//!
//! - `urflow encode` - turn a payload file into a stream of part strings
//! - `urflow decode` - reassemble a payload from scanned part strings
//!
//! Part strings go to stdout, one per line; everything else (logs, progress)
//! goes to stderr so the output can be piped straight into a renderer.

#![forbid(unsafe_code)]

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;

use urflow_fountain::FountainConfig;
use urflow_ur::{Ur, UrDecoder, UrEncoder};

/// Animated-code part stream encoder/decoder.
#[derive(Parser)]
#[command(name = "urflow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a payload file into part strings.
    ///
    /// Emits one part per line: a single line for small payloads, otherwise
    /// a cyclic fountain stream capped at --count parts.
    Encode(EncodeArgs),

    /// Decode part strings back into the payload.
    ///
    /// Reads candidate lines (stdin by default), tolerating garbage and
    /// duplicates, and writes the reconstructed payload once complete.
    Decode(DecodeArgs),
}

#[derive(clap::Args)]
struct EncodeArgs {
    /// Payload file to encode.
    file: PathBuf,

    /// UR type tag for the stream.
    #[arg(long, default_value = "bytes")]
    ur_type: String,

    /// Maximum fragment length in bytes.
    #[arg(long, default_value_t = 100)]
    max_fragment_len: usize,

    /// Number of parts to emit. Defaults to one full pure cycle.
    #[arg(long)]
    count: Option<u32>,
}

#[derive(clap::Args)]
struct DecodeArgs {
    /// File of candidate part strings; stdin if omitted.
    file: Option<PathBuf>,

    /// Write the payload here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Logs to stderr so stdout stays clean for part strings / payload bytes.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(args) => encode(&args),
        Commands::Decode(args) => decode(&args),
    }
}

fn encode(args: &EncodeArgs) -> anyhow::Result<()> {
    let payload = fs::read(&args.file)
        .with_context(|| format!("reading payload from {}", args.file.display()))?;

    let config = FountainConfig {
        max_fragment_len: args.max_fragment_len,
    };
    let ur = Ur::from_payload(args.ur_type.clone(), &payload)?;
    let mut encoder = UrEncoder::new(ur, &config)?;

    let count = args.count.unwrap_or_else(|| {
        if encoder.is_single_part() {
            1
        } else {
            encoder.fragment_count()
        }
    });
    info!(
        payload_len = payload.len(),
        fragments = encoder.fragment_count(),
        count,
        "encoding part stream"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for _ in 0..count {
        writeln!(out, "{}", encoder.next_part()?)?;
    }

    Ok(())
}

fn decode(args: &DecodeArgs) -> anyhow::Result<()> {
    let reader: Box<dyn BufRead> = match &args.file {
        Some(path) => Box::new(io::BufReader::new(
            fs::File::open(path)
                .with_context(|| format!("reading part strings from {}", path.display()))?,
        )),
        None => Box::new(io::BufReader::new(io::stdin())),
    };

    let mut decoder = UrDecoder::new();
    let mut lines = 0usize;
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        lines += 1;
        decoder.receive(line);
        if decoder.is_complete() {
            break;
        }
    }

    let Some(ur) = decoder.message()? else {
        bail!(
            "stream ended after {lines} lines without completing ({:.0}% recovered)",
            decoder.estimated_progress() * 100.0
        );
    };
    info!(
        ur_type = ur.ur_type(),
        received = decoder.received_count(),
        "payload reconstructed"
    );

    let payload = ur.payload()?;
    match &args.output {
        Some(path) => fs::write(path, &payload)
            .with_context(|| format!("writing payload to {}", path.display()))?,
        None => io::stdout().write_all(&payload)?,
    }

    Ok(())
}
