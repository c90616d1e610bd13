//! OAT CLI
//!
//! Replays a recorded control-flow trace and checks it against the digest
//! published for it.

#![warn(missing_docs)]
#![warn(clippy::all)]

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use oat_core::Digest;
use oat_log::{Event, Record, TraceDecoder, TraceWriter};
use oat_verify::{compute_digest, EventObserver, NoopObserver, TraceVerifier, VerifyConfig};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status when the trace verifies
const EXIT_MATCH: u8 = 0;
/// Exit status when the digests differ
const EXIT_MISMATCH: u8 = 1;
/// Exit status when the trace is unreadable or malformed
const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "oat")]
#[command(about = "OAT - control-flow trace attestation verifier", long_about = None)]
struct Cli {
    /// Log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a trace against its published digest
    Verify {
        /// Path to trace file
        #[arg(short, long)]
        trace: PathBuf,
        /// Published digest (64 lowercase hex characters)
        #[arg(short, long)]
        claimed: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Do not narrate events
        #[arg(short, long)]
        quiet: bool,
        /// Log every event at debug level
        #[arg(long)]
        log_events: bool,
        /// Refuse traces larger than this many bytes
        #[arg(long)]
        max_bytes: Option<u64>,
    },
    /// List the events in a trace
    Inspect {
        /// Path to trace file
        #[arg(short, long)]
        trace: PathBuf,
    },
    /// Print the digest to publish for a trace
    Digest {
        /// Path to trace file
        #[arg(short, long)]
        trace: PathBuf,
    },
    /// Write a trace from textual events
    Record {
        /// Output path
        #[arg(short, long)]
        output: PathBuf,
        /// Events: branch:true|false, jump:<addr>, ret:<id>
        #[arg(value_parser = parse_record, required = true)]
        events: Vec<Record>,
    },
}

fn main() -> ExitCode {
    if let Err(err) = color_eyre::install() {
        eprintln!("Error: {err}");
        return ExitCode::from(EXIT_ERROR);
    }
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli.command) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("oat={level},oat_log={level},oat_verify={level}"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<u8> {
    match command {
        Commands::Verify {
            trace,
            claimed,
            json,
            quiet,
            log_events,
            max_bytes,
        } => {
            if !Digest::is_canonical_hex(&claimed) {
                tracing::warn!(
                    claimed = %claimed,
                    "claimed digest is not 64 lowercase hex characters; comparison is exact"
                );
            }
            let config = VerifyConfig::default()
                .with_log_events(log_events)
                .with_max_trace_bytes(max_bytes);
            let verifier = TraceVerifier::new().with_config(config);

            let narrate = !quiet && !json;
            let mut narrator = |event: &Event| println!("[{}] {}", event.offset, event);
            let mut silent = NoopObserver;
            let observer: &mut dyn EventObserver = if narrate { &mut narrator } else { &mut silent };

            if narrate {
                println!("--- REPLAYING TRACE ---");
            }
            let result = verifier
                .verify_file(&trace, &claimed, observer)
                .wrap_err_with(|| format!("verification of {} failed", trace.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!();
                println!("{result}");
            }
            Ok(if result.matched { EXIT_MATCH } else { EXIT_MISMATCH })
        }
        Commands::Inspect { trace } => {
            let data = read_trace(&trace)?;
            let mut count = 0usize;
            for event in TraceDecoder::new(&data) {
                let event = event.wrap_err_with(|| format!("{} is malformed", trace.display()))?;
                println!("[{}] {}", event.offset, event);
                count += 1;
            }
            println!("{count} events, {} bytes", data.len());
            Ok(EXIT_MATCH)
        }
        Commands::Digest { trace } => {
            let data = read_trace(&trace)?;
            let digest = compute_digest(&data).wrap_err_with(|| format!("{} is malformed", trace.display()))?;
            println!("{digest}");
            Ok(EXIT_MATCH)
        }
        Commands::Record { output, events } => {
            let file = std::fs::File::create(&output)
                .wrap_err_with(|| format!("cannot create {}", output.display()))?;
            let mut writer = TraceWriter::new(BufWriter::new(file));
            for record in &events {
                writer.record(record)?;
            }
            writer.flush()?;
            let mut sink = writer.into_inner();
            sink.flush()?;
            tracing::info!(path = %output.display(), records = events.len(), "trace written");

            let data = read_trace(&output)?;
            println!("{}", compute_digest(&data)?);
            Ok(EXIT_MATCH)
        }
    }
}

fn read_trace(path: &Path) -> Result<Vec<u8>> {
    let data = TraceVerifier::new().read_trace(path)?;
    Ok(data)
}

/// Parse `branch:true`, `jump:0x401000` or `ret:5`
fn parse_record(s: &str) -> std::result::Result<Record, String> {
    let (kind, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <kind>:<value>, got {s:?}"))?;
    match kind {
        "branch" => match value {
            "true" | "1" => Ok(Record::branch(true)),
            "false" | "0" => Ok(Record::branch(false)),
            _ => Err(format!("invalid branch outcome {value:?}")),
        },
        "jump" => parse_u64(value).map(Record::indirect_jump),
        "ret" => parse_u64(value)
            .and_then(|id| u32::try_from(id).map_err(|_| format!("function id {id} exceeds u32")))
            .map(Record::function_return),
        _ => Err(format!("unknown event kind {kind:?}")),
    }
}

fn parse_u64(value: &str) -> std::result::Result<u64, String> {
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|e| format!("invalid number {value:?}: {e}"))
}
