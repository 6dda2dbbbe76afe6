use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use advlibesp_core::{
    DecodeError, DeviceProfile, IdentifierIndex, ProcessOptions, keys, lookup_indices,
    try_process,
};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glob::glob;
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("ADVLIBESP_BUILD_COMMIT"),
    ", ",
    env!("ADVLIBESP_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  advlibesp esp decode 55000a0701eba55602460905174f008001ffffffff4100a9 --stdout\n  advlibesp esp decode --input capture.txt -o packets.json\n  advlibesp esp decode --input capture.txt --profiles profiles.json --stdout --pretty";

#[derive(Parser, Debug)]
#[command(name = "advlibesp")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for EnOcean Serial Protocol (ESP3) packets.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on ESP3 packets captured from an EnOcean gateway.
    Esp {
        #[command(subcommand)]
        command: EspCommands,
    },
}

#[derive(Subcommand, Debug)]
enum EspCommands {
    /// Decode packets and write the results as a JSON array.
    #[command(alias = "process")]
    #[command(after_help = EXAMPLES)]
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Packets as hexadecimal strings
    packets: Vec<String>,

    /// Text file with one hex packet per line (glob patterns allowed)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if any packet is rejected
    #[arg(long)]
    strict: bool,

    /// List rejected packets after decoding
    #[arg(long)]
    list_rejected: bool,

    /// Omit header fields and telegram type from the output
    #[arg(long)]
    ignore_protocol_overhead: bool,

    /// Treat inputs as bare ERP1 telegrams (no sync byte or header)
    #[arg(long)]
    erp1_payload_only: bool,

    /// JSON file mapping device signatures to { "eepType": ... }
    #[arg(long)]
    profiles: Option<PathBuf>,

    /// JSON file mapping device signatures to URIs
    #[arg(long)]
    index: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Esp { command } => match command {
            EspCommands::Decode(args) => cmd_esp_decode(args),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

/// One packet to decode and where it came from.
#[derive(Debug)]
struct InputPacket {
    origin: String,
    hex: String,
}

#[derive(Debug)]
struct Rejection {
    origin: String,
    reason: DecodeError,
}

fn cmd_esp_decode(args: DecodeArgs) -> Result<(), CliError> {
    let input_file = args.input.as_ref().map(resolve_input_path).transpose()?;
    let mut packets = collect_arg_packets(&args.packets);
    if let Some(path) = input_file.as_ref() {
        packets.extend(read_input_file(path)?);
    }
    if packets.is_empty() {
        return Err(CliError::new(
            "no packets to decode",
            Some("pass hex packets as arguments or use --input".to_string()),
        ));
    }

    let report = if args.stdout {
        None
    } else {
        Some(args.report.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };
    if let (Some(report_path), Some(input_path)) = (report.as_ref(), input_file.as_ref()) {
        ensure_distinct_paths(report_path, input_path)?;
    }

    let options = ProcessOptions {
        ignore_protocol_overhead: args.ignore_protocol_overhead,
        is_erp1_payload_only: args.erp1_payload_only,
        device_profiles: match args.profiles.as_ref() {
            Some(path) => load_profiles(path)?,
            None => HashMap::new(),
        },
    };
    let index = args.index.as_ref().map(|path| load_index(path)).transpose()?;

    let (results, rejected) = decode_all(&packets, &options, index.as_ref());
    info!(
        packets = packets.len(),
        rejected = rejected.len(),
        "decoding finished"
    );
    let json = serialize_results(&results, args.pretty, args.compact)?;

    if let Some(report) = report.as_ref() {
        write_report(report, &json)?;
    } else {
        print!("{}", json);
    }

    if args.list_rejected && !args.quiet {
        print_rejected(&rejected);
    }
    if !args.quiet {
        if let Some(report) = report.as_ref() {
            eprintln!(
                "OK: {} packets decoded -> {}",
                results.len() - rejected.len(),
                report.display()
            );
        }
    }
    if args.strict && !rejected.is_empty() {
        return Err(CliError::new(
            "rejected packets detected",
            Some("use --list-rejected to inspect".to_string()),
        ));
    }
    Ok(())
}

fn collect_arg_packets(packets: &[String]) -> Vec<InputPacket> {
    packets
        .iter()
        .enumerate()
        .map(|(position, hex)| InputPacket {
            origin: format!("argument {}", position + 1),
            hex: hex.clone(),
        })
        .collect()
}

fn read_input_file(path: &Path) -> Result<Vec<InputPacket>, CliError> {
    if !path.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", path.display()),
            Some("use a text file with one hex packet per line".to_string()),
        ));
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    Ok(parse_packet_lines(&text, &path.display().to_string()))
}

/// One packet per line; blank lines and `#` comments are skipped.
fn parse_packet_lines(text: &str, label: &str) -> Vec<InputPacket> {
    text.lines()
        .enumerate()
        .filter_map(|(number, line)| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            Some(InputPacket {
                origin: format!("{}:{}", label, number + 1),
                hex: line.to_string(),
            })
        })
        .collect()
}

fn decode_all(
    packets: &[InputPacket],
    options: &ProcessOptions,
    index: Option<&HashMap<String, String>>,
) -> (Vec<Value>, Vec<Rejection>) {
    let indices: Vec<&dyn IdentifierIndex> = index
        .iter()
        .map(|index| *index as &dyn IdentifierIndex)
        .collect();
    let mut results = Vec::with_capacity(packets.len());
    let mut rejected = Vec::new();

    for packet in packets {
        match try_process(packet.hex.as_str(), &[], options) {
            Ok(mut decoded) => {
                let resolved = decoded
                    .device_ids()
                    .first()
                    .and_then(|id| lookup_indices(id, &indices));
                if let Some(uri) = resolved {
                    decoded.insert(keys::URI, uri);
                }
                results.push(Value::from(decoded));
            }
            Err(reason) => {
                debug!(origin = %packet.origin, error = %reason, "packet rejected");
                results.push(Value::Null);
                rejected.push(Rejection {
                    origin: packet.origin.clone(),
                    reason,
                });
            }
        }
    }

    (results, rejected)
}

fn load_profiles(path: &Path) -> Result<HashMap<String, DeviceProfile>, CliError> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profiles file: {}", path.display()))?;
    serde_json::from_str(&json).map_err(|err| {
        CliError::new(
            format!("invalid profiles file '{}': {}", path.display(), err),
            Some(r#"expected {"<id>/7": {"eepType": "A5-02-05"}}"#.to_string()),
        )
    })
}

fn load_index(path: &Path) -> Result<HashMap<String, String>, CliError> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read index file: {}", path.display()))?;
    serde_json::from_str(&json).map_err(|err| {
        CliError::new(
            format!("invalid index file '{}': {}", path.display(), err),
            Some(r#"expected {"<id>/7": "https://..."}"#.to_string()),
        )
    })
}

fn serialize_results(results: &[Value], pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(results)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(results)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn write_report(report: &Path, json: &str) -> Result<(), CliError> {
    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;
    Ok(())
}

fn print_rejected(rejected: &[Rejection]) {
    eprintln!("Rejected packets:");
    for rejection in rejected {
        eprintln!("  {}: {}", rejection.origin, rejection.reason);
    }
}

fn ensure_distinct_paths(report: &Path, input: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let report_dir = match report.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent),
        _ => fs::canonicalize("."),
    };
    // A missing output directory is created later and cannot alias the input.
    let Ok(report_dir) = report_dir else {
        return Ok(());
    };
    let file_name = report
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("report path must differ from input: {}", report.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        if !input.exists() {
            return Err(CliError::new(
                format!("input file not found: {}", input.display()),
                Some("use a text file with one hex packet per line".to_string()),
            ));
        }
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single input file, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>();
        message.push_str("; matches: ");
        message.push_str(&listed.join(", "));
        if matches.len() > 3 {
            message.push_str(", ...");
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
