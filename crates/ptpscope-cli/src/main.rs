use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glob::glob;

#[derive(Parser, Debug)]
#[command(name = "ptpscope")]
#[command(version)]
#[command(
    about = "Offline analyzer for captured PTP container traces (Canon extension aware).",
    long_about = None,
    after_help = "Examples:\n  ptpscope trace analyse usb_trace.bin -o report.json\n  ptpscope trace analyse --hex '0C0000000100021001000000' --stdout\n  ptpscope trace gen-code usb_trace.bin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on captured container traces (offline-first).
    Trace {
        #[command(subcommand)]
        command: TraceCommands,
    },
}

#[derive(Subcommand, Debug)]
enum TraceCommands {
    /// Analyse a trace and generate a versioned JSON report.
    #[command(alias = "analyze")]
    #[command(
        after_help = "Examples:\n  ptpscope trace analyse usb_trace.bin -o report.json\n  ptpscope trace analyze usb_trace.bin --stdout --pretty\n  ptpscope trace analyse --hex '0C0000000100021001000000' --stdout"
    )]
    Analyse {
        #[command(flatten)]
        trace: TraceInput,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
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
    },

    /// Emit C #define lines for the operation codes observed in a trace.
    #[command(name = "gen-code")]
    GenCode {
        #[command(flatten)]
        trace: TraceInput,

        /// Output path for the generated block (defaults to stdout)
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

#[derive(Args, Debug)]
struct TraceInput {
    /// Path to a .bin or .ptp capture file
    #[arg(required_unless_present = "hex", conflicts_with = "hex")]
    input: Option<PathBuf>,

    /// Inline hex dump of the trace (whitespace and 0x prefixes allowed)
    #[arg(long, value_name = "HEX")]
    hex: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Trace { command } => match command {
            TraceCommands::Analyse {
                trace,
                report,
                stdout,
                pretty,
                compact,
                quiet,
            } => cmd_trace_analyse(trace, report, stdout, pretty, compact, quiet),
            TraceCommands::GenCode { trace, out, quiet } => cmd_trace_gen_code(trace, out, quiet),
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
        CliError::new(err.to_string(), None)
    }
}

fn cmd_trace_analyse(
    trace: TraceInput,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let (data, input_path) = load_trace(&trace)?;

    let mut rep = ptpscope_core::analyze_trace(&data);
    rep.input.path = input_path;
    let json = serialize_report(&rep, pretty, compact)?;

    if stdout {
        print!("{}", json);
        return Ok(());
    }

    let report = report.expect("report required when not using stdout");
    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    if !quiet {
        eprintln!("OK: report written -> {}", report.display());
    }
    Ok(())
}

fn cmd_trace_gen_code(
    trace: TraceInput,
    out: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let (data, _) = load_trace(&trace)?;

    let walk = ptpscope_core::walk_trace(&data);
    let containers: Vec<ptpscope_core::Container> = walk
        .containers
        .into_iter()
        .map(|decoded| decoded.container)
        .collect();
    let code = ptpscope_core::generate_operation_defines(&containers);

    match out {
        None => print!("{}", code),
        Some(out) => {
            fs::write(&out, code)
                .with_context(|| format!("Failed to write generated code: {}", out.display()))?;
            if !quiet {
                eprintln!("OK: generated code written -> {}", out.display());
            }
        }
    }
    Ok(())
}

fn load_trace(trace: &TraceInput) -> Result<(Vec<u8>, Option<String>), CliError> {
    if let Some(hex) = trace.hex.as_deref() {
        let data = ptpscope_core::parse_hex_trace(hex).map_err(|err| {
            CliError::new(
                format!("invalid hex trace: {}", err),
                Some("pass pairs of hex digits; whitespace and 0x prefixes are allowed".to_string()),
            )
        })?;
        return Ok((data, None));
    }

    let input = trace
        .input
        .as_ref()
        .expect("clap requires input when --hex is absent");
    let resolved_input = resolve_input_path(input)?;
    validate_input_file(&resolved_input)?;
    let data = ptpscope_core::read_trace_file(&resolved_input).map_err(|err| {
        CliError::new(
            format!(
                "failed to read trace file {}: {}",
                resolved_input.display(),
                err
            ),
            None,
        )
    })?;
    Ok((data, Some(resolved_input.display().to_string())))
}

fn serialize_report(
    rep: &ptpscope_core::Report,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .bin or .ptp capture file, or --hex".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .bin or .ptp capture file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "bin" && ext != "ptp" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .bin or .ptp capture file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
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
            Some("check the path or quote the pattern; expected .bin or .ptp".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single capture file, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches.iter().take(3).collect::<Vec<_>>();
        if !listed.is_empty() {
            let mut details = String::new();
            details.push_str("; matches: ");
            details.push_str(
                &listed
                    .into_iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            if matches.len() > 3 {
                details.push_str(", ...");
            }
            message.push_str(&details);
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
