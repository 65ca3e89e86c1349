use std::collections::HashSet;
use std::convert::Infallible;
use std::path::PathBuf;

use argscan_core::{CommandSchema, FlagOutcome, Flow, Scan, Visitor, visit};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Output format for structured results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "argscan")]
#[command(about = "Validate command schemas and scan argument lists")]
struct Cli {
    /// Emit debug logs on stderr (RUST_LOG overrides).
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate one or more schema files (.json, .yaml, .yml).
    Validate(ValidateArgs),
    /// Apply a schema to a token list and print the parsed result.
    Apply(ApplyArgs),
    /// Classify a token list without a schema and print each event.
    Scan(ScanArgs),
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema files to check.
    #[arg(required = true)]
    schemas: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct ApplyArgs {
    /// Schema file describing the command.
    #[arg(long)]
    schema: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Tokens to match, given after `--`.
    #[arg(last = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct ScanArgs {
    /// Flag names (without hyphens) that capture a value.
    #[arg(long = "capture", value_name = "NAME")]
    captures: Vec<String>,
    /// Flag names (without hyphens) that stop the scan.
    #[arg(long = "halt-on", value_name = "NAME")]
    halt_on: Vec<String>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Tokens to classify, given after `--`.
    #[arg(last = true)]
    tokens: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Apply(args) => run_apply(args),
        Command::Scan(args) => run_scan(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut failures = 0usize;

    for path in &args.schemas {
        let outcome = CommandSchema::load(path)
            .map_err(|err| err.to_string())
            .and_then(|schema| schema.validate_scoped().map_err(|err| err.to_string()));

        match outcome {
            Ok(()) => println!("{}: ok", path.display()),
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format!("{failures} schema file(s) failed validation"));
    }
    Ok(())
}

fn run_apply(args: ApplyArgs) -> Result<(), String> {
    let schema = CommandSchema::load(&args.schema)
        .map_err(|err| format!("Failed to load '{}': {err}", args.schema.display()))?;
    schema
        .validate_scoped()
        .map_err(|err| format!("Invalid schema '{}': {err}", args.schema.display()))?;
    let outline = schema.build();

    tracing::debug!(
        schema = %args.schema.display(),
        tokens = args.tokens.len(),
        "Applying outline"
    );
    let parsed = outline.apply_to(&args.tokens).map_err(|err| err.to_string())?;
    print!("{}", render(&parsed, args.format)?);
    Ok(())
}

/// One classified token, in scan order.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ScanEvent {
    Flag { name: String },
    Option { name: String, value: String },
    Argument { value: String },
}

#[derive(Debug, Serialize)]
struct ScanReport {
    halted: bool,
    events: Vec<ScanEvent>,
}

/// Answers flag questions from the `--capture` and `--halt-on` lists.
struct ScanRecorder {
    captures: HashSet<String>,
    halt_on: HashSet<String>,
    events: Vec<ScanEvent>,
}

impl Visitor for ScanRecorder {
    type Error = Infallible;

    fn visit_flag(&mut self, flag: &str) -> Result<FlagOutcome, Infallible> {
        if self.halt_on.contains(flag) {
            return Ok(FlagOutcome::Halt);
        }
        if self.captures.contains(flag) {
            return Ok(FlagOutcome::Option);
        }
        self.events.push(ScanEvent::Flag {
            name: flag.to_string(),
        });
        Ok(FlagOutcome::Flag)
    }

    fn visit_option(&mut self, option: &str, value: &str) -> Result<Flow, Infallible> {
        self.events.push(ScanEvent::Option {
            name: option.to_string(),
            value: value.to_string(),
        });
        Ok(Flow::Continue)
    }

    fn visit_argument(&mut self, argument: &str) -> Result<Flow, Infallible> {
        self.events.push(ScanEvent::Argument {
            value: argument.to_string(),
        });
        Ok(Flow::Continue)
    }
}

fn run_scan(args: ScanArgs) -> Result<(), String> {
    let mut recorder = ScanRecorder {
        captures: args.captures.into_iter().collect(),
        halt_on: args.halt_on.into_iter().collect(),
        events: Vec::new(),
    };

    let scan = match visit(&mut recorder, &args.tokens) {
        Ok(scan) => scan,
        Err(never) => match never {},
    };

    let report = ScanReport {
        halted: scan == Scan::Halted,
        events: recorder.events,
    };
    print!("{}", render(&report, args.format)?);
    Ok(())
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|mut raw| {
                raw.push('\n');
                raw
            })
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}
