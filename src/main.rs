//! shellscribe: generate documentation from annotated shell scripts.
//!
//! - **stdin mode**: `shellscribe < lib.sh` prints the rendering to stdout
//! - **file mode**: `shellscribe -o docs lib/ bin/*.sh` writes one file per script

use anyhow::{Context, Result};
use clap::{ArgAction, Parser as _};
use colored::Colorize;
use shellscribe::config::Config;
use shellscribe::discover::{self, SourceFile};
use shellscribe::parser::Parser;
use shellscribe::render::{self, Renderer};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(clap::Parser)]
#[command(
    name = "shellscribe",
    version,
    about = "Generate documentation from annotated shell scripts"
)]
struct Cli {
    /// Files, directories or glob patterns. If omitted, reads from stdin.
    inputs: Vec<String>,

    /// Configuration file (default: ./.scribeconf when present)
    #[arg(short = 'c', long)]
    config_file: Option<PathBuf>,

    /// Output directory (overrides doc_path)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default) or json
    #[arg(short = 'f', long)]
    format: Option<String>,

    /// More log output; repeat for more
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Omit the index
    #[arg(long)]
    no_toc: bool,

    /// Render @note/@warning/... alerts
    #[arg(long)]
    show_alerts: bool,

    /// Render shellcheck exceptions
    #[arg(long)]
    show_shellcheck: bool,
}

/// Outcome of documenting one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Ok,
    Skipped,
    Failed,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    ok: usize,
    skipped: usize,
    failed: usize,
}

impl Summary {
    fn record(&mut self, status: Status) {
        match status {
            Status::Ok => self.ok += 1,
            Status::Skipped => self.skipped += 1,
            Status::Failed => self.failed += 1,
        }
    }

    fn total(&self) -> usize {
        self.ok + self.skipped + self.failed
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Summary: {} OK, {} SKIPPED, {} FAILED (total: {})",
            self.ok,
            self.skipped,
            self.failed,
            self.total()
        )
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config, cli.verbose);

    if cli.inputs.is_empty() {
        stdin_mode(&config)?;
        return Ok(ExitCode::SUCCESS);
    }

    let summary = file_mode(&cli.inputs, &config)?;
    eprintln!("{}", summary);
    if summary.failed > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Defaults, then the config file, then CLI flags.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::discover(cli.config_file.as_deref())
        .context("failed to load configuration")?;

    if let Some(ref output) = cli.output {
        config.doc_path = output.clone();
    }
    if let Some(ref format) = cli.format {
        config.set("format", format)?;
    }
    if cli.no_toc {
        config.show_toc = false;
    }
    if cli.show_alerts {
        config.show_alerts = true;
    }
    if cli.show_shellcheck {
        config.show_shellcheck = true;
    }
    Ok(config)
}

/// `SHELLSCRIBE_LOG` wins; otherwise the configured level raised by `-v`.
fn init_tracing(config: &Config, verbose: u8) {
    let level = config.log_level.raised(verbose);
    let filter = EnvFilter::try_from_env("SHELLSCRIBE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("shellscribe={}", level.as_filter())));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

/// stdin mode: parse stdin, write the rendering to stdout.
fn stdin_mode(config: &Config) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let parser = Parser::new(config.parse_options());
    let doc = parser
        .parse_str(&input, "<stdin>")
        .context("failed to parse stdin")?;
    let renderer = render::create_renderer(config.format);
    print!("{}", renderer.render(&doc, config));
    Ok(())
}

/// file mode: document every input, keep going past failures.
fn file_mode(inputs: &[String], config: &Config) -> Result<Summary> {
    let files = discover::collect_inputs(inputs, config.traverse_symlinks)?;
    info!(count = files.len(), "documenting files");

    let parser = Parser::new(config.parse_options());
    let renderer = render::create_renderer(config.format);
    let mut summary = Summary::default();

    for file in &files {
        let status = match document_file(file, &parser, renderer.as_ref(), config) {
            Ok(status) => status,
            Err(err) => {
                eprintln!("{} {}: {:#}", "FAILED".red().bold(), file.path.display(), err);
                Status::Failed
            }
        };
        summary.record(status);
    }
    Ok(summary)
}

fn document_file(
    file: &SourceFile,
    parser: &Parser,
    renderer: &dyn Renderer,
    config: &Config,
) -> Result<Status> {
    let path = file.path.as_path();
    if discover::is_elf(path) {
        report_skip(path, "binary file");
        return Ok(Status::Skipped);
    }

    let doc = parser.parse_file(path)?;
    if doc.is_skipped() {
        report_skip(path, "@skip");
        return Ok(Status::Skipped);
    }

    let out_path = file.output_path(&config.doc_path, renderer.file_extension());
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    fs::write(&out_path, renderer.render(&doc, config))
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    debug!(blocks = doc.block_count(), "rendered");
    eprintln!(
        "{} {} -> {}",
        "OK".green().bold(),
        path.display(),
        out_path.display()
    );
    Ok(Status::Ok)
}

fn report_skip(path: &Path, reason: &str) {
    eprintln!("{} {} ({})", "SKIPPED".yellow().bold(), path.display(), reason);
}
