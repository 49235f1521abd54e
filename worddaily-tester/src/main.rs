mod reports;
mod runner;
mod scenario;
mod util;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use runner::{ScenarioResult, ScenarioRunner};
use scenario::list_scenarios;
use util::{expand_scenarios, ignored_calendar_zone, load_config, parse_start};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "worddaily-tester", version = "0.1.0")]
#[command(about = "Replays deterministic visit scenarios against the Word Daily streak engine")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Tracker config JSON; only `storage_key` applies, scenarios run on a simulated calendar
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated calendar date of the first visit in every scenario
    #[arg(long, default_value = "2024-01-01")]
    start: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    if args.report == ReportFormat::Console {
        announce_banner();
    }

    let config = load_config(args.config.as_deref())?;
    if let Some(zone) = ignored_calendar_zone(&config) {
        log::warn!("Ignoring configured calendar zone {zone:?}; scenarios use --start");
    }
    let start = parse_start(&args.start)?;
    let scenarios = expand_scenarios(&args.scenarios);
    log::info!(
        "Running {} scenario(s) from {start} with storage key `{}`",
        scenarios.len(),
        config.storage_key
    );

    let start_time = Instant::now();
    let runner = ScenarioRunner::new(start, config, args.verbose);
    let results = runner.run_all(&scenarios);

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:20} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "📚 Word Daily Streak Tester".bright_cyan().bold());
    println!("{}", "===========================".cyan());
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Console => {
            reports::write_console_report(output_target.writer(), results, start_time.elapsed())?;
        }
        ReportFormat::Json => reports::write_json_report(output_target.writer(), results)?,
        ReportFormat::Markdown => reports::write_markdown_report(output_target.writer(), results)?,
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}
