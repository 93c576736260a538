//! check-translations
//!
//! Makes sure that every translated `strings.xml` is synchronized with the
//! default-language one: prints, per candidate file, the keys it is missing
//! and the keys the baseline does not define.

use clap::{Parser, ValueEnum};
use droidtools_android::translations::{Auditor, CandidateFailure, JsonAuditOutput};
use droidtools_cli::output::{self, Status};
use droidtools_core::config::{CandidateErrorPolicy, Config, UnnamedEntryPolicy};
use droidtools_core::error::{exit_codes, Error, Result};
use droidtools_core::file_scanner::scan_translated_strings;
use droidtools_telemetry::TelemetryConfig;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Report missing and superfluous Android string translations
#[derive(Parser)]
#[command(name = "check-translations")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Translated strings.xml files to check, in report order
    candidates: Vec<PathBuf>,

    /// Default-language strings.xml [default: res/values/strings.xml]
    #[arg(short, long)]
    baseline: Option<PathBuf>,

    /// Also check every <res_dir>/values-*/strings.xml
    #[arg(short, long)]
    discover: bool,

    /// Report unreadable candidates and continue with the rest
    #[arg(short, long)]
    keep_going: bool,

    /// Reject <string> elements without a name attribute
    #[arg(long)]
    strict: bool,

    /// Exit with status 2 when any candidate is out of sync
    #[arg(long)]
    fail_on_diff: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Effective settings after merging config file and flags
struct Settings {
    baseline: PathBuf,
    candidates: Vec<PathBuf>,
    on_candidate_error: CandidateErrorPolicy,
    unnamed_entries: UnnamedEntryPolicy,
}

impl Settings {
    fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let translations = &config.schema.translations;

        let mut candidates = cli.candidates.clone();
        if cli.discover {
            let res_dir = Path::new(&config.schema.general.res_dir);
            let found = scan_translated_strings(res_dir)?;
            tracing::info!(res_dir = %res_dir.display(), found = found.len(), "discovered candidates");
            candidates.extend(found.into_iter().filter(|p| !cli.candidates.contains(p)));
        }

        Ok(Self {
            baseline: cli
                .baseline
                .clone()
                .unwrap_or_else(|| PathBuf::from(&translations.baseline)),
            candidates,
            on_candidate_error: if cli.keep_going {
                CandidateErrorPolicy::Continue
            } else {
                translations.on_candidate_error
            },
            unnamed_entries: if cli.strict {
                UnnamedEntryPolicy::Reject
            } else {
                translations.unnamed_entries
            },
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        output::disable_colors();
    }

    let mut telemetry = TelemetryConfig::from_verbosity(cli.verbose, cli.quiet);
    if cli.no_color {
        telemetry = telemetry.without_ansi();
    }
    if let Err(e) = droidtools_telemetry::init_with_config(telemetry) {
        Status::warning(&e.to_string());
    }

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            Status::failure(&e);
            e.exit_code()
        }
    };

    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn run(cli: &Cli) -> Result<i32> {
    let config = Config::load(cli.config.as_deref())?;
    let settings = Settings::resolve(cli, &config)?;

    droidtools_telemetry::timed_span!("audit", candidates = settings.candidates.len());

    let auditor = Auditor::open(&settings.baseline, settings.unnamed_entries)?;

    let (summary, json) = match cli.format {
        Format::Text => (run_text(&auditor, &settings)?, None),
        Format::Json => {
            let (summary, output) = run_json(&auditor, &settings)?;
            (summary, Some(output))
        }
    };

    if let Some(output) = json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    if summary.failed > 0 {
        Status::error(&format!(
            "{} could not be checked",
            output::format_count(summary.failed, "candidate", "candidates")
        ));
        return Ok(exit_codes::FAILURE);
    }
    if cli.fail_on_diff && summary.out_of_sync > 0 {
        return Ok(exit_codes::VALIDATION_ERROR);
    }
    Ok(exit_codes::SUCCESS)
}

fn run_text(
    auditor: &Auditor,
    settings: &Settings,
) -> Result<droidtools_android::AuditSummary> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    auditor.run(
        &settings.candidates,
        settings.on_candidate_error,
        |report| {
            report.write_text(&mut out)?;
            out.flush().map_err(Error::from)
        },
        |candidate, error| {
            Status::error(&format!("Skipping {}", candidate.display()));
            Status::failure(error);
        },
    )
}

fn run_json(
    auditor: &Auditor,
    settings: &Settings,
) -> Result<(droidtools_android::AuditSummary, JsonAuditOutput)> {
    let mut reports = Vec::new();
    let mut failures = Vec::new();

    let summary = auditor.run(
        &settings.candidates,
        settings.on_candidate_error,
        |report| {
            reports.push(report.clone());
            Ok(())
        },
        |candidate, error| {
            failures.push(CandidateFailure {
                candidate: candidate.to_path_buf(),
                error: error.to_report(),
            });
        },
    )?;

    let output = JsonAuditOutput {
        baseline: auditor.baseline_path().to_path_buf(),
        baseline_keys: auditor.baseline().len(),
        reports,
        failures,
    };

    Ok((summary, output))
}
