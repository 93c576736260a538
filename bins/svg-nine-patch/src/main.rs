//! android-svg-nine-patch: create Android NinePatch images from SVGs.
//!
//! The input SVG must contain four paths with the ids `padding-x`,
//! `padding-y`, `stretch-x` and `stretch-y`. They can be placed anywhere in
//! the canvas (preferably outside) and the stroke must be at least one pixel
//! wide.

use clap::Parser;
use droidtools_cli::output::{self, Status};
use droidtools_cli::progress;
use droidtools_core::config::Config;
use droidtools_core::error::exit_codes;
use droidtools_image::{generate, InkscapeExporter};
use droidtools_telemetry::TelemetryConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "android-svg-nine-patch")]
#[command(about = "Create Android NinePatch images from SVGs")]
#[command(version)]
struct Cli {
    /// Source SVG with padding-x, padding-y, stretch-x and stretch-y paths
    input: PathBuf,

    /// Output PNG (conventionally ending in .9.png)
    output: PathBuf,

    /// Exported width in pixels, before the one-pixel guide frame
    width: u32,

    /// Exported height in pixels, before the one-pixel guide frame
    height: u32,

    /// Inkscape executable [default: from config, else "inkscape"]
    #[arg(long)]
    inkscape: Option<String>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            let code = if e.use_stderr() {
                exit_codes::FAILURE
            } else {
                exit_codes::SUCCESS
            };
            std::process::exit(code);
        }
    };

    if cli.no_color {
        output::disable_colors();
    }

    let mut telemetry = TelemetryConfig::from_verbosity(cli.verbose, cli.quiet);
    if cli.no_color {
        telemetry = telemetry.without_ansi();
    }
    droidtools_telemetry::init_with_config(telemetry)?;

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Status::failure(&e);
            std::process::exit(e.exit_code());
        }
    };

    let program = cli
        .inkscape
        .clone()
        .unwrap_or_else(|| config.schema.nine_patch.inkscape.clone());
    let exporter = InkscapeExporter::new(program);

    let pb = if cli.quiet {
        progress::hidden()
    } else {
        progress::spinner(&format!("Exporting {}...", cli.input.display()))
    };

    let timer = droidtools_telemetry::Timer::start("nine-patch");
    let result = generate(&cli.input, &cli.output, cli.width, cli.height, &exporter);
    timer.stop();

    match result {
        Ok(scaled) => {
            progress::finish_success(&pb, &format!("Exported {}", cli.output.display()));
            if !cli.quiet {
                Status::success(&format!(
                    "{} ({}x{} + guides, scale {:.3}x{:.3})",
                    cli.output.display(),
                    scaled.width(),
                    scaled.height(),
                    scaled.scale_ratio_x(),
                    scaled.scale_ratio_y()
                ));
            }
            Ok(())
        }
        Err(e) => {
            progress::finish_error(&pb, "Export failed");
            Status::error(&e.to_string());
            std::process::exit(exit_codes::FAILURE);
        }
    }
}
