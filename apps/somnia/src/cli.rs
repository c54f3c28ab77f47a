//! # CLI Module
//!
//! Command-line surface for Somnia.
//!
//! ```text
//! somnia monitor  [--interval-ms N] [--ticks N] [--seed N] [--json] [--locale en|ko]
//! somnia classify <MOTION> <NOISE> [--json] [--locale en|ko]
//! somnia stages   [--json] [--locale en|ko]
//! ```
//!
//! Each `cmd_*` function writes rendered output to the given writer so the
//! binary can pass stdout and tests can pass a buffer.

use crate::monitor::{Monitor, MonitorConfig, Tally};
use crate::render::{OutputFormat, Renderer};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use somnia_core::{Locale, Reading, SleepStage, StageResult, UniformSource};
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

pub use crate::error::CliError;

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "somnia", version, about = "Simulated sleep stage monitor")]
pub struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sample, classify and render a reading every interval.
    Monitor {
        /// Milliseconds between ticks.
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,

        /// Stop after this many ticks (default: run until Ctrl-C).
        #[arg(long)]
        ticks: Option<u64>,

        /// Seed for a reproducible simulation.
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Classify one explicit (motion, noise) pair.
    Classify {
        /// Motion intensity (non-negative).
        #[arg(allow_negative_numbers = true)]
        motion: f64,

        /// Ambient noise in dB (non-negative).
        #[arg(allow_negative_numbers = true)]
        noise: f64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print every stage with its glyph, color and rule.
    Stages {
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Output options shared by every command.
#[derive(Debug, Clone, Copy, Args)]
pub struct OutputArgs {
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Language of stage labels.
    #[arg(long, value_enum, default_value_t = LocaleArg::En)]
    pub locale: LocaleArg,
}

impl OutputArgs {
    pub fn renderer(&self) -> Renderer {
        Renderer::new(OutputFormat::from_json_flag(self.json), self.locale.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LocaleArg {
    En,
    Ko,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::En => Locale::En,
            LocaleArg::Ko => Locale::Ko,
        }
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Run the monitor loop until the tick limit or Ctrl-C.
pub async fn cmd_monitor<W: Write>(
    out: W,
    interval_ms: u64,
    ticks: Option<u64>,
    seed: Option<u64>,
    renderer: Renderer,
) -> Result<Tally, CliError> {
    let source = match seed {
        Some(seed) => {
            info!(seed, "using seeded simulation");
            UniformSource::seeded(seed)
        }
        None => UniformSource::from_entropy(),
    };

    let config = MonitorConfig {
        interval: Duration::from_millis(interval_ms),
        max_ticks: ticks,
        renderer,
    };

    Monitor::new(source, out, config)?.run().await
}

#[derive(Debug, Serialize)]
struct ClassifyOutput {
    reading: Reading,
    stage: SleepStage,
    label: &'static str,
    glyph: &'static str,
    color: &'static str,
    rule: &'static str,
}

/// Validate and classify one (motion, noise) pair.
pub fn cmd_classify<W: Write>(
    out: &mut W,
    motion: f64,
    noise: f64,
    json: bool,
    locale: Locale,
) -> Result<StageResult, CliError> {
    let reading = Reading::new(motion, noise)?;
    let result = reading.classify();
    debug!(motion, noise, stage = %result.stage, "classified");

    if json {
        let output = ClassifyOutput {
            reading,
            stage: result.stage,
            label: result.stage.label(locale),
            glyph: result.glyph,
            color: result.color,
            rule: result.stage.rule(),
        };
        serde_json::to_writer_pretty(&mut *out, &output)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}  {}", result.glyph, result.stage.label(locale))?;
        writeln!(out, "Rule:   {}", result.stage.rule())?;
        writeln!(out, "Color:  {}", result.color)?;
    }

    Ok(result)
}

/// Print the stage table.
pub fn cmd_stages<W: Write>(out: &mut W, renderer: Renderer) -> Result<(), CliError> {
    renderer.stage_table(out)
}

// =============================================================================
// TESTS
// =============================================================================
