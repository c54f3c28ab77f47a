//! # Render Module
//!
//! The display layer. Turns one classified tick into either a small text
//! panel or a single JSON line.
//!
//! Text panel for one tick:
//!
//! ```text
//! 🧠  REM
//! Motion   [██░░░░░░░░] 2.1
//! Noise dB [██████░░░░] 63.4
//! ```

use crate::error::CliError;
use serde::Serialize;
use somnia_core::{Locale, Reading, SleepStage, StageResult};
use std::io::Write;

/// Title line printed once before the first text tick.
pub const TITLE: &str = "🌙 Sleep AI Monitor (Simulation Mode)";

/// Number of cells in a gauge bar.
pub const GAUGE_WIDTH: usize = 10;

/// Output format for rendered ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// One rendered tick in JSON form.
#[derive(Debug, Serialize)]
struct TickRecord<'a> {
    tick: u64,
    reading: &'a Reading,
    stage: SleepStage,
    glyph: &'static str,
    color: &'static str,
    label: &'static str,
}

/// One row of the stage table in JSON form.
#[derive(Debug, Serialize)]
struct StageRow {
    stage: SleepStage,
    label: &'static str,
    glyph: &'static str,
    color: &'static str,
    rule: &'static str,
}

/// Renders ticks and tables in a fixed format and locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    format: OutputFormat,
    locale: Locale,
}

impl Renderer {
    pub fn new(format: OutputFormat, locale: Locale) -> Self {
        Self { format, locale }
    }

    /// Write the title line. JSON output has no header.
    pub fn header<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        if self.format == OutputFormat::Text {
            writeln!(out, "{TITLE}")?;
            writeln!(out)?;
        }
        Ok(())
    }

    /// Write one classified tick.
    pub fn tick<W: Write>(
        &self,
        out: &mut W,
        tick: u64,
        reading: &Reading,
        result: &StageResult,
    ) -> Result<(), CliError> {
        let label = result.stage.label(self.locale);
        match self.format {
            OutputFormat::Json => {
                let record = TickRecord {
                    tick,
                    reading,
                    stage: result.stage,
                    glyph: result.glyph,
                    color: result.color,
                    label,
                };
                serde_json::to_writer(&mut *out, &record)?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                writeln!(out, "{}  {}", result.glyph, label)?;
                writeln!(
                    out,
                    "Motion   [{}] {:.1}",
                    gauge_bar(reading.motion_gauge()),
                    reading.motion
                )?;
                writeln!(
                    out,
                    "Noise dB [{}] {:.1}",
                    gauge_bar(reading.noise_gauge()),
                    reading.noise
                )?;
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Write the table of all stages with their rules.
    pub fn stage_table<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<StageRow> = SleepStage::ALL
                    .into_iter()
                    .map(|stage| StageRow {
                        stage,
                        label: stage.label(self.locale),
                        glyph: stage.glyph(),
                        color: stage.color(),
                        rule: stage.rule(),
                    })
                    .collect();
                serde_json::to_writer_pretty(&mut *out, &rows)?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                for stage in SleepStage::ALL {
                    writeln!(
                        out,
                        "{}  {:<8} {}  {}",
                        stage.glyph(),
                        stage.label(self.locale),
                        stage.color(),
                        stage.rule()
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// Draw a `[0, 1]` ratio as a bar of [`GAUGE_WIDTH`] cells.
pub fn gauge_bar(ratio: f64) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * GAUGE_WIDTH as f64).round() as usize;
    let filled = filled.min(GAUGE_WIDTH);
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(GAUGE_WIDTH - filled));
    bar
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn render_tick(renderer: Renderer, reading: Reading) -> String {
        let mut buf = Vec::new();
        let result = reading.classify();
        let rendered = renderer.tick(&mut buf, 4, &reading, &result);
        assert!(rendered.is_ok());
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn gauge_bar_fill() {
        assert_eq!(gauge_bar(0.0), "░░░░░░░░░░");
        assert_eq!(gauge_bar(0.5), "█████░░░░░");
        assert_eq!(gauge_bar(1.0), "██████████");
        assert_eq!(gauge_bar(7.0), "██████████");
        assert_eq!(gauge_bar(f64::NAN).chars().count(), GAUGE_WIDTH);
    }

    #[test]
    fn text_tick_shows_glyph_label_and_gauges() {
        let reading = Reading {
            motion: 5.0,
            noise: 40.0,
        };
        let text = render_tick(Renderer::default(), reading);
        assert!(text.contains("🛌  Light"));
        assert!(text.contains("Motion   [█████░░░░░] 5.0"));
        assert!(text.contains("Noise dB [████░░░░░░] 40.0"));
    }

    #[test]
    fn text_tick_uses_locale() {
        let reading = Reading {
            motion: 1.0,
            noise: 20.0,
        };
        let text = render_tick(Renderer::new(OutputFormat::Text, Locale::Ko), reading);
        assert!(text.contains("😴  깊은 잠"));
    }

    #[test]
    fn json_tick_is_one_parseable_line() {
        let reading = Reading {
            motion: 1.0,
            noise: 70.0,
        };
        let line = render_tick(Renderer::new(OutputFormat::Json, Locale::En), reading);
        assert_eq!(line.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap_or_default();
        assert_eq!(value["tick"], 4);
        assert_eq!(value["stage"], "REM");
        assert_eq!(value["glyph"], "🧠");
        assert_eq!(value["color"], "#bf00ff");
        assert_eq!(value["reading"]["noise"], 70.0);
    }

    #[test]
    fn header_only_for_text() {
        let mut text = Vec::new();
        let mut json = Vec::new();
        assert!(Renderer::default().header(&mut text).is_ok());
        assert!(
            Renderer::new(OutputFormat::Json, Locale::En)
                .header(&mut json)
                .is_ok()
        );
        assert!(String::from_utf8_lossy(&text).starts_with(TITLE));
        assert!(json.is_empty());
    }

    #[test]
    fn stage_table_lists_every_stage() {
        let mut buf = Vec::new();
        assert!(Renderer::default().stage_table(&mut buf).is_ok());
        let text = String::from_utf8_lossy(&buf);
        assert_eq!(text.lines().count(), 4);
        for stage in SleepStage::ALL {
            assert!(text.contains(stage.rule()));
        }
    }

    #[test]
    fn json_stage_table_round_trips_rules() {
        let mut buf = Vec::new();
        let renderer = Renderer::new(OutputFormat::Json, Locale::En);
        assert!(renderer.stage_table(&mut buf).is_ok());
        let rows: Vec<serde_json::Value> = serde_json::from_slice(&buf).unwrap_or_default();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["stage"], "Wake");
        assert_eq!(rows[3]["rule"], SleepStage::Deep.rule());
    }
}
