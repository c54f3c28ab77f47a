//! # Monitor Module
//!
//! The tick loop: sample, classify, render, once per interval.
//!
//! Ticks are independent. The only state kept across ticks is the
//! [`Tally`], which feeds the closing log line and is never persisted.

use crate::error::CliError;
use crate::render::Renderer;
use somnia_core::{SignalSource, SleepStage, StageResult};
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::io::Write;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

/// Default tick cadence.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Settings for one monitor run.
#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    /// Time between ticks.
    pub interval: Duration,
    /// Stop after this many ticks. `None` runs until cancelled.
    pub max_ticks: Option<u64>,
    pub renderer: Renderer,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            max_ticks: None,
            renderer: Renderer::default(),
        }
    }
}

/// Count of rendered ticks, per stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    ticks: u64,
    per_stage: BTreeMap<SleepStage, u64>,
}

impl Tally {
    fn record(&mut self, stage: SleepStage) {
        self.ticks = self.ticks.saturating_add(1);
        let count = self.per_stage.entry(stage).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Total ticks rendered.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Ticks that landed on `stage`.
    pub fn count(&self, stage: SleepStage) -> u64 {
        self.per_stage.get(&stage).copied().unwrap_or(0)
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = SleepStage::ALL
            .into_iter()
            .map(|stage| format!("{}={}", stage, self.count(stage)))
            .collect();
        f.write_str(&parts.join(" "))
    }
}

/// Drives a [`SignalSource`] through the classifier into a writer.
pub struct Monitor<S, W> {
    source: S,
    out: W,
    config: MonitorConfig,
    tally: Tally,
}

impl<S: SignalSource, W: Write> Monitor<S, W> {
    pub fn new(source: S, out: W, config: MonitorConfig) -> Result<Self, CliError> {
        if config.interval.is_zero() {
            return Err(CliError::ZeroInterval);
        }
        Ok(Self {
            source,
            out,
            config,
            tally: Tally::default(),
        })
    }

    /// Run one generate-classify-render cycle.
    pub fn tick(&mut self) -> Result<StageResult, CliError> {
        let reading = self.source.sample();
        let result = reading.classify();
        let tick = self.tally.ticks().saturating_add(1);

        debug!(
            tick,
            motion = reading.motion,
            noise = reading.noise,
            stage = %result.stage,
            "tick"
        );

        self.config
            .renderer
            .tick(&mut self.out, tick, &reading, &result)?;
        self.tally.record(result.stage);
        Ok(result)
    }

    fn finished(&self) -> bool {
        self.config
            .max_ticks
            .is_some_and(|max| self.tally.ticks() >= max)
    }

    /// Run until the tick limit is reached or `shutdown` completes.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<Tally, CliError>
    where
        F: Future<Output = ()>,
    {
        info!(
            interval_ms = self.config.interval.as_millis() as u64,
            max_ticks = ?self.config.max_ticks,
            "monitor started"
        );

        self.config.renderer.header(&mut self.out)?;

        let mut ticker = interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        while !self.finished() {
            tokio::select! {
                biased;
                () = &mut shutdown => {
                    info!("stop requested");
                    break;
                }
                _ = ticker.tick() => {
                    self.tick()?;
                }
            }
        }

        info!(ticks = self.tally.ticks(), tally = %self.tally, "monitor stopped");
        Ok(self.tally)
    }

    /// Run until the tick limit is reached or Ctrl-C is pressed.
    pub async fn run(self) -> Result<Tally, CliError> {
        self.run_until(ctrl_c()).await
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use somnia_core::{Reading, UniformSource};

    struct Fixed(Vec<Reading>);

    impl SignalSource for Fixed {
        fn sample(&mut self) -> Reading {
            self.0.pop().unwrap_or(Reading {
                motion: 0.0,
                noise: 0.0,
            })
        }
    }

    fn fast(max_ticks: Option<u64>) -> MonitorConfig {
        MonitorConfig {
            interval: Duration::from_millis(1),
            max_ticks,
            renderer: Renderer::default(),
        }
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = MonitorConfig {
            interval: Duration::ZERO,
            ..MonitorConfig::default()
        };
        let monitor = Monitor::new(UniformSource::seeded(1), Vec::new(), config);
        assert!(matches!(monitor, Err(CliError::ZeroInterval)));
    }

    #[test]
    fn tick_classifies_and_counts() {
        let source = Fixed(vec![
            Reading {
                motion: 1.0,
                noise: 70.0,
            },
            Reading {
                motion: 9.0,
                noise: 10.0,
            },
        ]);
        let mut monitor = Monitor::new(source, Vec::new(), fast(None)).ok();
        let monitor = monitor.as_mut();
        assert!(monitor.is_some());
        if let Some(monitor) = monitor {
            assert_eq!(monitor.tick().ok().map(|r| r.stage), Some(SleepStage::Wake));
            assert_eq!(monitor.tick().ok().map(|r| r.stage), Some(SleepStage::Rem));
            assert_eq!(monitor.tally.ticks(), 2);
            assert_eq!(monitor.tally.count(SleepStage::Wake), 1);
            assert_eq!(monitor.tally.count(SleepStage::Deep), 0);
        }
    }

    #[tokio::test]
    async fn run_stops_at_tick_limit() {
        let mut out = Vec::new();
        let monitor = Monitor::new(UniformSource::seeded(5), &mut out, fast(Some(3)));
        let tally = match monitor {
            Ok(m) => m.run_until(std::future::pending()).await.ok(),
            Err(_) => None,
        };
        assert_eq!(tally.map(|t| t.ticks()), Some(3));

        let text = String::from_utf8_lossy(&out);
        assert!(text.starts_with(crate::render::TITLE));
        assert_eq!(text.matches("Motion   [").count(), 3);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown() {
        let monitor = Monitor::new(UniformSource::seeded(5), Vec::new(), fast(None));
        let tally = match monitor {
            Ok(m) => m.run_until(async {}).await.ok(),
            Err(_) => None,
        };
        assert_eq!(tally.map(|t| t.ticks()), Some(0));
    }

    #[test]
    fn tally_display_lists_all_stages() {
        let mut tally = Tally::default();
        tally.record(SleepStage::Rem);
        tally.record(SleepStage::Rem);
        tally.record(SleepStage::Light);
        assert_eq!(tally.to_string(), "Wake=0 Light=1 REM=2 Deep=0");
    }
}
