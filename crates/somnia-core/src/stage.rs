//! # Stage Module
//!
//! The four-branch sleep stage rule and its presentation data.
//!
//! Rules are checked in priority order, first match wins:
//!
//! | # | Condition      | Stage |
//! |---|----------------|-------|
//! | 1 | motion > 8     | Wake  |
//! | 2 | motion > 3     | Light |
//! | 3 | noise > 50     | REM   |
//! | 4 | otherwise      | Deep  |
//!
//! All comparisons are strict, so a value sitting exactly on a threshold
//! falls through to the next rule.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Motion above this means the sleeper is awake.
pub const WAKE_MOTION_THRESHOLD: f64 = 8.0;

/// Motion above this (and not above the wake threshold) means light sleep.
pub const LIGHT_MOTION_THRESHOLD: f64 = 3.0;

/// With low motion, noise above this (dB) means REM sleep.
pub const REM_NOISE_THRESHOLD: f64 = 50.0;

// =============================================================================
// LOCALE
// =============================================================================

/// Language used for stage labels in rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ko,
}

// =============================================================================
// SLEEP STAGE
// =============================================================================

/// One of the four sleep stage categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SleepStage {
    Wake,
    Light,
    #[serde(rename = "REM")]
    Rem,
    Deep,
}

impl SleepStage {
    /// All stages in rule priority order.
    pub const ALL: [SleepStage; 4] = [Self::Wake, Self::Light, Self::Rem, Self::Deep];

    /// Apply the stage rule to a raw (motion, noise) pair.
    ///
    /// Total over every `f64`: NaN compares false everywhere and lands on
    /// `Deep`.
    #[must_use]
    pub fn from_signals(motion: f64, noise: f64) -> Self {
        if motion > WAKE_MOTION_THRESHOLD {
            Self::Wake
        } else if motion > LIGHT_MOTION_THRESHOLD {
            Self::Light
        } else if noise > REM_NOISE_THRESHOLD {
            Self::Rem
        } else {
            Self::Deep
        }
    }

    /// Glyph shown next to the label.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Wake => "👀",
            Self::Light => "🛌",
            Self::Rem => "🧠",
            Self::Deep => "😴",
        }
    }

    /// Hex color token for the label.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Wake => "#ff4b4b",
            Self::Light => "#ffa500",
            Self::Rem => "#bf00ff",
            Self::Deep => "#00c853",
        }
    }

    /// Human-readable label in the given locale.
    #[must_use]
    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, Self::Wake) => "Wake",
            (Locale::En, Self::Light) => "Light",
            (Locale::En, Self::Rem) => "REM",
            (Locale::En, Self::Deep) => "Deep",
            (Locale::Ko, Self::Wake) => "기상",
            (Locale::Ko, Self::Light) => "얕은 잠",
            (Locale::Ko, Self::Rem) => "렘 수면",
            (Locale::Ko, Self::Deep) => "깊은 잠",
        }
    }

    /// The rule that selects this stage, as text.
    #[must_use]
    pub fn rule(&self) -> &'static str {
        match self {
            Self::Wake => "motion > 8",
            Self::Light => "3 < motion <= 8",
            Self::Rem => "motion <= 3 and noise > 50",
            Self::Deep => "motion <= 3 and noise <= 50",
        }
    }
}

impl fmt::Display for SleepStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Locale::En))
    }
}

/// Error returned when parsing an unknown stage name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sleep stage: {0}")]
pub struct ParseStageError(pub String);

impl FromStr for SleepStage {
    type Err = ParseStageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.label(Locale::En).eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStageError(s.to_string()))
    }
}

// =============================================================================
// STAGE RESULT
// =============================================================================

/// The classified stage plus what the display needs to draw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageResult {
    pub stage: SleepStage,
    pub glyph: &'static str,
    pub color: &'static str,
}

impl From<SleepStage> for StageResult {
    fn from(stage: SleepStage) -> Self {
        Self {
            stage,
            glyph: stage.glyph(),
            color: stage.color(),
        }
    }
}

/// Classify a (motion, noise) pair.
///
/// Pure and total: identical inputs always give identical results.
#[must_use]
pub fn classify(motion: f64, noise: f64) -> StageResult {
    SleepStage::from_signals(motion, noise).into()
}

// =============================================================================
// TESTS
// =============================================================================
