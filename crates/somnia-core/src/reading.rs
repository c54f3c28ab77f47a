//! # Reading
//!
//! One sampled (motion, noise) pair for a tick.

use crate::stage::{StageResult, classify};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Range the simulated motion intensity is drawn from.
pub const MOTION_RANGE: Range<f64> = 0.0..10.0;

/// Range the simulated ambient noise level (dB) is drawn from.
pub const NOISE_RANGE: Range<f64> = 20.0..80.0;

/// Full-scale value of the motion gauge.
const MOTION_GAUGE_SCALE: f64 = 10.0;

/// Full-scale value of the noise gauge (dB).
const NOISE_GAUGE_SCALE: f64 = 100.0;

/// Which half of a reading a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Motion,
    Noise,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Motion => f.write_str("motion"),
            Self::Noise => f.write_str("noise"),
        }
    }
}

/// Precondition violations for caller-supplied readings.
///
/// Values are reported as-is; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ReadingError {
    /// The value is NaN or infinite.
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: Field, value: f64 },

    /// The value is below zero.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: Field, value: f64 },
}

/// A single (motion, noise) sample.
///
/// Readings are created fresh every tick and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Motion intensity; the simulation draws it from [`MOTION_RANGE`].
    pub motion: f64,
    /// Ambient noise in dB; the simulation draws it from [`NOISE_RANGE`].
    pub noise: f64,
}

impl Reading {
    /// Create a validated reading.
    ///
    /// Both values must be finite and non-negative. Values outside the
    /// simulation ranges are accepted, since the classifier is total.
    pub fn new(motion: f64, noise: f64) -> Result<Self, ReadingError> {
        check(Field::Motion, motion)?;
        check(Field::Noise, noise)?;
        Ok(Self { motion, noise })
    }

    /// Create a reading without validation.
    ///
    /// Only for sources whose output already satisfies the precondition.
    pub(crate) fn new_unchecked(motion: f64, noise: f64) -> Self {
        Self { motion, noise }
    }

    /// Classify this reading.
    #[must_use]
    pub fn classify(&self) -> StageResult {
        classify(self.motion, self.noise)
    }

    /// Fill ratio of the motion gauge, clamped to `[0, 1]`.
    #[must_use]
    pub fn motion_gauge(&self) -> f64 {
        gauge(self.motion, MOTION_GAUGE_SCALE)
    }

    /// Fill ratio of the noise gauge, clamped to `[0, 1]`.
    #[must_use]
    pub fn noise_gauge(&self) -> f64 {
        gauge(self.noise, NOISE_GAUGE_SCALE)
    }
}

fn check(field: Field, value: f64) -> Result<(), ReadingError> {
    if !value.is_finite() {
        return Err(ReadingError::NonFinite { field, value });
    }
    if value < 0.0 {
        return Err(ReadingError::Negative { field, value });
    }
    Ok(())
}

fn gauge(value: f64, scale: f64) -> f64 {
    let ratio = value / scale;
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}

// =============================================================================
// TESTS
// =============================================================================
