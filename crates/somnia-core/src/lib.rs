//! # Somnia Core
//!
//! The pure logic behind the Somnia sleep monitor.
//!
//! One tick of the monitor is:
//!
//! ```text
//! ┌────────────────┐  Reading   ┌────────────────┐  StageResult  ┌──────────────┐
//! │ SignalSource   │ ─────────► │ classify()     │ ────────────► │ display      │
//! │ (UniformSource)│            │ (pure, total)  │               │ (apps/somnia)│
//! └────────────────┘            └────────────────┘               └──────────────┘
//! ```
//!
//! Nothing here keeps state between ticks. The classifier never fails; only
//! caller-supplied readings are validated (see [`Reading::new`]).
//!
//! ```
//! use somnia_core::{classify, SleepStage};
//!
//! assert_eq!(classify(9.0, 10.0).stage, SleepStage::Wake);
//! assert_eq!(classify(3.0, 90.0).stage, SleepStage::Rem);
//! ```

mod reading;
mod source;
mod stage;

pub use reading::{Field, MOTION_RANGE, NOISE_RANGE, Reading, ReadingError};
pub use source::{SignalSource, UniformSource};
pub use stage::{
    LIGHT_MOTION_THRESHOLD, Locale, ParseStageError, REM_NOISE_THRESHOLD, SleepStage, StageResult,
    WAKE_MOTION_THRESHOLD, classify,
};
