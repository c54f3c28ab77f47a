//! # Somnia Library
//!
//! This library exposes the Somnia modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod error;
pub mod monitor;
pub mod render;

// Re-export somnia_core for convenience
pub use somnia_core;
