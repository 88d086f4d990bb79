//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types, colors and clamping helpers
//! - Frame clocks (wall-clock and manual)
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
