//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the toolkit:
//! - Math types for positions and colours
//! - Monotonic time sources
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
