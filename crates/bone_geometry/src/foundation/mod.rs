//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and operations
//! - Unit conventions for the attribute boundary
//! - Logging utilities
//! - Presentation colour

pub mod color;
pub mod logging;
pub mod math;
pub mod units;
