//! Utility functions and helpers.
//!
//! This module contains utility functions used throughout the application,
//! such as scaling byte counts into KB/MB/GB.

pub mod scale;

pub use scale::{GIB, KIB, MIB, ScaleUnit, ScaledSize, scale};
