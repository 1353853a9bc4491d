//! # fieldkit testkit
//!
//! Test utilities for fieldkit.
//!
//! This crate provides:
//! - Fixtures: a typed `Topic` model, sample data and a fixed localizer
//! - Property-based test generators using proptest
//! - Golden file helpers for JSON output
//!
//! ## Usage
//!
//! ```
//! use fieldkit_testkit::prelude::*;
//!
//! let topic = sample_topic();
//! assert_eq!(topic.title(), "Rust entities");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod golden;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::golden::*;
}

pub use fixtures::*;
pub use generators::*;
pub use golden::*;
