//! Property-based test framework for the SDR marshaling layer.
//!
//! Provides generators for every value of the SDR data model, shaped so
//! that a flat round trip is expected to reproduce them exactly.
//!
//! # Usage
//!
//! ```ignore
//! use sdr_proptest::generators::*;
//! use test_strategy::proptest;
//!
//! #[proptest]
//! fn my_test(#[strategy(arg_info())] info: sdr_types::ArgInfo) {
//!     assert_eq!(info.options.len(), info.option_names.len());
//! }
//! ```

pub mod generators;

pub use proptest;
pub use test_strategy;
