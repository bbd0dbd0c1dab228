//! Owned data model for SDR device descriptions.
//!
//! These are the types a driver works with internally: numeric ranges,
//! keyword arguments (`key=value` maps) and descriptors for configurable
//! arguments. The `sdr-marshal` crate converts them to and from their flat
//! C representations.

#![deny(unsafe_code)]

mod arg_info;
pub mod kwargs;
mod range;

pub use arg_info::{ArgInfo, ArgInfoList, ArgType};
pub use kwargs::{Kwargs, KwargsList};
pub use range::{Range, RangeList};
