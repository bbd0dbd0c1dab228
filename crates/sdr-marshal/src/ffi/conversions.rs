//! Bidirectional conversions between C API types and Rust types that need
//! no allocation.

use sdr_types::{ArgType, Range};

use super::types::{SdrArgInfoType, SdrRange};

// ---------------------------------------------------------------------------
// SdrRange <-> Range
// ---------------------------------------------------------------------------

impl SdrRange {
    /// Convert from the owned [`Range`].
    pub fn from_rust(range: &Range) -> Self {
        Self {
            minimum: range.minimum(),
            maximum: range.maximum(),
            step: range.step(),
        }
    }

    /// Convert to the owned [`Range`].
    pub fn to_rust(self) -> Range {
        Range::with_step(self.minimum, self.maximum, self.step)
    }
}

// ---------------------------------------------------------------------------
// Enum conversions
// ---------------------------------------------------------------------------

impl SdrArgInfoType {
    pub fn to_rust(self) -> ArgType {
        match self {
            Self::Bool => ArgType::Bool,
            Self::Int => ArgType::Int,
            Self::Float => ArgType::Float,
            Self::String => ArgType::String,
        }
    }

    pub fn from_rust(arg_type: ArgType) -> Self {
        match arg_type {
            ArgType::Bool => Self::Bool,
            ArgType::Int => Self::Int,
            ArgType::Float => Self::Float,
            ArgType::String => Self::String,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
