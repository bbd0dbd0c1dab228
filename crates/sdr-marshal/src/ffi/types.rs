//! C-compatible type definitions for the flat representation.
//!
//! All types here are `#[repr(C)]` and are safe to pass across FFI
//! boundaries. Field order is part of the ABI and must not change.

use std::ffi::c_char;
use std::ptr;

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

/// Error codes returned by C API functions.
///
/// `0` = success, negative = error.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdrError {
    /// Operation succeeded.
    None = 0,
    /// Null pointer passed to a function that requires non-null.
    NullPointer = -1,
    /// Internal error (panic caught at FFI boundary).
    Internal = -2,
    /// The allocator could not satisfy a request. Nothing was leaked.
    Allocation = -3,
    /// An argument descriptor had option and option-name arrays of
    /// different lengths.
    OptionCountMismatch = -4,
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A numeric range. Contains no pointers and needs no release.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SdrRange {
    pub minimum: f64,
    pub maximum: f64,
    pub step: f64,
}

// ---------------------------------------------------------------------------
// Keyword arguments
// ---------------------------------------------------------------------------

/// Flat key/value map: two parallel arrays of `size` NUL-terminated strings.
///
/// A zeroed value (`size == 0`, null arrays) is a valid empty map and may be
/// passed to `sdr_kwargs_set`. Release with `sdr_kwargs_clear`.
#[repr(C)]
#[derive(Debug)]
pub struct SdrKwargs {
    pub size: usize,
    pub keys: *mut *mut c_char,
    pub vals: *mut *mut c_char,
}

impl Default for SdrKwargs {
    fn default() -> Self {
        Self {
            size: 0,
            keys: ptr::null_mut(),
            vals: ptr::null_mut(),
        }
    }
}

// ---------------------------------------------------------------------------
// Argument descriptors
// ---------------------------------------------------------------------------

/// Value type of a configurable argument.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SdrArgInfoType {
    #[default]
    Bool = 0,
    Int = 1,
    Float = 2,
    String = 3,
}

/// Flat descriptor of a configurable argument.
///
/// `options` and `option_names` both hold `num_options` strings. Release with
/// `sdr_arg_info_clear`, which frees the five strings and both arrays.
#[repr(C)]
#[derive(Debug)]
pub struct SdrArgInfo {
    pub key: *mut c_char,
    pub value: *mut c_char,
    pub name: *mut c_char,
    pub description: *mut c_char,
    pub units: *mut c_char,
    pub type_: SdrArgInfoType,
    pub range: SdrRange,
    pub num_options: usize,
    pub options: *mut *mut c_char,
    pub option_names: *mut *mut c_char,
}

impl Default for SdrArgInfo {
    fn default() -> Self {
        Self {
            key: ptr::null_mut(),
            value: ptr::null_mut(),
            name: ptr::null_mut(),
            description: ptr::null_mut(),
            units: ptr::null_mut(),
            type_: SdrArgInfoType::Bool,
            range: SdrRange::default(),
            num_options: 0,
            options: ptr::null_mut(),
            option_names: ptr::null_mut(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::mem::offset_of;

    use super::*;

    #[test]
    fn range_layout_is_three_doubles() {
        assert_eq!(size_of::<SdrRange>(), 3 * size_of::<f64>());
        assert_eq!(offset_of!(SdrRange, minimum), 0);
        assert_eq!(offset_of!(SdrRange, maximum), 8);
        assert_eq!(offset_of!(SdrRange, step), 16);
    }

    #[test]
    fn kwargs_field_order() {
        let word = size_of::<usize>();
        assert_eq!(offset_of!(SdrKwargs, size), 0);
        assert_eq!(offset_of!(SdrKwargs, keys), word);
        assert_eq!(offset_of!(SdrKwargs, vals), 2 * word);
    }

    #[test]
    fn arg_info_field_order() {
        let offsets = [
            offset_of!(SdrArgInfo, key),
            offset_of!(SdrArgInfo, value),
            offset_of!(SdrArgInfo, name),
            offset_of!(SdrArgInfo, description),
            offset_of!(SdrArgInfo, units),
            offset_of!(SdrArgInfo, type_),
            offset_of!(SdrArgInfo, range),
            offset_of!(SdrArgInfo, num_options),
            offset_of!(SdrArgInfo, options),
            offset_of!(SdrArgInfo, option_names),
        ];
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn arg_info_type_codes() {
        assert_eq!(SdrArgInfoType::Bool as i32, 0);
        assert_eq!(SdrArgInfoType::Int as i32, 1);
        assert_eq!(SdrArgInfoType::Float as i32, 2);
        assert_eq!(SdrArgInfoType::String as i32, 3);
    }

    #[test]
    fn defaults_are_empty() {
        let kwargs = SdrKwargs::default();
        assert_eq!(kwargs.size, 0);
        assert!(kwargs.keys.is_null() && kwargs.vals.is_null());

        let info = SdrArgInfo::default();
        assert!(info.key.is_null());
        assert!(info.options.is_null() && info.option_names.is_null());
        assert_eq!(info.num_options, 0);
    }
}
