//! Helpers for native entry points that hand converted values to C.
//!
//! These follow the usual C shape: the array pointer is returned and its
//! length written through an out parameter. On failure nothing is left
//! allocated, the length is set to zero, and the error code says why.

use std::ffi::c_char;

use sdr_types::{ArgInfo, Kwargs, Range};

use crate::alloc::Heap;
use crate::arg_info::{to_flat_arg_info, to_flat_arg_info_list};
use crate::error::{AllocationFailure, MarshalError};
use crate::kwargs::{to_flat_kwargs, to_flat_kwargs_list};
use crate::numeric::{to_numeric_list, to_range_list};
use crate::owned::{FlatArray, Owned, Release};
use crate::text::{to_c_string, to_str_array};

use super::types::{SdrArgInfo, SdrError, SdrKwargs, SdrRange};

impl From<AllocationFailure> for SdrError {
    fn from(_: AllocationFailure) -> Self {
        Self::Allocation
    }
}

impl From<MarshalError> for SdrError {
    fn from(err: MarshalError) -> Self {
        match err {
            MarshalError::Allocation(_) => Self::Allocation,
            MarshalError::OptionCountMismatch { .. } => Self::OptionCountMismatch,
        }
    }
}

fn export_array<T: Release, E>(
    result: Result<Owned<FlatArray<T>>, E>,
    length: &mut usize,
) -> Result<*mut T, SdrError>
where
    SdrError: From<E>,
{
    *length = 0;
    let (ptr, len) = result?.into_raw().into_raw_parts();
    *length = len;
    Ok(ptr)
}

/// Export text. Release with `sdr_string_free`.
pub fn export_string(text: &str) -> Result<*mut c_char, SdrError> {
    Ok(to_c_string(text, Heap)?.into_raw())
}

/// Export a text sequence. Release with `sdr_strings_clear`.
pub fn export_strings<S: AsRef<str>>(
    strs: &[S],
    length: &mut usize,
) -> Result<*mut *mut c_char, SdrError> {
    export_array(to_str_array(strs, Heap), length)
}

/// Export doubles. Release with `sdr_f64_list_free`.
pub fn export_f64_list(values: &[f64], length: &mut usize) -> Result<*mut f64, SdrError> {
    export_array(to_numeric_list(values, Heap), length)
}

/// Export unsigned integers. Release with `sdr_u32_list_free`.
pub fn export_u32_list(values: &[u32], length: &mut usize) -> Result<*mut u32, SdrError> {
    export_array(to_numeric_list(values, Heap), length)
}

/// Export ranges. Release with `sdr_range_list_free`.
pub fn export_range_list(
    ranges: &[Range],
    length: &mut usize,
) -> Result<*mut SdrRange, SdrError> {
    export_array(to_range_list(ranges, Heap), length)
}

/// Export a map. Release with `sdr_kwargs_clear`.
pub fn export_kwargs(args: &Kwargs) -> Result<SdrKwargs, SdrError> {
    Ok(to_flat_kwargs(args, Heap)?.into_raw())
}

/// Export a list of maps. Release with `sdr_kwargs_list_clear`.
pub fn export_kwargs_list(
    list: &[Kwargs],
    length: &mut usize,
) -> Result<*mut SdrKwargs, SdrError> {
    export_array(to_flat_kwargs_list(list, Heap), length)
}

/// Export a descriptor. Release with `sdr_arg_info_clear`.
pub fn export_arg_info(info: &ArgInfo) -> Result<SdrArgInfo, SdrError> {
    Ok(to_flat_arg_info(info, Heap)?.into_raw())
}

/// Export a list of descriptors. Release with `sdr_arg_info_list_clear`.
pub fn export_arg_info_list(
    infos: &[ArgInfo],
    length: &mut usize,
) -> Result<*mut SdrArgInfo, SdrError> {
    export_array(to_flat_arg_info_list(infos, Heap), length)
}

#[cfg(test)]
mod tests {
    use sdr_types::ArgType;

    use super::*;
    use crate::ffi::functions::{
        sdr_arg_info_list_clear, sdr_f64_list_free, sdr_kwargs_list_clear, sdr_strings_clear,
    };

    #[test]
    fn strings_report_length() {
        let mut length = usize::MAX;
        let mut ptr = export_strings(&["a", "b"], &mut length).unwrap();
        assert_eq!(length, 2);
        sdr_strings_clear(&mut ptr, length);
        assert!(ptr.is_null());
    }

    #[test]
    fn f64_list_reports_length() {
        let mut length = 0;
        let ptr = export_f64_list(&[1.0, 2.0, 3.0], &mut length).unwrap();
        assert_eq!(length, 3);
        sdr_f64_list_free(ptr, length);
    }

    #[test]
    fn empty_kwargs_list_is_non_null() {
        let mut length = 7;
        let ptr = export_kwargs_list(&[], &mut length).unwrap();
        assert!(!ptr.is_null());
        assert_eq!(length, 0);
        sdr_kwargs_list_clear(ptr, length);
    }

    #[test]
    fn mismatch_maps_to_error_code_and_zero_length() {
        let mut info = ArgInfo::new("mode", ArgType::String);
        info.options = vec!["a".into()];
        let mut length = 5;
        let result = export_arg_info_list(&[info], &mut length);
        assert_eq!(result, Err(SdrError::OptionCountMismatch));
        assert_eq!(length, 0);
    }

    #[test]
    fn arg_info_list_exports() {
        let infos = vec![ArgInfo::new("a", ArgType::Bool), ArgInfo::new("b", ArgType::Int)];
        let mut length = 0;
        let ptr = export_arg_info_list(&infos, &mut length).unwrap();
        assert_eq!(length, 2);
        sdr_arg_info_list_clear(ptr, length);
    }

    #[test]
    fn error_codes() {
        assert_eq!(SdrError::from(AllocationFailure), SdrError::Allocation);
        assert_eq!(
            SdrError::from(MarshalError::Allocation(AllocationFailure)),
            SdrError::Allocation
        );
    }
}
