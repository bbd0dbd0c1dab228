//! Exported `extern "C"` functions for the flat representation.
//!
//! # Symbol prefix
//!
//! All public symbols use the `sdr_` prefix.

use std::ffi::c_char;
use std::ptr;

use sdr_types::kwargs::{from_markup, to_markup};

use crate::alloc::Heap;
use crate::kwargs::{from_flat_kwargs, kwargs_get, kwargs_set, to_flat_kwargs};
use crate::owned::{Release, release_array};
use crate::text::{from_c_string, to_c_string};

use super::panic_guard::{ffi_guard, ffi_guard_ptr, ffi_guard_void};
use super::types::{SdrArgInfo, SdrError, SdrKwargs, SdrRange};

// ─── Version ─────────────────────────────────────────────────────────

/// Returns a pointer to a static null-terminated version string.
///
/// The returned pointer is valid for the lifetime of the process.
#[unsafe(no_mangle)]
pub extern "C" fn sdr_version() -> *const c_char {
    // Safety: the byte string is a static literal with a trailing NUL.
    c"0.1.0".as_ptr()
}

// ─── Strings and lists ───────────────────────────────────────────────

/// Frees a string returned by this library. Passing `NULL` is a no-op.
#[unsafe(no_mangle)]
pub extern "C" fn sdr_string_free(s: *mut c_char) {
    ffi_guard_void! {
        let mut s = s;
        // Safety: the caller passes a string this library allocated.
        unsafe { s.release_in(&Heap) };
    }
}

/// Frees an array of `length` strings and sets `*elems` to `NULL`.
///
/// Passing `NULL` for `elems` or `*elems` is a no-op.
#[unsafe(no_mangle)]
pub extern "C" fn sdr_strings_clear(elems: *mut *mut *mut c_char, length: usize) {
    ffi_guard_void! {
        if elems.is_null() {
            return;
        }
        // Safety: the caller passes an array this library allocated with
        // `length` strings; `elems` itself is a valid pointer.
        unsafe { release_array(&mut *elems, length, &Heap) };
    }
}

/// Frees an array of `length` doubles.
#[unsafe(no_mangle)]
pub extern "C" fn sdr_f64_list_free(values: *mut f64, length: usize) {
    ffi_guard_void! {
        let mut values = values;
        // Safety: allocated by this library with `length` slots.
        unsafe { release_array(&mut values, length, &Heap) };
    }
}

/// Frees an array of `length` unsigned integers.
#[unsafe(no_mangle)]
pub extern "C" fn sdr_u32_list_free(values: *mut u32, length: usize) {
    ffi_guard_void! {
        let mut values = values;
        // Safety: allocated by this library with `length` slots.
        unsafe { release_array(&mut values, length, &Heap) };
    }
}

/// Frees an array of `length` ranges.
#[unsafe(no_mangle)]
pub extern "C" fn sdr_range_list_free(ranges: *mut SdrRange, length: usize) {
    ffi_guard_void! {
        let mut ranges = ranges;
        // Safety: allocated by this library with `length` slots.
        unsafe { release_array(&mut ranges, length, &Heap) };
    }
}

// ─── Keyword arguments ───────────────────────────────────────────────

/// Sets `key` to `val` in `args`, adding the key if it is new.
///
/// `args` may be a zeroed struct. On failure `args` is unchanged.
/// Returns `SdrError::NullPointer` if any argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn sdr_kwargs_set(
    args: *mut SdrKwargs,
    key: *const c_char,
    val: *const c_char,
) -> SdrError {
    ffi_guard! {
        if args.is_null() || key.is_null() || val.is_null() {
            return SdrError::NullPointer;
        }
        // Safety: the caller guarantees valid, unaliased pointers.
        let (args, key, val) = unsafe { (&mut *args, from_c_string(key), from_c_string(val)) };
        // Safety: `args` is zeroed or was built by this library.
        match unsafe { kwargs_set(args, &key, &val, &Heap) } {
            Ok(()) => SdrError::None,
            Err(err) => err.into(),
        }
    }
}

/// Returns the value stored for `key`, or `NULL` if there is none.
///
/// The pointer is owned by `args` and valid until `args` is modified or
/// cleared.
#[unsafe(no_mangle)]
pub extern "C" fn sdr_kwargs_get(args: *const SdrKwargs, key: *const c_char) -> *const c_char {
    let found: *mut c_char = ffi_guard_ptr! {
        if args.is_null() || key.is_null() {
            return ptr::null_mut();
        }
        // Safety: the caller guarantees valid pointers.
        let (args, key) = unsafe { (&*args, from_c_string(key)) };
        // Safety: `args` was built by this library.
        match unsafe { kwargs_get(args, &key) } {
            Some(val) => val.as_ptr().cast_mut(),
            None => ptr::null_mut(),
        }
    };
    found
}

/// Frees every key and value in `args` and resets it to the zeroed state.
///
/// The struct storage itself belongs to the caller. Passing `NULL` is a
/// no-op.
#[unsafe(no_mangle)]
pub extern "C" fn sdr_kwargs_clear(args: *mut SdrKwargs) {
    ffi_guard_void! {
        if args.is_null() {
            return;
        }
        // Safety: the caller passes a map built by this library.
        unsafe { (*args).release_in(&Heap) };
    }
}

/// Frees an array of `length` maps, including each map's contents.
#[unsafe(no_mangle)]
pub extern "C" fn sdr_kwargs_list_clear(args: *mut SdrKwargs, length: usize) {
    ffi_guard_void! {
        let mut args = args;
        // Safety: allocated by this library with `length` maps.
        unsafe { release_array(&mut args, length, &Heap) };
    }
}

/// Parses `"key0=val0, key1=val1"` markup into `*out`.
///
/// `*out` is overwritten without being released first. On failure it is
/// left zeroed, which is safe to pass to `sdr_kwargs_clear`.
#[unsafe(no_mangle)]
pub extern "C" fn sdr_kwargs_from_string(markup: *const c_char, out: *mut SdrKwargs) -> SdrError {
    ffi_guard! {
        if markup.is_null() || out.is_null() {
            return SdrError::NullPointer;
        }
        // Safety: the caller passes a NUL-terminated string.
        let args = from_markup(&unsafe { from_c_string(markup) });
        let (flat, status) = match to_flat_kwargs(&args, Heap) {
            Ok(flat) => (flat.into_raw(), SdrError::None),
            Err(err) => (SdrKwargs::default(), err.into()),
        };
        // Safety: `out` is a valid pointer per the caller contract.
        unsafe { ptr::write(out, flat) };
        status
    }
}

/// Formats `args` as markup. Release the result with `sdr_string_free`.
///
/// Returns `NULL` if `args` is null or allocation fails.
#[unsafe(no_mangle)]
pub extern "C" fn sdr_kwargs_to_string(args: *const SdrKwargs) -> *mut c_char {
    ffi_guard_ptr! {
        if args.is_null() {
            return ptr::null_mut();
        }
        // Safety: the caller passes a map built by this library.
        let markup = to_markup(&unsafe { from_flat_kwargs(&*args) });
        match to_c_string(&markup, Heap) {
            Ok(s) => s.into_raw(),
            Err(_) => ptr::null_mut(),
        }
    }
}

// ─── Argument descriptors ────────────────────────────────────────────

/// Frees the strings and option arrays of `info` and resets it to the
/// zeroed state.
///
/// The struct storage itself belongs to the caller. Passing `NULL` is a
/// no-op.
#[unsafe(no_mangle)]
pub extern "C" fn sdr_arg_info_clear(info: *mut SdrArgInfo) {
    ffi_guard_void! {
        if info.is_null() {
            return;
        }
        // Safety: the caller passes a descriptor built by this library.
        unsafe { (*info).release_in(&Heap) };
    }
}

/// Frees an array of `length` descriptors, including each one's contents.
#[unsafe(no_mangle)]
pub extern "C" fn sdr_arg_info_list_clear(info: *mut SdrArgInfo, length: usize) {
    ffi_guard_void! {
        let mut info = info;
        // Safety: allocated by this library with `length` descriptors.
        unsafe { release_array(&mut info, length, &Heap) };
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::ffi::CStr;

    use sdr_types::{ArgInfo, ArgType};

    use super::*;
    use crate::ffi::export::{export_arg_info, export_kwargs, export_range_list, export_string};

    fn c_str<'a>(ptr: *const c_char) -> &'a str {
        assert!(!ptr.is_null());
        // Safety: test strings come from this library.
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap()
    }

    #[test]
    fn version_returns_non_null() {
        let ptr = sdr_version();
        assert!(!ptr.is_null());
        assert_eq!(c_str(ptr), "0.1.0");
    }

    #[test]
    fn null_releases_are_safe() {
        sdr_string_free(ptr::null_mut());
        sdr_strings_clear(ptr::null_mut(), 3);
        sdr_f64_list_free(ptr::null_mut(), 3);
        sdr_u32_list_free(ptr::null_mut(), 3);
        sdr_range_list_free(ptr::null_mut(), 3);
        sdr_kwargs_clear(ptr::null_mut());
        sdr_kwargs_list_clear(ptr::null_mut(), 3);
        sdr_arg_info_clear(ptr::null_mut());
        sdr_arg_info_list_clear(ptr::null_mut(), 3);
    }

    #[test]
    fn string_free_accepts_exported_string() {
        let s = export_string("LNA").unwrap();
        assert_eq!(c_str(s), "LNA");
        sdr_string_free(s);
    }

    #[test]
    fn kwargs_set_get_clear() {
        let mut args = SdrKwargs::default();
        assert_eq!(sdr_kwargs_set(&mut args, c"driver".as_ptr(), c"rtlsdr".as_ptr()), SdrError::None);
        assert_eq!(sdr_kwargs_set(&mut args, c"serial".as_ptr(), c"0001".as_ptr()), SdrError::None);
        assert_eq!(sdr_kwargs_set(&mut args, c"driver".as_ptr(), c"airspy".as_ptr()), SdrError::None);
        assert_eq!(args.size, 2);

        assert_eq!(c_str(sdr_kwargs_get(&args, c"driver".as_ptr())), "airspy");
        assert!(sdr_kwargs_get(&args, c"label".as_ptr()).is_null());

        sdr_kwargs_clear(&mut args);
        assert_eq!(args.size, 0);
        assert!(args.keys.is_null() && args.vals.is_null());
    }

    #[test]
    fn kwargs_set_null_returns_error() {
        let mut args = SdrKwargs::default();
        assert_eq!(sdr_kwargs_set(ptr::null_mut(), c"k".as_ptr(), c"v".as_ptr()), SdrError::NullPointer);
        assert_eq!(sdr_kwargs_set(&mut args, ptr::null(), c"v".as_ptr()), SdrError::NullPointer);
        assert_eq!(sdr_kwargs_set(&mut args, c"k".as_ptr(), ptr::null()), SdrError::NullPointer);
        assert!(sdr_kwargs_get(ptr::null(), c"k".as_ptr()).is_null());
    }

    #[test]
    fn kwargs_markup_roundtrip() {
        let mut args = SdrKwargs::default();
        let err = sdr_kwargs_from_string(c"rate=2000000, format=CF32".as_ptr(), &mut args);
        assert_eq!(err, SdrError::None);
        assert_eq!(args.size, 2);
        assert_eq!(c_str(sdr_kwargs_get(&args, c"format".as_ptr())), "CF32");

        let markup = sdr_kwargs_to_string(&args);
        assert_eq!(c_str(markup), "format=CF32, rate=2000000");
        sdr_string_free(markup);
        sdr_kwargs_clear(&mut args);
    }

    #[test]
    fn kwargs_from_string_null_returns_error() {
        let mut args = SdrKwargs::default();
        assert_eq!(sdr_kwargs_from_string(ptr::null(), &mut args), SdrError::NullPointer);
        assert_eq!(sdr_kwargs_from_string(c"a=b".as_ptr(), ptr::null_mut()), SdrError::NullPointer);
        assert!(sdr_kwargs_to_string(ptr::null()).is_null());
    }

    #[test]
    fn exported_kwargs_clear() {
        let mut args = export_kwargs(&sdr_types::kwargs::from_markup("driver=hackrf")).unwrap();
        assert_eq!(c_str(sdr_kwargs_get(&args, c"driver".as_ptr())), "hackrf");
        sdr_kwargs_clear(&mut args);
        // Clearing twice through the same struct is harmless: it was zeroed.
        sdr_kwargs_clear(&mut args);
    }

    #[test]
    fn exported_arg_info_clear() {
        let mut info = ArgInfo::new("biastee", ArgType::Bool);
        info.value = "false".into();
        info.options = vec!["true".into(), "false".into()];
        info.option_names = vec!["On".into(), "Off".into()];

        let mut flat = export_arg_info(&info).unwrap();
        assert_eq!(c_str(flat.key), "biastee");
        assert_eq!(flat.num_options, 2);
        sdr_arg_info_clear(&mut flat);
        assert!(flat.key.is_null());
        assert!(flat.options.is_null() && flat.option_names.is_null());
    }

    #[test]
    fn exported_range_list_free() {
        let mut length = 0;
        let ranges = export_range_list(&[sdr_types::Range::new(0.0, 1.0)], &mut length).unwrap();
        assert_eq!(length, 1);
        // Safety: one range was exported.
        assert_eq!(unsafe { (*ranges).maximum }, 1.0);
        sdr_range_list_free(ranges, length);
    }
}
