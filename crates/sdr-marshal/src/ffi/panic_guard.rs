//! Panic guard macros for FFI boundary safety.
//!
//! Every `extern "C"` function must catch panics to prevent undefined
//! behaviour when unwinding crosses the FFI boundary.

/// Wrap an FFI function body that returns [`SdrError`](super::types::SdrError).
///
/// On panic the macro returns `SdrError::Internal`.
///
/// # Example
///
/// ```ignore
/// extern "C" fn sdr_do_thing(args: *mut SdrKwargs) -> SdrError {
///     ffi_guard! {
///         // ... body ...
///         SdrError::None
///     }
/// }
/// ```
macro_rules! ffi_guard {
    ($($body:tt)*) => {{
        use std::panic;
        use std::panic::AssertUnwindSafe;

        match panic::catch_unwind(AssertUnwindSafe(move || { $($body)* })) {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("panic caught at FFI boundary");
                $crate::ffi::types::SdrError::Internal
            }
        }
    }};
}

/// Wrap an FFI function body that returns a pointer.
///
/// On panic the macro returns a null pointer.
macro_rules! ffi_guard_ptr {
    ($($body:tt)*) => {{
        use std::panic;
        use std::panic::AssertUnwindSafe;
        use std::ptr;

        match panic::catch_unwind(AssertUnwindSafe(move || { $($body)* })) {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("panic caught at FFI boundary");
                ptr::null_mut()
            }
        }
    }};
}

/// Wrap an FFI function body that returns nothing.
///
/// A panic is logged and swallowed.
macro_rules! ffi_guard_void {
    ($($body:tt)*) => {{
        use std::panic;
        use std::panic::AssertUnwindSafe;

        if panic::catch_unwind(AssertUnwindSafe(move || { $($body)* })).is_err() {
            tracing::error!("panic caught at FFI boundary");
        }
    }};
}

pub(crate) use ffi_guard;
pub(crate) use ffi_guard_ptr;
pub(crate) use ffi_guard_void;

#[cfg(test)]
mod tests {
    use crate::ffi::types::SdrError;

    #[test]
    fn ffi_guard_returns_value_on_success() {
        let result: SdrError = ffi_guard! { SdrError::None };
        assert_eq!(result, SdrError::None);
    }

    #[test]
    fn ffi_guard_returns_internal_on_panic() {
        let result: SdrError = ffi_guard! {
            panic!("test panic");
        };
        assert_eq!(result, SdrError::Internal);
    }

    #[test]
    fn ffi_guard_ptr_returns_null_on_panic() {
        let ptr: *mut i32 = ffi_guard_ptr! {
            panic!("test panic");
        };
        assert!(ptr.is_null());
    }

    #[test]
    fn ffi_guard_ptr_returns_pointer_on_success() {
        let mut value = 42i32;
        let ptr: *mut i32 = ffi_guard_ptr! { &raw mut value };
        assert!(!ptr.is_null());
    }

    #[test]
    fn ffi_guard_void_swallows_panic() {
        ffi_guard_void! {
            panic!("test panic");
        }
    }
}
