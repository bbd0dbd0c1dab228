//! C-compatible FFI layer for the flat representation.
//!
//! This module holds the `#[repr(C)]` types that cross the boundary, the
//! `extern "C"` functions C callers use to inspect and release them, and the
//! `export_*` helpers a native entry point uses to hand converted values out.
//!
//! # Symbol prefix
//!
//! - Functions: `sdr_*`
//! - Types: `Sdr*`
//!
//! # Ownership
//!
//! Every flat value returned to C is owned by the caller and must be passed
//! to its matching release function exactly once:
//!
//! | value | release |
//! |---|---|
//! | `char *` | `sdr_string_free` |
//! | `char **`, length | `sdr_strings_clear` |
//! | `double *` / `unsigned *` / `SdrRange *`, length | `sdr_f64_list_free` / `sdr_u32_list_free` / `sdr_range_list_free` |
//! | `SdrKwargs` | `sdr_kwargs_clear` |
//! | `SdrKwargs *`, length | `sdr_kwargs_list_clear` |
//! | `SdrArgInfo` | `sdr_arg_info_clear` |
//! | `SdrArgInfo *`, length | `sdr_arg_info_list_clear` |
//!
//! Values must not be modified in place (other than through `sdr_kwargs_set`)
//! and must not be released with `free()`.
//!
//! # Thread safety
//!
//! Functions keep no global state and may be called from any thread.
//! Calls touching the same value must be serialized by the caller.

pub mod types;

mod conversions;
pub mod export;
pub mod functions;
mod panic_guard;
