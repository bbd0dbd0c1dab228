//! Decoder control commands.
//!
//! A [`DecoderControl`] carries a [`Command`] plus a map of named,
//! dynamically typed parameters. Typed getters never coerce: asking for an
//! integer that was stored as text is a [`ParamError::TypeMismatch`].

#![deny(unsafe_code)]

mod command;
mod control;

pub use command::{Command, CommandError};
pub use control::{DecoderControl, ParamError, ParamKind, ParamValue};
