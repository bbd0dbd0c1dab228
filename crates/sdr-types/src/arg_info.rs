//! Descriptors for configurable driver arguments.

use crate::range::Range;

/// Value type of a configurable argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
pub enum ArgType {
    #[display("bool")]
    Bool,
    #[display("int")]
    Int,
    #[display("float")]
    Float,
    #[default]
    #[display("string")]
    String,
}

/// Describes one configurable argument: what it is called, how it is shown
/// to the user, and which values it accepts.
///
/// `options` and `option_names` are parallel: `option_names[i]` is the
/// display label for `options[i]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgInfo {
    /// Identifier passed back to the driver, e.g. `"biastee"`.
    pub key: String,
    /// Default value, formatted as text.
    pub value: String,
    /// Human readable name.
    pub name: String,
    pub description: String,
    pub units: String,
    pub arg_type: ArgType,
    /// Legal numeric range, meaningful for `Int` and `Float` arguments.
    pub range: Range,
    /// Discrete legal values, if the argument is an enumeration.
    pub options: Vec<String>,
    /// Display labels for `options`.
    pub option_names: Vec<String>,
}

impl ArgInfo {
    /// Create a descriptor with the given key and type; every other field
    /// starts empty.
    pub fn new(key: impl Into<String>, arg_type: ArgType) -> Self {
        Self {
            key: key.into(),
            arg_type,
            ..Self::default()
        }
    }

    /// Returns `true` when every option has exactly one label.
    pub fn options_aligned(&self) -> bool {
        self.options.len() == self.option_names.len()
    }
}

pub type ArgInfoList = Vec<ArgInfo>;
