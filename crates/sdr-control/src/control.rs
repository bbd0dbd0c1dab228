use std::collections::BTreeMap;

use crate::command::Command;

/// The type tag of a [`ParamValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ParamKind {
    #[display("integer")]
    Integer,
    #[display("float")]
    Float,
    #[display("boolean")]
    Boolean,
    #[display("text")]
    Text,
}

/// A dynamically typed parameter.
#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum ParamValue {
    Integer(i32),
    Float(f32),
    Boolean(bool),
    Text(String),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Integer(_) => ParamKind::Integer,
            Self::Float(_) => ParamKind::Float,
            Self::Boolean(_) => ParamKind::Boolean,
            Self::Text(_) => ParamKind::Text,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("parameter `{name}` is not set")]
    Missing { name: String },

    #[error("parameter `{name}` is {found}, not {expected}")]
    TypeMismatch {
        name: String,
        expected: ParamKind,
        found: ParamKind,
    },
}

/// A decoder command with its named parameters.
///
/// Setters return `&mut Self` so they can be chained; a later set of the
/// same name replaces the earlier value, whatever its type.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoderControl {
    command: Command,
    parameters: BTreeMap<String, ParamValue>,
}

impl DecoderControl {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_parameters(command: Command, parameters: BTreeMap<String, ParamValue>) -> Self {
        Self {
            command,
            parameters,
        }
    }

    pub fn with_integer(command: Command, name: impl Into<String>, value: i32) -> Self {
        Self::with_value(command, name, value)
    }

    pub fn with_float(command: Command, name: impl Into<String>, value: f32) -> Self {
        Self::with_value(command, name, value)
    }

    pub fn with_boolean(command: Command, name: impl Into<String>, value: bool) -> Self {
        Self::with_value(command, name, value)
    }

    pub fn with_text(command: Command, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_value(command, name, ParamValue::Text(value.into()))
    }

    fn with_value(command: Command, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let mut control = Self::new(command);
        control.set(name, value);
        control
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn parameters(&self) -> &BTreeMap<String, ParamValue> {
        &self.parameters
    }

    pub fn is_start(&self) -> bool {
        self.command == Command::Start
    }

    pub fn is_stop(&self) -> bool {
        self.command == Command::Stop
    }

    pub fn is_record(&self) -> bool {
        self.command == Command::Record
    }

    pub fn is_store(&self) -> bool {
        self.command == Command::Store
    }

    pub fn is_clear(&self) -> bool {
        self.command == Command::Clear
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// Store `value` under `name`, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn set_integer(&mut self, name: impl Into<String>, value: i32) -> &mut Self {
        self.set(name, value)
    }

    pub fn set_float(&mut self, name: impl Into<String>, value: f32) -> &mut Self {
        self.set(name, value)
    }

    pub fn set_boolean(&mut self, name: impl Into<String>, value: bool) -> &mut Self {
        self.set(name, value)
    }

    pub fn set_text(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.set(name, ParamValue::Text(value.into()))
    }

    /// The raw value stored under `name`.
    pub fn get(&self, name: &str) -> Result<&ParamValue, ParamError> {
        self.parameters.get(name).ok_or_else(|| ParamError::Missing {
            name: name.to_owned(),
        })
    }

    pub fn integer(&self, name: &str) -> Result<i32, ParamError> {
        match self.get(name)? {
            ParamValue::Integer(value) => Ok(*value),
            other => Err(mismatch(name, ParamKind::Integer, other)),
        }
    }

    pub fn float(&self, name: &str) -> Result<f32, ParamError> {
        match self.get(name)? {
            ParamValue::Float(value) => Ok(*value),
            other => Err(mismatch(name, ParamKind::Float, other)),
        }
    }

    pub fn boolean(&self, name: &str) -> Result<bool, ParamError> {
        match self.get(name)? {
            ParamValue::Boolean(value) => Ok(*value),
            other => Err(mismatch(name, ParamKind::Boolean, other)),
        }
    }

    pub fn text(&self, name: &str) -> Result<&str, ParamError> {
        match self.get(name)? {
            ParamValue::Text(value) => Ok(value),
            other => Err(mismatch(name, ParamKind::Text, other)),
        }
    }
}

fn mismatch(name: &str, expected: ParamKind, found: &ParamValue) -> ParamError {
    ParamError::TypeMismatch {
        name: name.to_owned(),
        expected,
        found: found.kind(),
    }
}
