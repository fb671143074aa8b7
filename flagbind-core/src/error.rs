//! Error types for option binding.
//!
//! Two families exist: [`SchemaError`] is raised while reading the
//! annotations of a destination record, [`BindError`] while walking the
//! argument list. Both fold into the crate-level [`Error`].

use thiserror::Error;

/// Reason a numeric literal was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericReason {
    /// The text is not a decimal number of the requested kind
    Malformed,
    /// The number does not fit the width of the target field
    OutOfRange,
}

impl std::fmt::Display for NumericReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericReason::Malformed => f.write_str("invalid syntax"),
            NumericReason::OutOfRange => f.write_str("value out of range"),
        }
    }
}

/// Failure to convert option text into a scalar value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("failed to convert {value:?} to bool: invalid syntax")]
    Bool { value: String },

    #[error("failed to convert {value:?} to int: {reason}")]
    Int { value: String, reason: NumericReason },

    #[error("failed to convert {value:?} to uint: {reason}")]
    Uint { value: String, reason: NumericReason },

    #[error("failed to convert {value:?} to float: {reason}")]
    Float { value: String, reason: NumericReason },
}

/// Errors raised while building an option schema from field annotations.
///
/// None of these are recoverable for the destination type: the
/// annotation has to be fixed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field {field:?} has an unsupported type {type_name:?}, but it has an annotation {annotation:?}")]
    UnsupportedFieldType {
        field: &'static str,
        type_name: &'static str,
        annotation: &'static str,
    },

    #[error("field {0:?} has an annotation with an empty option name")]
    EmptyOptionName(&'static str),

    #[error("option {0:?}: \"short\" is empty")]
    EmptyShortAlias(String),

    #[error("option {0:?}: \"short\" must have a value")]
    ShortMustHaveValue(String),

    #[error("option {0:?}: \"default\" is empty")]
    EmptyDefault(String),

    #[error("option {0:?}: \"default\" must have a value")]
    DefaultMustHaveValue(String),

    #[error("option {0:?} is declared more than once")]
    DuplicateOption(String),

    #[error("short alias {0:?} is declared more than once")]
    DuplicateShortAlias(String),
}

/// Errors raised while binding arguments to a schema.
///
/// Binding stops at the first one; fields bound before it keep their values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("unknown option: {0:?}")]
    UnrecognizedBareToken(String),

    #[error("unknown option: {0:?}")]
    UnknownOption(String),

    #[error("value for the option {0:?} is not set")]
    MissingValue(String),

    #[error("value setting error for option {option:?}: {source}")]
    ValueConversion {
        option: String,
        value: String,
        #[source]
        source: ConversionError,
    },
}

/// Main error type for argument parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Bind(#[from] BindError),
}

/// Result type alias for flagbind operations
pub type Result<T> = std::result::Result<T, Error>;
