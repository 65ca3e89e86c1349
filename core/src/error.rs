//! Error types for schema validation, outline application, and schema
//! loading.
//!
//! Every variant carries the literal name or token that caused it, so the
//! `Display` output can be shown to a user without further context.

use std::path::PathBuf;

use thiserror::Error;

/// Schema authoring errors reported by
/// [`CommandSchema::validate`](crate::CommandSchema::validate).
///
/// These indicate a bug in the schema itself and are never the end user's
/// fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A positional argument or option name appears more than once.
    #[error("name was already registered: {0}")]
    DuplicateName(String),
    /// A short or long flag text is shared by two options.
    #[error("flag was already registered: {0}")]
    DuplicateFlag(String),
    /// Short flag is not a hyphen followed by one ASCII letter.
    #[error("flag must be a hyphen followed by 1 alphabetic character: {0}")]
    InvalidShortFlag(String),
    /// Long flag is not two hyphens, a letter, then non-space characters.
    #[error(
        "flag must be two hyphens followed by an alphabetic character, then any number of alphanumeric characters: {0}"
    )]
    InvalidLongFlag(String),
    /// Option declares neither a short nor a long flag. Carries the option name.
    #[error("option must have a short or long flag: {0}")]
    NoFlag(String),
}

/// A [`ValidationError`] tagged with the part of the schema it was found
/// in, as reported by
/// [`CommandSchema::validate_scoped`](crate::CommandSchema::validate_scoped).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Problem in the positional argument list.
    #[error("argument validation failed: {0}")]
    Argument(#[source] ValidationError),
    /// Problem in an option declaration.
    #[error("option validation failed: {0}")]
    Option(#[source] ValidationError),
}

impl SchemaError {
    /// Returns the underlying validation error.
    pub fn error(&self) -> &ValidationError {
        match self {
            Self::Argument(err) | Self::Option(err) => err,
        }
    }

    pub fn into_error(self) -> ValidationError {
        match self {
            Self::Argument(err) | Self::Option(err) => err,
        }
    }
}

/// Errors produced when applying a [`CommandOutline`](crate::CommandOutline)
/// to a token list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    /// A hyphenated token did not resolve to any declared flag.
    #[error("unrecognized option: {0}")]
    UnrecognizedOption(String),
    /// A token was left over after every positional slot was filled.
    #[error("unrecognized argument: {0}")]
    UnrecognizedArgument(String),
    /// A capturing option had no usable value. Carries the introducing token.
    #[error("option requires a value: {0}")]
    NoCaptureValue(String),
}

/// Errors that can occur while reading a schema from disk or text.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension is neither `.json`, `.yaml` nor `.yml`.
    #[error("unsupported schema format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
