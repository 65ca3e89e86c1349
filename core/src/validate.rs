//! Schema consistency checks.
//!
//! Validation is a single left-to-right pass that stops at the first
//! problem. Positional names are checked first, then each option in
//! declared order: name, short flag (duplicate then syntax), long flag
//! (duplicate then syntax), and finally that at least one flag exists.
//!
//! # Examples
//!
//! ```
//! use argscan_core::*;
//!
//! let schema = CommandSchema::new()
//!     .with_option(OptionSchema::flag("verbose").with_short("-v"));
//! assert!(schema.validate().is_ok());
//!
//! // Short flag missing its leading hyphen
//! let bad = CommandSchema::new()
//!     .with_option(OptionSchema::flag("verbose").with_short("v"));
//! assert_eq!(
//!     bad.validate(),
//!     Err(ValidationError::InvalidShortFlag("v".to_string()))
//! );
//! ```

use std::collections::HashSet;

use crate::{CommandSchema, SchemaError, ValidationError};

impl CommandSchema {
    /// Checks the schema for internal consistency.
    ///
    /// Must succeed before [`build`](CommandSchema::build) is called.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_scoped().map_err(SchemaError::into_error)
    }

    /// Like [`validate`](CommandSchema::validate), but reports whether the
    /// problem was in the argument list or in an option declaration.
    ///
    /// # Examples
    ///
    /// ```
    /// use argscan_core::*;
    ///
    /// let schema = CommandSchema::new().with_argument("a").with_argument("a");
    /// let err = schema.validate_scoped().unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "argument validation failed: name was already registered: a"
    /// );
    /// ```
    pub fn validate_scoped(&self) -> Result<(), SchemaError> {
        for (i, argument) in self.arguments.iter().enumerate() {
            if self.arguments[..i].contains(argument) {
                return Err(SchemaError::Argument(ValidationError::DuplicateName(
                    argument.clone(),
                )));
            }
        }

        self.validate_options().map_err(SchemaError::Option)
    }

    fn validate_options(&self) -> Result<(), ValidationError> {
        let mut names: HashSet<&str> = HashSet::new();
        let mut flags: HashSet<&str> = HashSet::new();

        for option in &self.options {
            if !names.insert(option.name.as_str()) {
                return Err(ValidationError::DuplicateName(option.name.clone()));
            }

            let short = option.short_flag();
            if let Some(short) = short {
                if flags.contains(short) {
                    return Err(ValidationError::DuplicateFlag(short.to_string()));
                }
                if !is_valid_short_flag(short) {
                    return Err(ValidationError::InvalidShortFlag(short.to_string()));
                }
                flags.insert(short);
            }

            let long = option.long_flag();
            if let Some(long) = long {
                if flags.contains(long) {
                    return Err(ValidationError::DuplicateFlag(long.to_string()));
                }
                if !is_valid_long_flag(long) {
                    return Err(ValidationError::InvalidLongFlag(long.to_string()));
                }
                flags.insert(long);
            }

            if short.is_none() && long.is_none() {
                return Err(ValidationError::NoFlag(option.name.clone()));
            }
        }

        Ok(())
    }
}

/// A hyphen followed by exactly one ASCII letter.
fn is_valid_short_flag(short: &str) -> bool {
    let bytes = short.as_bytes();
    bytes.len() == 2 && bytes[0] == b'-' && bytes[1].is_ascii_alphabetic()
}

/// Two hyphens, an ASCII letter, then anything without a space.
fn is_valid_long_flag(long: &str) -> bool {
    let bytes = long.as_bytes();
    bytes.len() >= 3
        && long.starts_with("--")
        && bytes[2].is_ascii_alphabetic()
        && !long.contains(' ')
}
