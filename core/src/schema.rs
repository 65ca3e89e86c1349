//! Declarative command descriptions.
//!
//! A [`CommandSchema`] lists the positional arguments and options a command
//! accepts. Schemas are plain data: they can be written by hand, built with
//! the chaining helpers below, or deserialized from JSON/YAML (see
//! [`CommandSchema::load`](crate::CommandSchema::load)).

use serde::{Deserialize, Serialize};

/// Schema for a single option.
///
/// An option is identified by `name` and matched by its short form
/// (`-v`), its long form (`--verbose`), or both. When `capture` is set the
/// option consumes a value.
///
/// # Examples
///
/// ```
/// use argscan_core::OptionSchema;
///
/// let verbose = OptionSchema::flag("verbose").with_short("-v").with_long("--verbose");
/// assert!(!verbose.capture);
/// assert_eq!(verbose.short_flag(), Some("-v"));
///
/// let output = OptionSchema::capture("output").with_long("--output");
/// assert!(output.capture);
/// assert_eq!(output.short_flag(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionSchema {
    /// Key the option is reported under in [`ParsedArgs`](crate::ParsedArgs).
    pub name: String,
    /// Short form, e.g. "-v"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    /// Long form, e.g. "--verbose"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Whether the option consumes a value.
    #[serde(default)]
    pub capture: bool,
}

impl OptionSchema {
    /// Creates a boolean option with no flags yet.
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Creates a value-capturing option with no flags yet.
    pub fn capture(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capture: true,
            ..Default::default()
        }
    }

    /// Sets the short form.
    pub fn with_short(mut self, short: impl Into<String>) -> Self {
        self.short = Some(short.into());
        self
    }

    /// Sets the long form.
    pub fn with_long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    /// Returns the short form, treating an empty string as absent.
    pub fn short_flag(&self) -> Option<&str> {
        self.short.as_deref().filter(|s| !s.is_empty())
    }

    /// Returns the long form, treating an empty string as absent.
    pub fn long_flag(&self) -> Option<&str> {
        self.long.as_deref().filter(|s| !s.is_empty())
    }
}

/// Complete description of one command's accepted tokens.
///
/// # Examples
///
/// ```
/// use argscan_core::{CommandSchema, OptionSchema};
///
/// let schema = CommandSchema::new()
///     .with_argument("source")
///     .with_argument("dest")
///     .with_option(OptionSchema::flag("force").with_short("-f"))
///     .variadic();
///
/// assert_eq!(schema.arguments, ["source", "dest"]);
/// assert!(schema.variadic);
/// assert!(schema.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandSchema {
    /// Positional argument names, bound in declaration order.
    #[serde(default)]
    pub arguments: Vec<String>,
    /// Options, checked in declaration order during validation.
    #[serde(default)]
    pub options: Vec<OptionSchema>,
    /// Collect trailing unmatched tokens instead of rejecting them.
    #[serde(default)]
    pub variadic: bool,
}

impl CommandSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn with_argument(mut self, name: impl Into<String>) -> Self {
        self.arguments.push(name.into());
        self
    }

    /// Appends an option.
    pub fn with_option(mut self, option: OptionSchema) -> Self {
        self.options.push(option);
        self
    }

    /// Marks the schema as variadic.
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}
