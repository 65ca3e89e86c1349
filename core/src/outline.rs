//! Compiled, reusable form of a [`CommandSchema`].
//!
//! Building an outline flattens every short and long flag into one lookup
//! table keyed by the flag text without its hyphens, so matching a token
//! costs a single hash lookup. An outline never changes after it is built
//! and can be shared freely between threads.
//!
//! # Examples
//!
//! ```
//! use argscan_core::*;
//!
//! let schema = CommandSchema::new()
//!     .with_argument("name")
//!     .with_option(OptionSchema::capture("output").with_short("-o").with_long("--output"));
//!
//! let outline = schema.compile().unwrap();
//! assert_eq!(outline.binding("o"), outline.binding("output"));
//! assert_eq!(outline.arguments(), Some(&["name".to_string()][..]));
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::{CommandSchema, ValidationError};

/// What a flag key resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionBinding {
    /// The option's [`name`](crate::OptionSchema::name).
    pub name: String,
    /// Whether the option consumes a value.
    pub capture: bool,
}

/// Immutable matcher produced by [`CommandSchema::build`].
///
/// `None` for the binding table or argument list means the schema declared
/// no options or no positional arguments respectively; the matching
/// [`ParsedArgs`](crate::ParsedArgs) map is then left out entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutline {
    pub(crate) bindings: Option<HashMap<String, OptionBinding>>,
    pub(crate) arguments: Option<Vec<String>>,
    pub(crate) variadic: bool,
}

impl CommandOutline {
    /// Looks up a flag key (`"v"` for `-v`, `"verbose"` for `--verbose`).
    pub fn binding(&self, key: &str) -> Option<&OptionBinding> {
        self.bindings.as_ref()?.get(key)
    }

    /// Declared positional names, or `None` when there are none.
    pub fn arguments(&self) -> Option<&[String]> {
        self.arguments.as_deref()
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }
}

impl CommandSchema {
    /// Compiles the schema into a [`CommandOutline`].
    ///
    /// The schema must already have passed
    /// [`validate`](CommandSchema::validate). Building an unvalidated schema
    /// does not panic, but the resulting outline is unspecified: duplicate
    /// flags silently overwrite earlier ones. Prefer
    /// [`compile`](CommandSchema::compile) unless the schema is known good.
    pub fn build(&self) -> CommandOutline {
        let bindings = (!self.options.is_empty()).then(|| {
            let mut table = HashMap::new();
            for option in &self.options {
                let binding = OptionBinding {
                    name: option.name.clone(),
                    capture: option.capture,
                };
                if let Some(short) = option.short_flag() {
                    let key = short.strip_prefix('-').unwrap_or(short);
                    table.insert(key.to_string(), binding.clone());
                }
                if let Some(long) = option.long_flag() {
                    let key = long.strip_prefix("--").unwrap_or(long);
                    table.insert(key.to_string(), binding);
                }
            }
            table
        });

        let arguments = (!self.arguments.is_empty()).then(|| self.arguments.clone());

        debug!(
            bindings = bindings.as_ref().map_or(0, HashMap::len),
            arguments = self.arguments.len(),
            variadic = self.variadic,
            "Built command outline"
        );

        CommandOutline {
            bindings,
            arguments,
            variadic: self.variadic,
        }
    }

    /// Validates the schema, then builds it.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn compile(&self) -> Result<CommandOutline, ValidationError> {
        self.validate()?;
        Ok(self.build())
    }
}
