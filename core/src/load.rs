//! Reading schemas from JSON or YAML.
//!
//! # Example YAML
//!
//! ```yaml
//! arguments:
//!   - source
//!   - dest
//! options:
//!   - name: force
//!     short: -f
//!     long: --force
//!   - name: mode
//!     long: --mode
//!     capture: true
//! variadic: false
//! ```
//!
//! Loading only deserializes; call
//! [`validate`](crate::CommandSchema::validate) or
//! [`compile`](crate::CommandSchema::compile) afterwards.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{CommandSchema, LoadError};

impl CommandSchema {
    /// Parses a schema from JSON text.
    ///
    /// # Examples
    ///
    /// ```
    /// use argscan_core::CommandSchema;
    ///
    /// let schema = CommandSchema::from_json_str(
    ///     r#"{"arguments": ["name"], "options": [{"name": "v", "short": "-v"}]}"#,
    /// )
    /// .unwrap();
    /// assert_eq!(schema.arguments, ["name"]);
    /// assert!(!schema.variadic);
    /// ```
    pub fn from_json_str(raw: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parses a schema from YAML text.
    pub fn from_yaml_str(raw: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Loads a schema file, choosing the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnsupportedFormat`] for extensions other than
    /// `.json`, `.yaml` and `.yml`, [`LoadError::Io`] if the file cannot be
    /// read, and a parse error otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let schema = match extension.as_deref() {
            Some("json") => Self::from_json_str(&fs::read_to_string(path)?)?,
            Some("yaml" | "yml") => Self::from_yaml_str(&fs::read_to_string(path)?)?,
            _ => return Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        };

        debug!(
            path = %path.display(),
            arguments = schema.arguments.len(),
            options = schema.options.len(),
            "Loaded command schema"
        );
        Ok(schema)
    }
}
