//! UNIX-convention command-line argument scanning.
//!
//! This crate offers two layers:
//!
//! - [`visit`] — a schema-free, single-pass token classifier that reports
//!   flags, captured options, and positional arguments to a caller-supplied
//!   [`Visitor`].
//! - [`CommandSchema`] — a declarative description of a command's options
//!   and positional arguments. A schema is checked with
//!   [`CommandSchema::validate`], compiled once with
//!   [`CommandSchema::build`] into an immutable [`CommandOutline`], and the
//!   outline is then applied to any number of token lists with
//!   [`CommandOutline::apply_to`].
//!
//! Schemas can also be read from JSON or YAML files with
//! [`CommandSchema::load`].
//!
//! # Example
//!
//! ```
//! use argscan_core::*;
//!
//! let schema = CommandSchema::new()
//!     .with_argument("file")
//!     .with_option(OptionSchema::flag("verbose").with_short("-v").with_long("--verbose"))
//!     .with_option(OptionSchema::capture("output").with_short("-o"))
//!     .variadic();
//!
//! schema.validate().unwrap();
//! let outline = schema.build();
//!
//! let parsed = outline.apply_to(&["-vo", "out.txt", "in.txt", "--", "-rest"]).unwrap();
//! assert_eq!(parsed.option("verbose"), Some(""));
//! assert_eq!(parsed.option("output"), Some("out.txt"));
//! assert_eq!(parsed.argument("file"), Some("in.txt"));
//! assert_eq!(parsed.extra(), ["-rest"]);
//! ```

mod apply;
mod error;
mod load;
mod outline;
mod schema;
mod validate;
mod visit;

pub use apply::ParsedArgs;
pub use error::{ApplyError, LoadError, SchemaError, ValidationError};
pub use outline::{CommandOutline, OptionBinding};
pub use schema::{CommandSchema, OptionSchema};
pub use visit::{FlagOutcome, Flow, Scan, TERMINATOR, Visitor, is_option_value, visit};
