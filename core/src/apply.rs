//! Matching token lists against a [`CommandOutline`].

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::visit::TERMINATOR;
use crate::{ApplyError, CommandOutline, OptionBinding};

/// Structured result of [`CommandOutline::apply_to`].
///
/// `options` and `arguments` are `None` when the schema declared no options
/// or no positional arguments, and `Some` (possibly empty) otherwise.
/// Non-capturing options that were present map to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParsedArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<BTreeMap<String, String>>,
    /// Trailing tokens collected by a variadic schema, in original order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<String>,
}

impl ParsedArgs {
    /// Returns the value recorded for an option, `""` for a present flag.
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.as_ref()?.get(name).map(String::as_str)
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.option(name).is_some()
    }

    /// Returns the token bound to a positional argument.
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments.as_ref()?.get(name).map(String::as_str)
    }

    pub fn extra(&self) -> &[String] {
        &self.extra
    }
}

impl CommandOutline {
    /// Matches `tokens` against the outline in a single pass.
    ///
    /// - `--key` / `--key=value` resolve `key` in the flag table.
    /// - `-abc` resolves `a`, `b`, `c` in turn; a capturing option takes
    ///   the rest of the token as its value.
    /// - A capturing option with no inline value takes the next token,
    ///   unless there is none or it starts with `-`.
    /// - `--` is consumed and ends option recognition.
    /// - When the outline declares no options, hyphenated tokens are not
    ///   treated as options and bind like any other token.
    /// - Other tokens fill positional names in order. The first token that
    ///   fits nowhere ends the scan; it and everything after it are
    ///   collected when the outline is variadic.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::UnrecognizedOption`] for unknown flags,
    /// [`ApplyError::NoCaptureValue`] when a capturing option has no value,
    /// and [`ApplyError::UnrecognizedArgument`] for leftovers of a
    /// non-variadic outline.
    ///
    /// # Examples
    ///
    /// ```
    /// use argscan_core::*;
    ///
    /// let outline = CommandSchema::new()
    ///     .with_argument("name")
    ///     .with_option(OptionSchema::capture("out").with_long("--out"))
    ///     .compile()
    ///     .unwrap();
    ///
    /// let parsed = outline.apply_to(&["--out=file.txt", "jordan"]).unwrap();
    /// assert_eq!(parsed.option("out"), Some("file.txt"));
    /// assert_eq!(parsed.argument("name"), Some("jordan"));
    ///
    /// let err = outline.apply_to(&["jordan", "extra"]).unwrap_err();
    /// assert_eq!(err, ApplyError::UnrecognizedArgument("extra".to_string()));
    /// ```
    pub fn apply_to<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParsedArgs, ApplyError> {
        self.match_tokens(tokens)
            .inspect_err(|err| debug!(error = %err, "Token list rejected"))
    }

    fn match_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParsedArgs, ApplyError> {
        let mut parsed = ParsedArgs {
            options: self.bindings.as_ref().map(|_| BTreeMap::new()),
            arguments: self.arguments.as_ref().map(|_| BTreeMap::new()),
            extra: Vec::new(),
        };

        let mut recognizing = true;
        let mut filled = 0;
        let mut index = 0;

        while index < tokens.len() {
            let token = tokens[index].as_ref();

            if recognizing {
                if token == TERMINATOR {
                    recognizing = false;
                    index += 1;
                    continue;
                }

                // Without declared options every token is a positional candidate.
                if self.bindings.is_some() {
                    if let Some(body) = token.strip_prefix("--") {
                        let (key, inline) = match body.split_once('=') {
                            Some((key, value)) => (key, Some(value)),
                            None => (body, None),
                        };

                        let binding = self.resolve(key, token)?;
                        let value = match (binding.capture, inline) {
                            (false, _) => String::new(),
                            (true, Some(value)) => value.to_string(),
                            (true, None) => capture_next(tokens, &mut index, token)?,
                        };
                        record(&mut parsed, binding, value);

                        index += 1;
                        continue;
                    }

                    if token.len() > 1 && token.starts_with('-') {
                        let group = &token[1..];

                        for (offset, ch) in group.char_indices() {
                            let end = offset + ch.len_utf8();
                            let binding = self.resolve(&group[offset..end], token)?;

                            if !binding.capture {
                                record(&mut parsed, binding, String::new());
                                continue;
                            }

                            let value = if end < group.len() {
                                group[end..].to_string()
                            } else {
                                capture_next(tokens, &mut index, token)?
                            };
                            record(&mut parsed, binding, value);
                            break;
                        }

                        index += 1;
                        continue;
                    }
                }
            }

            if let (Some(names), Some(bound)) = (&self.arguments, parsed.arguments.as_mut()) {
                if filled < names.len() {
                    bound.insert(names[filled].clone(), token.to_string());
                    filled += 1;
                    index += 1;
                    continue;
                }
            }

            break;
        }

        if let Some(leftover) = tokens.get(index) {
            if !self.variadic {
                return Err(ApplyError::UnrecognizedArgument(
                    leftover.as_ref().to_string(),
                ));
            }
            parsed.extra = tokens[index..]
                .iter()
                .map(|token| token.as_ref().to_string())
                .collect();
        }

        Ok(parsed)
    }

    fn resolve(&self, key: &str, token: &str) -> Result<&OptionBinding, ApplyError> {
        self.binding(key)
            .ok_or_else(|| ApplyError::UnrecognizedOption(token.to_string()))
    }
}

/// Takes the token after `index` as a value, failing when it is missing or
/// hyphenated.
fn capture_next<S: AsRef<str>>(
    tokens: &[S],
    index: &mut usize,
    introducer: &str,
) -> Result<String, ApplyError> {
    match tokens.get(*index + 1).map(AsRef::as_ref) {
        Some(next) if !next.starts_with('-') => {
            *index += 1;
            Ok(next.to_string())
        }
        _ => Err(ApplyError::NoCaptureValue(introducer.to_string())),
    }
}

fn record(parsed: &mut ParsedArgs, binding: &OptionBinding, value: String) {
    parsed
        .options
        .get_or_insert_with(BTreeMap::new)
        .insert(binding.name.clone(), value);
}
