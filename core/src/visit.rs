//! Schema-free token classification.
//!
//! [`visit`] walks a token list once, left to right, and reports what it
//! sees to a [`Visitor`]. It cannot tell a boolean flag from an option that
//! captures a value, so every flag-shaped name is first offered to
//! [`Visitor::visit_flag`], which decides.
//!
//! # Examples
//!
//! ```
//! use argscan_core::{FlagOutcome, Flow, Scan, Visitor, visit};
//!
//! #[derive(Default)]
//! struct Collect {
//!     flags: Vec<String>,
//!     options: Vec<(String, String)>,
//!     arguments: Vec<String>,
//! }
//!
//! impl Visitor for Collect {
//!     type Error = std::convert::Infallible;
//!
//!     fn visit_flag(&mut self, flag: &str) -> Result<FlagOutcome, Self::Error> {
//!         if flag == "o" || flag == "output" {
//!             return Ok(FlagOutcome::Option);
//!         }
//!         self.flags.push(flag.to_string());
//!         Ok(FlagOutcome::Flag)
//!     }
//!
//!     fn visit_option(&mut self, option: &str, value: &str) -> Result<Flow, Self::Error> {
//!         self.options.push((option.to_string(), value.to_string()));
//!         Ok(Flow::Continue)
//!     }
//!
//!     fn visit_argument(&mut self, argument: &str) -> Result<Flow, Self::Error> {
//!         self.arguments.push(argument.to_string());
//!         Ok(Flow::Continue)
//!     }
//! }
//!
//! let mut collect = Collect::default();
//! let scan = visit(&mut collect, &["-vo", "out.txt", "in.txt", "--", "-x"]).unwrap();
//!
//! assert_eq!(scan, Scan::Completed);
//! assert_eq!(collect.flags, ["v"]);
//! assert_eq!(collect.options, [("o".to_string(), "out.txt".to_string())]);
//! assert_eq!(collect.arguments, ["in.txt", "-x"]);
//! ```

use tracing::trace;

/// Token that ends option recognition for the rest of the scan.
pub const TERMINATOR: &str = "--";

/// Decision returned by [`Visitor::visit_flag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOutcome {
    /// The name was a boolean flag; keep scanning.
    Flag,
    /// The name introduces a value; the scanner resolves the value and
    /// reports it through [`Visitor::visit_option`].
    Option,
    /// Stop scanning immediately.
    Halt,
}

/// Decision returned by [`Visitor::visit_option`] and
/// [`Visitor::visit_argument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt,
}

/// How a call to [`visit`] ended when no callback failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// Every token was visited.
    Completed,
    /// A callback asked to stop; later tokens were not visited.
    Halted,
}

/// Receives the events produced by [`visit`].
///
/// Returning `Err` from any method aborts the scan and the error is handed
/// back to the caller of [`visit`] unchanged.
pub trait Visitor {
    type Error;

    /// Called for each flag-shaped name, without its leading hyphen(s).
    ///
    /// Grouped short flags (`-abc`) are offered one character at a time.
    fn visit_flag(&mut self, flag: &str) -> Result<FlagOutcome, Self::Error>;

    /// Called after `visit_flag` returned [`FlagOutcome::Option`], with the
    /// captured value (possibly empty).
    fn visit_option(&mut self, option: &str, value: &str) -> Result<Flow, Self::Error>;

    /// Called for every token that is neither a flag, an option, nor a
    /// captured value.
    fn visit_argument(&mut self, argument: &str) -> Result<Flow, Self::Error>;
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    type Error = V::Error;

    fn visit_flag(&mut self, flag: &str) -> Result<FlagOutcome, Self::Error> {
        (**self).visit_flag(flag)
    }

    fn visit_option(&mut self, option: &str, value: &str) -> Result<Flow, Self::Error> {
        (**self).visit_option(option, value)
    }

    fn visit_argument(&mut self, argument: &str) -> Result<Flow, Self::Error> {
        (**self).visit_argument(argument)
    }
}

/// Steps through `tokens`, calling the appropriate [`Visitor`] methods.
///
/// Classification follows common UNIX conventions:
///
/// - `--` is consumed and turns option recognition off; every later token
///   is reported through [`Visitor::visit_argument`] verbatim.
/// - `--name` and `--name=value` (name starting with an ASCII letter) offer
///   `name` to [`Visitor::visit_flag`]. When it answers
///   [`FlagOutcome::Option`], the value is the text after `=` if present,
///   otherwise the next token when that token does not itself look like an
///   option, otherwise the empty string.
/// - `-abc` (second character an ASCII letter) offers `a`, `b` and `c` in
///   turn. The first one answered with [`FlagOutcome::Option`] captures the
///   rest of the token as its value, or follows the same next-token rule
///   when it was the final character.
/// - Anything else is an argument.
///
/// Returns [`Scan::Halted`] if a callback asked to stop, and the callback's
/// error if one failed.
pub fn visit<V, S>(mut visitor: V, tokens: &[S]) -> Result<Scan, V::Error>
where
    V: Visitor,
    S: AsRef<str>,
{
    let mut recognizing = true;
    let mut index = 0;

    while index < tokens.len() {
        let token = tokens[index].as_ref();

        if recognizing {
            if token == TERMINATOR {
                recognizing = false;
                index += 1;
                continue;
            }

            if is_long_candidate(token) {
                let body = &token[2..];
                let (name, inline) = match body.split_once('=') {
                    Some((name, value)) => (name, Some(value)),
                    None => (body, None),
                };

                match visitor.visit_flag(name)? {
                    FlagOutcome::Flag => {}
                    FlagOutcome::Halt => return Ok(halted(token)),
                    FlagOutcome::Option => {
                        let value = match inline {
                            Some(value) => value,
                            None => take_value(tokens, &mut index),
                        };
                        if visitor.visit_option(name, value)? == Flow::Halt {
                            return Ok(halted(token));
                        }
                    }
                }

                index += 1;
                continue;
            }

            if is_short_candidate(token) {
                let group = &token[1..];

                for (offset, ch) in group.char_indices() {
                    let end = offset + ch.len_utf8();
                    let flag = &group[offset..end];

                    match visitor.visit_flag(flag)? {
                        FlagOutcome::Flag => {}
                        FlagOutcome::Halt => return Ok(halted(token)),
                        FlagOutcome::Option => {
                            let value = if end < group.len() {
                                &group[end..]
                            } else {
                                take_value(tokens, &mut index)
                            };
                            if visitor.visit_option(flag, value)? == Flow::Halt {
                                return Ok(halted(token));
                            }
                            break;
                        }
                    }
                }

                index += 1;
                continue;
            }
        }

        if visitor.visit_argument(token)? == Flow::Halt {
            return Ok(halted(token));
        }
        index += 1;
    }

    Ok(Scan::Completed)
}

/// Returns true when `token` can be captured as an option value.
///
/// `-`, `--`, and anything shaped like a long or short option are not
/// values.
pub fn is_option_value(token: &str) -> bool {
    token != "-" && token != TERMINATOR && !is_long_candidate(token) && !is_short_candidate(token)
}

fn is_long_candidate(token: &str) -> bool {
    token.starts_with("--") && token.as_bytes().get(2).is_some_and(u8::is_ascii_alphabetic)
}

fn is_short_candidate(token: &str) -> bool {
    token.starts_with('-') && token.as_bytes().get(1).is_some_and(u8::is_ascii_alphabetic)
}

/// Consumes the token after `index` when it is a usable value.
fn take_value<'a, S: AsRef<str>>(tokens: &'a [S], index: &mut usize) -> &'a str {
    match tokens.get(*index + 1).map(AsRef::as_ref) {
        Some(next) if is_option_value(next) => {
            *index += 1;
            next
        }
        _ => "",
    }
}

fn halted(token: &str) -> Scan {
    trace!(token, "Visitor halted scan");
    Scan::Halted
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::convert::Infallible;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Flag(String),
        Option(String, String),
        Argument(String),
    }

    /// Records every event. Flags starting with an uppercase letter are
    /// reinterpreted as options.
    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
        halt_on: Option<&'static str>,
    }

    impl Recorder {
        fn flags(&self) -> Vec<&str> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Flag(f) => Some(f.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn options(&self) -> HashMap<&str, &str> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Option(o, v) => Some((o.as_str(), v.as_str())),
                    _ => None,
                })
                .collect()
        }

        fn arguments(&self) -> Vec<&str> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Argument(a) => Some(a.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Visitor for Recorder {
        type Error = Infallible;

        fn visit_flag(&mut self, flag: &str) -> Result<FlagOutcome, Infallible> {
            if self.halt_on == Some(flag) {
                return Ok(FlagOutcome::Halt);
            }
            if flag.starts_with(|c: char| c.is_ascii_uppercase()) {
                return Ok(FlagOutcome::Option);
            }
            self.events.push(Event::Flag(flag.to_string()));
            Ok(FlagOutcome::Flag)
        }

        fn visit_option(&mut self, option: &str, value: &str) -> Result<Flow, Infallible> {
            self.events
                .push(Event::Option(option.to_string(), value.to_string()));
            Ok(Flow::Continue)
        }

        fn visit_argument(&mut self, argument: &str) -> Result<Flow, Infallible> {
            self.events.push(Event::Argument(argument.to_string()));
            if self.halt_on == Some(argument) {
                return Ok(Flow::Halt);
            }
            Ok(Flow::Continue)
        }
    }

    /// Treats every flag as a capturing option.
    #[derive(Default)]
    struct CaptureAll {
        options: HashMap<String, String>,
    }

    impl Visitor for CaptureAll {
        type Error = Infallible;

        fn visit_flag(&mut self, _flag: &str) -> Result<FlagOutcome, Infallible> {
            Ok(FlagOutcome::Option)
        }

        fn visit_option(&mut self, option: &str, value: &str) -> Result<Flow, Infallible> {
            self.options.insert(option.to_string(), value.to_string());
            Ok(Flow::Continue)
        }

        fn visit_argument(&mut self, _argument: &str) -> Result<Flow, Infallible> {
            Ok(Flow::Continue)
        }
    }

    fn capture_all(tokens: &[&str]) -> HashMap<String, String> {
        let mut visitor = CaptureAll::default();
        visit(&mut visitor, tokens).unwrap();
        visitor.options
    }

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_visit_mixed_tokens() {
        let tokens = [
            "-a",
            "-B",
            "something",
            "-",
            "-dbS",
            "5432",
            "-Jfile.txt",
            "--store",
            "--Remove-from",
            "temp",
            "in.sql",
            "--Notfound=error",
            "-xfGcapture-this",
            "--",
            "-Z",
            "--zero",
        ];

        let mut recorder = Recorder::default();
        let scan = visit(&mut recorder, &tokens).unwrap();

        assert_eq!(scan, Scan::Completed);
        assert_eq!(recorder.flags(), ["a", "d", "b", "store", "x", "f"]);
        assert_eq!(recorder.arguments(), ["-", "in.sql", "-Z", "--zero"]);

        let expected: HashMap<&str, &str> = [
            ("B", "something"),
            ("S", "5432"),
            ("J", "file.txt"),
            ("Remove-from", "temp"),
            ("Notfound", "error"),
            ("G", "capture-this"),
        ]
        .into_iter()
        .collect();
        assert_eq!(recorder.options(), expected);
    }

    #[test]
    fn test_visit_arguments_only() {
        let mut recorder = Recorder::default();
        visit(&mut recorder, &["abc", "def", "--", "-"]).unwrap();
        assert_eq!(recorder.arguments(), ["abc", "def", "-"]);
    }

    #[test]
    fn test_visit_terminator_consumed_once() {
        let mut recorder = Recorder::default();
        visit(&mut recorder, &["--", "--", "-a"]).unwrap();
        assert_eq!(recorder.arguments(), ["--", "-a"]);
        assert!(recorder.flags().is_empty());
    }

    #[test]
    fn test_visit_flags_stop_at_terminator() {
        let mut recorder = Recorder::default();
        visit(
            &mut recorder,
            &["-abc", "-d", "--efg", "--", "-hij", "-k", "--lmn"],
        )
        .unwrap();
        assert_eq!(recorder.flags(), ["a", "b", "c", "d", "efg"]);
        assert_eq!(recorder.arguments(), ["-hij", "-k", "--lmn"]);
    }

    #[test]
    fn test_visit_non_letter_guards_fall_through() {
        let mut recorder = Recorder::default();
        visit(&mut recorder, &["--1", "--.", "-1", "-.x"]).unwrap();
        assert_eq!(recorder.arguments(), ["--1", "--.", "-1", "-.x"]);
    }

    #[test]
    fn test_visit_offers_non_letters_inside_group() {
        let mut recorder = Recorder::default();
        visit(&mut recorder, &["-a1.b"]).unwrap();
        assert_eq!(recorder.flags(), ["a", "1", ".", "b"]);
    }

    #[test]
    fn test_visit_options_capture_forms() {
        let options = capture_all(&[
            "-afile.txt",
            "-z",
            "image.png",
            "--in",
            "oneway",
            "--out=another",
            "--blank=",
        ]);
        assert_eq!(
            options,
            map(&[
                ("a", "file.txt"),
                ("z", "image.png"),
                ("in", "oneway"),
                ("out", "another"),
                ("blank", ""),
            ])
        );
    }

    #[test]
    fn test_visit_options_missing_values() {
        assert_eq!(
            capture_all(&["--first", "--last"]),
            map(&[("first", ""), ("last", "")])
        );
        assert_eq!(capture_all(&["-a", "-z"]), map(&[("a", ""), ("z", "")]));
    }

    #[test]
    fn test_visit_dash_is_not_captured() {
        assert_eq!(
            capture_all(&["--first", "-", "-a", "-"]),
            map(&[("first", ""), ("a", "")])
        );
    }

    #[test]
    fn test_visit_terminator_is_not_captured() {
        assert_eq!(capture_all(&["-a", "--"]), map(&[("a", "")]));
        assert_eq!(capture_all(&["--first", "--"]), map(&[("first", "")]));
    }

    #[test]
    fn test_visit_equals_value_is_not_deferred() {
        let mut recorder = Recorder::default();
        visit(&mut recorder, &["--Out=", "next"]).unwrap();
        assert_eq!(
            recorder.events,
            [
                Event::Option("Out".to_string(), String::new()),
                Event::Argument("next".to_string()),
            ]
        );
    }

    #[test]
    fn test_visit_flag_with_equals_ignores_value() {
        let mut recorder = Recorder::default();
        visit(&mut recorder, &["--store=ignored"]).unwrap();
        assert_eq!(recorder.events, [Event::Flag("store".to_string())]);
    }

    #[test]
    fn test_visit_halt_from_flag() {
        let mut recorder = Recorder {
            halt_on: Some("b"),
            ..Default::default()
        };
        let scan = visit(&mut recorder, &["-abc", "-d", "arg"]).unwrap();
        assert_eq!(scan, Scan::Halted);
        assert_eq!(recorder.flags(), ["a"]);
        assert!(recorder.arguments().is_empty());
    }

    #[test]
    fn test_visit_halt_from_argument() {
        let mut recorder = Recorder {
            halt_on: Some("stop"),
            ..Default::default()
        };
        let scan = visit(&mut recorder, &["one", "stop", "-a"]).unwrap();
        assert_eq!(scan, Scan::Halted);
        assert_eq!(recorder.arguments(), ["one", "stop"]);
        assert!(recorder.flags().is_empty());
    }

    #[test]
    fn test_visit_propagates_visitor_error() {
        struct Strict;

        impl Visitor for Strict {
            type Error = String;

            fn visit_flag(&mut self, flag: &str) -> Result<FlagOutcome, String> {
                Err(format!("unknown flag {flag}"))
            }

            fn visit_option(&mut self, _: &str, _: &str) -> Result<Flow, String> {
                Ok(Flow::Continue)
            }

            fn visit_argument(&mut self, _: &str) -> Result<Flow, String> {
                Ok(Flow::Continue)
            }
        }

        let err = visit(Strict, &["arg", "-q"]).unwrap_err();
        assert_eq!(err, "unknown flag q");
    }

    /// Every flag captures; option and argument callbacks answer with fixed
    /// replies. Successful callbacks are recorded.
    struct Scripted {
        on_option: Result<Flow, String>,
        on_argument: Result<Flow, String>,
        events: Vec<Event>,
    }

    impl Scripted {
        fn new(on_option: Result<Flow, String>, on_argument: Result<Flow, String>) -> Self {
            Self {
                on_option,
                on_argument,
                events: Vec::new(),
            }
        }
    }

    impl Visitor for Scripted {
        type Error = String;

        fn visit_flag(&mut self, _flag: &str) -> Result<FlagOutcome, String> {
            Ok(FlagOutcome::Option)
        }

        fn visit_option(&mut self, option: &str, value: &str) -> Result<Flow, String> {
            let reply = self.on_option.clone()?;
            self.events
                .push(Event::Option(option.to_string(), value.to_string()));
            Ok(reply)
        }

        fn visit_argument(&mut self, argument: &str) -> Result<Flow, String> {
            let reply = self.on_argument.clone()?;
            self.events.push(Event::Argument(argument.to_string()));
            Ok(reply)
        }
    }

    #[test]
    fn test_visit_halt_from_long_option() {
        let mut visitor = Scripted::new(Ok(Flow::Halt), Ok(Flow::Continue));
        let scan = visit(&mut visitor, &["--out", "v", "later", "--next=x"]);

        assert_eq!(scan, Ok(Scan::Halted));
        assert_eq!(
            visitor.events,
            [Event::Option("out".to_string(), "v".to_string())]
        );
    }

    #[test]
    fn test_visit_halt_from_short_option() {
        let mut visitor = Scripted::new(Ok(Flow::Halt), Ok(Flow::Continue));
        let scan = visit(&mut visitor, &["-a", "v", "later", "-bw"]);

        assert_eq!(scan, Ok(Scan::Halted));
        assert_eq!(
            visitor.events,
            [Event::Option("a".to_string(), "v".to_string())]
        );

        // Halting on a suffix value skips the rest of the group's token too.
        let mut visitor = Scripted::new(Ok(Flow::Halt), Ok(Flow::Continue));
        let scan = visit(&mut visitor, &["-avalue", "later"]);

        assert_eq!(scan, Ok(Scan::Halted));
        assert_eq!(
            visitor.events,
            [Event::Option("a".to_string(), "value".to_string())]
        );
    }

    #[test]
    fn test_visit_propagates_option_error() {
        let mut visitor = Scripted::new(Err("bad option".to_string()), Ok(Flow::Continue));
        let scan = visit(&mut visitor, &["first", "--out=v", "later"]);

        assert_eq!(scan, Err("bad option".to_string()));
        assert_eq!(visitor.events, [Event::Argument("first".to_string())]);

        let mut visitor = Scripted::new(Err("bad option".to_string()), Ok(Flow::Continue));
        assert_eq!(
            visit(&mut visitor, &["-o", "v", "later"]),
            Err("bad option".to_string())
        );
        assert!(visitor.events.is_empty());
    }

    #[test]
    fn test_visit_propagates_argument_error() {
        let mut visitor = Scripted::new(Ok(Flow::Continue), Err("bad argument".to_string()));
        let scan = visit(&mut visitor, &["--out", "v", "stray", "--next=x"]);

        assert_eq!(scan, Err("bad argument".to_string()));
        assert_eq!(
            visitor.events,
            [Event::Option("out".to_string(), "v".to_string())]
        );

        // Arguments after the terminator fail the same way.
        let mut visitor = Scripted::new(Ok(Flow::Continue), Err("bad argument".to_string()));
        assert_eq!(
            visit(&mut visitor, &["--", "-x"]),
            Err("bad argument".to_string())
        );
        assert!(visitor.events.is_empty());
    }

    #[test]
    fn test_is_option_value() {
        assert!(is_option_value("value"));
        assert!(is_option_value("-1"));
        assert!(is_option_value("--9"));
        assert!(is_option_value(""));
        assert!(!is_option_value("-"));
        assert!(!is_option_value("--"));
        assert!(!is_option_value("-a"));
        assert!(!is_option_value("--all"));
    }
}
