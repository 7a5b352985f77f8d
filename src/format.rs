// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of compiled format strings.
//!
//! The logging macros compile a template such as `"User {public: name} has {count} items"`
//! into the format string `"User %{public}s has %s items"` plus the argument list
//! `[name, count]`. This module does the reverse at runtime: it walks the format string and
//! writes each argument in place of its marker, under the marker's [`DisplayPolicy`].
//!
//! Recognized syntax:
//!
//! | Syntax        | Meaning                                     |
//! |---------------|---------------------------------------------|
//! | `%%`          | a literal `%`                               |
//! | `%s`          | next argument, default policy               |
//! | `%{public}s`  | next argument, shown in full                |
//! | `%{private}s` | next argument, redacted                     |
//!
//! ```
//! use loggable::format::render_to_string;
//!
//! let name = "alice";
//! let count = 3u32;
//! let out = render_to_string("User %{public}s has %s items (100%%)", &[&name, &count], false).unwrap();
//! assert_eq!(out, "User alice has <private> items (100%)");
//! ```

use crate::privacy::{DisplayPolicy, LogBuilder, Loggable, write_with_policy};
use std::fmt::Display;

/// A format string that can't be rendered.
///
/// Format strings produced by the logging macros are always well formed; these only come
/// from hand-built calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatError {
    /// `%` followed by something other than `%`, `s` or `{`, or by nothing.
    UnknownSpecifier { offset: usize, found: Option<char> },
    /// `%{` without a closing `}`.
    UnterminatedAnnotation { offset: usize },
    /// `%{name}s` where `name` is not `public` or `private`.
    UnknownAnnotation { offset: usize, annotation: String },
    /// The number of markers and the number of arguments differ.
    ArgumentCount { expected: usize, provided: usize },
}

impl Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::UnknownSpecifier {
                offset,
                found: Some(c),
            } => write!(f, "unknown conversion `%{}` at byte {}", c, offset),
            FormatError::UnknownSpecifier {
                offset,
                found: None,
            } => write!(f, "`%` at byte {} ends the format string", offset),
            FormatError::UnterminatedAnnotation { offset } => {
                write!(f, "unterminated `%{{` annotation at byte {}", offset)
            }
            FormatError::UnknownAnnotation { offset, annotation } => {
                write!(f, "unknown annotation `{}` at byte {}", annotation, offset)
            }
            FormatError::ArgumentCount { expected, provided } => write!(
                f,
                "format string has {} markers but {} arguments were provided",
                expected, provided
            ),
        }
    }
}

impl std::error::Error for FormatError {}

/// One piece of a parsed format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    /// Text with `%%` already collapsed.
    Literal(String),
    Value(DisplayPolicy),
}

/// Splits a format string into literal text and value markers.
pub fn parse(format: &str) -> Result<Vec<Piece>, FormatError> {
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut chars = format.char_indices();
    while let Some((offset, c)) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }
        let policy = match chars.next() {
            Some((_, '%')) => {
                literal.push('%');
                continue;
            }
            Some((_, 's')) => DisplayPolicy::Default,
            Some((_, '{')) => {
                let mut annotation = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    annotation.push(c);
                }
                if !closed {
                    return Err(FormatError::UnterminatedAnnotation { offset });
                }
                match chars.next() {
                    Some((_, 's')) => {}
                    other => {
                        return Err(FormatError::UnknownSpecifier {
                            offset,
                            found: other.map(|(_, c)| c),
                        });
                    }
                }
                DisplayPolicy::from_annotation(&annotation)
                    .ok_or(FormatError::UnknownAnnotation { offset, annotation })?
            }
            other => {
                return Err(FormatError::UnknownSpecifier {
                    offset,
                    found: other.map(|(_, c)| c),
                });
            }
        };
        if !literal.is_empty() {
            pieces.push(Piece::Literal(std::mem::take(&mut literal)));
        }
        pieces.push(Piece::Value(policy));
    }
    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    Ok(pieces)
}

/**
Renders `format` with `arguments` into `builder`.

The format is checked completely before anything is written, so on error the builder is
left untouched.
*/
pub fn render(
    format: &str,
    arguments: &[&dyn Loggable],
    reveal_private: bool,
    builder: &mut dyn LogBuilder,
) -> Result<(), FormatError> {
    let pieces = parse(format)?;
    let expected = pieces
        .iter()
        .filter(|p| matches!(p, Piece::Value(_)))
        .count();
    if expected != arguments.len() {
        return Err(FormatError::ArgumentCount {
            expected,
            provided: arguments.len(),
        });
    }
    let mut arguments = arguments.iter();
    for piece in &pieces {
        match piece {
            Piece::Literal(text) => builder.write(text),
            Piece::Value(policy) => {
                if let Some(argument) = arguments.next() {
                    write_with_policy(*argument, *policy, reveal_private, builder);
                }
            }
        }
    }
    Ok(())
}

pub fn render_to_string(
    format: &str,
    arguments: &[&dyn Loggable],
    reveal_private: bool,
) -> Result<String, FormatError> {
    let mut out = String::new();
    render(format, arguments, reveal_private, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn markers_take_arguments_in_order() {
        let a = "first";
        let b = "second";
        assert_eq!(
            render_to_string("%{public}s,%{public}s", &[&a, &b], false).unwrap(),
            "first,second"
        );
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn default_policy_redacts() {
        let x = 12345u32;
        assert_eq!(render_to_string("Count: %s", &[&x], false).unwrap(), "Count: <private>");
        assert_eq!(render_to_string("Count: %s", &[&x], true).unwrap(), "Count: 12345");
        assert_eq!(
            render_to_string("Count: %{private}s", &[&x], false).unwrap(),
            "Count: <private>"
        );
        assert_eq!(
            render_to_string("Count: %{public}s", &[&x], false).unwrap(),
            "Count: 12345"
        );
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn literal_only_and_empty() {
        assert_eq!(render_to_string("static message", &[], false).unwrap(), "static message");
        assert_eq!(render_to_string("", &[], false).unwrap(), "");
        assert_eq!(render_to_string("100%% done", &[], false).unwrap(), "100% done");
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn parse_pieces() {
        assert_eq!(
            parse("a%%b%s%{public}sc").unwrap(),
            vec![
                Piece::Literal("a%b".to_string()),
                Piece::Value(DisplayPolicy::Default),
                Piece::Value(DisplayPolicy::Public),
                Piece::Literal("c".to_string()),
            ]
        );
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn malformed_formats() {
        assert_eq!(
            parse("50%d"),
            Err(FormatError::UnknownSpecifier {
                offset: 2,
                found: Some('d')
            })
        );
        assert_eq!(
            parse("trailing %"),
            Err(FormatError::UnknownSpecifier {
                offset: 9,
                found: None
            })
        );
        assert_eq!(
            parse("%{public"),
            Err(FormatError::UnterminatedAnnotation { offset: 0 })
        );
        assert_eq!(
            parse("%{secret}s"),
            Err(FormatError::UnknownAnnotation {
                offset: 0,
                annotation: "secret".to_string()
            })
        );
        assert_eq!(
            parse("%{public}d"),
            Err(FormatError::UnknownSpecifier {
                offset: 0,
                found: Some('d')
            })
        );
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn argument_count_must_match() {
        let x = 1u8;
        assert_eq!(
            render_to_string("%s %s", &[&x], false),
            Err(FormatError::ArgumentCount {
                expected: 2,
                provided: 1
            })
        );
        assert_eq!(
            render_to_string("none", &[&x], false),
            Err(FormatError::ArgumentCount {
                expected: 0,
                provided: 1
            })
        );
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn errors_leave_builder_untouched() {
        let mut out = String::from("prefix");
        let x = 1u8;
        assert!(render("ok %s then %q", &[&x], false, &mut out).is_err());
        assert_eq!(out, "prefix");
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn error_messages() {
        let err = FormatError::ArgumentCount {
            expected: 2,
            provided: 3,
        };
        assert_eq!(
            err.to_string(),
            "format string has 2 markers but 3 arguments were provided"
        );
    }
}
