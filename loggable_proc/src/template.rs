//SPDX-License-Identifier: MIT OR Apache-2.0

//! The template compiler.
//!
//! A [`Template`] is the already-parsed form of one log message: literal text interleaved
//! with placeholders. [`compile`] walks it once and produces a [`CompiledCall`], a
//! printf-style format string plus the ordered list of argument expressions that fill it.
//!
//! ```ignore
//! // "User {public: name} logged in" at info level compiles to
//! // format:    "User %{public}s logged in"
//! // arguments: [name]
//! ```
//!
//! Nothing in here evaluates or inspects an expression. Expressions are carried as tokens
//! and re-emitted in the generated call.

use proc_macro2::{Group, Ident, Span, TokenStream, TokenTree};
use quote::ToTokens;
use std::fmt::{Debug, Display};

/// Marker emitted for a placeholder that uses the backend's default display policy.
pub const DEFAULT_MARKER: &str = "%s";
/// Marker emitted for a placeholder annotated `public`.
pub const PUBLIC_MARKER: &str = "%{public}s";

/// The five logging entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Notice,
    Error,
    Fault,
}

impl Severity {
    #[cfg(test)]
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Notice,
        Severity::Error,
        Severity::Fault,
    ];

    /// Name of the matching `loggable::Severity` variant.
    pub fn variant_name(self) -> &'static str {
        match self {
            Severity::Debug => "Debug",
            Severity::Info => "Info",
            Severity::Notice => "Notice",
            Severity::Error => "Error",
            Severity::Fault => "Fault",
        }
    }
}

/// Display-policy override carried by a placeholder.
///
/// A placeholder without a modifier gets the backend default, which redacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Public,
}

impl Modifier {
    /// Maps an interpolation label to a modifier. Only `public` is recognized.
    pub fn from_label(label: &str) -> Option<Modifier> {
        match label {
            "public" => Some(Modifier::Public),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Modifier::Public => "public",
        }
    }
}

/**
An interpolated expression, kept as source tokens.

A `SourceExpression` is never empty: both constructors require a parsed [`syn::Expr`], so a
placeholder without an expression cannot be represented and is reported where it is written.
*/
#[derive(Clone)]
pub struct SourceExpression {
    tokens: TokenStream,
    text: String,
    span: Span,
}

impl SourceExpression {
    /**
    Parses `text` as a Rust expression.

    Every token of the result is re-spanned to `span`, usually the template literal, so that
    name resolution and type errors land on the call site.
    */
    pub fn parse(text: &str, span: Span) -> syn::Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(syn::Error::new(
                span,
                "empty placeholder; expected an expression between `{` and `}`",
            ));
        }
        let expr: syn::Expr = syn::parse_str(trimmed).map_err(|e| {
            syn::Error::new(
                span,
                format!("invalid expression `{}` in placeholder: {}", trimmed, e),
            )
        })?;
        let tokens = respan(expr.to_token_stream(), span);
        Ok(Self {
            text: tokens.to_string(),
            tokens,
            span,
        })
    }

    /**
    Refers to the local that holds a named argument's value.

    Named arguments are evaluated once, before the record is built; every placeholder that
    names one reads the same local.
    */
    pub fn binding(name: &Ident) -> Self {
        Self {
            tokens: binding_ident(name).to_token_stream(),
            text: name.to_string(),
            span: name.span(),
        }
    }

    /// The expression as normalized token text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// The local bound to named argument `name`. Mixed-site, so user code can't see it.
pub fn binding_ident(name: &Ident) -> Ident {
    let name = name.to_string();
    Ident::new(
        &format!("__loggable_{}", name.trim_start_matches("r#")),
        Span::mixed_site(),
    )
}

fn respan(tokens: TokenStream, span: Span) -> TokenStream {
    tokens
        .into_iter()
        .map(|tree| match tree {
            TokenTree::Group(group) => {
                let mut respanned = Group::new(group.delimiter(), respan(group.stream(), span));
                respanned.set_span(span);
                TokenTree::Group(respanned)
            }
            mut other => {
                other.set_span(span);
                other
            }
        })
        .collect()
}

impl ToTokens for SourceExpression {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(self.tokens.clone());
    }
}

impl PartialEq for SourceExpression {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for SourceExpression {}

impl Debug for SourceExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SourceExpression").field(&self.text).finish()
    }
}

impl Display for SourceExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// One unit of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied into the format string.
    Literal(String),
    /// One interpolated value.
    Placeholder {
        expression: SourceExpression,
        modifier: Option<Modifier>,
    },
}

/// An ordered sequence of segments, as parsed from a single macro invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_literal(&mut self, text: impl Into<String>) {
        self.segments.push(Segment::Literal(text.into()));
    }

    pub fn push_placeholder(&mut self, expression: SourceExpression, modifier: Option<Modifier>) {
        self.segments.push(Segment::Placeholder {
            expression,
            modifier,
        });
    }

    #[cfg(test)]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn placeholder_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Placeholder { .. }))
            .count()
    }
}

impl FromIterator<Segment> for Template {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/**
Output of [`compile`].

`format` holds exactly one marker per entry of `arguments`, in the same order.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledCall {
    pub severity: Severity,
    pub format: String,
    pub arguments: Vec<SourceExpression>,
}

/**
Compiles a template into a format string and argument list.

Literal text is copied through with `%` doubled, so the backend renders it as a single `%`.
Each placeholder becomes [`DEFAULT_MARKER`], or [`PUBLIC_MARKER`] when annotated `public`,
and its expression is appended to the argument list.
*/
pub fn compile(template: Template, severity: Severity) -> CompiledCall {
    let mut format = String::new();
    let mut arguments = Vec::with_capacity(template.placeholder_count());
    for segment in template.segments {
        match segment {
            Segment::Literal(text) => push_escaped(&mut format, &text),
            Segment::Placeholder {
                expression,
                modifier,
            } => {
                match modifier {
                    Some(Modifier::Public) => format.push_str(PUBLIC_MARKER),
                    None => format.push_str(DEFAULT_MARKER),
                }
                arguments.push(expression);
            }
        }
    }
    CompiledCall {
        severity,
        format,
        arguments,
    }
}

fn push_escaped(format: &mut String, literal: &str) {
    for c in literal.chars() {
        if c == '%' {
            format.push_str("%%");
        } else {
            format.push(c);
        }
    }
}
