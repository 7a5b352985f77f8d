//SPDX-License-Identifier: MIT OR Apache-2.0

//! Macro input parsing.
//!
//! Turns `[logger,] "template" [, name = expr]*` into a [`MacroInput`], then scans the
//! template literal into a [`Template`]. All malformed input is rejected here with a
//! diagnostic; the compiler only ever sees well-formed templates.

use crate::template::{Modifier, SourceExpression, Template};
use proc_macro2::Span;
use std::collections::{HashMap, HashSet};
use std::iter::Peekable;
use std::ops::Range;
use std::str::CharIndices;
use syn::parse::{Parse, ParseStream};
use syn::{Expr, Ident, LitStr, Token};

/// `name = expr` following the template.
pub struct NamedArgument {
    pub name: Ident,
    pub value: Expr,
}

pub struct MacroInput {
    /// Explicit destination; when absent the record goes to the global loggers.
    pub logger: Option<Expr>,
    pub template: LitStr,
    pub named: Vec<NamedArgument>,
}

impl Parse for MacroInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            return Err(input.error("expected a string literal template"));
        }
        let logger = if input.peek(LitStr) {
            None
        } else {
            let logger: Expr = input.parse()?;
            input.parse::<Token![,]>()?;
            Some(logger)
        };
        let template: LitStr = input
            .parse()
            .map_err(|e| syn::Error::new(e.span(), "expected a string literal template"))?;

        let mut named = Vec::new();
        while !input.is_empty() {
            input.parse::<Token![,]>()?;
            //trailing comma
            if input.is_empty() {
                break;
            }
            let name: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let value: Expr = input.parse()?;
            named.push(NamedArgument { name, value });
        }
        Ok(MacroInput {
            logger,
            template,
            named,
        })
    }
}

impl MacroInput {
    pub fn to_template(&self) -> syn::Result<Template> {
        parse_template(&self.template, &self.named)
    }
}

/**
Scans a template literal.

- `{{` and `}}` are literal braces.
- `{expr}` is a placeholder with the default policy.
- `{public: expr}` is a placeholder shown as-is.
- A bare identifier that names one of `named` refers to that argument's binding.

Diagnostics point at the offending placeholder where the compiler can resolve a span inside
the literal, and at the whole literal otherwise.
*/
pub fn parse_template(literal: &LitStr, named: &[NamedArgument]) -> syn::Result<Template> {
    let source = literal.value();

    let mut by_name: HashMap<String, &NamedArgument> = HashMap::new();
    for argument in named {
        if by_name
            .insert(argument.name.to_string(), argument)
            .is_some()
        {
            return Err(syn::Error::new(
                argument.name.span(),
                format!("duplicate argument named `{}`", argument.name),
            ));
        }
    }
    let mut used: HashSet<String> = HashSet::new();

    let mut template = Template::new();
    let mut literal_text = String::new();
    let mut chars = source.char_indices().peekable();
    while let Some((offset, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                literal_text.push('{');
            }
            '{' => {
                let (body, close) = take_placeholder(&mut chars).ok_or_else(|| {
                    syn::Error::new(
                        subspan(literal, offset..source.len()),
                        "unterminated placeholder in template; expected `}`",
                    )
                })?;
                if !literal_text.is_empty() {
                    template.push_literal(std::mem::take(&mut literal_text));
                }
                let span = subspan(literal, offset..close + 1);
                let (modifier, expression_text) = split_modifier(&body, literal, offset + 1)?;
                let key = expression_text.trim();
                let expression = match by_name.get(key) {
                    Some(argument) => {
                        used.insert(key.to_string());
                        SourceExpression::binding(&argument.name)
                    }
                    None => SourceExpression::parse(expression_text, span)?,
                };
                template.push_placeholder(expression, modifier);
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                literal_text.push('}');
            }
            '}' => {
                return Err(syn::Error::new(
                    subspan(literal, offset..offset + 1),
                    "unmatched `}` in template; use `}}` for a literal brace",
                ));
            }
            other => literal_text.push(other),
        }
    }
    if !literal_text.is_empty() {
        template.push_literal(literal_text);
    }

    for argument in named {
        if !used.contains(&argument.name.to_string()) {
            return Err(syn::Error::new(
                argument.name.span(),
                format!("named argument `{}` is never used", argument.name),
            ));
        }
    }
    Ok(template)
}

/**
Span of `range`, given in bytes of the literal's value.

Only plain literals without escapes map byte for byte onto their source; raw strings and
escapes fall back to the whole literal, as does a compiler without subspan support.
*/
fn subspan(literal: &LitStr, range: Range<usize>) -> Span {
    let token = literal.token();
    let repr = token.to_string();
    let value = literal.value();
    let plain = repr.len() == value.len() + 2
        && repr.starts_with('"')
        && repr.ends_with('"')
        && repr[1..repr.len() - 1] == value;
    if plain {
        if let Some(span) = token.subspan(range.start + 1..range.end + 1) {
            return span;
        }
    }
    literal.span()
}

/// Consumes up to the `}` closing the current placeholder and returns the body with the
/// offset of that `}`. Braces nest.
fn take_placeholder(chars: &mut Peekable<CharIndices<'_>>) -> Option<(String, usize)> {
    let mut body = String::new();
    let mut depth = 0usize;
    for (offset, c) in chars.by_ref() {
        match c {
            '{' => depth += 1,
            '}' if depth == 0 => return Some((body, offset)),
            '}' => depth -= 1,
            _ => {}
        }
        body.push(c);
    }
    None
}

/// Splits `label: expr` into its modifier and expression. `a::b` is not a label.
///
/// `body_start` is the offset of `body` in the literal's value.
fn split_modifier<'b>(
    body: &'b str,
    literal: &LitStr,
    body_start: usize,
) -> syn::Result<(Option<Modifier>, &'b str)> {
    let Some(colon) = body.find(':') else {
        return Ok((None, body));
    };
    if body[colon + 1..].starts_with(':') {
        return Ok((None, body));
    }
    let label = body[..colon].trim();
    if !is_identifier(label) {
        return Ok((None, body));
    }
    match Modifier::from_label(label) {
        Some(modifier) => Ok((Some(modifier), &body[colon + 1..])),
        None => {
            let label_start = body_start + (colon - body[..colon].trim_start().len());
            Err(syn::Error::new(
                subspan(literal, label_start..label_start + label.len()),
                format!(
                    "unknown modifier `{}`; the only supported modifier is `{}`",
                    label,
                    Modifier::Public.label()
                ),
            ))
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Segment;
    use quote::quote;

    fn parse(tokens: proc_macro2::TokenStream) -> syn::Result<Template> {
        syn::parse2::<MacroInput>(tokens)?.to_template()
    }

    fn placeholders(template: &Template) -> Vec<(String, Option<Modifier>)> {
        template
            .segments()
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder {
                    expression,
                    modifier,
                } => Some((expression.text().to_string(), *modifier)),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    #[test]
    fn literal_only() {
        let template = parse(quote!("static message")).unwrap();
        assert_eq!(
            template.segments(),
            &[Segment::Literal("static message".to_string())]
        );
    }

    #[test]
    fn empty_literal_is_empty_template() {
        let template = parse(quote!("")).unwrap();
        assert!(template.segments().is_empty());
    }

    #[test]
    fn default_and_public_placeholders() {
        let template = parse(quote!("User {public: name} has {count} items")).unwrap();
        assert_eq!(template.segments().len(), 5);
        assert_eq!(
            placeholders(&template),
            vec![
                ("name".to_string(), Some(Modifier::Public)),
                ("count".to_string(), None),
            ]
        );
        assert_eq!(template.segments()[0], Segment::Literal("User ".to_string()));
        assert_eq!(template.segments()[4], Segment::Literal(" items".to_string()));
    }

    #[test]
    fn escaped_braces() {
        let template = parse(quote!("{{literal}} {x}")).unwrap();
        assert_eq!(
            template.segments()[0],
            Segment::Literal("{literal} ".to_string())
        );
        assert_eq!(template.placeholder_count(), 1);
    }

    #[test]
    fn expressions_are_kept_whole() {
        let template = parse(quote!("{items.len()} {public: a + b} {std::f64::consts::PI}")).unwrap();
        assert_eq!(
            placeholders(&template),
            vec![
                ("items . len ()".to_string(), None),
                ("a + b".to_string(), Some(Modifier::Public)),
                ("std :: f64 :: consts :: PI".to_string(), None),
            ]
        );
    }

    #[test]
    fn nested_braces_stay_in_the_expression() {
        let template = parse(quote!("{ { let v = 1; v } }")).unwrap();
        assert_eq!(template.placeholder_count(), 1);
    }

    #[test]
    fn named_arguments_refer_to_their_binding() {
        let template = parse(quote!("Job {public: job} took {secs}", job = job.name(), secs = 3)).unwrap();
        assert_eq!(
            placeholders(&template),
            vec![
                ("job".to_string(), Some(Modifier::Public)),
                ("secs".to_string(), None),
            ]
        );
    }

    #[test]
    fn named_argument_used_twice_shares_one_binding() {
        let template = parse(quote!("{public: n} and {n}", n = next())).unwrap();
        let tokens: Vec<String> = template
            .segments()
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder { expression, .. } => {
                    Some(quote::ToTokens::to_token_stream(expression).to_string())
                }
                Segment::Literal(_) => None,
            })
            .collect();
        assert_eq!(tokens, vec!["__loggable_n", "__loggable_n"]);
    }

    #[test]
    fn leading_logger_expression() {
        let input = syn::parse2::<MacroInput>(quote!(my_logger, "hello {x}")).unwrap();
        assert!(input.logger.is_some());
        assert_eq!(input.template.value(), "hello {x}");
        let input = syn::parse2::<MacroInput>(quote!("hello")).unwrap();
        assert!(input.logger.is_none());
    }

    #[test]
    fn trailing_comma() {
        let template = parse(quote!("{a}", a = 1,)).unwrap();
        assert_eq!(template.placeholder_count(), 1);
    }

    #[test]
    fn unknown_modifier_is_rejected() {
        let err = parse(quote!("{private: x}")).err().unwrap();
        assert!(err.to_string().contains("unknown modifier `private`"));
        let err = parse(quote!("{x:?}")).err().unwrap();
        assert!(err.to_string().contains("unknown modifier `x`"));
    }

    #[test]
    fn unterminated_placeholder_is_rejected() {
        let err = parse(quote!("value {x")).err().unwrap();
        assert!(err.to_string().contains("unterminated placeholder"));
    }

    #[test]
    fn unmatched_close_brace_is_rejected() {
        let err = parse(quote!("value } here")).err().unwrap();
        assert!(err.to_string().contains("unmatched `}`"));
    }

    #[test]
    fn empty_placeholder_is_rejected() {
        let err = parse(quote!("value {}")).err().unwrap();
        assert!(err.to_string().contains("empty placeholder"));
        let err = parse(quote!("value {public: }")).err().unwrap();
        assert!(err.to_string().contains("empty placeholder"));
    }

    #[test]
    fn non_literal_template_is_rejected() {
        assert!(syn::parse2::<MacroInput>(quote!()).is_err());
        assert!(syn::parse2::<MacroInput>(quote!(logger, 42)).is_err());
    }

    #[test]
    fn unused_named_argument_is_rejected() {
        let err = parse(quote!("{a}", a = 1, b = 2)).err().unwrap();
        assert!(err.to_string().contains("`b` is never used"));
    }

    #[test]
    fn duplicate_named_argument_is_rejected() {
        let err = parse(quote!("{a}", a = 1, a = 2)).err().unwrap();
        assert!(err.to_string().contains("duplicate argument named `a`"));
    }

    #[test]
    fn raw_strings_are_accepted() {
        let template = parse(quote!(r#"say "{public: word}""#)).unwrap();
        assert_eq!(
            template.segments()[0],
            Segment::Literal("say \"".to_string())
        );
        assert_eq!(template.placeholder_count(), 1);
    }

    #[test]
    fn diagnostics_survive_escapes_and_raw_strings() {
        let err = parse(quote!("tab\t {x:?}")).err().unwrap();
        assert!(err.to_string().contains("unknown modifier `x`"));
        let err = parse(quote!(r"raw {  nope: x}")).err().unwrap();
        assert!(err.to_string().contains("unknown modifier `nope`"));
        let err = parse(quote!("café } {x")).err().unwrap();
        assert!(err.to_string().contains("unmatched `}`"));
        let err = parse(quote!("café {x")).err().unwrap();
        assert!(err.to_string().contains("unterminated placeholder"));
    }
}
