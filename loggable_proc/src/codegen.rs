//SPDX-License-Identifier: MIT OR Apache-2.0

//! Emits the replacement expression for a compiled template.

use crate::parser::NamedArgument;
use crate::template::{CompiledCall, binding_ident};
use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{Expr, LitStr};

/// How the finished record is handed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Post {
    Sync,
    /// `.await`s the loggers' async submission; the call must sit in an async context.
    Async,
}

/**
Builds the logging call for `call`.

```ignore
{
    if loggable::severity_enabled!(loggable::Severity::Info) {
        let record = {
            loggable::hidden::log_format(
                loggable::hidden::log_pre(loggable::Severity::Info, file!(), line!(), column!()),
                "User %{public}s logged in",
                &[&(name) as &dyn loggable::privacy::Loggable],
            )
        };
        loggable::hidden::log_post(record);
    }
}
```

`record` is a mixed-site local, so it never shadows a user variable. Named arguments are
evaluated once, into mixed-site locals bound by a `match` around the render step, the same
way `format_args!` binds its arguments. With a `logger`, `log_post_to(&(logger), record)`
replaces `log_post`; [`Post::Async`] uses the `_async` variants and awaits them. Rendering
ends before the await, so no argument borrow is held across it.
*/
pub fn log_call(
    call: &CompiledCall,
    logger: Option<&Expr>,
    named: &[NamedArgument],
    post: Post,
) -> TokenStream {
    let severity = format_ident!("{}", call.severity.variant_name());
    let format = LitStr::new(&call.format, Span::call_site());
    let arguments: Vec<TokenStream> = call
        .arguments
        .iter()
        .map(|argument| {
            let span = argument.span();
            quote_spanned! {span=> &(#argument) as &dyn loggable::privacy::Loggable }
        })
        .collect();

    let mut render = quote! {
        loggable::hidden::log_format(
            loggable::hidden::log_pre(loggable::Severity::#severity, file!(), line!(), column!()),
            #format,
            &[#(#arguments),*],
        )
    };
    if !named.is_empty() {
        let values = named.iter().map(|argument| &argument.value);
        let bindings = named.iter().map(|argument| binding_ident(&argument.name));
        render = quote! {
            match (#(&(#values),)*) {
                (#(#bindings,)*) => #render,
            }
        };
    }

    let record = Ident::new("record", Span::mixed_site());
    let post = match (logger, post) {
        (None, Post::Sync) => quote! {
            loggable::hidden::log_post(#record);
        },
        (Some(logger), Post::Sync) => quote! {
            loggable::hidden::log_post_to(&(#logger), #record);
        },
        (None, Post::Async) => quote! {
            loggable::hidden::log_post_async(#record).await;
        },
        (Some(logger), Post::Async) => quote! {
            loggable::hidden::log_post_to_async(&(#logger), #record).await;
        },
    };

    quote! {
        {
            if loggable::severity_enabled!(loggable::Severity::#severity) {
                let #record = { #render };
                #post
            }
        }
    }
}

/// Just the format string, as a `&'static str` literal.
pub fn format_literal(call: &CompiledCall) -> TokenStream {
    let format = LitStr::new(&call.format, Span::call_site());
    quote!(#format)
}
