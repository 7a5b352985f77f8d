//SPDX-License-Identifier: MIT OR Apache-2.0

//! # Loggable Procedural Macros
//!
//! This crate provides the macros behind the loggable logging library. Each macro takes a
//! template literal and compiles it, at build time, into a printf-style format string plus
//! an ordered list of argument expressions.
//!
//! ## Architecture
//!
//! Every entry point goes through the same three steps:
//! 1. **Parse**: the macro input is scanned into a `Template` of literal and
//!    placeholder segments. Malformed templates stop here with a compile error.
//! 2. **Compile**: `compile` turns the template into a format string and
//!    argument list. Placeholders marked `public` get a `%{public}s` marker, all others `%s`.
//! 3. **Emit**: the generated block starts a `LogRecord` with `loggable::hidden::log_pre`,
//!    renders the format into it with `loggable::hidden::log_format` and dispatches it with
//!    `loggable::hidden::log_post`. The `_async` entry points await the loggers instead.
//!
//! ## Usage Example
//!
//! ```rust
//! let name = "alice";
//! let count = 3u32;
//! // This macro call:
//! loggable::log_info!("User {public: name} has {count} items");
//!
//! // Expands to approximately:
//! // {
//! //     if loggable::severity_enabled!(loggable::Severity::Info) {
//! //         let record = {
//! //             loggable::hidden::log_format(
//! //                 loggable::hidden::log_pre(loggable::Severity::Info, file!(), line!(), column!()),
//! //                 "User %{public}s has %s items",
//! //                 &[&(name) as &dyn loggable::privacy::Loggable,
//! //                   &(count) as &dyn loggable::privacy::Loggable],
//! //             )
//! //         };
//! //         loggable::hidden::log_post(record);
//! //     }
//! // }
//! ```

use proc_macro::TokenStream;

mod codegen;
mod parser;
mod template;

use codegen::Post;
use parser::MacroInput;
use template::{Severity, compile};

fn expand(input: TokenStream, severity: Severity, post: Post) -> TokenStream {
    let input = syn::parse_macro_input!(input as MacroInput);
    match input.to_template() {
        Ok(template) => codegen::log_call(
            &compile(template, severity),
            input.logger.as_ref(),
            &input.named,
            post,
        )
        .into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Logs a template at the `debug` level.
///
/// Debug records are only produced in debug builds, and only while the configured minimum
/// severity is `Debug`.
///
/// # Syntax
/// ```ignore
/// loggable::log_debug!("literal text {expr} {public: expr}");
/// loggable::log_debug!("with {key}", key = some.expression());
/// loggable::log_debug!(logger, "to a specific logger {x}");
/// ```
///
/// # Examples
/// ```
/// let x = 23u32;
/// loggable::log_debug!("Count: {x}");
/// ```
#[proc_macro]
pub fn log_debug(input: TokenStream) -> TokenStream {
    expand(input, Severity::Debug, Post::Sync)
}

/// Logs a template at the `info` level.
///
/// Values interpolated with `{expr}` use the default display policy, which redacts values
/// that might be private. Use `{public: expr}` for values that are safe to show.
///
/// # Examples
/// ```
/// let name = String::from("alice");
/// loggable::log_info!("User {public: name} logged in");
/// ```
///
/// An unknown modifier is a compile error:
/// ```compile_fail
/// let name = "alice";
/// loggable::log_info!("User {private: name} logged in");
/// ```
///
/// So is an unterminated placeholder:
/// ```compile_fail
/// let name = "alice";
/// loggable::log_info!("User {name logged in");
/// ```
#[proc_macro]
pub fn log_info(input: TokenStream) -> TokenStream {
    expand(input, Severity::Info, Post::Sync)
}

/// Logs a template at the `notice` level, the default level for ordinary events.
///
/// # Examples
/// ```
/// let path = "/tmp/cache";
/// loggable::log_notice!("Cache rebuilt at {public: path} (100% complete)");
/// ```
#[proc_macro]
pub fn log_notice(input: TokenStream) -> TokenStream {
    expand(input, Severity::Notice, Post::Sync)
}

/// Logs a template at the `error` level.
///
/// # Examples
/// ```
/// let code = 404u16;
/// let url = "https://example.com/private";
/// loggable::log_error!("Request to {url} failed with {public: code}");
/// ```
///
/// Named arguments work like `format!`: each is evaluated once, however many placeholders
/// use it.
/// ```
/// # let response = (500u16,);
/// loggable::log_error!("Upstream said {public: status} ({status})", status = response.0);
/// ```
///
/// A named argument that the template never uses is a compile error:
/// ```compile_fail
/// loggable::log_error!("Nothing to see", status = 500u16);
/// ```
#[proc_macro]
pub fn log_error(input: TokenStream) -> TokenStream {
    expand(input, Severity::Error, Post::Sync)
}

/// Logs a template at the `fault` level, for programmer errors.
///
/// # Examples
/// ```
/// use loggable::InMemoryLogger;
///
/// let logger = InMemoryLogger::new();
/// let index = 7usize;
/// loggable::log_fault!(logger, "Index {public: index} out of bounds");
/// assert!(logger.drain_logs().contains("Index 7 out of bounds"));
/// ```
#[proc_macro]
pub fn log_fault(input: TokenStream) -> TokenStream {
    expand(input, Severity::Fault, Post::Sync)
}

/// Async form of [`log_debug!`]; awaits each logger's async submission.
///
/// Arguments are rendered before the first await, so the future only holds the finished
/// record.
///
/// # Examples
/// ```
/// # async fn example() {
/// let attempt = 2u8;
/// loggable::log_debug_async!("retrying, attempt {attempt}");
/// # }
/// ```
#[proc_macro]
pub fn log_debug_async(input: TokenStream) -> TokenStream {
    expand(input, Severity::Debug, Post::Async)
}

/// Async form of [`log_info!`].
#[proc_macro]
pub fn log_info_async(input: TokenStream) -> TokenStream {
    expand(input, Severity::Info, Post::Async)
}

/// Async form of [`log_notice!`].
#[proc_macro]
pub fn log_notice_async(input: TokenStream) -> TokenStream {
    expand(input, Severity::Notice, Post::Async)
}

/// Async form of [`log_error!`].
///
/// # Examples
/// ```
/// # async fn example(logger: &loggable::InMemoryLogger) {
/// let status = 503u16;
/// loggable::log_error_async!(logger, "upstream returned {public: status}");
/// # }
/// ```
#[proc_macro]
pub fn log_error_async(input: TokenStream) -> TokenStream {
    expand(input, Severity::Error, Post::Async)
}

/// Async form of [`log_fault!`].
#[proc_macro]
pub fn log_fault_async(input: TokenStream) -> TokenStream {
    expand(input, Severity::Fault, Post::Async)
}

/// Expands to the compiled format string of a template, without logging anything.
///
/// Placeholder expressions are not evaluated.
///
/// # Examples
/// ```
/// assert_eq!(
///     loggable::format_string!("User {public: name} logged in from {addr}"),
///     "User %{public}s logged in from %s"
/// );
/// assert_eq!(loggable::format_string!("100% done"), "100%% done");
/// ```
#[proc_macro]
pub fn format_string(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as MacroInput);
    match input.to_template() {
        //the format does not depend on severity
        Ok(template) => codegen::format_literal(&compile(template, Severity::Info)).into(),
        Err(err) => err.to_compile_error().into(),
    }
}
