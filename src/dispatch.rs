// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record construction and dispatch for the logging macros.
//!
//! Every macro call site expands to the same three steps:
//!
//! 1. [`log_pre`] creates a [`LogRecord`] and writes the prelude: severity label, call site and
//!    elapsed time.
//! 2. [`log_format`] renders the compiled format string with its arguments into the record.
//! 3. [`log_post`] (or [`log_post_to`]) submits it. The `_async` macros use
//!    [`log_post_async`] / [`log_post_to_async`] instead.
//!
//! All of these are reachable as `loggable::hidden::*` and are not meant to be called by hand.

use crate::Severity;
use crate::config;
use crate::format;
use crate::log_record::LogRecord;
use crate::logger::Logger;
use crate::privacy::Loggable;

/// Creates a record for a log call at `file:line:column`.
///
/// ```rust
/// # use loggable::Severity;
/// # use loggable::hidden::{log_format, log_post, log_pre};
/// // This is typically called by the macro, not directly
/// let record = log_pre(Severity::Notice, file!(), line!(), column!());
/// let record = log_format(record, "Cache warmed", &[]);
/// log_post(record);
/// ```
pub fn log_pre(severity: Severity, file: &'static str, line: u32, column: u32) -> LogRecord {
    let mut record = LogRecord::new(severity);
    record.log(severity.label());
    record.log(": ");

    //file, line
    record.log(file);
    record.log_owned(format!(":{}:{} ", line, column));

    record.log_timestamp();
    record
}

/// Renders `format` with `arguments` into the record.
///
/// A malformed format is noted in the record rather than dropping it.
pub fn log_format(mut record: LogRecord, format: &str, arguments: &[&dyn Loggable]) -> LogRecord {
    if let Err(e) = format::render(format, arguments, config::reveal_private(), &mut record) {
        //keep the record; the call site still happened
        record.log_owned(format!("<malformed log format {:?}: {}>", format, e));
    }
    record
}

/// Hands the record to every global logger.
pub fn log_post(record: LogRecord) {
    let global_loggers = crate::global_logger::global_loggers();
    for logger in global_loggers {
        logger.finish_log_record(record.clone());
    }
}

/// Hands the record to `logger` only.
pub fn log_post_to<L: Logger + ?Sized>(logger: &L, record: LogRecord) {
    logger.finish_log_record(record);
}

/// Hands the record to every global logger through its async submission.
pub async fn log_post_async(record: LogRecord) {
    let global_loggers = crate::global_logger::global_loggers();
    for logger in global_loggers {
        logger.finish_log_record_async(record.clone()).await;
    }
}

/// Hands the record to `logger` only, through its async submission.
pub async fn log_post_to_async<L: Logger + ?Sized>(logger: &L, record: LogRecord) {
    logger.finish_log_record_async(record).await;
}
