// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Logger
//!
//! [`InMemoryLogger`] keeps finished records as strings instead of writing them anywhere.
//! It is the logger to reach for in tests, and in environments where stderr is not visible.

use crate::log_record::LogRecord;
use crate::logger::Logger;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, MutexGuard};

/// A logger that stores each record as a line of text.
///
/// Pass it to a macro directly, or register it with
/// [`add_global_logger`](crate::add_global_logger) to capture every record.
///
/// ```rust
/// use loggable::InMemoryLogger;
///
/// fn function_under_test(logger: &InMemoryLogger) {
///     let code = 404u16;
///     let path = "/index.html";
///     loggable::log_error!(logger, "Request for {public: path} failed with {code}");
/// }
///
/// let logger = InMemoryLogger::new();
/// function_under_test(&logger);
///
/// let logs = logger.drain_logs();
/// assert!(logs.contains("Request for /index.html failed with <private>"));
/// assert_eq!(logger.drain_logs(), "");
/// ```
///
/// # Test isolation
///
/// Save and restore the global list around code that logs without an explicit logger:
///
/// ```rust
/// use loggable::InMemoryLogger;
/// use loggable::global_logger::{global_loggers, set_global_loggers};
/// use std::sync::Arc;
///
/// let original_loggers = global_loggers();
/// let test_logger = Arc::new(InMemoryLogger::new());
/// set_global_loggers(vec![test_logger.clone()]);
///
/// loggable::log_notice!("Test-specific log message");
/// assert!(test_logger.drain_logs().contains("Test-specific log message"));
///
/// set_global_loggers(original_loggers);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLogger {
    logs: Mutex<Vec<String>>,
}

/*
Boilerplate notes.

Default: an empty buffer is the obvious zero value.
Clone: no, a clone would silently split the captured logs in two.
PartialEq/Hash: equality of loggers is not meaningful.
*/

impl InMemoryLogger {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
        }
    }

    fn logs(&self) -> MutexGuard<'_, Vec<String>> {
        //a panicking test must not hide the logs of the next one
        self.logs.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Joins all stored records with newlines and clears the buffer.
    pub fn drain_logs(&self) -> String {
        let mut logs = self.logs();
        let result = logs.join("\n");
        logs.clear();
        result
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.logs().len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs().is_empty()
    }

    /**
    Writes all stored records to stderr (`console.log` on wasm) and clears the buffer.
    */
    pub fn drain_to_console(&self) {
        let mut logs = self.logs();
        for log in logs.iter() {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::log_1(&log.clone().into());
            #[cfg(not(target_arch = "wasm32"))]
            eprintln!("{}", log);
        }
        logs.clear();
    }
}

impl Logger for InMemoryLogger {
    fn finish_log_record(&self, record: LogRecord) {
        let log_string = record.to_string();
        self.logs().push(log_string);
    }

    fn finish_log_record_async<'s>(
        &'s self,
        record: LogRecord,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 's>> {
        Box::pin(async move {
            self.finish_log_record(record);
        })
    }

    fn prepare_to_die(&self) {
        //nothing buffered outside memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;
    use std::sync::Arc;

    fn record(text: &str) -> LogRecord {
        let mut record = LogRecord::new(Severity::Info);
        record.log(text);
        record
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn drain_joins_and_clears() {
        let logger = InMemoryLogger::new();
        assert!(logger.is_empty());
        logger.finish_log_record(record("first"));
        logger.finish_log_record(record("second"));
        assert_eq!(logger.len(), 2);
        assert_eq!(logger.drain_logs(), "first\nsecond");
        assert_eq!(logger.drain_logs(), "");
    }

    #[test_executors::async_test]
    async fn async_submission() {
        let logger = InMemoryLogger::new();
        logger.finish_log_record_async(record("async")).await;
        assert_eq!(logger.drain_logs(), "async");
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn drain_to_console_clears() {
        let logger = InMemoryLogger::new();
        logger.finish_log_record(record("to the console"));
        logger.drain_to_console();
        assert!(logger.is_empty());
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn usable_through_arc_and_reference() {
        let logger = Arc::new(InMemoryLogger::new());
        let by_arc: &dyn Logger = &logger;
        by_arc.finish_log_record(record("arc"));
        let by_ref = &*logger;
        Logger::finish_log_record(&by_ref, record("ref"));
        assert_eq!(logger.drain_logs(), "arc\nref");
    }
}
