// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record type for the loggable logging system.
//!
//! A [`LogRecord`] accumulates the parts of one message: the severity prefix, the call site,
//! a timestamp and the rendered template. Parts are stored separately and only joined when the
//! record is displayed.
//!
//! # Example
//!
//! ```rust
//! use loggable::{LogRecord, Severity};
//!
//! let mut record = LogRecord::new(Severity::Notice);
//! record.log("Processing request ");
//! record.log_owned(format!("#{}", 42));
//! record.log(" completed");
//! assert_eq!(record.to_string(), "Processing request #42 completed");
//! ```

use crate::Severity;
use crate::privacy::LogBuilder;
use std::fmt::{Debug, Display};
use std::sync::OnceLock;

static INITIAL_TIMESTAMP: OnceLock<crate::sys::Instant> = OnceLock::new();

fn initial_timestamp() -> crate::sys::Instant {
    *INITIAL_TIMESTAMP.get_or_init(crate::sys::Instant::now)
}

/**
A log record.

1.  Create a new [LogRecord].
2.  Progressively write to the [LogRecord].
3.  Finish the [LogRecord] and submit it to a [crate::Logger].
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    pub(crate) parts: Vec<String>,
    severity: Severity,
}

impl LogRecord {
    pub fn new(severity: Severity) -> Self {
        Self {
            parts: Vec::new(),
            severity,
        }
    }

    /**
    Append the message to the record.
    */
    pub fn log(&mut self, message: &str) {
        self.parts.push(message.to_string());
    }

    /**
    Append the message to the record, taking ownership of the message.
    */
    pub fn log_owned(&mut self, message: String) {
        self.parts.push(message);
    }

    /**
    Log the time since the first record, followed by a space.
    */
    pub fn log_timestamp(&mut self) -> crate::sys::Instant {
        let time = crate::sys::Instant::now();
        let duration = time.duration_since(initial_timestamp());
        self.log_owned(format!("[{:?}] ", duration));
        time
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

impl LogBuilder for LogRecord {
    fn write(&mut self, message: &str) {
        self.log(message);
    }
}

impl Default for LogRecord {
    fn default() -> Self {
        Self::new(Severity::default())
    }
}

impl Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for part in &self.parts {
            f.write_str(part)?;
        }
        Ok(())
    }
}
