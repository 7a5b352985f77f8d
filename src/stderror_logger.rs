// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::log_record::LogRecord;
use crate::logger::Logger;

/**
The default logger. Writes one line per record to stderr, or to the browser console on wasm.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StdErrorLogger {}

/*
Boilerplate notes.

Zero-sized, so Copy/Eq/Hash/Default are all trivially right; every instance is the same logger.
Display: no meaningful representation.
*/

impl StdErrorLogger {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Logger for StdErrorLogger {
    fn finish_log_record(&self, record: LogRecord) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::Write;
            let mut lock = std::io::stderr().lock();
            //nowhere left to report a failure to write to stderr
            for part in &record.parts {
                let _ = lock.write_all(part.as_bytes());
            }
            let _ = lock.write_all(b"\n");
        }
        #[cfg(target_arch = "wasm32")]
        {
            use crate::Severity;
            let msg = record.to_string();
            match record.severity() {
                Severity::Debug => web_sys::console::debug_1(&msg.into()),
                Severity::Info => web_sys::console::info_1(&msg.into()),
                Severity::Notice => web_sys::console::log_1(&msg.into()),
                Severity::Error | Severity::Fault => web_sys::console::error_1(&msg.into()),
            }
        }
    }

    fn finish_log_record_async<'s>(
        &'s self,
        record: LogRecord,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + 's>> {
        Box::pin(async move { self.finish_log_record(record) })
    }

    fn prepare_to_die(&self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::Write;
            let _ = std::io::stderr().flush();
        }
    }
}
