// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide logger list.
//!
//! Every macro call without an explicit logger is delivered to each logger in this list. The
//! list starts out holding a single [`StdErrorLogger`], so logging works without setup.
//!
//! The list sits behind a spinlock rather than a mutex so it can be used from the wasm main
//! thread. The lock is only held to clone or replace the `Arc`s, never while a logger runs.
//!
//! ```
//! use loggable::global_logger::{add_global_logger, global_loggers};
//! use loggable::InMemoryLogger;
//! use std::sync::Arc;
//!
//! let before = global_loggers().len();
//! let logger = Arc::new(InMemoryLogger::new());
//! add_global_logger(logger.clone());
//! assert_eq!(global_loggers().len(), before + 1);
//!
//! let job = "nightly";
//! loggable::log_error!("Job {public: job} failed");
//! assert!(logger.drain_logs().contains("Job nightly failed"));
//! ```

use crate::logger::Logger;
use crate::spinlock::Spinlock;
use crate::stderror_logger::StdErrorLogger;
use std::sync::{Arc, OnceLock};

static GLOBAL_LOGGERS: OnceLock<Spinlock<Vec<Arc<dyn Logger>>>> = OnceLock::new();

fn loggers() -> &'static Spinlock<Vec<Arc<dyn Logger>>> {
    GLOBAL_LOGGERS.get_or_init(|| Spinlock::new(vec![Arc::new(StdErrorLogger::new())]))
}

/// The current global loggers.
///
/// Returns clones of the `Arc`s, so the loggers stay alive for the caller even if the list
/// is replaced meanwhile.
pub fn global_loggers() -> Vec<Arc<dyn Logger>> {
    loggers().read().clone()
}

/// Appends `logger` to the global list.
pub fn add_global_logger(logger: Arc<dyn Logger>) {
    loggers().write().push(logger);
}

/**
Replaces the global list.

An empty list is allowed; records without an explicit logger are then dropped.

```
use loggable::global_logger::set_global_loggers;
use loggable::InMemoryLogger;
use std::sync::Arc;

let logger = Arc::new(InMemoryLogger::new());
set_global_loggers(vec![logger.clone()]);

loggable::log_notice!("Only captured in memory");
assert!(logger.drain_logs().contains("Only captured in memory"));
```
*/
pub fn set_global_loggers(new_loggers: Vec<Arc<dyn Logger>>) {
    let old = std::mem::replace(&mut *loggers().write(), new_loggers);
    //dropped outside the lock
    drop(old);
}

/// Asks every global logger to flush.
///
/// Call this before the process exits, for example from a panic hook.
pub fn prepare_to_die() {
    for logger in global_loggers() {
        logger.prepare_to_die();
    }
}
