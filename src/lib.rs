//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# loggable

loggable turns a readable message template into a privacy-aware log call at compile time.

```rust
let name = "alice";
let count = 3u32;
loggable::log_info!("User {public: name} has {count} items");
```

The template above is compiled into the format string `"User %{public}s has %s items"` and the
argument list `[name, count]`. Nothing is parsed at runtime; a malformed template is a compile
error at the offending span.

# Severities

There is one macro per severity, from least to most severe:

| Macro           | Label    | Use for                                         |
|-----------------|----------|-------------------------------------------------|
| [`log_debug!`]  | `DEBUG`  | print-style debugging; never in release builds  |
| [`log_info!`]   | `INFO`   | helpful detail that is not needed in production |
| [`log_notice!`] | `NOTICE` | the default level for noteworthy events         |
| [`log_error!`]  | `ERROR`  | errors the program can recover from             |
| [`log_fault!`]  | `FAULT`  | bugs and broken invariants                      |

Records below [`config::minimum_severity`] are skipped without evaluating their arguments.

Each macro has an `_async` form, such as [`log_error_async!`], for use inside async code. It
renders the message right away and then awaits [`Logger::finish_log_record_async`] on each
logger.

# Templates

* `{expr}` interpolates any expression whose type implements [`privacy::Loggable`].
* `{public: expr}` marks the value as safe to show in full.
* `{name}` can refer to a trailing named argument: `log_notice!("took {ms}", ms = t.elapsed().as_millis())`.
  Like `format!`, each named argument is evaluated once.
* `{{` and `}}` are literal braces. A literal `%` needs no escaping.
* A leading expression followed by a comma picks the logger: `log_error!(my_logger, "...")`.

# Privacy

Values interpolated without `public:` are written with their redacted representation,
`<private>` for most types, unless [`config::set_reveal_private`] is on or the crate is built
with the `loggable_reveal_private` feature.

```rust
use loggable::InMemoryLogger;

let logger = InMemoryLogger::new();
let user = "alice";
let balance = 1200u32;
loggable::log_notice!(logger, "{public: user} has balance {balance}");
assert!(logger.drain_logs().ends_with("alice has balance <private>"));
```

# Loggers

Records go to every logger in the global list, which starts out with a [`StdErrorLogger`].
Use [`add_global_logger`] and [`set_global_loggers`] to change it, or implement [`Logger`]
for your own destination.
*/

mod dispatch;
pub mod format;
pub mod config;
pub mod global_logger;
mod inmemory_logger;
mod log_record;
mod logger;
mod macros;
pub mod privacy;
mod severity;
mod spinlock;
mod stderror_logger;
mod sys;

pub use global_logger::{add_global_logger, global_loggers, set_global_loggers};
pub use inmemory_logger::InMemoryLogger;
pub use log_record::LogRecord;
pub use logger::Logger;
pub use severity::Severity;
pub use stderror_logger::StdErrorLogger;

pub use loggable_proc::{format_string, log_debug, log_error, log_fault, log_info, log_notice};
pub use loggable_proc::{
    log_debug_async, log_error_async, log_fault_async, log_info_async, log_notice_async,
};

#[doc(hidden)]
pub mod hidden {
    pub use crate::dispatch::{
        log_format, log_post, log_post_async, log_post_to, log_post_to_async, log_pre,
    };
}

extern crate self as loggable;
