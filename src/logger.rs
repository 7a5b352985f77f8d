// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::log_record::LogRecord;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/**
A destination for finished log records.
*/
pub trait Logger: Debug + Send + Sync {
    /**
        Submits the log record for logging.
    */
    fn finish_log_record(&self, record: LogRecord);

    /**
    Submits the log record for logging asynchronously.

    Loggers may choose to implement this as a simple wrapper around [Self::finish_log_record].
    */
    fn finish_log_record_async<'s>(
        &'s self,
        record: LogRecord,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 's>>;

    /**
    The application may imminently exit.  Ensure all buffers are flushed and up to date.
    */
    fn prepare_to_die(&self);
}

//lets `log_info!(logger, ..)` take a logger by value, by reference or behind an Arc.
impl<L: Logger + ?Sized> Logger for &L {
    fn finish_log_record(&self, record: LogRecord) {
        (**self).finish_log_record(record)
    }

    fn finish_log_record_async<'s>(
        &'s self,
        record: LogRecord,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 's>> {
        (**self).finish_log_record_async(record)
    }

    fn prepare_to_die(&self) {
        (**self).prepare_to_die()
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn finish_log_record(&self, record: LogRecord) {
        (**self).finish_log_record(record)
    }

    fn finish_log_record_async<'s>(
        &'s self,
        record: LogRecord,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 's>> {
        (**self).finish_log_record_async(record)
    }

    fn prepare_to_die(&self) {
        (**self).prepare_to_die()
    }
}

/*
Boilerplate notes.

# Logger

I don't think Clone on Logger makes sense, so copy's out.
PartialEq and Eq are possible but it's a little unclear if we mean data equality or some kind of provenance-based thing.  Let's avoid that and not implement it.
Default is not necessarily sensible since who knows how the logger is constructed.
*/
