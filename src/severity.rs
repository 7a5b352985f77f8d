// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

/**
How serious a log record is.

Each severity has its own entry point (`log_debug!`, `log_info!`, ...). Variants are ordered
from least to most serious, which is what [`crate::config::set_minimum_severity`] compares
against.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    /// Development detail. Only produced in debug builds.
    Debug,
    /// Helpful but not essential.
    Info,
    /// Ordinary events worth keeping. This is the default level.
    #[default]
    Notice,
    /// A runtime error.
    Error,
    /// A programmer error or a bug in another component.
    Fault,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Notice,
        Severity::Error,
        Severity::Fault,
    ];

    /// The prefix written in front of each record.
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Notice => "NOTICE",
            Severity::Error => "ERROR",
            Severity::Fault => "FAULT",
        }
    }

    pub(crate) const fn to_u8(self) -> u8 {
        self as u8
    }

    pub(crate) const fn from_u8(value: u8) -> Severity {
        match value {
            0 => Severity::Debug,
            1 => Severity::Info,
            2 => Severity::Notice,
            3 => Severity::Error,
            _ => Severity::Fault,
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
