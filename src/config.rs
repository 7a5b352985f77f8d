// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime configuration.
//!
//! Two process-wide switches control what the logging macros produce:
//!
//! - the **minimum severity**: records below it are skipped before any argument is rendered.
//!   Debug builds start at [`Severity::Debug`], release builds at [`Severity::Info`].
//! - **reveal private**: when set, values under the default policy are written in full instead
//!   of redacted. Off unless the `loggable_reveal_private` feature is enabled.
//!
//! ```
//! use loggable::Severity;
//! use loggable::config;
//!
//! config::set_minimum_severity(Severity::Error);
//! assert!(!config::is_enabled(Severity::Notice));
//! assert!(config::is_enabled(Severity::Fault));
//! # config::reset();
//! ```

use crate::Severity;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

#[cfg(debug_assertions)]
const DEFAULT_MINIMUM: Severity = Severity::Debug;
#[cfg(not(debug_assertions))]
const DEFAULT_MINIMUM: Severity = Severity::Info;

const DEFAULT_REVEAL_PRIVATE: bool = cfg!(feature = "loggable_reveal_private");

static MINIMUM_SEVERITY: AtomicU8 = AtomicU8::new(DEFAULT_MINIMUM.to_u8());
static REVEAL_PRIVATE: AtomicBool = AtomicBool::new(DEFAULT_REVEAL_PRIVATE);

/// Records below `severity` are dropped.
pub fn set_minimum_severity(severity: Severity) {
    MINIMUM_SEVERITY.store(severity.to_u8(), Ordering::Relaxed);
}

pub fn minimum_severity() -> Severity {
    Severity::from_u8(MINIMUM_SEVERITY.load(Ordering::Relaxed))
}

/**
Writes values logged under the default policy in full.

Meant for local debugging sessions; leave it off for anything that leaves the machine.
*/
pub fn set_reveal_private(reveal: bool) {
    REVEAL_PRIVATE.store(reveal, Ordering::Relaxed);
}

pub fn reveal_private() -> bool {
    REVEAL_PRIVATE.load(Ordering::Relaxed)
}

/// Whether a record of `severity` would be produced.
///
/// `Debug` records are never produced in release builds.
pub fn is_enabled(severity: Severity) -> bool {
    if severity == Severity::Debug && !cfg!(debug_assertions) {
        return false;
    }
    severity >= minimum_severity()
}

/// Restores the build defaults.
pub fn reset() {
    set_minimum_severity(DEFAULT_MINIMUM);
    set_reveal_private(DEFAULT_REVEAL_PRIVATE);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    //config is process-wide; tests that touch it take this lock.
    pub(crate) static CONFIG_GUARD: Mutex<()> = Mutex::new(());

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn minimum_severity_filters() {
        let _guard = CONFIG_GUARD.lock().unwrap();
        set_minimum_severity(Severity::Notice);
        assert!(!is_enabled(Severity::Debug));
        assert!(!is_enabled(Severity::Info));
        assert!(is_enabled(Severity::Notice));
        assert!(is_enabled(Severity::Fault));
        assert_eq!(minimum_severity(), Severity::Notice);
        reset();
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn defaults() {
        let _guard = CONFIG_GUARD.lock().unwrap();
        reset();
        assert_eq!(minimum_severity(), DEFAULT_MINIMUM);
        assert_eq!(reveal_private(), DEFAULT_REVEAL_PRIVATE);
        assert_eq!(is_enabled(Severity::Debug), cfg!(debug_assertions));
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn reveal_switch() {
        let _guard = CONFIG_GUARD.lock().unwrap();
        set_reveal_private(true);
        assert!(reveal_private());
        set_reveal_private(false);
        assert!(!reveal_private());
        reset();
    }
}
