// SPDX-License-Identifier: MIT OR Apache-2.0

/// Returns whether a record of the given [`Severity`](crate::Severity) would be produced.
///
/// The logging macros wrap their whole expansion in this check, so arguments are not
/// evaluated for skipped records.
///
/// ```
/// use loggable::Severity;
///
/// if loggable::severity_enabled!(Severity::Fault) {
///     // build an expensive diagnostic
/// }
/// assert!(loggable::severity_enabled!(Severity::Fault));
/// ```
#[macro_export]
macro_rules! severity_enabled {
    ($severity:expr) => {
        $crate::config::is_enabled($severity)
    };
}

#[cfg(test)]
mod tests {
    use crate::Severity;
    use crate::config::{self, tests::CONFIG_GUARD};

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn follows_minimum_severity() {
        let _guard = CONFIG_GUARD.lock().unwrap();
        config::set_minimum_severity(Severity::Error);
        assert!(!severity_enabled!(Severity::Notice));
        assert!(severity_enabled!(Severity::Error));
        config::reset();
    }
}
