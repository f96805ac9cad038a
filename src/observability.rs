//! Structured diagnostics hooks for the encoder and store.
//!
//! The `log_metric!` macro emits key-value metric lines through the `log`
//! facade, only in debug builds. The `#[cfg(debug_assertions)]` attribute
//! ensures the macro body is compiled out of release builds entirely.

/// Logs a structured key-value metric line at debug level, only in debug builds.
///
/// # Example
/// ```
/// use plume_cache::log_metric;
/// let rows = 4;
/// log_metric!("event" = "encode", "outcome" = "ok", "rows" = &rows);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+
            log::debug!("PLUME_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}
