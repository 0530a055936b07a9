#![deny(missing_docs)]
//! Shared logging utilities for the fleet workspace.
//!
//! This crate provides the `fleet_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Library crates only
//! ever talk to the `log` facade through these macros; the binary decides
//! where records end up.

/// Re-exported so the macros resolve even where `log` is not a direct dependency.
#[doc(hidden)]
pub use log;

/// Log target used by the pure computation crates.
///
/// Lets the binary raise or silence engine chatter independently of its own output.
pub const ENGINE_TARGET: &str = "fleet::engine";

/// Log target used by the session/controller crate.
pub const SESSION_TARGET: &str = "fleet::session";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! fleet_trace {
    (target: $target:expr, $($arg:tt)*) => {{
        $crate::log::trace!(target: $target, $($arg)*);
    }};
    ($($arg:tt)*) => {{
        $crate::log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! fleet_debug {
    (target: $target:expr, $($arg:tt)*) => {{
        $crate::log::debug!(target: $target, $($arg)*);
    }};
    ($($arg:tt)*) => {{
        $crate::log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! fleet_info {
    (target: $target:expr, $($arg:tt)*) => {{
        $crate::log::info!(target: $target, $($arg)*);
    }};
    ($($arg:tt)*) => {{
        $crate::log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! fleet_warn {
    (target: $target:expr, $($arg:tt)*) => {{
        $crate::log::warn!(target: $target, $($arg)*);
    }};
    ($($arg:tt)*) => {{
        $crate::log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! fleet_error {
    (target: $target:expr, $($arg:tt)*) => {{
        $crate::log::error!(target: $target, $($arg)*);
    }};
    ($($arg:tt)*) => {{
        $crate::log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
