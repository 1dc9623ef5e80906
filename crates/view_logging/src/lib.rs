#![deny(missing_docs)]
//! Shared logging utilities for the groupview workspace.
//!
//! This crate provides the `view_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the current view session generation.
    ///
    /// Bumped by the shell on every group transition so that log lines from
    /// superseded sessions can be told apart.
    static SESSION_GEN: Cell<u64> = const { Cell::new(0) };
}

/// Sets the view session generation for the current thread.
/// This should be called by the shell whenever the active group changes.
pub fn set_session_gen(generation: u64) {
    SESSION_GEN.with(|v| v.set(generation));
}

/// Retrieves the view session generation for the current thread.
/// Returns 0 if the generation has not been set.
pub fn get_session_gen() -> u64 {
    SESSION_GEN.with(|v| v.get())
}

/// Logs a trace-level message, stamped with the session generation.
#[macro_export]
macro_rules! view_trace {
    ($($arg:tt)*) => {{
        log::trace!("[gen {}] {}", $crate::get_session_gen(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message, stamped with the session generation.
#[macro_export]
macro_rules! view_info {
    ($($arg:tt)*) => {{
        log::info!("[gen {}] {}", $crate::get_session_gen(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message, stamped with the session generation.
#[macro_export]
macro_rules! view_debug {
    ($($arg:tt)*) => {{
        log::debug!("[gen {}] {}", $crate::get_session_gen(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message, stamped with the session generation.
#[macro_export]
macro_rules! view_warn {
    ($($arg:tt)*) => {{
        log::warn!("[gen {}] {}", $crate::get_session_gen(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message, stamped with the session generation.
#[macro_export]
macro_rules! view_error {
    ($($arg:tt)*) => {{
        log::error!("[gen {}] {}", $crate::get_session_gen(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
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
