//! Construction-time settings.
//!
//! Whether a table passes its context object through is decided once, when
//! the table is built. Tables built with [`DispatchTable::builder`] start from
//! the process-wide default held here; [`TableBuilder::settings`] and
//! [`TableBuilder::pass_context`] override it per table. Changing the default
//! never affects tables that already exist.
//!
//! [`DispatchTable::builder`]: crate::DispatchTable::builder
//! [`TableBuilder::settings`]: crate::TableBuilder::settings
//! [`TableBuilder::pass_context`]: crate::TableBuilder::pass_context

use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable read by [`Settings::from_env`].
pub const PASS_CONTEXT_ENV: &str = "MULTIDISPATCH_PASS_CONTEXT";

static DEFAULT_PASS_CONTEXT: AtomicBool = AtomicBool::new(false);

/// Set the process-wide context-passing default for tables built afterwards.
pub fn set_default_pass_context(enabled: bool) {
    DEFAULT_PASS_CONTEXT.store(enabled, Ordering::Release);
}

/// The current process-wide context-passing default.
pub fn default_pass_context() -> bool {
    DEFAULT_PASS_CONTEXT.load(Ordering::Acquire)
}

/// Settings applied when a table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    /// Pass the context object to dispatch function and methods.
    pub pass_context: bool,
}

impl Settings {
    /// Snapshot of the process-wide defaults.
    pub fn current() -> Self {
        Self {
            pass_context: default_pass_context(),
        }
    }

    /// The process-wide defaults, overridden by [`PASS_CONTEXT_ENV`] when it
    /// holds a recognizable boolean.
    pub fn from_env() -> Self {
        let current = Self::current();
        match std::env::var(PASS_CONTEXT_ENV) {
            Ok(raw) => Self {
                pass_context: parse_flag(&raw).unwrap_or(current.pass_context),
            },
            Err(_) => current,
        }
    }

    /// Set the context-passing policy.
    pub fn with_pass_context(mut self, enabled: bool) -> Self {
        self.pass_context = enabled;
        self
    }

    /// Make these settings the process-wide default.
    pub fn install(self) {
        set_default_pass_context(self.pass_context);
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
