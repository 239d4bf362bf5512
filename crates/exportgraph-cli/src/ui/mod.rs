//! Terminal output helpers.
//!
//! Status messages and the analysis summary go to stderr; stdout carries only
//! command output. Color follows `--no-color`, `NO_COLOR`, `FORCE_COLOR` and
//! whether stderr is a terminal.

mod messages;
mod summary;

use std::sync::atomic::{AtomicBool, Ordering};

pub use messages::{error, info, success, warning};
pub use summary::{format_chain, format_duration, print_summary};

static COLORS: AtomicBool = AtomicBool::new(false);

/// Check if color output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` enables them even without a
/// terminal; otherwise stderr must be attended.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Initialize color support. Call once from `main`.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    console::set_colors_enabled_stderr(enabled);
    COLORS.store(enabled, Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
