//! Diagnostic output for tubeflow.
//!
//! Verbose mode is switched on by the `--verbose` flag or by setting
//! `TUBEFLOW_VERBOSE` to anything other than `0`/`false`. Messages go to
//! stderr through the `verbose!()` macro so they never mix with the
//! rendered preview on stdout.

use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable that turns verbose mode on without the CLI flag
pub const VERBOSE_ENV_VAR: &str = "TUBEFLOW_VERBOSE";

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enable or disable verbose logging
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Turn verbose mode on when the flag is set or the environment asks for it.
///
/// Returns the resulting state.
pub fn init(flag: bool) -> bool {
    let from_env = std::env::var(VERBOSE_ENV_VAR)
        .map(|v| env_value_enables(&v))
        .unwrap_or(false);
    let enabled = flag || from_env;
    set_verbose(enabled);
    enabled
}

fn env_value_enables(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "" | "0" | "false" | "off" | "no"
    )
}

/// Log a formatted message if verbose mode is enabled
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            eprintln!("[tubeflow] {}", format!($($arg)*));
        }
    };
}
