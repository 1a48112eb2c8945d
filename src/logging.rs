//! Logger bootstrap for hosts and tests.
//!
//! The core only emits through the `log` facade. Hosts that already install
//! a logger can skip this module; everything here is a no-op once a global
//! logger exists.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Where and how log records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOptions {
    /// Default filter when `RUST_LOG` is unset.
    pub level: LevelFilter,
    /// Route output through the test harness so it is captured per test.
    pub capture: bool,
}

impl LogOptions {
    /// `debug` when `verbose`, otherwise `info`; writes straight to stderr.
    pub fn new(verbose: bool) -> Self {
        Self {
            level: if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            capture: false,
        }
    }

    /// Debug output captured by the test harness.
    pub fn for_tests() -> Self {
        Self {
            level: LevelFilter::Debug,
            capture: true,
        }
    }
}

/// Installs the global logger for a host binary.
///
/// `RUST_LOG` overrides the default level.
pub fn init(verbose: bool) {
    install(LogOptions::new(verbose));
}

/// Installs a capturing debug logger; meant for `tests/` and unit tests.
pub fn init_for_tests() {
    install(LogOptions::for_tests());
}

/// Installs the global logger with explicit options.
///
/// Returns `false` when another logger was already installed.
pub fn install(options: LogOptions) -> bool {
    let env = Env::default().default_filter_or(options.level.as_str());
    let mut builder = Builder::from_env(env);
    builder
        .is_test(options.capture)
        .target(Target::Stderr)
        .format_timestamp_millis()
        .format_module_path(false);
    builder.try_init().is_ok()
}
