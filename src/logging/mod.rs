//! Log output for the game binary.
//!
//! Filters come from [`TracingConfig`] unless `RUST_LOG` is set, in which case
//! the environment wins. Installing twice is harmless: the first subscriber
//! stays.

use std::time::Instant;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::span::EnteredSpan;
use tracing::{debug, debug_span};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Add it before any other plugin so their
/// `build` logs are kept.
pub struct LoggingPlugin {
    pub config: TracingConfig,
}

impl Plugin for LoggingPlugin {
    fn build(&self, _app: &mut App) {
        if !init_tracing(&self.config) {
            debug!("tracing subscriber already installed, keeping it");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// The `log` section of `config/game.ron`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracingConfig {
    pub default_level: LogLevel,
    /// `(target prefix, level)` pairs, most specific wins
    pub module_filters: Vec<(String, LogLevel)>,
    pub show_targets: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: LogLevel::Info,
            module_filters: vec![
                ("platformer_core::screens".to_string(), LogLevel::Info),
                ("platformer_core::tracker".to_string(), LogLevel::Debug),
                ("platformer_core::level".to_string(), LogLevel::Info),
                // bevy's renderer is chatty at info
                ("wgpu".to_string(), LogLevel::Warn),
            ],
            show_targets: true,
        }
    }
}

impl TracingConfig {
    /// Filter in `RUST_LOG` syntax, e.g. `info,wgpu=warn`.
    pub fn directives(&self) -> String {
        std::iter::once(self.default_level.as_str().to_string())
            .chain(
                self.module_filters
                    .iter()
                    .map(|(target, level)| format!("{target}={}", level.as_str())),
            )
            .collect::<Vec<_>>()
            .join(",")
    }

    /// `RUST_LOG` if set, else the configured directives. A target that does
    /// not parse drops the per-module filters and keeps the default level.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(self.directives()))
            .unwrap_or_else(|_| {
                EnvFilter::default().add_directive(LevelFilter::from(self.default_level).into())
            })
    }
}

/// Installs a compact fmt subscriber. Returns `false` when one was already
/// installed (by an earlier call or a test harness).
pub fn init_tracing(config: &TracingConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_target(config.show_targets)
        .compact()
        .try_init()
        .is_ok()
}

/// Enters a debug span for `name` and logs the elapsed time when dropped.
pub struct TimedSection {
    name: &'static str,
    started: Instant,
    _span: EnteredSpan,
}

impl TimedSection {
    pub fn start(name: &'static str) -> Self {
        Self {
            name,
            started: Instant::now(),
            _span: debug_span!("timed", section = name).entered(),
        }
    }
}

impl Drop for TimedSection {
    fn drop(&mut self) {
        let elapsed_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        debug!(section = self.name, elapsed_ms, "section finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filters() {
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
        assert_eq!(LogLevel::Error.as_str(), "error");
    }

    #[test]
    fn test_default_directives() {
        let directives = TracingConfig::default().directives();
        assert!(directives.starts_with("info,"));
        assert!(directives.contains("platformer_core::tracker=debug"));
        assert!(directives.ends_with("wgpu=warn"));
    }

    #[test]
    fn test_directives_without_modules() {
        let config = TracingConfig {
            default_level: LogLevel::Warn,
            module_filters: vec![],
            show_targets: false,
        };
        assert_eq!(config.directives(), "warn");
    }

    #[test]
    fn test_second_install_keeps_first() {
        let config = TracingConfig::default();
        init_tracing(&config);
        assert!(!init_tracing(&config));
    }

    #[test]
    fn test_plugin_tolerates_installed_subscriber() {
        init_tracing(&TracingConfig::default());
        App::new().add_plugins(LoggingPlugin {
            config: TracingConfig::default(),
        });
    }

    #[test]
    fn test_timed_section_records_elapsed() {
        let section = TimedSection::start("load_level");
        assert_eq!(section.name, "load_level");
        assert!(section.started <= Instant::now());
    }
}
