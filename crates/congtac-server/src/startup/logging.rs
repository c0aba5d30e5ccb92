//! File-based logging with per-component log files.
//!
//! Components write to separate rolling log files with daily rotation:
//!
//! | Log File        | Component                    | Target Prefixes                          |
//! |-----------------|------------------------------|------------------------------------------|
//! | congtac.log     | Root logger (all components) | (all)                                    |
//! | core-auth.log   | Authentication and access    | congtac_auth, congtac_server::secured    |
//! | api.log         | HTTP handlers and services   | congtac_server::api, congtac_server::service |
//! | persistence.log | Database layer               | congtac_persistence                      |
//!
//! Log files land in `logs/` by default; override with the
//! `congtac.logs.path` config key or the `CONGTAC_LOG_DIR` env var.

use std::path::PathBuf;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

// ---------------------------------------------------------------------------
// Component log file definitions
// ---------------------------------------------------------------------------

/// Internal definition for a component log file.
struct ComponentLogDef {
    /// Log file name (e.g. "core-auth.log")
    file_name: &'static str,
    /// Target module prefixes routed to this file
    targets: &'static [&'static str],
}

const COMPONENT_LOGS: &[ComponentLogDef] = &[
    ComponentLogDef {
        file_name: "core-auth.log",
        targets: &[
            "congtac_auth",
            "congtac_server::secured",
            "congtac_server::middleware",
        ],
    },
    ComponentLogDef {
        file_name: "api.log",
        targets: &["congtac_server::api", "congtac_server::service"],
    },
    ComponentLogDef {
        file_name: "persistence.log",
        targets: &["congtac_persistence"],
    },
];

// ---------------------------------------------------------------------------
// Logging configuration
// ---------------------------------------------------------------------------

/// Logging configuration for the entire application.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Base log directory
    pub log_dir: PathBuf,
    /// Enable console output
    pub console_output: bool,
    /// Enable file logging
    pub file_logging: bool,
    /// Default log level
    pub level: Level,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            console_output: true,
            file_logging: true,
            level: Level::INFO,
        }
    }
}

impl LoggingConfig {
    /// Create from application configuration, honoring `CONGTAC_LOG_DIR`.
    pub fn from_config(log_dir: String, level: String) -> Self {
        let log_dir = std::env::var("CONGTAC_LOG_DIR").unwrap_or(log_dir);

        Self {
            log_dir: PathBuf::from(log_dir),
            console_output: true,
            file_logging: true,
            level: level.parse().unwrap_or(Level::INFO),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging guard
// ---------------------------------------------------------------------------

/// Guard that keeps the logging system alive.
///
/// Holds the file appender worker guards; must live as long as the
/// application so buffered output is flushed on shutdown.
pub struct LoggingGuard {
    _file_guards: Vec<WorkerGuard>,
}

// ---------------------------------------------------------------------------
// Initialization
// ---------------------------------------------------------------------------

/// Initialize the logging system with multi-file output.
///
/// Sets up console output, the root `congtac.log` that captures all events,
/// and the component files routed by tracing target. `RUST_LOG` overrides
/// the configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, Box<dyn std::error::Error>> {
    if config.file_logging {
        std::fs::create_dir_all(&config.log_dir)?;
    }

    let mut guards: Vec<WorkerGuard> = Vec::new();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    // --- Console layer ---
    if config.console_output {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));
        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_names(true)
            .with_filter(filter);
        layers.push(Box::new(console_layer));
    }

    // --- File layers ---
    if config.file_logging {
        // Root log file: congtac.log captures all events
        let root_appender =
            RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "congtac.log");
        let (root_nb, root_guard) = tracing_appender::non_blocking(root_appender);
        guards.push(root_guard);

        let root_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));
        let root_layer = fmt::layer()
            .with_writer(root_nb)
            .with_target(true)
            .with_ansi(false)
            .with_filter(root_filter);
        layers.push(Box::new(root_layer));

        // Component files routed by tracing target
        for component in COMPONENT_LOGS {
            let appender =
                RollingFileAppender::new(Rotation::DAILY, &config.log_dir, component.file_name);
            let (nb, guard) = tracing_appender::non_blocking(appender);
            guards.push(guard);

            let mut targets = Targets::new();
            for target in component.targets {
                targets = targets.with_target(*target, LevelFilter::from_level(config.level));
            }

            let layer = fmt::layer()
                .with_writer(nb)
                .with_target(true)
                .with_ansi(false)
                .with_filter(targets);
            layers.push(Box::new(layer));
        }
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    Ok(LoggingGuard {
        _file_guards: guards,
    })
}
