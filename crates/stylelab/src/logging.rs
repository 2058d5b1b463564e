//! Tracing setup: stderr plus an optional daily-rolling log file.

use std::path::{Path, PathBuf};

use env_flags::env_flags;
use once_cell::sync::OnceCell;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, prelude::*};

use crate::config::{LoggingCfg, UserConfig, env_set};

static FILE_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    Json,
    Compact,
    Pretty,
    Full,
}

impl LogStyle {
    /// JSON wins, then compact, then pretty.
    pub fn pick(json: bool, compact: bool, pretty: bool) -> Self {
        if json {
            LogStyle::Json
        } else if compact {
            LogStyle::Compact
        } else if pretty {
            LogStyle::Pretty
        } else {
            LogStyle::Full
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogOptions {
    pub filter: String,
    pub style: LogStyle,
    /// Directory for the rolling log file; `None` logs to stderr only.
    pub file_dir: Option<PathBuf>,
}

/// Logging overrides taken from the environment; `None` means unset.
#[derive(Debug, Clone, Default)]
pub struct LogEnv {
    pub filter: Option<String>,
    pub json: Option<bool>,
    pub compact: Option<bool>,
    pub pretty: Option<bool>,
    pub to_file: Option<bool>,
    pub dir: Option<PathBuf>,
}

impl LogEnv {
    /// Read the logging flags. A flag counts only when its variable is set
    /// and non-empty.
    pub fn from_env() -> Self {
        env_flags! {
            /// Tracing filter, e.g. "info", "debug", or targets format.
            RUST_LOG: &str = "info";
            /// Preferred filter env (alias). If set, overrides RUST_LOG.
            TRACING_FILTER: &str = "";
            /// Pretty formatting for logs (ignored if TRACING_JSON=true).
            TRACING_PRETTY: bool = false;
            /// Compact single-line formatting for logs (ignored if TRACING_JSON=true)
            TRACING_COMPACT: bool = true;
            /// JSON formatting for logs
            TRACING_JSON: bool = false;
            /// If true, also log to file under <STYLELAB_HOME>/logs or LOG_DIR
            LOG_TO_FILE: bool = false;
            /// Optional explicit log directory (absolute). Defaults to <STYLELAB_HOME>/logs
            LOG_DIR: &str = "";
        }

        let filter = if env_set("TRACING_FILTER") {
            Some((*TRACING_FILTER).to_string())
        } else if env_set("RUST_LOG") {
            Some((*RUST_LOG).to_string())
        } else {
            None
        };
        LogEnv {
            filter,
            json: env_set("TRACING_JSON").then(|| *TRACING_JSON),
            compact: env_set("TRACING_COMPACT").then(|| *TRACING_COMPACT),
            pretty: env_set("TRACING_PRETTY").then(|| *TRACING_PRETTY),
            to_file: env_set("LOG_TO_FILE").then(|| *LOG_TO_FILE),
            dir: env_set("LOG_DIR").then(|| PathBuf::from((*LOG_DIR).to_string())),
        }
    }

    /// Env values win; unset ones fall back to the config, then defaults.
    pub fn resolve(&self, home: &Path, cfg: Option<&LoggingCfg>) -> LogOptions {
        let filter = self
            .filter
            .clone()
            .or_else(|| cfg.and_then(|c| c.level.clone()))
            .unwrap_or_else(|| "info".to_string());
        let json = self.json.or(cfg.and_then(|c| c.json)).unwrap_or(false);
        let compact = self.compact.or(cfg.and_then(|c| c.compact)).unwrap_or(true);
        let pretty = self.pretty.or(cfg.and_then(|c| c.pretty)).unwrap_or(false);
        let to_file = self.to_file.or(cfg.and_then(|c| c.to_file)).unwrap_or(false);
        let dir = self.dir.clone().or_else(|| {
            cfg.and_then(|c| c.dir.as_deref())
                .map(crate::config::expand_home)
        });

        LogOptions {
            filter,
            style: LogStyle::pick(json, compact, pretty),
            file_dir: to_file.then(|| dir.unwrap_or_else(|| home.join("logs"))),
        }
    }
}

/// Resolve log options from env flags, falling back to the user config.
pub fn log_options(home: &Path, user_cfg: Option<&UserConfig>) -> LogOptions {
    let cfg = user_cfg.and_then(|c| c.logging.as_ref());
    LogEnv::from_env().resolve(home, cfg)
}

fn styled_layer<W>(style: LogStyle, writer: W, ansi: bool) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer);
    match style {
        LogStyle::Json => base.json().boxed(),
        LogStyle::Compact => base.compact().boxed(),
        LogStyle::Pretty => base.pretty().boxed(),
        LogStyle::Full => base.boxed(),
    }
}

/// Install the global subscriber. Logs always go to stderr so stdout stays
/// clean for rendered output.
pub fn init_tracing(opts: &LogOptions) {
    let filter = EnvFilter::try_new(&opts.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let mut layers = vec![styled_layer(opts.style, std::io::stderr, true)];

    let mut dir_error = None;
    if let Some(dir) = opts.file_dir.as_ref() {
        match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, "stylelab.log");
                let (nb, guard) = tracing_appender::non_blocking(appender);
                let _ = FILE_GUARD.set(guard);
                layers.push(styled_layer(opts.style, nb, false));
            }
            Err(e) => dir_error = Some((dir.clone(), e)),
        }
    }

    let subscriber = tracing_subscriber::registry().with(layers).with(filter);
    if let Err(e) = subscriber.try_init() {
        tracing::debug!("tracing already set: {:?}", e);
    }
    if let Some((dir, e)) = dir_error {
        tracing::warn!("failed to create log dir {}: {}", dir.display(), e);
    }
}
