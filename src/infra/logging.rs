//! Process-wide logging. `init` is called once from bootstrap; everything
//! afterwards logs through the installed subscriber.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{format::Writer, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::infra::{
    config::{LogConfig, SyslogConfig},
    error::AppError,
    syslog::SyslogSink,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Files written by the installed subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTargets {
    pub info_file: PathBuf,
    pub debug_file: Option<PathBuf>,
}

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "[{}]", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

pub fn log_stamp() -> String {
    chrono::Local::now().format("%Y%m%d-%H%M%S%6f").to_string()
}

pub fn init(
    logging: &LogConfig,
    syslog: Option<&SyslogConfig>,
    debug: bool,
) -> Result<LogTargets, AppError> {
    let (subscriber, targets) = build_subscriber(logging, syslog, debug, &log_stamp())?;
    subscriber
        .try_init()
        .map_err(|error| AppError::LoggingInit(Box::new(error)))?;

    Ok(targets)
}

pub fn build_subscriber(
    logging: &LogConfig,
    syslog: Option<&SyslogConfig>,
    debug: bool,
    stamp: &str,
) -> Result<(impl Subscriber + Send + Sync + 'static, LogTargets), AppError> {
    fs::create_dir_all(&logging.dir).map_err(|source| AppError::LogSink {
        target: logging.dir.display().to_string(),
        source,
    })?;

    let mut layers: Vec<BoxedLayer> = Vec::new();

    layers.push(
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .without_time()
            .with_level(false)
            .with_target(false)
            .with_filter(LevelFilter::INFO)
            .boxed(),
    );

    let info_prefix = format!("info-{stamp}");
    layers.push(
        file_layer(&logging.dir, &info_prefix)?
            .with_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(&logging.level)),
            )
            .boxed(),
    );

    let debug_file = if debug {
        let debug_prefix = format!("debug-{stamp}");
        layers.push(
            file_layer(&logging.dir, &debug_prefix)?
                .with_filter(LevelFilter::DEBUG)
                .boxed(),
        );
        Some(logging.dir.join(format!("{debug_prefix}.log")))
    } else {
        None
    };

    if let Some(syslog) = syslog {
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(SyslogSink::connect(syslog)?)
                .with_ansi(false)
                .without_time()
                .with_level(false)
                .with_target(false)
                .with_filter(LevelFilter::INFO)
                .boxed(),
        );
    }

    let targets = LogTargets {
        info_file: logging.dir.join(format!("{info_prefix}.log")),
        debug_file,
    };

    Ok((Registry::default().with(layers), targets))
}

fn file_layer(
    dir: &Path,
    prefix: &str,
) -> Result<impl Layer<Registry> + Send + Sync + 'static, AppError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(dir)
        .map_err(|error| AppError::LoggingInit(Box::new(error)))?;

    Ok(tracing_subscriber::fmt::layer()
        .with_writer(appender)
        .with_ansi(false)
        .with_target(false)
        .with_timer(LocalTimer))
}
