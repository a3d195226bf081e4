use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use spdlog::sink::{RotatingFileSink, RotationPolicy, StdStream, StdStreamSink};
use spdlog::{info, Level, LevelFilter, Logger, LoggerBuilder};

use crate::config::{Config, Log, LogLevel};

const MAX_LOG_FILES: usize = 60;
const FLUSH_PERIOD: Duration = Duration::from_secs(2);

impl From<LogLevel> for Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        }
    }
}

/// Where the rotating log file goes when `[log]` has no `location`.
pub fn log_location(log: &Log) -> PathBuf {
    log.location.clone().unwrap_or_else(|| {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("CloudForge")
            .join("log")
            .join("build.log")
    })
}

fn add_console_sinks(builder: &mut LoggerBuilder) -> spdlog::Result<()> {
    let stdout = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stdout)
        .level_filter(LevelFilter::MoreVerbose(Level::Warn))
        .build()?);

    let stderr = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stderr)
        .level_filter(LevelFilter::MoreSevereEqual(Level::Warn))
        .build()?);

    builder.sink(stdout).sink(stderr);

    Ok(())
}

fn daily_sink(location: &Path) -> spdlog::Result<Arc<RotatingFileSink>> {
    let sink = RotatingFileSink::builder()
        .base_path(location)
        .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
        .max_files(MAX_LOG_FILES)
        .rotate_on_open(false)
        .build()?;
    Ok(Arc::new(sink))
}

/// Build logger for a `[log]` section: one file per day, console sinks on request.
pub fn build_logger(log: &Log) -> spdlog::Result<Arc<Logger>> {
    let mut builder = Logger::builder();
    builder.sink(daily_sink(&log_location(log))?);
    if log.log_to_console {
        add_console_sinks(&mut builder)?;
    }

    let logger = Arc::new(builder.build()?);
    logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
    logger.set_flush_period(Some(FLUSH_PERIOD));
    logger.set_level_filter(LevelFilter::MoreSevereEqual(log.level.into()));
    Ok(logger)
}

/// Without a `[log]` section the default console logger stays in place.
pub fn configure_logger(config: &Config) -> spdlog::Result<()> {
    let Some(ref log) = config.log else {
        return Ok(());
    };

    spdlog::set_default_logger(build_logger(log)?);
    info!("Logging to {}", log_location(log).display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_conversion() {
        assert_eq!(Level::from(LogLevel::Critical), Level::Critical);
        assert_eq!(Level::from(LogLevel::Debug), Level::Debug);
        assert_eq!(Level::from(LogLevel::Trace), Level::Trace);
    }

    #[test]
    fn test_log_location() {
        let log = Log { level: LogLevel::Info, log_to_console: false, location: Some(PathBuf::from("/var/log/cf.log")) };
        assert_eq!(log_location(&log), PathBuf::from("/var/log/cf.log"));

        let log = Log { location: None, ..log };
        assert!(log_location(&log).ends_with("CloudForge/log/build.log"));
    }

    #[test]
    fn test_build_logger_writes_daily_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = Log { level: LogLevel::Warn, log_to_console: false, location: Some(dir.path().join("build.log")) };

        let logger = build_logger(&log).unwrap();
        assert!(logger.should_log(Level::Error));
        assert!(!logger.should_log(Level::Info));

        spdlog::warn!(logger: logger, "slug collision in blog");
        spdlog::info!(logger: logger, "below the threshold");
        logger.flush();

        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().path()).collect();
        assert_eq!(files.len(), 1);
        let text = std::fs::read_to_string(&files[0]).unwrap();
        assert!(text.contains("slug collision in blog"));
        assert!(!text.contains("below the threshold"));
    }
}
