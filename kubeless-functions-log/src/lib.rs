//! `log` adapter for kubeless Functions
//!
//! This crate adapts [`log`](https://docs.rs/log) to kubeless Functions. `log` is a standard logging crate,
//! used widely across the ecosystem.
//!
//! Records from the SDK crates (targets under `kubeless_functions`) are system logs and are filtered
//! separately from your Function's own logs, so you can keep the SDK quiet while debugging your code.
//!
//! You are likely to be interested in the sibling crates:
//! * `kubeless-functions`: The handler contract, handler selection and the invoke entry point.
//! * `kubeless-functions-host`: Events, invocation contexts and log sinks.

use kubeless_functions_host::logging::{LogConfiguration, LogConfigurationError, LogDestination};
use log::SetLoggerError;
use thiserror::Error;

mod sink_logger;

use sink_logger::{Output, SinkLog};

#[derive(Debug, Error)]
pub enum LogConfigError {
    #[error("Failed to open log destination: {cause}")]
    Destination {
        #[from]
        cause: LogConfigurationError,
    },
    #[error("Failed to initialize logger: {cause}")]
    Init { cause: SetLoggerError },
}

/// Initializes the logging system with the specified log level and destination.
///
/// The level applies to both your Function's logs and the SDK's logs.
///
/// You **must** only call this function once.
pub fn configure_logging(
    level: log::LevelFilter,
    destination: LogDestination,
) -> Result<(), LogConfigError> {
    configure_logs([LogConfiguration::new(destination)
        .with_log_level(level)
        .with_system_log_level(level)])
}

/// Initializes the logging system with one or more destinations, each with its own filters.
///
/// ```rust,no_run
/// use kubeless_functions_host::logging::{LogConfiguration, LogDestination};
///
/// kubeless_functions_log::configure_logs([
///     // Everything from the Function, only problems from the SDK.
///     LogConfiguration::new(LogDestination::Stderr)
///         .with_log_level(log::LevelFilter::Debug)
///         .with_system_log_level(log::LevelFilter::Warn),
///     // A file with the SDK's own records only.
///     LogConfiguration::new(LogDestination::file("/var/log/function-system.log"))
///         .with_log_level(log::LevelFilter::Off)
///         .with_system_log_level(log::LevelFilter::Debug),
/// ])?;
/// # Ok::<(), kubeless_functions_log::LogConfigError>(())
/// ```
///
/// You **must** only call this function once.
pub fn configure_logs(
    configurations: impl IntoIterator<Item = LogConfiguration>,
) -> Result<(), LogConfigError> {
    let outputs = configurations
        .into_iter()
        .map(|configuration| -> Result<Output, LogConfigError> {
            Ok(Output {
                log_level: configuration.log_level,
                system_log_level: configuration.system_log_level,
                sink: configuration.destination.open()?,
            })
        })
        .collect::<Result<Vec<_>, LogConfigError>>()?;

    let logger = SinkLog::new(outputs);
    let max_level = logger.max_level();
    log::set_boxed_logger(Box::new(logger)).map_err(|e| LogConfigError::Init { cause: e })?;
    log::set_max_level(max_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installing_twice_is_an_error() {
        // Only this test installs the global logger, so the first call succeeds.
        configure_logs([]).expect("first installation");
        let second = configure_logs([]);
        assert!(matches!(second, Err(LogConfigError::Init { .. })));
    }
}
