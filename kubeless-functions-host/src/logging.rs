//! Log sinks: where a Function's diagnostic records go.
//!
//! A [LogSink] is handed to every invocation through its
//! [InvocationContext](crate::context::InvocationContext), so Functions log through a
//! capability they were given instead of a process-wide logger.
use std::{
    fmt,
    fs::OpenOptions,
    io::{self, Write},
    path::PathBuf,
    sync::Mutex,
};

use thiserror::Error;
use time::format_description::well_known::Rfc3339;

/// One diagnostic record.
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    /// Severity of the record.
    pub level: log::Level,
    /// Who produced the record: a function name, or a module path and location.
    pub origin: &'a str,
    /// The message itself.
    pub message: fmt::Arguments<'a>,
}

impl LogRecord<'_> {
    /// Renders the record as `{LEVEL} {timestamp} {origin} {message}`.
    pub fn format_line(&self) -> String {
        let utc_now = time::OffsetDateTime::now_utc();
        let timestamp = utc_now
            .format(&Rfc3339)
            .unwrap_or("<unknown>".to_string());
        format!(
            "{} {timestamp} {} {}",
            self.level.as_str(),
            self.origin,
            self.message
        )
    }
}

/// Something that accepts diagnostic records.
pub trait LogSink: Send + Sync {
    /// Emits one record. Callers treat failures as best-effort and drop them.
    fn emit(&self, record: &LogRecord<'_>) -> Result<(), LogSinkError>;
}

/// Why a sink could not accept a record.
#[derive(Debug, Error)]
pub enum LogSinkError {
    #[error("failed to write log record: {cause}")]
    /// The underlying writer failed
    Io {
        /// The io error
        #[from]
        cause: io::Error,
    },
    #[error("log sink is unavailable: {message}")]
    /// The sink cannot take records at all
    Unavailable {
        /// What went wrong
        message: String,
    },
}

/// Forwards records to the [log] facade, with the record origin as the target.
///
/// This is the default sink, so Functions log wherever the process logger sends things.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeSink;

impl LogSink for FacadeSink {
    fn emit(&self, record: &LogRecord<'_>) -> Result<(), LogSinkError> {
        log::log!(target: record.origin, record.level, "{}", record.message);
        Ok(())
    }
}

/// Drops every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl LogSink for DiscardSink {
    fn emit(&self, _record: &LogRecord<'_>) -> Result<(), LogSinkError> {
        Ok(())
    }
}

/// Writes one formatted line per record to a writer.
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> Result<W, LogSinkError> {
        self.writer.into_inner().map_err(|_| LogSinkError::Unavailable {
            message: "writer lock poisoned".to_string(),
        })
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn emit(&self, record: &LogRecord<'_>) -> Result<(), LogSinkError> {
        let line = record.format_line();
        let mut writer = self.writer.lock().map_err(|_| LogSinkError::Unavailable {
            message: "writer lock poisoned".to_string(),
        })?;
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }
}

impl<W> fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink").finish_non_exhaustive()
    }
}

/// A record kept by a [MemorySink].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    /// Severity of the record.
    pub level: log::Level,
    /// Who produced the record.
    pub origin: String,
    /// The rendered message.
    pub message: String,
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<CapturedRecord>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything emitted so far.
    pub fn records(&self) -> Vec<CapturedRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LogSink for MemorySink {
    fn emit(&self, record: &LogRecord<'_>) -> Result<(), LogSinkError> {
        let mut records = self.records.lock().map_err(|_| LogSinkError::Unavailable {
            message: "record lock poisoned".to_string(),
        })?;
        records.push(CapturedRecord {
            level: record.level,
            origin: record.origin.to_string(),
            message: record.message.to_string(),
        });
        Ok(())
    }
}

/// Where do you want your logs to go?
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// The process's standard error
    Stderr,
    /// The process's standard output
    Stdout,
    /// A file, appended to and created if missing
    File {
        /// Path of the log file
        path: PathBuf,
    },
}

impl LogDestination {
    /// Creates a File destination
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Opens the destination as a sink.
    pub fn open(&self) -> Result<Box<dyn LogSink>, LogConfigurationError> {
        let sink: Box<dyn LogSink> = match self {
            LogDestination::Stderr => Box::new(WriterSink::new(io::stderr())),
            LogDestination::Stdout => Box::new(WriterSink::new(io::stdout())),
            LogDestination::File { path } => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|cause| LogConfigurationError::File {
                        path: path.clone(),
                        cause,
                    })?;
                Box::new(WriterSink::new(file))
            }
        };
        Ok(sink)
    }
}

/// A single configuration for a destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfiguration {
    /// At what level would you like your function's logs to be filtered into this destination?
    pub log_level: log::LevelFilter,
    /// At what level would you like the SDK's own logs to be filtered into this destination?
    pub system_log_level: log::LevelFilter,
    /// The specific destination
    pub destination: LogDestination,
}

impl LogConfiguration {
    /// Constructs a single logging input with a desired destination. Both filters default to INFO.
    pub fn new(destination: LogDestination) -> Self {
        Self {
            log_level: log::LevelFilter::Info,
            system_log_level: log::LevelFilter::Info,
            destination,
        }
    }

    /// Sets the filter for the function's own logs.
    pub fn with_log_level(mut self, log_level: log::LevelFilter) -> Self {
        self.log_level = log_level;
        self
    }

    /// Sets the filter for the SDK's logs.
    pub fn with_system_log_level(mut self, system_log_level: log::LevelFilter) -> Self {
        self.system_log_level = system_log_level;
        self
    }
}

impl From<LogDestination> for LogConfiguration {
    fn from(value: LogDestination) -> Self {
        Self::new(value)
    }
}

/// Captures any errors detected while setting up a destination
#[derive(Debug, Error)]
pub enum LogConfigurationError {
    #[error("failed to open log file {}: {cause}", .path.display())]
    /// The log file could not be opened
    File {
        /// The file that was requested
        path: PathBuf,
        /// Why opening failed
        cause: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_sink_writes_one_line_per_record() {
        let sink = WriterSink::new(Vec::new());
        sink.emit(&LogRecord {
            level: log::Level::Info,
            origin: "echo",
            message: format_args!("first"),
        })
        .expect("vec writes succeed");
        sink.emit(&LogRecord {
            level: log::Level::Warn,
            origin: "echo",
            message: format_args!("second {}", 2),
        })
        .expect("vec writes succeed");

        let written = String::from_utf8(sink.into_inner().expect("not poisoned")).expect("utf8");
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("INFO "));
        assert!(lines[0].ends_with(" echo first"));
        assert!(lines[1].starts_with("WARN "));
        assert!(lines[1].ends_with(" echo second 2"));
    }

    #[test]
    fn writer_sink_reports_io_failures() {
        let sink = WriterSink::new(BrokenWriter);
        let result = sink.emit(&LogRecord {
            level: log::Level::Info,
            origin: "echo",
            message: format_args!("lost"),
        });
        assert!(matches!(result, Err(LogSinkError::Io { .. })));
    }

    #[test]
    fn memory_sink_captures_records() {
        let sink = MemorySink::new();
        sink.emit(&LogRecord {
            level: log::Level::Debug,
            origin: "greet",
            message: format_args!("hello {}", "kubeless"),
        })
        .expect("memory sink accepts records");

        assert_eq!(
            sink.records(),
            vec![CapturedRecord {
                level: log::Level::Debug,
                origin: "greet".to_string(),
                message: "hello kubeless".to_string(),
            }]
        );
    }

    struct Explode;

    impl fmt::Display for Explode {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            panic!("rendering failed");
        }
    }

    #[test]
    fn poisoned_memory_sink_is_unavailable_but_readable() {
        let sink = MemorySink::new();
        sink.emit(&LogRecord {
            level: log::Level::Info,
            origin: "echo",
            message: format_args!("kept"),
        })
        .expect("memory sink accepts records");

        // Rendering happens while the record lock is held, so this poisons it.
        std::thread::scope(|scope| {
            let rendering = scope.spawn(|| {
                let _ = sink.emit(&LogRecord {
                    level: log::Level::Info,
                    origin: "echo",
                    message: format_args!("{}", Explode),
                });
            });
            assert!(rendering.join().is_err());
        });

        let result = sink.emit(&LogRecord {
            level: log::Level::Info,
            origin: "echo",
            message: format_args!("dropped"),
        });
        assert!(matches!(result, Err(LogSinkError::Unavailable { .. })));
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "kept");
    }

    #[test]
    fn poisoned_writer_sink_is_unavailable() {
        let sink = WriterSink::new(Vec::new());
        std::thread::scope(|scope| {
            let holder = scope.spawn(|| {
                let _guard = sink.writer.lock();
                panic!("writer holder failed");
            });
            assert!(holder.join().is_err());
        });

        let result = sink.emit(&LogRecord {
            level: log::Level::Info,
            origin: "echo",
            message: format_args!("dropped"),
        });
        assert!(matches!(result, Err(LogSinkError::Unavailable { .. })));
        assert!(matches!(
            sink.into_inner(),
            Err(LogSinkError::Unavailable { .. })
        ));
    }

    #[test]
    fn file_destination_reports_unopenable_paths() {
        let destination = LogDestination::file("/nonexistent-directory/function.log");
        let Err(error) = destination.open() else {
            panic!("directory does not exist");
        };
        assert!(error.to_string().contains("/nonexistent-directory/function.log"));
    }

    #[test]
    fn configuration_defaults_to_info() {
        let configuration = LogConfiguration::from(LogDestination::Stderr)
            .with_system_log_level(log::LevelFilter::Warn);
        assert_eq!(configuration.log_level, log::LevelFilter::Info);
        assert_eq!(configuration.system_log_level, log::LevelFilter::Warn);
    }
}
