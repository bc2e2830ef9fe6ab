use std::fmt::Write;

use kubeless_functions_host::logging::{LogRecord, LogSink};
use log::{LevelFilter, Log, Metadata, Record};

/// Targets under this prefix belong to the SDK itself.
const SYSTEM_TARGET_PREFIX: &str = "kubeless_functions";

pub(crate) struct Output {
    pub(crate) log_level: LevelFilter,
    pub(crate) system_log_level: LevelFilter,
    pub(crate) sink: Box<dyn LogSink>,
}

impl Output {
    fn accepts(&self, metadata: &Metadata<'_>) -> bool {
        let threshold = if is_system_target(metadata.target()) {
            self.system_log_level
        } else {
            self.log_level
        };
        metadata.level() <= threshold
    }
}

/// A `log` implementation fanning records out to every configured sink.
pub(crate) struct SinkLog {
    outputs: Vec<Output>,
}

impl SinkLog {
    pub(crate) fn new(outputs: Vec<Output>) -> Self {
        Self { outputs }
    }

    /// The most verbose level any output wants.
    pub(crate) fn max_level(&self) -> LevelFilter {
        self.outputs
            .iter()
            .flat_map(|output| [output.log_level, output.system_log_level])
            .max()
            .unwrap_or(LevelFilter::Off)
    }
}

fn is_system_target(target: &str) -> bool {
    target.starts_with(SYSTEM_TARGET_PREFIX)
}

impl Log for SinkLog {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.outputs.iter().any(|output| output.accepts(metadata))
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut origin = String::with_capacity(64);
        let module = record.module_path().unwrap_or("<unknown>");
        if record.target() != module {
            // An explicit target, e.g. the function name set by `FacadeSink`.
            origin.push_str(record.target());
        } else {
            let file = record.file().unwrap_or("<unknown>");
            let line = record.line().unwrap_or(0);
            let _ = write!(&mut origin, "{module} {file}:{line}");
        }

        let sink_record = LogRecord {
            level: record.level(),
            origin: &origin,
            message: *record.args(),
        };
        for output in &self.outputs {
            if output.accepts(record.metadata()) {
                let _ = output.sink.emit(&sink_record);
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kubeless_functions_host::logging::{LogSinkError, MemorySink};
    use log::Level;

    use super::*;

    struct Shared(Arc<MemorySink>);

    impl LogSink for Shared {
        fn emit(&self, record: &LogRecord<'_>) -> Result<(), LogSinkError> {
            self.0.emit(record)
        }
    }

    fn output(
        log_level: LevelFilter,
        system_log_level: LevelFilter,
    ) -> (Output, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (
            Output {
                log_level,
                system_log_level,
                sink: Box::new(Shared(sink.clone())),
            },
            sink,
        )
    }

    fn log_to(logger: &SinkLog, target: &str, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .target(target)
                .level(level)
                .module_path(Some("greeter::handler"))
                .file(Some("src/handler.rs"))
                .line(Some(12))
                .args(format_args!("{message}"))
                .build(),
        );
    }

    #[test]
    fn system_and_function_records_use_separate_levels() {
        let (output, sink) = output(LevelFilter::Debug, LevelFilter::Warn);
        let logger = SinkLog::new(vec![output]);

        log_to(&logger, "greeter", Level::Debug, "function debug");
        log_to(&logger, "kubeless_functions::invoke", Level::Info, "system info");
        log_to(&logger, "kubeless_functions_host::environment", Level::Warn, "system warn");

        let messages: Vec<String> = sink.records().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, vec!["function debug", "system warn"]);
    }

    #[test]
    fn records_fan_out_to_every_accepting_output() {
        let (quiet, quiet_sink) = output(LevelFilter::Error, LevelFilter::Off);
        let (chatty, chatty_sink) = output(LevelFilter::Info, LevelFilter::Info);
        let logger = SinkLog::new(vec![quiet, chatty]);

        log_to(&logger, "greeter", Level::Error, "broken");
        log_to(&logger, "greeter", Level::Info, "fine");

        assert_eq!(quiet_sink.records().len(), 1);
        assert_eq!(chatty_sink.records().len(), 2);
        assert_eq!(logger.max_level(), LevelFilter::Info);
    }

    #[test]
    fn origin_names_the_source_location() {
        let (output, sink) = output(LevelFilter::Info, LevelFilter::Info);
        let logger = SinkLog::new(vec![output]);

        log_to(&logger, "greeter::handler", Level::Info, "hello");

        let records = sink.records();
        assert_eq!(records[0].origin, "greeter::handler src/handler.rs:12");
    }

    #[test]
    fn explicit_targets_become_the_origin() {
        let (output, sink) = output(LevelFilter::Info, LevelFilter::Info);
        let logger = SinkLog::new(vec![output]);

        logger.log(
            &Record::builder()
                .target("echo")
                .level(Level::Info)
                .module_path(Some("kubeless_functions_host::logging"))
                .file(Some("kubeless-functions-host/src/logging.rs"))
                .line(Some(76))
                .args(format_args!("Event {{ data: \"hello\" }}"))
                .build(),
        );

        let records = sink.records();
        assert_eq!(records[0].origin, "echo");
        assert_eq!(records[0].message, "Event { data: \"hello\" }");
    }

    #[test]
    fn no_outputs_means_nothing_is_enabled() {
        let logger = SinkLog::new(Vec::new());
        assert_eq!(logger.max_level(), LevelFilter::Off);
        assert!(!logger.enabled(&Metadata::builder().level(Level::Error).build()));
    }
}
