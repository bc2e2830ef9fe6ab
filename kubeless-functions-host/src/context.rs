//! Per-invocation metadata handed to a Function alongside its event.

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use crate::{
    environment::FunctionEnvironment,
    logging::{FacadeSink, LogRecord, LogSink},
};

/// Contains information about the environment of one invocation.
///
/// The context is built by the host right before the call and only ever borrowed by the
/// Function. It also carries the [LogSink] the Function should log through.
///
/// ```rust
/// use std::sync::Arc;
///
/// use kubeless_functions_host::context::InvocationContext;
/// use kubeless_functions_host::environment::FunctionEnvironment;
/// use kubeless_functions_host::logging::MemorySink;
///
/// let sink = Arc::new(MemorySink::new());
/// let context = InvocationContext::new(FunctionEnvironment::new("echo")).with_logger(sink.clone());
/// context.log(log::Level::Info, format_args!("received {}", 42));
///
/// assert_eq!(sink.records()[0].message, "received 42");
/// assert_eq!(sink.records()[0].origin, "echo");
/// ```
#[derive(Clone)]
pub struct InvocationContext {
    environment: FunctionEnvironment,
    deadline: Instant,
    logger: Arc<dyn LogSink>,
}

/// Stands in for timeouts too large to represent as an [Instant].
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

impl InvocationContext {
    /// A context for one invocation starting now. The deadline is now plus the timeout of
    /// the environment; records go to the [log] facade until another sink is set.
    pub fn new(environment: FunctionEnvironment) -> Self {
        let now = Instant::now();
        let deadline = now.checked_add(environment.timeout()).unwrap_or_else(|| {
            log::warn!(
                "timeout of {:?} for {} is out of range, using {FAR_FUTURE:?}",
                environment.timeout(),
                environment.function_name()
            );
            now.checked_add(FAR_FUTURE).unwrap_or(now)
        });
        Self {
            environment,
            deadline,
            logger: Arc::new(FacadeSink),
        }
    }

    /// A context built from the process environment.
    pub fn from_env() -> Self {
        Self::new(FunctionEnvironment::get().clone())
    }

    /// Routes this invocation's records to `logger`.
    pub fn with_logger(mut self, logger: Arc<dyn LogSink>) -> Self {
        self.logger = logger;
        self
    }

    /// Overrides the deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = deadline;
        self
    }

    /// The deployment settings of the Function.
    pub fn environment(&self) -> &FunctionEnvironment {
        &self.environment
    }

    /// Name of the invoked Function.
    pub fn function_name(&self) -> &str {
        self.environment.function_name()
    }

    /// Runtime identifier of the invoked Function.
    pub fn runtime(&self) -> &str {
        self.environment.runtime()
    }

    /// Namespace the Function is deployed to.
    pub fn namespace(&self) -> &str {
        self.environment.namespace()
    }

    /// Memory limit in bytes, `0` when none was given.
    pub fn memory_limit(&self) -> usize {
        self.environment.memory_limit()
    }

    /// When the host stops waiting for this invocation.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left until the deadline, zero once it has passed.
    pub fn remaining_time(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// The sink this invocation logs to.
    pub fn logger(&self) -> &Arc<dyn LogSink> {
        &self.logger
    }

    /// Emits one record through the invocation's sink.
    ///
    /// Logging is best-effort: a sink failure is dropped here and never reaches the
    /// Function's result.
    pub fn log(&self, level: log::Level, message: fmt::Arguments<'_>) {
        let record = LogRecord {
            level,
            origin: self.environment.function_name(),
            message,
        };
        if let Err(e) = self.logger.emit(&record) {
            log::debug!("dropped a record for {}: {e}", self.function_name());
        }
    }
}

impl fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationContext")
            .field("environment", &self.environment)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}
