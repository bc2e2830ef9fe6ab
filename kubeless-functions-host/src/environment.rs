//! Deployment-level settings for the running Function.
//!
//! The runtime describes the deployed Function through `FUNC_*` environment variables.

use std::{env, sync::LazyLock, time::Duration};

/// The default timeout for Functions.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// The default memory limit.
///
/// `0` indicates that no limit was provided.
pub const DEFAULT_MEMORY_LIMIT: usize = 0;

/// The namespace Functions are deployed to when none is given.
pub const DEFAULT_NAMESPACE: &str = "default";

// The process environment does not change under a running Function, so it is read once.
static GET_ENVIRONMENT_ONCE: LazyLock<FunctionEnvironment> =
    LazyLock::new(|| FunctionEnvironment::from_lookup(|name| env::var(name).ok()));

/// Information about the deployed Function.
///
/// ```rust,no_run
/// use kubeless_functions_host::environment::FunctionEnvironment;
/// let environment = FunctionEnvironment::get();
///
/// log::info!("{} running on {}", environment.function_name(), environment.runtime());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionEnvironment {
    function_name: String,
    runtime: String,
    namespace: String,
    timeout: Duration,
    memory_limit: usize,
}

impl Default for FunctionEnvironment {
    fn default() -> Self {
        Self {
            function_name: String::new(),
            runtime: String::new(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            memory_limit: DEFAULT_MEMORY_LIMIT,
        }
    }
}

impl FunctionEnvironment {
    /// The environment of this process, read on first use.
    pub fn get() -> &'static FunctionEnvironment {
        &GET_ENVIRONMENT_ONCE
    }

    /// Builds an environment from a variable lookup, falling back to defaults for
    /// anything missing or unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let timeout = parse_or("FUNC_TIMEOUT", lookup("FUNC_TIMEOUT"), DEFAULT_TIMEOUT.as_secs());
        let memory_limit = parse_or(
            "FUNC_MEMORY_LIMIT",
            lookup("FUNC_MEMORY_LIMIT"),
            DEFAULT_MEMORY_LIMIT,
        );
        Self {
            function_name: lookup("FUNC_HANDLER").unwrap_or(defaults.function_name),
            runtime: lookup("FUNC_RUNTIME").unwrap_or(defaults.runtime),
            namespace: lookup("FUNC_NAMESPACE")
                .filter(|namespace| !namespace.is_empty())
                .unwrap_or(defaults.namespace),
            timeout: Duration::from_secs(timeout),
            memory_limit,
        }
    }

    /// An environment for the named function with every other setting at its default.
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            ..Self::default()
        }
    }

    /// Sets the runtime identifier.
    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }

    /// Sets the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the memory limit.
    pub fn with_memory_limit(mut self, memory_limit: usize) -> Self {
        self.memory_limit = memory_limit;
        self
    }

    /// The value of `FUNC_HANDLER`: which function the runtime should call.
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// The value of `FUNC_RUNTIME`.
    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    /// The value of `FUNC_NAMESPACE`.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// How long the runtime lets one invocation run.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Memory limit in bytes, `0` when none was given.
    pub fn memory_limit(&self) -> usize {
        self.memory_limit
    }
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{name} is not a valid number ({raw:?}), using {default}");
            default
        }),
        None => default,
    }
}
