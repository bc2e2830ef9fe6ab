use std::sync::Arc;

use kubeless_functions_host::{Error, FunctionResult, environment::FunctionEnvironment};

use crate::Handler;

/// The functions a process exposes to kubeless, by name.
///
/// Names keep their registration order, which is also the order in which they are listed when
/// a requested function is missing. Registering a name twice replaces the earlier handler.
#[derive(Default, Clone)]
pub struct Registry {
    handlers: Vec<(String, Arc<dyn Handler>)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exposes `handler` under `name`.
    pub fn register(&mut self, name: impl Into<String>, handler: impl Handler + 'static) -> &mut Self {
        let name = name.into();
        let handler: Arc<dyn Handler> = Arc::new(handler);
        match self.handlers.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = handler,
            None => self.handlers.push((name, handler)),
        }
        self
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.iter().map(|(name, _)| name.as_str())
    }

    /// Looks up a handler by name.
    pub fn get(&self, name: &str) -> FunctionResult<Arc<dyn Handler>> {
        self.handlers
            .iter()
            .find(|(registered, _)| registered == name)
            .map(|(_, handler)| handler.clone())
            .ok_or_else(|| Error::FunctionNotFound {
                requested: name.to_string(),
                available: self.names().collect::<Vec<_>>().join(", "),
            })
    }

    /// Picks the handler named by the environment's `FUNC_HANDLER`.
    pub fn select(&self, environment: &FunctionEnvironment) -> FunctionResult<Arc<dyn Handler>> {
        let name = environment.function_name();
        if name.is_empty() {
            return Err(Error::HandlerNotConfigured);
        }
        let handler = self.get(name)?;
        log::debug!("selected function {name}");
        Ok(handler)
    }
}
