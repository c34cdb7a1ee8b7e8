//! Request-scoped values threaded through client calls.

use crate::logging::Logger;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Default)]
pub struct Context {
    logger: Option<Arc<dyn Logger>>,
    timeout: Option<Duration>,
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Deadline applied to the whole request, connect through body read.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn logger(&self) -> Option<Arc<dyn Logger>> {
        self.logger.clone()
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("logger", &self.logger.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}
