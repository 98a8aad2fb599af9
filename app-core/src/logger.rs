//! Info/error message sink handed to the parts of an application that report
//! to the user or developer through a log.

/// Something that accepts informational and error messages.
pub trait Logger {
    fn log_info(&self, message: &str);
    fn log_error(&self, message: &str);
}

/// Writes messages through the `log` facade, so they end up wherever the
/// binary's logger (usually `env_logger`) sends them.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    target: String,
}

impl ConsoleLogger {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_owned(),
        }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new("app")
    }
}

impl Logger for ConsoleLogger {
    fn log_info(&self, message: &str) {
        log::info!(target: self.target.as_str(), "{message}");
    }

    fn log_error(&self, message: &str) {
        log::error!(target: self.target.as_str(), "{message}");
    }
}
