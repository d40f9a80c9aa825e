//! Timestamp source for `completedDate`.

use chrono::Local;

/// Produces the human-readable timestamp stamped on cards reaching Done.
pub trait Clock {
    fn now(&self) -> String;
}

/// Local wall-clock time rendered with a `chrono` format string.
#[derive(Debug, Clone)]
pub struct SystemClock {
    format: String,
}

impl SystemClock {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> String {
        Local::now().format(&self.format).to_string()
    }
}
