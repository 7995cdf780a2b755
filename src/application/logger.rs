use std::cell::RefCell;

pub use log::Level;

/// Receives leveled diagnostic messages.
///
/// The bank only ever logs through the instance it was constructed with.
pub trait Logger {
    fn log(&self, level: Level, message: &str);
}

impl<L: Logger + ?Sized> Logger for &L {
    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message);
    }
}

/// Forwards to the `log` facade, i.e. whatever sink the binary installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: "support_bank", level, "{}", message);
    }
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: RefCell<Vec<(Level, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    /// Number of messages logged at exactly `level`.
    pub fn count(&self, level: Level) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(logged, _)| *logged == level)
            .count()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: Level, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}
