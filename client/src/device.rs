//! Interfaces to the peripherals the attendance flow is wired to.
//!
//! The client crate only consumes these; drivers live with the device
//! firmware. Tests supply in-memory fakes.

/// Persisted key-value settings.
pub trait SettingsStore {
    /// Read a stored string, if present.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Store a string under `key`, replacing any previous value.
    fn put_string(&mut self, key: &str, value: &str);
}

/// Contactless card reader.
pub trait CardReader {
    /// Poll for a card, returning its UID when one is present.
    fn scan(&mut self) -> Option<String>;
}

/// Source of wall-clock time.
pub trait TimeSource {
    /// Current time in `YYYY-MM-DDTHH:MM:SS` form.
    fn now(&self) -> String;
}

/// Display or notification sink for operator feedback.
pub trait DisplaySink {
    /// Show a short status line.
    fn show(&mut self, text: &str);
}

/// Split an ISO-8601-like timestamp into its date and time parts.
pub fn split_date_time(stamp: &str) -> Option<(&str, &str)> {
    stamp.split_once('T')
}
