//! In-app record of what the console did, shown by the activity log panel.
//!
//! Every entry is also emitted through `tracing` at the matching level.

use std::fmt::Display;

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
    pub errors_only: bool,
}

impl ActivityLog {
    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.level == LogLevel::Error)
            .count()
    }

    /// Entries to display, newest first.
    pub fn shown(&self) -> Vec<LogEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| !self.errors_only || e.level == LogLevel::Error)
            .cloned()
            .collect()
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

pub fn log_activity(log: &mut Signal<ActivityLog>, level: LogLevel, message: &str) {
    match level {
        LogLevel::Error => tracing::error!("{message}"),
        LogLevel::Warning => tracing::warn!("{message}"),
        LogLevel::Info | LogLevel::Success => tracing::info!("{message}"),
    }
    log.write().entries.push(LogEntry {
        timestamp: current_time(),
        level,
        message: message.to_string(),
    });
}

/// Log a failed operation as `"{action}: {error}"`.
pub fn log_failure(log: &mut Signal<ActivityLog>, action: &str, error: &impl Display) {
    log_activity(log, LogLevel::Error, &format!("{action}: {error}"));
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: LogLevel, message: &str) -> LogEntry {
        LogEntry {
            timestamp: "10:00:00".into(),
            level,
            message: message.into(),
        }
    }

    #[test]
    fn test_shown_newest_first_and_filtered() {
        let mut log = ActivityLog {
            entries: vec![
                entry(LogLevel::Info, "loaded"),
                entry(LogLevel::Error, "save failed"),
                entry(LogLevel::Success, "saved"),
            ],
            ..ActivityLog::default()
        };
        let all: Vec<_> = log.shown().into_iter().map(|e| e.message).collect();
        assert_eq!(all, vec!["saved", "save failed", "loaded"]);

        log.errors_only = true;
        assert_eq!(log.shown().len(), 1);
        assert_eq!(log.error_count(), 1);
    }
}
