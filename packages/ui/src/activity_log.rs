//! What the page did, for the user: logins, saves, OAuth redirects and AI
//! runs, including the failures the page otherwise swallows.

use dioxus::prelude::*;
use store::Tool;

/// Oldest entries are dropped past this many.
pub const MAX_ENTRIES: usize = 100;

#[derive(Clone, Debug, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }

    fn is_failure(&self) -> bool {
        matches!(self, LogLevel::Warning | LogLevel::Error)
    }
}

/// The page action an entry is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Login,
    Save,
    Connect(Tool),
    Ai,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Login => OperationKind::Login,
            Operation::Save => OperationKind::Save,
            Operation::Connect(_) => OperationKind::Connect,
            Operation::Ai => OperationKind::Ai,
        }
    }

    pub fn tool(&self) -> Option<Tool> {
        match self {
            Operation::Connect(tool) => Some(*tool),
            _ => None,
        }
    }
}

/// Operations with the connected tool erased; what the panel filters by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationKind {
    Login,
    Save,
    Connect,
    Ai,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Login,
        OperationKind::Save,
        OperationKind::Connect,
        OperationKind::Ai,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::Login => "Login",
            OperationKind::Save => "Save",
            OperationKind::Connect => "Connect",
            OperationKind::Ai => "AI",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub operation: Operation,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
    /// Show only this kind of operation; `None` shows everything.
    pub filter: Option<OperationKind>,
}

impl ActivityLog {
    pub fn push(&mut self, timestamp: String, operation: Operation, level: LogLevel, message: &str) {
        self.entries.push(LogEntry {
            timestamp,
            operation,
            level,
            message: message.to_string(),
        });
        if self.entries.len() > MAX_ENTRIES {
            let excess = self.entries.len() - MAX_ENTRIES;
            self.entries.drain(..excess);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|e| e.level == LogLevel::Error)
    }

    /// Entries passing the current filter, newest first.
    pub fn shown(&self) -> Vec<LogEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| self.filter.map_or(true, |kind| e.operation.kind() == kind))
            .cloned()
            .collect()
    }

    /// Warnings and errors per operation kind, for the filter tabs.
    pub fn failures(&self, kind: OperationKind) -> usize {
        self.entries
            .iter()
            .filter(|e| e.operation.kind() == kind && e.level.is_failure())
            .count()
    }

    /// Tools whose most recent connect attempt did not hand out a sign-in link.
    pub fn unconnected_tools(&self) -> Vec<Tool> {
        let mut seen = Vec::new();
        let mut unconnected = Vec::new();
        for entry in self.entries.iter().rev() {
            let Some(tool) = entry.operation.tool() else {
                continue;
            };
            if seen.contains(&tool) {
                continue;
            }
            seen.push(tool);
            if entry.level.is_failure() {
                unconnected.push(tool);
            }
        }
        unconnected
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

pub fn log_activity(
    log: &mut Signal<ActivityLog>,
    operation: Operation,
    level: LogLevel,
    message: &str,
) {
    log.write().push(current_time(), operation, level, message);
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
    "00:00:00".to_string()
}
