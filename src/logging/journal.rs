// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Structured per-run event journal.
//!
//! ```text
//! RunLog::new()
//!   .enter_phase("flatten")   .set_file("mod.ini")
//!   .info() / .warn(Incident, ..) / .error(Incident, ..)
//!        |
//!        +--> LogEvent list (returned with the export report)
//!        +--> tracing event (console / file layers)
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Incident;

/// Severity of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        };
        f.pad(name)
    }
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub level: EventLevel,
    pub incident: Option<Incident>,
    pub phase: Option<&'static str>,
    pub file: Option<String>,
    pub message: String,
}

impl LogEvent {
    /// Context prefix, e.g. `[rename/mod.ini] `.
    #[must_use]
    pub fn prefix(&self) -> String {
        match (self.phase, &self.file) {
            (Some(phase), Some(file)) => format!("[{phase}/{file}] "),
            (Some(phase), None) => format!("[{phase}] "),
            (None, Some(file)) => format!("[{file}] "),
            (None, None) => String::new(),
        }
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<5} {}{}", self.level, self.prefix(), self.message)?;
        if let Some(incident) = self.incident {
            write!(f, " ({incident})")?;
        }
        Ok(())
    }
}

/// Ordered list of leveled events for one export run.
///
/// Owned by the run that created it; phases append, nothing is printed
/// directly except through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct RunLog {
    events: Vec<LogEvent>,
    phase: Option<&'static str>,
    file: Option<String>,
}

impl RunLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current phase and clears the current file.
    pub fn enter_phase(&mut self, phase: &'static str) {
        self.phase = Some(phase);
        self.file = None;
    }

    /// Sets the configuration file subsequent events refer to.
    pub fn set_file(&mut self, file: impl Into<String>) {
        self.file = Some(file.into());
    }

    pub fn clear_file(&mut self) {
        self.file = None;
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(EventLevel::Info, None, message.into());
    }

    pub fn warn(&mut self, incident: Incident, message: impl Into<String>) {
        self.push(EventLevel::Warn, Some(incident), message.into());
    }

    pub fn error(&mut self, incident: Incident, message: impl Into<String>) {
        self.push(EventLevel::Error, Some(incident), message.into());
    }

    fn push(&mut self, level: EventLevel, incident: Option<Incident>, message: String) {
        let event = LogEvent {
            level,
            incident,
            phase: self.phase,
            file: self.file.clone(),
            message,
        };

        let kind = incident.map_or("", Incident::as_str);
        match level {
            EventLevel::Info => tracing::info!("{}{}", event.prefix(), event.message),
            EventLevel::Warn => {
                tracing::warn!(incident = kind, "{}{}", event.prefix(), event.message);
            }
            EventLevel::Error => {
                tracing::error!(incident = kind, "{}{}", event.prefix(), event.message);
            }
        }

        self.events.push(event);
    }

    /// Appends all events of another journal, keeping their context.
    pub fn extend(&mut self, other: Self) {
        self.events.extend(other.events);
    }

    #[must_use]
    pub fn events(&self) -> &[LogEvent] {
        &self.events
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events tagged with the given incident kind.
    pub fn incidents(&self, kind: Incident) -> impl Iterator<Item = &LogEvent> {
        self.events
            .iter()
            .filter(move |event| event.incident == Some(kind))
    }

    /// Number of events per incident kind (kinds with no events omitted).
    #[must_use]
    pub fn incident_counts(&self) -> BTreeMap<Incident, usize> {
        let mut counts = BTreeMap::new();
        for incident in self.events.iter().filter_map(|event| event.incident) {
            *counts.entry(incident).or_insert(0) += 1;
        }
        counts
    }

    /// True when any event is at error level.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.events
            .iter()
            .any(|event| event.level == EventLevel::Error)
    }
}
