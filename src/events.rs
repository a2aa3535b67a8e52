//! Setup event log.
//!
//! Each setup action appends one JSON object per line (NDJSON) to
//! `{TEST_TMP}/events/events.ndjson`, so an operator can see when and by whom
//! a test environment was prepared, which task file was generated, and how
//! submissions exited.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: `setup`, `expand` or `submit`
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `test`: Optional test name
//! - `details`: Freeform object with action-specific details

use crate::error::{Result, SetupError};
use crate::fs::ensure_parent_dir;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Environment derived and preconditions checked
    Setup,
    /// Task file generated from its template
    Expand,
    /// Submission command finished
    Submit,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventAction::Setup => "setup",
            EventAction::Expand => "expand",
            EventAction::Submit => "submit",
        };
        f.pad(name)
    }
}

/// An event record for the setup log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Test the event belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event stamped with the current time and actor.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            test: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_test(mut self, test: impl Into<String>) -> Self {
        self.test = Some(test.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| SetupError::IoError(format!("failed to serialize event to JSON: {}", e)))
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the log at `events_file`, creating it if needed.
pub fn append_event(events_file: &Path, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    ensure_parent_dir(events_file)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(events_file)
        .map_err(|e| {
            SetupError::IoError(format!(
                "failed to open events file '{}': {}",
                events_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        SetupError::IoError(format!(
            "failed to write event to '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    Ok(())
}

/// Read all events from the log. Missing file yields an empty list.
pub fn read_events(events_file: &Path) -> Result<Vec<Event>> {
    if !events_file.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(events_file).map_err(|e| {
        SetupError::IoError(format!(
            "failed to read events file '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| {
                SetupError::IoError(format!(
                    "failed to parse event on line {} of '{}': {}",
                    i + 1,
                    events_file.display(),
                    e
                ))
            })
        })
        .collect()
}
