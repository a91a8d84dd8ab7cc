//! Where event rows come from.
//!
//! The hosted data store owns the events. evstat reads a snapshot of the
//! `events` table, either exported to a JSON file or handed over in memory,
//! and never writes back.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{EvstatError, EvstatResult};
use crate::event::Event;

/// A read-only snapshot of event rows.
pub trait EventSource {
    fn events(&self) -> EvstatResult<Vec<Event>>;
}

/// Rows exported to a JSON file.
///
/// Accepts a bare array of rows, or the `{ "data": [...] }` envelope the
/// store's REST API responds with.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse an export from a string.
    ///
    /// The document is parsed first, then each row on its own, so one row
    /// that is not an object is skipped instead of failing the export.
    pub fn parse(content: &str) -> EvstatResult<Vec<Event>> {
        let document: Value = serde_json::from_str(content)
            .map_err(|e| EvstatError::Source(format!("Invalid event export: {e}")))?;

        let rows = match document {
            Value::Array(rows) => rows,
            Value::Object(mut envelope) => match envelope.remove("data") {
                Some(Value::Array(rows)) => rows,
                Some(other) => {
                    return Err(EvstatError::Source(format!(
                        "Invalid event export: \"data\" is {}, expected an array of rows",
                        kind(&other)
                    )));
                }
                None => {
                    return Err(EvstatError::Source(
                        "Invalid event export: object without a \"data\" array".to_string(),
                    ));
                }
            },
            other => {
                return Err(EvstatError::Source(format!(
                    "Invalid event export: found {}, expected an array of rows",
                    kind(&other)
                )));
            }
        };

        let mut events = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            match serde_json::from_value::<Event>(row) {
                Ok(event) => events.push(event),
                Err(e) => warn!(row = index, error = %e, "Skipping unreadable event row"),
            }
        }

        Ok(events)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl EventSource for JsonFileSource {
    fn events(&self) -> EvstatResult<Vec<Event>> {
        if !self.path.exists() {
            return Err(EvstatError::Source(format!(
                "Event file not found: {}",
                self.path.display()
            )));
        }

        let content = std::fs::read_to_string(&self.path)?;
        let events = Self::parse(&content).map_err(|e| match e {
            EvstatError::Source(msg) => {
                EvstatError::Source(format!("{} ({})", msg, self.path.display()))
            }
            other => other,
        })?;

        debug!(path = %self.path.display(), count = events.len(), "Loaded events");
        Ok(events)
    }
}

/// Rows already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource(Vec<Event>);

impl StaticSource {
    pub fn new(events: Vec<Event>) -> Self {
        StaticSource(events)
    }
}

impl EventSource for StaticSource {
    fn events(&self) -> EvstatResult<Vec<Event>> {
        Ok(self.0.clone())
    }
}
