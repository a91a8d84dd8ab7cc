pub mod classify;
pub mod list;
pub mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use evstat_core::date_window::parse_instant;
use evstat_core::{Event, EventSource, JsonFileSource};

use crate::config::{EvstatConfig, expand_tilde};

/// Load event rows from `--file`, falling back to the configured export.
pub fn load_events(file: Option<PathBuf>, config: &EvstatConfig) -> Result<Vec<Event>> {
    let path = match file {
        Some(path) => expand_tilde(&path),
        None => config.events_path().with_context(|| {
            format!(
                "No events file given.\n\n\
                Pass one with:\n  \
                evstat list --file events.json\n\n\
                or set events_file in {}",
                EvstatConfig::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "the config file".to_string())
            )
        })?,
    };

    Ok(JsonFileSource::new(path).events()?)
}

/// The single `now` snapshot used for the whole command.
pub fn resolve_now(now: Option<&str>, config: &EvstatConfig) -> Result<NaiveDateTime> {
    match now {
        Some(s) => parse_instant(s).with_context(|| {
            format!("Invalid --now '{}'. Expected YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS]", s)
        }),
        None => config.now(),
    }
}
