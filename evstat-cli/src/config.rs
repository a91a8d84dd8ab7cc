//! Global evstat configuration.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, Utc};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

/// Configuration at ~/.config/evstat/config.toml
///
/// Every key can also be set through the environment, e.g. `EVSTAT_TIMEZONE`.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct EvstatConfig {
    /// JSON export of the events table
    pub events_file: Option<PathBuf>,

    /// IANA time zone the event pages are shown in (defaults to the system zone)
    pub timezone: Option<String>,

    /// Default number of events per page for `evstat list`
    pub page_size: Option<NonZeroUsize>,
}

impl EvstatConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("evstat");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, creating a commented-out one on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config: EvstatConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("EVSTAT"))
            .build()
            .with_context(|| format!("Could not read config file {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        debug!(path = %path.display(), ?config, "Loaded config");
        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        let contents = "\
# evstat configuration

# JSON export of your events table:
# events_file = \"~/events.json\"

# Time zone used to decide what \"today\" is:
# timezone = \"Europe/Lisbon\"

# Events per page for `evstat list`:
# page_size = 20
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Could not create config directory")?;
        }

        std::fs::write(path, contents).context("Could not write config file")?;

        Ok(())
    }

    /// The events file with `~` expanded.
    pub fn events_path(&self) -> Option<PathBuf> {
        self.events_file.as_ref().map(|p| expand_tilde(p))
    }

    pub fn timezone(&self) -> Result<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|e| anyhow::anyhow!("Invalid timezone '{}': {}", name, e))
            })
            .transpose()
    }

    /// Current wall-clock time in the configured zone.
    pub fn now(&self) -> Result<NaiveDateTime> {
        Ok(match self.timezone()? {
            Some(tz) => Utc::now().with_timezone(&tz).naive_local(),
            None => Local::now().naive_local(),
        })
    }
}

pub fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
