//! Config file and events file loading.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use toml::value::Datetime;
use tracing::{debug, warn};

use crate::error::{CalendarError, Result};
use crate::types::{Event, EventBook};

/// Optional settings read from `config.toml`; command-line flags win.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub visible_weeks: Option<u32>,
    pub cell_width: Option<usize>,
    pub color: Option<bool>,
    pub locale: Option<String>,
    pub week_numbers: Option<bool>,
    pub events_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load `path` if given (it must exist), otherwise the default location if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = config_dir().join("config.toml");
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    debug!(path = %path.display(), "no config file, using defaults");
                    Ok(AppConfig::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = read(path)?;
        let config: AppConfig = toml::from_str(&text).map_err(|source| CalendarError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("monthview")
}

#[derive(Debug, Deserialize)]
struct EventsFile {
    #[serde(default)]
    event: Vec<EventEntry>,
}

#[derive(Debug, Deserialize)]
struct EventEntry {
    #[serde(deserialize_with = "deserialize_date")]
    date: NaiveDate,
    #[serde(default)]
    description: Option<String>,
}

/// Accept both a TOML local date (`2024-03-05`) and a quoted one (`"2024-03-05"`).
fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    match toml::Value::deserialize(deserializer)? {
        toml::Value::String(text) => text.parse().map_err(D::Error::custom),
        toml::Value::Datetime(Datetime {
            date: Some(date),
            time: None,
            offset: None,
        }) => NaiveDate::from_ymd_opt(date.year.into(), date.month.into(), date.day.into())
            .ok_or_else(|| D::Error::custom(format!("no such date: {}", date))),
        other => Err(D::Error::custom(format!(
            "expected a date, found {}",
            other.type_str()
        ))),
    }
}

/// Parse an events document (`[[event]]` tables with `date` and `description`).
pub fn parse_events(text: &str, path: &Path) -> Result<EventBook> {
    let file: EventsFile = toml::from_str(text).map_err(|source| CalendarError::Toml {
        path: path.to_path_buf(),
        source,
    })?;

    let mut book = EventBook::new();
    for entry in file.event {
        if entry.description.is_none() {
            warn!(date = %entry.date, "event has no description, showing it empty");
        }
        book.add(
            entry.date,
            Event {
                description: entry.description,
            },
        );
    }
    Ok(book)
}

/// Read the events file at `path`.
pub fn load_events(path: &Path) -> Result<EventBook> {
    let book = parse_events(&read(path)?, path)?;
    debug!(path = %path.display(), count = book.len(), "loaded events");
    Ok(book)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CalendarError::Io {
        path: path.to_path_buf(),
        source,
    })
}
