//! Error type shared by the grid builder, navigation and the binary.

use std::path::PathBuf;

/// Everything that can go wrong while building or driving the calendar.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// A view option that cannot produce a well-formed grid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A positional argument that does not name a date component.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A date that does not exist on the calendar (e.g. 31 February).
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Arithmetic left the range chrono can represent.
    #[error("date out of supported range")]
    DateOutOfRange,

    /// Terminal input or output failed.
    #[error("i/o error: {0}")]
    Stream(#[from] std::io::Error),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, CalendarError>;
