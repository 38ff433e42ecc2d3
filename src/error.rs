//! Error types for the Sleeper best-ball CLI

use thiserror::Error;


pub type Result<T> = std::result::Result<T, SleeperError>;

#[derive(Error, Debug)]
pub enum SleeperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("League ID not provided and {env_var} environment variable not set")]
    MissingLeagueId { env_var: String },

    #[error("Failed to parse ID: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Sleeper API returned no data")]
    NoData,

    #[error("Upstream unavailable: {message}")]
    Upstream { message: String },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid roster slot: {slot}")]
    InvalidSlot { slot: String },

    #[error("Invalid matchup record for roster {roster_id}: {reason}")]
    InvalidMatchup { roster_id: u32, reason: String },

    #[error("Invalid week range: {start}..{end}")]
    InvalidWeekRange { start: u16, end: u16 },

    #[error("Team not found: {name}")]
    TeamNotFound { name: String },

    #[error("Invalid {option}: {value}")]
    InvalidOption { option: String, value: String },
}

impl From<anyhow::Error> for SleeperError {
    fn from(err: anyhow::Error) -> Self {
        SleeperError::Storage {
            message: format!("{err:#}"),
        }
    }
}
