use thiserror::Error;

use crate::riot::FetchError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Riot API fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Player {puuid} not found in match {match_id}")]
    PlayerNotFound { puuid: String, match_id: String },

    #[error("Match {match_id} carries an out of range timestamp: {millis}")]
    InvalidTimestamp { match_id: String, millis: i64 },

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Invalid time zone: {0}")]
    InvalidTimezone(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
