//! Daily healthcheck of one player's ranked solo games.
//!
//! A week of match history is pulled from the Riot Match-v5 API, folded into
//! one row per calendar day and classified against configurable
//! traffic-light thresholds.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod riot;

pub use error::AppError;
