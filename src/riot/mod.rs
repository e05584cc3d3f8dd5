//! Thin Riot API client covering the Match-v5 routes the dashboard reads.

mod client;
mod endpoints;
mod region;
mod types;

pub use client::RiotClient;
pub use endpoints::match_v5::MAX_MATCH_IDS;
pub use region::Region;
pub use types::{FetchError, InfoDto, MatchDto, ParticipantDto, RANKED_SOLO_QUEUE_ID};
