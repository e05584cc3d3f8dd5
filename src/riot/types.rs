use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Reqwest error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Riot API error: {status} - {message}")]
    Status { status: u16, message: String },
}

// ============================================================================
// Match-v5
// ============================================================================

/// Queue id of Ranked Solo/Duo.
pub const RANKED_SOLO_QUEUE_ID: i32 = 420;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub info: InfoDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoDto {
    /// Epoch milliseconds.
    pub game_start_timestamp: i64,
    /// Epoch milliseconds. Absent on matches recorded before patch 11.20.
    #[serde(default)]
    pub game_end_timestamp: Option<i64>,
    /// Seconds.
    pub game_duration: i64,
    pub participants: Vec<ParticipantDto>,
    pub queue_id: i32,
}

impl InfoDto {
    pub fn is_solo_queue(&self) -> bool {
        self.queue_id == RANKED_SOLO_QUEUE_ID
    }

    pub fn queue_name(&self) -> &'static str {
        match self.queue_id {
            400 => "Normal Draft",
            420 => "Ranked Solo/Duo",
            430 => "Normal Blind",
            440 => "Ranked Flex",
            450 => "ARAM",
            490 => "Quickplay",
            _ => "Other",
        }
    }

    pub fn participant(&self, puuid: &str) -> Option<&ParticipantDto> {
        self.participants.iter().find(|p| p.puuid == puuid)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    pub champion_name: String,
    pub champion_id: i32,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub total_damage_dealt_to_champions: i64,
    pub gold_earned: i64,
    pub total_minions_killed: i32,
}
