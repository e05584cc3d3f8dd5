use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::error::AppError;
use crate::riot::MatchDto;

/// The tracked player's line of one ranked solo match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSummary {
    pub match_id: String,
    pub start_date: DateTime<Tz>,
    pub end_date: DateTime<Tz>,
    /// Seconds.
    pub duration: i64,
    pub champion_name: String,
    pub champion_id: i32,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub damage_to_champions: i64,
    pub gold_earned: i64,
    pub minions_killed: i32,
}

impl MatchSummary {
    /// Extracts the participant `puuid` from `dto`, with both timestamps
    /// expressed in `tz`.
    pub fn from_match(
        match_id: &str,
        dto: &MatchDto,
        puuid: &str,
        tz: Tz,
    ) -> Result<Self, AppError> {
        let info = &dto.info;
        let participant = info
            .participant(puuid)
            .ok_or_else(|| AppError::PlayerNotFound {
                puuid: puuid.to_string(),
                match_id: match_id.to_string(),
            })?;

        let start_date = from_millis(match_id, info.game_start_timestamp)?.with_timezone(&tz);
        let end_date = match info.game_end_timestamp {
            Some(millis) => from_millis(match_id, millis)?.with_timezone(&tz),
            None => start_date + TimeDelta::seconds(info.game_duration),
        };

        Ok(Self {
            match_id: match_id.to_string(),
            start_date,
            end_date,
            duration: info.game_duration,
            champion_name: participant.champion_name.clone(),
            champion_id: participant.champion_id,
            kills: participant.kills,
            deaths: participant.deaths,
            assists: participant.assists,
            damage_to_champions: participant.total_damage_dealt_to_champions,
            gold_earned: participant.gold_earned,
            minions_killed: participant.total_minions_killed,
        })
    }

    pub fn kda_ratio(&self) -> f64 {
        (self.kills + self.assists) as f64 / self.deaths.max(1) as f64
    }

    pub fn cs_per_minute(&self) -> f64 {
        if self.duration == 0 {
            0.0
        } else {
            self.minions_killed as f64 / (self.duration as f64 / 60.0)
        }
    }
}

fn from_millis(match_id: &str, millis: i64) -> Result<DateTime<Utc>, AppError> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| AppError::InvalidTimestamp {
        match_id: match_id.to_string(),
        millis,
    })
}
