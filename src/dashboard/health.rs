//! Traffic-light classification of daily aggregates.

use chrono::{NaiveTime, Timelike};

use super::aggregate::DailyAggregate;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Health {
    Healthy,
    Caution,
    Concern,
}

impl Health {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Caution => "caution",
            Self::Concern => "concern",
        }
    }

    /// CSS background colour used by the HTML report.
    pub fn css_color(&self) -> &'static str {
        match self {
            Self::Healthy => "green",
            Self::Caution => "yellow",
            Self::Concern => "red",
        }
    }

    /// ANSI SGR background code used by the text report.
    pub fn ansi_background(&self) -> &'static str {
        match self {
            Self::Healthy => "42",
            Self::Caution => "43",
            Self::Concern => "41",
        }
    }
}

/// Classification of the four monitored metrics of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyHealth {
    pub games_count: Health,
    pub unique_champions: Health,
    pub first_start_time: Health,
    pub last_start_time: Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamesThresholds {
    /// Inclusive.
    pub healthy_min: u32,
    /// Inclusive.
    pub healthy_max: u32,
    pub concern_below: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChampionThresholds {
    pub healthy_max: u32,
    pub caution_max: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstGameThresholds {
    pub healthy_before_hour: u32,
    pub caution_before_hour: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastGameThresholds {
    pub caution_from_hour: u32,
    pub concern_from_hour: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthThresholds {
    pub games: GamesThresholds,
    pub champions: ChampionThresholds,
    pub first_game: FirstGameThresholds,
    pub last_game: LastGameThresholds,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            games: GamesThresholds {
                healthy_min: 10,
                healthy_max: 13,
                concern_below: 6,
            },
            champions: ChampionThresholds {
                healthy_max: 3,
                caution_max: 4,
            },
            first_game: FirstGameThresholds {
                healthy_before_hour: 11,
                caution_before_hour: 12,
            },
            last_game: LastGameThresholds {
                caution_from_hour: 18,
                concern_from_hour: 21,
            },
        }
    }
}

impl HealthThresholds {
    pub fn validate(self) -> Result<Self, AppError> {
        let invalid = |msg: &str| -> Result<Self, AppError> {
            Err(AppError::Config(format!("invalid thresholds: {msg}")))
        };

        if self.games.healthy_min > self.games.healthy_max {
            return invalid("games healthy range is empty");
        }
        if self.champions.healthy_max > self.champions.caution_max {
            return invalid("champion caution bound is below the healthy bound");
        }
        let hours = [
            self.first_game.healthy_before_hour,
            self.first_game.caution_before_hour,
            self.last_game.caution_from_hour,
            self.last_game.concern_from_hour,
        ];
        if hours.iter().any(|h| *h >= 24) {
            return invalid("hours must be within 0..24");
        }
        if self.first_game.healthy_before_hour > self.first_game.caution_before_hour {
            return invalid("first game caution hour is before the healthy hour");
        }
        if self.last_game.caution_from_hour > self.last_game.concern_from_hour {
            return invalid("last game concern hour is before the caution hour");
        }

        Ok(self)
    }

    pub fn colorize(&self, aggregate: &DailyAggregate) -> DailyHealth {
        DailyHealth {
            games_count: self.games_count(aggregate.games_count),
            unique_champions: self.unique_champions(aggregate.unique_champions),
            first_start_time: self.first_start_time(aggregate.first_start_time),
            last_start_time: self.last_start_time(aggregate.last_start_time),
        }
    }

    pub fn games_count(&self, value: u32) -> Health {
        let t = &self.games;
        if (t.healthy_min..=t.healthy_max).contains(&value) {
            Health::Healthy
        } else if value < t.concern_below {
            Health::Concern
        } else {
            Health::Caution
        }
    }

    pub fn unique_champions(&self, value: u32) -> Health {
        let t = &self.champions;
        if value > 0 && value <= t.healthy_max {
            Health::Healthy
        } else if value <= t.caution_max {
            Health::Caution
        } else {
            Health::Concern
        }
    }

    pub fn first_start_time(&self, time: NaiveTime) -> Health {
        let t = &self.first_game;
        let hour = time.hour();
        if hour < t.healthy_before_hour {
            Health::Healthy
        } else if hour < t.caution_before_hour {
            Health::Caution
        } else {
            Health::Concern
        }
    }

    pub fn last_start_time(&self, time: NaiveTime) -> Health {
        let t = &self.last_game;
        let hour = time.hour();
        if hour >= t.concern_from_hour {
            Health::Concern
        } else if hour >= t.caution_from_hour {
            Health::Caution
        } else {
            Health::Healthy
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn games_count_defaults() {
        let t = HealthThresholds::default();

        assert_eq!(t.games_count(11), Health::Healthy);
        assert_eq!(t.games_count(10), Health::Healthy);
        assert_eq!(t.games_count(13), Health::Healthy);
        assert_eq!(t.games_count(5), Health::Concern);
        assert_eq!(t.games_count(0), Health::Concern);
        assert_eq!(t.games_count(6), Health::Caution);
        assert_eq!(t.games_count(7), Health::Caution);
        assert_eq!(t.games_count(9), Health::Caution);
        assert_eq!(t.games_count(14), Health::Caution);
    }

    #[test]
    fn unique_champions_defaults() {
        let t = HealthThresholds::default();

        assert_eq!(t.unique_champions(1), Health::Healthy);
        assert_eq!(t.unique_champions(2), Health::Healthy);
        assert_eq!(t.unique_champions(3), Health::Healthy);
        assert_eq!(t.unique_champions(4), Health::Caution);
        assert_eq!(t.unique_champions(0), Health::Caution);
        assert_eq!(t.unique_champions(5), Health::Concern);
        assert_eq!(t.unique_champions(6), Health::Concern);
    }

    #[test]
    fn first_start_time_defaults() {
        let t = HealthThresholds::default();

        assert_eq!(t.first_start_time(hm(10, 59)), Health::Healthy);
        assert_eq!(t.first_start_time(hm(11, 0)), Health::Caution);
        assert_eq!(t.first_start_time(hm(11, 59)), Health::Caution);
        assert_eq!(t.first_start_time(hm(12, 0)), Health::Concern);
    }

    #[test]
    fn last_start_time_defaults() {
        let t = HealthThresholds::default();

        assert_eq!(t.last_start_time(hm(17, 59)), Health::Healthy);
        assert_eq!(t.last_start_time(hm(18, 0)), Health::Caution);
        assert_eq!(t.last_start_time(hm(20, 59)), Health::Caution);
        assert_eq!(t.last_start_time(hm(21, 0)), Health::Concern);
        assert_eq!(t.last_start_time(hm(23, 30)), Health::Concern);
    }

    #[test]
    fn colorize_combines_every_metric() {
        let aggregate = DailyAggregate {
            day: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            games_count: 11,
            first_start_time: hm(9, 15),
            last_start_time: hm(21, 40),
            unique_champions: 4,
            main_rotation_count: 8,
            side_rotation_count: 2,
            out_of_rotation_count: 1,
        };

        assert_eq!(
            HealthThresholds::default().colorize(&aggregate),
            DailyHealth {
                games_count: Health::Healthy,
                unique_champions: Health::Caution,
                first_start_time: Health::Healthy,
                last_start_time: Health::Concern,
            }
        );
    }

    #[test]
    fn custom_thresholds_move_the_bounds() {
        let mut t = HealthThresholds::default();
        t.games.healthy_min = 3;
        t.games.healthy_max = 5;
        t.games.concern_below = 2;

        assert_eq!(t.games_count(4), Health::Healthy);
        assert_eq!(t.games_count(1), Health::Concern);
        assert_eq!(t.games_count(11), Health::Caution);
    }

    #[test]
    fn validation_rejects_inverted_bounds() {
        assert!(HealthThresholds::default().validate().is_ok());

        let mut t = HealthThresholds::default();
        t.last_game.caution_from_hour = 22;
        assert!(matches!(t.validate(), Err(AppError::Config(_))));

        let mut t = HealthThresholds::default();
        t.games.healthy_min = 14;
        assert!(t.validate().is_err());

        let mut t = HealthThresholds::default();
        t.first_game.caution_before_hour = 25;
        assert!(t.validate().is_err());
    }

    #[test]
    fn validation_keeps_hours_within_the_day() {
        let mut t = HealthThresholds::default();
        t.last_game.concern_from_hour = 23;
        assert!(t.validate().is_ok());

        t.last_game.concern_from_hour = 24;
        assert!(matches!(t.validate(), Err(AppError::Config(msg)) if msg.contains("0..24")));
    }
}
