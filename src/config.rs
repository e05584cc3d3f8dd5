use std::env;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::str::FromStr;

use chrono_tz::Tz;

use crate::dashboard::{
    ChampionThresholds, FirstGameThresholds, GamesThresholds, HealthThresholds,
    LastGameThresholds, Rotation, TrackedPlayer,
};
use crate::error::AppError;
use crate::riot::Region;

#[derive(Debug, Clone)]
pub struct Config {
    pub riot_api_key: String,
    pub player: TrackedPlayer,
    pub region: Region,
    pub timezone: Tz,
    pub rotation: Rotation,
    pub thresholds: HealthThresholds,
    pub riot_rate_limit_per_second: NonZeroU32,
    pub refresh_interval_secs: Option<u64>,
    pub html_output: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        const DEFAULT_REGION: &str = "europe";
        const DEFAULT_TIMEZONE: &str = "Europe/Belgrade";
        const DEFAULT_MAIN_ROTATION: &str = "Zeri,Xayah,Kalista";
        const DEFAULT_SIDE_ROTATION: &str = "Jhin,Ziggs";
        const DEFAULT_RIOT_RATE_LIMIT_PER_SECOND: u32 = 20;

        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let riot_api_key =
            var("RIOT_API_KEY").ok_or_else(|| AppError::Config("RIOT_API_KEY must be set".into()))?;

        let puuid =
            var("PLAYER_PUUID").ok_or_else(|| AppError::Config("PLAYER_PUUID must be set".into()))?;

        let account_id = var("ACCOUNT_ID");

        let region: Region = var("RIOT_REGION")
            .as_deref()
            .unwrap_or(DEFAULT_REGION)
            .parse()?;

        let timezone_name = var("TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.into());
        let timezone: Tz = timezone_name
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidTimezone(timezone_name.clone()))?;

        let rotation = Rotation::new(
            champion_list(&var("MAIN_ROTATION").unwrap_or_else(|| DEFAULT_MAIN_ROTATION.into())),
            champion_list(&var("SIDE_ROTATION").unwrap_or_else(|| DEFAULT_SIDE_ROTATION.into())),
        );

        let riot_rate_limit_per_second =
            parse_or(&var, "RIOT_RATE_LIMIT_PER_SECOND", DEFAULT_RIOT_RATE_LIMIT_PER_SECOND)
                .and_then(|n| {
                    NonZeroU32::new(n).ok_or_else(|| {
                        AppError::Config("RIOT_RATE_LIMIT_PER_SECOND must not be 0".into())
                    })
                })?;

        let refresh_interval_secs: u64 = parse_or(&var, "REFRESH_INTERVAL_SECS", 0)?;
        let refresh_interval_secs = (refresh_interval_secs > 0).then_some(refresh_interval_secs);

        let html_output = var("HTML_OUTPUT").map(PathBuf::from);

        Ok(Self {
            riot_api_key,
            player: TrackedPlayer { puuid, account_id },
            region,
            timezone,
            rotation,
            thresholds: thresholds_from(&var)?,
            riot_rate_limit_per_second,
            refresh_interval_secs,
            html_output,
        })
    }
}

fn thresholds_from(var: &impl Fn(&str) -> Option<String>) -> Result<HealthThresholds, AppError> {
    let d = HealthThresholds::default();

    HealthThresholds {
        games: GamesThresholds {
            healthy_min: parse_or(var, "GAMES_HEALTHY_MIN", d.games.healthy_min)?,
            healthy_max: parse_or(var, "GAMES_HEALTHY_MAX", d.games.healthy_max)?,
            concern_below: parse_or(var, "GAMES_CONCERN_BELOW", d.games.concern_below)?,
        },
        champions: ChampionThresholds {
            healthy_max: parse_or(var, "CHAMPIONS_HEALTHY_MAX", d.champions.healthy_max)?,
            caution_max: parse_or(var, "CHAMPIONS_CAUTION_MAX", d.champions.caution_max)?,
        },
        first_game: FirstGameThresholds {
            healthy_before_hour: parse_or(
                var,
                "FIRST_GAME_HEALTHY_BEFORE",
                d.first_game.healthy_before_hour,
            )?,
            caution_before_hour: parse_or(
                var,
                "FIRST_GAME_CAUTION_BEFORE",
                d.first_game.caution_before_hour,
            )?,
        },
        last_game: LastGameThresholds {
            caution_from_hour: parse_or(
                var,
                "LAST_GAME_CAUTION_FROM",
                d.last_game.caution_from_hour,
            )?,
            concern_from_hour: parse_or(
                var,
                "LAST_GAME_CONCERN_FROM",
                d.last_game.concern_from_hour,
            )?,
        },
    }
    .validate()
}

fn parse_or<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError> {
    match var(name) {
        Some(raw) => parse_value(name, &raw),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{name} has an invalid value: {raw:?}")))
}

fn champion_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
