//! Turns a week of match history into the daily healthcheck table.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{debug, info, instrument};

use crate::error::AppError;
use crate::fetcher::{CacheStats, CachedFetcher, MatchFetcher};

mod aggregate;
mod health;
mod report;
mod rotation;
mod summary;

pub use aggregate::{DailyAggregate, aggregate_by_day};
pub use health::{
    ChampionThresholds, DailyHealth, FirstGameThresholds, GamesThresholds, Health,
    HealthThresholds, LastGameThresholds,
};
pub use report::{Report, ReportRow};
pub use rotation::{Rotation, RotationTier};
pub use summary::MatchSummary;

/// Full days looked back before today.
pub const LOOKBACK_DAYS: u64 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedPlayer {
    pub puuid: String,
    /// Display only.
    pub account_id: Option<String>,
}

/// Inclusive bounds of one match-id query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// The previous [`LOOKBACK_DAYS`] full days, then today up to `now`, both in
/// the zone of `now`. The windows never overlap.
pub fn recent_windows(now: DateTime<Tz>) -> [TimeWindow; 2] {
    let tz = now.timezone();
    let today = now.date_naive();
    let today_start = local_midnight(tz, today);
    let week_start = today
        .checked_sub_days(Days::new(LOOKBACK_DAYS))
        .map(|day| local_midnight(tz, day))
        .unwrap_or(today_start);

    [
        TimeWindow {
            start: week_start.with_timezone(&Utc),
            end: (today_start - TimeDelta::seconds(1)).with_timezone(&Utc),
        },
        TimeWindow {
            start: today_start.with_timezone(&Utc),
            end: now.with_timezone(&Utc),
        },
    ]
}

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Start of `day` in `tz`. Zones that skip midnight on a DST change start the
/// day at the first local minute after the gap.
fn local_midnight(tz: Tz, day: NaiveDate) -> DateTime<Tz> {
    let midnight = day.and_time(NaiveTime::MIN);

    (0..MINUTES_PER_DAY)
        .map(|minute| midnight + TimeDelta::minutes(minute))
        .find_map(|naive| tz.from_local_datetime(&naive).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

pub struct Dashboard<F> {
    fetcher: CachedFetcher<F>,
    player: TrackedPlayer,
    timezone: Tz,
    rotation: Rotation,
    thresholds: HealthThresholds,
}

impl<F: MatchFetcher> Dashboard<F> {
    pub fn new(
        fetcher: F,
        player: TrackedPlayer,
        timezone: Tz,
        rotation: Rotation,
        thresholds: HealthThresholds,
    ) -> Self {
        Self {
            fetcher: CachedFetcher::new(fetcher),
            player,
            timezone,
            rotation,
            thresholds,
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.fetcher.stats()
    }

    pub fn fetcher(&self) -> &CachedFetcher<F> {
        &self.fetcher
    }

    /// Match ids of the last week, older window first. Not deduplicated.
    pub async fn collect_recent_matches(&self) -> Result<Vec<String>, AppError> {
        self.collect_matches_at(Utc::now().with_timezone(&self.timezone))
            .await
    }

    pub async fn collect_matches_at(&self, now: DateTime<Tz>) -> Result<Vec<String>, AppError> {
        let mut match_ids = Vec::new();

        for window in recent_windows(now) {
            let ids = self.fetcher.fetch_match_ids(window.start, window.end).await?;
            debug!(
                start = %window.start,
                end = %window.end,
                count = ids.len(),
                "🛰️ Fetched match ids"
            );
            match_ids.extend(ids);
        }

        Ok(match_ids)
    }

    /// One summary per ranked solo match, in input order.
    pub async fn build_match_summaries(
        &self,
        match_ids: &[String],
    ) -> Result<Vec<MatchSummary>, AppError> {
        let mut summaries = Vec::with_capacity(match_ids.len());

        for match_id in match_ids {
            let detail = self.fetcher.fetch_match_detail(match_id).await?;

            if !detail.info.is_solo_queue() {
                debug!(
                    match_id = %match_id,
                    queue_id = detail.info.queue_id,
                    queue = detail.info.queue_name(),
                    "🛰️ Skipping non ranked solo match"
                );
                continue;
            }

            summaries.push(MatchSummary::from_match(
                match_id,
                &detail,
                &self.player.puuid,
                self.timezone,
            )?);
        }

        Ok(summaries)
    }

    pub fn aggregate_by_day(&self, summaries: &[MatchSummary]) -> Vec<DailyAggregate> {
        aggregate_by_day(summaries, &self.rotation)
    }

    pub fn colorize(&self, aggregate: &DailyAggregate) -> DailyHealth {
        self.thresholds.colorize(aggregate)
    }

    /// Runs the whole pipeline, reusing responses memoized in this session.
    pub async fn render(&self) -> Result<Report, AppError> {
        self.render_at(Utc::now().with_timezone(&self.timezone))
            .await
    }

    #[instrument(skip(self), fields(account = self.player.account_id.as_deref()))]
    pub async fn render_at(&self, now: DateTime<Tz>) -> Result<Report, AppError> {
        let match_ids = self.collect_matches_at(now).await?;
        let mut summaries = self.build_match_summaries(&match_ids).await?;
        let rows: Vec<ReportRow> = self
            .aggregate_by_day(&summaries)
            .into_iter()
            .map(|aggregate| ReportRow {
                health: self.colorize(&aggregate),
                aggregate,
            })
            .collect();

        let stats = self.cache_stats();
        info!(
            matches = match_ids.len(),
            ranked = summaries.len(),
            days = rows.len(),
            cache_hits = stats.hits,
            cache_misses = stats.misses,
            "📊 Healthcheck rendered"
        );

        summaries.sort_by(|a, b| b.start_date.cmp(&a.start_date));

        Ok(Report {
            title: self.title(),
            generated_at: now,
            rows,
            matches: summaries,
        })
    }

    /// Forgets the session cache and renders from fresh API data.
    pub async fn refresh(&self) -> Result<Report, AppError> {
        self.fetcher.clear();
        self.render().await
    }

    fn title(&self) -> String {
        match &self.player.account_id {
            Some(account) => format!("LoL improvement healthcheck - {account}"),
            None => "LoL improvement healthcheck".to_string(),
        }
    }
}
