use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveTime, Timelike};

use super::rotation::{Rotation, RotationTier};
use super::summary::MatchSummary;

/// Statistics of one calendar day of play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyAggregate {
    pub day: NaiveDate,
    pub games_count: u32,
    /// Floored to the minute.
    pub first_start_time: NaiveTime,
    /// Floored to the minute.
    pub last_start_time: NaiveTime,
    pub unique_champions: u32,
    pub main_rotation_count: u32,
    pub side_rotation_count: u32,
    pub out_of_rotation_count: u32,
}

struct DayAccumulator<'a> {
    games: u32,
    first: NaiveTime,
    last: NaiveTime,
    champions: BTreeSet<&'a str>,
    main: u32,
    side: u32,
    out: u32,
}

impl<'a> DayAccumulator<'a> {
    fn new(start: NaiveTime) -> Self {
        Self {
            games: 0,
            first: start,
            last: start,
            champions: BTreeSet::new(),
            main: 0,
            side: 0,
            out: 0,
        }
    }

    fn add(&mut self, summary: &'a MatchSummary, rotation: &Rotation) {
        let start = summary.start_date.time();

        self.games += 1;
        self.first = self.first.min(start);
        self.last = self.last.max(start);
        self.champions.insert(&summary.champion_name);

        match rotation.tier(&summary.champion_name) {
            RotationTier::Main => self.main += 1,
            RotationTier::Side => self.side += 1,
            RotationTier::Out => self.out += 1,
        }
    }

    fn into_aggregate(self, day: NaiveDate) -> DailyAggregate {
        DailyAggregate {
            day,
            games_count: self.games,
            first_start_time: floor_to_minute(self.first),
            last_start_time: floor_to_minute(self.last),
            unique_champions: self.champions.len() as u32,
            main_rotation_count: self.main,
            side_rotation_count: self.side,
            out_of_rotation_count: self.out,
        }
    }
}

/// Groups summaries by the calendar date of their start in their own zone,
/// most recent day first.
pub fn aggregate_by_day(summaries: &[MatchSummary], rotation: &Rotation) -> Vec<DailyAggregate> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator<'_>> = BTreeMap::new();

    for summary in summaries {
        days.entry(summary.start_date.date_naive())
            .or_insert_with(|| DayAccumulator::new(summary.start_date.time()))
            .add(summary, rotation);
    }

    days.into_iter()
        .rev()
        .map(|(day, acc)| acc.into_aggregate(day))
        .collect()
}

fn floor_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}
