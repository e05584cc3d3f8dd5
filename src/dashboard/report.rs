use std::fmt::Write as _;

use chrono::DateTime;
use chrono_tz::Tz;

use super::aggregate::DailyAggregate;
use super::health::{DailyHealth, Health};
use super::summary::MatchSummary;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub aggregate: DailyAggregate,
    pub health: DailyHealth,
}

/// Result of one render pass, most recent day first.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub generated_at: DateTime<Tz>,
    pub rows: Vec<ReportRow>,
    /// Ranked solo games behind the rows, most recent first.
    pub matches: Vec<MatchSummary>,
}

const TIMELINE_HEADERS: [&str; 7] = [
    "Start",
    "End",
    "Minutes",
    "Champion",
    "K/D/A",
    "KDA",
    "CS/min",
];

const HEADERS: [&str; 8] = [
    "Day",
    "Games",
    "First game",
    "Last game",
    "Champions",
    "Main",
    "Side",
    "Out",
];

impl Report {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fixed-width table, classified cells get an ANSI background when `ansi` is set.
    pub fn to_text_table(&self, ansi: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} (generated {})",
            self.title,
            self.generated_at.format("%Y-%m-%d %H:%M %Z")
        );

        let header: Vec<String> = HEADERS.iter().map(|h| format!("{h:>10}")).collect();
        let _ = writeln!(out, "{}", header.join(" "));

        if self.rows.is_empty() {
            let _ = writeln!(out, "No ranked solo games in the last 7 days.");
            return out;
        }

        for row in &self.rows {
            let a = &row.aggregate;
            let h = &row.health;
            let cells = [
                plain(a.day.format("%Y-%m-%d").to_string()),
                paint(a.games_count.to_string(), h.games_count, ansi),
                paint(a.first_start_time.format("%H:%M").to_string(), h.first_start_time, ansi),
                paint(a.last_start_time.format("%H:%M").to_string(), h.last_start_time, ansi),
                paint(a.unique_champions.to_string(), h.unique_champions, ansi),
                plain(a.main_rotation_count.to_string()),
                plain(a.side_rotation_count.to_string()),
                plain(a.out_of_rotation_count.to_string()),
            ];
            let _ = writeln!(out, "{}", cells.join(" "));
        }

        out
    }

    /// Standalone HTML page holding the styled daily table.
    pub fn to_html(&self) -> String {
        let title = escape_html(&self.title);
        let mut out = String::new();

        let _ = writeln!(out, "<!DOCTYPE html>");
        let _ = writeln!(out, "<html lang=\"en\">");
        let _ = writeln!(out, "<head><meta charset=\"utf-8\"><title>{title}</title></head>");
        let _ = writeln!(out, "<body>");
        let _ = writeln!(out, "<h1>{title}</h1>");
        let _ = writeln!(
            out,
            "<p>Generated {}</p>",
            self.generated_at.format("%Y-%m-%d %H:%M %Z")
        );
        let _ = writeln!(out, "<h2>Daily healthcheck</h2>");
        let _ = writeln!(out, "<table>");

        let _ = write!(out, "<tr>");
        for header in HEADERS {
            let _ = write!(out, "<th>{header}</th>");
        }
        let _ = writeln!(out, "</tr>");

        for row in &self.rows {
            let a = &row.aggregate;
            let h = &row.health;
            let _ = writeln!(
                out,
                "<tr><td>{}</td>{}{}{}{}<td>{}</td><td>{}</td><td>{}</td></tr>",
                a.day.format("%Y-%m-%d"),
                html_cell(a.games_count.to_string(), h.games_count),
                html_cell(a.first_start_time.format("%H:%M").to_string(), h.first_start_time),
                html_cell(a.last_start_time.format("%H:%M").to_string(), h.last_start_time),
                html_cell(a.unique_champions.to_string(), h.unique_champions),
                a.main_rotation_count,
                a.side_rotation_count,
                a.out_of_rotation_count,
            );
        }

        let _ = writeln!(out, "</table>");

        if !self.matches.is_empty() {
            let _ = writeln!(out, "<h2>Timeline</h2>");
            let _ = writeln!(out, "<table>");
            let _ = write!(out, "<tr>");
            for header in TIMELINE_HEADERS {
                let _ = write!(out, "<th>{header}</th>");
            }
            let _ = writeln!(out, "</tr>");

            for game in &self.matches {
                let _ = writeln!(
                    out,
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}/{}/{}</td><td>{:.2}</td><td>{:.1}</td></tr>",
                    game.start_date.format("%Y-%m-%d %H:%M"),
                    game.end_date.format("%H:%M"),
                    (game.end_date - game.start_date).num_minutes(),
                    escape_html(&game.champion_name),
                    game.kills,
                    game.deaths,
                    game.assists,
                    game.kda_ratio(),
                    game.cs_per_minute(),
                );
            }
            let _ = writeln!(out, "</table>");
        }

        let _ = writeln!(out, "</body>");
        let _ = writeln!(out, "</html>");

        out
    }
}

fn plain(value: String) -> String {
    format!("{value:>10}")
}

fn paint(value: String, health: Health, ansi: bool) -> String {
    if ansi {
        format!("\x1b[30;{}m{value:>10}\x1b[0m", health.ansi_background())
    } else {
        plain(value)
    }
}

fn html_cell(value: String, health: Health) -> String {
    format!(
        "<td class=\"{}\" style=\"background-color: {}\">{value}</td>",
        health.as_str(),
        health.css_color()
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, TimeZone};

    use super::*;

    fn game(start_hour: u32, champion_name: &str) -> MatchSummary {
        let start_date = chrono_tz::Europe::Belgrade
            .with_ymd_and_hms(2024, 1, 3, start_hour, 5, 0)
            .unwrap();
        MatchSummary {
            match_id: format!("EUW1_{start_hour}"),
            start_date,
            end_date: start_date + chrono::TimeDelta::minutes(32),
            duration: 1_920,
            champion_name: champion_name.to_string(),
            champion_id: 0,
            kills: 7,
            deaths: 2,
            assists: 5,
            damage_to_champions: 0,
            gold_earned: 0,
            minions_killed: 224,
        }
    }

    fn report(rows: Vec<ReportRow>) -> Report {
        Report {
            title: "LoL improvement healthcheck <me>".into(),
            generated_at: chrono_tz::Europe::Belgrade
                .with_ymd_and_hms(2024, 1, 3, 12, 0, 0)
                .unwrap(),
            rows,
            matches: Vec::new(),
        }
    }

    fn row() -> ReportRow {
        ReportRow {
            aggregate: DailyAggregate {
                day: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                games_count: 5,
                first_start_time: NaiveTime::from_hms_opt(9, 5, 0).unwrap(),
                last_start_time: NaiveTime::from_hms_opt(19, 40, 0).unwrap(),
                unique_champions: 2,
                main_rotation_count: 3,
                side_rotation_count: 1,
                out_of_rotation_count: 1,
            },
            health: DailyHealth {
                games_count: Health::Concern,
                unique_champions: Health::Healthy,
                first_start_time: Health::Healthy,
                last_start_time: Health::Caution,
            },
        }
    }

    #[test]
    fn text_table_lists_each_day() {
        let table = report(vec![row()]).to_text_table(false);

        assert!(table.contains("2024-01-03"));
        assert!(table.contains("09:05"));
        assert!(table.contains("19:40"));
        assert!(!table.contains('\x1b'));
    }

    #[test]
    fn text_table_paints_classified_cells() {
        let table = report(vec![row()]).to_text_table(true);

        assert!(table.contains("\x1b[30;41m"));
        assert!(table.contains("\x1b[30;43m"));
        assert!(table.contains("\x1b[30;42m"));
    }

    #[test]
    fn empty_report_says_so() {
        let report = report(vec![]);

        assert!(report.is_empty());
        assert!(report.to_text_table(false).contains("No ranked solo games"));
    }

    #[test]
    fn html_colors_cells_and_escapes_title() {
        let html = report(vec![row()]).to_html();

        assert!(html.contains("&lt;me&gt;"));
        assert!(html.contains("<td class=\"concern\" style=\"background-color: red\">5</td>"));
        assert!(html.contains("<td class=\"caution\" style=\"background-color: yellow\">19:40</td>"));
        assert!(html.contains("<td>3</td><td>1</td><td>1</td>"));
    }

    #[test]
    fn html_lists_each_game_on_the_timeline() {
        let mut report = report(vec![row()]);
        report.matches = vec![game(19, "Kai'Sa"), game(9, "Zeri")];

        let html = report.to_html();

        assert!(html.contains("<h2>Timeline</h2>"));
        assert!(html.contains(
            "<tr><td>2024-01-03 19:05</td><td>19:37</td><td>32</td><td>Kai&#39;Sa</td><td>7/2/5</td><td>6.00</td><td>7.0</td></tr>"
        ));
        assert!(html.find("19:05").unwrap() < html.find("09:05</td><td>09:37").unwrap());
    }

    #[test]
    fn html_without_games_has_no_timeline() {
        assert!(!report(vec![]).to_html().contains("Timeline"));
    }
}
