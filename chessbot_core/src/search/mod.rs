//! Tournament search.
//!
//! A record passes when every supplied field of the [`SearchQuery`] accepts
//! it. Callers that want "any field" semantics run one single-field query
//! per field and union the results, see [`search_any_field`].

use crate::TournamentRecord;
use crate::fuzzy::{partial_ratio, token_set_ratio};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunable search policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Minimum fuzzy score (0-100) for the name and city gates.
    #[serde(default = "SearchConfig::default_threshold")]
    pub threshold: u8,

    /// Maximum records returned by one query.
    #[serde(default = "SearchConfig::default_max_results")]
    pub max_results: usize,
}

impl SearchConfig {
    const fn default_threshold() -> u8 {
        80
    }

    const fn default_max_results() -> usize {
        5
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
            max_results: Self::default_max_results(),
        }
    }
}

/// Filters applied to each record. `None` and empty strings are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub city: Option<String>,
    pub date: Option<String>,
}

impl SearchQuery {
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn by_city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn by_date(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Self::default()
        }
    }
}

fn supplied(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    #[must_use]
    pub const fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search with "today" taken from the local clock.
    #[must_use]
    pub fn search_now<'a>(
        &self,
        records: &'a [TournamentRecord],
        query: &SearchQuery,
    ) -> Vec<&'a TournamentRecord> {
        self.search(records, query, Local::now().date_naive())
    }

    /// Records that start on or after `today` and pass every supplied filter,
    /// in input order, at most `max_results` of them.
    ///
    /// Scanning stops as soon as the cap is reached.
    #[must_use]
    pub fn search<'a>(
        &self,
        records: &'a [TournamentRecord],
        query: &SearchQuery,
        today: NaiveDate,
    ) -> Vec<&'a TournamentRecord> {
        let name = supplied(query.name.as_ref()).map(str::to_lowercase);
        let city = supplied(query.city.as_ref()).map(str::to_lowercase);
        let date = supplied(query.date.as_ref());

        let results: Vec<_> = records
            .iter()
            .filter(|record| record.start_date.date() >= today)
            .filter(|record| {
                name.as_deref().is_none_or(|q| {
                    partial_ratio(q, &record.name.to_lowercase()) >= self.config.threshold
                })
            })
            .filter(|record| {
                city.as_deref().is_none_or(|q| {
                    token_set_ratio(q, &record.city.to_lowercase()) >= self.config.threshold
                })
            })
            .filter(|record| {
                date.is_none_or(|q| {
                    record.start_display().contains(q) || record.end_display().contains(q)
                })
            })
            .take(self.config.max_results)
            .collect();

        debug!(
            ?query,
            scanned = records.len(),
            matched = results.len(),
            "Search finished"
        );
        results
    }
}

/// Match `raw` against name, city and date separately and union the results.
///
/// Name matches come first, then city, then date. A record matched by more
/// than one field appears once, at its first position.
#[must_use]
pub fn search_any_field<'a>(
    engine: &SearchEngine,
    records: &'a [TournamentRecord],
    raw: &str,
    today: NaiveDate,
) -> Vec<&'a TournamentRecord> {
    let queries = [
        SearchQuery::by_name(raw),
        SearchQuery::by_city(raw),
        SearchQuery::by_date(raw),
    ];

    let mut merged: Vec<&TournamentRecord> = Vec::new();
    for query in &queries {
        for record in engine.search(records, query, today) {
            if !merged.contains(&record) {
                merged.push(record);
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, NaiveTime};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
            panic!("invalid test date");
        };
        date
    }

    fn at(date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN)
    }

    fn record(name: &str, start: NaiveDate, end: NaiveDate, city: &str) -> TournamentRecord {
        TournamentRecord {
            name: name.to_string(),
            start_date: at(start),
            end_date: at(end),
            city: city.to_string(),
            brochure: None,
        }
    }

    fn today() -> NaiveDate {
        day(2025, 2, 1)
    }

    #[test]
    fn default_policy_constants() {
        let config = SearchConfig::default();
        assert_eq!(config.threshold, 80);
        assert_eq!(config.max_results, 5);
    }

    #[test]
    fn past_tournaments_are_excluded() {
        let records = vec![
            record("Old Open", day(2025, 1, 31), day(2025, 2, 3), "Pune"),
            record("Today Open", day(2025, 2, 1), day(2025, 2, 3), "Pune"),
        ];
        let results = SearchEngine::default().search(&records, &SearchQuery::default(), today());
        assert_eq!(results, vec![&records[1]]);
    }

    #[test]
    fn tbd_start_later_today_is_upcoming() {
        let mut tbd = record("TBD Open", today(), today(), "Pune");
        let Some(time) = NaiveTime::from_hms_opt(15, 0, 0) else {
            panic!("invalid test time");
        };
        tbd.start_date = today().and_time(time);
        let records = vec![tbd];
        let results = SearchEngine::default().search(&records, &SearchQuery::by_name("tbd"), today());
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn misspelled_name_still_matches() {
        let records = vec![record("Delhi Open", day(2025, 3, 1), day(2025, 3, 5), "New Delhi")];
        let results =
            SearchEngine::default().search(&records, &SearchQuery::by_name("dehli opn"), today());
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn name_match_is_case_insensitive() {
        let records = vec![record("Delhi Open", day(2025, 3, 1), day(2025, 3, 5), "New Delhi")];
        let results =
            SearchEngine::default().search(&records, &SearchQuery::by_name("DELHI OPEN"), today());
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn city_match_ignores_word_order() {
        let records = vec![
            record("A", day(2025, 3, 1), day(2025, 3, 2), "New Delhi"),
            record("B", day(2025, 3, 1), day(2025, 3, 2), "Chennai"),
        ];
        let engine = SearchEngine::default();
        let forward = engine.search(&records, &SearchQuery::by_city("New Delhi"), today());
        let reversed = engine.search(&records, &SearchQuery::by_city("Delhi New"), today());
        assert_eq!(forward, reversed);
        assert_eq!(forward, vec![&records[0]]);
    }

    #[test]
    fn date_matches_by_substring_of_either_date() {
        let records = vec![
            record("A", day(2025, 3, 1), day(2025, 3, 5), "Pune"),
            record("B", day(2025, 4, 28), day(2025, 5, 2), "Pune"),
        ];
        let engine = SearchEngine::default();
        assert_eq!(
            engine.search(&records, &SearchQuery::by_date("03-2025"), today()),
            vec![&records[0]]
        );
        assert_eq!(
            engine.search(&records, &SearchQuery::by_date("02-05"), today()),
            vec![&records[1]]
        );
    }

    #[test]
    fn results_are_capped_and_ordered() {
        let records: Vec<_> = (1..=8)
            .map(|i| record(&format!("Open {i}"), day(2025, 3, i), day(2025, 3, i), "Pune"))
            .collect();
        let results = SearchEngine::default().search(&records, &SearchQuery::by_city("pune"), today());
        assert_eq!(results.len(), 5);
        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Open 1", "Open 2", "Open 3", "Open 4", "Open 5"]);
    }

    #[test]
    fn empty_field_is_not_a_filter() {
        let records = vec![record("A", day(2025, 3, 1), day(2025, 3, 2), "Pune")];
        let results = SearchEngine::default().search(&records, &SearchQuery::by_name(""), today());
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn supplied_fields_combine_with_and() {
        let records = vec![
            record("Delhi Open", day(2025, 3, 1), day(2025, 3, 2), "New Delhi"),
            record("Delhi Open", day(2025, 3, 1), day(2025, 3, 2), "Chennai"),
        ];
        let query = SearchQuery {
            name: Some("delhi".to_string()),
            city: Some("chennai".to_string()),
            date: None,
        };
        let results = SearchEngine::default().search(&records, &query, today());
        assert_eq!(results, vec![&records[1]]);
    }

    #[test]
    fn any_field_unions_without_duplicates() {
        let records = vec![
            record("Pune Open", day(2025, 3, 1), day(2025, 3, 2), "Pune"),
            record("Goa Rapid", day(2025, 3, 1), day(2025, 3, 2), "Panaji"),
            record("Blitz Cup", day(2025, 3, 3), day(2025, 3, 4), "Pune"),
        ];
        let results = search_any_field(&SearchEngine::default(), &records, "pune", today());
        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Pune Open", "Blitz Cup"]);
    }
}
