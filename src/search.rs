//! Relevance scoring and two-phase search.
//!
//! Every record is scored against a [`ParsedQuery`] by [`score_record`],
//! which is driven entirely by a [`ToleranceProfile`]: the day/month/year
//! windows and the points awarded inside each one. [`search`] runs the
//! strict profile first and, when that finds nothing for a query with a
//! date constraint, runs the relaxed profile over the same records.
//!
//! # Scoring
//!
//! | Component | Strict default |
//! |-----------|----------------|
//! | exact day / ≤3 days / ≤7 days, same month only | 25 / 18 / 12 |
//! | same year and month (date queries) | 8 |
//! | year exact / within tolerance | 10 / 5 |
//! | month exact / within tolerance | 6 / 3 |
//! | each queried region present | 5 |
//! | each queried parameter present | 3 |
//! | generic query, uploaded record | 10 |
//! | unfiltered query, TEMP present, nothing else | 1 |
//!
//! A record that misses the query's temporal constraint, or matches none
//! of its regions, scores 0 regardless of other components. Records
//! scoring 0 never appear in results.

use anyhow::Result;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{ProfileRecord, SourceKind};
use crate::parameters::Parameter;
use crate::query::{ParsedQuery, TemporalFilter};
use crate::regions;

/// Windows and point weights for one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToleranceProfile {
    /// Day distance for the "near" tier.
    pub near_days: i64,
    /// Day distance for the "week" tier.
    pub week_days: i64,
    /// Day distance for the extended tier; 0 disables it.
    pub extended_days: i64,
    /// Day tiers also apply to records outside the queried month.
    pub cross_month_days: bool,
    pub exact_day_points: u32,
    pub near_day_points: u32,
    pub week_points: u32,
    pub extended_points: u32,
    /// Date queries: record in the same year and month as the date.
    pub same_month_points: u32,
    /// Date queries: record within the month and year tolerances; 0 disables.
    pub nearby_month_points: u32,
    pub year_tolerance: i32,
    pub month_tolerance: u32,
    pub year_points: u32,
    pub near_year_points: u32,
    pub month_points: u32,
    pub near_month_points: u32,
    pub region_points: u32,
    pub parameter_points: u32,
    pub uploaded_boost: u32,
    pub floor_points: u32,
}

impl ToleranceProfile {
    pub fn strict() -> Self {
        Self {
            near_days: 3,
            week_days: 7,
            extended_days: 0,
            cross_month_days: false,
            exact_day_points: 25,
            near_day_points: 18,
            week_points: 12,
            extended_points: 0,
            same_month_points: 8,
            nearby_month_points: 0,
            year_tolerance: 0,
            month_tolerance: 1,
            year_points: 10,
            near_year_points: 5,
            month_points: 6,
            near_month_points: 3,
            region_points: 5,
            parameter_points: 3,
            uploaded_boost: 10,
            floor_points: 1,
        }
    }

    pub fn relaxed() -> Self {
        Self {
            near_days: 3,
            week_days: 7,
            extended_days: 14,
            cross_month_days: true,
            exact_day_points: 20,
            near_day_points: 15,
            week_points: 10,
            extended_points: 8,
            same_month_points: 6,
            nearby_month_points: 4,
            year_tolerance: 1,
            month_tolerance: 2,
            year_points: 6,
            near_year_points: 3,
            month_points: 4,
            near_month_points: 2,
            region_points: 5,
            parameter_points: 3,
            uploaded_boost: 10,
            floor_points: 1,
        }
    }
}

/// Partial [`ToleranceProfile`] read from configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToleranceOverrides {
    pub near_days: Option<i64>,
    pub week_days: Option<i64>,
    pub extended_days: Option<i64>,
    pub cross_month_days: Option<bool>,
    pub exact_day_points: Option<u32>,
    pub near_day_points: Option<u32>,
    pub week_points: Option<u32>,
    pub extended_points: Option<u32>,
    pub same_month_points: Option<u32>,
    pub nearby_month_points: Option<u32>,
    pub year_tolerance: Option<i32>,
    pub month_tolerance: Option<u32>,
    pub year_points: Option<u32>,
    pub near_year_points: Option<u32>,
    pub month_points: Option<u32>,
    pub near_month_points: Option<u32>,
    pub region_points: Option<u32>,
    pub parameter_points: Option<u32>,
    pub uploaded_boost: Option<u32>,
    pub floor_points: Option<u32>,
}

macro_rules! override_fields {
    ($base:ident, $over:ident, $($field:ident),+ $(,)?) => {
        $(if let Some(v) = $over.$field { $base.$field = v; })+
    };
}

impl ToleranceOverrides {
    pub fn apply(&self, mut base: ToleranceProfile) -> ToleranceProfile {
        let over = self;
        override_fields!(
            base,
            over,
            near_days,
            week_days,
            extended_days,
            cross_month_days,
            exact_day_points,
            near_day_points,
            week_points,
            extended_points,
            same_month_points,
            nearby_month_points,
            year_tolerance,
            month_tolerance,
            year_points,
            near_year_points,
            month_points,
            near_month_points,
            region_points,
            parameter_points,
            uploaded_boost,
            floor_points,
        );
        base
    }
}

/// Why a record was forced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Exclusion {
    TemporalMiss,
    RegionMiss,
}

/// Per-component points for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub temporal: u32,
    pub region: u32,
    pub parameter: u32,
    pub boost: u32,
    pub floor: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded: Option<Exclusion>,
}

impl ScoreBreakdown {
    fn excluded(reason: Exclusion) -> Self {
        Self {
            excluded: Some(reason),
            ..Default::default()
        }
    }

    pub fn total(&self) -> u32 {
        if self.excluded.is_some() {
            return 0;
        }
        self.temporal + self.region + self.parameter + self.boost + self.floor
    }
}

fn month_index(year: i32, month: u32) -> i64 {
    year as i64 * 12 + month as i64
}

/// Points for the temporal constraint; `None` is a miss.
fn temporal_points(
    record: &ProfileRecord,
    filter: &TemporalFilter,
    profile: &ToleranceProfile,
) -> Option<u32> {
    match filter {
        TemporalFilter::None => Some(0),
        TemporalFilter::Date(target) => {
            let ts = record.timestamp.as_ref()?;
            let tier_points = |points: u32| Some(points).filter(|p| *p > 0);
            let same_month = ts.year == target.year() && ts.month == target.month();
            let day_tiers = ts.date().filter(|_| same_month || profile.cross_month_days);
            if let Some(date) = day_tiers {
                let days = (date - *target).num_days().abs();
                if days == 0 {
                    return Some(profile.exact_day_points);
                }
                if days <= profile.near_days {
                    return Some(profile.near_day_points);
                }
                if days <= profile.week_days {
                    return Some(profile.week_points);
                }
                if profile.extended_days > 0 && days <= profile.extended_days {
                    if let Some(p) = tier_points(profile.extended_points) {
                        return Some(p);
                    }
                }
            }
            if same_month {
                if let Some(p) = tier_points(profile.same_month_points) {
                    return Some(p);
                }
            }
            let months_apart =
                (month_index(ts.year, ts.month) - month_index(target.year(), target.month())).abs();
            let years_apart = (ts.year - target.year()).abs();
            if profile.nearby_month_points > 0
                && months_apart <= profile.month_tolerance as i64
                && years_apart <= profile.year_tolerance
            {
                return Some(profile.nearby_month_points);
            }
            None
        }
        TemporalFilter::YearMonth { years, months } => {
            let ts = record.timestamp.as_ref()?;
            let mut points = 0;
            if !years.is_empty() {
                let distance = years.iter().map(|y| (ts.year - y).abs()).min()?;
                points += if distance == 0 {
                    profile.year_points
                } else if distance <= profile.year_tolerance {
                    profile.near_year_points
                } else {
                    return None;
                };
            }
            if !months.is_empty() {
                // Month-of-year distance wraps around December/January.
                let distance = months
                    .iter()
                    .map(|m| {
                        let d = ts.month.abs_diff(*m);
                        d.min(12 - d)
                    })
                    .min()?;
                points += if distance == 0 {
                    profile.month_points
                } else if distance <= profile.month_tolerance {
                    profile.near_month_points
                } else {
                    return None;
                };
            }
            Some(points)
        }
    }
}

fn matched_regions(record: &ProfileRecord, query: &ParsedQuery) -> usize {
    let tags: Vec<String> = record
        .region_tags
        .iter()
        .map(|t| regions::normalize_name(t))
        .collect();
    query
        .regions
        .iter()
        .filter(|r| tags.contains(&regions::normalize_name(r)))
        .count()
}

/// Score one record. Pure: the same inputs always give the same breakdown.
pub fn score_record(
    record: &ProfileRecord,
    query: &ParsedQuery,
    profile: &ToleranceProfile,
) -> ScoreBreakdown {
    let temporal = match temporal_points(record, &query.temporal, profile) {
        Some(p) => p,
        None => return ScoreBreakdown::excluded(Exclusion::TemporalMiss),
    };

    let region = if query.regions.is_empty() {
        0
    } else {
        match matched_regions(record, query) {
            0 => return ScoreBreakdown::excluded(Exclusion::RegionMiss),
            n => n as u32 * profile.region_points,
        }
    };

    let parameter = query
        .parameters
        .iter()
        .filter(|p| record.has_parameter(**p))
        .count() as u32
        * profile.parameter_points;

    let boost = if query.generic && record.source.kind == SourceKind::Uploaded {
        profile.uploaded_boost
    } else {
        0
    };

    let mut breakdown = ScoreBreakdown {
        temporal,
        region,
        parameter,
        boost,
        floor: 0,
        excluded: None,
    };
    if !query.has_filters() && breakdown.total() == 0 && record.has_parameter(Parameter::Temp) {
        breakdown.floor = profile.floor_points;
    }
    breakdown
}

/// A ranked record.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub record: &'a ProfileRecord,
    /// Index of the record in the input slice.
    pub position: usize,
    pub score: u32,
    pub breakdown: ScoreBreakdown,
}

/// Score every record with one profile, keep positive scores, sort by
/// descending score (ties keep input order) and truncate.
pub fn rank<'a>(
    records: &'a [ProfileRecord],
    query: &ParsedQuery,
    profile: &ToleranceProfile,
    limit: usize,
) -> Vec<SearchHit<'a>> {
    let mut hits: Vec<SearchHit<'a>> = records
        .iter()
        .enumerate()
        .filter_map(|(position, record)| {
            let breakdown = score_record(record, query, profile);
            let score = breakdown.total();
            (score > 0).then_some(SearchHit {
                record,
                position,
                score,
                breakdown,
            })
        })
        .collect();

    // sort_by is stable, so equal scores stay in collection order.
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(limit);
    hits
}

/// Which profile produced the hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    Strict,
    Relaxed,
}

/// Why a search returned nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    EmptyCollection,
    BlankQuery,
    /// The query named no date, month, year or region and no record scored.
    NoFilters,
    /// The query had filters and no record satisfied them.
    NothingMatched,
}

/// Profiles and limit for [`search`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub strict: ToleranceProfile,
    pub relaxed: ToleranceProfile,
    pub final_limit: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            strict: ToleranceProfile::strict(),
            relaxed: ToleranceProfile::relaxed(),
            final_limit: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome<'a> {
    pub query: ParsedQuery,
    pub hits: Vec<SearchHit<'a>>,
    pub phase: SearchPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_reason: Option<EmptyReason>,
}

fn empty_outcome<'a>(query: ParsedQuery, reason: EmptyReason) -> SearchOutcome<'a> {
    SearchOutcome {
        query,
        hits: Vec::new(),
        phase: SearchPhase::Strict,
        empty_reason: Some(reason),
    }
}

/// Rank `records` against `query_text`, strict first, relaxed as fallback.
pub fn search<'a>(
    records: &'a [ProfileRecord],
    query_text: &str,
    params: &SearchParams,
) -> SearchOutcome<'a> {
    let query = ParsedQuery::parse(query_text);

    if query_text.trim().is_empty() {
        return empty_outcome(query, EmptyReason::BlankQuery);
    }
    if records.is_empty() {
        return empty_outcome(query, EmptyReason::EmptyCollection);
    }
    for note in &query.notes {
        warn!(?note, "query contains a date that could not be read");
    }

    let strict = rank(records, &query, &params.strict, params.final_limit);
    debug!(hits = strict.len(), "strict pass");
    if !strict.is_empty() {
        return SearchOutcome {
            query,
            hits: strict,
            phase: SearchPhase::Strict,
            empty_reason: None,
        };
    }

    if query.has_temporal() {
        let relaxed = rank(records, &query, &params.relaxed, params.final_limit);
        info!(hits = relaxed.len(), "strict pass empty, relaxed date tolerance applied");
        if !relaxed.is_empty() {
            return SearchOutcome {
                query,
                hits: relaxed,
                phase: SearchPhase::Relaxed,
                empty_reason: None,
            };
        }
    }

    let reason = if query.has_filters() {
        EmptyReason::NothingMatched
    } else {
        EmptyReason::NoFilters
    };
    let mut outcome = empty_outcome(query, reason);
    if outcome.query.has_temporal() {
        outcome.phase = SearchPhase::Relaxed;
    }
    outcome
}

/// `floatchat search`: rank the stored snapshot and print the hits.
pub fn run_search(config: &Config, query: &str, limit: Option<usize>, explain: bool) -> Result<()> {
    if query.trim().is_empty() {
        println!("No results.");
        return Ok(());
    }

    let collection = crate::export::load_or_empty(&config.store.snapshot_path)?;
    let mut params = config.search_params();
    if let Some(limit) = limit {
        params.final_limit = limit.max(1);
    }

    let outcome = collection.search(query, &params);
    if outcome.hits.is_empty() {
        info!(reason = ?outcome.empty_reason, "search returned no records");
        println!("No results.");
        return Ok(());
    }
    if outcome.phase == SearchPhase::Relaxed {
        println!("(no exact matches; showing results with relaxed date tolerance)");
        println!();
    }

    for (i, hit) in outcome.hits.iter().enumerate() {
        let record = hit.record;
        let date = record
            .timestamp
            .as_ref()
            .map(|t| t.date_label())
            .unwrap_or_else(|| "(undated)".to_string());

        println!(
            "{}. [{}] {} / {}",
            i + 1,
            hit.score,
            date,
            record.region_tags.join(", ")
        );
        println!(
            "    source: {} ({})",
            record.source.name,
            record.source.kind.as_str()
        );
        match record.coordinates {
            Some(c) if c.is_default => println!(
                "    location: {:.2}, {:.2} (default location)",
                c.latitude, c.longitude
            ),
            Some(c) => println!("    location: {:.2}, {:.2}", c.latitude, c.longitude),
            None => println!("    location: unknown"),
        }
        let params: Vec<&str> = record.parameter_stats.keys().map(|k| k.as_str()).collect();
        println!("    parameters: {}", params.join(", "));
        if explain {
            let b = &hit.breakdown;
            println!(
                "    score: temporal={} region={} parameter={} boost={} floor={}",
                b.temporal, b.region, b.parameter, b.boost, b.floor
            );
        }
        println!("    id: {}", record.id);
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, ParameterStats, ProfileTime, Provenance};
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::collections::BTreeMap;

    fn record(id: &str, date: Option<(i32, u32, u32)>, regions: &[&str], params: &[&str]) -> ProfileRecord {
        let mut stats = BTreeMap::new();
        for p in params {
            stats.insert(
                p.to_string(),
                ParameterStats {
                    min: 1.0,
                    max: 2.0,
                    mean: 1.5,
                    std: 0.5,
                    count: 2,
                    units: String::new(),
                },
            );
        }
        ProfileRecord {
            id: id.to_string(),
            coordinates: Coordinates::new(10.0, 70.0),
            grid_cell: None,
            timestamp: date
                .map(|(y, m, d)| ProfileTime::from_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())),
            region_tags: regions.iter().map(|r| r.to_string()).collect(),
            parameter_stats: stats,
            source: Provenance {
                kind: SourceKind::FtpExtracted,
                name: format!("{}.nc", id),
                is_real_data: true,
                content_hash: None,
                ingested_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            },
            platform_number: None,
            raw_variable_names: Vec::new(),
        }
    }

    fn ids(outcome: &SearchOutcome<'_>) -> Vec<String> {
        outcome.hits.iter().map(|h| h.record.id.clone()).collect()
    }

    #[test]
    fn region_and_month_filters_exclude_mismatches() {
        let records = vec![
            record("arabian", Some((2023, 3, 15)), &["Arabian Sea", "Indian Ocean"], &["TEMP"]),
            record("bengal", Some((2023, 6, 1)), &["Bay of Bengal", "Indian Ocean"], &["TEMP"]),
        ];
        let outcome = search(&records, "temperature in Arabian Sea March 2023", &SearchParams::default());
        assert_eq!(ids(&outcome), vec!["arabian"]);
        assert_eq!(outcome.hits[0].score, 10 + 6 + 5 + 3);

        let query = ParsedQuery::parse("temperature in Arabian Sea March 2023");
        let b = score_record(&records[1], &query, &ToleranceProfile::strict());
        assert_eq!(b.total(), 0);
        assert_eq!(b.excluded, Some(Exclusion::TemporalMiss));
    }

    #[test]
    fn closer_dates_score_higher() {
        let records = vec![
            record("seven", Some((2023, 3, 20)), &["Indian Ocean"], &["TEMP"]),
            record("three", Some((2023, 3, 12)), &["Indian Ocean"], &["TEMP"]),
        ];
        let outcome = search(&records, "15 march 2023", &SearchParams::default());
        assert_eq!(ids(&outcome), vec!["three", "seven"]);
        assert!(outcome.hits[0].score > outcome.hits[1].score);
        assert_eq!(outcome.hits[0].breakdown.temporal, 18);
        assert_eq!(outcome.hits[1].breakdown.temporal, 12);
    }

    #[test]
    fn date_score_is_monotonic_in_distance() {
        let query = ParsedQuery::parse("2023-03-15");
        for profile in [ToleranceProfile::strict(), ToleranceProfile::relaxed()] {
            let mut last = u32::MAX;
            for day in (1..=15).rev() {
                let r = record("r", Some((2023, 3, day)), &[], &[]);
                let score = score_record(&r, &query, &profile).total();
                assert!(score <= last, "day {} scored {} after {}", day, score, last);
                last = score;
            }
        }
    }

    #[test]
    fn empty_collection_returns_nothing() {
        let outcome = search(&[], "temperature 2023", &SearchParams::default());
        assert!(outcome.hits.is_empty());
        assert_eq!(outcome.empty_reason, Some(EmptyReason::EmptyCollection));
    }

    #[test]
    fn blank_query_returns_nothing() {
        let records = vec![record("a", None, &["Indian Ocean"], &["TEMP"])];
        let outcome = search(&records, "   ", &SearchParams::default());
        assert_eq!(outcome.empty_reason, Some(EmptyReason::BlankQuery));
    }

    #[test]
    fn relaxed_pass_runs_only_after_empty_strict_pass() {
        let records = vec![record("feb", Some((2023, 2, 25)), &["Indian Ocean"], &["TEMP"])];
        // 18 days off, different month: strict misses, relaxed nearby-month hits.
        let outcome = search(&records, "15 March 2023", &SearchParams::default());
        assert_eq!(outcome.phase, SearchPhase::Relaxed);
        assert_eq!(ids(&outcome), vec!["feb"]);
        assert_eq!(outcome.hits[0].breakdown.temporal, 4);

        let records = vec![
            record("feb", Some((2023, 2, 25)), &["Indian Ocean"], &["TEMP"]),
            record("mar", Some((2023, 3, 15)), &["Indian Ocean"], &["TEMP"]),
        ];
        let outcome = search(&records, "15 March 2023", &SearchParams::default());
        assert_eq!(outcome.phase, SearchPhase::Strict);
        assert_eq!(ids(&outcome), vec!["mar"]);
    }

    #[test]
    fn strict_day_tiers_stay_inside_the_month() {
        let records = vec![record("feb", Some((2023, 2, 27)), &["Indian Ocean"], &["TEMP"])];
        let query = ParsedQuery::parse("1 March 2023");
        let strict = score_record(&records[0], &query, &ToleranceProfile::strict());
        assert_eq!(strict.excluded, Some(Exclusion::TemporalMiss));

        let outcome = search(&records, "1 March 2023", &SearchParams::default());
        assert_eq!(outcome.phase, SearchPhase::Relaxed);
        assert_eq!(ids(&outcome), vec!["feb"]);
        assert_eq!(outcome.hits[0].breakdown.temporal, 15);
    }

    #[test]
    fn modal_may_does_not_filter_by_month() {
        let records = vec![record("jan", Some((2023, 1, 10)), &["Arabian Sea"], &["TEMP"])];
        let outcome = search(
            &records,
            "What may the temperature be in the Arabian Sea in 2023?",
            &SearchParams::default(),
        );
        assert_eq!(outcome.phase, SearchPhase::Strict);
        assert_eq!(ids(&outcome), vec!["jan"]);
    }

    #[test]
    fn relaxed_results_include_strict_results() {
        let records = vec![
            record("a", Some((2023, 3, 15)), &["Arabian Sea"], &["TEMP"]),
            record("b", Some((2023, 3, 9)), &["Arabian Sea"], &["PSAL"]),
            record("c", Some((2023, 4, 2)), &["Bay of Bengal"], &["TEMP"]),
            record("d", Some((2022, 3, 15)), &["Arabian Sea"], &[]),
            record("e", Some((2023, 3, 30)), &["Arabian Sea"], &["TEMP"]),
        ];
        for q in ["15 march 2023 arabian sea", "march 2023", "2023 temperature", "arabian sea"] {
            let query = ParsedQuery::parse(q);
            let strict: Vec<usize> = rank(&records, &query, &ToleranceProfile::strict(), 100)
                .iter()
                .map(|h| h.position)
                .collect();
            let relaxed: Vec<usize> = rank(&records, &query, &ToleranceProfile::relaxed(), 100)
                .iter()
                .map(|h| h.position)
                .collect();
            for p in strict {
                assert!(relaxed.contains(&p), "query {:?} lost record {}", q, p);
            }
        }
    }

    #[test]
    fn ties_keep_collection_order_and_limit_applies() {
        let records: Vec<ProfileRecord> = (0..20)
            .map(|i| record(&format!("r{:02}", i), Some((2021, 5, 1)), &["Indian Ocean"], &["PSAL"]))
            .collect();
        let outcome = search(&records, "salinity 2021", &SearchParams::default());
        assert_eq!(outcome.hits.len(), 15);
        let positions: Vec<usize> = outcome.hits.iter().map(|h| h.position).collect();
        assert_eq!(positions, (0..15).collect::<Vec<_>>());
    }

    #[test]
    fn floor_applies_only_to_unfiltered_queries_with_temperature() {
        let records = vec![
            record("temp", None, &["Indian Ocean"], &["TEMP"]),
            record("psal", None, &["Indian Ocean"], &["PSAL"]),
        ];
        let outcome = search(&records, "how is the ocean doing", &SearchParams::default());
        assert_eq!(ids(&outcome), vec!["temp"]);
        assert_eq!(outcome.hits[0].breakdown.floor, 1);

        let outcome = search(&records, "anything from 1999", &SearchParams::default());
        assert!(outcome.hits.is_empty());
        assert_eq!(outcome.empty_reason, Some(EmptyReason::NothingMatched));
    }

    #[test]
    fn no_filters_reason_when_nothing_scores() {
        let records = vec![record("psal", None, &["Indian Ocean"], &["PSAL"])];
        let outcome = search(&records, "how is the ocean doing", &SearchParams::default());
        assert_eq!(outcome.empty_reason, Some(EmptyReason::NoFilters));
    }

    #[test]
    fn generic_query_boosts_uploaded_records() {
        let mut uploaded = record("up", None, &["Indian Ocean"], &["PSAL"]);
        uploaded.source.kind = SourceKind::Uploaded;
        let records = vec![record("ftp", None, &["Indian Ocean"], &["TEMP"]), uploaded];
        let outcome = search(&records, "give me a summary of this file", &SearchParams::default());
        assert_eq!(ids(&outcome), vec!["up", "ftp"]);
        assert_eq!(outcome.hits[0].breakdown.boost, 10);
    }

    #[test]
    fn region_tags_compare_with_underscores() {
        let records = vec![record("a", None, &["bay_of_bengal"], &[])];
        let outcome = search(&records, "Bay of Bengal", &SearchParams::default());
        assert_eq!(ids(&outcome), vec!["a"]);
        assert_eq!(outcome.hits[0].breakdown.region, 5);
    }

    #[test]
    fn undated_records_miss_temporal_queries() {
        let records = vec![record("a", None, &["Indian Ocean"], &["TEMP"])];
        let outcome = search(&records, "temperature 2023", &SearchParams::default());
        assert!(outcome.hits.is_empty());
    }

    #[test]
    fn month_distance_wraps_year_end() {
        let query = ParsedQuery::parse("january");
        let r = record("dec", Some((2022, 12, 20)), &[], &[]);
        assert_eq!(score_record(&r, &query, &ToleranceProfile::strict()).temporal, 3);
    }

    #[test]
    fn overrides_replace_only_named_fields() {
        let over = ToleranceOverrides {
            region_points: Some(9),
            ..Default::default()
        };
        let profile = over.apply(ToleranceProfile::strict());
        assert_eq!(profile.region_points, 9);
        assert_eq!(profile.exact_day_points, 25);
    }
}
