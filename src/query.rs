//! Free-text query parsing.
//!
//! Pulls the filter criteria the relevance scorer understands out of a
//! natural-language question:
//!
//! - a specific calendar date (`2023-03-15`, `15 March 2023`, `March 15th, 2023`);
//! - otherwise, standalone years (`2023`) and full month names (`march`);
//! - region phrases (see [`crate::regions`]);
//! - parameter words (see [`crate::parameters`]);
//! - generic "tell me about this file" markers.
//!
//! A date-shaped phrase that is not a real calendar date (`31 February 2023`)
//! is kept as a [`QueryNote`] and the query falls back to year/month rules.

use chrono::NaiveDate;
use serde::Serialize;

use crate::parameters::{Parameter, PARAMETERS};
use crate::regions;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const GENERIC_MARKERS: &[&str] = &[
    "summary",
    "overview",
    "tell me about",
    "show me",
    "uploaded",
    "this file",
    "analyze",
];

/// Temporal criteria found in a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalFilter {
    None,
    /// A full day/month/year.
    Date(NaiveDate),
    /// Years and/or months without a specific day.
    YearMonth { years: Vec<i32>, months: Vec<u32> },
}

/// Informational notes about how a query was interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryNote {
    /// A date-like phrase could not be turned into a calendar date.
    UnparseableDate(String),
}

/// A query broken into scoring criteria.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedQuery {
    pub text: String,
    /// Lowercase, punctuation replaced by spaces, underscores as spaces,
    /// single-spaced.
    pub normalized: String,
    pub temporal: TemporalFilter,
    pub regions: Vec<&'static str>,
    pub parameters: Vec<Parameter>,
    pub generic: bool,
    pub notes: Vec<QueryNote>,
}

impl ParsedQuery {
    pub fn parse(text: &str) -> Self {
        let normalized = normalize(text);
        let tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();

        let mut notes = Vec::new();
        let date = find_date(&tokens, &mut notes);

        let temporal = match date {
            Some(d) => TemporalFilter::Date(d),
            None => {
                let years = find_years(&tokens);
                let months = find_months(&tokens);
                if years.is_empty() && months.is_empty() {
                    TemporalFilter::None
                } else {
                    TemporalFilter::YearMonth { years, months }
                }
            }
        };

        let padded = format!(" {} ", normalized);
        let generic = GENERIC_MARKERS
            .iter()
            .any(|m| padded.contains(&format!(" {} ", m)));

        Self {
            text: text.to_string(),
            regions: regions::regions_in_query(&normalized),
            parameters: find_parameters(&tokens),
            normalized,
            temporal,
            generic,
            notes,
        }
    }

    pub fn has_temporal(&self) -> bool {
        self.temporal != TemporalFilter::None
    }

    /// True when the query names any date, year, month, or region.
    pub fn has_filters(&self) -> bool {
        self.has_temporal() || !self.regions.is_empty()
    }
}

fn normalize(text: &str) -> String {
    let mapped: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn month_number(token: &str) -> Option<u32> {
    if let Some(i) = MONTHS.iter().position(|m| *m == token) {
        return Some(i as u32 + 1);
    }
    if token == "sept" {
        return Some(9);
    }
    if token.len() == 3 {
        return MONTHS
            .iter()
            .position(|m| m.starts_with(token))
            .map(|i| i as u32 + 1);
    }
    None
}

fn full_month_number(token: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| *m == token)
        .map(|i| i as u32 + 1)
}

/// A one- or two-digit day, with an optional ordinal suffix.
fn day_number(token: &str) -> Option<u32> {
    let digits = token
        .strip_suffix("st")
        .or_else(|| token.strip_suffix("nd"))
        .or_else(|| token.strip_suffix("rd"))
        .or_else(|| token.strip_suffix("th"))
        .unwrap_or(token);
    if digits.is_empty() || digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|d| *d >= 1)
}

fn year_number(token: &str) -> Option<i32> {
    if token.len() != 4 || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok().filter(|y| (1900..=2099).contains(y))
}

/// `YYYY-MM-DD`, returned as raw numbers so invalid dates can be reported.
fn iso_parts(token: &str) -> Option<(i32, u32, u32)> {
    let mut parts = token.split('-');
    let (y, m, d) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || y.len() != 4 || m.is_empty() || d.is_empty() {
        return None;
    }
    if m.len() > 2 || d.len() > 2 {
        return None;
    }
    Some((y.parse().ok()?, m.parse().ok()?, d.parse().ok()?))
}

fn find_date(tokens: &[&str], notes: &mut Vec<QueryNote>) -> Option<NaiveDate> {
    for token in tokens {
        if let Some((y, m, d)) = iso_parts(token) {
            match NaiveDate::from_ymd_opt(y, m, d) {
                Some(date) => return Some(date),
                None => notes.push(QueryNote::UnparseableDate(token.to_string())),
            }
        }
    }

    for window in tokens.windows(3) {
        let (a, b, c) = (window[0], window[1], window[2]);
        let year = match year_number(c) {
            Some(y) => y,
            None => continue,
        };
        let parts = match (day_number(a), month_number(b)) {
            (Some(d), Some(m)) => Some((d, m)),
            _ => match (month_number(a), day_number(b)) {
                (Some(m), Some(d)) => Some((d, m)),
                _ => None,
            },
        };
        if let Some((day, month)) = parts {
            match NaiveDate::from_ymd_opt(year, month, day) {
                Some(date) => return Some(date),
                None => notes.push(QueryNote::UnparseableDate(window.join(" "))),
            }
        }
    }

    None
}

fn find_years(tokens: &[&str]) -> Vec<i32> {
    let mut years = Vec::new();
    for token in tokens {
        let candidate = year_number(token).or_else(|| iso_parts(token).map(|(y, _, _)| y));
        if let Some(y) = candidate.filter(|y| (1900..=2099).contains(y)) {
            if !years.contains(&y) {
                years.push(y);
            }
        }
    }
    years
}

/// Month names that are also ordinary English words.
const AMBIGUOUS_MONTHS: &[&str] = &["may", "march"];

/// Words that introduce a month when they precede an ambiguous month name.
const MONTH_LEADS: &[&str] = &[
    "in", "during", "of", "from", "for", "since", "until", "till", "by", "before", "after",
    "between", "and", "to", "early", "mid", "late", "last", "next", "this",
];

/// An ambiguous month word counts only beside a day or year, or after a
/// lead word: "in may", "may 2023", but not "what may the ...".
fn is_month_context(tokens: &[&str], i: usize) -> bool {
    if !AMBIGUOUS_MONTHS.contains(&tokens[i]) {
        return true;
    }
    let prev = i.checked_sub(1).map(|j| tokens[j]);
    let next = tokens.get(i + 1).copied();
    let dated = |t: &str| year_number(t).is_some() || day_number(t).is_some();
    prev.map_or(false, |p| MONTH_LEADS.contains(&p) || dated(p)) || next.map_or(false, dated)
}

fn find_months(tokens: &[&str]) -> Vec<u32> {
    let mut months = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if let Some(m) = full_month_number(token).filter(|_| is_month_context(tokens, i)) {
            if !months.contains(&m) {
                months.push(m);
            }
        }
    }
    months
}

fn find_parameters(tokens: &[&str]) -> Vec<Parameter> {
    PARAMETERS
        .iter()
        .filter(|spec| spec.query_keywords.iter().any(|k| tokens.contains(k)))
        .map(|spec| spec.parameter)
        .collect()
}
