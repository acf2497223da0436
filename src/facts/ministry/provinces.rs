//! Per-province infections and deaths from the ministry page.
//!
//! The page prints one line listing confirmed cases as `Wien (40), Tirol (33), ...` and a
//! separate line listing deaths. The deaths line has been published both as `3 (Wien)` and as
//! `Wien (3)` over time. We try the number-first form and only fall back to the location-first
//! form when it finds nothing at all; the two are never mixed.
//!
//! TODO: revisit the deaths fallback once the page publishes a stable format; it should not grow
//! further variants.

use crate::facts::numeric::parse_count;
use crate::facts::{Extraction, ParseError, RawStats};
use regex::Regex;
use std::sync::LazyLock;

static CONFIRMED_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Bestätigte Fälle.*").expect("invalid regex"));
static DEATHS_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Todesfälle.*").expect("invalid regex"));

/// `LOCATION (NUMBER)`
static LOCATION_FIRST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<location>\S+) \((?P<number>[0-9.]+)\)").expect("invalid regex"));

/// `NUMBER (LOCATION)`
static NUMBER_FIRST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<number>[0-9.]+) \((?P<location>\S+)\)").expect("invalid regex"));

const CONFIRMED_FRAGMENT: &str = "Bestätigte Fälle";

/// Location key as printed: list-separator commas removed, whitespace trimmed.
fn location_key(text: &str) -> String {
    text.replace(',', "").trim().to_string()
}

/// All `(location, count)` pairs that `regex` finds in `line`.
fn pairs(regex: &Regex, line: &str) -> Vec<(String, u64)> {
    regex
        .captures_iter(line)
        .filter_map(|captures| {
            let location = captures.name("location")?;
            let number = captures.name("number")?;
            Some((location_key(location.as_str()), parse_count(number.as_str())))
        })
        .collect()
}

/// `(location, deaths)` pairs of a deaths line: number-first if that matches anything, else
/// location-first.
pub fn death_pairs(line: &str) -> Vec<(String, u64)> {
    let number_first = pairs(&NUMBER_FIRST_REGEX, line);
    if number_first.is_empty() {
        pairs(&LOCATION_FIRST_REGEX, line)
    } else {
        number_first
    }
}

/// Infections and deaths per province.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProvinceTable;

impl Extraction for ProvinceTable {
    type Output = RawStats;

    fn extract(&self, document: &str) -> Result<Self::Output, ParseError> {
        let mut confirmed_lines = CONFIRMED_LINE_REGEX.find_iter(document).peekable();
        if confirmed_lines.peek().is_none() {
            return Err(ParseError::MissingFragment(CONFIRMED_FRAGMENT));
        }

        // The national total shares the label; the first line carrying any pairs is the breakdown.
        let confirmed = confirmed_lines
            .map(|line| pairs(&LOCATION_FIRST_REGEX, line.as_str()))
            .find(|found| !found.is_empty())
            .ok_or(ParseError::NoMatches("confirmed cases"))?;

        let mut stats = RawStats::new();
        for (location, infected) in confirmed {
            stats.entry(&location).infected = infected;
        }

        if let Some(deaths_line) = DEATHS_LINE_REGEX.find(document) {
            for (location, deaths) in death_pairs(deaths_line.as_str()) {
                stats.entry(&location).deaths = deaths;
            }
        }

        Ok(stats)
    }
}
