//! Lenient number parsing for scraped text.
//!
//! Scraped figures use `.` and `,` as thousands separators. A malformed field must not abort the
//! extraction of the fields around it, so everything here degrades to zero instead of failing.

/// Parse a grouped integer such as `"1.234"` or `"12,345"`; anything unparsable yields 0.
#[must_use]
pub fn parse_count(text: &str) -> u64 {
    let digits: String = text.trim().chars().filter(|c| *c != '.' && *c != ',').collect();
    digits.parse().unwrap_or(0)
}

/// Parse a plain decimal such as `"48.206351"`; anything unparsable yields 0.0.
#[must_use]
pub fn parse_float(text: &str) -> f64 {
    text.trim().parse().unwrap_or(0.0)
}

/// Format a coordinate the way tag values carry it (six decimals).
#[must_use]
pub fn format_coordinate(value: f64) -> String {
    format!("{value:.6}")
}

/// `infected / population`.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "case and population counts are far below 2^52")]
pub fn infection_rate(infected: u64, population: u64) -> f64 {
    infected as f64 / population as f64
}

/// Infections per 100,000 inhabitants.
#[must_use]
pub fn infected_per_100k(infected: u64, population: u64) -> f64 {
    infection_rate(infected, population) * 100_000.0
}

/// `deaths / infected`.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "case counts are far below 2^52")]
pub fn fatality_rate(infected: u64, deaths: u64) -> f64 {
    deaths as f64 / infected as f64
}
