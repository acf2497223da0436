use crate::facts::numeric::parse_count;
use crate::facts::{Extraction, ParseError};
use crate::metrics::Metric;
use regex::Regex;
use std::sync::LazyLock;

// The number must follow its label on the same line (tags and words in between are fine) and must
// not be followed by a parenthesis, so neither `Wien (3)` nor `3 (Wien)` of a per-province
// breakdown is mistaken for the total.
const NOT_A_BREAKDOWN: &str = r"\s*(?:[^\s0-9.(]|$)";

fn figure_regex(label: &str) -> Regex {
    Regex::new(&format!(r"{label}[^0-9(\n]*([0-9.]+){NOT_A_BREAKDOWN}")).expect("invalid regex")
}

static CONFIRMED_REGEX: LazyLock<Regex> = LazyLock::new(|| figure_regex("Fälle:"));
static TESTS_REGEX: LazyLock<Regex> = LazyLock::new(|| figure_regex("Testungen[^:<]*:"));
static HEALED_REGEX: LazyLock<Regex> = LazyLock::new(|| figure_regex("Genesene Personen:"));
static DEAD_REGEX: LazyLock<Regex> = LazyLock::new(|| figure_regex("Todesfälle:"));

/// National totals printed on the ministry page.
///
/// Every figure is optional; a figure the page no longer carries is simply not emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryFigures;

impl Extraction for SummaryFigures {
    type Output = Vec<Metric>;

    fn extract(&self, document: &str) -> Result<Self::Output, ParseError> {
        let figures = [
            ("cov19_confirmed", &*CONFIRMED_REGEX),
            ("cov19_tests", &*TESTS_REGEX),
            ("cov19_healed", &*HEALED_REGEX),
            ("cov19_dead", &*DEAD_REGEX),
        ];

        Ok(figures
            .into_iter()
            .filter_map(|(name, regex)| {
                let number = regex.captures(document)?.get(1)?;
                #[expect(clippy::cast_precision_loss, reason = "national totals are far below 2^52")]
                let value = parse_count(number.as_str()) as f64;
                Some(Metric::new(name, value))
            })
            .collect())
    }
}
