use crate::facts::html::body_rows;
use crate::facts::numeric::parse_count;
use crate::facts::{Extraction, ParseError, RawStat, country_display_name};

/// Cases of one country together with the continent it is listed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldStat {
    pub continent: String,
    pub stat: RawStat,
}

/// The international case table: continent, country, cases, deaths. The last row is the world
/// total and is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldTable;

impl Extraction for WorldTable {
    type Output = Vec<WorldStat>;

    fn extract(&self, document: &str) -> Result<Self::Output, ParseError> {
        let mut rows = body_rows(document);
        if rows.pop().is_none() {
            return Err(ParseError::NoMatches("case table rows"));
        }

        rows.iter().map(|row| world_stat(row)).collect()
    }
}

fn world_stat(row: &[String]) -> Result<WorldStat, ParseError> {
    let [continent, country, infected, deaths, ..] = row else {
        return Err(ParseError::Layout(format!(
            "expected at least 4 cells in a case table row, found {}",
            row.len()
        )));
    };

    Ok(WorldStat {
        continent: continent.clone(),
        stat: RawStat {
            infected: parse_count(infected),
            deaths: parse_count(deaths),
            ..RawStat::new(country_display_name(country))
        },
    })
}
