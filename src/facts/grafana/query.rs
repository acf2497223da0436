use crate::facts::{Extraction, ParseError, RawStat};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Start of the queried window, 2020-02-24 00:00 CET, in epoch milliseconds.
const WINDOW_START_MILLIS: i64 = 1_582_498_800_000;

const DISTRICT_SQL: &str = "select Bezirk, count(*) as Anzahl from GRAFANA_Covid_Faelle group by Bezirk order by Bezirk";

/// Body of a dashboard query request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    from: String,
    to: String,
    queries: Vec<Query>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct Query {
    ref_id: &'static str,
    interval_ms: u64,
    max_data_points: u32,
    datasource_id: u32,
    raw_sql: &'static str,
    format: &'static str,
}

impl QueryRequest {
    /// Case counts grouped by district, over everything reported up to `now`.
    #[must_use]
    pub fn districts(now: DateTime<Utc>) -> Self {
        Self {
            from: WINDOW_START_MILLIS.to_string(),
            to: now.timestamp_millis().to_string(),
            queries: vec![Query {
                ref_id: "A",
                interval_ms: 3_600_000,
                max_data_points: 512,
                datasource_id: 3,
                raw_sql: DISTRICT_SQL,
                format: "table",
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    results: QueryResults,
}

#[derive(Debug, Deserialize)]
struct QueryResults {
    #[serde(rename = "A")]
    a: QueryResult,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    tables: Vec<Table>,
}

#[derive(Debug, Deserialize)]
struct Table {
    rows: Vec<(String, f64)>,
}

/// Rows of `[district, count]` in the first table of result `A`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistrictRows;

impl Extraction for DistrictRows {
    type Output = Vec<RawStat>;

    fn extract(&self, document: &str) -> Result<Self::Output, ParseError> {
        let response: QueryResponse = serde_json::from_str(document)?;
        let table = response
            .results
            .a
            .tables
            .into_iter()
            .next()
            .ok_or_else(|| ParseError::Layout("query result has no tables".to_string()))?;

        table
            .rows
            .into_iter()
            .map(|(district, count)| {
                if !count.is_finite() || count < 0.0 {
                    return Err(ParseError::Layout(format!("invalid count {count} for district '{district}'")));
                }

                #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "checked to be a finite, non-negative count")]
                let infected = count as u64;
                Ok(RawStat::infected(district.trim(), infected))
            })
            .collect()
    }
}
