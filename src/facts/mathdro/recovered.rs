use crate::facts::numeric::format_coordinate;
use crate::facts::{Extraction, ParseError};
use crate::metrics::{Metric, Tags};
use serde::Deserialize;

/// One entry of the recovered-cases API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveredStat {
    #[serde(default)]
    pub province_state: Option<String>,

    pub country_region: String,

    #[serde(default)]
    pub recovered: u64,

    #[serde(default)]
    pub lat: Option<f64>,

    #[serde(default)]
    pub long: Option<f64>,
}

impl RecoveredStat {
    /// `cov19_world_recovered`, tagged with country and coordinates, plus the province when the
    /// entry is below country level.
    #[must_use]
    pub fn to_metric(&self) -> Metric {
        let mut tags = Tags::new()
            .with("country", self.country_region.as_str())
            .with("latitude", format_coordinate(self.lat.unwrap_or_default()))
            .with("longitude", format_coordinate(self.long.unwrap_or_default()));
        if let Some(province) = &self.province_state {
            tags.insert("province", province.as_str());
        }

        #[expect(clippy::cast_precision_loss, reason = "case counts are far below 2^52")]
        let value = self.recovered as f64;
        Metric::tagged("cov19_world_recovered", tags, value)
    }
}

/// The JSON array returned by the `recovered` endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecoveredList;

impl Extraction for RecoveredList {
    type Output = Vec<RecoveredStat>;

    fn extract(&self, document: &str) -> Result<Self::Output, ParseError> {
        Ok(serde_json::from_str(document)?)
    }
}
