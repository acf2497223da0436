use serde::{Deserialize, Serialize};

/// Longest timeout accepted without a warning, in seconds.
const MAX_REASONABLE_TIMEOUT_SECS: u64 = 120;

/// The social ministry's HTML pages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinistryConfig {
    pub enabled: bool,
    pub url: String,
    pub hospitalization_url: String,
    pub timeout_secs: u64,

    /// Fewer metrics than this make the source unhealthy.
    pub min_metrics: usize,
}

impl Default for MinistryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "https://www.sozialministerium.at/Informationen-zum-Coronavirus/Neuartiges-Coronavirus-(2019-nCov).html".into(),
            hospitalization_url: "https://www.sozialministerium.at/Informationen-zum-Coronavirus/Dashboard/Zahlen-zur-Hospitalisierung"
                .into(),
            timeout_secs: 3,
            min_metrics: 10,
        }
    }
}

/// The health ministry's JavaScript data endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthMinistryConfig {
    pub enabled: bool,

    /// Directory holding `Bezirke.js`, `Altersverteilung.js` and friends.
    pub url: String,
    pub timeout_secs: u64,
    pub min_districts: usize,

    /// Exact number of province metrics expected.
    pub province_metrics: usize,
    pub min_age_groups: usize,

    /// Exact number of sex categories expected.
    pub sex_groups: usize,
}

impl Default for HealthMinistryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "https://info.gesundheitsministerium.at/data".into(),
            timeout_secs: 5,
            min_districts: 10,
            province_metrics: 27,
            min_age_groups: 4,
            sex_groups: 2,
        }
    }
}

/// The health ministry's dashboard query endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrafanaConfig {
    pub enabled: bool,
    pub url: String,
    pub timeout_secs: u64,
    pub min_rows: usize,
}

impl Default for GrafanaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "https://info.gesundheitsministerium.at/api/tsdb/query".into(),
            timeout_secs: 5,
            min_rows: 10,
        }
    }
}

/// The ECDC world table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EcdcConfig {
    pub enabled: bool,
    pub url: String,
    pub timeout_secs: u64,
    pub min_metrics: usize,
}

impl Default for EcdcConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "https://www.ecdc.europa.eu/en/geographical-distribution-2019-ncov-cases".into(),
            timeout_secs: 3,
            min_metrics: 200,
        }
    }
}

/// The mathdro recovered-cases API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MathdroConfig {
    pub enabled: bool,

    /// API root; `recovered` is appended.
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for MathdroConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "https://covid19.mathdro.id/api/".into(),
            timeout_secs: 5,
        }
    }
}

/// Warnings about the connection settings shared by every source.
pub(super) fn validate_source(section: &str, enabled: bool, url: &str, timeout_secs: u64, warnings: &mut Vec<String>) {
    if !enabled {
        return;
    }

    if url.trim().is_empty() {
        warnings.push(format!("{section}: url is empty, the source will always fail"));
    } else if !url.starts_with("http://") && !url.starts_with("https://") {
        warnings.push(format!("{section}: url '{url}' is not an http(s) URL"));
    }

    if timeout_secs == 0 {
        warnings.push(format!("{section}: timeout_secs is 0, every request will time out"));
    } else if timeout_secs > MAX_REASONABLE_TIMEOUT_SECS {
        warnings.push(format!(
            "{section}: timeout_secs is {timeout_secs}, more than {MAX_REASONABLE_TIMEOUT_SECS} seconds will stall health checks"
        ));
    }
}
