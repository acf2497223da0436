//! Configuration loading, saving and validation.
//!
//! A configuration names the metadata files, and for every source whether it is enabled, where
//! it lives, how long to wait for it, and the thresholds its health check applies. Any missing
//! field takes its default from the embedded `default_config.yml`.

mod sources;

use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

pub use sources::{EcdcConfig, GrafanaConfig, HealthMinistryConfig, MathdroConfig, MinistryConfig};

/// The default configuration YAML content, embedded from `default_config.yml`
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../default_config.yml");

/// Base name of the configuration files looked up when no path is given.
const CONFIG_FILE_STEM: &str = "cov19";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// CSV of provinces and countries: `name,population,latitude,longitude`.
    #[serde(default = "default_metadata_path")]
    pub metadata_path: Utf8PathBuf,

    /// CSV of Austrian districts, same layout.
    #[serde(default = "default_districts_path")]
    pub districts_path: Utf8PathBuf,

    #[serde(default)]
    pub ministry: MinistryConfig,

    #[serde(default)]
    pub health_ministry: HealthMinistryConfig,

    #[serde(default)]
    pub grafana: GrafanaConfig,

    #[serde(default)]
    pub ecdc: EcdcConfig,

    #[serde(default)]
    pub mathdro: MathdroConfig,
}

fn default_metadata_path() -> Utf8PathBuf {
    Utf8PathBuf::from("data/metadata.csv")
}

fn default_districts_path() -> Utf8PathBuf {
    Utf8PathBuf::from("data/bezirke.csv")
}

impl Config {
    /// Load the configuration from `config_path`, or from the first `cov19.{toml,yml,yaml,json}`
    /// found in `base_dir`, or fall back to the defaults.
    ///
    /// Returns the configuration together with any validation warnings.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let candidates = ["toml", "yml", "yaml", "json"].map(|ext| base_dir.join(format!("{CONFIG_FILE_STEM}.{ext}")));

            let mut found = None;
            for path in &candidates {
                match fs::read_to_string(path) {
                    Ok(text) => {
                        found = Some((path.clone(), text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration from {path}")),
                }
            }

            let Some(result) = found else {
                let config = Self::default();
                let mut warnings = Vec::new();
                config.validate(&mut warnings);
                return Ok((config, warnings));
            };
            result
        };

        let extension = final_path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML configuration from {final_path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML configuration from {final_path}"))?,
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON configuration from {final_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        Ok((config, warnings))
    }

    /// Write the configuration in the format implied by the file extension.
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => toml::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to TOML for saving to {output_path}"))?,
            "yml" | "yaml" => serde_yaml::to_string(self)
                .into_app_err_with(|| format!("serializing configuration to YAML for saving to {output_path}"))?,
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))?;
        Ok(())
    }

    /// Write the embedded defaults verbatim, keeping their comments, when the target is YAML.
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        match output_path.extension() {
            Some("yml" | "yaml") => {
                fs::write(output_path, DEFAULT_CONFIG_YAML).into_app_err_with(|| format!("writing default configuration to {output_path}"))
            }
            _ => Self::default().save(output_path),
        }
    }

    /// Whether any source is enabled at all.
    #[must_use]
    pub const fn any_source_enabled(&self) -> bool {
        self.ministry.enabled || self.health_ministry.enabled || self.grafana.enabled || self.ecdc.enabled || self.mathdro.enabled
    }

    fn validate(&self, warnings: &mut Vec<String>) {
        if self.metadata_path.as_str().is_empty() {
            warnings.push("metadata_path is empty, no province or country will be enriched".to_string());
        }

        if self.districts_path.as_str().is_empty() {
            warnings.push("districts_path is empty, no district will be enriched".to_string());
        }

        let m = &self.ministry;
        sources::validate_source("ministry", m.enabled, &m.url, m.timeout_secs, warnings);
        if m.enabled && m.hospitalization_url.trim().is_empty() {
            warnings.push("ministry: hospitalization_url is empty, hospital figures will always fail".to_string());
        }

        let h = &self.health_ministry;
        sources::validate_source("health_ministry", h.enabled, &h.url, h.timeout_secs, warnings);

        let g = &self.grafana;
        sources::validate_source("grafana", g.enabled, &g.url, g.timeout_secs, warnings);

        let e = &self.ecdc;
        sources::validate_source("ecdc", e.enabled, &e.url, e.timeout_secs, warnings);

        let d = &self.mathdro;
        sources::validate_source("mathdro", d.enabled, &d.url, d.timeout_secs, warnings);

        if !self.any_source_enabled() {
            warnings.push("every source is disabled, there is nothing to export".to_string());
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        serde_yaml::from_str(DEFAULT_CONFIG_YAML).expect("default_config.yml should be valid YAML that deserializes to Config")
    }
}
