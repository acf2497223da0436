//! Integration tests driving the command line through `run` with a capturing host

use camino::Utf8PathBuf;
use cov19_exporter::{Host, run};
use std::io::Write;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Default)]
struct CaptureHost {
    output: Vec<u8>,
    error: Vec<u8>,
    exit_code: Option<i32>,
}

impl CaptureHost {
    fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    fn error_text(&self) -> String {
        String::from_utf8_lossy(&self.error).into_owned()
    }
}

impl Host for CaptureHost {
    fn output(&mut self) -> impl Write {
        &mut self.output
    }

    fn error(&mut self) -> impl Write {
        &mut self.error
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

const PAGE: &str = "<p>Bestätigte Fälle: Wien (500), Tirol (300)</p>\n<p>Todesfälle: 2 (Wien)</p>\n<p>Bestätigte Fälle: <strong>812</strong></p>";
const HOSPITALS: &str = "<table><tbody><tr><td>Wien</td><td>40</td><td>9</td></tr><tr><td>Tirol</td><td>20</td><td>4</td></tr><tr><td>Gesamt</td><td>60</td><td>13</td></tr></tbody></table>";

async fn mount(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// A configuration with only the ministry and health ministry enabled, both pointed at `server`.
fn write_config(dir: &tempfile::TempDir, server: &MockServer) -> Utf8PathBuf {
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
    let metadata = root.join("metadata.csv");
    let districts = root.join("bezirke.csv");
    std::fs::write(&metadata, "Wien,1897491,48.206351,16.374817\nTirol,757852,47.253741,11.601487\n").unwrap();
    std::fs::write(&districts, "Landeck,44482,47.139722,10.565833\n").unwrap();

    let config = serde_json::json!({
        "metadata_path": metadata,
        "districts_path": districts,
        "ministry": {
            "url": format!("{}/ministry", server.uri()),
            "hospitalization_url": format!("{}/hospitals", server.uri()),
            "min_metrics": 5
        },
        "health_ministry": {"url": format!("{}/data", server.uri())},
        "ecdc": {"enabled": false},
        "mathdro": {"enabled": false}
    });

    let path = root.join("cov19.json");
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    path
}

async fn mount_sources(server: &MockServer) {
    mount(server, "/ministry", PAGE).await;
    mount(server, "/hospitals", HOSPITALS).await;
    mount(server, "/data/Bezirke.js", r#"var d = [{"label":"Landeck","y":180}];"#).await;
    mount(server, "/data/Bundesland.js", r#"var d = [{"label":"W","y":500},{"label":"T","y":300}];"#).await;
    mount(server, "/data/Altersverteilung.js", r#"var d = [{"label":"<5","y":3},{"label":"5-14","y":9}];"#).await;
    mount(server, "/data/Geschlechtsverteilung.js", r#"var d = [{"label":"weiblich","y":400},{"label":"männlich","y":412}];"#).await;
    mount(server, "/data/SimpleData.js", "var Erkrankungen = 812;").await;
}

/// The first exposition line of metric `name` whose tags contain `pair`.
fn metric_line<'a>(text: &'a str, name: &str, pair: &str) -> &'a str {
    let prefix = format!("{name}{{");
    let line = text.lines().find(|line| line.starts_with(&prefix) && line.contains(pair));
    assert!(line.is_some(), "no {name} line with {pair} in:\n{text}");
    line.unwrap_or_default()
}

async fn run_command(args: &[&str]) -> (CaptureHost, cov19_exporter::Result<()>) {
    let mut host = CaptureHost::default();
    let result = run(&mut host, std::iter::once("cov19-exporter").chain(args.iter().copied())).await;
    (host, result)
}

#[tokio::test]
async fn test_metrics_command() {
    let server = MockServer::start().await;
    mount_sources(&server).await;
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(&tmp, &server);

    let (host, result) = run_command(&["metrics", "--config", config.as_str()]).await;
    result.unwrap();

    let out = host.output_text();
    assert!(out.contains("cov19_confirmed 812.000000\n"), "{out}");

    let tirol = metric_line(&out, "cov19_detail", "province=\"Tirol\"");
    for pair in ["country=\"Austria\"", "latitude=\"47.253741\"", "longitude=\"11.601487\""] {
        assert!(tirol.contains(pair), "{tirol}");
    }
    assert!(tirol.ends_with("} 300.000000"), "{tirol}");

    let landeck = metric_line(&out, "cov19_bezirk_infected", "bezirk=\"Landeck\"");
    assert!(landeck.contains("country=\"Austria\""), "{landeck}");

    let male = metric_line(&out, "cov19_sex_distribution", "sex=\"männlich\"");
    assert!(male.contains("country=\"Austria\""), "{male}");
    assert!(male.ends_with("} 412.000000"), "{male}");
    assert_eq!(host.exit_code, None);
}

#[tokio::test]
async fn test_health_command_reports_threshold_violations() {
    let server = MockServer::start().await;
    mount_sources(&server).await;
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(&tmp, &server);

    let (host, result) = run_command(&["health", "--config", config.as_str(), "--color", "never"]).await;
    result.unwrap();

    // Two provinces, two age groups and one district fall short of the default thresholds.
    let out = host.output_text();
    assert!(out.starts_with("2 sources checked, unhealthy\n"), "{out}");
    assert!(out.contains("health ministry: unexpected number of province metrics: 6 (expected 27)"), "{out}");
    assert!(out.contains("health ministry: missing age distribution: 2 groups (expected at least 4)"), "{out}");
    assert!(out.contains("health ministry: not enough district results: 2 (expected at least 10)"), "{out}");
    assert!(!out.contains("ministry: missing ministry stats"), "{out}");
    assert_eq!(host.exit_code, Some(1));
}

#[tokio::test]
async fn test_api_views() {
    let server = MockServer::start().await;
    mount_sources(&server).await;
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(&tmp, &server);

    let (host, result) = run_command(&["api", "bundesland", "--config", config.as_str()]).await;
    result.unwrap();
    let provinces: serde_json::Value = serde_json::from_str(&host.output_text()).unwrap();
    assert_eq!(provinces[0]["Name"], "Wien");
    assert_eq!(provinces[0]["Dead"], 2);
    assert_eq!(provinces[0]["Hospitalized"], 40);
    assert_eq!(provinces[1]["IntensiveCare"], 4);
    assert_eq!(provinces[1]["Population"], 757_852);

    let (host, result) = run_command(&["api", "bezirk", "--config", config.as_str()]).await;
    result.unwrap();
    let districts: serde_json::Value = serde_json::from_str(&host.output_text()).unwrap();
    assert_eq!(districts[0]["Name"], "Landeck");
    assert_eq!(districts[0]["Population"], 44_482);

    let (host, result) = run_command(&["api", "total", "--config", config.as_str()]).await;
    result.unwrap();
    let total: serde_json::Value = serde_json::from_str(&host.output_text()).unwrap();
    assert_eq!(total["TotalInfected"], 812);
    assert_eq!(total["TotalDead"], 2);
    assert_eq!(total["TotalHospitalized"], 60);
    assert_eq!(total["TotalIntensiveCare"], 13);
    assert_eq!(total["AgeDistributionInfection"]["5-14"], 9);
}

#[tokio::test]
async fn test_init_then_validate() {
    let tmp = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::try_from(tmp.path().join("cov19.toml")).unwrap();

    let (host, result) = run_command(&["init", path.as_str()]).await;
    result.unwrap();
    assert_eq!(host.output_text(), format!("Generated default configuration file: {path}\n"));

    let (host, result) = run_command(&["validate", "--config", path.as_str()]).await;
    result.unwrap();
    assert!(host.output_text().starts_with("Configuration file is valid\n"));
    assert!(host.error_text().is_empty());
}

#[tokio::test]
async fn test_validate_rejects_bad_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::try_from(tmp.path().join("cov19.yml")).unwrap();
    std::fs::write(&path, "ecdc: [not, a, section]\n").unwrap();

    let (host, result) = run_command(&["validate", "--config", path.as_str()]).await;
    let _err = result.unwrap_err();
    assert!(host.error_text().starts_with("❌ Configuration validation failed"));
    assert_eq!(host.exit_code, Some(1));
}

#[tokio::test]
async fn test_api_needs_both_ministries() {
    let tmp = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::try_from(tmp.path().join("cov19.yml")).unwrap();
    std::fs::write(
        &path,
        "metadata_path: ''\ndistricts_path: ''\nministry:\n  enabled: false\n",
    )
    .unwrap();

    let (_host, result) = run_command(&["api", "total", "--config", path.as_str()]).await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("need both the ministry and the health_ministry"));
}
