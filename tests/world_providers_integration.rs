//! Integration tests for the ECDC, mathdro and dashboard query providers against wiremock

use core::time::Duration;
use cov19_exporter::config::{EcdcConfig, GrafanaConfig, MathdroConfig};
use cov19_exporter::facts::{ExtractError, FetchError, MetadataRegistry, ecdc, grafana, mathdro};
use cov19_exporter::health::Exporter;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ECDC_PAGE: &str = include_str!("fixtures/ecdc.html");

const COUNTRIES: &str = "\
Austria,8858775,47.516231,14.550072
Italy,60359546,41.871940,12.567380
United_Kingdom,66647112,55.378051,-3.435973
China,1392730000,35.861660,104.195397
United_States_of_America,327167434,37.090240,-95.712891
Australia,25203200,-25.274398,133.775136
";

fn countries() -> Arc<MetadataRegistry> {
    Arc::new(MetadataRegistry::from_reader(COUNTRIES.as_bytes()).unwrap())
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn ecdc_provider(server: &MockServer, min_metrics: usize, metadata: Arc<MetadataRegistry>) -> ecdc::Provider {
    let config = EcdcConfig {
        url: format!("{}/cases", server.uri()),
        min_metrics,
        ..EcdcConfig::default()
    };
    ecdc::Provider::new(&config, metadata).unwrap()
}

#[tokio::test]
async fn test_ecdc_world_table() {
    let server = MockServer::start().await;
    mount_page(&server, "/cases", ECDC_PAGE).await;
    let provider = ecdc_provider(&server, 30, countries());

    let metrics = provider.metrics().await.unwrap();
    assert_eq!(metrics.len(), 6 * 5);
    assert!(metrics.tag_completeness(4, "country").is_empty());

    let infected = metrics.find_metric("cov19_world_infected", "country=United States of America").unwrap();
    assert!((infected.value - 13_677.0).abs() < f64::EPSILON);
    assert_eq!(infected.tag("continent"), Some("America"));

    metrics
        .check_metric("cov19_world_death", "country=Italy", |v| (v - 3405.0).abs() < f64::EPSILON)
        .unwrap();
    assert!(metrics.find_metric("cov19_world_infected", "country=Total").is_none());

    assert!(provider.health().await.is_empty());
}

#[tokio::test]
async fn test_ecdc_unresolved_countries() {
    let server = MockServer::start().await;
    mount_page(&server, "/cases", ECDC_PAGE).await;
    let metadata = Arc::new(MetadataRegistry::from_reader("Austria,8858775,47.516231,14.550072\n".as_bytes()).unwrap());
    let provider = ecdc_provider(&server, 200, metadata);

    let messages = provider.health().await;
    assert!(messages[0].starts_with("world stats are failing: found"), "{messages:?}");
    assert!(messages.contains(&"could not find location for country: China".to_string()));
    assert_eq!(
        messages.iter().filter(|m| m.starts_with("could not find location")).count(),
        5,
        "each unresolved country is reported once: {messages:?}"
    );
}

#[tokio::test]
async fn test_ecdc_without_table() {
    let server = MockServer::start().await;
    mount_page(&server, "/cases", "<html></html>").await;
    let provider = ecdc_provider(&server, 1, countries());

    let err = provider.metrics().await.unwrap_err();
    assert!(err.is_parse());
    assert_eq!(provider.health().await.len(), 1);
}

#[tokio::test]
async fn test_mathdro_recovered() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/api/recovered",
        r#"[
            {"provinceState":"Hubei","countryRegion":"China","lat":30.9756,"long":112.2707,"confirmed":67800,"recovered":56927,"deaths":3122},
            {"provinceState":null,"countryRegion":"Italy","lat":41.8719,"long":12.5674,"confirmed":41035,"recovered":4440,"deaths":3405}
        ]"#,
    )
    .await;

    let config = MathdroConfig {
        url: format!("{}/api/", server.uri()),
        ..MathdroConfig::default()
    };
    let provider = mathdro::Provider::new(&config).unwrap();

    let metrics = provider.metrics().await.unwrap();
    assert_eq!(metrics.len(), 2);

    let hubei = metrics.find_metric("cov19_world_recovered", "province=Hubei").unwrap();
    assert_eq!(hubei.tag("country"), Some("China"));
    assert_eq!(hubei.tag("latitude"), Some("30.975600"));
    assert!((hubei.value - 56_927.0).abs() < f64::EPSILON);

    let italy = metrics.find_metric("cov19_world_recovered", "country=Italy").unwrap();
    assert_eq!(italy.tag_count(), 3);

    assert!(provider.health().await.is_empty());
}

#[tokio::test]
async fn test_mathdro_slow_answer_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/recovered"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = MathdroConfig {
        url: format!("{}/api", server.uri()),
        timeout_secs: 1,
        ..MathdroConfig::default()
    };
    let provider = mathdro::Provider::new(&config).unwrap();

    let err = provider.recovered().await.unwrap_err();
    assert!(err.is_fetch());
    assert!(
        matches!(&err, ExtractError::Fetch(FetchError::Timeout { url }) if url.ends_with("/api/recovered")),
        "{err:?}"
    );

    let messages = provider.health().await;
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("timed out"), "{messages:?}");
}

#[tokio::test]
async fn test_mathdro_not_json() {
    let server = MockServer::start().await;
    mount_page(&server, "/api/recovered", "<html>maintenance</html>").await;

    let config = MathdroConfig {
        url: format!("{}/api", server.uri()),
        ..MathdroConfig::default()
    };
    let provider = mathdro::Provider::new(&config).unwrap();

    let err = provider.metrics().await.unwrap_err();
    assert!(err.is_parse());
    assert_eq!(provider.health().await.len(), 1);
}

fn grafana_provider(server: &MockServer) -> grafana::Provider {
    let config = GrafanaConfig {
        enabled: true,
        url: format!("{}/api/tsdb/query", server.uri()),
        min_rows: 2,
        ..GrafanaConfig::default()
    };
    let districts = "Graz(Stadt),289440,47.070714,15.439504\nLandeck,44482,47.139722,10.565833\n";
    grafana::Provider::new(&config, Arc::new(MetadataRegistry::from_reader(districts.as_bytes()).unwrap())).unwrap()
}

#[tokio::test]
async fn test_grafana_district_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tsdb/query"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(serde_json::json!({
            "from": "1582498800000",
            "queries": [{"refId": "A", "format": "table", "datasourceId": 3}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": {"A": {"refId": "A", "tables": [{
                "columns": [{"text": "Bezirk"}, {"text": "Anzahl"}],
                "rows": [["Graz(Stadt)", 48], ["Landeck", 180]]
            }]}}
        })))
        .mount(&server)
        .await;
    let provider = grafana_provider(&server);

    let metrics = provider.metrics().await.unwrap();
    assert_eq!(metrics.len(), 4);
    metrics
        .check_metric("cov19_bezirk_infected", "bezirk=Landeck", |v| (v - 180.0).abs() < f64::EPSILON)
        .unwrap();
    assert!(metrics.tag_completeness(4, "bezirk").is_empty());

    assert!(provider.health().await.is_empty());
}

#[tokio::test]
async fn test_grafana_html_answer_is_not_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tsdb/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>login</html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;
    let provider = grafana_provider(&server);

    let err = provider.metrics().await.unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("text/html"));
}

#[tokio::test]
async fn test_grafana_unexpected_rows() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tsdb/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": {"A": {"tables": [{"rows": [["Graz(Stadt)", "48"]]}]}}
        })))
        .mount(&server)
        .await;
    let provider = grafana_provider(&server);

    let messages = provider.health().await;
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("invalid JSON"), "{messages:?}");
}
