//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a small race index and its detail
//! pages, then check the yearly output file and the warning log.

use chrono::Local;
use race_harvest::config::{
    load_config, Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig,
};
use race_harvest::logging::{self, LogOptions};
use race_harvest::Harvester;
use std::path::Path;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DETAIL: &str = include_str!("../fixtures/race_detail.html");

/// Creates a test configuration for one year against `base_url`
fn create_test_config(base_url: &str, root: &Path) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
        },
        crawler: CrawlerConfig {
            start_year: 2022,
            end_year: 2022,
            request_delay_ms: 0,
            timeout_secs: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig {
            race_directory: root.join("race").to_string_lossy().into_owned(),
            log_directory: root.join("log").to_string_lossy().into_owned(),
        },
    }
}

/// Index page listing `ids` as detail links, optionally followed by `next`
fn index_page(base_url: &str, ids: &[&str], next: Option<&str>) -> String {
    let items: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<li><div><a href="{base_url}/race/list/">開催</a><a href="{base_url}/race/{id}/">レース</a></div></li>"#
            )
        })
        .collect();
    let next_item = match next {
        Some(href) => format!(r#"<li><a href="{href}">次へ</a></li>"#),
        None => "<li><span>次へ</span></li>".to_string(),
    };
    format!(
        r#"<html><body>
        <ul class="CommonList_01">{items}</ul>
        <ul class="Icon_SNS_S"><li><span>前へ</span></li>{next_item}</ul>
        </body></html>"#
    )
}

async fn mount_index(server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, id: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/race/{id}/")))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn read_races(config: &Config) -> Vec<serde_json::Value> {
    let text = std::fs::read_to_string(config.output.year_path(2022))
        .expect("Failed to read year file");
    serde_json::from_str(&text).expect("Year file is not a JSON array")
}

#[tokio::test]
async fn test_full_harvest_skips_broken_record() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&base_url, dir.path());

    let (subscriber, log_path) = logging::build(
        &LogOptions {
            directory: dir.path().join("log"),
            verbose: 0,
            quiet: true,
        },
        Local::now(),
    )
    .unwrap();
    let _guard = tracing::subscriber::set_default(subscriber);

    mount_index(
        &mock_server,
        "1",
        index_page(
            &base_url,
            &["202206050801", "202206050802", "202206050803"],
            Some("/?pid=race_list&page=2"),
        ),
    )
    .await;
    mount_index(
        &mock_server,
        "2",
        index_page(&base_url, &["202206050804", "202206050805"], None),
    )
    .await;

    for id in ["202206050801", "202206050802", "202206050804", "202206050805"] {
        mount_detail(
            &mock_server,
            id,
            ResponseTemplate::new(200).set_body_string(DETAIL),
        )
        .await;
    }
    mount_detail(
        &mock_server,
        "202206050803",
        ResponseTemplate::new(200).set_body_string("<html><body>メンテナンス中</body></html>"),
    )
    .await;

    let harvester = Harvester::new(config.clone()).unwrap();
    let stats = harvester.run().await.unwrap();

    let year = &stats.years[0];
    assert_eq!(year.written, 4);
    assert_eq!(year.failed, 1);
    assert_eq!(year.index_pages, 2);
    assert!(!year.index_failed);

    let races = read_races(&config);
    assert_eq!(races.len(), 4);
    assert_eq!(races[0]["race_name"], "有馬記念");
    assert_eq!(races[0]["race_id"], "202206050801");
    assert_eq!(races[3]["race_id"], "202206050805");

    let log = std::fs::read_to_string(log_path).unwrap();
    let warnings: Vec<&str> = log.lines().filter(|line| line.contains("WARN")).collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("2 failure"));
    assert!(warnings[0].contains("/race/202206050803/"));
}

#[tokio::test]
async fn test_failed_detail_fetch_does_not_stop_harvest() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&base_url, dir.path());

    mount_index(
        &mock_server,
        "1",
        index_page(&base_url, &["202206050801", "202206050802"], None),
    )
    .await;
    mount_detail(&mock_server, "202206050801", ResponseTemplate::new(404)).await;
    mount_detail(
        &mock_server,
        "202206050802",
        ResponseTemplate::new(200).set_body_string(DETAIL),
    )
    .await;

    let harvester = Harvester::new(config.clone()).unwrap();
    let stats = harvester.run().await.unwrap();

    assert_eq!(stats.total_written(), 1);
    assert_eq!(stats.total_failed(), 1);

    let races = read_races(&config);
    assert_eq!(races.len(), 1);
    assert_eq!(races[0]["race_id"], "202206050802");
}

#[tokio::test]
async fn test_empty_index_writes_empty_array() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&base_url, dir.path());

    mount_index(&mock_server, "1", index_page(&base_url, &[], None)).await;

    let harvester = Harvester::new(config.clone()).unwrap();
    let stats = harvester.run().await.unwrap();

    assert_eq!(stats.years[0].attempted(), 0);
    assert!(read_races(&config).is_empty());
}

#[test]
fn test_load_sample_config() {
    let config = load_config(Path::new("harvest.toml")).expect("Failed to load harvest.toml");

    assert_eq!(config.site.base_url, "https://db.sp.netkeiba.com");
    assert_eq!(config.crawler.years(), 2018..=2022);
    assert_eq!(config.crawler.request_delay_ms, 1000);
    assert_eq!(
        config.output.year_path(2020),
        Path::new("./race").join("2020.json")
    );
}
