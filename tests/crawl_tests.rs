//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for both the crawled websites and the
//! embedding provider, and exercise the full crawl-and-rank cycle end-to-end.

use lantern::config::{Config, CrawlerConfig, EmbeddingConfig, UserAgentConfig};
use lantern::crawler::build_engine;
use lantern::embedding::EmbeddingClient;
use lantern::output::ranked_links;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing the embedding client at a mock server
fn create_test_config(embed_endpoint: &str) -> Config {
    Config {
        crawler: CrawlerConfig {
            request_delay_ms: 0, // No rate limiting in tests
            max_pages: 100,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
        },
        embedding: EmbeddingConfig {
            endpoint: embed_endpoint.to_string(),
            model: "embed-english-v3.0".to_string(),
            api_key_env: "LANTERN_TEST_UNSET_KEY".to_string(),
            api_key: Some("test-key".to_string()),
        },
    }
}

async fn create_engine(embed_server: &MockServer) -> lantern::CrawlEngine {
    let config = create_test_config(&format!("{}/v1/embed", embed_server.uri()));
    let embedder = EmbeddingClient::from_config(&config.embedding).expect("embedding client");
    build_engine(&config, embedder).expect("crawl engine")
}

/// Mounts a catch-all embed mock that returns the same vector for every text
async fn mount_uniform_embeddings(embed_server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "embeddings": [[1.0, 0.0]]
        })))
        .mount(embed_server)
        .await;
}

fn html_page(title: &str, body: &str) -> String {
    format!(
        r#"<html><head><title>{}</title><link rel="icon" href="/favicon.ico"></head><body>{}</body></html>"#,
        title, body
    )
}

#[tokio::test]
async fn test_single_page_end_to_end() {
    let pages = MockServer::start().await;
    let embeds = MockServer::start().await;
    mount_uniform_embeddings(&embeds).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(html_page("Seed Page", "no links here")),
        )
        .expect(1)
        .mount(&pages)
        .await;

    let engine = create_engine(&embeds).await;
    let result = engine.run(&format!("{}/", pages.uri()), "query", 3).await;

    assert_eq!(result.len(), 1);
    let record = &result.pages[0];
    assert_eq!(record.url, format!("{}/", pages.uri()));
    assert_eq!(record.title, Some("Seed Page".to_string()));
    assert_eq!(record.favicon, Some(format!("{}/favicon.ico", pages.uri())));
    assert!(record.similarity > 0.99);
}

#[tokio::test]
async fn test_budget_zero_performs_no_fetch() {
    let pages = MockServer::start().await;
    let embeds = MockServer::start().await;
    mount_uniform_embeddings(&embeds).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("Page", "text")))
        .expect(0)
        .mount(&pages)
        .await;

    let engine = create_engine(&embeds).await;
    let result = engine.run(&format!("{}/", pages.uri()), "query", 0).await;

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_fail_soft_on_fetch_failure() {
    let pages = MockServer::start().await;
    let embeds = MockServer::start().await;
    mount_uniform_embeddings(&embeds).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&pages)
        .await;

    let engine = create_engine(&embeds).await;
    let result = engine.run(&format!("{}/", pages.uri()), "query", 5).await;

    // The failing seed is skipped, not an error
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_fail_soft_on_embedding_failure() {
    let pages = MockServer::start().await;
    let embeds = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embed"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&embeds)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(html_page("Still Here", "some text")),
        )
        .mount(&pages)
        .await;

    let engine = create_engine(&embeds).await;
    let result = engine.run(&format!("{}/", pages.uri()), "query", 3).await;

    // The page is still recorded with zero relevance and intact metadata
    assert_eq!(result.len(), 1);
    assert_eq!(result.pages[0].similarity, 0.0);
    assert_eq!(result.pages[0].title, Some("Still Here".to_string()));
    assert_eq!(
        result.pages[0].favicon,
        Some(format!("{}/favicon.ico", pages.uri()))
    );
}

#[tokio::test]
async fn test_link_discovery_ranking_order() {
    let pages = MockServer::start().await;
    let embeds = MockServer::start().await;
    let base = pages.uri();

    // Query embeds to [1, 0]; page vectors give similarities
    // alpha = 0.707, bravo = 0.0, charlie = 1.0
    Mock::given(method("POST"))
        .and(path("/v1/embed"))
        .and(body_string_contains("search_query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "embeddings": [[1.0, 0.0]]
        })))
        .mount(&embeds)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/embed"))
        .and(body_string_contains("alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "embeddings": [[1.0, 1.0]]
        })))
        .mount(&embeds)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/embed"))
        .and(body_string_contains("bravo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "embeddings": [[0.0, 1.0]]
        })))
        .mount(&embeds)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/embed"))
        .and(body_string_contains("charlie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "embeddings": [[1.0, 0.0]]
        })))
        .mount(&embeds)
        .await;

    // Seed links to /b and /c with absolute hrefs
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page(
            "A",
            &format!(
                r#"alpha <a href="{base}/b">to b</a> <a href="{base}/c">to c</a>"#,
            ),
        )))
        .expect(1)
        .mount(&pages)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("B", "bravo")))
        .expect(1)
        .mount(&pages)
        .await;
    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("C", "charlie")))
        .expect(1)
        .mount(&pages)
        .await;

    let engine = create_engine(&embeds).await;
    let result = engine.run(&format!("{}/", base), "query", 3).await;

    assert_eq!(result.len(), 3);
    let titles: Vec<_> = result
        .pages
        .iter()
        .map(|r| r.title.clone().unwrap())
        .collect();
    assert_eq!(titles, vec!["C", "A", "B"]);

    // Similarities are monotonically non-increasing
    for pair in result.pages.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
}

#[tokio::test]
async fn test_cycle_is_not_revisited() {
    let pages = MockServer::start().await;
    let embeds = MockServer::start().await;
    mount_uniform_embeddings(&embeds).await;
    let base = pages.uri();

    // A and B link to each other; each must be fetched exactly once
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page(
            "A",
            &format!(r#"<a href="{base}/b">b</a> <a href="{base}/b">b again</a>"#),
        )))
        .expect(1)
        .mount(&pages)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page(
            "B",
            &format!(r#"<a href="{base}/a">back</a>"#),
        )))
        .expect(1)
        .mount(&pages)
        .await;

    let engine = create_engine(&embeds).await;
    let result = engine.run(&format!("{}/a", base), "query", 5).await;

    assert_eq!(result.len(), 2);
    // Mock expectations verify that neither page was fetched twice
}

#[tokio::test]
async fn test_budget_stops_discovery() {
    let pages = MockServer::start().await;
    let embeds = MockServer::start().await;
    mount_uniform_embeddings(&embeds).await;
    let base = pages.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page(
            "Seed",
            &format!(
                r#"<a href="{base}/b">b</a> <a href="{base}/c">c</a> <a href="{base}/d">d</a>"#,
            ),
        )))
        .expect(1)
        .mount(&pages)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("B", "b text")))
        .expect(1)
        .mount(&pages)
        .await;
    // Beyond the budget: never fetched
    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("C", "c text")))
        .expect(0)
        .mount(&pages)
        .await;
    Mock::given(method("GET"))
        .and(path("/d"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("D", "d text")))
        .expect(0)
        .mount(&pages)
        .await;

    let engine = create_engine(&embeds).await;
    let result = engine.run(&format!("{}/", base), "query", 2).await;

    assert_eq!(result.len(), 2);
}

#[tokio::test]
async fn test_relative_links_are_not_followed() {
    let pages = MockServer::start().await;
    let embeds = MockServer::start().await;
    mount_uniform_embeddings(&embeds).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page(
            "Seed",
            r#"<a href="/relative">relative link</a>"#,
        )))
        .expect(1)
        .mount(&pages)
        .await;
    Mock::given(method("GET"))
        .and(path("/relative"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("R", "r text")))
        .expect(0)
        .mount(&pages)
        .await;

    let engine = create_engine(&embeds).await;
    let result = engine.run(&format!("{}/", pages.uri()), "query", 5).await;

    // Only the seed: relative hrefs are dropped by the link filter
    assert_eq!(result.len(), 1);
}

#[tokio::test]
async fn test_ranked_output_sentinels() {
    let pages = MockServer::start().await;
    let embeds = MockServer::start().await;
    mount_uniform_embeddings(&embeds).await;

    // Page with neither title nor favicon
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>bare page</body></html>"),
        )
        .mount(&pages)
        .await;

    let engine = create_engine(&embeds).await;
    let result = engine.run(&format!("{}/", pages.uri()), "query", 1).await;
    let links = ranked_links(&result);

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].ico_src, "blank");
    assert_eq!(links[0].ptitle, "No title found");
}
