//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small catalog site and run the full
//! crawl cycle end-to-end over real HTTP.

use catalog_harvest::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use catalog_harvest::crawler::Coordinator;
use catalog_harvest::normalize::clean_dataset;
use catalog_harvest::state::StopReason;
use catalog_harvest::storage::write_raw_dataset;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server, with no politeness delay
fn create_test_config(base_url: &str, max_pages: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            base_url: format!("{}/", base_url.trim_end_matches('/')),
            max_pages,
            politeness_delay_ms: 0,
            request_timeout_secs: 5,
            ..CrawlerConfig::default()
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
        },
        output: OutputConfig::default(),
    }
}

fn listing_page(items: &[(&str, &str, &str, &str)]) -> String {
    let mut html = String::from("<html><body><ol class=\"row\">");
    for (href, title, price, rating) in items {
        html.push_str(&format!(
            r#"<li><article class="product_pod">
                <p class="star-rating {rating}"><i class="icon-star"></i></p>
                <h3><a href="{href}" title="{title}">{title}</a></h3>
                <div class="product_price">
                    <p class="price_color">{price}</p>
                    <p class="instock availability"><i class="icon-ok"></i> In stock (22 available)</p>
                </div>
            </article></li>"#
        ));
    }
    html.push_str("</ol></body></html>");
    html
}

fn detail_page(category: &str, upc: &str, description: &str) -> String {
    format!(
        r#"<html><body>
        <ul class="breadcrumb">
            <li><a href="../../index.html">Home</a></li>
            <li><a href="../category/books_1/index.html">Books</a></li>
            <li><a href="../category/books/x/index.html">{category}</a></li>
            <li class="active">Item</li>
        </ul>
        <div id="product_description" class="sub-header"><h2>Product Description</h2></div>
        <p>{description}</p>
        <table class="table table-striped">
            <tr><th>UPC</th><td>{upc}</td></tr>
            <tr><th>Product Type</th><td>Books</td></tr>
        </table>
        </body></html>"#
    )
}

async fn mount_html(server: &MockServer, at: &str, body: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(expected_hits)
        .mount(server)
        .await;
}

/// Index with two items, page 2 with one, page 3 empty
async fn mount_fixture_site(server: &MockServer) {
    mount_html(
        server,
        "/index.html",
        listing_page(&[
            ("catalogue/a-light-in-the-attic_1000/index.html", "A Light in the Attic", "£51.77", "Three"),
            ("catalogue/tipping-the-velvet_999/index.html", "Tipping the Velvet", "£53.74", "One"),
        ]),
        1,
    )
    .await;
    mount_html(
        server,
        "/catalogue/page-2.html",
        listing_page(&[("sharp-objects_997/index.html", "Sharp Objects", "£47.82", "Four")]),
        1,
    )
    .await;
    mount_html(server, "/catalogue/page-3.html", listing_page(&[]), 1).await;

    mount_html(
        server,
        "/catalogue/a-light-in-the-attic_1000/index.html",
        detail_page("Poetry", "a897fe39b1053632", "It's hard to imagine a world without A Light in the Attic."),
        1,
    )
    .await;
    mount_html(
        server,
        "/catalogue/tipping-the-velvet_999/index.html",
        detail_page("Historical Fiction", "90fa61229261140a", "Erotic and absorbing."),
        1,
    )
    .await;
}

#[tokio::test]
async fn test_full_crawl_stops_at_empty_page() {
    let mock_server = MockServer::start().await;
    mount_fixture_site(&mock_server).await;
    mount_html(
        &mock_server,
        "/catalogue/sharp-objects_997/index.html",
        detail_page("Mystery", "e00eb4fd7b871a48", "WICKED above her hipbone"),
        1,
    )
    .await;

    let config = create_test_config(&mock_server.uri(), 50);
    let coordinator = Coordinator::from_config(&config).expect("coordinator");
    let report = coordinator.run().await;

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.stats.stop_reason, Some(StopReason::EmptyPage(3)));
    assert_eq!(report.stats.pages_visited(), 3);
    assert_eq!(report.stats.detail_failures, 0);

    let titles: Vec<_> = report.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["A Light in the Attic", "Tipping the Velvet", "Sharp Objects"]
    );

    let first = &report.records[0];
    assert_eq!(first.price, "£51.77");
    assert_eq!(first.availability, "In stock (22 available)");
    assert_eq!(first.rating, "Three");
    assert_eq!(first.category, "Poetry");
    assert_eq!(first.upc, "a897fe39b1053632");
    assert_eq!(first.product_type, "Books");
    assert_eq!(
        first.detail_url,
        format!(
            "{}/catalogue/a-light-in-the-attic_1000/index.html",
            mock_server.uri()
        )
    );

    // Links on catalog pages resolve relative to /catalogue/
    assert_eq!(
        report.records[2].detail_url,
        format!("{}/catalogue/sharp-objects_997/index.html", mock_server.uri())
    );
    assert_eq!(report.records[2].category, "Mystery");

    let requests = mock_server
        .received_requests()
        .await
        .expect("request recording is enabled");
    let listing_paths: Vec<_> = requests
        .iter()
        .map(|r| r.url.path().to_string())
        .filter(|p| p == "/index.html" || p.contains("/page-"))
        .collect();
    assert_eq!(
        listing_paths,
        vec!["/index.html", "/catalogue/page-2.html", "/catalogue/page-3.html"]
    );
    assert_eq!(requests.len(), 6);
}

#[tokio::test]
async fn test_crawl_pauses_between_requests() {
    let mock_server = MockServer::start().await;
    mount_fixture_site(&mock_server).await;
    mount_html(
        &mock_server,
        "/catalogue/sharp-objects_997/index.html",
        detail_page("Mystery", "e00eb4fd7b871a48", "WICKED above her hipbone"),
        1,
    )
    .await;

    let mut config = create_test_config(&mock_server.uri(), 50);
    config.crawler.politeness_delay_ms = 30;
    let coordinator = Coordinator::from_config(&config).expect("coordinator");

    let started = std::time::Instant::now();
    let report = coordinator.run().await;
    let elapsed = started.elapsed();

    assert_eq!(report.records.len(), 3);
    // Five pauses: one per detail fetch, one per non-final listing page
    assert!(
        elapsed >= std::time::Duration::from_millis(5 * 30),
        "elapsed {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_crawl_sends_configured_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/index.html"))
        .and(header(
            "user-agent",
            "TestBot/1.0 (+https://example.com/contact)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 5);
    let report = Coordinator::from_config(&config)
        .expect("coordinator")
        .run()
        .await;

    assert!(report.records.is_empty());
    assert_eq!(report.stats.stop_reason, Some(StopReason::EmptyPage(1)));
}

#[tokio::test]
async fn test_detail_server_error_degrades_record() {
    let mock_server = MockServer::start().await;
    mount_fixture_site(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/catalogue/sharp-objects_997/index.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 50);
    let report = Coordinator::from_config(&config)
        .expect("coordinator")
        .run()
        .await;

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.stats.detail_failures, 1);

    let degraded = &report.records[2];
    assert_eq!(degraded.title, "Sharp Objects");
    assert_eq!(degraded.price, "£47.82");
    assert_eq!(degraded.rating, "Four");
    assert_eq!(degraded.category, "");
    assert_eq!(degraded.upc, "");
    assert_eq!(degraded.description, "");
}

#[tokio::test]
async fn test_page_bound_limits_listing_requests() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/index.html",
        listing_page(&[("catalogue/only_1/index.html", "Only", "£10.00", "Five")]),
        1,
    )
    .await;
    mount_html(
        &mock_server,
        "/catalogue/only_1/index.html",
        detail_page("Travel", "upc-only", "Short."),
        1,
    )
    .await;
    mount_html(&mock_server, "/catalogue/page-2.html", listing_page(&[]), 0).await;

    let config = create_test_config(&mock_server.uri(), 1);
    let report = Coordinator::from_config(&config)
        .expect("coordinator")
        .run()
        .await;

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.stats.stop_reason, Some(StopReason::BoundReached));
}

#[tokio::test]
async fn test_crawl_then_clean_pipeline() {
    let mock_server = MockServer::start().await;
    mount_fixture_site(&mock_server).await;
    mount_html(
        &mock_server,
        "/catalogue/sharp-objects_997/index.html",
        detail_page("Mystery", "e00eb4fd7b871a48", "WICKED above her hipbone"),
        1,
    )
    .await;

    let dir = TempDir::new().expect("temp dir");
    let raw_path = dir.path().join("data").join("books.csv");
    let cleaned_path = dir.path().join("data").join("books_cleaned.csv");

    let config = create_test_config(&mock_server.uri(), 50);
    let report = Coordinator::from_config(&config)
        .expect("coordinator")
        .run()
        .await;
    write_raw_dataset(&raw_path, &report.records).expect("raw dataset written");

    let raw = fs::read_to_string(&raw_path).expect("raw file");
    let mut raw_lines = raw.lines();
    assert_eq!(
        raw_lines.next().unwrap(),
        "Title,Price,Availability,Rating,DetailURL,Category,UPC,Description,Product Type"
    );
    assert_eq!(raw.lines().count(), 4);

    let cleaned = clean_dataset(&raw_path, &cleaned_path).expect("clean succeeds");
    assert_eq!(cleaned.records.len(), 3);
    assert_eq!(cleaned.skipped_rows, 0);
    assert!(cleaned.missing_fields.is_empty());

    let first = &cleaned.records[0];
    assert_eq!(first.title, "A Light in the Attic");
    assert_eq!(first.price_numeric, 51.77);
    assert_eq!(first.stock_count, 22);
    assert_eq!(first.rating_text, "Three");
    assert_eq!(first.category, "Poetry");

    let prices: Vec<f64> = cleaned.records.iter().map(|r| r.price_numeric).collect();
    assert_eq!(prices, vec![51.77, 53.74, 47.82]);
}
