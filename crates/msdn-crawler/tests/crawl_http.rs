//! End-to-end crawls against a mock catalog site.

use msdn_crawler::{CatalogClient, Crawler, HttpTransport};
use shared::{CatalogConfig, CrawlConfig, ScrapeMode};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROOT_PAGE: &str = r#"<html><body><ul class="menu">
<li><a href="javascript:void(0);" class="item" data-menuid="10">OS</a></li>
<li><a href="javascript:void(0);" class="item" data-menuid="20">Tools</a></li>
</ul></body></html>"#;

fn crawler(catalog: CatalogConfig, crawl: CrawlConfig) -> Crawler<HttpTransport> {
    let transport = HttpTransport::new(None).unwrap();
    let client = CatalogClient::new(transport, catalog, &crawl);
    Crawler::with_progress(client, Box::new(std::io::sink()))
}

async fn mount_root(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ROOT_PAGE))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_failed_category_keeps_siblings() {
    let server = MockServer::start().await;
    mount_root(&server).await;

    Mock::given(method("POST"))
        .and(path("/Category/Index"))
        .and(body_string("id=10"))
        .and(header("Origin", "https://msdn.itellyou.cn"))
        .and(header("Referer", "https://msdn.itellyou.cn/"))
        .and(header(
            "Content-Type",
            "application/x-www-form-urlencoded; charset=UTF-8",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"[{"Name":"Windows 10","Id":"a1"}]"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Error page for the second category: non-2xx, body is not JSON
    Mock::given(method("POST"))
        .and(path("/Category/Index"))
        .and(body_string("id=20"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>error</h1>"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/Category/GetLang"))
        .and(body_string("id=a1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"Status":true,"Result":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = crawler(CatalogConfig::with_base_url(&server.uri()), CrawlConfig::default())
        .run()
        .await
        .unwrap();

    assert_eq!(outcome.categories.len(), 2);
    assert_eq!(outcome.categories[0].name, "OS");
    assert_eq!(outcome.categories[0].items.len(), 1);
    assert_eq!(outcome.categories[0].items[0].name, "Windows 10");
    assert_eq!(outcome.categories[1].name, "Tools");
    assert!(outcome.categories[1].items.is_empty());

    let requests = server.received_requests().await.unwrap();
    let root_and_items = requests
        .iter()
        .filter(|r| r.url.path() == "/" || r.url.path() == "/Category/Index")
        .count();
    assert_eq!(root_and_items, 3);
    // One language lookup for the single item under OS
    assert_eq!(requests.len(), 4);
    assert_eq!(outcome.stats.requests, 4);
    assert_eq!(outcome.stats.failures, 1);
}

#[tokio::test]
async fn test_root_failure_makes_no_further_requests() {
    let server = MockServer::start().await;

    // Root points at a closed port; everything else at the mock server
    let mut catalog = CatalogConfig::with_base_url(&server.uri());
    catalog.root_url = "http://127.0.0.1:1/".to_string();

    let result = crawler(catalog, CrawlConfig::default()).run().await;

    assert!(result.is_err());
    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_full_depth_with_pattern_scrape() {
    let server = MockServer::start().await;
    mount_root(&server).await;

    Mock::given(method("POST"))
        .and(path("/Category/Index"))
        .and(body_string("id=10"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"[{"Name":"Windows 10","Id":"a1"}]"#),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/Category/Index"))
        .and(body_string("id=20"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/Category/GetLang"))
        .and(body_string("id=a1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"Status":true,"Result":[{"Lang":"English","Id":"en"}]}"#),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/Category/GetList"))
        .and(body_string("id=a1&lang=en&filter=true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"Status":true,"Result":[{"Name":"en_windows_10_x64.iso","Id":"e1","Post":"2018-05-01","URL":"u"}]}"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/Category/GetProduct"))
        .and(body_string("id=e1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"Status":true,"Result":{"FileName":"en_windows_10_x64.iso","SHA1":"0123ABCD","Size":"4.2GB","PostDateString":"2018-05-01","DownLoad":"ed2k://|file|en_windows_10_x64.iso|"}}"#,
        ))
        .mount(&server)
        .await;

    let crawl = CrawlConfig {
        scrape_mode: ScrapeMode::Pattern,
        ..Default::default()
    };
    let outcome = crawler(CatalogConfig::with_base_url(&server.uri()), crawl)
        .run()
        .await
        .unwrap();

    let entry = &outcome.categories[0].items[0].languages[0].entries[0];
    assert_eq!(entry.name, "en_windows_10_x64.iso");
    let detail = entry.detail.as_ref().unwrap();
    assert_eq!(detail.sha1, "0123ABCD");
    assert_eq!(detail.download_url, "ed2k://|file|en_windows_10_x64.iso|");

    assert!(outcome.categories[1].items.is_empty());
    assert_eq!(outcome.stats.failures, 0);
    assert_eq!(outcome.stats.requests, 6);
}

#[tokio::test]
async fn test_strict_status_drops_subtree() {
    let server = MockServer::start().await;
    mount_root(&server).await;

    Mock::given(method("POST"))
        .and(path("/Category/Index"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"[{"Name":"Windows 10","Id":"a1"}]"#),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/Category/GetLang"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"Status":false,"Result":[{"Lang":"English","Id":"en"}]}"#),
        )
        .mount(&server)
        .await;

    let crawl = CrawlConfig {
        reject_false_status: true,
        ..Default::default()
    };
    let outcome = crawler(CatalogConfig::with_base_url(&server.uri()), crawl)
        .run()
        .await
        .unwrap();

    for category in &outcome.categories {
        assert!(category.items[0].languages.is_empty());
    }
    assert_eq!(outcome.stats.false_statuses, 2);
    assert_eq!(outcome.stats.failures, 2);
    assert!(server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .all(|r| r.url.path() != "/Category/GetList"));
}
