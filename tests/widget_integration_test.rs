use anyhow::Result;
use httpmock::prelude::*;
use tempfile::TempDir;
use visitor_counter::{
    CountFetcher, CounterConfig, CounterError, CounterWidget, HtmlFileDisplay, MemoryDisplay,
};

fn widget_for(endpoint_url: String, display: MemoryDisplay) -> CounterWidget<CountFetcher, MemoryDisplay> {
    let config = CounterConfig::with_endpoint(endpoint_url);
    let fetcher = CountFetcher::new(&config).unwrap();
    CounterWidget::new(fetcher, display, "count")
}

#[tokio::test]
async fn test_successful_load_renders_count() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/prod");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!("7"));
    });

    let display = MemoryDisplay::new();
    let widget = widget_for(server.url("/prod"), display.clone());
    let count = widget.load().await?;

    api_mock.assert_hits(1);
    assert_eq!(count.display_text(), "7");
    assert_eq!(display.text_of("count").as_deref(), Some("7"));
    assert_eq!(display.write_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_bare_number_is_rendered() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/prod");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!(1024));
    });

    let display = MemoryDisplay::new();
    widget_for(server.url("/prod"), display.clone()).load().await?;

    assert_eq!(display.text_of("count").as_deref(), Some("1024"));
    Ok(())
}

#[tokio::test]
async fn test_http_error_status_is_typed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/prod");
        then.status(502).body("Bad Gateway");
    });

    let display = MemoryDisplay::with_element("count", "0");
    let err = widget_for(server.url("/prod"), display.clone())
        .load()
        .await
        .unwrap_err();

    assert!(matches!(err, CounterError::HttpStatus { status: 502 }));
    assert_eq!(display.text_of("count").as_deref(), Some("0"));
}

#[tokio::test]
async fn test_empty_and_non_json_bodies_are_decode_errors() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/empty");
        then.status(200);
    });
    server.mock(|when, then| {
        when.method(GET).path("/html");
        then.status(200)
            .header("content-type", "text/html")
            .body("<h1>hello</h1>");
    });

    for path in ["/empty", "/html"] {
        let display = MemoryDisplay::with_element("count", "0");
        let err = widget_for(server.url(path), display.clone())
            .load()
            .await
            .unwrap_err();

        assert!(matches!(err, CounterError::Decode { .. }), "{}: {:?}", path, err);
        assert_eq!(display.text_of("count").as_deref(), Some("0"));
        assert_eq!(display.write_count(), 0);
    }
}

#[tokio::test]
async fn test_two_loads_issue_two_requests() -> Result<()> {
    let server = MockServer::start();
    let display = MemoryDisplay::new();
    let widget = widget_for(server.url("/prod"), display.clone());

    let mut first = server.mock(|when, then| {
        when.method(GET).path("/prod");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!("7"));
    });
    widget.load().await?;
    first.assert_hits(1);
    first.delete();

    let second = server.mock(|when, then| {
        when.method(GET).path("/prod");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!("8"));
    });
    widget.load().await?;
    second.assert_hits(1);

    assert_eq!(display.text_of("count").as_deref(), Some("8"));
    assert_eq!(display.write_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_spawned_load_updates_html_page() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/prod");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!("314"));
    });

    let temp_dir = TempDir::new()?;
    let page = temp_dir.path().join("index.html");
    std::fs::write(
        &page,
        r#"<html><body><p>Views: <span id="count"></span></p></body></html>"#,
    )?;

    let config = CounterConfig::with_endpoint(server.url("/prod"));
    let widget = CounterWidget::new(
        CountFetcher::new(&config)?,
        HtmlFileDisplay::new(&page),
        "count",
    );

    widget.spawn().await??;

    let html = std::fs::read_to_string(&page)?;
    assert!(html.contains(r#"<span id="count">314</span>"#));
    Ok(())
}

#[tokio::test]
async fn test_missing_element_leaves_page_untouched() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/prod");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!("5"));
    });

    let temp_dir = TempDir::new()?;
    let page = temp_dir.path().join("index.html");
    let original = "<html><body><p>No counter here</p></body></html>";
    std::fs::write(&page, original)?;

    let config = CounterConfig::with_endpoint(server.url("/prod"));
    let widget = CounterWidget::new(CountFetcher::new(&config)?, HtmlFileDisplay::new(&page), "count");

    let err = widget.load().await.unwrap_err();
    assert!(matches!(err, CounterError::Display { .. }));
    assert_eq!(std::fs::read_to_string(&page)?, original);
    Ok(())
}
