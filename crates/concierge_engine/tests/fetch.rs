use std::time::Duration;

use concierge_engine::{FailureKind, FetchSettings, ReqwestScriptFetcher, ScriptFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SCRIPT_BODY: &str = "window.daum = window.daum || {}; window.daum.Postcode = function () {};";

#[tokio::test]
async fn fetcher_returns_script_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/postcode.v2.js"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(SCRIPT_BODY, "application/javascript; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestScriptFetcher::new(FetchSettings::default());
    let url = format!("{}/postcode.v2.js", server.uri());

    let source = fetcher.fetch_script(&url).await.expect("fetch ok");
    assert_eq!(source.metadata.original_url, url);
    assert_eq!(source.metadata.final_url, source.metadata.original_url);
    assert_eq!(source.metadata.redirect_count, 0);
    assert!(source
        .metadata
        .content_type
        .unwrap()
        .starts_with("application/javascript"));
    assert_eq!(source.body, SCRIPT_BODY.as_bytes());
    assert_eq!(source.metadata.byte_len, SCRIPT_BODY.len() as u64);
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.js"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ReqwestScriptFetcher::new(FetchSettings::default());
    let url = format!("{}/missing.js", server.uri());

    let err = fetcher.fetch_script(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.js"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw("var x;", "text/javascript"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestScriptFetcher::new(settings);
    let url = format!("{}/slow.js", server.uri());

    let err = fetcher.fetch_script(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    let big = "a".repeat(1024);
    Mock::given(method("GET"))
        .and(path("/big.js"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(big, "text/javascript"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 512,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestScriptFetcher::new(settings);
    let url = format!("{}/big.js", server.uri());

    let err = fetcher.fetch_script(&url).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 512, .. }));
}

#[tokio::test]
async fn fetcher_rejects_non_script_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let fetcher = ReqwestScriptFetcher::new(FetchSettings::default());
    let url = format!("{}/page", server.uri());

    let err = fetcher.fetch_script(&url).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "text/html".to_string()
        }
    );
}

#[tokio::test]
async fn fetcher_rejects_invalid_url() {
    let fetcher = ReqwestScriptFetcher::new(FetchSettings::default());

    let err = fetcher.fetch_script("not a url").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
