use std::time::Duration;

use feed_core::{build_query_url, Article, FailureReason};
use feed_engine::{FetchError, FetchSettings, Fetcher, ReqwestFetcher};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ONE_ARTICLE: &str = r#"{"response":{"status":"ok","currentPage":1,"pages":4,"results":[{"webTitle":"A","webPublicationDate":"2020-01-01T00:00:00Z","webUrl":"http://x"}]}}"#;

/// wiremock serves plain http.
fn local_settings() -> FetchSettings {
    FetchSettings {
        https_only: false,
        ..FetchSettings::default()
    }
}

fn fetcher(settings: FetchSettings) -> ReqwestFetcher {
    ReqwestFetcher::new(settings).expect("client builds")
}

#[tokio::test]
async fn fetcher_parses_page_from_built_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "1"))
        .and(query_param("format", "json"))
        .and(query_param("api-key", "test"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ONE_ARTICLE, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let url = build_query_url(&format!("{}/search", server.uri()), None, 1, "test").unwrap();
    let page = fetcher(local_settings())
        .fetch(&url)
        .await
        .expect("fetch ok");

    assert_eq!(page.page_number, 1);
    assert_eq!(page.total_pages, Some(4));
    assert_eq!(
        page.articles,
        vec![Article::new("A", "2020-01-01T00:00:00Z", "http://x")]
    );
}

#[tokio::test]
async fn fetcher_sends_section_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("section", "sport"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"response":{"currentPage":2,"results":[]}}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let url =
        build_query_url(&format!("{}/search", server.uri()), Some("sport"), 2, "test").unwrap();
    let page = fetcher(local_settings()).fetch(&url).await.unwrap();

    assert!(page.is_empty());
    assert_eq!(page.page_number, 2);
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(ONE_ARTICLE))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let err = fetcher(local_settings())
        .fetch(&url)
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::HttpStatus(404));
    assert_eq!(err.reason(), FailureReason::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_treats_other_success_codes_as_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let err = fetcher(local_settings())
        .fetch(&server.uri())
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::HttpStatus(204));
}

#[tokio::test]
async fn fetcher_reports_malformed_bodies() {
    for body in ["", "not json", "{}"] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let err = fetcher(local_settings())
            .fetch(&server.uri())
            .await
            .unwrap_err();

        assert!(
            matches!(err, FetchError::MalformedResponse(_)),
            "body {body:?} gave {err:?}"
        );
        assert_eq!(err.reason(), FailureReason::MalformedResponse);
    }
}

#[tokio::test]
async fn fetcher_rejects_non_utf8_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfe, 0x7b]))
        .mount(&server)
        .await;

    let err = fetcher(local_settings())
        .fetch(&server.uri())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::MalformedResponse(_)));
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_string(ONE_ARTICLE),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..local_settings()
    };
    let url = format!("{}/slow", server.uri());
    let err = fetcher(settings).fetch(&url).await.unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {err:?}");
    assert_eq!(err.reason(), FailureReason::Network);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ONE_ARTICLE))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..local_settings()
    };
    let err = fetcher(settings).fetch(&server.uri()).await.unwrap_err();

    assert_eq!(
        err,
        FetchError::TooLarge {
            max_bytes: 10,
            actual: Some(ONE_ARTICLE.len() as u64)
        }
    );
}

#[tokio::test]
async fn fetcher_rejects_invalid_urls_without_network() {
    let fetcher = fetcher(local_settings());

    for url in ["", "not a url", "ftp://example.com/search"] {
        let err = fetcher.fetch(url).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)), "{url:?} gave {err:?}");
        assert_eq!(err.reason(), FailureReason::InvalidUrl);
    }
}

#[tokio::test]
async fn fetcher_reports_connection_refused_as_network_failure() {
    // Bind and drop a listener so the port is very likely closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let err = fetcher(local_settings())
        .fetch(&format!("http://127.0.0.1:{port}/search"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FetchError::NetworkFailure {
            timed_out: false,
            ..
        }
    ));
}

#[tokio::test]
async fn default_settings_refuse_plain_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ONE_ARTICLE))
        .expect(0)
        .mount(&server)
        .await;

    let url = build_query_url(&format!("{}/search", server.uri()), None, 1, "test").unwrap();
    let err = fetcher(FetchSettings::default())
        .fetch(&url)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::InvalidUrl(_)), "got {err:?}");
    assert_eq!(err.reason(), FailureReason::InvalidUrl);
}
