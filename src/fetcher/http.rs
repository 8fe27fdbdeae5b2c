// src/fetcher/http.rs
// =============================================================================
// This module fetches a single page over HTTP.
//
// Key decisions:
// - We share one reqwest::Client across the whole crawl (connection pooling,
//   so revisiting the same host reuses sockets)
// - Only a literal 200 OK yields a body; everything else is a BadStatus
//   error - the crawler doesn't follow redirects semantically or try to
//   interpret other 2xx responses
// - Network-level failures (DNS, refused connection, timeout) are folded
//   into one Network variant carrying a human-readable detail
// - There are NO retries: a failed fetch simply ends that task
//
// Rust concepts:
// - thiserror: derives std::error::Error + Display for our enum
// - async/await: the request suspends the task, not the thread
// =============================================================================

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

// How a fetch can fail
//
// The two variants matter to nobody but the logs today, but classifying
// them at the source keeps the orchestrator's error handling honest
#[derive(Debug, Error)]
pub enum FetchError {
    /// Couldn't reach the server at all (DNS, connection refused, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// The server answered, but not with 200 OK
    #[error("HTTP status {0}")]
    BadStatus(u16),
}

// Builds the HTTP client shared by every task in a crawl
//
// Why 10 seconds? A page that takes longer than that is not worth holding
// one of our K concurrency slots for.
pub fn build_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent("keyword-scout/0.1.0")
        .build()
        .expect("Failed to create HTTP client")
}

// Fetches a web page and returns its body
//
// Parameters:
//   client: shared reqwest client (borrowed, we don't own it)
//   url: the URL to fetch - deliberately NOT validated here; an unparsable
//        URL surfaces as a Network error like any other unreachable address
//
// Returns: the body on 200 OK, a classified FetchError otherwise
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Network(describe_error(&e)))?;

    let status = response.status();
    if status.as_u16() != 200 {
        return Err(FetchError::BadStatus(status.as_u16()));
    }

    // Reading the body can also fail mid-stream (connection dropped)
    response
        .text()
        .await
        .map_err(|e| FetchError::Network(describe_error(&e)))
}

// Turns a reqwest error into a short human-readable detail string
//
// reqwest's Display output chains every underlying cause; for log lines we
// want the one word that matters first
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_ok_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>hi</html>"))
            .mount(&server)
            .await;

        let client = build_client();
        let body = fetch_page(&client, &format!("{}/page", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "<html>hi</html>");
    }

    #[tokio::test]
    async fn test_fetch_404_is_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_client();
        let err = fetch_page(&client, &format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::BadStatus(404)));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_network_error() {
        // Port 1 on localhost should refuse the connection
        let client = build_client();
        let err = fetch_page(&client, "http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[tokio::test]
    async fn test_non_200_success_codes_are_rejected() {
        // Only a literal 200 yields a body - even a 204 counts as BadStatus
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/empty"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = build_client();
        let err = fetch_page(&client, &format!("{}/empty", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::BadStatus(204)));
    }
}
