//! Integration tests for the paginated fetch loop, using wiremock in place of
//! the GitHub API.

use core::time::Duration;
use gha_report::config::Profile;
use gha_report::fetch::{BearerToken, Client, collect_runs};
use serde_json::json;
use std::time::Instant;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RUNS_PATH: &str = "/repos/octo/widgets/actions/runs";

fn profile_for(server: &MockServer, max_pages: u32) -> Profile {
    Profile {
        repo: "octo/widgets".to_string(),
        max_pages,
        page_size: 2,
        api_url: server.uri(),
    }
}

fn client_for(server: &MockServer) -> Client {
    Client::new(&BearerToken::new("test_token"), server.uri()).unwrap()
}

async fn mount_rate_limit(server: &MockServer, remaining: u64, reset: i64) {
    Mock::given(method("GET"))
        .and(path("/rate_limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rate": { "limit": 5000, "used": 1, "remaining": remaining, "reset": reset }
        })))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, page: u32, ids: &[u64]) {
    let runs: Vec<_> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "conclusion": "success",
                "run_started_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:01:00Z"
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path(RUNS_PATH))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": ids.len(),
            "workflow_runs": runs
        })))
        .mount(server)
        .await;
}

async fn page_requests(server: &MockServer) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() == RUNS_PATH)
        .collect()
}

#[tokio::test]
async fn test_fetches_all_pages_in_order() {
    let server = MockServer::start().await;
    mount_rate_limit(&server, 4999, 0).await;
    mount_page(&server, 1, &[1, 2]).await;
    mount_page(&server, 2, &[3, 4]).await;
    mount_page(&server, 3, &[5]).await;

    let client = client_for(&server);
    let profile = profile_for(&server, 3);

    let runs = collect_runs(&client, &profile, Duration::ZERO, |_, _| {}).await.unwrap();

    assert_eq!(runs.len(), 5);
    for (index, run) in runs.iter().enumerate() {
        assert_eq!(run.extra.get("id"), Some(&json!(index as u64 + 1)));
    }

    // Exactly one request per configured page.
    assert_eq!(page_requests(&server).await.len(), 3);
}

#[tokio::test]
async fn test_requests_carry_auth_and_accept_headers() {
    let server = MockServer::start().await;
    mount_rate_limit(&server, 4999, 0).await;

    // Only matches when both headers are present; otherwise the fetch fails.
    Mock::given(method("GET"))
        .and(path(RUNS_PATH))
        .and(header("authorization", "token test_token"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "workflow_runs": [] })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let profile = profile_for(&server, 1);

    let runs = collect_runs(&client, &profile, Duration::ZERO, |_, _| {}).await.unwrap();
    assert!(runs.is_empty());
}

#[tokio::test]
async fn test_http_failure_aborts_immediately() {
    let server = MockServer::start().await;
    mount_rate_limit(&server, 4999, 0).await;
    mount_page(&server, 1, &[1]).await;

    Mock::given(method("GET"))
        .and(path(RUNS_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let profile = profile_for(&server, 4);

    let err = collect_runs(&client, &profile, Duration::ZERO, |_, _| {}).await.unwrap_err();
    assert!(err.to_string().contains("HTTP"), "unexpected error: {err}");

    // Pages beyond the failing one are never requested.
    let requests = page_requests(&server).await;
    assert_eq!(requests.len(), 2);
    assert!(
        !requests
            .iter()
            .any(|r| r.url.query_pairs().any(|(k, v)| k == "page" && (v == "3" || v == "4")))
    );
}

#[tokio::test]
async fn test_empty_page_does_not_stop_the_loop() {
    let server = MockServer::start().await;
    mount_rate_limit(&server, 4999, 0).await;
    mount_page(&server, 1, &[]).await;
    mount_page(&server, 2, &[7, 8]).await;

    let client = client_for(&server);
    let profile = profile_for(&server, 2);

    let runs = collect_runs(&client, &profile, Duration::ZERO, |_, _| {}).await.unwrap();
    assert_eq!(runs.len(), 2);
    assert_eq!(page_requests(&server).await.len(), 2);
}

#[tokio::test]
async fn test_missing_runs_key_is_an_empty_page() {
    let server = MockServer::start().await;
    mount_rate_limit(&server, 4999, 0).await;

    Mock::given(method("GET"))
        .and(path(RUNS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total_count": 0 })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let profile = profile_for(&server, 2);

    let runs = collect_runs(&client, &profile, Duration::ZERO, |_, _| {}).await.unwrap();
    assert!(runs.is_empty());
    assert_eq!(page_requests(&server).await.len(), 2);
}

#[tokio::test]
async fn test_exhausted_rate_limit_delays_the_page_request() {
    let server = MockServer::start().await;

    // Remaining quota of zero with a reset already in the past: the loop must
    // still wait out the fixed clock-skew margin before requesting the page.
    mount_rate_limit(&server, 0, chrono::Utc::now().timestamp() - 10).await;
    mount_page(&server, 1, &[1]).await;

    let client = client_for(&server);
    let profile = profile_for(&server, 1);

    let start = Instant::now();
    let runs = collect_runs(&client, &profile, Duration::ZERO, |_, _| {}).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(runs.len(), 1);
    assert!(elapsed >= Duration::from_millis(4900), "page was requested after only {elapsed:?}");
}

#[tokio::test]
async fn test_available_quota_does_not_delay() {
    let server = MockServer::start().await;
    mount_rate_limit(&server, 1, 0).await;
    mount_page(&server, 1, &[1]).await;

    let client = client_for(&server);
    let profile = profile_for(&server, 1);

    let start = Instant::now();
    let runs = collect_runs(&client, &profile, Duration::ZERO, |_, _| {}).await.unwrap();

    assert_eq!(runs.len(), 1);
    assert!(start.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_page_observer_sees_every_page() {
    let server = MockServer::start().await;
    mount_rate_limit(&server, 4999, 0).await;
    mount_page(&server, 1, &[1, 2]).await;
    mount_page(&server, 2, &[]).await;

    let client = client_for(&server);
    let profile = profile_for(&server, 2);

    let mut observed = Vec::new();
    let _ = collect_runs(&client, &profile, Duration::ZERO, |page, count| observed.push((page, count)))
        .await
        .unwrap();

    assert_eq!(observed, vec![(1, 2), (2, 0)]);
}
