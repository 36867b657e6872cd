//! Integration tests for the `/submit` HTTP endpoint.
//!
//! These tests drive the full router with hand-built multipart bodies:
//! 1. Missing and malformed fields are rejected with 400
//! 2. `display` returns the ranked rows as JSON
//! 3. `email` stores the CSV and hands it to the mailer

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use topsis_ranker::adapters::http::{build_app, TopsisAppState};
use topsis_ranker::adapters::{InMemoryMailer, LocalResultStorage};
use topsis_ranker::application::{DeliverResultHandler, RankTableHandler};
use topsis_ranker::ports::ResultMailer;

// =============================================================================
// Test Infrastructure
// =============================================================================

const BOUNDARY: &str = "topsis-test-boundary";

const LAPTOPS: &str = "Model,CPU,RAM,Battery,Price\nA,7,9,9500,60\nB,8,7,10000,65\nC,9,9,9700,60\n";

/// One multipart part: (name, optional file name, content).
type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
            }
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

struct TestApp {
    router: Router,
    mailer: Arc<InMemoryMailer>,
    output_dir: TempDir,
}

fn app(with_mailer: bool) -> TestApp {
    let output_dir = TempDir::new().unwrap();
    let storage = Arc::new(LocalResultStorage::new(output_dir.path()));
    let mailer = Arc::new(InMemoryMailer::new());
    let configured: Option<Arc<dyn ResultMailer>> = if with_mailer {
        Some(mailer.clone() as Arc<dyn ResultMailer>)
    } else {
        None
    };

    let state = TopsisAppState::new(
        RankTableHandler::new(),
        DeliverResultHandler::new(storage, configured),
    );

    TestApp {
        router: build_app(state, 1024 * 1024, std::time::Duration::from_secs(10)),
        mailer,
        output_dir,
    }
}

async fn submit(router: Router, parts: &[Part<'_>]) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/submit")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn display_parts<'a>(weights: &'a str, impacts: &'a str) -> Vec<Part<'a>> {
    vec![
        ("file", Some("laptops.csv"), LAPTOPS.as_bytes()),
        ("weights", None, weights.as_bytes()),
        ("impacts", None, impacts.as_bytes()),
        ("result_option", None, "display".as_bytes()),
    ]
}

fn files_in(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path())
        .map(|entries| entries.count())
        .unwrap_or(0)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn health_returns_ok() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app(false).router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], "ok".as_bytes());
}

#[tokio::test]
async fn display_keeps_every_value_of_repeated_headers() {
    let csv = "Name,Price,Price,Rank\nA,5,1,3\nB,4,2,2\n";
    let parts: Vec<Part<'_>> = vec![
        ("file", Some("dupes.csv"), csv.as_bytes()),
        ("weights", None, "1,1,1".as_bytes()),
        ("impacts", None, "-,+,+".as_bytes()),
        ("result_option", None, "display".as_bytes()),
    ];

    let (status, json) = submit(app(false).router, &parts).await;

    assert_eq!(status, StatusCode::OK);
    let columns: Vec<&str> = json["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();
    assert_eq!(
        columns,
        vec!["Name", "Price", "Price.1", "Rank.1", "Topsis Score", "Rank"]
    );

    let first = json["result"][0].as_object().unwrap();
    assert_eq!(first.len(), columns.len());
    assert_eq!(first["Price"], 5.0);
    assert_eq!(first["Price.1"], 1.0);
    assert_eq!(first["Rank.1"], 3.0);
}

#[tokio::test]
async fn display_returns_ranked_rows() {
    let (status, json) = submit(app(false).router, &display_parts("1,1,1,1", "+,+,+,-")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(
        json["columns"],
        serde_json::json!(["Model", "CPU", "RAM", "Battery", "Price", "Topsis Score", "Rank"])
    );
    assert_eq!(json["result"].as_array().unwrap().len(), 3);
    assert_eq!(json["result"][2]["Model"], "C");
    assert_eq!(json["result"][2]["Rank"], 1);
}

#[tokio::test]
async fn missing_fields_are_listed() {
    let parts: Vec<Part<'_>> = vec![("weights", None, "1,1".as_bytes())];
    let (status, json) = submit(app(false).router, &parts).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_code"], "MISSING_PARAMETERS");
    assert_eq!(
        json["message"],
        "Missing required parameters: impacts, result_option, file"
    );
}

#[tokio::test]
async fn invalid_weights_are_rejected() {
    let (status, json) = submit(app(false).router, &display_parts("1,,1,1", "+,+,+,-")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_code"], "EMPTY_TOKEN");
}

#[tokio::test]
async fn unsupported_upload_is_rejected() {
    let parts: Vec<Part<'_>> = vec![
        ("file", Some("laptops.pdf"), LAPTOPS.as_bytes()),
        ("weights", None, "1,1,1,1".as_bytes()),
        ("impacts", None, "+,+,+,-".as_bytes()),
        ("result_option", None, "display".as_bytes()),
    ];
    let (status, json) = submit(app(false).router, &parts).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_code"], "UNSUPPORTED_FORMAT");
}

#[tokio::test]
async fn unknown_result_option_is_rejected() {
    let mut parts = display_parts("1,1,1,1", "+,+,+,-");
    parts[3] = ("result_option", None, "fax".as_bytes());
    let (status, json) = submit(app(false).router, &parts).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn email_option_requires_valid_address() {
    let mut parts = display_parts("1,1,1,1", "+,+,+,-");
    parts[3] = ("result_option", None, "email".as_bytes());
    parts.push(("email", None, "not-an-email".as_bytes()));
    let (status, json) = submit(app(true).router, &parts).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].as_str().unwrap().contains("Invalid email format"));
}

#[tokio::test]
async fn email_option_stores_and_sends_result() {
    let test_app = app(true);
    let mut parts = display_parts("1,1,1,1", "+,+,+,-");
    parts[3] = ("result_option", None, "email".as_bytes());
    parts.push(("email", None, "user@example.com".as_bytes()));

    let (status, json) = submit(test_app.router.clone(), &parts).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(files_in(&test_app.output_dir), 1);

    let sent = test_app.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "user@example.com");
    assert_eq!(sent[0].attachment_name, "topsis_result.csv");
    assert!(String::from_utf8(sent[0].attachment.clone())
        .unwrap()
        .starts_with("Model,CPU,RAM,Battery,Price,Topsis Score,Rank"));
}

#[tokio::test]
async fn email_without_mailer_is_server_error() {
    let test_app = app(false);
    let mut parts = display_parts("1,1,1,1", "+,+,+,-");
    parts[3] = ("result_option", None, "email".as_bytes());
    parts.push(("email", None, "user@example.com".as_bytes()));

    let (status, json) = submit(test_app.router.clone(), &parts).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error_code"], "MAIL_NOT_CONFIGURED");
    assert_eq!(files_in(&test_app.output_dir), 1);
}
