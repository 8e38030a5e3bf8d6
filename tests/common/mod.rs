#![allow(dead_code)]

use std::time::Duration;

use activity_board::services::activities_api_service::HttpActivitiesApi;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CHESS_LISTING: &str = r#"{
    "Chess Club": {
        "description": "d",
        "schedule": "s",
        "max_participants": 2,
        "participants": ["a@x.com"]
    }
}"#;

/// Activities service answering `GET /activities` with `listing` verbatim.
pub async fn service_with_listing(listing: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing))
        .mount(&server)
        .await;
    server
}

pub fn api_for(server: &MockServer) -> HttpActivitiesApi {
    HttpActivitiesApi::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

/// Client for a port nothing listens on.
pub fn unreachable_api() -> HttpActivitiesApi {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    HttpActivitiesApi::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap()
}

pub async fn requests_with_method(server: &MockServer, verb: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == verb)
        .collect()
}
