//! Wire behaviour of the HTTP search client against a mock server.

use std::time::Duration;

use httpmock::prelude::*;
use insight_config::{ApiConfig, EndpointPaths};
use insight_contracts::{ApiError, SearchApi, SearchRequest};
use insight_core::HttpSearchApi;
use insight_model::{FilterState, Locale, Role, SearchMode, SearchState, TaxonomyKind};
use serde_json::json;
use url::Url;

fn client_for(server: &MockServer) -> HttpSearchApi {
    HttpSearchApi::new(ApiConfig {
        base_url: Url::parse(&server.base_url()).unwrap(),
        timeout: Duration::from_secs(5),
        locale: Locale::En,
        paths: EndpointPaths::default(),
    })
    .unwrap()
}

fn request(keyword: &str) -> SearchRequest {
    let search = SearchState {
        query: keyword.into(),
        current_page: 2,
        ..SearchState::default()
    };
    let filters = FilterState {
        country: Some(12),
        ..FilterState::default()
    };
    SearchRequest::new(&search, &filters, 30)
}

#[tokio::test]
async fn search_sends_filters_and_decodes_the_page() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/platform/search")
                .query_param("keyword", "solar")
                .query_param("search_type", "knowledge")
                .query_param("page", "2")
                .query_param("per_page", "30")
                .query_param("country", "12")
                .query_param("accuracy", "any")
                .header("accept", "application/json")
                .header("accept-language", "en");
            then.status(200).json_body(json!({
                "data": [{"id": 1, "title": "Solar atlas"}],
                "meta": {"current_page": 2, "last_page": 2, "total": 45}
            }));
        })
        .await;

    let response = client_for(&server).search(&request("solar")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.data.len(), 1);
    assert_eq!(response.total_items(), 45);
    assert_eq!(response.meta.total_pages(30), 2);
}

#[tokio::test]
async fn unprocessable_entity_maps_to_validation_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/platform/search");
            then.status(422).json_body(json!({
                "message": "The given data was invalid.",
                "errors": {"keyword": ["too short"], "page": ["invalid page"]}
            }));
        })
        .await;

    let err = client_for(&server).search(&request("ab")).await.unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(err.user_message(), Some("too short"));
}

#[tokio::test]
async fn unprocessable_entity_with_plain_body_keeps_the_text() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/platform/search");
            then.status(422).body("keyword is required");
        })
        .await;

    let err = client_for(&server).search(&request("")).await.unwrap_err();

    assert_eq!(err.user_message(), Some("keyword is required"));
}

#[tokio::test]
async fn server_errors_are_transient_and_carry_no_user_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/platform/search");
            then.status(503);
        })
        .await;

    let err = client_for(&server).search(&request("solar")).await.unwrap_err();

    match &err {
        ApiError::Status { status, message } => {
            assert_eq!(*status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_transient());
    assert_eq!(err.user_message(), None);
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/platform/search");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = client_for(&server).search(&request("solar")).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn statistics_share_the_filters() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/platform/search/statistics")
                .query_param("keyword", "solar")
                .query_param("country", "12");
            then.status(200).json_body(json!({
                "data": [{"type": "report", "count": 12}, {"type": "data", "count": 0}]
            }));
        })
        .await;

    let counts = client_for(&server)
        .statistics(&request("solar"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].category, "report");
    assert_eq!(counts[0].count, 12);
}

#[tokio::test]
async fn autocomplete_returns_keywords() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/platform/search/autocomplete")
                .query_param("keyword", "sol");
            then.status(200)
                .json_body(json!({"data": {"searchKeywords": ["solar", "solar panels"]}}));
        })
        .await;

    let keywords = client_for(&server).autocomplete("sol").await.unwrap();

    assert_eq!(keywords, vec!["solar", "solar panels"]);
}

#[tokio::test]
async fn taxonomy_requests_carry_the_requested_locale() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/platform/isic-codes/tree")
                .header("accept-language", "ar");
            then.status(200).json_body(json!({
                "data": [{
                    "key": 1,
                    "code": "A",
                    "names": {"primary": "Agriculture", "secondary": "الزراعة"},
                    "children": [
                        {"key": 2, "code": "A01", "names": {"primary": "Crop production"}}
                    ]
                }]
            }));
        })
        .await;

    let tree = client_for(&server)
        .fetch_taxonomy(TaxonomyKind::IsicCode, Locale::Ar)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].display_name(Locale::Ar), "الزراعة");
    assert_eq!(tree[0].children[0].code, "A01");
}

#[tokio::test]
async fn insighter_search_sends_the_role_facet() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/platform/search")
                .query_param("search_type", "insighter")
                .query_param("role", "company");
            then.status(200).json_body(json!({"data": [], "meta": {"total": 0}}));
        })
        .await;

    let search = SearchState {
        mode: SearchMode::Insighter,
        ..SearchState::default()
    };
    let filters = FilterState {
        role: Role::Company,
        category: Some("report".into()),
        ..FilterState::default()
    };
    let response = client_for(&server)
        .search(&SearchRequest::new(&search, &filters, 30))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.total_items(), 0);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let client = HttpSearchApi::new(ApiConfig {
        base_url: Url::parse("http://127.0.0.1:9").unwrap(),
        timeout: Duration::from_secs(2),
        locale: Locale::En,
        paths: EndpointPaths::default(),
    })
    .unwrap();

    let err = client.autocomplete("solar").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert!(err.is_transient());
}
