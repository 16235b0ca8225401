//! Integration tests for the paginator.
//!
//! These tests drive POST- and GET-style searches against a mock instance
//! and check cursor handling, termination, filtering and progress.

use std::sync::Arc;

use futures::StreamExt;
use salesforce_ocapi::clients::{HttpError, HttpResponse};
use salesforce_ocapi::endpoints::shop::{OrderSearch, ProductSearch};
use salesforce_ocapi::endpoints::{
    CallArgs, Endpoint, EndpointBase, Operation, PaginatedEndpoint,
};
use salesforce_ocapi::{
    ClientId, ClientSecret, HttpClient, InstanceUrl, OcapiConfig, Paginator, PaginatorError,
    TokenProvider,
};
use serde_json::{json, Value};
use tokio_test::assert_ok;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORDER_SEARCH: &str = "/s/-/dw/shop/v20_4/order_search";
const PRODUCT_SEARCH: &str = "/s/-/dw/shop/v20_4/product_search";

async fn create_base(server: &MockServer) -> EndpointBase {
    Mock::given(method("POST"))
        .and(path("/dw/oauth2/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "expires_in": 1799,
            "token_type": "Bearer",
        })))
        .mount(server)
        .await;

    let config = OcapiConfig::builder()
        .client_id(ClientId::new("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").unwrap())
        .client_secret(ClientSecret::new("secret").unwrap())
        .instance(InstanceUrl::new(server.uri()).unwrap())
        .account_manager_host(InstanceUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    let provider = Arc::new(TokenProvider::new(config).unwrap());
    EndpointBase::new(HttpClient::new(provider).unwrap()).unwrap()
}

fn hits(ids: &[&str]) -> Vec<Value> {
    ids.iter()
        .map(|id| json!({"data": {"order_no": id, "status": "failed"}}))
        .collect()
}

async fn mount_post_page(server: &MockServer, start: u64, page: Value) {
    Mock::given(method("POST"))
        .and(path(ORDER_SEARCH))
        .and(body_partial_json(json!({ "start": start })))
        .respond_with(ResponseTemplate::new(200).set_body_json(page))
        .expect(1)
        .mount(server)
        .await;
}

/// Three pages of two hits chained by `next.start`
async fn mount_three_pages(server: &MockServer) {
    mount_post_page(
        server,
        0,
        json!({"hits": hits(&["1", "2"]), "total": 6, "count": 2, "next": {"start": 2}}),
    )
    .await;
    mount_post_page(
        server,
        2,
        json!({"hits": hits(&["3", "4"]), "total": 6, "count": 2, "next": {"start": 4}}),
    )
    .await;
    mount_post_page(
        server,
        4,
        json!({"hits": hits(&["5", "6"]), "total": 6, "count": 2}),
    )
    .await;
}

fn search_args() -> CallArgs {
    CallArgs::new().body(json!({
        "query": {"match_all_query": {}},
        "select": "(hits.(data.(order_no,status)))",
        "start": 0,
    }))
}

// ============================================================================
// Construction
// ============================================================================

/// An endpoint that exposes no resource
struct Unrouted {
    base: EndpointBase,
}

impl Endpoint for Unrouted {
    fn base(&self) -> &EndpointBase {
        &self.base
    }

    fn resource(&self) -> &str {
        ""
    }

    fn name(&self) -> &'static str {
        "Unrouted"
    }
}

impl PaginatedEndpoint for Unrouted {
    const OPERATIONS: &'static [Operation] = &[Operation::Search];

    async fn invoke(
        &self,
        _operation: Operation,
        _args: &CallArgs,
    ) -> Result<HttpResponse, HttpError> {
        unreachable!("never paged")
    }
}

#[tokio::test]
async fn test_endpoint_without_resource_is_rejected() {
    let server = MockServer::start().await;
    let endpoint = Unrouted {
        base: create_base(&server).await,
    };

    let error = Paginator::new(&endpoint, Operation::Search, CallArgs::new(), false).unwrap_err();
    assert!(matches!(error, PaginatorError::NotOcapiEndpoint { .. }));
    assert_eq!(error.to_string(), "Unrouted is not an OCAPI Endpoint object.");
}

#[tokio::test]
async fn test_unsupported_operation_is_rejected() {
    let server = MockServer::start().await;
    let order_search = OrderSearch::new(create_base(&server).await);

    let error = Paginator::new(
        &order_search,
        Operation::CustomerSearch,
        CallArgs::new(),
        false,
    )
    .unwrap_err();
    assert_eq!(
        error.to_string(),
        "OrderSearch has no method named \"CustomerSearch\""
    );

    let error = Paginator::by_name(&order_search, "get_order", CallArgs::new(), false).unwrap_err();
    assert!(matches!(
        error,
        PaginatorError::OcapiMethodNotFound { ref method, .. } if method == "get_order"
    ));

    assert_ok!(Paginator::by_name(
        &order_search,
        "Search",
        CallArgs::new(),
        false
    ));
}

#[tokio::test]
async fn test_select_is_normalized_and_count_overrides_body() {
    let server = MockServer::start().await;
    let order_search = OrderSearch::new(create_base(&server).await);

    Mock::given(method("POST"))
        .and(path(ORDER_SEARCH))
        .and(body_partial_json(json!({
            "select": "(hits.(data.(order_no)),total,next,count)",
            "count": 50,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": [], "total": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let args = CallArgs::new()
        .body(json!({"select": "(hits.(data.(order_no)),total,total)", "count": 25}))
        .param("count", "50");
    let mut paginator = Paginator::new(&order_search, Operation::Search, args, false).unwrap();

    assert_eq!(
        paginator.args().body.as_ref().unwrap()["select"],
        "(hits.(data.(order_no)),total,next,count)"
    );
    assert!(paginator.next_page().await.unwrap().is_some());
}

// ============================================================================
// Iteration
// ============================================================================

#[tokio::test]
async fn test_empty_first_page_is_yielded_once() {
    let server = MockServer::start().await;
    let order_search = OrderSearch::new(create_base(&server).await);

    // `total` and `next` are ignored when the first page has no hits
    mount_post_page(
        &server,
        0,
        json!({"hits": [], "total": 40, "next": {"start": 25}}),
    )
    .await;

    let mut paginator =
        Paginator::new(&order_search, Operation::Search, search_args(), false).unwrap();
    let pages: Vec<_> = paginator.pages().collect().await;

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].as_ref().unwrap()["total"], 40);
    assert!(paginator.is_done());
    assert!(paginator.progress().is_finished());
}

#[tokio::test]
async fn test_hits_follow_post_cursor_to_the_end() {
    let server = MockServer::start().await;
    let order_search = OrderSearch::new(create_base(&server).await);
    mount_three_pages(&server).await;

    let mut paginator =
        Paginator::new(&order_search, Operation::Search, search_args(), false).unwrap();
    let order_numbers: Vec<String> = paginator
        .hits()
        .map(|hit| hit.unwrap()["data"]["order_no"].as_str().unwrap().to_string())
        .collect()
        .await;

    assert_eq!(order_numbers, ["1", "2", "3", "4", "5", "6"]);

    let progress = paginator.progress();
    assert_eq!(progress.total(), Some(6));
    assert_eq!(progress.position(), 6);
    assert!(progress.is_finished());
}

#[tokio::test]
async fn test_pages_follow_post_cursor() {
    let server = MockServer::start().await;
    let order_search = OrderSearch::new(create_base(&server).await);
    mount_three_pages(&server).await;

    let mut paginator =
        Paginator::new(&order_search, Operation::Search, search_args(), false).unwrap();

    let mut count = 0;
    while let Some(page) = paginator.next_page().await.unwrap() {
        count += 1;
        assert_eq!(page["hits"].as_array().unwrap().len(), 2);
    }
    assert_eq!(count, 3);
    assert_eq!(paginator.args().body.as_ref().unwrap()["start"], 4);

    // Exhausted paginators stay exhausted
    assert!(paginator.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn test_intermediate_empty_page_stops_silently() {
    let server = MockServer::start().await;
    let order_search = OrderSearch::new(create_base(&server).await);

    mount_post_page(
        &server,
        0,
        json!({"hits": hits(&["1", "2"]), "total": 6, "next": {"start": 2}}),
    )
    .await;
    mount_post_page(&server, 2, json!({"hits": [], "total": 6, "next": {"start": 4}})).await;
    Mock::given(method("POST"))
        .and(path(ORDER_SEARCH))
        .and(body_partial_json(json!({"start": 4})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": hits(&["5"])})))
        .expect(0)
        .mount(&server)
        .await;

    let mut paginator =
        Paginator::new(&order_search, Operation::Search, search_args(), false).unwrap();
    let pages: Vec<_> = paginator.pages().collect().await;

    assert_eq!(pages.len(), 1);
}

#[tokio::test]
async fn test_error_page_ends_the_run() {
    let server = MockServer::start().await;
    let order_search = OrderSearch::new(create_base(&server).await);

    mount_post_page(
        &server,
        0,
        json!({"hits": hits(&["1"]), "total": 2, "next": {"start": 1}}),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(ORDER_SEARCH))
        .and(body_partial_json(json!({"start": 1})))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "fault": {"type": "InternalServerError", "message": "boom"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut paginator =
        Paginator::new(&order_search, Operation::Search, search_args(), false).unwrap();
    let pages: Vec<_> = paginator.pages().collect().await;

    assert_eq!(pages.len(), 2);
    assert!(pages[0].is_ok());
    match &pages[1] {
        Err(PaginatorError::Response(error)) => {
            assert_eq!(error.code, 500);
            assert_eq!(error.message, "boom");
        }
        other => panic!("Expected Response error, got: {other:?}"),
    }
    assert!(paginator.progress().is_finished());
}

#[tokio::test]
async fn test_empty_body_is_a_decode_error() {
    let server = MockServer::start().await;
    let order_search = OrderSearch::new(create_base(&server).await);

    Mock::given(method("POST"))
        .and(path(ORDER_SEARCH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut paginator =
        Paginator::new(&order_search, Operation::Search, search_args(), false).unwrap();
    let pages: Vec<_> = paginator.pages().collect().await;

    assert_eq!(pages.len(), 1);
    assert!(matches!(pages[0], Err(PaginatorError::Decode(_))));
    assert!(paginator.progress().is_finished());
}

#[tokio::test]
async fn test_get_cursor_replaces_query_parameters() {
    let server = MockServer::start().await;
    let product_search = ProductSearch::new(create_base(&server).await);

    let next = format!(
        "{}{PRODUCT_SEARCH}?q=red+shoes&start=2&count=2",
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH))
        .and(query_param("start", "0"))
        .and(query_param("refine", "c_color=red"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [{"product_id": "p1"}, {"product_id": "p2"}],
            "total": 3,
            "next": next,
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH))
        .and(query_param("start", "2"))
        .and(query_param("q", "red shoes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [{"product_id": "p3"}],
            "total": 3,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let args = CallArgs::new()
        .param("q", "red shoes")
        .param("refine", "c_color=red")
        .param("start", "0")
        .param("count", "2");
    let mut paginator = Paginator::new(&product_search, Operation::Search, args, false).unwrap();

    let mut ids = Vec::new();
    while let Some(hit) = paginator.next_hit().await.unwrap() {
        ids.push(hit["product_id"].as_str().unwrap().to_string());
    }

    assert_eq!(ids, ["p1", "p2", "p3"]);
    assert!(paginator.args().param_value("refine").is_none());
}

// ============================================================================
// Filtering and progress
// ============================================================================

#[tokio::test]
async fn test_search_applies_expression_per_page() {
    let server = MockServer::start().await;
    let order_search = OrderSearch::new(create_base(&server).await);
    mount_three_pages(&server).await;

    let mut paginator =
        Paginator::new(&order_search, Operation::Search, search_args(), false).unwrap();
    let results: Vec<Value> = paginator
        .search("hits[].data.order_no")
        .unwrap()
        .map(Result::unwrap)
        .collect()
        .await;

    assert_eq!(
        results,
        vec![json!(["1", "2"]), json!(["3", "4"]), json!(["5", "6"])]
    );
}

#[tokio::test]
async fn test_search_without_matches_yields_empty_results() {
    let server = MockServer::start().await;
    let order_search = OrderSearch::new(create_base(&server).await);

    mount_post_page(
        &server,
        0,
        json!({"hits": hits(&["1", "2", "3"]), "total": 5, "next": {"start": 3}}),
    )
    .await;
    mount_post_page(&server, 3, json!({"hits": hits(&["4", "5"]), "total": 5})).await;

    let mut paginator =
        Paginator::new(&order_search, Operation::Search, search_args(), false).unwrap();
    let results: Vec<_> = paginator
        .search("hits[?data.status == 'shipped'].data.order_no")
        .unwrap()
        .collect()
        .await;

    assert_eq!(results.len(), 2);
    for result in results {
        assert_eq!(result.unwrap(), json!([]));
    }
}

#[tokio::test]
async fn test_invalid_expression_is_rejected_before_any_call() {
    let server = MockServer::start().await;
    let order_search = OrderSearch::new(create_base(&server).await);

    let mut paginator =
        Paginator::new(&order_search, Operation::Search, search_args(), false).unwrap();
    let error = paginator.search("hits[?").err().unwrap();

    assert!(matches!(error, PaginatorError::Expression { .. }));
}

#[tokio::test]
async fn test_write_requires_visible_progress() {
    let server = MockServer::start().await;
    let order_search = OrderSearch::new(create_base(&server).await);

    let hidden = Paginator::new(&order_search, Operation::Search, search_args(), false).unwrap();
    assert!(matches!(
        hidden.write("processing"),
        Err(PaginatorError::ProgressHidden)
    ));

    let visible = Paginator::new(&order_search, Operation::Search, search_args(), true).unwrap();
    assert_ok!(visible.write("processing"));
    visible.progress().finish();
}

#[tokio::test]
async fn test_dropping_a_paginator_mid_run_finishes_progress() {
    let server = MockServer::start().await;
    let order_search = OrderSearch::new(create_base(&server).await);

    mount_post_page(
        &server,
        0,
        json!({"hits": hits(&["1", "2"]), "total": 6, "count": 2, "next": {"start": 2}}),
    )
    .await;

    let mut paginator =
        Paginator::new(&order_search, Operation::Search, search_args(), false).unwrap();
    assert!(paginator.next_page().await.unwrap().is_some());

    let progress = paginator.progress();
    assert_eq!(progress.position(), 2);
    assert!(!progress.is_finished());

    drop(paginator);
    assert!(progress.is_finished());
}
