#![allow(clippy::unwrap_used)]
// End-to-end page flows over HTTP: orchestrator → ApiClient → wiremock.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use networth_api::{ApiClient, TransportConfig};
use networth_core::{
    AssetId, CashHolding, CoreError, HttpOrchestrator, MessageKind, NetWorthSummary, StockHolding,
    http_orchestrator,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(&server.uri(), &TransportConfig::default(), None).unwrap();
    (server, client)
}

async fn mount_cash_schema(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/plugins/cash_holding/schema"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "cash_holding",
            "fields": [
                {"name": "institution_name", "type": "text", "required": true},
                {"name": "account_name", "type": "text", "required": true},
                {"name": "current_balance", "type": "currency", "required": true}
            ]
        })))
        .mount(server)
        .await;
}

// ── Flows ───────────────────────────────────────────────────────────

#[tokio::test]
async fn cash_holding_add_flow() {
    let (server, client) = setup().await;
    mount_cash_schema(&server).await;

    // First list call sees an empty backend; later calls see the new record.
    Mock::given(method("GET"))
        .and(path("/api/v1/cash-holdings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/cash-holdings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 11,
            "institution_name": "Credit Union",
            "account_name": "Emergency fund",
            "current_balance": "5000.00"
        }])))
        .mount(&server)
        .await;

    let payload = json!({
        "institution_name": "Credit Union",
        "account_name": "Emergency fund",
        "current_balance": 5000
    });
    Mock::given(method("POST"))
        .and(path("/api/v1/cash-holdings"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 11})))
        .expect(1)
        .mount(&server)
        .await;

    let page: HttpOrchestrator<CashHolding> =
        http_orchestrator(client, Duration::from_millis(3000));
    page.initialize().await.unwrap();
    assert!(page.snapshot().items.is_empty());
    assert_eq!(page.snapshot().schema.unwrap().fields.len(), 3);

    page.open_add_modal();
    page.handle_create(payload).await.unwrap();

    let state = page.snapshot();
    assert!(!state.modals.add);
    assert_eq!(state.items.len(), 1);
    assert!((state.items[0].current_balance - 5000.0).abs() < f64::EPSILON);
    let message = state.message.unwrap();
    assert_eq!(message.kind, MessageKind::Success);
    assert_eq!(message.text, "Cash holding added successfully!");

    // Freeze the clock now that the HTTP traffic is done, then step past the TTL.
    tokio::time::pause();
    tokio::time::advance(Duration::from_millis(2_500)).await;
    assert!(page.snapshot().message.is_some());
    tokio::time::advance(Duration::from_millis(600)).await;
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
    assert!(page.snapshot().message.is_none());
}

#[tokio::test]
async fn backend_error_text_reaches_the_page() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/stock-holdings"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"error": "Unknown ticker symbol"})),
        )
        .mount(&server)
        .await;

    let page: HttpOrchestrator<StockHolding> =
        http_orchestrator(client, Duration::from_millis(3000));
    page.open_add_modal();
    let err = page.handle_create(json!({"symbol": "ZZZZ"})).await.unwrap_err();

    assert!(matches!(err, CoreError::Backend { status: 422, .. }));
    let state = page.snapshot();
    assert!(state.modals.add);
    assert_eq!(state.message.unwrap().text, "Unknown ticker symbol");
}

#[tokio::test]
async fn missing_record_reports_the_backend_text() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/cash-holdings/42"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Cash holding not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page: HttpOrchestrator<CashHolding> =
        http_orchestrator(client, Duration::from_millis(3000));
    page.open_edit_modal(CashHolding {
        id: AssetId(42),
        account_name: "Checking".into(),
        ..CashHolding::default()
    });
    let err = page
        .handle_update(json!({"account_name": "Checking"}))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::NotFound { .. }));
    let state = page.snapshot();
    assert!(state.modals.edit);
    let message = state.message.unwrap();
    assert_eq!(message.kind, MessageKind::Error);
    assert_eq!(message.text, "Cash holding not found");
}

#[tokio::test]
async fn summary_fetches_every_asset_class() {
    let (server, client) = setup().await;

    let bodies = [
        ("/api/v1/cash-holdings", json!([{"id": 1, "current_balance": 1000}])),
        ("/api/v1/stock-holdings", json!({"stock_holdings": [{"id": 1, "shares_owned": 2, "current_price": "50"}]})),
        ("/api/v1/crypto-holdings", json!([])),
        ("/api/v1/real-estate", json!([{"id": 1, "current_value": 200000, "outstanding_mortgage": 150000}])),
        ("/api/v1/equity-grants", json!([])),
        ("/api/v1/manual-entries", json!([{"id": 1, "entry_type": "other_assets", "amount": 500}])),
    ];
    for (p, body) in bodies {
        Mock::given(method("GET"))
            .and(path(p))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
    }

    let summary = NetWorthSummary::fetch(&client).await.unwrap();
    assert!((summary.total_assets - 201_600.0).abs() < f64::EPSILON);
    assert!((summary.net_worth - 51_600.0).abs() < f64::EPSILON);
}
