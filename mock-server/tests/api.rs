use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_state, Db};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

const USER_BODY: &str = r#"{"email":"user.1@example.com","lastName":"Ivanov","firstName":"Ivan",
    "middleName":"Ivanovich","phoneNumber":"+79991234567"}"#;

/// Create a user and a credit-card account, returning (user_id, account_id, card_id).
async fn seed_account(db: &Db) -> (String, String, String) {
    let resp = app_with_state(db.clone())
        .oneshot(json_request("/api/v1/users", USER_BODY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let user_id = body_json(resp).await["user"]["id"].as_str().unwrap().to_string();

    let resp = app_with_state(db.clone())
        .oneshot(json_request(
            "/api/v1/accounts/open-credit-card-account",
            &format!(r#"{{"userId":"{user_id}","currency":"RUB","creditLimit":50000.0}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let account_id = body["account"]["id"].as_str().unwrap().to_string();
    let card_id = body["cards"][0]["id"].as_str().unwrap().to_string();
    (user_id, account_id, card_id)
}

// --- users ---

#[tokio::test]
async fn create_user_returns_user_envelope() {
    let resp = app().oneshot(json_request("/api/v1/users", USER_BODY)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["user"]["email"], "user.1@example.com");
    assert_eq!(body["user"]["phoneNumber"], "+79991234567");
    assert!(body["user"]["id"].is_string());
}

#[tokio::test]
async fn create_user_missing_email_returns_422() {
    let resp = app()
        .oneshot(json_request("/api/v1/users", r#"{"lastName":"Ivanov","firstName":"Ivan"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- accounts ---

#[tokio::test]
async fn open_account_for_unknown_user_returns_404() {
    let resp = app()
        .oneshot(json_request(
            "/api/v1/accounts/open-deposit-account",
            r#"{"userId":"nobody","currency":"RUB","initialDeposit":1000.0}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn credit_card_account_comes_with_a_card() {
    let db = Db::default();
    let (_, account_id, card_id) = seed_account(&db).await;
    let store = db.store.read().await;
    assert_eq!(store.accounts[&account_id].kind, "CREDIT_CARD");
    assert_eq!(store.accounts[&account_id].balance, 50000.0);
    assert!(store.cards.contains_key(&card_id));
}

// --- cards ---

#[tokio::test]
async fn issue_virtual_card_accepts_snake_case_payload() {
    let db = Db::default();
    let (user_id, account_id, _) = seed_account(&db).await;

    let resp = app_with_state(db)
        .oneshot(json_request(
            "/api/v1/cards/issue-virtual-card",
            &format!(r#"{{"user_id":"{user_id}","account_id":"{account_id}","currency":"RUB"}}"#),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["card"]["type"], "VIRTUAL");
}

#[tokio::test]
async fn issue_card_with_wrong_currency_returns_400() {
    let db = Db::default();
    let (user_id, account_id, _) = seed_account(&db).await;

    let resp = app_with_state(db)
        .oneshot(json_request(
            "/api/v1/cards/issue-physical-card",
            &format!(r#"{{"user_id":"{user_id}","account_id":"{account_id}","currency":"USD"}}"#),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- documents ---

#[tokio::test]
async fn tariff_document_for_known_account() {
    let db = Db::default();
    let (_, account_id, _) = seed_account(&db).await;

    let resp = app_with_state(db)
        .oneshot(get_request(&format!("/api/v1/documents/tariff-document?accountId={account_id}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["tariff"]["url"].as_str().unwrap().ends_with(&account_id));
    assert!(body["tariff"]["document"].is_string());
}

#[tokio::test]
async fn contract_document_without_account_id_returns_400() {
    let resp = app()
        .oneshot(get_request("/api/v1/documents/contract-document"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- operations ---

#[tokio::test]
async fn receipt_for_unknown_operation_returns_404() {
    let resp = app()
        .oneshot(get_request("/api/v1/operations/operation-receipt/does-not-exist"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn purchase_with_empty_account_id_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "/api/v1/operations/make-purchase-operation",
            r#"{"status":"IN_PROGRESS","amount":77.99,"cardId":"C1","accountId":"","category":"taxi"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn summary_with_unsupported_group_by_returns_400() {
    let resp = app()
        .oneshot(get_request("/api/v1/operations/operations-summary?accountId=A1&groupBy=week"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn operations_lifecycle() {
    let db = Db::default();
    let (_, account_id, card_id) = seed_account(&db).await;

    // purchase + top-up
    let purchase = format!(
        r#"{{"status":"IN_PROGRESS","amount":77.99,"cardId":"{card_id}","accountId":"{account_id}","category":"taxi"}}"#
    );
    let resp = app_with_state(db.clone())
        .oneshot(json_request("/api/v1/operations/make-purchase-operation", &purchase))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let operation_id = body_json(resp).await["operationId"].as_str().unwrap().to_string();

    let top_up = format!(
        r#"{{"status":"COMPLETED","amount":1000.0,"cardId":"{card_id}","accountId":"{account_id}",
            "source":"cash","currency":"RUB"}}"#
    );
    let resp = app_with_state(db.clone())
        .oneshot(json_request("/api/v1/operations/make-top-up-operation", &top_up))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // get
    let resp = app_with_state(db.clone())
        .oneshot(get_request(&format!("/api/v1/operations/{operation_id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["operation"]["type"], "PURCHASE");
    assert_eq!(body["operation"]["category"], "taxi");

    // receipt
    let resp = app_with_state(db.clone())
        .oneshot(get_request(&format!("/api/v1/operations/operation-receipt/{operation_id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json(resp).await["receipt"]["url"].is_string());

    // list filtered by type
    let resp = app_with_state(db.clone())
        .oneshot(get_request(&format!(
            "/api/v1/operations?accountId={account_id}&operationType=TOP_UP"
        )))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let operations = body_json(resp).await["operations"].as_array().unwrap().clone();
    assert_eq!(operations.len(), 1);
    assert_eq!(operations[0]["type"], "TOP_UP");

    // list paginated
    let resp = app_with_state(db.clone())
        .oneshot(get_request(&format!("/api/v1/operations?accountId={account_id}&limit=1&offset=1")))
        .await
        .unwrap();
    let operations = body_json(resp).await["operations"].as_array().unwrap().clone();
    assert_eq!(operations.len(), 1);
    assert_eq!(operations[0]["type"], "TOP_UP");

    // summary grouped by category
    let resp = app_with_state(db.clone())
        .oneshot(get_request(&format!(
            "/api/v1/operations/operations-summary?accountId={account_id}&groupBy=category"
        )))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let summary = body_json(resp).await["summary"].clone();
    assert_eq!(summary["spentAmount"], 77.99);
    assert_eq!(summary["receivedAmount"], 1000.0);
    assert_eq!(summary["cashbackAmount"], 0.0);
    assert_eq!(summary["groups"].as_array().unwrap().len(), 2);

    // every request went through the counter: 2 seed + 2 make + 5 reads
    assert_eq!(db.request_count(), 9);
}
