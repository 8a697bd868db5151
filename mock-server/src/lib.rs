//! In-memory stand-in for the banking gateway.
//!
//! Serves the same endpoint surface as the real gateway with just enough
//! behaviour for client tests: it stores users, accounts, cards and
//! operations, validates references between them and answers with the
//! documented envelopes. Date filters are accepted and ignored.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post, MethodRouter},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub phone_number: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    #[serde(default)]
    pub phone_number: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub pan: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub payment_system: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub balance: f64,
    pub currency: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenCreditCardAccount {
    pub user_id: String,
    pub currency: String,
    pub credit_limit: f64,
    pub card_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenDepositAccount {
    pub user_id: String,
    pub currency: String,
    pub initial_deposit: Option<f64>,
}

/// Card issuing payloads use snake_case keys.
#[derive(Deserialize)]
pub struct IssueCard {
    pub user_id: String,
    pub account_id: String,
    pub currency: String,
    pub card_type: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    Fee,
    TopUp,
    Cashback,
    Transfer,
    Purchase,
    BillPayment,
    CashWithdrawal,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub status: String,
    pub amount: f64,
    pub card_id: String,
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Base fields of every operation-creation payload. Kind-specific fields are
/// accepted and not stored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeOperation {
    pub status: String,
    pub amount: f64,
    pub card_id: String,
    pub account_id: String,
    pub category: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountQuery {
    pub account_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationsQuery {
    pub account_id: String,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub operation_type: Option<OperationKind>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    pub account_id: String,
    pub group_by: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub spent_amount: f64,
    pub received_amount: f64,
    pub cashback_amount: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryGroup {
    pub key: String,
    #[serde(flatten)]
    pub totals: Totals,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    pub url: String,
    pub document: String,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct Store {
    pub users: HashMap<String, User>,
    pub accounts: HashMap<String, Account>,
    pub cards: HashMap<String, Card>,
    pub operations: Vec<Operation>,
}

/// Shared server state plus a counter of every request received.
#[derive(Default)]
pub struct Gateway {
    pub store: RwLock<Store>,
    requests: AtomicU64,
}

impl Gateway {
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }
}

pub type Db = Arc<Gateway>;

type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(status: StatusCode, detail: &str) -> ApiError {
    (status, Json(serde_json::json!({ "detail": detail })))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn app() -> Router {
    app_with_state(Db::default())
}

pub fn app_with_state(db: Db) -> Router {
    Router::new()
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/accounts/open-credit-card-account", post(open_credit_card_account))
        .route("/api/v1/accounts/open-deposit-account", post(open_deposit_account))
        .route("/api/v1/cards/issue-virtual-card", post(issue_virtual_card))
        .route("/api/v1/cards/issue-physical-card", post(issue_physical_card))
        .route("/api/v1/documents/tariff-document", get(tariff_document))
        .route("/api/v1/documents/contract-document", get(contract_document))
        .route("/api/v1/operations", get(list_operations))
        .route("/api/v1/operations/operations-summary", get(operations_summary))
        .route("/api/v1/operations/operation-receipt/{operation_id}", get(operation_receipt))
        .route("/api/v1/operations/{operation_id}", get(get_operation))
        .route("/api/v1/operations/make-fee-operation", make_operation_route(OperationKind::Fee))
        .route("/api/v1/operations/make-top-up-operation", make_operation_route(OperationKind::TopUp))
        .route("/api/v1/operations/make-cashback-operation", make_operation_route(OperationKind::Cashback))
        .route("/api/v1/operations/make-transfer-operation", make_operation_route(OperationKind::Transfer))
        .route("/api/v1/operations/make-purchase-operation", make_operation_route(OperationKind::Purchase))
        .route(
            "/api/v1/operations/make-bill-payment-operation",
            make_operation_route(OperationKind::BillPayment),
        )
        .route(
            "/api/v1/operations/make-cash-withdrawal-operation",
            make_operation_route(OperationKind::CashWithdrawal),
        )
        .layer(middleware::from_fn_with_state(db.clone(), count_requests))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_state(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(db)).await
}

async fn count_requests(State(db): State<Db>, request: Request, next: Next) -> Response {
    db.requests.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn new_card(kind: &str) -> Card {
    let digits: String = Uuid::new_v4()
        .as_u128()
        .to_string()
        .chars()
        .take(12)
        .collect();
    Card {
        id: new_id(),
        pan: format!("2200{digits:0>12}"),
        kind: kind.to_string(),
        status: "ACTIVE".to_string(),
        payment_system: "MIR".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Users and accounts
// ---------------------------------------------------------------------------

async fn create_user(State(db): State<Db>, Json(input): Json<CreateUser>) -> Json<serde_json::Value> {
    let user = User {
        id: new_id(),
        email: input.email,
        last_name: input.last_name,
        first_name: input.first_name,
        middle_name: input.middle_name,
        phone_number: input.phone_number,
    };
    db.store.write().await.users.insert(user.id.clone(), user.clone());
    Json(serde_json::json!({ "user": user }))
}

async fn open_account(db: &Db, user_id: &str, account: Account, cards: Vec<Card>) -> Result<Json<serde_json::Value>, ApiError> {
    let mut store = db.store.write().await;
    if !store.users.contains_key(user_id) {
        return Err(api_error(StatusCode::NOT_FOUND, "user not found"));
    }
    store.accounts.insert(account.id.clone(), account.clone());
    for card in &cards {
        store.cards.insert(card.id.clone(), card.clone());
    }
    Ok(Json(serde_json::json!({ "account": account, "cards": cards })))
}

async fn open_credit_card_account(
    State(db): State<Db>,
    Json(input): Json<OpenCreditCardAccount>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let account = Account {
        id: new_id(),
        kind: "CREDIT_CARD".to_string(),
        status: "ACTIVE".to_string(),
        balance: input.credit_limit,
        currency: input.currency,
    };
    let card = new_card(input.card_type.as_deref().unwrap_or("PHYSICAL"));
    open_account(&db, &input.user_id, account, vec![card]).await
}

async fn open_deposit_account(
    State(db): State<Db>,
    Json(input): Json<OpenDepositAccount>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let account = Account {
        id: new_id(),
        kind: "DEPOSIT".to_string(),
        status: "ACTIVE".to_string(),
        balance: input.initial_deposit.unwrap_or(0.0),
        currency: input.currency,
    };
    open_account(&db, &input.user_id, account, Vec::new()).await
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

async fn issue_card(db: &Db, input: IssueCard, default_kind: &str) -> Result<Json<serde_json::Value>, ApiError> {
    let mut store = db.store.write().await;
    if !store.users.contains_key(&input.user_id) {
        return Err(api_error(StatusCode::NOT_FOUND, "user not found"));
    }
    match store.accounts.get(&input.account_id) {
        None => return Err(api_error(StatusCode::NOT_FOUND, "account not found")),
        Some(account) if account.currency != input.currency => {
            return Err(api_error(StatusCode::BAD_REQUEST, "currency does not match account"));
        }
        Some(_) => {}
    }
    let card = new_card(input.card_type.as_deref().unwrap_or(default_kind));
    store.cards.insert(card.id.clone(), card.clone());
    Ok(Json(serde_json::json!({ "card": card })))
}

async fn issue_virtual_card(
    State(db): State<Db>,
    Json(input): Json<IssueCard>,
) -> Result<Json<serde_json::Value>, ApiError> {
    issue_card(&db, input, "VIRTUAL").await
}

async fn issue_physical_card(
    State(db): State<Db>,
    Json(input): Json<IssueCard>,
) -> Result<Json<serde_json::Value>, ApiError> {
    issue_card(&db, input, "PHYSICAL").await
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

async fn account_document(db: &Db, account_id: &str, key: &str) -> Result<Json<serde_json::Value>, ApiError> {
    let store = db.store.read().await;
    let account = store
        .accounts
        .get(account_id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "account not found"))?;
    let document = Document {
        url: format!("http://localhost/documents/{key}/{}", account.id),
        document: format!("{key} for {} account {}", account.kind, account.id),
    };
    let mut body = serde_json::Map::new();
    body.insert(key.to_string(), serde_json::json!(document));
    Ok(Json(serde_json::Value::Object(body)))
}

async fn tariff_document(
    State(db): State<Db>,
    Query(query): Query<AccountQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    account_document(&db, &query.account_id, "tariff").await
}

async fn contract_document(
    State(db): State<Db>,
    Query(query): Query<AccountQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    account_document(&db, &query.account_id, "contract").await
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

fn make_operation_route(kind: OperationKind) -> MethodRouter<Db> {
    post(move |State(db): State<Db>, Json(input): Json<MakeOperation>| make_operation(db, kind, input))
}

async fn make_operation(
    db: Db,
    kind: OperationKind,
    input: MakeOperation,
) -> Result<Json<serde_json::Value>, ApiError> {
    if input.account_id.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "accountId is required"));
    }
    let mut store = db.store.write().await;
    if !store.accounts.contains_key(&input.account_id) {
        return Err(api_error(StatusCode::NOT_FOUND, "account not found"));
    }
    if !store.cards.contains_key(&input.card_id) {
        return Err(api_error(StatusCode::NOT_FOUND, "card not found"));
    }
    let operation = Operation {
        id: new_id(),
        kind,
        status: input.status,
        amount: input.amount,
        card_id: input.card_id,
        account_id: input.account_id,
        category: input.category,
    };
    let operation_id = operation.id.clone();
    store.operations.push(operation);
    Ok(Json(serde_json::json!({ "operationId": operation_id })))
}

async fn get_operation(
    State(db): State<Db>,
    Path(operation_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let store = db.store.read().await;
    store
        .operations
        .iter()
        .find(|op| op.id == operation_id)
        .map(|op| Json(serde_json::json!({ "operation": op })))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "operation not found"))
}

async fn operation_receipt(
    State(db): State<Db>,
    Path(operation_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let store = db.store.read().await;
    let operation = store
        .operations
        .iter()
        .find(|op| op.id == operation_id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "operation not found"))?;
    let receipt = Document {
        url: format!("http://localhost/receipts/{}", operation.id),
        document: format!("receipt for operation {} amount {:.2}", operation.id, operation.amount),
    };
    Ok(Json(serde_json::json!({ "receipt": receipt })))
}

async fn list_operations(State(db): State<Db>, Query(query): Query<OperationsQuery>) -> Json<serde_json::Value> {
    let store = db.store.read().await;
    let operations: Vec<&Operation> = store
        .operations
        .iter()
        .filter(|op| op.account_id == query.account_id)
        .filter(|op| query.operation_type.map_or(true, |kind| op.kind == kind))
        .skip(query.offset.unwrap_or(0))
        .take(query.limit.unwrap_or(usize::MAX))
        .collect();
    Json(serde_json::json!({ "operations": operations }))
}

fn add_to_totals(totals: &mut Totals, op: &Operation) {
    match op.kind {
        OperationKind::TopUp => totals.received_amount += op.amount,
        OperationKind::Cashback => totals.cashback_amount += op.amount,
        _ => totals.spent_amount += op.amount,
    }
}

async fn operations_summary(
    State(db): State<Db>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Some(group_by) = query.group_by.as_deref() {
        if group_by != "category" && group_by != "type" {
            return Err(api_error(StatusCode::BAD_REQUEST, "unsupported groupBy"));
        }
    }
    let store = db.store.read().await;
    let operations = store.operations.iter().filter(|op| op.account_id == query.account_id);

    let mut totals = Totals::default();
    let mut groups: Vec<SummaryGroup> = Vec::new();
    for op in operations {
        add_to_totals(&mut totals, op);
        let key = match query.group_by.as_deref() {
            None => continue,
            Some("category") => op.category.clone().unwrap_or_else(|| "uncategorized".to_string()),
            Some(_) => serde_json::json!(op.kind).as_str().unwrap_or_default().to_string(),
        };
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => add_to_totals(&mut group.totals, op),
            None => {
                let mut group = SummaryGroup {
                    key,
                    totals: Totals::default(),
                };
                add_to_totals(&mut group.totals, op);
                groups.push(group);
            }
        }
    }

    let mut summary = serde_json::json!(totals);
    if !groups.is_empty() {
        summary["groups"] = serde_json::json!(groups);
    }
    Ok(Json(serde_json::json!({ "summary": summary })))
}
