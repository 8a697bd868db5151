//! Business workflows over the gateway clients.
//!
//! Each workflow runs a short sequence of calls, carrying identifiers from
//! one step into the next, and returns a serializable report.

pub mod config;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use gateway_core::types::accounts::{OpenCreditCardAccountRequest, OpenDepositAccountRequest};
use gateway_core::types::documents::Document;
use gateway_core::types::operations::{MakePurchaseOperationRequest, OperationBase, OperationStatus};
use gateway_core::types::users::CreateUserRequest;
use gateway_core::{AccountsClient, CardsClient, DocumentsClient, OperationsClient, Transport, UsersClient};

use crate::config::WorkflowConfig;

pub const CURRENCY: &str = "RUB";

/// One client per resource, all sharing the same transport settings.
#[derive(Debug, Clone)]
pub struct Gateway {
    pub users: UsersClient,
    pub accounts: AccountsClient,
    pub cards: CardsClient,
    pub documents: DocumentsClient,
    pub operations: OperationsClient,
}

impl Gateway {
    pub fn new(transport: Transport) -> Self {
        Self {
            users: UsersClient::new(transport.clone()),
            accounts: AccountsClient::new(transport.clone()),
            cards: CardsClient::new(transport.clone()),
            documents: DocumentsClient::new(transport.clone()),
            operations: OperationsClient::new(transport),
        }
    }

    pub fn from_config(config: &WorkflowConfig) -> Self {
        Self::new(config.transport())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentsReport {
    pub user_id: String,
    pub account_id: String,
    pub tariff: Document,
    pub contract: Document,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepositAccountReport {
    pub user_id: String,
    pub status: u16,
    /// Response body as JSON, or as a plain string when it is not JSON.
    pub body: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationReceiptReport {
    pub user_id: String,
    pub account_id: String,
    pub card_id: String,
    pub operation_id: String,
    pub receipt: Document,
}

/// `user.<unix-seconds>@example.com`
pub fn unique_email() -> String {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default();
    format!("user.{secs}@example.com")
}

pub fn sample_user(email: &str) -> CreateUserRequest {
    CreateUserRequest {
        email: email.to_string(),
        last_name: "Иванов".to_string(),
        first_name: "Иван".to_string(),
        middle_name: "Иванович".to_string(),
        phone_number: "+79991234567".to_string(),
    }
}

pub fn credit_card_account(user_id: &str) -> OpenCreditCardAccountRequest {
    OpenCreditCardAccountRequest {
        user_id: user_id.to_string(),
        currency: CURRENCY.to_string(),
        credit_limit: 50000.0,
        interest_rate: Some(15.5),
        card_type: Some("PHYSICAL".to_string()),
    }
}

fn require_id<'a>(id: &'a str, what: &str) -> anyhow::Result<&'a str> {
    if id.is_empty() {
        bail!("gateway returned an empty {what} id");
    }
    Ok(id)
}

fn create_user(gateway: &Gateway) -> anyhow::Result<String> {
    let response = gateway.users.create_user(&sample_user(&unique_email())).context("create user")?;
    let user_id = require_id(&response.user.id, "user")?.to_string();
    info!(%user_id, "user_created");
    Ok(user_id)
}

/// User, credit-card account, then its tariff and contract documents.
pub fn documents(gateway: &Gateway) -> anyhow::Result<DocumentsReport> {
    let user_id = create_user(gateway)?;

    let opened = gateway
        .accounts
        .open_credit_card_account(&credit_card_account(&user_id))
        .context("open credit card account")?;
    let account_id = require_id(&opened.account.id, "account")?.to_string();
    info!(%account_id, cards = opened.cards.len(), "credit_card_account_opened");

    let tariff = gateway.documents.get_tariff_document(&account_id).context("get tariff document")?.tariff;
    info!(url = %tariff.url, "tariff_document_received");

    let contract = gateway.documents.get_contract_document(&account_id).context("get contract document")?.contract;
    info!(url = %contract.url, "contract_document_received");

    Ok(DocumentsReport { user_id, account_id, tariff, contract })
}

/// User, then a deposit account opened through the low-level call. The
/// raw status is reported whatever it is.
pub fn deposit_account(gateway: &Gateway) -> anyhow::Result<DepositAccountReport> {
    let user_id = create_user(gateway)?;

    let request = OpenDepositAccountRequest {
        user_id: user_id.clone(),
        currency: CURRENCY.to_string(),
        initial_deposit: Some(1000.0),
    };
    let response = gateway.accounts.open_deposit_account_api(&request).context("open deposit account")?;
    info!(status = response.status, "deposit_account_response");

    let body = serde_json::from_slice(&response.body)
        .unwrap_or_else(|_| Value::String(response.text().into_owned()));
    Ok(DepositAccountReport { user_id, status: response.status, body })
}

/// User, credit-card account, a purchase on its first card, then the receipt.
pub fn operation_receipt(gateway: &Gateway) -> anyhow::Result<OperationReceiptReport> {
    let user_id = create_user(gateway)?;

    let opened = gateway
        .accounts
        .open_credit_card_account(&credit_card_account(&user_id))
        .context("open credit card account")?;
    let account_id = require_id(&opened.account.id, "account")?.to_string();
    let card_id = opened.first_card_id().context("account was opened without a card")?.to_string();
    info!(%account_id, %card_id, "credit_card_account_opened");

    let purchase = MakePurchaseOperationRequest {
        base: OperationBase::new(OperationStatus::InProgress, 77.99, &card_id, &account_id),
        merchant_id: "taxi-001".to_string(),
        merchant_name: "City Taxi".to_string(),
        category: "taxi".to_string(),
        location: None,
        description: None,
        metadata: None,
    };
    let made = gateway.operations.make_purchase_operation(&purchase).context("make purchase operation")?;
    let operation_id = require_id(&made.operation_id, "operation")?.to_string();
    info!(%operation_id, "purchase_operation_made");

    let receipt = gateway.operations.get_operation_receipt(&operation_id).context("get operation receipt")?.receipt;
    info!(url = %receipt.url, "operation_receipt_received");

    Ok(OperationReceiptReport { user_id, account_id, card_id, operation_id, receipt })
}
