//! Operation contracts: queries, the seven operation-creation payloads and
//! the response envelopes of the operations endpoints.
//!
//! Every creation payload embeds [`OperationBase`] flattened, so the base
//! fields sit at the top level of the JSON body next to the kind-specific
//! ones.

use serde::{Deserialize, Serialize};

use crate::types::documents::Document;
use crate::types::Metadata;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Failed,
    Completed,
    InProgress,
    Unspecified,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    Fee,
    TopUp,
    Cashback,
    Transfer,
    Purchase,
    BillPayment,
    CashWithdrawal,
}

impl OperationType {
    pub const ALL: [OperationType; 7] = [
        OperationType::Fee,
        OperationType::TopUp,
        OperationType::Cashback,
        OperationType::Transfer,
        OperationType::Purchase,
        OperationType::BillPayment,
        OperationType::CashWithdrawal,
    ];
}

/// Fields shared by every operation-creation payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperationBase {
    pub status: OperationStatus,
    pub amount: f64,
    pub card_id: String,
    pub account_id: String,
}

impl OperationBase {
    pub fn new(status: OperationStatus, amount: f64, card_id: &str, account_id: &str) -> Self {
        Self {
            status,
            amount,
            card_id: card_id.to_string(),
            account_id: account_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MakeFeeOperationRequest {
    #[serde(flatten)]
    pub base: OperationBase,
    pub fee_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MakeTopUpOperationRequest {
    #[serde(flatten)]
    pub base: OperationBase,
    /// Where the money comes from, e.g. `"bank_transfer"`, `"card"`, `"cash"`.
    pub source: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MakeCashbackOperationRequest {
    #[serde(flatten)]
    pub base: OperationBase,
    pub cashback_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MakeTransferOperationRequest {
    #[serde(flatten)]
    pub base: OperationBase,
    pub recipient_account_id: String,
    pub recipient_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MakePurchaseOperationRequest {
    #[serde(flatten)]
    pub base: OperationBase,
    pub merchant_id: String,
    pub merchant_name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MakeBillPaymentOperationRequest {
    #[serde(flatten)]
    pub base: OperationBase,
    pub bill_number: String,
    /// e.g. `"utilities"`, `"tax"`, `"internet"`.
    pub bill_type: String,
    pub provider_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MakeCashWithdrawalOperationRequest {
    #[serde(flatten)]
    pub base: OperationBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atm_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atm_location: Option<String>,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Any operation-creation payload, tagged by kind.
///
/// Serializes as the inner payload; the kind selects the endpoint, it is not
/// written into the body.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum MakeOperationRequest {
    Fee(MakeFeeOperationRequest),
    TopUp(MakeTopUpOperationRequest),
    Cashback(MakeCashbackOperationRequest),
    Transfer(MakeTransferOperationRequest),
    Purchase(MakePurchaseOperationRequest),
    BillPayment(MakeBillPaymentOperationRequest),
    CashWithdrawal(MakeCashWithdrawalOperationRequest),
}

impl MakeOperationRequest {
    pub fn operation_type(&self) -> OperationType {
        match self {
            Self::Fee(_) => OperationType::Fee,
            Self::TopUp(_) => OperationType::TopUp,
            Self::Cashback(_) => OperationType::Cashback,
            Self::Transfer(_) => OperationType::Transfer,
            Self::Purchase(_) => OperationType::Purchase,
            Self::BillPayment(_) => OperationType::BillPayment,
            Self::CashWithdrawal(_) => OperationType::CashWithdrawal,
        }
    }

    pub fn base(&self) -> &OperationBase {
        match self {
            Self::Fee(r) => &r.base,
            Self::TopUp(r) => &r.base,
            Self::Cashback(r) => &r.base,
            Self::Transfer(r) => &r.base,
            Self::Purchase(r) => &r.base,
            Self::BillPayment(r) => &r.base,
            Self::CashWithdrawal(r) => &r.base,
        }
    }
}

macro_rules! impl_from_request {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for MakeOperationRequest {
                fn from(request: $ty) -> Self {
                    Self::$variant(request)
                }
            }
        )*
    };
}

impl_from_request! {
    Fee => MakeFeeOperationRequest,
    TopUp => MakeTopUpOperationRequest,
    Cashback => MakeCashbackOperationRequest,
    Transfer => MakeTransferOperationRequest,
    Purchase => MakePurchaseOperationRequest,
    BillPayment => MakeBillPaymentOperationRequest,
    CashWithdrawal => MakeCashWithdrawalOperationRequest,
}

/// Query for `GET /api/v1/operations`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetOperationsQuery {
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<OperationType>,
}

impl GetOperationsQuery {
    pub fn new(account_id: &str) -> Self {
        Self {
            account_id: account_id.to_string(),
            limit: None,
            offset: None,
            start_date: None,
            end_date: None,
            operation_type: None,
        }
    }
}

/// Query for `GET /api/v1/operations/operations-summary`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetOperationsSummaryQuery {
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Grouping key, e.g. `"day"`, `"week"`, `"month"`, `"category"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
}

impl GetOperationsSummaryQuery {
    pub fn new(account_id: &str) -> Self {
        Self {
            account_id: account_id.to_string(),
            start_date: None,
            end_date: None,
            group_by: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: OperationType,
    pub status: OperationStatus,
    pub amount: f64,
    pub card_id: String,
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GetOperationResponse {
    pub operation: Operation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetOperationReceiptResponse {
    pub receipt: Document,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GetOperationsResponse {
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperationsSummaryGroup {
    pub key: String,
    pub spent_amount: f64,
    pub received_amount: f64,
    pub cashback_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperationsSummary {
    pub spent_amount: f64,
    pub received_amount: f64,
    pub cashback_amount: f64,
    /// Present when the query asked for `groupBy`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<OperationsSummaryGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GetOperationsSummaryResponse {
    pub summary: OperationsSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MakeOperationResponse {
    pub operation_id: String,
}
