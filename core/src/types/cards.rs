//! Card contracts. Request keys are snake_case on the wire.

use serde::{Deserialize, Serialize};

use crate::types::Metadata;

/// Request payload for `POST /api/v1/cards/issue-virtual-card`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssueVirtualCardRequest {
    pub user_id: String,
    pub account_id: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Request payload for `POST /api/v1/cards/issue-physical-card`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssuePhysicalCardRequest {
    pub user_id: String,
    pub account_id: String,
    pub currency: String,
    pub delivery_address: String,
    pub card_holder_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_system: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueCardResponse {
    pub card: Card,
}
