use serde::{Deserialize, Serialize};

use crate::types::cards::Card;

/// Request payload for `POST /api/v1/accounts/open-credit-card-account`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenCreditCardAccountRequest {
    pub user_id: String,
    pub currency: String,
    pub credit_limit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    /// Kind of card issued with the account, e.g. `"PHYSICAL"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
}

/// Request payload for `POST /api/v1/accounts/open-deposit-account`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenDepositAccountRequest {
    pub user_id: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_deposit: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Response of both account-opening endpoints: the account plus the cards
/// issued with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenAccountResponse {
    pub account: Account,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl OpenAccountResponse {
    pub fn first_card_id(&self) -> Option<&str> {
        self.cards.first().map(|card| card.id.as_str())
    }
}
