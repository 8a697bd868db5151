use serde::{Deserialize, Serialize};

/// A rendered document: where it lives and its content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub url: String,
    pub document: String,
}

/// Query for both document endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentQuery {
    pub account_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetTariffDocumentResponse {
    pub tariff: Document,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetContractDocumentResponse {
    pub contract: Document,
}
