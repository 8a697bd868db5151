//! Client for the documents resource.
//!
//! Both endpoints take the account id as the `accountId` query parameter.
//! The high-level methods are what workflows normally use; the `*_api`
//! forms are there for callers that want to look at the status themselves.

use crate::clients::decode;
use crate::error::GatewayError;
use crate::http::{Endpoint, HttpRequest, HttpResponse};
use crate::transport::{query_pairs, Transport};
use crate::types::documents::{DocumentQuery, GetContractDocumentResponse, GetTariffDocumentResponse};

pub const GET_TARIFF_DOCUMENT: Endpoint = Endpoint::get("/api/v1/documents/tariff-document");
pub const GET_CONTRACT_DOCUMENT: Endpoint = Endpoint::get("/api/v1/documents/contract-document");

#[derive(Debug, Clone)]
pub struct DocumentsClient {
    transport: Transport,
}

impl DocumentsClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    fn build_document_request(&self, endpoint: Endpoint, account_id: &str) -> Result<HttpRequest, GatewayError> {
        let query = DocumentQuery {
            account_id: account_id.to_string(),
        };
        Ok(self.transport.get(endpoint.path, query_pairs(&query)?))
    }

    pub fn build_get_tariff_document(&self, account_id: &str) -> Result<HttpRequest, GatewayError> {
        self.build_document_request(GET_TARIFF_DOCUMENT, account_id)
    }

    pub fn get_tariff_document_api(&self, account_id: &str) -> Result<HttpResponse, GatewayError> {
        self.transport.execute(self.build_get_tariff_document(account_id)?)
    }

    /// Fetch the tariff document of an account.
    ///
    /// Fails with `GatewayError::Status` on a non-2xx response and
    /// `GatewayError::Decode` when the body is not `{tariff: {url, document}}`.
    pub fn get_tariff_document(&self, account_id: &str) -> Result<GetTariffDocumentResponse, GatewayError> {
        decode(self.get_tariff_document_api(account_id)?)
    }

    pub fn build_get_contract_document(&self, account_id: &str) -> Result<HttpRequest, GatewayError> {
        self.build_document_request(GET_CONTRACT_DOCUMENT, account_id)
    }

    pub fn get_contract_document_api(&self, account_id: &str) -> Result<HttpResponse, GatewayError> {
        self.transport.execute(self.build_get_contract_document(account_id)?)
    }

    /// Fetch the contract document of an account. Same failure rules as
    /// [`get_tariff_document`](Self::get_tariff_document).
    pub fn get_contract_document(&self, account_id: &str) -> Result<GetContractDocumentResponse, GatewayError> {
        decode(self.get_contract_document_api(account_id)?)
    }
}
