//! Client for the accounts resource: credit-card and deposit accounts.

use crate::clients::decode;
use crate::error::GatewayError;
use crate::http::{Endpoint, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::accounts::{OpenAccountResponse, OpenCreditCardAccountRequest, OpenDepositAccountRequest};

pub const OPEN_CREDIT_CARD_ACCOUNT: Endpoint = Endpoint::post("/api/v1/accounts/open-credit-card-account");
pub const OPEN_DEPOSIT_ACCOUNT: Endpoint = Endpoint::post("/api/v1/accounts/open-deposit-account");

/// Client for the accounts resource.
#[derive(Debug, Clone)]
pub struct AccountsClient {
    transport: Transport,
}

impl AccountsClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn build_open_credit_card_account(
        &self,
        request: &OpenCreditCardAccountRequest,
    ) -> Result<HttpRequest, GatewayError> {
        self.transport.post_json(OPEN_CREDIT_CARD_ACCOUNT.path, request)
    }

    pub fn open_credit_card_account_api(
        &self,
        request: &OpenCreditCardAccountRequest,
    ) -> Result<HttpResponse, GatewayError> {
        self.transport.execute(self.build_open_credit_card_account(request)?)
    }

    pub fn open_credit_card_account(
        &self,
        request: &OpenCreditCardAccountRequest,
    ) -> Result<OpenAccountResponse, GatewayError> {
        decode(self.open_credit_card_account_api(request)?)
    }

    pub fn build_open_deposit_account(&self, request: &OpenDepositAccountRequest) -> Result<HttpRequest, GatewayError> {
        self.transport.post_json(OPEN_DEPOSIT_ACCOUNT.path, request)
    }

    pub fn open_deposit_account_api(&self, request: &OpenDepositAccountRequest) -> Result<HttpResponse, GatewayError> {
        self.transport.execute(self.build_open_deposit_account(request)?)
    }

    pub fn open_deposit_account(&self, request: &OpenDepositAccountRequest) -> Result<OpenAccountResponse, GatewayError> {
        decode(self.open_deposit_account_api(request)?)
    }
}
