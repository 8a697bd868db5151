//! Client for the cards resource.
//!
//! Card payloads use snake_case keys, unlike the other resources.

use crate::clients::decode;
use crate::error::GatewayError;
use crate::http::{Endpoint, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::cards::{IssueCardResponse, IssuePhysicalCardRequest, IssueVirtualCardRequest};

pub const ISSUE_VIRTUAL_CARD: Endpoint = Endpoint::post("/api/v1/cards/issue-virtual-card");
pub const ISSUE_PHYSICAL_CARD: Endpoint = Endpoint::post("/api/v1/cards/issue-physical-card");

/// Client for the cards resource.
#[derive(Debug, Clone)]
pub struct CardsClient {
    transport: Transport,
}

impl CardsClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn build_issue_virtual_card(&self, request: &IssueVirtualCardRequest) -> Result<HttpRequest, GatewayError> {
        self.transport.post_json(ISSUE_VIRTUAL_CARD.path, request)
    }

    pub fn issue_virtual_card_api(&self, request: &IssueVirtualCardRequest) -> Result<HttpResponse, GatewayError> {
        self.transport.execute(self.build_issue_virtual_card(request)?)
    }

    pub fn issue_virtual_card(&self, request: &IssueVirtualCardRequest) -> Result<IssueCardResponse, GatewayError> {
        decode(self.issue_virtual_card_api(request)?)
    }

    pub fn build_issue_physical_card(&self, request: &IssuePhysicalCardRequest) -> Result<HttpRequest, GatewayError> {
        self.transport.post_json(ISSUE_PHYSICAL_CARD.path, request)
    }

    pub fn issue_physical_card_api(&self, request: &IssuePhysicalCardRequest) -> Result<HttpResponse, GatewayError> {
        self.transport.execute(self.build_issue_physical_card(request)?)
    }

    pub fn issue_physical_card(&self, request: &IssuePhysicalCardRequest) -> Result<IssueCardResponse, GatewayError> {
        decode(self.issue_physical_card_api(request)?)
    }
}
