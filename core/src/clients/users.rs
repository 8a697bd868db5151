//! Client for the users resource.

use crate::clients::decode;
use crate::error::GatewayError;
use crate::http::{Endpoint, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::users::{CreateUserRequest, CreateUserResponse};

pub const CREATE_USER: Endpoint = Endpoint::post("/api/v1/users");

/// Client for the users resource.
#[derive(Debug, Clone)]
pub struct UsersClient {
    transport: Transport,
}

impl UsersClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn build_create_user(&self, request: &CreateUserRequest) -> Result<HttpRequest, GatewayError> {
        self.transport.post_json(CREATE_USER.path, request)
    }

    pub fn create_user_api(&self, request: &CreateUserRequest) -> Result<HttpResponse, GatewayError> {
        self.transport.execute(self.build_create_user(request)?)
    }

    pub fn create_user(&self, request: &CreateUserRequest) -> Result<CreateUserResponse, GatewayError> {
        decode(self.create_user_api(request)?)
    }
}
