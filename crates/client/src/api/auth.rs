use hrdesk_auth::Identity;
use hrdesk_core::DomainError;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest};

/// Payload of `/auth/login` and `/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: Identity,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::validation("email and password are required").into());
        }

        let request = ApiRequest::post(&["auth", "login"]).json(&Credentials { email, password })?;
        self.client.data(request).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.execute(ApiRequest::post(&["auth", "logout"])).await
    }

    /// Ask the server who the current cookie/bearer belongs to.
    pub async fn me(&self) -> Result<LoginResponse, ApiError> {
        self.client.data(ApiRequest::get(&["auth", "me"])).await
    }
}
