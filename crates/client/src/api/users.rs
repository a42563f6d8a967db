use hrdesk_auth::{Identity, UserRole};
use hrdesk_core::UserId;
use serde::Serialize;
use serde_json::{Map, Value};

use super::ListParams;
use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest};

/// Create/update payload for an employee record; unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Vec<Identity>, ApiError> {
        self.client.data(params.apply(ApiRequest::get(&["users"]))).await
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Identity>, ApiError> {
        self.client
            .data(ApiRequest::get(&["users"]).query("search", term))
            .await
    }

    pub async fn get(&self, id: &UserId) -> Result<Identity, ApiError> {
        self.client.data(ApiRequest::get(&["users", id.as_str()])).await
    }

    pub async fn create(&self, draft: &EmployeeDraft) -> Result<Identity, ApiError> {
        self.client
            .data(ApiRequest::post(&["users"]).json(draft)?)
            .await
    }

    pub async fn update(&self, id: &UserId, draft: &EmployeeDraft) -> Result<Identity, ApiError> {
        self.client
            .data(ApiRequest::put(&["users", id.as_str()]).json(draft)?)
            .await
    }

    pub async fn delete(&self, id: &UserId) -> Result<(), ApiError> {
        self.client
            .execute(ApiRequest::delete(&["users", id.as_str()]))
            .await
    }

    /// Profile of the signed-in user.
    pub async fn me(&self) -> Result<Identity, ApiError> {
        self.client.data(ApiRequest::get(&["users", "me"])).await
    }
}
