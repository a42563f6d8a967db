use hrdesk_core::{SalaryStructureId, UserId};
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest};

/// Per-employee salary assignments. Payloads are passed through untyped;
/// their shape is owned by the payroll service.
pub struct PayrollApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PayrollApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// The signed-in employee's current structure.
    pub async fn current(&self) -> Result<Value, ApiError> {
        self.client
            .data(ApiRequest::get(&["payroll", "salary-structure", "current"]))
            .await
    }

    pub async fn history(&self) -> Result<Value, ApiError> {
        self.client
            .data(ApiRequest::get(&["payroll", "salary-structure", "history"]))
            .await
    }

    pub async fn create(&self, payload: &Value) -> Result<Value, ApiError> {
        self.client
            .data(ApiRequest::post(&["payroll", "salary-structure"]).json(payload)?)
            .await
    }

    pub async fn update(&self, id: &SalaryStructureId, payload: &Value) -> Result<Value, ApiError> {
        self.client
            .data(ApiRequest::put(&["payroll", "salary-structure", id.as_str()]).json(payload)?)
            .await
    }

    pub async fn by_user(&self, user: &UserId) -> Result<Value, ApiError> {
        self.client
            .data(ApiRequest::get(&["payroll", "salary-structure", "user", user.as_str()]))
            .await
    }
}
