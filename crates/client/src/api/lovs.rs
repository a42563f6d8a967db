//! Lists of values (LOVs): admin-maintained option sets such as roles and
//! leave types.

use hrdesk_core::{DomainError, LovId};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest};

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LovValue {
    pub label: String,
    pub value: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl LovValue {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lov {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LovId>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub lov_type: String,
    #[serde(default)]
    pub values: Vec<LovValue>,
}

impl Lov {
    pub fn active_values(&self) -> impl Iterator<Item = &LovValue> {
        self.values.iter().filter(|v| v.is_active)
    }
}

pub struct LovsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> LovsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, lov_type: &str) -> Result<Vec<Lov>, ApiError> {
        self.client
            .data(ApiRequest::get(&["lovs"]).query("type", lov_type))
            .await
    }

    pub async fn get_by_type(&self, lov_type: &str) -> Result<Lov, ApiError> {
        if lov_type.trim().is_empty() {
            return Err(DomainError::validation("LOV type is required").into());
        }
        self.client
            .data(ApiRequest::get(&["lovs", "type", lov_type]))
            .await
    }

    pub async fn create(&self, lov: &Lov) -> Result<Lov, ApiError> {
        self.client.data(ApiRequest::post(&["lovs"]).json(lov)?).await
    }

    pub async fn update(&self, id: &LovId, lov: &Lov) -> Result<Lov, ApiError> {
        self.client
            .data(ApiRequest::put(&["lovs", id.as_str()]).json(lov)?)
            .await
    }

    pub async fn delete(&self, id: &LovId) -> Result<(), ApiError> {
        self.client
            .execute(ApiRequest::delete(&["lovs", id.as_str()]))
            .await
    }
}
