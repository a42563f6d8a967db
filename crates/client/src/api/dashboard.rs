use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_employees: u64,
    pub active_employees: u64,
    pub on_leave: u64,
    pub training_progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    /// `login`, `leave_request`, `training_complete` or `attendance`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceMetrics {
    pub present: u64,
    pub absent: u64,
    pub late: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainingMetrics {
    pub completed: u64,
    pub in_progress: u64,
    pub not_started: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub attendance: AttendanceMetrics,
    pub training: TrainingMetrics,
}

pub struct DashboardApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DashboardApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        self.client
            .data(ApiRequest::get(&["admin", "dashboard", "stats"]))
            .await
    }

    pub async fn activities(&self) -> Result<Vec<Activity>, ApiError> {
        self.client
            .data(ApiRequest::get(&["admin", "dashboard", "activities"]))
            .await
    }

    pub async fn metrics(&self) -> Result<Metrics, ApiError> {
        self.client
            .data(ApiRequest::get(&["admin", "dashboard", "metrics"]))
            .await
    }
}
