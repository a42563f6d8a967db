use chrono::{DateTime, Utc};
use hrdesk_core::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::attendance::{AttendanceQuery, AttendanceSummary, SearchBody};
use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingAttendanceRecord {
    #[serde(default)]
    pub training_day: String,
    #[serde(default)]
    pub training_code: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub overtime: String,
    #[serde(default)]
    pub short_time: String,
    #[serde(default)]
    pub first_swipe: String,
    #[serde(default)]
    pub last_swipe: String,
    #[serde(default)]
    pub attendance_status: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingAttendanceReport {
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub records: Vec<TrainingAttendanceRecord>,
    #[serde(default)]
    pub summary: AttendanceSummary,
}

/// The organisation-wide search carries only the window.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WindowBody {
    start_date: String,
    end_date: String,
}

fn window(query: &AttendanceQuery, now: DateTime<Utc>) -> Result<WindowBody, DomainError> {
    let SearchBody {
        start_date,
        end_date,
        ..
    } = query.body(now)?;
    Ok(WindowBody {
        start_date,
        end_date,
    })
}

pub struct TrainingAttendanceApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TrainingAttendanceApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn search(
        &self,
        query: &AttendanceQuery,
    ) -> Result<Vec<TrainingAttendanceReport>, ApiError> {
        let body = query.body(Utc::now())?;
        self.client
            .data(ApiRequest::post(&["training-attendance", "records"]).json(&body)?)
            .await
    }

    pub async fn search_all(
        &self,
        query: &AttendanceQuery,
    ) -> Result<Vec<TrainingAttendanceReport>, ApiError> {
        let body = window(query, Utc::now())?;
        self.client
            .data(ApiRequest::post(&["training-attendance", "records", "all"]).json(&body)?)
            .await
    }
}
