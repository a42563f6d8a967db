use chrono::{DateTime, Utc};
use hrdesk_core::{DomainError, UserId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest};
use crate::timeconv::to_iso;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(default)]
    pub shift_day: String,
    #[serde(default)]
    pub shift_code: String,
    /// `present`, `absent`, `missing_checkout`, `holiday` or `weekend`.
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

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendanceSummary {
    pub total_days: u32,
    pub late_days: u32,
    pub present_days: u32,
    pub regularised_days: u32,
    pub leave_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceReport {
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
    #[serde(default)]
    pub summary: AttendanceSummary,
}

/// Search window; unset bounds default to "now" when sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceQuery {
    pub user_ids: Vec<UserId>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchBody<'a> {
    pub(crate) user_ids: &'a [UserId],
    pub(crate) start_date: String,
    pub(crate) end_date: String,
}

impl AttendanceQuery {
    pub(crate) fn body(&self, now: DateTime<Utc>) -> Result<SearchBody<'_>, DomainError> {
        let start = self.start.unwrap_or(now);
        let end = self.end.unwrap_or(now);
        if start > end {
            return Err(DomainError::validation("attendance range ends before it starts"));
        }
        Ok(SearchBody {
            user_ids: &self.user_ids,
            start_date: to_iso(start),
            end_date: to_iso(end),
        })
    }
}

pub struct AttendanceApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AttendanceApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Records for the given users (the caller's own scope when empty).
    pub async fn search(&self, query: &AttendanceQuery) -> Result<Vec<AttendanceReport>, ApiError> {
        let body = query.body(Utc::now())?;
        self.client
            .data(ApiRequest::post(&["attendance", "records"]).json(&body)?)
            .await
    }

    /// Organisation-wide variant of [`Self::search`].
    pub async fn search_all(
        &self,
        query: &AttendanceQuery,
    ) -> Result<Vec<AttendanceReport>, ApiError> {
        let body = query.body(Utc::now())?;
        self.client
            .data(ApiRequest::post(&["attendance", "records", "all"]).json(&body)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn defaults_to_empty_users_and_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let query = AttendanceQuery::default();
        let body = serde_json::to_value(query.body(now).unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "userIds": [],
                "startDate": "2024-06-01T09:30:00.000Z",
                "endDate": "2024-06-01T09:30:00.000Z"
            })
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let query = AttendanceQuery {
            start: Some(now),
            end: Some(now - chrono::Duration::days(1)),
            ..AttendanceQuery::default()
        };
        assert!(query.body(now).is_err());
    }
}
