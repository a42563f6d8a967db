use chrono::FixedOffset;
use hrdesk_core::{DomainError, ShiftId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ListParams;
use super::schedule::{self, Assignment};
use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest};

/// Work shift. Times are local `HH:MM`, dates local `YYYY-MM-DD`; the wire
/// carries UTC. Unset fields are omitted, so the same type serves partial
/// updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ShiftId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_window_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_window_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_till: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Shift {
    pub fn to_utc(mut self, offset: FixedOffset) -> Result<Self, DomainError> {
        schedule::outbound(
            [
                &mut self.start_time,
                &mut self.end_time,
                &mut self.shift_window_start,
                &mut self.shift_window_end,
            ],
            [&mut self.valid_from, &mut self.valid_till],
            offset,
        )?;
        Ok(self)
    }

    pub fn from_utc(mut self, offset: FixedOffset) -> Self {
        schedule::inbound(
            [
                &mut self.start_time,
                &mut self.end_time,
                &mut self.shift_window_start,
                &mut self.shift_window_end,
            ],
            [&mut self.valid_from, &mut self.valid_till],
            offset,
        );
        self
    }
}

pub struct ShiftsApi<'a> {
    client: &'a ApiClient,
    offset: FixedOffset,
}

impl<'a> ShiftsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            offset: client.utc_offset(),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Vec<Shift>, ApiError> {
        let shifts: Vec<Shift> = self
            .client
            .data(params.apply(ApiRequest::get(&["shifts"])))
            .await?;
        Ok(shifts.into_iter().map(|s| s.from_utc(self.offset)).collect())
    }

    pub async fn create(&self, shift: Shift) -> Result<Shift, ApiError> {
        let body = shift.to_utc(self.offset)?;
        let created: Shift = self
            .client
            .data(ApiRequest::post(&["shifts"]).json(&body)?)
            .await?;
        Ok(created.from_utc(self.offset))
    }

    pub async fn update(&self, id: &ShiftId, changes: Shift) -> Result<Shift, ApiError> {
        let body = changes.to_utc(self.offset)?;
        let updated: Shift = self
            .client
            .data(ApiRequest::put(&["shifts", id.as_str()]).json(&body)?)
            .await?;
        Ok(updated.from_utc(self.offset))
    }

    pub async fn delete(&self, id: &ShiftId) -> Result<(), ApiError> {
        self.client
            .execute(ApiRequest::delete(&["shifts", id.as_str()]))
            .await
    }

    pub async fn assign_employees(
        &self,
        id: &ShiftId,
        assignment: &Assignment,
    ) -> Result<(), ApiError> {
        let body = assignment.body("shiftCode", self.offset)?;
        self.client
            .execute(ApiRequest::post(&["shifts", id.as_str(), "assign"]).json(&body)?)
            .await
    }
}
