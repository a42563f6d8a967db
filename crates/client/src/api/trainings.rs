use chrono::FixedOffset;
use hrdesk_core::{DomainError, TrainingId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ListParams;
use super::schedule::{self, Assignment};
use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest};

/// Training session; same wall-clock rules as [`super::shifts::Shift`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TrainingId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `UPCOMING`, `IN_PROGRESS` or `COMPLETED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_window_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_window_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_till: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Training {
    pub fn to_utc(mut self, offset: FixedOffset) -> Result<Self, DomainError> {
        schedule::outbound(
            [
                &mut self.start_time,
                &mut self.end_time,
                &mut self.training_window_start,
                &mut self.training_window_end,
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
                &mut self.training_window_start,
                &mut self.training_window_end,
            ],
            [&mut self.valid_from, &mut self.valid_till],
            offset,
        );
        self
    }
}

pub struct TrainingsApi<'a> {
    client: &'a ApiClient,
    offset: FixedOffset,
}

impl<'a> TrainingsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            offset: client.utc_offset(),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Vec<Training>, ApiError> {
        let trainings: Vec<Training> = self
            .client
            .data(params.apply(ApiRequest::get(&["trainings"])))
            .await?;
        Ok(trainings
            .into_iter()
            .map(|t| t.from_utc(self.offset))
            .collect())
    }

    pub async fn get(&self, id: &TrainingId) -> Result<Training, ApiError> {
        let training: Training = self
            .client
            .data(ApiRequest::get(&["trainings", id.as_str()]))
            .await?;
        Ok(training.from_utc(self.offset))
    }

    pub async fn create(&self, training: Training) -> Result<Training, ApiError> {
        let body = training.to_utc(self.offset)?;
        let created: Training = self
            .client
            .data(ApiRequest::post(&["trainings"]).json(&body)?)
            .await?;
        Ok(created.from_utc(self.offset))
    }

    pub async fn update(&self, id: &TrainingId, changes: Training) -> Result<Training, ApiError> {
        let body = changes.to_utc(self.offset)?;
        let updated: Training = self
            .client
            .data(ApiRequest::put(&["trainings", id.as_str()]).json(&body)?)
            .await?;
        Ok(updated.from_utc(self.offset))
    }

    pub async fn delete(&self, id: &TrainingId) -> Result<(), ApiError> {
        self.client
            .execute(ApiRequest::delete(&["trainings", id.as_str()]))
            .await
    }

    pub async fn assign_employees(
        &self,
        id: &TrainingId,
        assignment: &Assignment,
    ) -> Result<(), ApiError> {
        let body = assignment.body("trainingCode", self.offset)?;
        self.client
            .execute(ApiRequest::post(&["trainings", id.as_str(), "assign"]).json(&body)?)
            .await
    }
}
