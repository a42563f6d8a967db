use std::collections::BTreeMap;

use chrono::NaiveDate;
use hrdesk_auth::leave_actions::ApproverRef;
use hrdesk_auth::{Identity, LeaveActions, LeaveRecordRef, leave_actions};
use hrdesk_core::{DomainError, LeaveRequestId, UserId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::SortOrder;
use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest};

/// Leave buckets tracked per employee and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeaveType {
    Annual,
    Sick,
    CompOff,
    LossOfPay,
    OtherPaid,
    OtherUnpaid,
}

impl LeaveType {
    pub const ALL: [LeaveType; 6] = [
        LeaveType::Annual,
        LeaveType::Sick,
        LeaveType::CompOff,
        LeaveType::LossOfPay,
        LeaveType::OtherPaid,
        LeaveType::OtherUnpaid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Annual => "annual",
            LeaveType::Sick => "sick",
            LeaveType::CompOff => "compOff",
            LeaveType::LossOfPay => "lossOfPay",
            LeaveType::OtherPaid => "otherPaid",
            LeaveType::OtherUnpaid => "otherUnpaid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::Annual => "Annual Leave",
            LeaveType::Sick => "Sick Leave",
            LeaveType::CompOff => "Comp Off",
            LeaveType::LossOfPay => "Loss of Pay",
            LeaveType::OtherPaid => "Other Paid",
            LeaveType::OtherUnpaid => "Other Unpaid",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveCategory {
    #[serde(default)]
    pub alloted: f64,
    #[serde(default)]
    pub availed: f64,
    #[serde(default)]
    pub remaining: f64,
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeaveSummary {
    pub user_id: String,
    pub year: i32,
    pub annual: LeaveCategory,
    pub sick: LeaveCategory,
    pub comp_off: LeaveCategory,
    pub loss_of_pay: LeaveCategory,
    pub other_paid: LeaveCategory,
    pub other_unpaid: LeaveCategory,
}

impl LeaveSummary {
    pub fn category(&self, leave_type: LeaveType) -> &LeaveCategory {
        match leave_type {
            LeaveType::Annual => &self.annual,
            LeaveType::Sick => &self.sick,
            LeaveType::CompOff => &self.comp_off,
            LeaveType::LossOfPay => &self.loss_of_pay,
            LeaveType::OtherPaid => &self.other_paid,
            LeaveType::OtherUnpaid => &self.other_unpaid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[serde(rename = "_id", alias = "id")]
    pub id: LeaveRequestId,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub leave_type_id: Option<String>,
    #[serde(default)]
    pub leave_type: Option<String>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub no_of_days: Option<f64>,
    #[serde(default)]
    pub applied_to: Option<ApproverRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LeaveRequest {
    /// Actions `viewer` may take; nothing when the record has no approver.
    pub fn actions(&self, viewer: Option<&Identity>) -> LeaveActions {
        let Some(applied_to) = &self.applied_to else {
            return LeaveActions::default();
        };
        let record = LeaveRecordRef {
            user_id: self.user_id.clone(),
            status: self.status.clone(),
            applied_to: applied_to.clone(),
        };
        leave_actions(viewer, &record)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompOffRequest {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub hours: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub applied_on: String,
}

/// A new leave application.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLeave {
    #[serde(rename = "type")]
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    /// Applying on behalf of another employee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl NewLeave {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.leave_type.trim().is_empty() {
            return Err(DomainError::validation("leave type is required"));
        }
        if self.start_date > self.end_date {
            return Err(DomainError::validation(format!(
                "leave ends ({}) before it starts ({})",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveFilters {
    pub user_id: Option<UserId>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_order: Option<SortOrder>,
}

impl LeaveFilters {
    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("userId", self.user_id.as_ref())
            .query_opt("search", self.search.as_deref())
            .query_opt("page", self.page)
            .query_opt("limit", self.limit)
            .query_opt("sortOrder", self.sort_order)
    }
}

/// Approver's verdict on a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeaveDecision {
    Approved,
    Rejected,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusUpdate<'a> {
    status: LeaveDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    remarks: Option<&'a str>,
    no_of_days: f64,
}

pub struct LeavesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> LeavesApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn summary(&self, employee: &UserId) -> Result<LeaveSummary, ApiError> {
        self.client
            .data(ApiRequest::get(&["leaves", "summary", employee.as_str()]))
            .await
    }

    pub async fn compoff_requests(&self, employee: &UserId) -> Result<Vec<CompOffRequest>, ApiError> {
        self.client
            .data(ApiRequest::get(&["leaves", "compoff", employee.as_str()]))
            .await
    }

    pub async fn update_allotments(
        &self,
        employee: &UserId,
        year: i32,
        allotments: &BTreeMap<LeaveType, f64>,
    ) -> Result<(), ApiError> {
        if let Some((leave_type, days)) = allotments.iter().find(|(_, days)| **days < 0.0) {
            return Err(DomainError::validation(format!(
                "{} allotment cannot be negative ({days})",
                leave_type.label()
            ))
            .into());
        }

        let body = json!({ "userId": employee, "year": year, "allotments": allotments });
        self.client
            .execute(ApiRequest::post(&["leaves", "allotments"]).json(&body)?)
            .await
    }

    pub async fn create(&self, leave: &NewLeave) -> Result<(), ApiError> {
        leave.validate()?;
        self.client
            .execute(ApiRequest::post(&["leaves"]).json(leave)?)
            .await
    }

    pub async fn cancel(&self, id: &LeaveRequestId) -> Result<(), ApiError> {
        self.client
            .execute(ApiRequest::post(&["leaves", id.as_str(), "cancel"]))
            .await
    }

    pub async fn list(&self, filters: &LeaveFilters) -> Result<Vec<LeaveRequest>, ApiError> {
        self.client
            .data(filters.apply(ApiRequest::get(&["leaves"])))
            .await
    }

    pub async fn get(&self, id: &LeaveRequestId) -> Result<LeaveRequest, ApiError> {
        self.client
            .data(ApiRequest::get(&["leaves", id.as_str()]))
            .await
    }

    /// Approve or reject. A rejection must carry remarks.
    pub async fn update_status(
        &self,
        id: &LeaveRequestId,
        decision: LeaveDecision,
        no_of_days: f64,
        remarks: Option<&str>,
    ) -> Result<(), ApiError> {
        let remarks = remarks.map(str::trim).filter(|r| !r.is_empty());
        if decision == LeaveDecision::Rejected && remarks.is_none() {
            return Err(DomainError::validation("a rejection reason is required").into());
        }
        if no_of_days.is_nan() || no_of_days <= 0.0 {
            return Err(DomainError::validation(format!(
                "number of days must be positive, got {no_of_days}"
            ))
            .into());
        }

        let body = StatusUpdate {
            status: decision,
            remarks,
            no_of_days,
        };
        self.client
            .execute(ApiRequest::put(&["leaves", id.as_str(), "status"]).json(&body)?)
            .await
    }

    pub async fn by_employee(&self, employee: &UserId) -> Result<Vec<LeaveRequest>, ApiError> {
        self.client
            .data(ApiRequest::get(&["leaves", "employee", employee.as_str()]))
            .await
    }

    pub async fn my_list(
        &self,
        employee: &UserId,
        filters: &LeaveFilters,
    ) -> Result<Vec<LeaveRequest>, ApiError> {
        self.client
            .data(filters.apply(ApiRequest::get(&["leaves", "userId", employee.as_str()])))
            .await
    }
}
