//! Typed resource clients over [`ApiClient`].
//!
//! Each client borrows the shared [`ApiClient`]; obtain one with e.g.
//! `api.leaves()`.

pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod leaves;
pub mod lovs;
pub mod payroll;
pub mod salary_structure;
mod schedule;
pub mod shifts;
pub mod training_attendance;
pub mod trainings;
pub mod users;

use serde::{Deserialize, Serialize};

use crate::http::{ApiClient, ApiRequest};

pub use attendance::AttendanceApi;
pub use auth::{AuthApi, LoginResponse};
pub use dashboard::DashboardApi;
pub use leaves::LeavesApi;
pub use lovs::{Lov, LovValue, LovsApi};
pub use payroll::PayrollApi;
pub use salary_structure::SalaryStructureApi;
pub use schedule::Assignment;
pub use shifts::ShiftsApi;
pub use training_attendance::TrainingAttendanceApi;
pub use trainings::TrainingsApi;
pub use users::UsersApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paging, search and sort options shared by list endpoints. Unset or zero
/// values are omitted from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl ListParams {
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    #[must_use]
    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    pub(crate) fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("page", self.page.filter(|p| *p > 0))
            .query_opt("limit", self.limit.filter(|l| *l > 0))
            .query_opt("search", self.search.as_deref().filter(|s| !s.is_empty()))
            .query_opt("sortBy", self.sort_by.as_deref().filter(|s| !s.is_empty()))
            .query_opt("sortOrder", self.sort_order)
    }
}

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn leaves(&self) -> LeavesApi<'_> {
        LeavesApi::new(self)
    }

    pub fn attendance(&self) -> AttendanceApi<'_> {
        AttendanceApi::new(self)
    }

    pub fn shifts(&self) -> ShiftsApi<'_> {
        ShiftsApi::new(self)
    }

    pub fn trainings(&self) -> TrainingsApi<'_> {
        TrainingsApi::new(self)
    }

    pub fn training_attendance(&self) -> TrainingAttendanceApi<'_> {
        TrainingAttendanceApi::new(self)
    }

    pub fn salary_structures(&self) -> SalaryStructureApi<'_> {
        SalaryStructureApi::new(self)
    }

    pub fn payroll(&self) -> PayrollApi<'_> {
        PayrollApi::new(self)
    }

    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(self)
    }

    pub fn lovs(&self) -> LovsApi<'_> {
        LovsApi::new(self)
    }
}
