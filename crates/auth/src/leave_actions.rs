//! Which leave actions the current identity may take on a record.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// The fields of a leave record that drive action visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRecordRef {
    pub user_id: String,
    pub status: String,
    pub applied_to: ApproverRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproverRef {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveActions {
    pub can_withdraw: bool,
    pub can_approve: bool,
    pub can_reject: bool,
}

fn is_open(status: &str) -> bool {
    let status = status.trim();
    status.eq_ignore_ascii_case("PENDING") || status.eq_ignore_ascii_case("SUBMITTED")
}

/// Applicants may withdraw, designated approvers may approve or reject, and
/// only while the request is still open.
pub fn leave_actions(viewer: Option<&Identity>, record: &LeaveRecordRef) -> LeaveActions {
    let Some(viewer) = viewer else {
        return LeaveActions::default();
    };

    let open = is_open(&record.status);
    let is_applicant = viewer.id.as_str() == record.user_id;
    let is_approver = viewer.id.as_str() == record.applied_to.id;

    LeaveActions {
        can_withdraw: open && is_applicant,
        can_approve: open && is_approver,
        can_reject: open && is_approver,
    }
}
