use serde::{Deserialize, Serialize};

use crate::roles::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleFlags {
    pub dashboard: bool,
    pub leaves: bool,
    pub attendance: bool,
    pub payslip: bool,
}

impl ModuleFlags {
    const ALL: Self = Self {
        dashboard: true,
        leaves: true,
        attendance: true,
        payslip: true,
    };

    const WITHOUT_PAYSLIP: Self = Self {
        payslip: false,
        ..Self::ALL
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalFlags {
    pub leaves: bool,
    pub attendance: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditFlags {
    pub profile: bool,
}

/// Capabilities granted to a role.
///
/// Always derived from the role via [`derive_for_role`]; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    pub role: UserRole,
    pub can_view: ModuleFlags,
    pub can_create: ModuleFlags,
    pub can_approve: ApprovalFlags,
    pub can_edit: EditFlags,
}

/// Map a role to its fixed capability set.
///
/// Total over [`UserRole`]; callers holding a raw role string should resolve
/// it with [`UserRole::from_raw`] first, which maps unknown values to staff.
pub fn derive_for_role(role: UserRole) -> PermissionSet {
    match role {
        UserRole::Admin => PermissionSet {
            role,
            can_view: ModuleFlags::ALL,
            can_create: ModuleFlags::ALL,
            can_approve: ApprovalFlags {
                leaves: true,
                attendance: true,
            },
            can_edit: EditFlags { profile: true },
        },
        UserRole::Manager => PermissionSet {
            role,
            can_view: ModuleFlags::WITHOUT_PAYSLIP,
            can_create: ModuleFlags::WITHOUT_PAYSLIP,
            can_approve: ApprovalFlags {
                leaves: true,
                attendance: false,
            },
            can_edit: EditFlags { profile: false },
        },
        UserRole::Staff => PermissionSet {
            role,
            can_view: ModuleFlags::ALL,
            can_create: ModuleFlags::ALL,
            can_approve: ApprovalFlags {
                leaves: false,
                attendance: false,
            },
            can_edit: EditFlags { profile: true },
        },
    }
}

/// Convenience for raw role strings coming off the wire.
pub fn derive_for_raw_role(raw: &str) -> PermissionSet {
    derive_for_role(UserRole::from_raw(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn admin_has_everything() {
        let p = derive_for_role(UserRole::Admin);
        assert!(p.can_view.payslip);
        assert!(p.can_approve.leaves && p.can_approve.attendance);
        assert!(p.can_edit.profile);
    }

    #[test]
    fn manager_cannot_see_payslips_or_approve_attendance() {
        let p = derive_for_role(UserRole::Manager);
        assert!(p.can_view.leaves);
        assert!(!p.can_view.payslip);
        assert!(!p.can_create.payslip);
        assert!(p.can_approve.leaves);
        assert!(!p.can_approve.attendance);
        assert!(!p.can_edit.profile);
    }

    #[test]
    fn staff_cannot_approve() {
        let p = derive_for_role(UserRole::Staff);
        assert!(!p.can_approve.leaves);
        assert!(!p.can_approve.attendance);
        assert!(p.can_view.payslip);
    }

    #[test]
    fn serializes_with_wire_names() {
        let json = serde_json::to_value(derive_for_role(UserRole::Manager)).unwrap();
        assert_eq!(json["role"], "MANAGER");
        assert_eq!(json["canApprove"]["leaves"], true);
        assert_eq!(json["canView"]["payslip"], false);
    }

    proptest! {
        #[test]
        fn raw_roles_are_deterministic_and_total(raw in ".{0,16}") {
            let first = derive_for_raw_role(&raw);
            let second = derive_for_raw_role(&raw);
            prop_assert_eq!(first, second);

            if UserRole::parse(&raw).is_none() {
                prop_assert_eq!(first, derive_for_role(UserRole::Staff));
            }
        }
    }
}
