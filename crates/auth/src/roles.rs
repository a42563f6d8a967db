use serde::{Deserialize, Serialize};

/// Role assigned to an identity.
///
/// The wire value is upper-case (`"ADMIN"`), but older records carry
/// lower-case values, so parsing is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    Staff,
}

impl UserRole {
    /// Strict parse; `None` for anything outside the three known roles.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Self::Admin),
            "MANAGER" => Some(Self::Manager),
            "STAFF" => Some(Self::Staff),
            _ => None,
        }
    }

    /// Lenient parse: unknown roles degrade to the most restrictive role.
    pub fn from_raw(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Manager => "MANAGER",
            UserRole::Staff => "STAFF",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Manager => "Manager",
            UserRole::Staff => "Staff",
        }
    }

    /// Landing page for an authenticated identity with this role.
    pub fn home_path(&self) -> &'static str {
        match self {
            UserRole::Admin => "/admin/dashboard",
            UserRole::Manager => "/manager/dashboard",
            UserRole::Staff => "/my/dashboard",
        }
    }
}

impl core::fmt::Display for UserRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role-scoped section the user is currently working in.
///
/// Sent with every request as the `reqRole` header so the API can scope
/// results (an admin browsing "my leaves" sees only their own).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavigationContext {
    Admin,
    Manager,
    #[default]
    Staff,
}

impl NavigationContext {
    pub fn as_header_value(&self) -> &'static str {
        match self {
            NavigationContext::Admin => "admin",
            NavigationContext::Manager => "manager",
            NavigationContext::Staff => "staff",
        }
    }
}

impl core::fmt::Display for NavigationContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_header_value())
    }
}
