//! Strongly-typed identifiers used across the client.
//!
//! The HR API assigns opaque string ids (document ids). They are interpolated
//! into request paths, so construction rejects empty values and anything
//! containing a path or query delimiter.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of an employee / user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

/// Identifier of a leave request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaveRequestId(String);

/// Identifier of a shift definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftId(String);

/// Identifier of a training session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingId(String);

/// Identifier of a salary structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SalaryStructureId(String);

/// Identifier of a list-of-values document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LovId(String);

fn validate(name: &str, raw: &str) -> Result<(), DomainError> {
    if raw.trim().is_empty() {
        return Err(DomainError::invalid_id(format!("{name}: empty")));
    }
    if raw.contains(['/', '?', '#']) {
        return Err(DomainError::invalid_id(format!(
            "{name}: '{raw}' contains a path delimiter"
        )));
    }
    Ok(())
}

macro_rules! impl_string_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a validated raw identifier.
            pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
                let raw = raw.into();
                validate($name, &raw)?;
                Ok(Self(raw))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_string_id!(UserId, "UserId");
impl_string_id!(LeaveRequestId, "LeaveRequestId");
impl_string_id!(ShiftId, "ShiftId");
impl_string_id!(TrainingId, "TrainingId");
impl_string_id!(SalaryStructureId, "SalaryStructureId");
impl_string_id!(LovId, "LovId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_document_ids() {
        let id: UserId = "65f1c0a2b3d4e5f601234567".parse().unwrap();
        assert_eq!(id.as_str(), "65f1c0a2b3d4e5f601234567");
        assert_eq!(id.to_string(), "65f1c0a2b3d4e5f601234567");
    }

    #[test]
    fn rejects_empty_and_path_like_ids() {
        assert!(matches!(UserId::new("  "), Err(DomainError::InvalidId(_))));
        assert!(ShiftId::new("abc/../users").is_err());
        assert!(LeaveRequestId::new("x?admin=1").is_err());
    }

    #[test]
    fn serializes_transparently() {
        let id = TrainingId::new("t-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"t-1\"");
    }
}
