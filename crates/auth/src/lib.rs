//! `hrdesk-auth`: session, RBAC and navigation-gate policy.
//!
//! This crate is intentionally decoupled from HTTP and storage: every
//! function here is a pure decision over in-memory values. The client crate
//! wires these decisions to the network and to durable storage.

pub mod gate;
pub mod identity;
pub mod leave_actions;
pub mod permissions;
pub mod roles;
pub mod session;

pub use gate::{AuthContext, GateDecision, GuardState, RouteClass, Section};
pub use identity::Identity;
pub use leave_actions::{LeaveActions, LeaveRecordRef, leave_actions};
pub use permissions::{PermissionSet, derive_for_role};
pub use roles::{NavigationContext, UserRole};
pub use session::{Session, SessionEvent};
