//! `hrdesk-client`
//!
//! **Responsibility:** the client side of the HR system.
//!
//! This crate provides:
//! - A typed HTTP client for the HR REST API (auth/role headers, error
//!   normalization, one wrapper per resource)
//! - The session store, persisted to durable storage
//! - The list-of-values cache
//! - The navigation gate driver (session check, identity refresh, redirects)
//! - A bounded notification queue for surfacing failures
//!
//! The API remains the authority; everything here is client state.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod guard;
pub mod http;
pub mod lov;
pub mod navigation;
pub mod notifications;
pub mod session_store;
pub mod storage;
pub mod timeconv;

pub use config::ClientConfig;
pub use context::AppContext;
pub use error::ApiError;
pub use guard::{Arrival, GuardError, NavigationOutcome, RouteGuard};
pub use http::{ApiClient, ApiRequest, ApiResponse};
pub use lov::LovCache;
pub use navigation::NavigationState;
pub use notifications::{Notification, NotificationKind, Notifications};
pub use session_store::SessionStore;
pub use storage::{DurableStorage, MemoryStorage, SqliteStorage};
