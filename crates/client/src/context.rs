//! Application context: the single owner of client state.

use std::sync::Arc;

use anyhow::Context as _;
use hrdesk_auth::gate::LOGIN_PATH;

use crate::api::{
    AttendanceApi, AuthApi, DashboardApi, LeavesApi, LovsApi, PayrollApi, SalaryStructureApi,
    ShiftsApi, TrainingAttendanceApi, TrainingsApi, UsersApi,
};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::guard::{Arrival, GuardError, RouteGuard};
use crate::http::ApiClient;
use crate::lov::LovCache;
use crate::navigation::NavigationState;
use crate::notifications::Notifications;
use crate::session_store::SessionStore;
use crate::storage::{DurableStorage, SqliteStorage};

#[derive(Debug, Clone)]
pub struct AppContext {
    config: ClientConfig,
    api: ApiClient,
    session: SessionStore,
    navigation: NavigationState,
    lovs: LovCache,
    notifications: Notifications,
    guard: RouteGuard,
}

impl AppContext {
    /// Open with SQLite-backed session storage under the configured data dir.
    pub async fn open(config: ClientConfig) -> anyhow::Result<Self> {
        let path = config.storage_path()?;
        tracing::debug!(path = %path.display(), "opening session storage");
        Self::with_storage(config, Arc::new(SqliteStorage::open(path))).await
    }

    pub async fn with_storage(
        config: ClientConfig,
        storage: Arc<dyn DurableStorage>,
    ) -> anyhow::Result<Self> {
        let session = SessionStore::hydrate(storage).await;
        let navigation = NavigationState::default();
        let api = ApiClient::new(&config.api_base_url, session.clone(), navigation.clone())
            .context("failed to build API client")?
            .with_utc_offset(config.utc_offset);
        let lovs = LovCache::new(api.clone());
        let guard = RouteGuard::new(api.clone(), lovs.clone(), config.warm_lov_types.clone());

        Ok(Self {
            config,
            api,
            session,
            navigation,
            lovs,
            notifications: Notifications::new(),
            guard,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn lovs(&self) -> &LovCache {
        &self.lovs
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    pub fn auth_api(&self) -> AuthApi<'_> {
        self.api.auth()
    }

    pub fn users(&self) -> UsersApi<'_> {
        self.api.users()
    }

    pub fn leaves(&self) -> LeavesApi<'_> {
        self.api.leaves()
    }

    pub fn attendance(&self) -> AttendanceApi<'_> {
        self.api.attendance()
    }

    pub fn shifts(&self) -> ShiftsApi<'_> {
        self.api.shifts()
    }

    pub fn trainings(&self) -> TrainingsApi<'_> {
        self.api.trainings()
    }

    pub fn training_attendance(&self) -> TrainingAttendanceApi<'_> {
        self.api.training_attendance()
    }

    pub fn salary_structures(&self) -> SalaryStructureApi<'_> {
        self.api.salary_structures()
    }

    pub fn payroll(&self) -> PayrollApi<'_> {
        self.api.payroll()
    }

    pub fn dashboard(&self) -> DashboardApi<'_> {
        self.api.dashboard()
    }

    pub fn lov_api(&self) -> LovsApi<'_> {
        self.api.lovs()
    }

    /// Sign in and return the role's landing page.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let response = self.api.auth().login(email, password).await?;
        let home = response.user.role().home_path().to_string();

        if let Err(err) = self
            .session
            .set_auth(Some(response.user), response.token)
            .await
        {
            tracing::warn!("signed in, but the session could not be persisted: {err:?}");
        }
        self.lovs.warm(&self.config.warm_lov_types).await;

        tracing::info!(home = %home, "login succeeded");
        Ok(home)
    }

    /// Sign out. The server call is best-effort; local state is always
    /// cleared.
    pub async fn logout(&self) {
        if let Err(err) = self.api.auth().logout().await {
            tracing::warn!("server logout failed: {err}");
        }
        self.clear_local_state().await;
    }

    /// Surface a failed call to the user. Returns the page to go to when the
    /// failure ended the session.
    pub async fn report(&self, error: &ApiError) -> Option<String> {
        self.notifications.error(error.user_message());

        if error.is_session_expired() {
            self.clear_local_state().await;
            return Some(LOGIN_PATH.to_string());
        }
        None
    }

    pub async fn navigate(&self, path: &str) -> Result<Arrival, GuardError> {
        self.guard.navigate(path).await
    }

    async fn clear_local_state(&self) {
        if let Err(err) = self.session.clear_auth().await {
            tracing::warn!("failed to clear persisted session: {err:?}");
        }
        self.lovs.clear();
    }
}
