//! Client configuration, read from the environment.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{FixedOffset, Local, Offset};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_WARM_LOVS: &[&str] = &["UserRole", "LeaveType"];

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint is appended to (may carry a path prefix).
    pub api_base_url: String,
    /// Directory for durable client state; `None` uses the OS data dir.
    pub data_dir: Option<PathBuf>,
    /// LOV types loaded after an identity refresh.
    pub warm_lov_types: Vec<String>,
    /// Offset used to convert shift/training wall-clock times.
    pub utc_offset: FixedOffset,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            data_dir: None,
            warm_lov_types: DEFAULT_WARM_LOVS.iter().map(|s| s.to_string()).collect(),
            utc_offset: local_offset(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base_url = lookup("HRDESK_API_BASE_URL").unwrap_or_else(|| {
            tracing::warn!("HRDESK_API_BASE_URL not set; using {DEFAULT_API_BASE_URL}");
            DEFAULT_API_BASE_URL.to_string()
        });

        let mut config = Self::new(api_base_url);

        if let Some(dir) = lookup("HRDESK_DATA_DIR").filter(|d| !d.trim().is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(list) = lookup("HRDESK_WARM_LOVS") {
            config.warm_lov_types = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(raw) = lookup("HRDESK_UTC_OFFSET_MINUTES") {
            match parse_offset_minutes(&raw) {
                Some(offset) => config.utc_offset = offset,
                None => tracing::warn!(value = %raw, "ignoring invalid HRDESK_UTC_OFFSET_MINUTES"),
            }
        }

        config
    }

    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_warm_lov_types(mut self, types: Vec<String>) -> Self {
        self.warm_lov_types = types;
        self
    }

    #[must_use]
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// Resolve the SQLite file holding durable session state:
    /// `{data_dir}/session.db`, defaulting to `{os_data_dir}/hrdesk/`.
    pub fn storage_path(&self) -> anyhow::Result<PathBuf> {
        let mut dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => {
                let mut base = dirs::data_dir()
                    .or_else(|| {
                        dirs::home_dir().map(|mut h| {
                            h.push(".local");
                            h.push("share");
                            h
                        })
                    })
                    .context("failed to resolve OS data directory - tried data_dir() and home_dir()/.local/share")?;
                base.push("hrdesk");
                base
            }
        };

        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory at {:?}", dir))?;

        dir.push("session.db");
        Ok(dir)
    }
}

pub(crate) fn local_offset() -> FixedOffset {
    Local::now().offset().fix()
}

fn parse_offset_minutes(raw: &str) -> Option<FixedOffset> {
    let minutes: i32 = raw.trim().parse().ok()?;
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.warm_lov_types, vec!["UserRole", "LeaveType"]);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("HRDESK_API_BASE_URL", "https://hr.example.com/api"),
            ("HRDESK_DATA_DIR", "/tmp/hrdesk-test"),
            ("HRDESK_WARM_LOVS", " LeaveType , ,Department"),
            ("HRDESK_UTC_OFFSET_MINUTES", "330"),
        ]));
        assert_eq!(config.api_base_url, "https://hr.example.com/api");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/hrdesk-test")));
        assert_eq!(config.warm_lov_types, vec!["LeaveType", "Department"]);
        assert_eq!(config.utc_offset.local_minus_utc(), 330 * 60);
    }

    #[test]
    fn invalid_offset_is_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[("HRDESK_UTC_OFFSET_MINUTES", "east")]));
        assert_eq!(config.utc_offset, local_offset());
        assert!(parse_offset_minutes("100000").is_none());
    }

    #[test]
    fn storage_path_under_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::new(DEFAULT_API_BASE_URL).with_data_dir(dir.path());
        assert_eq!(config.storage_path().unwrap(), dir.path().join("session.db"));
    }
}
