//! Process-wide cache of active LOV values, keyed by LOV type.
//!
//! Every load goes to the network and replaces the entry; the last good
//! value stays readable through [`LovCache::get`] in between and after a
//! failed load. A load still in flight when the cache is cleared does not
//! repopulate it.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::api::LovValue;
use crate::http::ApiClient;

#[derive(Debug, Clone)]
pub struct LovCache {
    client: ApiClient,
    entries: Arc<RwLock<Entries>>,
}

#[derive(Debug, Default)]
struct Entries {
    /// Bumped by every clear.
    generation: u64,
    values: HashMap<String, Vec<LovValue>>,
}

impl LovCache {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            entries: Arc::new(RwLock::new(Entries::default())),
        }
    }

    /// Fetch `lov_type`, keep only active values and store them.
    ///
    /// Failures are logged and yield an empty list; the cached entry is left
    /// untouched.
    pub async fn load_type(&self, lov_type: &str) -> Vec<LovValue> {
        let started = self.read().generation;
        match self.client.lovs().get_by_type(lov_type).await {
            Ok(lov) => {
                let active: Vec<LovValue> = lov.active_values().cloned().collect();
                tracing::debug!(lov_type, count = active.len(), "loaded LOV");
                let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
                if entries.generation == started {
                    entries.values.insert(lov_type.to_string(), active.clone());
                } else {
                    tracing::debug!(lov_type, "cache cleared during load; result not stored");
                }
                active
            }
            Err(err) => {
                tracing::error!(lov_type, "failed to load LOV: {err}");
                Vec::new()
            }
        }
    }

    /// Load several types one after another.
    pub async fn warm(&self, lov_types: &[String]) {
        for lov_type in lov_types {
            self.load_type(lov_type).await;
        }
    }

    /// Last successfully loaded values for `lov_type`.
    pub fn get(&self, lov_type: &str) -> Option<Vec<LovValue>> {
        self.read().values.get(lov_type).cloned()
    }

    /// Label for a stored value, if the type is loaded and the value known.
    pub fn label(&self, lov_type: &str, value: &str) -> Option<String> {
        self.read()
            .values
            .get(lov_type)?
            .iter()
            .find(|v| v.value == value)
            .map(|v| v.label.clone())
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if !entries.values.is_empty() {
            tracing::debug!(types = entries.values.len(), "clearing LOV cache");
        }
        entries.generation += 1;
        entries.values = HashMap::new();
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }
}
