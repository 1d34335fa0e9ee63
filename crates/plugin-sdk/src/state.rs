//! Persisted plugin state.
//!
//! Each plugin instance owns one free-form state blob in the store, keyed
//! by (node, instance).  No schema, versioning, or merge policy is imposed
//! here; last write wins per the store's own guarantee.

use std::sync::Arc;

use serde_json::{Map, Value};

use ep_connector::{keys, ConnectorStore};
use ep_domain::error::{Error, Result};

/// Handle on one plugin instance's persisted state.
#[derive(Clone)]
pub struct StateStore {
    store: Arc<dyn ConnectorStore>,
    key: String,
}

impl StateStore {
    pub fn new(store: Arc<dyn ConnectorStore>, node: &str, instance_id: &str) -> Self {
        Self {
            key: keys::plugin_state(node, instance_id),
            store,
        }
    }

    /// Read the state blob.  An absent blob is reported as
    /// [`Error::NotFound`], not silently replaced with an empty map.  A
    /// plugin that never saved state and one that saved `{}` are different
    /// situations.
    pub async fn load(&self) -> Result<Map<String, Value>> {
        let value = self
            .store
            .get(&self.key)
            .await?
            .ok_or_else(|| Error::NotFound(format!("plugin state {}", self.key)))?;
        match value {
            Value::Object(map) => Ok(map),
            other => Err(Error::Conversion(format!(
                "plugin state is not an object: {other}"
            ))),
        }
    }

    /// Write the state blob, replacing whatever was there.
    pub async fn save(&self, state: Map<String, Value>) -> Result<()> {
        self.store.put(&self.key, Value::Object(state)).await?;
        tracing::debug!(key = %self.key, "saved plugin state");
        Ok(())
    }

    /// Remove the state blob.
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(&self.key).await?;
        tracing::debug!(key = %self.key, "removed plugin state");
        Ok(())
    }
}
