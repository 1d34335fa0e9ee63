//! Capability discovery — resolves which plugin instance serves a
//! capability on a node.

use std::sync::Arc;

use ep_connector::{keys, ConnectorStore};
use ep_domain::capability::CapabilityDescriptor;
use ep_domain::error::Result;
use ep_domain::records::PluginInfo;

/// Lists and resolves capability registrations for a node.
///
/// Discovery is a leaf read through the store: registration records under
/// the node's plugin key-space are enumerated and matched on their declared
/// tag.  A miss is a normal outcome (`None`), never an error; only the
/// store itself failing is.
#[derive(Clone)]
pub struct PluginDiscovery {
    store: Arc<dyn ConnectorStore>,
}

impl PluginDiscovery {
    pub fn new(store: Arc<dyn ConnectorStore>) -> Self {
        Self { store }
    }

    /// All capability instances registered on `node`, in store-enumeration
    /// order.
    ///
    /// Records that fail to parse are skipped with a warning rather than
    /// failing the whole listing; one broken registration must not hide
    /// the others.
    pub async fn list_capabilities(&self, node: &str) -> Result<Vec<CapabilityDescriptor>> {
        let entries = self.store.list(&keys::plugins_prefix(node)).await?;

        let mut found = Vec::new();
        for (key, value) in entries {
            if !keys::is_plugin_info(&key) {
                continue;
            }
            match serde_json::from_value::<PluginInfo>(value) {
                Ok(info) => found.push(CapabilityDescriptor {
                    instance_id: info.uuid,
                    kind: info.kind,
                    node: node.to_string(),
                }),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "skipping malformed plugin record");
                }
            }
        }

        tracing::debug!(node, count = found.len(), "listed capability registrations");
        Ok(found)
    }

    /// The first instance on `node` whose declared tag equals `tag`.
    ///
    /// "First" follows store-enumeration order, which is not guaranteed
    /// stable across calls; when several instances share a tag this picks
    /// *a* match, not a designated one.
    pub async fn find_first(&self, node: &str, tag: &str) -> Result<Option<CapabilityDescriptor>> {
        let descriptor = self
            .list_capabilities(node)
            .await?
            .into_iter()
            .find(|d| d.kind == tag);

        match &descriptor {
            Some(d) => {
                tracing::debug!(node, tag, instance_id = %d.instance_id, "resolved capability")
            }
            None => tracing::debug!(node, tag, "no capability instance registered"),
        }
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ep_connector::MemoryStore;
    use ep_domain::capability::{NETWORK_TAG, OS_TAG};
    use serde_json::json;

    async fn register(store: &MemoryStore, node: &str, uuid: &str, kind: &str) {
        let info = PluginInfo {
            uuid: uuid.into(),
            name: format!("{kind}-plugin"),
            version: 1,
            kind: kind.into(),
        };
        store
            .put(
                &keys::plugin_info(node, uuid),
                serde_json::to_value(&info).unwrap(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn finds_the_single_matching_instance() {
        let store = MemoryStore::new();
        register(&store, "n1", "os-1", OS_TAG).await;
        register(&store, "n1", "nm-1", NETWORK_TAG).await;

        let discovery = PluginDiscovery::new(Arc::new(store));
        let d = discovery.find_first("n1", OS_TAG).await.unwrap().unwrap();
        assert_eq!(d.instance_id, "os-1");
        assert_eq!(d.kind, "os");
        assert_eq!(d.node, "n1");
    }

    #[tokio::test]
    async fn miss_is_none_not_an_error() {
        let store = MemoryStore::new();
        register(&store, "n1", "nm-1", NETWORK_TAG).await;

        let discovery = PluginDiscovery::new(Arc::new(store));
        assert!(discovery.find_first("n1", OS_TAG).await.unwrap().is_none());
        assert!(discovery.find_first("empty-node", OS_TAG).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn first_match_wins_in_store_order() {
        let store = MemoryStore::new();
        register(&store, "n1", "nm-a", NETWORK_TAG).await;
        register(&store, "n1", "nm-b", NETWORK_TAG).await;

        let discovery = PluginDiscovery::new(Arc::new(store));
        let d = discovery.find_first("n1", NETWORK_TAG).await.unwrap().unwrap();
        // MemoryStore enumerates lexicographically.
        assert_eq!(d.instance_id, "nm-a");
    }

    #[tokio::test]
    async fn malformed_records_are_skipped() {
        let store = MemoryStore::new();
        store
            .put(&keys::plugin_info("n1", "broken"), json!({"uuid": 7}))
            .await
            .unwrap();
        register(&store, "n1", "os-1", OS_TAG).await;

        let discovery = PluginDiscovery::new(Arc::new(store));
        let all = discovery.list_capabilities("n1").await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].instance_id, "os-1");
    }

    #[tokio::test]
    async fn non_info_keys_are_ignored() {
        let store = MemoryStore::new();
        register(&store, "n1", "os-1", OS_TAG).await;
        store
            .put(&keys::plugin_state("n1", "os-1"), json!({"pids": []}))
            .await
            .unwrap();

        let discovery = PluginDiscovery::new(Arc::new(store));
        assert_eq!(discovery.list_capabilities("n1").await.unwrap().len(), 1);
    }
}
