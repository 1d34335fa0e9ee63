//! The root handle a plugin process holds for the lifetime of its session.

use std::sync::Arc;

use uuid::Uuid;

use ep_connector::{keys, ConnectorStore};
use ep_domain::capability::CapabilityKind;
use ep_domain::config::SdkConfig;
use ep_domain::error::{Error, Result};
use ep_domain::records::{NodeConfiguration, PluginInfo};

use crate::agent::AgentClient;
use crate::discovery::PluginDiscovery;
use crate::network::NetworkPlugin;
use crate::os::OsPlugin;
use crate::state::StateStore;

/// One plugin process's binding to its node and the store.
///
/// The session carries the plugin's own identity (instance UUID, declared
/// version) and resolves the capability facades it delegates to.  Each
/// `os()` / `network()` / `agent()` call runs discovery once and binds the
/// returned facade to the resolved instance; facades never re-discover.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use ep_connector::MemoryStore;
/// use ep_plugin_sdk::PluginSession;
///
/// # async fn example() -> ep_domain::error::Result<()> {
/// let store = Arc::new(MemoryStore::new());
/// let session = PluginSession::new(store, "node-1", 1, None);
///
/// if let Some(os) = session.os().await? {
///     let present = os.dir_exists("/var/lib/units").await?;
///     println!("present: {present}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct PluginSession {
    store: Arc<dyn ConnectorStore>,
    node: String,
    instance_id: String,
    version: u32,
}

impl PluginSession {
    /// Bind to `node` with the given declared version.  When
    /// `instance_id` is `None` a fresh UUID is generated.
    pub fn new(
        store: Arc<dyn ConnectorStore>,
        node: impl Into<String>,
        version: u32,
        instance_id: Option<String>,
    ) -> Self {
        let instance_id =
            instance_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        Self {
            store,
            node: node.into(),
            instance_id,
            version,
        }
    }

    /// Bind using a parsed [`SdkConfig`].
    pub fn from_config(store: Arc<dyn ConnectorStore>, cfg: &SdkConfig, version: u32) -> Self {
        Self::new(store, cfg.node.clone(), version, cfg.plugin_uuid.clone())
    }

    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    // ── Registration ─────────────────────────────────────────────────

    /// Publish this plugin's registration record under the node's plugin
    /// key-space, making it discoverable by its peers.
    pub async fn register(&self, name: &str, kind: CapabilityKind) -> Result<()> {
        let info = PluginInfo {
            uuid: self.instance_id.clone(),
            name: name.to_string(),
            version: self.version,
            kind: kind.discovery_tag().to_string(),
        };
        let key = keys::plugin_info(&self.node, &self.instance_id);
        let value = serde_json::to_value(&info)
            .map_err(|e| Error::Conversion(format!("plugin info: {e}")))?;
        self.store.put(&key, value).await?;
        tracing::info!(
            node = %self.node,
            instance_id = %self.instance_id,
            name,
            "registered plugin"
        );
        Ok(())
    }

    /// Withdraw this plugin's registration record.
    pub async fn unregister(&self) -> Result<()> {
        let key = keys::plugin_info(&self.node, &self.instance_id);
        self.store.remove(&key).await?;
        tracing::info!(node = %self.node, instance_id = %self.instance_id, "unregistered plugin");
        Ok(())
    }

    // ── Capability resolution ────────────────────────────────────────

    /// Resolve the OS capability on this node.  `None` when no instance is
    /// registered; a facade is only constructed on a hit.
    pub async fn os(&self) -> Result<Option<OsPlugin>> {
        let tag = CapabilityKind::Os.discovery_tag();
        let descriptor = PluginDiscovery::new(self.store.clone())
            .find_first(&self.node, tag)
            .await?;
        Ok(descriptor.map(|d| OsPlugin::new(self.store.clone(), &d)))
    }

    /// Resolve the network-manager capability on this node.
    pub async fn network(&self) -> Result<Option<NetworkPlugin>> {
        let tag = CapabilityKind::Network.discovery_tag();
        let descriptor = PluginDiscovery::new(self.store.clone())
            .find_first(&self.node, tag)
            .await?;
        Ok(descriptor.map(|d| NetworkPlugin::new(self.store.clone(), &d)))
    }

    /// Resolve the agent on this node.
    pub async fn agent(&self) -> Result<Option<AgentClient>> {
        let tag = CapabilityKind::Agent.discovery_tag();
        let descriptor = PluginDiscovery::new(self.store.clone())
            .find_first(&self.node, tag)
            .await?;
        Ok(descriptor.map(|d| AgentClient::new(self.store.clone(), &d)))
    }

    // ── Node-scoped records ──────────────────────────────────────────

    /// The node's provisioning-time configuration record.
    pub async fn node_configuration(&self) -> Result<NodeConfiguration> {
        let key = keys::node_configuration(&self.node);
        let value = self
            .store
            .get(&key)
            .await?
            .ok_or_else(|| Error::NotFound(format!("node configuration for {}", self.node)))?;
        serde_json::from_value(value)
            .map_err(|e| Error::Conversion(format!("node configuration: {e}")))
    }

    /// Handle on this plugin's own persisted state.
    pub fn state(&self) -> StateStore {
        StateStore::new(self.store.clone(), &self.node, &self.instance_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ep_connector::MemoryStore;
    use serde_json::json;

    #[test]
    fn generates_instance_id_when_absent() {
        let store = Arc::new(MemoryStore::new());
        let session = PluginSession::new(store.clone(), "n1", 1, None);
        assert!(!session.instance_id().is_empty());

        let pinned = PluginSession::new(store, "n1", 1, Some("fixed-id".into()));
        assert_eq!(pinned.instance_id(), "fixed-id");
    }

    #[tokio::test]
    async fn register_makes_plugin_discoverable() {
        let store = Arc::new(MemoryStore::new());
        let session = PluginSession::new(store.clone(), "n1", 3, Some("os-1".into()));
        session.register("linux", CapabilityKind::Os).await.unwrap();

        let consumer = PluginSession::new(store, "n1", 1, None);
        let os = consumer.os().await.unwrap().unwrap();
        assert_eq!(os.instance_id(), "os-1");

        session.unregister().await.unwrap();
        assert!(consumer.os().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_capability_constructs_no_facade() {
        let store = Arc::new(MemoryStore::new());
        let session = PluginSession::new(store, "n1", 1, None);
        assert!(session.os().await.unwrap().is_none());
        assert!(session.network().await.unwrap().is_none());
        assert!(session.agent().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn node_configuration_reads_the_record() {
        let store = Arc::new(MemoryStore::new());
        store
            .put(
                &keys::node_configuration("n1"),
                json!({"uuid": "n1", "name": "edge-rack-3", "ram_mb": 8192}),
            )
            .await
            .unwrap();

        let session = PluginSession::new(store, "n1", 1, None);
        let cfg = session.node_configuration().await.unwrap();
        assert_eq!(cfg.name.as_deref(), Some("edge-rack-3"));
        assert_eq!(cfg.extra["ram_mb"], 8192);
    }

    #[tokio::test]
    async fn node_configuration_missing_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let session = PluginSession::new(store, "n1", 1, None);
        assert!(matches!(
            session.node_configuration().await,
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn from_config_uses_pinned_uuid() {
        let cfg = SdkConfig::from_toml(
            r#"
            node = "n1"
            plugin_uuid = "pinned"
            "#,
        )
        .unwrap();
        let session =
            PluginSession::from_config(Arc::new(MemoryStore::new()), &cfg, 2);
        assert_eq!(session.node(), "n1");
        assert_eq!(session.instance_id(), "pinned");
        assert_eq!(session.version(), 2);
    }
}
