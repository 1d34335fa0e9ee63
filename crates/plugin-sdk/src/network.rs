//! Typed facade over the network-manager plugin's evaluation surface,
//! plus the desired-state port registry it owns in the store.

use std::sync::Arc;

use serde_json::Value;

use ep_connector::{keys, ConnectorStore};
use ep_domain::capability::CapabilityDescriptor;
use ep_domain::error::{Error, Result};
use ep_domain::records::{
    ConnectionPointDescriptor, ConnectionPointRecord, InterfaceInfo, NamespaceInfo, STATUS_DESTROY,
};

use crate::decode;
use crate::eval::EvalInvoker;
use crate::params::{namespace_or_default, Params};

/// Proxy for the network-manager plugin resolved on one node.
///
/// Stateless beyond the identifiers fixed at construction; cheap to clone
/// and safe to share across tasks.
#[derive(Clone)]
pub struct NetworkPlugin {
    store: Arc<dyn ConnectorStore>,
    invoker: EvalInvoker,
    selector: String,
    node: String,
    instance_id: String,
}

impl NetworkPlugin {
    pub fn new(store: Arc<dyn ConnectorStore>, descriptor: &CapabilityDescriptor) -> Self {
        Self {
            invoker: EvalInvoker::new(store.clone()),
            selector: keys::plugin_exec(&descriptor.node, &descriptor.instance_id),
            node: descriptor.node.clone(),
            instance_id: descriptor.instance_id.clone(),
            store,
        }
    }

    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    async fn call(&self, function: &str, params: Params) -> Result<String> {
        self.invoker
            .invoke(&self.selector, function, &params.finish())
            .await
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Virtual interfaces & bridges
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Create a virtual interface from the given descriptor and return its
    /// record.
    pub async fn create_virtual_interface(
        &self,
        intf_id: &str,
        descriptor: &Value,
    ) -> Result<Value> {
        let params = Params::new()
            .str("intf_id", intf_id)
            .value("descriptor", descriptor.clone());
        decode::object(&self.call("create_virtual_interface", params).await?)
    }

    /// Delete the given virtual interface.
    pub async fn delete_virtual_interface(&self, intf_id: &str) -> Result<String> {
        let params = Params::new().str("intf_id", intf_id);
        self.call("delete_virtual_interface", params).await
    }

    /// Create a virtual bridge and return its record.
    pub async fn create_virtual_bridge(&self, name: &str, uuid: &str) -> Result<Value> {
        let params = Params::new().str("name", name).str("uuid", uuid);
        decode::object(&self.call("create_virtual_bridge", params).await?)
    }

    /// Delete the given virtual bridge.
    pub async fn delete_virtual_bridge(&self, br_uuid: &str) -> Result<String> {
        let params = Params::new().str("br_uuid", br_uuid);
        self.call("delete_virtual_bridge", params).await
    }

    /// Create any of the expected bridges that do not exist yet; returns
    /// one record per expected bridge.
    pub async fn create_bridges_if_not_exist(
        &self,
        expected: &[String],
    ) -> Result<Vec<Value>> {
        let params = Params::new().value(
            "expected_bridges",
            Value::from(expected.to_vec()),
        );
        decode::structured(&self.call("create_bridges_if_not_exist", params).await?)
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Connection points
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Connect an interface to a connection point; returns the interface
    /// record.
    pub async fn connect_interface_to_connection_point(
        &self,
        intf_id: &str,
        cp_id: &str,
    ) -> Result<Value> {
        let params = Params::new().str("intf_id", intf_id).str("cp_id", cp_id);
        decode::object(
            &self
                .call("connect_interface_to_connection_point", params)
                .await?,
        )
    }

    /// Disconnect the given interface; returns its record.
    pub async fn disconnect_interface(&self, intf_id: &str) -> Result<Value> {
        let params = Params::new().str("intf_id", intf_id);
        decode::object(&self.call("disconnect_interface", params).await?)
    }

    /// Connect a connection point to a virtual network; returns the
    /// connection-point record.
    pub async fn connect_cp_to_vnetwork(&self, cp_id: &str, vnet_id: &str) -> Result<Value> {
        let params = Params::new().str("cp_id", cp_id).str("vnet_id", vnet_id);
        decode::object(&self.call("connect_cp_to_vnetwork", params).await?)
    }

    /// Disconnect the given connection point; returns its record.
    pub async fn disconnect_cp(&self, cp_id: &str) -> Result<Value> {
        let params = Params::new().str("cp_id", cp_id);
        decode::object(&self.call("disconnect_cp", params).await?)
    }

    /// Delete the given connection point.
    pub async fn delete_port(&self, cp_id: &str) -> Result<bool> {
        let params = Params::new().str("cp_id", cp_id);
        decode::boolean(&self.call("delete_port", params).await?)
    }

    /// Ask the agent side of the plugin to create a connection point from
    /// a descriptor.
    pub async fn create_connection_point(
        &self,
        descriptor: &ConnectionPointDescriptor,
    ) -> Result<ConnectionPointRecord> {
        let descriptor = serde_json::to_value(descriptor)
            .map_err(|e| Error::Conversion(format!("descriptor: {e}")))?;
        let params = Params::new().value("descriptor", descriptor);
        decode::structured(&self.call("create_port_agent", params).await?)
    }

    /// Tear down a connection point previously created from a descriptor.
    pub async fn remove_connection_point(&self, cp_id: &str) -> Result<ConnectionPointRecord> {
        let params = Params::new().str("cp_id", cp_id);
        decode::structured(&self.call("destroy_port_agent", params).await?)
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Namespaces & interface plumbing
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Create a MACVLAN interface on top of `master_intf`; returns the new
    /// interface name.
    pub async fn create_macvlan_interface(&self, master_intf: &str) -> Result<String> {
        let params = Params::new().str("master_intf", master_intf);
        self.call("create_macvlan_interface", params).await
    }

    /// Delete a MACVLAN interface, looking for it in `netns` (default/root
    /// namespace when `None` or empty).
    pub async fn delete_macvlan_interface(
        &self,
        intf_name: &str,
        netns: Option<&str>,
    ) -> Result<String> {
        let params = Params::new()
            .str("intfName", intf_name)
            .str("netns", namespace_or_default(netns));
        self.call("delete_macvlan_interface", params).await
    }

    /// Create a new network namespace; returns its generated name.
    pub async fn create_network_namespace(&self) -> Result<String> {
        self.call("create_network_namespace", Params::new()).await
    }

    /// Delete the given network namespace; returns its name.
    pub async fn delete_network_namespace(&self, nsname: &str) -> Result<String> {
        let params = Params::new().str("nsname", nsname);
        self.call("delete_network_namespace", params).await
    }

    /// Move an interface into `netns` (default/root namespace when `None`
    /// or empty).
    pub async fn move_interface_in_namespace(
        &self,
        intf_name: &str,
        netns: Option<&str>,
    ) -> Result<InterfaceInfo> {
        let params = Params::new()
            .str("intf_name", intf_name)
            .str("nsname", namespace_or_default(netns));
        decode::structured(&self.call("move_interface_in_namespace", params).await?)
    }

    /// Rename an interface inside `netns`.
    pub async fn rename_virtual_interface_in_namespace(
        &self,
        name: &str,
        newname: &str,
        netns: Option<&str>,
    ) -> Result<String> {
        let params = Params::new()
            .str("name", name)
            .str("newname", newname)
            .str("nsname", namespace_or_default(netns));
        self.call("rename_virtual_interface_in_namespace", params)
            .await
    }

    /// Attach an interface to a bridge; returns the interface record.
    pub async fn attach_interface_to_bridge(
        &self,
        intf_name: &str,
        br_name: &str,
    ) -> Result<InterfaceInfo> {
        let params = Params::new().str("intf_name", intf_name).str("br_name", br_name);
        decode::structured(&self.call("attach_interface_to_bridge", params).await?)
    }

    /// Detach an interface from its bridge; returns the interface record.
    pub async fn detach_interface_from_bridge(&self, intf_name: &str) -> Result<InterfaceInfo> {
        let params = Params::new().str("intf_name", intf_name);
        decode::structured(&self.call("detach_interface_from_bridge", params).await?)
    }

    /// Create a veth pair whose internal end lives in `netns` under
    /// `internal_name`.
    pub async fn create_virtual_interface_in_namespace(
        &self,
        internal_name: &str,
        netns: Option<&str>,
    ) -> Result<NamespaceInfo> {
        let params = Params::new()
            .str("internal_name", internal_name)
            .str("nsname", namespace_or_default(netns));
        decode::structured(
            &self
                .call("create_virtual_interface_in_namespace", params)
                .await?,
        )
    }

    /// Delete an interface from the given namespace.
    pub async fn delete_virtual_interface_from_namespace(
        &self,
        internal_name: &str,
        netns: Option<&str>,
    ) -> Result<NamespaceInfo> {
        let params = Params::new()
            .str("internal_name", internal_name)
            .str("nsname", namespace_or_default(netns));
        decode::structured(
            &self
                .call("delete_virtual_interface_from_namespace", params)
                .await?,
        )
    }

    /// Assign an address (`A.B.C.D/prefix`) to an interface in a
    /// namespace.  With `address` `None` or empty the plugin picks via
    /// DHCP; the key is then omitted from the request.
    pub async fn assign_address_to_interface_in_namespace(
        &self,
        intf_name: &str,
        netns: Option<&str>,
        address: Option<&str>,
    ) -> Result<NamespaceInfo> {
        let mut params = Params::new()
            .str("intf_name", intf_name)
            .str("nsname", namespace_or_default(netns));
        if let Some(address) = address.filter(|a| !a.is_empty()) {
            params = params.str("address", address);
        }
        decode::structured(
            &self
                .call("assign_address_to_interface_in_namespace", params)
                .await?,
        )
    }

    /// Assign a MAC address (`AA:BB:CC:DD:EE:FF`) to an interface in a
    /// namespace.
    pub async fn assign_mac_address_to_interface_in_namespace(
        &self,
        intf_name: &str,
        netns: Option<&str>,
        address: &str,
    ) -> Result<NamespaceInfo> {
        let params = Params::new()
            .str("intf_name", intf_name)
            .str("nsname", namespace_or_default(netns))
            .str("address", address);
        decode::structured(
            &self
                .call("assign_mac_address_to_interface_in_namespace", params)
                .await?,
        )
    }

    /// Addresses currently assigned to an interface in a namespace.
    pub async fn get_address_of_interface_in_namespace(
        &self,
        intf_name: &str,
        netns: Option<&str>,
    ) -> Result<InterfaceInfo> {
        let params = Params::new()
            .str("intf_name", intf_name)
            .str("nsname", namespace_or_default(netns));
        decode::structured(
            &self
                .call("get_address_of_interface_in_namespace", params)
                .await?,
        )
    }

    /// Remove the address from an interface in a namespace.
    pub async fn remove_address_from_interface_in_namespace(
        &self,
        intf_name: &str,
        netns: Option<&str>,
    ) -> Result<NamespaceInfo> {
        let params = Params::new()
            .str("intf_name", intf_name)
            .str("nsname", namespace_or_default(netns));
        decode::structured(
            &self
                .call("remove_address_from_interface_in_namespace", params)
                .await?,
        )
    }

    /// Interface configured for overlay networks.
    pub async fn get_overlay_face(&self) -> Result<String> {
        self.call("get_overlay_face", Params::new()).await
    }

    /// Interface configured for VLAN networks.
    pub async fn get_vlan_face(&self) -> Result<String> {
        self.call("get_vlan_face", Params::new()).await
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Desired-state port registry (direct store writes, not eval)
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Publish a desired-state port record for this network manager.
    pub async fn add_node_port(&self, record: &ConnectionPointRecord) -> Result<()> {
        let key = keys::node_port(&self.node, &self.instance_id, &record.uuid);
        let value = serde_json::to_value(record)
            .map_err(|e| Error::Conversion(format!("port record: {e}")))?;
        self.store.put(&key, value).await?;
        tracing::debug!(cp_id = %record.uuid, node = %self.node, "published port record");
        Ok(())
    }

    /// Read back one desired-state port record.
    pub async fn get_node_port(&self, cp_id: &str) -> Result<ConnectionPointRecord> {
        let key = keys::node_port(&self.node, &self.instance_id, cp_id);
        let value = self
            .store
            .get(&key)
            .await?
            .ok_or_else(|| Error::NotFound(format!("port record {cp_id}")))?;
        serde_json::from_value(value).map_err(|e| Error::Conversion(format!("port record: {e}")))
    }

    /// All desired-state port records owned by this network manager.
    pub async fn get_all_node_ports(&self) -> Result<Vec<ConnectionPointRecord>> {
        let prefix = keys::node_ports_prefix(&self.node, &self.instance_id);
        let mut ports = Vec::new();
        for (key, value) in self.store.list(&prefix).await? {
            match serde_json::from_value(value) {
                Ok(record) => ports.push(record),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "skipping malformed port record")
                }
            }
        }
        Ok(ports)
    }

    /// Request teardown of a port by re-publishing its record with status
    /// [`STATUS_DESTROY`]; the plugin reacts to the desired-state change.
    pub async fn remove_node_port(&self, cp_id: &str) -> Result<()> {
        let mut record = self.get_node_port(cp_id).await?;
        record.status = Some(STATUS_DESTROY.to_string());
        self.add_node_port(&record).await
    }
}
