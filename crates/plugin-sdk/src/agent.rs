//! Typed facade over the node agent's evaluation surface.

use std::sync::Arc;

use serde_json::Value;

use ep_connector::{keys, ConnectorStore};
use ep_domain::capability::CapabilityDescriptor;
use ep_domain::error::Result;
use ep_domain::records::{ConnectionPointDescriptor, ImageInfo};

use crate::decode;
use crate::eval::EvalInvoker;
use crate::params::Params;

/// Proxy for the agent running on one node.
///
/// The agent serves read-only queries over the node's catalog: images,
/// deployed units, virtual networks, ports.  Unlike the OS and network
/// facades it is addressed per node, not per plugin instance.
#[derive(Clone)]
pub struct AgentClient {
    invoker: EvalInvoker,
    selector: String,
    node: String,
}

impl AgentClient {
    pub fn new(store: Arc<dyn ConnectorStore>, descriptor: &CapabilityDescriptor) -> Self {
        Self {
            invoker: EvalInvoker::new(store),
            selector: keys::agent_exec(&descriptor.node),
            node: descriptor.node.clone(),
        }
    }

    pub fn node(&self) -> &str {
        &self.node
    }

    async fn call(&self, function: &str, params: Params) -> Result<String> {
        self.invoker
            .invoke(&self.selector, function, &params.finish())
            .await
    }

    /// Image descriptor for the given image UUID.
    pub async fn get_image_info(&self, image_uuid: &str) -> Result<ImageInfo> {
        let params = Params::new().str("image_uuid", image_uuid);
        decode::structured(&self.call("get_image_info", params).await?)
    }

    /// Record of a deployable-unit instance on a specific node.
    pub async fn get_node_fdu_info(
        &self,
        node_uuid: &str,
        fdu_uuid: &str,
        instance_uuid: &str,
    ) -> Result<Value> {
        let params = Params::new()
            .str("fdu_uuid", fdu_uuid)
            .str("instance_uuid", instance_uuid)
            .str("node_uuid", node_uuid);
        decode::object(&self.call("get_node_fdu_info", params).await?)
    }

    /// Descriptor of a deployable unit.
    pub async fn get_fdu_info(&self, fdu_uuid: &str) -> Result<Value> {
        let params = Params::new().str("fdu_uuid", fdu_uuid);
        decode::object(&self.call("get_fdu_info", params).await?)
    }

    /// Record of a virtual network.
    pub async fn get_network_info(&self, net_uuid: &str) -> Result<Value> {
        let params = Params::new().str("uuid", net_uuid);
        decode::object(&self.call("get_network_info", params).await?)
    }

    /// Descriptor of a connection point.
    pub async fn get_port_info(&self, cp_uuid: &str) -> Result<ConnectionPointDescriptor> {
        let params = Params::new().str("cp_uuid", cp_uuid);
        decode::structured(&self.call("get_port_info", params).await?)
    }

    /// Management IP address of the given node.
    pub async fn get_node_mgmt_address(&self, node_uuid: &str) -> Result<String> {
        let params = Params::new().str("node_uuid", node_uuid);
        self.call("get_node_mgmt_address", params).await
    }
}
