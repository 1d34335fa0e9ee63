//! Domain records exchanged with remote plugins.
//!
//! These schemas are owned by the remote side; this layer only reads a
//! handful of fields.  Every record therefore types just what the SDK
//! touches and carries everything else in a flattened `extra` map, so a
//! remote field added tomorrow survives a round trip today.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status token a desired-state record is re-written with to request
/// teardown.
pub const STATUS_DESTROY: &str = "DESTROY";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Plugin registration
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Registration record a plugin instance publishes under the node's
/// plugin key-space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginInfo {
    /// Instance UUID.
    pub uuid: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin implementation version.
    pub version: u32,
    /// Declared capability tag (e.g. `"os"`, `"network"`).
    #[serde(rename = "type")]
    pub kind: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Network records
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Information about one network interface, as reported by the network
/// manager.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InterfaceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intf_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    /// Assigned addresses in `A.B.C.D/prefix` form.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Information about a network namespace and the veth pair serving it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NamespaceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsname: Option<String>,
    /// Interface living inside the namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<InterfaceInfo>,
    /// Peer interface left in the root namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<InterfaceInfo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Desired/actual state of a connection point on a node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionPointRecord {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cp_id: Option<String>,
    /// Lifecycle status; [`STATUS_DESTROY`] requests teardown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Descriptor for a connection point, as stored by the agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConnectionPointDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vld_ref: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Agent records
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Descriptor of a deployable image known to the agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Node configuration record, written at provisioning time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
