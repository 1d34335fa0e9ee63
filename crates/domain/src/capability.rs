//! Capability kinds and discovery tags.
//!
//! A *capability* is a class of remote functionality exposed by a plugin
//! instance registered on a node.  Discovery matches on the string tag the
//! instance declared at registration time.

use serde::{Deserialize, Serialize};

/// Tag declared by OS plugin instances.
pub const OS_TAG: &str = "os";

/// Tag declared by network-manager plugin instances.
pub const NETWORK_TAG: &str = "network";

/// Tag the Agent facade resolves through.
///
/// The agent has no dedicated registration of its own and is reached via
/// the network manager's tag.  Kept explicit here (rather than reusing
/// [`NETWORK_TAG`] inline) so the two can diverge without touching call
/// sites; whether they *should* diverge is an open question tracked in
/// DESIGN.md.
pub const AGENT_TAG: &str = "network";

/// The capability classes this SDK exposes a typed facade for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Os,
    Network,
    Agent,
}

impl CapabilityKind {
    /// The registration tag discovery filters on for this kind.
    pub fn discovery_tag(self) -> &'static str {
        match self {
            CapabilityKind::Os => OS_TAG,
            CapabilityKind::Network => NETWORK_TAG,
            CapabilityKind::Agent => AGENT_TAG,
        }
    }
}

/// Discovery metadata identifying one capability instance.
///
/// Immutable once discovered; consumed to construct a typed facade.
/// Selection among several instances carrying the same tag follows
/// store-enumeration order, which is not guaranteed stable across calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    /// UUID of the plugin instance.
    pub instance_id: String,
    /// Declared capability tag (e.g. `"os"`, `"network"`).
    pub kind: String,
    /// Node the instance is registered on.
    pub node: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_tags() {
        assert_eq!(CapabilityKind::Os.discovery_tag(), "os");
        assert_eq!(CapabilityKind::Network.discovery_tag(), "network");
        // The agent rides on the network manager's tag.
        assert_eq!(CapabilityKind::Agent.discovery_tag(), "network");
    }

    #[test]
    fn descriptor_roundtrip() {
        let d = CapabilityDescriptor {
            instance_id: "6f1de7a2".into(),
            kind: "os".into(),
            node: "node-1".into(),
        };
        let json = serde_json::to_string(&d).unwrap();
        let parsed: CapabilityDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(d, parsed);
    }
}
