//! Key-space layout for node-scoped plugin records.
//!
//! Every key the SDK reads or writes is derived here, so the layout is
//! defined in exactly one place.
//!
//! ```text
//! /edge/{node}/configuration                      node provisioning record
//! /edge/{node}/plugins/{instance}/info            PluginInfo registration
//! /edge/{node}/plugins/{instance}/state           persisted plugin state
//! /edge/{node}/plugins/{instance}/exec            evaluation selector
//! /edge/{node}/plugins/{instance}/ports/{cp}      desired-state port records
//! /edge/{node}/agent/exec                         agent evaluation selector
//! ```

/// Root of the node-local key-space.
pub const ROOT: &str = "/edge";

/// Prefix under which all of a node's plugin records live.
pub fn plugins_prefix(node: &str) -> String {
    format!("{ROOT}/{node}/plugins/")
}

/// Registration record of one plugin instance.
pub fn plugin_info(node: &str, instance: &str) -> String {
    format!("{ROOT}/{node}/plugins/{instance}/info")
}

/// Persisted state blob of one plugin instance.
pub fn plugin_state(node: &str, instance: &str) -> String {
    format!("{ROOT}/{node}/plugins/{instance}/state")
}

/// Evaluation selector for functions registered by one plugin instance.
pub fn plugin_exec(node: &str, instance: &str) -> String {
    format!("{ROOT}/{node}/plugins/{instance}/exec")
}

/// Evaluation selector for functions registered by the node agent.
pub fn agent_exec(node: &str) -> String {
    format!("{ROOT}/{node}/agent/exec")
}

/// Node configuration record.
pub fn node_configuration(node: &str) -> String {
    format!("{ROOT}/{node}/configuration")
}

/// One desired-state port record owned by a network-manager instance.
pub fn node_port(node: &str, instance: &str, cp_id: &str) -> String {
    format!("{ROOT}/{node}/plugins/{instance}/ports/{cp_id}")
}

/// Prefix under which one network-manager instance's port records live.
pub fn node_ports_prefix(node: &str, instance: &str) -> String {
    format!("{ROOT}/{node}/plugins/{instance}/ports/")
}

/// True when `key` is a plugin registration record.
pub fn is_plugin_info(key: &str) -> bool {
    key.ends_with("/info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_stable() {
        assert_eq!(plugins_prefix("n1"), "/edge/n1/plugins/");
        assert_eq!(plugin_info("n1", "p1"), "/edge/n1/plugins/p1/info");
        assert_eq!(plugin_state("n1", "p1"), "/edge/n1/plugins/p1/state");
        assert_eq!(plugin_exec("n1", "p1"), "/edge/n1/plugins/p1/exec");
        assert_eq!(agent_exec("n1"), "/edge/n1/agent/exec");
        assert_eq!(node_configuration("n1"), "/edge/n1/configuration");
        assert_eq!(node_port("n1", "p1", "cp1"), "/edge/n1/plugins/p1/ports/cp1");
        assert_eq!(node_ports_prefix("n1", "p1"), "/edge/n1/plugins/p1/ports/");
    }

    #[test]
    fn info_keys_are_recognized() {
        assert!(is_plugin_info(&plugin_info("n1", "p1")));
        assert!(!is_plugin_info(&plugin_state("n1", "p1")));
        assert!(!is_plugin_info(&node_port("n1", "p1", "cp1")));
    }
}
