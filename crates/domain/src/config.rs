//! SDK configuration.
//!
//! Plugins load this from a TOML file (or assemble it programmatically) and
//! hand it to `PluginSession`.  Every field has a serde default so a partial
//! file parses.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Connection and identity settings for one plugin process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkConfig {
    /// UUID of the node this plugin runs on.
    pub node: String,
    /// Locator of the distributed store endpoint.
    #[serde(default = "d_locator")]
    pub locator: String,
    /// Fixed instance UUID for this plugin; generated when absent.
    #[serde(default)]
    pub plugin_uuid: Option<String>,
}

fn d_locator() -> String {
    "tcp/127.0.0.1:7887".into()
}

impl SdkConfig {
    /// Parse from TOML text and validate.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let cfg: SdkConfig =
            toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the SDK cannot operate with.
    pub fn validate(&self) -> Result<()> {
        if self.node.is_empty() {
            return Err(Error::Config("node is required".into()));
        }
        if self.locator.is_empty() {
            return Err(Error::Config("locator must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_gets_defaults() {
        let cfg = SdkConfig::from_toml(r#"node = "node-1""#).unwrap();
        assert_eq!(cfg.node, "node-1");
        assert_eq!(cfg.locator, "tcp/127.0.0.1:7887");
        assert!(cfg.plugin_uuid.is_none());
    }

    #[test]
    fn full_toml_parses() {
        let cfg = SdkConfig::from_toml(
            r#"
            node = "node-1"
            locator = "tcp/10.0.0.9:7887"
            plugin_uuid = "2b6c9f3e"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.locator, "tcp/10.0.0.9:7887");
        assert_eq!(cfg.plugin_uuid.as_deref(), Some("2b6c9f3e"));
    }

    #[test]
    fn missing_node_is_a_config_error() {
        let err = SdkConfig::from_toml("").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn empty_node_is_rejected() {
        let err = SdkConfig::from_toml(r#"node = """#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
