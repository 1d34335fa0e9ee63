//! Keyword-parameter construction for remote evaluations.
//!
//! Every facade operation builds its parameters through [`Params`], so the
//! wire key names live next to the function name in exactly one place per
//! operation, and optional-namespace substitution happens at a single
//! point instead of drifting across call sites.

use serde_json::Value;

use ep_connector::ParamMap;

/// Reserved token for the default/root network namespace.
pub const DEFAULT_NETNS: &str = "1";

/// Resolve an optional network namespace to the token sent on the wire.
///
/// `None` and the empty string both mean the default/root namespace.
/// Every operation that accepts an optional namespace goes through here.
pub fn namespace_or_default(netns: Option<&str>) -> &str {
    match netns {
        Some(ns) if !ns.is_empty() => ns,
        _ => DEFAULT_NETNS,
    }
}

/// Builder for a [`ParamMap`].
///
/// Insertion order is preserved on the wire.
///
/// # Example
///
/// ```rust
/// use ep_plugin_sdk::params::Params;
///
/// let params = Params::new()
///     .str("intf_name", "veth0")
///     .str("nsname", "ens-1")
///     .finish();
/// assert_eq!(params["intf_name"], "veth0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Params(ParamMap);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn str(mut self, key: &str, value: impl Into<String>) -> Self {
        self.0.insert(key.to_string(), Value::String(value.into()));
        self
    }

    pub fn boolean(mut self, key: &str, value: bool) -> Self {
        self.0.insert(key.to_string(), Value::Bool(value));
        self
    }

    pub fn int(mut self, key: &str, value: i64) -> Self {
        self.0.insert(key.to_string(), Value::from(value));
        self
    }

    /// Insert an already-structured value (descriptor maps, lists).
    pub fn value(mut self, key: &str, value: Value) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    pub fn finish(self) -> ParamMap {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_preserves_insertion_order() {
        let params = Params::new()
            .str("command", "ip link")
            .boolean("blocking", true)
            .boolean("external", false)
            .finish();
        let keys: Vec<_> = params.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["command", "blocking", "external"]);
    }

    #[test]
    fn typed_inserts() {
        let params = Params::new()
            .int("pid", 4242)
            .value("descriptor", json!({"name": "eth0"}))
            .finish();
        assert_eq!(params["pid"], 4242);
        assert_eq!(params["descriptor"]["name"], "eth0");
    }

    #[test]
    fn empty_namespace_resolves_to_default_token() {
        assert_eq!(namespace_or_default(None), "1");
        assert_eq!(namespace_or_default(Some("")), "1");
        assert_eq!(namespace_or_default(Some("1")), "1");
        assert_eq!(namespace_or_default(Some("ens-7")), "ens-7");
    }
}
