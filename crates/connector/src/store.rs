//! The [`ConnectorStore`] trait — the SDK's entire boundary with the
//! distributed key-value store.
//!
//! Implementations may talk to the real store network, or be a test double.
//! Consistency, watch semantics, and the wire encoding between the store
//! and remote plugin processes are owned by the implementation; this layer
//! sees keys, JSON values, and evaluation envelopes.

use async_trait::async_trait;
use serde_json::{Map, Value};

use ep_domain::error::TransportError;

use crate::envelope::CallEnvelope;

/// Keyword parameters for one remote evaluation.
///
/// Key order is preserved on the wire.
pub type ParamMap = Map<String, Value>;

/// Interface to the distributed key-value store the node coordinates
/// through.
///
/// All operations are one synchronous request/response round trip; any
/// timeout is the implementation's to enforce.  Errors are transport-level
/// only: a remote function that *ran* and failed reports that inside the
/// returned [`CallEnvelope`], never here.
#[async_trait]
pub trait ConnectorStore: Send + Sync {
    /// Write `value` under `key`.  Unconditional; last write wins.
    async fn put(&self, key: &str, value: Value) -> Result<(), TransportError>;

    /// Read the value under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<Value>, TransportError>;

    /// Remove the value under `key`.  Removing an absent key is not an
    /// error.
    async fn remove(&self, key: &str) -> Result<(), TransportError>;

    /// Enumerate `(key, value)` pairs under a key prefix, in store order.
    ///
    /// Store order is implementation-defined and not guaranteed stable
    /// across calls.
    async fn list(&self, prefix: &str) -> Result<Vec<(String, Value)>, TransportError>;

    /// Invoke the callable registered under `selector` with keyword
    /// parameters, returning its response envelope.
    async fn evaluate(
        &self,
        selector: &str,
        function: &str,
        params: &ParamMap,
    ) -> Result<CallEnvelope, TransportError>;
}
