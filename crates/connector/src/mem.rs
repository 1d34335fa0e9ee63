//! In-memory [`ConnectorStore`] used by tests and local development.
//!
//! Values live in a `BTreeMap`, so `list` enumerates in lexicographic key
//! order, which is deterministic where the real store promises nothing.
//! Evaluation handlers are plain closures registered per selector key.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use ep_domain::error::TransportError;

use crate::envelope::CallEnvelope;
use crate::store::{ConnectorStore, ParamMap};

/// Handler simulating one remote plugin's evaluation surface: receives the
/// function name and keyword parameters, returns the response envelope.
pub type EvalHandler = Arc<dyn Fn(&str, &ParamMap) -> CallEnvelope + Send + Sync>;

/// A process-local store double.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<std::collections::BTreeMap<String, Value>>,
    evals: Mutex<HashMap<String, EvalHandler>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an evaluation handler under a selector key.
    pub fn register_eval<F>(&self, selector: impl Into<String>, handler: F)
    where
        F: Fn(&str, &ParamMap) -> CallEnvelope + Send + Sync + 'static,
    {
        self.evals.lock().insert(selector.into(), Arc::new(handler));
    }

    /// Drop the handler under a selector key, simulating a plugin going
    /// away.
    pub fn unregister_eval(&self, selector: &str) {
        self.evals.lock().remove(selector);
    }
}

#[async_trait]
impl ConnectorStore for MemoryStore {
    async fn put(&self, key: &str, value: Value) -> Result<(), TransportError> {
        self.data.lock().insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, TransportError> {
        Ok(self.data.lock().get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<(), TransportError> {
        self.data.lock().remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<(String, Value)>, TransportError> {
        Ok(self
            .data
            .lock()
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    async fn evaluate(
        &self,
        selector: &str,
        function: &str,
        params: &ParamMap,
    ) -> Result<CallEnvelope, TransportError> {
        let handler = self
            .evals
            .lock()
            .get(selector)
            .cloned()
            .ok_or_else(|| TransportError::MissingEndpoint(selector.to_string()))?;
        Ok(handler(function, params))
    }
}
