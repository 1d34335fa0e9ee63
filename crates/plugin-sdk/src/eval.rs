//! The evaluation invoker — one remote call, one envelope, one payload.

use std::sync::Arc;

use ep_connector::{ConnectorStore, ParamMap};
use ep_domain::error::Result;

/// Issues evaluation requests against the store and resolves the response
/// envelope.
///
/// One call maps to exactly one `evaluate` round trip: no retry, no
/// backoff, no timeout of its own.  Transport failures, remote application
/// errors, and envelope protocol violations come back as their distinct
/// error kinds; on success the raw payload string is returned unmodified
/// for the caller to decode per the operation's declared result rule.
#[derive(Clone)]
pub struct EvalInvoker {
    store: Arc<dyn ConnectorStore>,
}

impl EvalInvoker {
    pub fn new(store: Arc<dyn ConnectorStore>) -> Self {
        Self { store }
    }

    /// Invoke `function` on the callable registered under `selector`.
    pub async fn invoke(
        &self,
        selector: &str,
        function: &str,
        params: &ParamMap,
    ) -> Result<String> {
        tracing::debug!(selector, function, "dispatching remote evaluation");
        let envelope = self.store.evaluate(selector, function, params).await?;
        let payload = envelope.into_payload().map_err(|e| {
            tracing::debug!(selector, function, error = %e, "remote evaluation failed");
            e
        })?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ep_connector::{CallEnvelope, MemoryStore};
    use ep_domain::error::Error;

    fn invoker_with(
        handler: impl Fn(&str, &ParamMap) -> CallEnvelope + Send + Sync + 'static,
    ) -> EvalInvoker {
        let store = MemoryStore::new();
        store.register_eval("/edge/n1/plugins/p1/exec", handler);
        EvalInvoker::new(Arc::new(store))
    }

    #[tokio::test]
    async fn success_payload_is_returned_unchanged() {
        let invoker = invoker_with(|_, _| CallEnvelope::ok("  {\"x\": 1} "));
        let payload = invoker
            .invoke("/edge/n1/plugins/p1/exec", "anything", &ParamMap::new())
            .await
            .unwrap();
        assert_eq!(payload, "  {\"x\": 1} ");
    }

    #[tokio::test]
    async fn remote_failure_surfaces_code_and_message() {
        let invoker = invoker_with(|_, _| CallEnvelope::fail(9, "interface exists"));
        let err = invoker
            .invoke("/edge/n1/plugins/p1/exec", "create_virtual_bridge", &ParamMap::new())
            .await
            .unwrap_err();
        match err {
            Error::Application { code, message } => {
                assert_eq!(code, 9);
                assert_eq!(message, "interface exists");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_failure_is_not_an_application_error() {
        let invoker = EvalInvoker::new(Arc::new(MemoryStore::new()));
        let err = invoker
            .invoke("/edge/n1/plugins/missing/exec", "dir_exists", &ParamMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn inconsistent_envelope_is_a_protocol_error() {
        let invoker = invoker_with(|_, _| CallEnvelope {
            result: Some("true".into()),
            error: Some(1),
            error_message: Some("and also this".into()),
        });
        let err = invoker
            .invoke("/edge/n1/plugins/p1/exec", "dir_exists", &ParamMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }
}
