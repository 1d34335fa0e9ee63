//! The response envelope for one remote evaluation.

use serde::{Deserialize, Serialize};

use ep_domain::error::Error;

/// What a remote callable sends back: exactly one of a payload or an error.
///
/// `result` is present iff `error`/`error_message` are both absent.  A
/// well-formed frame that sets both, or neither, violates the contract and
/// is reported as [`Error::Protocol`] rather than being resolved to an
/// arbitrary branch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl CallEnvelope {
    /// A success envelope carrying a raw payload.
    pub fn ok(payload: impl Into<String>) -> Self {
        Self {
            result: Some(payload.into()),
            error: None,
            error_message: None,
        }
    }

    /// A failure envelope carrying the remote error code and message.
    pub fn fail(code: i64, message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(code),
            error_message: Some(message.into()),
        }
    }

    /// Resolve the success-xor-failure contract.
    ///
    /// Returns the raw payload unmodified on success and
    /// [`Error::Application`] on a remote failure.
    pub fn into_payload(self) -> Result<String, Error> {
        match (self.result, self.error) {
            (Some(payload), None) if self.error_message.is_none() => Ok(payload),
            (None, Some(code)) => Err(Error::Application {
                code,
                message: self.error_message.unwrap_or_default(),
            }),
            (Some(_), Some(_)) => Err(Error::Protocol(
                "envelope carries both a payload and an error".into(),
            )),
            (Some(_), None) => Err(Error::Protocol(
                "envelope carries both a payload and an error message".into(),
            )),
            (None, None) => Err(Error::Protocol(
                "envelope carries neither a payload nor an error".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_returns_payload_unchanged() {
        let payload = CallEnvelope::ok("  raw text, untouched ").into_payload().unwrap();
        assert_eq!(payload, "  raw text, untouched ");
    }

    #[test]
    fn failure_carries_code_and_message() {
        let err = CallEnvelope::fail(17, "no such file").into_payload().unwrap_err();
        match err {
            Error::Application { code, message } => {
                assert_eq!(code, 17);
                assert_eq!(message, "no such file");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn failure_display_matches_legacy_format() {
        let err = CallEnvelope::fail(17, "no such file").into_payload().unwrap_err();
        assert_eq!(err.to_string(), "no such file ErrNo: 17");
    }

    #[test]
    fn both_set_is_a_protocol_violation() {
        let env = CallEnvelope {
            result: Some("true".into()),
            error: Some(1),
            error_message: Some("boom".into()),
        };
        assert!(matches!(env.into_payload(), Err(Error::Protocol(_))));
    }

    #[test]
    fn neither_set_is_a_protocol_violation() {
        let env = CallEnvelope {
            result: None,
            error: None,
            error_message: None,
        };
        assert!(matches!(env.into_payload(), Err(Error::Protocol(_))));
    }

    #[test]
    fn payload_with_stray_error_message_is_a_protocol_violation() {
        let env = CallEnvelope {
            result: Some("true".into()),
            error: None,
            error_message: Some("but also this".into()),
        };
        assert!(matches!(env.into_payload(), Err(Error::Protocol(_))));
    }

    #[test]
    fn error_without_message_defaults_to_empty() {
        let env = CallEnvelope {
            result: None,
            error: Some(5),
            error_message: None,
        };
        match env.into_payload().unwrap_err() {
            Error::Application { code, message } => {
                assert_eq!(code, 5);
                assert_eq!(message, "");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn wire_shape_omits_absent_fields() {
        let json = serde_json::to_string(&CallEnvelope::ok("x")).unwrap();
        assert_eq!(json, r#"{"result":"x"}"#);

        let json = serde_json::to_string(&CallEnvelope::fail(2, "nope")).unwrap();
        assert_eq!(json, r#"{"error":2,"error_message":"nope"}"#);
    }
}
