//! Shared error taxonomy for all EdgePlane crates.
//!
//! The taxonomy keeps the failure layers apart: the store transport
//! ([`TransportError`]), the remote function ([`Error::Application`]), and
//! this SDK's own decoding ([`Error::Conversion`]).  A transport failure is
//! never reported as "the remote function returned false/empty", and a
//! remote failure is never reported as a transport fault.

/// Failures of the store transport itself.
///
/// Raised below the evaluation contract: the remote function never ran, or
/// its response never arrived in one piece.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("store unreachable: {0}")]
    Unreachable(String),

    #[error("no evaluation endpoint under {0}")]
    MissingEndpoint(String),

    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// SDK-level error.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The store transport failed before a well-formed envelope came back.
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    /// The remote function explicitly reported failure.
    ///
    /// The rendered form `<message> ErrNo: <code>` is a long-standing
    /// contract; callers parse it.  `code` and `message` stay addressable
    /// for machine handling.
    #[error("{message} ErrNo: {code}")]
    Application { code: i64, message: String },

    /// A payload did not match the operation's declared result rule.
    #[error("conversion: {0}")]
    Conversion(String),

    /// A response envelope violated the success-xor-failure contract.
    #[error("protocol: {0}")]
    Protocol(String),

    /// A record expected to exist was absent.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_error_renders_legacy_format() {
        let err = Error::Application {
            code: 42,
            message: "device busy".into(),
        };
        assert_eq!(err.to_string(), "device busy ErrNo: 42");
    }

    #[test]
    fn application_error_fields_stay_addressable() {
        let err = Error::Application {
            code: -3,
            message: "no such interface".into(),
        };
        match err {
            Error::Application { code, message } => {
                assert_eq!(code, -3);
                assert_eq!(message, "no such interface");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn transport_error_wraps_into_sdk_error() {
        let err: Error = TransportError::Unreachable("connection refused".into()).into();
        assert!(matches!(err, Error::Transport(_)));
        assert!(err.to_string().contains("connection refused"));
    }
}
