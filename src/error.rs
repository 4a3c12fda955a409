//! Error taxonomy for configuration, transport, decoding, and service failures.

use thiserror::Error;

/// Convenience alias used throughout the crate. The error parameter
/// defaults to [`Error`]; constructors narrow it to [`ConfigError`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure a client operation can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid construction input (region code, environment variables).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Network-level failure: DNS, refused connection, timeout.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Terminal error reported by the service in a non-200 response.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The response body could not be decoded as the expected XML shape.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Construction-time failure; never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Region code not present in the fixed endpoint table.
    #[error("unknown region `{0}`, expected one of CA, CN, DE, ES, FR, IT, JP, UK, US")]
    UnknownRegion(String),

    /// Credential environment variables that were unset or empty.
    #[error("missing environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<&'static str>),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP transport: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Application-level error parsed from a non-200 response body.
///
/// The rendered form matches the service's conventional presentation,
/// including the missing space after `Request:`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ErrorCode: {code}\nMessage: {message}\nRequest:{request_id}")]
pub struct ServiceError {
    /// Service error code, e.g. `InvalidParameterValue` or `RequestThrottled`.
    pub code: String,
    /// Human-readable description supplied by the service.
    pub message: String,
    /// Request id for support correlation; may be empty.
    pub request_id: String,
}

/// The response body was not the XML document the operation expected.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Body bytes were not valid UTF-8.
    #[error("response body is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// XML syntax error while locating the root element.
    #[error("malformed XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// The document did not deserialize into the expected shape.
    #[error("malformed XML: {0}")]
    Deserialize(#[from] quick_xml::DeError),

    /// The body contained no root element at all.
    #[error("response has no XML root element")]
    MissingRoot,

    /// A 200 response whose root tag is not the one this operation expects.
    #[error("unexpected root element `{found}`, expected `{expected}`")]
    UnexpectedRoot {
        /// Root tag the issuing operation requires.
        expected: &'static str,
        /// Root tag actually found in the document.
        found: String,
    },
}
