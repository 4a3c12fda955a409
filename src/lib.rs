//! amz-paapi - Signed client for the Amazon Product Advertising XML API
//!
//! Builds canonically signed query URLs, sends them over a pluggable
//! transport, decodes the XML envelopes into typed items, and waits out
//! request throttling automatically.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod params;
pub mod request;
pub mod response;
pub mod sign;
pub mod transport;

pub use client::ProductClient;
pub use config::{ClientConfig, Credentials};
pub use endpoint::{Endpoint, Region};
pub use error::{ConfigError, DecodeError, Error, Result, ServiceError};
pub use params::Params;
pub use response::{EnvelopeKind, Item, ItemsEnvelope, ResponseEnvelope};
pub use transport::{HttpTransport, RawResponse, Transport};
