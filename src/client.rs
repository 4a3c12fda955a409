//! The product client facade.
//!
//! Ties the other modules together: merges and signs parameters, sends the
//! request, decodes the response, and retries throttled attempts after a
//! fixed pause until the service answers. Each retry rebuilds the URL so
//! the timestamp and signature stay fresh.

use crate::config::{ClientConfig, Credentials};
use crate::endpoint::{Endpoint, Region};
use crate::error::{ConfigError, Error, Result};
use crate::params::Params;
use crate::request;
use crate::response::{self, Decoded, EnvelopeKind, ItemsEnvelope, ResponseEnvelope};
use crate::transport::{HttpTransport, Transport};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Pause before retrying after the service reports throttling.
const THROTTLE_BACKOFF: Duration = Duration::from_secs(1);

/// Client for the product data service.
pub struct ProductClient {
    config: ClientConfig,
    transport: Box<dyn Transport>,
}

impl ProductClient {
    /// Creates a client for a region code such as `DE` or `US`.
    pub fn new(
        region: &str,
        associate_tag: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let region: Region = region.parse()?;
        Self::with_endpoint(region.endpoint(), associate_tag, access_key_id, secret_key)
    }

    /// Creates a client for a region code, reading credentials from the
    /// `AMZ_ASSOCIATE_TAG`, `AMZ_ACCESS_KEY` and `AMZ_SECRET_KEY`
    /// environment variables.
    pub fn from_env(region: &str) -> Result<Self, ConfigError> {
        let region: Region = region.parse()?;
        let credentials = Credentials::from_env()?;
        Ok(Self {
            config: ClientConfig { endpoint: region.endpoint(), credentials },
            transport: Box::new(HttpTransport::new()?),
        })
    }

    /// Creates a client against an explicit endpoint, for alternate hosts
    /// or local test servers.
    pub fn with_endpoint(
        endpoint: Endpoint,
        associate_tag: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            config: ClientConfig {
                endpoint,
                credentials: Credentials::new(associate_tag, access_key_id, secret_key),
            },
            transport: Box::new(HttpTransport::new()?),
        })
    }

    /// Replaces the transport, keeping the configuration.
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Sends one operation and returns its envelope, retrying for as long
    /// as the service keeps throttling. The `Operation` parameter is filled
    /// in from `kind` unless the caller already set it.
    pub async fn request(
        &self,
        kind: EnvelopeKind,
        mut params: Params,
    ) -> Result<ResponseEnvelope> {
        params.set_if_absent("Operation", kind.operation());

        loop {
            let url =
                request::build_url(&self.config.endpoint, &self.config.credentials, &params);
            debug!("{} request to {}", kind, self.config.endpoint.query_host());

            let response = self.transport.send(&url).await?;
            match response::decode(kind, response.status, &response.body)? {
                Decoded::Envelope(envelope) => return Ok(envelope),
                Decoded::Throttled(error) => {
                    warn!(
                        "Request throttled ({}), retrying in {}s",
                        error.request_id,
                        THROTTLE_BACKOFF.as_secs()
                    );
                    tokio::time::sleep(THROTTLE_BACKOFF).await;
                }
                Decoded::Failure(error) => return Err(Error::Service(error)),
            }
        }
    }

    /// Looks up items by id. The caller supplies `ItemId` and any other
    /// lookup parameters.
    pub async fn item_lookup(&self, params: Params) -> Result<ItemsEnvelope> {
        Ok(self.request(EnvelopeKind::ItemLookup, params).await?.into_payload())
    }

    /// Searches the catalog. The caller supplies `SearchIndex`, `Keywords`
    /// and any other search parameters.
    pub async fn item_search(&self, params: Params) -> Result<ItemsEnvelope> {
        Ok(self.request(EnvelopeKind::ItemSearch, params).await?.into_payload())
    }

    /// Fetches items similar to the ones named in `ItemId`.
    pub async fn similarity_lookup(&self, params: Params) -> Result<ItemsEnvelope> {
        Ok(self.request(EnvelopeKind::SimilarityLookup, params).await?.into_payload())
    }

    /// Looks up a single ASIN with every response group. Parameters in
    /// `extra` override the prefilled ones.
    pub async fn item_lookup_by_asin(
        &self,
        item_id: impl Into<String>,
        extra: Params,
    ) -> Result<ItemsEnvelope> {
        let mut params = Params::new();
        params.set("Operation", "ItemLookup");
        params.set("IdType", "ASIN");
        params.set("ItemId", item_id);
        params.set("ResponseGroup", "All");
        params.merge(extra);
        self.item_lookup(params).await
    }
}

impl fmt::Debug for ProductClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductClient").field("config", &self.config).finish_non_exhaustive()
    }
}
