// IPAM handles
//
// network objects are provisioned outside this library; the subnet handle
// resolves the network's reference and asks the appliance for free
// addresses through the next_available_ip function call.

use reqwest::StatusCode;
use serde_json::json;
use tracing::debug;
use urlencoding::encode;

use crate::error::Error;
use crate::wapi::client::{ObjectRef, WapiClient, expect_status, parse_first, parse_json};
use crate::wapi::models::{Network, NextAvailableIp};

/// Handle for one `network` object, keyed by CIDR (e.g. `10.4.19.0/24`).
pub struct Subnet<'a> {
    client: &'a WapiClient,
    cidr: String,
    reference: Option<ObjectRef>,
}

impl<'a> Subnet<'a> {
    pub(crate) fn new(client: &'a WapiClient, cidr: String) -> Self {
        Self {
            client,
            cidr,
            reference: None,
        }
    }
}

impl Subnet<'_> {
    pub fn cidr(&self) -> &str {
        &self.cidr
    }

    /// Resolve and cache the network's reference (exact `network=` match).
    pub async fn resolve(&mut self) -> Result<ObjectRef, Error> {
        if let Some(r) = &self.reference {
            return Ok(r.clone());
        }
        let query = format!("network?network={}", encode(&self.cidr));
        let context = format!("error getting subnet ID for subnet {}", self.cidr);
        let reference = self
            .client
            .lookup_ref(&query, &context)
            .await?
            .ok_or_else(|| Error::NotFound {
                resource: "network",
                key: self.cidr.clone(),
            })?;
        self.reference = Some(reference.clone());
        Ok(reference)
    }

    /// Fetch the network object. `Ok(None)` when the CIDR is not managed
    /// by the appliance.
    pub async fn fetch(&self) -> Result<Option<Network>, Error> {
        let query = format!("network?network={}", encode(&self.cidr));
        let resp = self.client.get(&query).await?;
        let resp = expect_status(
            resp,
            StatusCode::OK,
            &format!("error fetching network {}", self.cidr),
        )
        .await?;
        parse_first(resp).await
    }

    /// Ask the appliance for `offset` candidate free addresses and return
    /// the one at position `offset` (1-based). The appliance reports
    /// candidates in order and the first is conventionally the subnet's
    /// gateway, so callers usually pass at least 2 to skip gear not
    /// tracked in IPAM. `Ok(None)` when the pool is exhausted.
    pub async fn next_available_ip(&mut self, offset: usize) -> Result<Option<String>, Error> {
        if offset == 0 {
            return Err(Error::Validation {
                field: "offset",
                reason: "must be at least 1".into(),
            });
        }
        let reference = self.resolve().await?;
        let path = format!("{reference}?_function=next_available_ip");

        debug!(cidr = %self.cidr, offset, "requesting next available ip");
        let resp = self.client.post(&path, &json!({ "num": offset })).await?;
        let resp = expect_status(
            resp,
            StatusCode::OK,
            &format!("error retrieving next available address in {}", self.cidr),
        )
        .await?;
        let result: NextAvailableIp = parse_json(resp).await?;
        Ok(result.ips.into_iter().nth(offset - 1))
    }
}
