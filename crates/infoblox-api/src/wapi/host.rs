// Host record handle
//
// record:host CRUD plus the alias list. Aliases are a sub-object of the
// host: they have no reference of their own, so every alias mutation is a
// PUT of the full replacement list against the parent host's _ref.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::StatusCode;
use serde_json::json;
use tracing::debug;
use urlencoding::encode;

use crate::error::Error;
use crate::wapi::client::{ObjectRef, WapiClient, expect_status, parse_first};
use crate::wapi::models::HostRecord;

/// Colon-separated MAC address, as the appliance stores them.
static MAC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9A-Fa-f]{2}:){5}[0-9A-Fa-f]{2}$").expect("MAC pattern is valid")
});

/// Handle for one `record:host` object, keyed by DNS name.
pub struct Host<'a> {
    client: &'a WapiClient,
    name: String,
    reference: Option<ObjectRef>,
}

impl<'a> Host<'a> {
    pub(crate) fn new(client: &'a WapiClient, name: String) -> Self {
        Self {
            client,
            name,
            reference: None,
        }
    }
}

impl Host<'_> {
    /// The DNS name this handle addresses.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve and cache the server-assigned reference for this host.
    ///
    /// `Error::NotFound` when no host matches the name — callers about to
    /// `add` should not resolve first.
    pub async fn resolve(&mut self) -> Result<ObjectRef, Error> {
        if let Some(r) = &self.reference {
            return Ok(r.clone());
        }
        let query = format!("record:host?name~={}", encode(&self.name));
        let context = format!("could not retrieve host _ref for {}", self.name);
        let reference = self
            .client
            .lookup_ref(&query, &context)
            .await?
            .ok_or_else(|| Error::NotFound {
                resource: "record:host",
                key: self.name.clone(),
            })?;
        self.reference = Some(reference.clone());
        Ok(reference)
    }

    /// Fetch the host record. `Ok(None)` when no host matches the name.
    pub async fn fetch(&self) -> Result<Option<HostRecord>, Error> {
        let query = format!("record:host?name~={}", encode(&self.name));
        let resp = self.client.get(&query).await?;
        let resp = expect_status(
            resp,
            StatusCode::OK,
            &format!("could not retrieve host record for {}", self.name),
        )
        .await?;
        parse_first(resp).await
    }

    /// Create the host record with a single address entry.
    ///
    /// `POST record:host` with `{"name", "ipv4addrs": [{"ipv4addr", "mac"?}]}`.
    pub async fn add(&mut self, ip: &str, mac: Option<&str>) -> Result<(), Error> {
        let mut entry = json!({ "ipv4addr": ip });
        if let Some(mac) = mac {
            entry["mac"] = json!(mac);
        }
        let payload = json!({ "name": self.name, "ipv4addrs": [entry] });

        debug!(name = %self.name, ip, "creating host record");
        let resp = self.client.post("record:host", &payload).await?;
        expect_status(
            resp,
            StatusCode::CREATED,
            &format!("error creating host record {ip} for {}", self.name),
        )
        .await?;
        Ok(())
    }

    /// Update ip, mac, or ttl independently.
    ///
    /// A ttl change is its own PUT. An ip-only change re-fetches the
    /// current mac and keeps it when it looks like a MAC address, so
    /// repointing a host does not drop its DHCP binding; a mac-only
    /// change re-fetches the current ip. A call with nothing set is a
    /// no-op.
    pub async fn update(
        &mut self,
        ip: Option<&str>,
        mac: Option<&str>,
        ttl: Option<u32>,
    ) -> Result<(), Error> {
        let reference = self.resolve().await?;
        let context = format!("error updating host record {}", self.name);

        if let Some(ttl) = ttl {
            let resp = self
                .client
                .put(reference.as_str(), &json!({ "ttl": ttl }))
                .await?;
            expect_status(resp, StatusCode::OK, &context).await?;
        }

        let payload = match (ip, mac) {
            (Some(ip), None) => {
                let current = self
                    .fetch()
                    .await?
                    .and_then(|h| h.ipv4addrs.into_iter().next())
                    .and_then(|a| a.mac);
                match current {
                    Some(mac) if MAC_PATTERN.is_match(&mac) => {
                        json!({ "ipv4addrs": [{ "ipv4addr": ip, "mac": mac }] })
                    }
                    _ => json!({ "ipv4addrs": [{ "ipv4addr": ip }] }),
                }
            }
            (None, Some(mac)) => {
                let current = self
                    .fetch()
                    .await?
                    .and_then(|h| h.ipv4addrs.into_iter().next())
                    .map(|a| a.ipv4addr)
                    .ok_or_else(|| Error::NotFound {
                        resource: "record:host",
                        key: self.name.clone(),
                    })?;
                json!({ "ipv4addrs": [{ "ipv4addr": current, "mac": mac }] })
            }
            (Some(ip), Some(mac)) => json!({ "ipv4addrs": [{ "ipv4addr": ip, "mac": mac }] }),
            (None, None) => return Ok(()),
        };

        debug!(name = %self.name, "updating host record");
        let resp = self.client.put(reference.as_str(), &payload).await?;
        expect_status(resp, StatusCode::OK, &context).await?;
        Ok(())
    }

    /// Delete the host record.
    pub async fn delete(&mut self) -> Result<(), Error> {
        let reference = self.resolve().await?;
        debug!(name = %self.name, "deleting host record");
        let resp = self.client.delete(reference.as_str()).await?;
        expect_status(
            resp,
            StatusCode::OK,
            &format!("error deleting host record {}", self.name),
        )
        .await?;
        self.reference = None;
        Ok(())
    }

    // ── Aliases ──────────────────────────────────────────────────────

    /// Current alias list. Empty when the host has none — aliases of an
    /// absent host are a normal empty set, not an error.
    pub async fn aliases(&self) -> Result<Vec<String>, Error> {
        let query = format!(
            "record:host?_return_fields%2B=aliases&name={}",
            encode(&self.name)
        );
        let resp = self.client.get(&query).await?;
        let resp = expect_status(
            resp,
            StatusCode::OK,
            &format!("could not retrieve aliases for {}", self.name),
        )
        .await?;
        let host: Option<HostRecord> = parse_first(resp).await?;
        Ok(host.map(|h| h.aliases).unwrap_or_default())
    }

    /// Append one alias, replacing the full list on the server.
    pub async fn add_alias(&mut self, alias: &str) -> Result<(), Error> {
        let mut aliases = self.aliases().await?;
        aliases.push(alias.to_owned());
        self.put_aliases(aliases).await
    }

    /// Remove every alias containing `alias` as a substring, replacing
    /// the full list on the server.
    pub async fn delete_alias(&mut self, alias: &str) -> Result<(), Error> {
        let aliases: Vec<String> = self
            .aliases()
            .await?
            .into_iter()
            .filter(|a| !a.contains(alias))
            .collect();
        self.put_aliases(aliases).await
    }

    async fn put_aliases(&mut self, aliases: Vec<String>) -> Result<(), Error> {
        let reference = self.resolve().await?;
        debug!(name = %self.name, count = aliases.len(), "replacing alias list");
        let resp = self
            .client
            .put(reference.as_str(), &json!({ "aliases": aliases }))
            .await?;
        expect_status(
            resp,
            StatusCode::OK,
            &format!("could not set aliases for {}", self.name),
        )
        .await?;
        Ok(())
    }
}
