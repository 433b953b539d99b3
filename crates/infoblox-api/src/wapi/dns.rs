// DNS record handles
//
// record:a, record:cname, record:mx (read-only), and record:srv. A and
// CNAME updates are single-field by design — the WAPI replaces exactly the
// keys a PUT carries — so each updatable field gets its own setter. SRV
// updates are fetch-then-merge instead: the record is written whole, with
// omitted fields filled from the current server value.

use reqwest::StatusCode;
use serde_json::json;
use tracing::debug;
use urlencoding::encode;

use crate::error::Error;
use crate::wapi::client::{ObjectRef, WapiClient, expect_status, parse_first};
use crate::wapi::models::{DnsARecord, DnsCnameRecord, DnsMxRecord, DnsSrvRecord};

// ── A ────────────────────────────────────────────────────────────────

/// Handle for one `record:a` object, keyed by DNS name.
pub struct ARecord<'a> {
    client: &'a WapiClient,
    name: String,
    reference: Option<ObjectRef>,
}

impl<'a> ARecord<'a> {
    pub(crate) fn new(client: &'a WapiClient, name: String) -> Self {
        Self {
            client,
            name,
            reference: None,
        }
    }
}

impl ARecord<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve and cache the server-assigned reference for this record.
    pub async fn resolve(&mut self) -> Result<ObjectRef, Error> {
        if let Some(r) = &self.reference {
            return Ok(r.clone());
        }
        let query = format!("record:a?name~={}", encode(&self.name));
        let context = format!("could not retrieve A record _ref for {}", self.name);
        let reference = self
            .client
            .lookup_ref(&query, &context)
            .await?
            .ok_or_else(|| Error::NotFound {
                resource: "record:a",
                key: self.name.clone(),
            })?;
        self.reference = Some(reference.clone());
        Ok(reference)
    }

    /// Fetch the record. `Ok(None)` when no A record matches the name.
    pub async fn fetch(&self) -> Result<Option<DnsARecord>, Error> {
        let query = format!("record:a?name~={}", encode(&self.name));
        let resp = self.client.get(&query).await?;
        let resp = expect_status(
            resp,
            StatusCode::OK,
            &format!("could not retrieve A record for {}", self.name),
        )
        .await?;
        parse_first(resp).await
    }

    /// Create the record: `POST record:a`.
    pub async fn add(&mut self, ip: &str, ttl: Option<u32>) -> Result<(), Error> {
        let mut payload = json!({ "name": self.name, "ipv4addr": ip });
        if let Some(ttl) = ttl {
            payload["ttl"] = json!(ttl);
        }
        debug!(name = %self.name, ip, "creating A record");
        let resp = self.client.post("record:a", &payload).await?;
        expect_status(
            resp,
            StatusCode::CREATED,
            &format!("could not create A record for {}", self.name),
        )
        .await?;
        Ok(())
    }

    /// Point the record at a new address.
    pub async fn set_ipv4addr(&mut self, ip: &str) -> Result<(), Error> {
        let reference = self.resolve().await?;
        debug!(name = %self.name, ip, "updating A record address");
        let resp = self
            .client
            .put(reference.as_str(), &json!({ "ipv4addr": ip }))
            .await?;
        expect_status(
            resp,
            StatusCode::OK,
            &format!("could not update A record for {}", self.name),
        )
        .await?;
        Ok(())
    }

    /// Change the record's time-to-live.
    pub async fn set_ttl(&mut self, ttl: u32) -> Result<(), Error> {
        let reference = self.resolve().await?;
        debug!(name = %self.name, ttl, "updating A record ttl");
        let resp = self
            .client
            .put(reference.as_str(), &json!({ "ttl": ttl }))
            .await?;
        expect_status(
            resp,
            StatusCode::OK,
            &format!("could not update A record for {}", self.name),
        )
        .await?;
        Ok(())
    }

    /// Delete the record.
    pub async fn delete(&mut self) -> Result<(), Error> {
        let reference = self.resolve().await?;
        debug!(name = %self.name, "deleting A record");
        let resp = self.client.delete(reference.as_str()).await?;
        expect_status(
            resp,
            StatusCode::OK,
            &format!("could not delete A record for {}", self.name),
        )
        .await?;
        self.reference = None;
        Ok(())
    }
}

// ── CNAME ────────────────────────────────────────────────────────────

/// Handle for one `record:cname` object, keyed by DNS name.
pub struct Cname<'a> {
    client: &'a WapiClient,
    name: String,
    reference: Option<ObjectRef>,
}

impl<'a> Cname<'a> {
    pub(crate) fn new(client: &'a WapiClient, name: String) -> Self {
        Self {
            client,
            name,
            reference: None,
        }
    }
}

impl Cname<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve and cache the server-assigned reference for this record.
    pub async fn resolve(&mut self) -> Result<ObjectRef, Error> {
        if let Some(r) = &self.reference {
            return Ok(r.clone());
        }
        let query = format!("record:cname?name~={}", encode(&self.name));
        let context = format!("could not retrieve CNAME _ref for {}", self.name);
        let reference = self
            .client
            .lookup_ref(&query, &context)
            .await?
            .ok_or_else(|| Error::NotFound {
                resource: "record:cname",
                key: self.name.clone(),
            })?;
        self.reference = Some(reference.clone());
        Ok(reference)
    }

    /// Fetch the record. `Ok(None)` when no CNAME matches the name.
    pub async fn fetch(&self) -> Result<Option<DnsCnameRecord>, Error> {
        let query = format!("record:cname?name~={}", encode(&self.name));
        let resp = self.client.get(&query).await?;
        let resp = expect_status(
            resp,
            StatusCode::OK,
            &format!("could not retrieve CNAME record for {}", self.name),
        )
        .await?;
        parse_first(resp).await
    }

    /// Create the record: `POST record:cname`.
    pub async fn add(&mut self, canonical: &str, ttl: Option<u32>) -> Result<(), Error> {
        let mut payload = json!({ "name": self.name, "canonical": canonical });
        if let Some(ttl) = ttl {
            payload["ttl"] = json!(ttl);
        }
        debug!(name = %self.name, canonical, "creating CNAME record");
        let resp = self.client.post("record:cname", &payload).await?;
        expect_status(
            resp,
            StatusCode::CREATED,
            &format!("could not create CNAME record for {}", self.name),
        )
        .await?;
        Ok(())
    }

    /// Repoint the record at a new canonical name.
    pub async fn set_canonical(&mut self, canonical: &str) -> Result<(), Error> {
        let reference = self.resolve().await?;
        debug!(name = %self.name, canonical, "updating CNAME target");
        let resp = self
            .client
            .put(reference.as_str(), &json!({ "canonical": canonical }))
            .await?;
        expect_status(
            resp,
            StatusCode::OK,
            &format!("could not update CNAME record for {}", self.name),
        )
        .await?;
        Ok(())
    }

    /// Change the record's time-to-live.
    pub async fn set_ttl(&mut self, ttl: u32) -> Result<(), Error> {
        let reference = self.resolve().await?;
        debug!(name = %self.name, ttl, "updating CNAME ttl");
        let resp = self
            .client
            .put(reference.as_str(), &json!({ "ttl": ttl }))
            .await?;
        expect_status(
            resp,
            StatusCode::OK,
            &format!("could not update CNAME record for {}", self.name),
        )
        .await?;
        Ok(())
    }

    /// Delete the record.
    pub async fn delete(&mut self) -> Result<(), Error> {
        let reference = self.resolve().await?;
        debug!(name = %self.name, "deleting CNAME record");
        let resp = self.client.delete(reference.as_str()).await?;
        expect_status(
            resp,
            StatusCode::OK,
            &format!("could not delete CNAME record for {}", self.name),
        )
        .await?;
        self.reference = None;
        Ok(())
    }
}

// ── MX ───────────────────────────────────────────────────────────────

/// Read-only handle for `record:mx` objects, keyed by mail exchanger.
pub struct Mx<'a> {
    client: &'a WapiClient,
    mail_exchanger: String,
    reference: Option<ObjectRef>,
}

impl<'a> Mx<'a> {
    pub(crate) fn new(client: &'a WapiClient, mail_exchanger: String) -> Self {
        Self {
            client,
            mail_exchanger,
            reference: None,
        }
    }
}

impl Mx<'_> {
    pub fn mail_exchanger(&self) -> &str {
        &self.mail_exchanger
    }

    /// Resolve and cache the server-assigned reference for this record.
    pub async fn resolve(&mut self) -> Result<ObjectRef, Error> {
        if let Some(r) = &self.reference {
            return Ok(r.clone());
        }
        let query = format!(
            "record:mx?mail_exchanger~={}",
            encode(&self.mail_exchanger)
        );
        let context = format!(
            "could not retrieve MX record _ref for {}",
            self.mail_exchanger
        );
        let reference = self
            .client
            .lookup_ref(&query, &context)
            .await?
            .ok_or_else(|| Error::NotFound {
                resource: "record:mx",
                key: self.mail_exchanger.clone(),
            })?;
        self.reference = Some(reference.clone());
        Ok(reference)
    }

    /// Fetch the record, optionally projecting specific return fields with
    /// `_return_fields=`. An empty slice requests the default field set.
    pub async fn fetch(&self, return_fields: &[&str]) -> Result<Option<DnsMxRecord>, Error> {
        let mut query = format!(
            "record:mx?mail_exchanger~={}",
            encode(&self.mail_exchanger)
        );
        if !return_fields.is_empty() {
            query.push_str("&_return_fields=");
            query.push_str(&return_fields.join(","));
        }
        let resp = self.client.get(&query).await?;
        let resp = expect_status(
            resp,
            StatusCode::OK,
            &format!(
                "could not retrieve MX record for {}",
                self.mail_exchanger
            ),
        )
        .await?;
        parse_first(resp).await
    }
}

// ── SRV ──────────────────────────────────────────────────────────────

/// Handle for one `record:srv` object. The service port is fixed at
/// construction and written back on every update.
pub struct Srv<'a> {
    client: &'a WapiClient,
    name: String,
    port: u16,
    reference: Option<ObjectRef>,
}

impl<'a> Srv<'a> {
    pub(crate) fn new(client: &'a WapiClient, name: String, port: u16) -> Self {
        Self {
            client,
            name,
            port,
            reference: None,
        }
    }
}

impl Srv<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Resolve and cache the server-assigned reference for this record.
    pub async fn resolve(&mut self) -> Result<ObjectRef, Error> {
        if let Some(r) = &self.reference {
            return Ok(r.clone());
        }
        let query = format!("record:srv?name~={}", encode(&self.name));
        let context = format!("could not retrieve SRV _ref for {}", self.name);
        let reference = self
            .client
            .lookup_ref(&query, &context)
            .await?
            .ok_or_else(|| Error::NotFound {
                resource: "record:srv",
                key: self.name.clone(),
            })?;
        self.reference = Some(reference.clone());
        Ok(reference)
    }

    /// Fetch the record. `Ok(None)` when no SRV record matches the name.
    pub async fn fetch(&self) -> Result<Option<DnsSrvRecord>, Error> {
        let query = format!("record:srv?name~={}", encode(&self.name));
        let resp = self.client.get(&query).await?;
        let resp = expect_status(
            resp,
            StatusCode::OK,
            &format!("could not retrieve SRV record for {}", self.name),
        )
        .await?;
        parse_first(resp).await
    }

    /// Create the record: `POST record:srv` with the full field set.
    pub async fn add(&mut self, target: &str, weight: u32, priority: u32) -> Result<(), Error> {
        let payload = json!({
            "target": target,
            "weight": weight,
            "name": self.name,
            "priority": priority,
            "port": self.port,
        });
        debug!(name = %self.name, target, "creating SRV record");
        let resp = self.client.post("record:srv", &payload).await?;
        expect_status(
            resp,
            StatusCode::CREATED,
            &format!("error creating SRV record {}", self.name),
        )
        .await?;
        Ok(())
    }

    /// Update target, weight, or priority.
    ///
    /// The WAPI requires the full record on PUT, so omitted fields are
    /// filled from the current server value first (two round trips). The
    /// read and the write are not atomic: a concurrent writer between them
    /// is silently overwritten.
    pub async fn update(
        &mut self,
        target: Option<&str>,
        weight: Option<u32>,
        priority: Option<u32>,
    ) -> Result<(), Error> {
        let reference = self.resolve().await?;
        let current = self.fetch().await?.ok_or_else(|| Error::NotFound {
            resource: "record:srv",
            key: self.name.clone(),
        })?;

        let payload = json!({
            "target": target.map_or_else(|| current.target.unwrap_or_default(), ToOwned::to_owned),
            "weight": weight.or(current.weight).unwrap_or_default(),
            "name": self.name,
            "priority": priority.or(current.priority).unwrap_or_default(),
            "port": self.port,
        });

        debug!(name = %self.name, "updating SRV record");
        let resp = self.client.put(reference.as_str(), &payload).await?;
        expect_status(
            resp,
            StatusCode::OK,
            &format!("error updating SRV record {}", self.name),
        )
        .await?;
        Ok(())
    }

    /// Delete the record.
    pub async fn delete(&mut self) -> Result<(), Error> {
        let reference = self.resolve().await?;
        debug!(name = %self.name, "deleting SRV record");
        let resp = self.client.delete(reference.as_str()).await?;
        expect_status(
            resp,
            StatusCode::OK,
            &format!("error deleting SRV record {}", self.name),
        )
        .await?;
        self.reference = None;
        Ok(())
    }
}
