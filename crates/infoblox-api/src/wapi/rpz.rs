// Response Policy Zone handle
//
// record:rpz:cname rules redirect or block names inside an RPZ. The
// handle is keyed by the unqualified label; the zone learned at add time
// (or looked up from an existing rule) qualifies the name for subsequent
// operations.

use reqwest::StatusCode;
use serde_json::json;
use tracing::debug;
use urlencoding::encode;

use crate::error::Error;
use crate::wapi::client::{ObjectRef, WapiClient, expect_status, parse_first};
use crate::wapi::models::RpzCnameRecord;

/// Handle for one `record:rpz:cname` rule.
pub struct RpzCname<'a> {
    client: &'a WapiClient,
    label: String,
    zone: Option<String>,
    reference: Option<ObjectRef>,
}

impl<'a> RpzCname<'a> {
    pub(crate) fn new(client: &'a WapiClient, label: String) -> Self {
        Self {
            client,
            label,
            zone: None,
            reference: None,
        }
    }
}

impl RpzCname<'_> {
    /// The unqualified label this handle addresses.
    pub fn name(&self) -> &str {
        &self.label
    }

    /// The rule name as the zone file knows it, once the zone is known.
    fn qualified_name(&self) -> String {
        match &self.zone {
            Some(zone) => format!("{}.{zone}", self.label),
            None => self.label.clone(),
        }
    }

    /// Resolve and cache the server-assigned reference for this rule.
    pub async fn resolve(&mut self) -> Result<ObjectRef, Error> {
        if let Some(r) = &self.reference {
            return Ok(r.clone());
        }
        let name = self.qualified_name();
        let query = format!("record:rpz:cname?name~={}", encode(&name));
        let context = format!("could not retrieve RPZ CNAME _ref for {name}");
        let reference = self
            .client
            .lookup_ref(&query, &context)
            .await?
            .ok_or_else(|| Error::NotFound {
                resource: "record:rpz:cname",
                key: name,
            })?;
        self.reference = Some(reference.clone());
        Ok(reference)
    }

    /// Fetch the rule. `Ok(None)` when no rule matches.
    pub async fn fetch(&self) -> Result<Option<RpzCnameRecord>, Error> {
        let name = self.qualified_name();
        let query = format!("record:rpz:cname?name~={}", encode(&name));
        let resp = self.client.get(&query).await?;
        let resp = expect_status(
            resp,
            StatusCode::OK,
            &format!("could not retrieve RPZ CNAME record for {name}"),
        )
        .await?;
        parse_first(resp).await
    }

    /// Create the rule: `POST record:rpz:cname` with
    /// `name = {label}.{rp_zone}`. On success the zone is remembered so
    /// later calls address the rule by its qualified name.
    pub async fn add(
        &mut self,
        canonical: &str,
        rp_zone: &str,
        comment: Option<&str>,
        ttl: Option<u32>,
        view: Option<&str>,
    ) -> Result<(), Error> {
        let mut payload = json!({
            "name": format!("{}.{rp_zone}", self.label),
            "canonical": canonical,
            "rp_zone": rp_zone,
        });
        let obj = payload
            .as_object_mut()
            .expect("json! macro always produces an object");
        if let Some(comment) = comment {
            obj.insert("comment".into(), json!(comment));
        }
        if let Some(ttl) = ttl {
            obj.insert("ttl".into(), json!(ttl));
        }
        if let Some(view) = view {
            obj.insert("view".into(), json!(view));
        }

        debug!(label = %self.label, rp_zone, canonical, "creating RPZ CNAME rule");
        let resp = self.client.post("record:rpz:cname", &payload).await?;
        expect_status(
            resp,
            StatusCode::CREATED,
            &format!("could not create RPZ CNAME record for {}", self.label),
        )
        .await?;
        self.zone = Some(rp_zone.to_owned());
        Ok(())
    }

    /// Field-level partial update via PUT on the rule's reference.
    ///
    /// `name` takes the unqualified new label; the qualified name is
    /// rebuilt with the rule's zone. A successful rename re-keys the
    /// handle and drops the cached reference, since the server reissues
    /// it. A call with nothing set is a no-op.
    pub async fn update(
        &mut self,
        name: Option<&str>,
        canonical: Option<&str>,
        comment: Option<&str>,
        ttl: Option<u32>,
        view: Option<&str>,
    ) -> Result<(), Error> {
        let reference = self.resolve().await?;

        let mut payload = json!({});
        let obj = payload
            .as_object_mut()
            .expect("json! macro always produces an object");
        if let Some(label) = name {
            let zone = self.ensure_zone().await?;
            obj.insert("name".into(), json!(format!("{label}.{zone}")));
        }
        if let Some(canonical) = canonical {
            obj.insert("canonical".into(), json!(canonical));
        }
        if let Some(comment) = comment {
            obj.insert("comment".into(), json!(comment));
        }
        if let Some(ttl) = ttl {
            obj.insert("ttl".into(), json!(ttl));
        }
        if let Some(view) = view {
            obj.insert("view".into(), json!(view));
        }
        if obj.is_empty() {
            return Ok(());
        }

        debug!(name = %self.qualified_name(), "updating RPZ CNAME rule");
        let resp = self.client.put(reference.as_str(), &payload).await?;
        expect_status(
            resp,
            StatusCode::OK,
            &format!("could not update RPZ CNAME record for {}", self.label),
        )
        .await?;

        if let Some(label) = name {
            self.label = label.to_owned();
            self.reference = None;
        }
        Ok(())
    }

    /// Delete the rule.
    pub async fn delete(&mut self) -> Result<(), Error> {
        let reference = self.resolve().await?;
        debug!(name = %self.qualified_name(), "deleting RPZ CNAME rule");
        let resp = self.client.delete(reference.as_str()).await?;
        expect_status(
            resp,
            StatusCode::OK,
            &format!("could not delete RPZ CNAME record for {}", self.label),
        )
        .await?;
        self.reference = None;
        Ok(())
    }

    /// The zone this rule lives in, looked up from the server when the
    /// handle was constructed for a pre-existing rule.
    async fn ensure_zone(&mut self) -> Result<String, Error> {
        if let Some(zone) = &self.zone {
            return Ok(zone.clone());
        }
        let query = format!(
            "record:rpz:cname?name~={}&_return_fields%2B=rp_zone",
            encode(&self.qualified_name())
        );
        let resp = self.client.get(&query).await?;
        let resp = expect_status(
            resp,
            StatusCode::OK,
            &format!("could not retrieve zone for {}", self.label),
        )
        .await?;
        let record: Option<RpzCnameRecord> = parse_first(resp).await?;
        let zone = record
            .and_then(|r| r.rp_zone)
            .ok_or_else(|| Error::NotFound {
                resource: "record:rpz:cname",
                key: self.label.clone(),
            })?;
        self.zone = Some(zone.clone());
        Ok(zone)
    }
}
