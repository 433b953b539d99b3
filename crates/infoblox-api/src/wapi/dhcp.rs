// DHCP handles
//
// lease is a read-only view of what the DHCP engine handed out.
// fixedaddress and macfilteraddress are create-only registries: the
// appliance owns their lifecycle, this client only files new entries.

use reqwest::StatusCode;
use serde_json::json;
use tracing::debug;
use urlencoding::encode;

use crate::error::Error;
use crate::wapi::client::{WapiClient, expect_status, parse_json};
use crate::wapi::models::LeaseEntry;

// ── Lease ────────────────────────────────────────────────────────────

/// Read-only handle for `lease` objects at one IP address.
pub struct Lease<'a> {
    client: &'a WapiClient,
    address: String,
}

impl<'a> Lease<'a> {
    pub(crate) fn new(client: &'a WapiClient, address: String) -> Self {
        Self { client, address }
    }
}

impl Lease<'_> {
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Fetch the lease objects at this address, projecting the given
    /// return fields (`hardware`, `network`, `discovered_data`, …). An
    /// empty slice requests the default field set. The whole matching
    /// array is returned — one address can carry leases across network
    /// views.
    pub async fn fetch(&self, return_fields: &[&str]) -> Result<Vec<LeaseEntry>, Error> {
        let mut query = format!("lease?address={}", encode(&self.address));
        if !return_fields.is_empty() {
            query.push_str("&_return_fields=");
            query.push_str(&return_fields.join(","));
        }
        let resp = self.client.get(&query).await?;
        let resp = expect_status(
            resp,
            StatusCode::OK,
            &format!("error fetching lease data for {}", self.address),
        )
        .await?;
        parse_json(resp).await
    }
}

// ── Fixed address ────────────────────────────────────────────────────

/// Client identifiers for a fixed address. At least one must be set;
/// `mac` is the usual choice.
#[derive(Debug, Clone, Default)]
pub struct FixedAddressOptions {
    pub mac: Option<String>,
    pub agent_circuit_id: Option<String>,
    pub agent_remote_id: Option<String>,
    pub dhcp_client_identifier: Option<String>,
}

impl FixedAddressOptions {
    fn is_empty(&self) -> bool {
        self.mac.is_none()
            && self.agent_circuit_id.is_none()
            && self.agent_remote_id.is_none()
            && self.dhcp_client_identifier.is_none()
    }
}

/// Create-only handle for `fixedaddress` reservations.
pub struct FixedAddress<'a> {
    client: &'a WapiClient,
}

impl<'a> FixedAddress<'a> {
    pub(crate) fn new(client: &'a WapiClient) -> Self {
        Self { client }
    }
}

impl FixedAddress<'_> {
    /// Reserve `ip` for the client identified by `options`.
    ///
    /// `POST fixedaddress`. Rejected locally when no identifier is set —
    /// the appliance would refuse the reservation anyway.
    pub async fn add(&self, ip: &str, options: &FixedAddressOptions) -> Result<(), Error> {
        if options.is_empty() {
            return Err(Error::Validation {
                field: "fixed address options",
                reason: "at least one client identifier (mac, agent circuit id, \
                         agent remote id, or dhcp client identifier) is required"
                    .into(),
            });
        }

        let mut payload = json!({ "ipv4addr": ip });
        let obj = payload
            .as_object_mut()
            .expect("json! macro always produces an object");
        if let Some(mac) = &options.mac {
            obj.insert("mac".into(), json!(mac));
        }
        if let Some(id) = &options.agent_circuit_id {
            obj.insert("agent_circuit_id".into(), json!(id));
        }
        if let Some(id) = &options.agent_remote_id {
            obj.insert("agent_remote_id".into(), json!(id));
        }
        if let Some(id) = &options.dhcp_client_identifier {
            obj.insert("dhcp_client_identifier".into(), json!(id));
        }

        debug!(ip, "creating fixed address");
        let resp = self.client.post("fixedaddress", &payload).await?;
        expect_status(
            resp,
            StatusCode::CREATED,
            &format!("could not create fixed address for {ip}"),
        )
        .await?;
        Ok(())
    }
}

// ── MAC filter ───────────────────────────────────────────────────────

/// Optional profile fields for a MAC filter entry.
#[derive(Debug, Clone, Default)]
pub struct MacFilterOptions {
    pub comment: Option<String>,
    /// Entry expiration as epoch seconds; ignored by the appliance when
    /// `never_expires` is set.
    pub expiration_time: Option<i64>,
    pub never_expires: Option<bool>,
    pub username: Option<String>,
    pub fingerprint: Option<String>,
    pub guest_first_name: Option<String>,
    pub guest_last_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub is_registered_user: Option<bool>,
}

/// Create-only handle adding entries to one named MAC filter.
pub struct MacFilter<'a> {
    client: &'a WapiClient,
    filter: String,
}

impl<'a> MacFilter<'a> {
    pub(crate) fn new(client: &'a WapiClient, filter: String) -> Self {
        Self { client, filter }
    }
}

impl MacFilter<'_> {
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Add `mac` to the filter: `POST macfilteraddress`. The filter itself
    /// must already exist on the appliance.
    pub async fn add(&self, mac: &str, options: &MacFilterOptions) -> Result<(), Error> {
        let mut payload = json!({ "filter": self.filter, "mac": mac });
        let obj = payload
            .as_object_mut()
            .expect("json! macro always produces an object");
        if let Some(comment) = &options.comment {
            obj.insert("comment".into(), json!(comment));
        }
        if let Some(ts) = options.expiration_time {
            obj.insert("expiration_time".into(), json!(ts));
        }
        if let Some(never) = options.never_expires {
            obj.insert("never_expires".into(), json!(never));
        }
        if let Some(username) = &options.username {
            obj.insert("username".into(), json!(username));
        }
        if let Some(fp) = &options.fingerprint {
            obj.insert("fingerprint".into(), json!(fp));
        }
        if let Some(first) = &options.guest_first_name {
            obj.insert("guest_first_name".into(), json!(first));
        }
        if let Some(last) = &options.guest_last_name {
            obj.insert("guest_last_name".into(), json!(last));
        }
        if let Some(email) = &options.guest_email {
            obj.insert("guest_email".into(), json!(email));
        }
        if let Some(phone) = &options.guest_phone {
            obj.insert("guest_phone".into(), json!(phone));
        }
        if let Some(registered) = options.is_registered_user {
            obj.insert("is_registered_user".into(), json!(registered));
        }

        debug!(mac, filter = %self.filter, "adding MAC filter entry");
        let resp = self.client.post("macfilteraddress", &payload).await?;
        expect_status(
            resp,
            StatusCode::CREATED,
            &format!("could not create macfilteraddress for {mac}"),
        )
        .await?;
        Ok(())
    }
}
