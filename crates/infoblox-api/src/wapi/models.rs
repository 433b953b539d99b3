// WAPI response types
//
// Models for the JSON objects the appliance returns. Fields use
// `#[serde(default)]` liberally because the WAPI only returns the fields a
// query projects (plus a per-type default set), so almost everything is
// optional on the wire. Undocumented or projected-in fields land in the
// `extra` catch-all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Host ─────────────────────────────────────────────────────────────

/// `record:host` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostRecord {
    #[serde(rename = "_ref")]
    pub reference: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ipv4addrs: Vec<HostAddress>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub view: Option<String>,
    /// Catch-all for projected-in fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One `ipv4addr` entry inside a host record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostAddress {
    #[serde(rename = "_ref", default)]
    pub reference: Option<String>,
    pub ipv4addr: String,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub configure_for_dhcp: Option<bool>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── DNS records ──────────────────────────────────────────────────────

/// `record:a` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsARecord {
    #[serde(rename = "_ref")]
    pub reference: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ipv4addr: Option<String>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub view: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `record:cname` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsCnameRecord {
    #[serde(rename = "_ref")]
    pub reference: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub canonical: Option<String>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub view: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `record:mx` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsMxRecord {
    #[serde(rename = "_ref")]
    pub reference: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mail_exchanger: Option<String>,
    #[serde(default)]
    pub preference: Option<u32>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub view: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `record:srv` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsSrvRecord {
    #[serde(rename = "_ref")]
    pub reference: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── IPAM ─────────────────────────────────────────────────────────────

/// `network` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    #[serde(rename = "_ref")]
    pub reference: String,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub network_view: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Result of a `next_available_ip` function call.
#[derive(Debug, Clone, Deserialize)]
pub struct NextAvailableIp {
    #[serde(default)]
    pub ips: Vec<String>,
}

// ── DHCP ─────────────────────────────────────────────────────────────

/// `lease` object. `starts`/`ends` arrive as epoch seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaseEntry {
    #[serde(rename = "_ref")]
    pub reference: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub binding_state: Option<String>,
    /// Client MAC address.
    #[serde(default)]
    pub hardware: Option<String>,
    #[serde(default)]
    pub client_hostname: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub network_view: Option<String>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub starts: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub ends: Option<DateTime<Utc>>,
    /// Fingerprint / switch-port / OS data discovered by the appliance.
    #[serde(default)]
    pub discovered_data: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── RPZ ──────────────────────────────────────────────────────────────

/// `record:rpz:cname` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpzCnameRecord {
    #[serde(rename = "_ref")]
    pub reference: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub canonical: Option<String>,
    #[serde(default)]
    pub rp_zone: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub view: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Wire plumbing ────────────────────────────────────────────────────

/// Minimal projection used by reference lookups.
#[derive(Debug, Deserialize)]
pub(crate) struct RefEnvelope {
    #[serde(rename = "_ref")]
    pub reference: String,
}

/// Error body the WAPI attaches to rejected requests.
#[derive(Debug, Deserialize)]
pub(crate) struct WapiErrorBody {
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl WapiErrorBody {
    /// One-line summary: prefer the long `text`, fall back to `Error`,
    /// tagging the machine-readable code when present.
    pub(crate) fn summary(self) -> Option<String> {
        let msg = self.text.or(self.error)?;
        Some(match self.code {
            Some(code) => format!("{msg} ({code})"),
            None => msg,
        })
    }
}
