// WAPI HTTP client
//
// Wraps `reqwest::Client` with WAPI-specific URL construction, exact
// expected-status checking, and first-element JSON parsing. Resource
// handles (host, dns, ipam, dhcp, grid, rpz) are implemented in separate
// files to keep this module focused on transport mechanics.

use std::fmt;
use std::num::NonZeroU32;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::wapi::dhcp::{FixedAddress, Lease, MacFilter};
use crate::wapi::dns::{ARecord, Cname, Mx, Srv};
use crate::wapi::grid::Grid;
use crate::wapi::host::Host;
use crate::wapi::ipam::Subnet;
use crate::wapi::models::{RefEnvelope, WapiErrorBody};
use crate::wapi::rpz::RpzCname;

/// WAPI version used when the config does not name one.
pub const DEFAULT_VERSION: &str = "v2.6.1";

/// Everything needed to open a WAPI session.
///
/// All fields are required up front — construction fails fast on bad
/// values. Interactive credential prompting belongs to the calling
/// application, not this crate.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Appliance hostname or address (no scheme, no path).
    pub host: String,
    /// WAPI version path segment, e.g. `v2.6.1`.
    pub version: String,
    pub credentials: Credentials,
    pub transport: TransportConfig,
    /// How many times [`WapiClient::connect`] repeats the credential probe
    /// before giving up. Deployments that historically looped on a prompt
    /// set this higher and feed a fresh config per attempt.
    pub max_login_attempts: NonZeroU32,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            host: host.into(),
            version: DEFAULT_VERSION.into(),
            credentials,
            transport: TransportConfig::default(),
            max_login_attempts: NonZeroU32::MIN,
        }
    }
}

/// Server-assigned `_ref`: an opaque path token addressing one object
/// instance, used verbatim as the request path for update and delete.
///
/// A handle caches at most one. The cached value goes stale if the remote
/// object is renamed or deleted out-of-band; no revalidation is performed,
/// and the next mutating call fails with the server's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef(pub(crate) String);

impl ObjectRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authenticated WAPI client.
///
/// Immutable once connected: base URL, version, and the Basic token (baked
/// into the HTTP client's default headers) never change. Resource handles
/// borrow the client, so one session serves any number of handles.
pub struct WapiClient {
    pub(crate) http: reqwest::Client,
    /// `https://{host}/wapi/{version}/`
    pub(crate) base: String,
    pub(crate) host: String,
    pub(crate) version: String,
}

impl WapiClient {
    /// Create a client from a pre-built `reqwest::Client` and a full WAPI
    /// base URL of the shape `{scheme}://{host}/wapi/{version}/`.
    ///
    /// Use this when the transport already carries its Authorization
    /// header, or under test against a mock server. [`WapiClient::connect`]
    /// is the normal entry point.
    pub fn with_client(http: reqwest::Client, base_url: &Url) -> Self {
        let host = base_url.host_str().unwrap_or_default().to_owned();
        let version = base_url
            .path_segments()
            .into_iter()
            .flatten()
            .nth(1)
            .unwrap_or_default()
            .to_owned();
        let mut base = base_url.as_str().to_owned();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self {
            http,
            base,
            host,
            version,
        }
    }

    /// The WAPI base URL every request is issued against.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// The WAPI version path segment this session targets.
    pub fn version(&self) -> &str {
        &self.version
    }

    // ── URL building ─────────────────────────────────────────────────

    /// Build a full URL for a WAPI path (object type, `_ref`, or either
    /// with a query string). WAPI paths contain `:` so they must be
    /// concatenated, never `Url::join`ed — a joined `record:host` would
    /// parse `record` as a scheme.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(&format!("{}{}", self.base, path)).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    pub(crate) async fn get(&self, path: &str) -> Result<reqwest::Response, Error> {
        let url = self.api_url(path)?;
        debug!("GET {}", url);
        self.http.get(url).send().await.map_err(Error::Transport)
    }

    pub(crate) async fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, Error> {
        let url = self.api_url(path)?;
        debug!("POST {}", url);
        self.http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)
    }

    /// POST with an empty body — used for `_function` calls that take all
    /// their arguments in the query string, and for `logout`.
    pub(crate) async fn post_empty(&self, path: &str) -> Result<reqwest::Response, Error> {
        let url = self.api_url(path)?;
        debug!("POST {}", url);
        self.http.post(url).send().await.map_err(Error::Transport)
    }

    pub(crate) async fn put(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, Error> {
        let url = self.api_url(path)?;
        debug!("PUT {}", url);
        self.http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<reqwest::Response, Error> {
        let url = self.api_url(path)?;
        debug!("DELETE {}", url);
        self.http.delete(url).send().await.map_err(Error::Transport)
    }

    // ── Reference resolution ─────────────────────────────────────────

    /// Resolve a single object's `_ref` through a collection query.
    ///
    /// `Ok(None)` means the query matched nothing — a normal outcome at
    /// handle construction time, since the caller may be about to `add`
    /// the object. A rejected request is an error.
    pub(crate) async fn lookup_ref(
        &self,
        query: &str,
        context: &str,
    ) -> Result<Option<ObjectRef>, Error> {
        let resp = self.get(query).await?;
        let resp = expect_status(resp, StatusCode::OK, context).await?;
        let found: Option<RefEnvelope> = parse_first(resp).await?;
        Ok(found.map(|r| ObjectRef(r.reference)))
    }

    // ── Resource handles ─────────────────────────────────────────────

    /// Handle for a `record:host` object.
    pub fn host(&self, name: impl Into<String>) -> Host<'_> {
        Host::new(self, name.into())
    }

    /// Handle for a `record:a` object.
    pub fn a_record(&self, name: impl Into<String>) -> ARecord<'_> {
        ARecord::new(self, name.into())
    }

    /// Handle for a `record:cname` object.
    pub fn cname(&self, name: impl Into<String>) -> Cname<'_> {
        Cname::new(self, name.into())
    }

    /// Handle for a `record:mx` object (read-only).
    pub fn mx(&self, mail_exchanger: impl Into<String>) -> Mx<'_> {
        Mx::new(self, mail_exchanger.into())
    }

    /// Handle for a `record:srv` object. The port is fixed per handle.
    pub fn srv(&self, name: impl Into<String>, port: u16) -> Srv<'_> {
        Srv::new(self, name.into(), port)
    }

    /// Handle for a `network` object, keyed by CIDR.
    pub fn subnet(&self, cidr: impl Into<String>) -> Subnet<'_> {
        Subnet::new(self, cidr.into())
    }

    /// Handle for `lease` objects at one address (read-only).
    pub fn lease(&self, address: impl Into<String>) -> Lease<'_> {
        Lease::new(self, address.into())
    }

    /// Handle for the grid master.
    pub fn grid(&self) -> Grid<'_> {
        Grid::new(self)
    }

    /// Handle for a `record:rpz:cname` object, keyed by its unqualified
    /// label within the response policy zone.
    pub fn rpz_cname(&self, name: impl Into<String>) -> RpzCname<'_> {
        RpzCname::new(self, name.into())
    }

    /// Handle for creating `fixedaddress` reservations.
    pub fn fixed_address(&self) -> FixedAddress<'_> {
        FixedAddress::new(self)
    }

    /// Handle for adding entries to the named MAC filter.
    pub fn mac_filter(&self, filter: impl Into<String>) -> MacFilter<'_> {
        MacFilter::new(self, filter.into())
    }
}

// ── Response helpers ─────────────────────────────────────────────────

/// Check the exact status the WAPI documents for this call (201 create,
/// 200 everything else); anything different becomes an error whose message
/// embeds the operand context, the status, and any detail the WAPI error
/// body carried.
pub(crate) async fn expect_status(
    resp: reqwest::Response,
    expected: StatusCode,
    context: &str,
) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status == expected {
        return Ok(resp);
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Authentication {
            message: format!("{context} - Status {status}"),
        });
    }

    let body = resp.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<WapiErrorBody>(&body)
        .ok()
        .and_then(WapiErrorBody::summary)
        .unwrap_or(body);
    let message = if detail.is_empty() {
        format!("{context} - Status {status}")
    } else {
        format!("{context} - Status {status}: {detail}")
    };
    Err(Error::Api {
        message,
        status: status.as_u16(),
    })
}

/// Deserialize a whole response body.
pub(crate) async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let body = resp.text().await.map_err(Error::Transport)?;
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.clone(),
    })
}

/// Parse a collection response and take element 0. An empty result array
/// maps to `None`: the object not existing is a normal outcome, distinct
/// from a rejected request.
pub(crate) async fn parse_first<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<Option<T>, Error> {
    let items: Vec<T> = parse_json(resp).await?;
    Ok(items.into_iter().next())
}
