// Session establishment and teardown
//
// Basic-auth credential validation and logout. The WAPI has no login
// endpoint: credentials ride on every request, so "login" is a probe that
// confirms they are accepted, and logout invalidates the server-side
// session cookie the probe minted.

use std::num::NonZeroU32;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::wapi::client::{ClientConfig, WapiClient};

impl WapiClient {
    /// Open a session against the appliance described by `config`.
    ///
    /// Builds the transport with the Basic token baked into the default
    /// headers, then validates the credentials by querying `record:host`
    /// for the appliance's own name with an XML `Accept` header — the
    /// probe only cares about the status, never the body. The probe
    /// repeats up to `config.max_login_attempts` times; anything other
    /// than a 200 on the last attempt is an authentication failure.
    pub async fn connect(config: ClientConfig) -> Result<Self, Error> {
        if config.host.is_empty() || config.host.contains('/') {
            return Err(Error::Validation {
                field: "host",
                reason: "expected a bare hostname or address".into(),
            });
        }
        if config.version.is_empty() {
            return Err(Error::Validation {
                field: "version",
                reason: "must not be empty".into(),
            });
        }

        let base = format!("https://{}/wapi/{}/", config.host, config.version);
        Url::parse(&base)?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, config.credentials.basic_header()?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = config.transport.build_client_with_headers(headers)?;

        let client = Self {
            http,
            base,
            host: config.host,
            version: config.version,
        };
        client
            .validate_credentials(config.max_login_attempts)
            .await?;
        Ok(client)
    }

    /// Validate the transport's credentials with the `record:host` probe.
    ///
    /// [`WapiClient::connect`] calls this automatically; call it directly
    /// on a client built with [`WapiClient::with_client`].
    pub async fn validate_credentials(&self, max_attempts: NonZeroU32) -> Result<(), Error> {
        let probe = format!("record:host?name~={}", urlencoding::encode(&self.host));
        let mut last_status = StatusCode::OK;
        for attempt in 1..=max_attempts.get() {
            debug!(attempt, host = %self.host, "validating WAPI credentials");
            let url = self.api_url(&probe)?;
            let resp = self
                .http
                .get(url)
                .header(ACCEPT, "application/xml")
                .send()
                .await
                .map_err(Error::Transport)?;
            if resp.status() == StatusCode::OK {
                debug!("credentials accepted");
                return Ok(());
            }
            last_status = resp.status();
            warn!(
                status = last_status.as_u16(),
                attempt, "credential validation failed"
            );
        }

        Err(Error::Authentication {
            message: format!("invalid credentials for {} (HTTP {last_status})", self.host),
        })
    }

    /// Invalidate the server-side session cookie with `POST logout`.
    ///
    /// A rejected logout is not fatal — the appliance expires idle
    /// sessions on its own — so only transport faults surface as errors.
    pub async fn logout(&self) -> Result<(), Error> {
        let resp = self.post_empty("logout").await?;
        let status = resp.status();
        if status.is_success() {
            debug!("logout complete");
        } else {
            warn!(status = status.as_u16(), "logout rejected");
        }
        Ok(())
    }
}
