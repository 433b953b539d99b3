use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Username/password pair for Basic authentication against the WAPI.
///
/// The appliance has no token endpoint — every request carries
/// `Authorization: Basic <b64(user:pass)>`, and the server-side session
/// cookie it mints is invalidated by an explicit `POST logout`.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// The `Authorization` header value for these credentials, marked
    /// sensitive so it is redacted from debug output.
    pub(crate) fn basic_header(&self) -> Result<HeaderValue, Error> {
        let token = STANDARD.encode(format!(
            "{}:{}",
            self.username,
            self.password.expose_secret()
        ));
        let mut value =
            HeaderValue::from_str(&format!("Basic {token}")).map_err(|_| Error::Validation {
                field: "credentials",
                reason: "encoded token is not a valid header value".into(),
            })?;
        value.set_sensitive(true);
        Ok(value)
    }
}
