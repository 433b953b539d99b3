// infoblox-api: Async Rust client for the Infoblox WAPI (DNS/DHCP/IPAM)

pub mod auth;
pub mod error;
pub mod transport;
pub mod wapi;

pub use auth::Credentials;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use wapi::client::{ClientConfig, DEFAULT_VERSION, ObjectRef, WapiClient};
