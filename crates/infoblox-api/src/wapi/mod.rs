// WAPI client modules
//
// Hand-written client for the appliance's REST endpoints. One shared
// transport (client + session), serde models, and per-domain resource
// handles: host records, DNS records, IPAM networks, DHCP objects, the
// grid master, and response policy zone rules.

pub mod client;
pub mod dhcp;
pub mod dns;
pub mod grid;
pub mod host;
pub mod ipam;
pub mod models;
pub mod rpz;
pub mod session;

pub use client::WapiClient;
