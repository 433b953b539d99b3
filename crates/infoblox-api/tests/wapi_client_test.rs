#![allow(clippy::unwrap_used)]
// Integration tests for `WapiClient` using wiremock.

use std::num::NonZeroU32;

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use infoblox_api::wapi::dhcp::{FixedAddressOptions, MacFilterOptions};
use infoblox_api::{Error, WapiClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, WapiClient) {
    let server = MockServer::start().await;
    let base = Url::parse(&format!("{}/wapi/v2.6.1/", server.uri())).unwrap();
    let client = WapiClient::with_client(reqwest::Client::new(), &base);
    (server, client)
}

fn wapi_path(suffix: &str) -> String {
    format!("/wapi/v2.6.1/{suffix}")
}

fn attempts(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
}

// ── Session tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_credential_probe_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:host")))
        .and(query_param("name~", "127.0.0.1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.validate_credentials(attempts(1)).await.unwrap();
}

#[tokio::test]
async fn test_credential_probe_retries_up_to_limit() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:host")))
        .respond_with(ResponseTemplate::new(401))
        .expect(3)
        .mount(&server)
        .await;

    let result = client.validate_credentials(attempts(3)).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_logout_posts_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(wapi_path("logout")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.logout().await.unwrap();
}

#[tokio::test]
async fn test_rejected_logout_is_not_fatal() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(wapi_path("logout")))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    client.logout().await.unwrap();
}

// ── Host tests ──────────────────────────────────────────────────────

const HOST_REF: &str = "record:host/ZG5zLmhvc3QkLl9kZWZhdWx0:h.example.com/default";

#[tokio::test]
async fn test_missing_host_resolves_to_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:host")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut host = client.host("h.example.com");
    let result = host.resolve().await;

    assert!(matches!(result, Err(ref e) if e.is_not_found()), "got: {result:?}");
}

#[tokio::test]
async fn test_host_add_then_fetch() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(wapi_path("record:host")))
        .and(body_json(json!({
            "name": "h.example.com",
            "ipv4addrs": [{ "ipv4addr": "10.0.0.1" }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!(HOST_REF)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:host")))
        .and(query_param("name~", "h.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": HOST_REF,
            "name": "h.example.com",
            "ipv4addrs": [{ "ipv4addr": "10.0.0.1" }],
            "view": "default"
        }])))
        .mount(&server)
        .await;

    let mut host = client.host("h.example.com");
    host.add("10.0.0.1", None).await.unwrap();

    let record = host.fetch().await.unwrap().unwrap();
    assert_eq!(record.name.as_deref(), Some("h.example.com"));
    assert_eq!(record.ipv4addrs[0].ipv4addr, "10.0.0.1");
}

#[tokio::test]
async fn test_host_add_rejected_maps_to_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(wapi_path("record:host")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "Error": "AdmConDataError: None (IBDataConflictError: IB.Data.Conflict)",
            "code": "Client.Ibap.Data.Conflict",
            "text": "The record 'h.example.com' already exists."
        })))
        .mount(&server)
        .await;

    let mut host = client.host("h.example.com");
    let result = host.add("10.0.0.1", None).await;

    match result {
        Err(Error::Api {
            ref message,
            status,
        }) => {
            assert_eq!(status, 400);
            assert!(message.contains("h.example.com"), "message: {message}");
            assert!(message.contains("already exists"), "message: {message}");
            assert!(
                message.contains("Client.Ibap.Data.Conflict"),
                "message: {message}"
            );
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_without_existing_record_fails() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:host")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut host = client.host("ghost.example.com");
    let result = host.delete().await;

    assert!(matches!(result, Err(ref e) if e.is_not_found()), "got: {result:?}");
}

#[tokio::test]
async fn test_host_update_ttl() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:host")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": HOST_REF,
            "name": "h.example.com",
            "ipv4addrs": [{ "ipv4addr": "10.0.0.1" }]
        }])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(wapi_path(HOST_REF)))
        .and(body_json(json!({ "ttl": 500 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(HOST_REF)))
        .expect(1)
        .mount(&server)
        .await;

    let mut host = client.host("h.example.com");
    host.update(None, None, Some(500)).await.unwrap();
}

#[tokio::test]
async fn test_host_update_ip_keeps_matching_mac() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:host")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": HOST_REF,
            "name": "h.example.com",
            "ipv4addrs": [{ "ipv4addr": "10.0.0.1", "mac": "aa:bb:cc:dd:ee:ff" }]
        }])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(wapi_path(HOST_REF)))
        .and(body_json(json!({
            "ipv4addrs": [{ "ipv4addr": "10.0.0.2", "mac": "aa:bb:cc:dd:ee:ff" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(HOST_REF)))
        .expect(1)
        .mount(&server)
        .await;

    let mut host = client.host("h.example.com");
    host.update(Some("10.0.0.2"), None, None).await.unwrap();
}

#[tokio::test]
async fn test_host_update_ip_drops_absent_mac() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:host")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": HOST_REF,
            "name": "h.example.com",
            "ipv4addrs": [{ "ipv4addr": "10.0.0.1" }]
        }])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(wapi_path(HOST_REF)))
        .and(body_json(json!({
            "ipv4addrs": [{ "ipv4addr": "10.0.0.2" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(HOST_REF)))
        .expect(1)
        .mount(&server)
        .await;

    let mut host = client.host("h.example.com");
    host.update(Some("10.0.0.2"), None, None).await.unwrap();
}

// ── Alias tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_alias_add_appends_to_current_list() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:host")))
        .and(query_param("_return_fields+", "aliases"))
        .and(query_param("name", "h.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": HOST_REF,
            "aliases": ["old.example.com"]
        }])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:host")))
        .and(query_param("name~", "h.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": HOST_REF
        }])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(wapi_path(HOST_REF)))
        .and(body_json(json!({
            "aliases": ["old.example.com", "new.example.com"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(HOST_REF)))
        .expect(1)
        .mount(&server)
        .await;

    let mut host = client.host("h.example.com");
    host.add_alias("new.example.com").await.unwrap();

    let aliases = host.aliases().await.unwrap();
    assert!(aliases.contains(&"old.example.com".to_string()));
}

#[tokio::test]
async fn test_alias_delete_removes_matching_entries_only() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:host")))
        .and(query_param("_return_fields+", "aliases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": HOST_REF,
            "aliases": ["www.example.com", "ftp.example.com"]
        }])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:host")))
        .and(query_param("name~", "h.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": HOST_REF
        }])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(wapi_path(HOST_REF)))
        .and(body_json(json!({ "aliases": ["ftp.example.com"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(HOST_REF)))
        .expect(1)
        .mount(&server)
        .await;

    let mut host = client.host("h.example.com");
    host.delete_alias("www").await.unwrap();
}

// ── A / CNAME tests ─────────────────────────────────────────────────

const A_REF: &str = "record:a/ZG5zLmJpbmRfYQ:a.example.com/default";

#[tokio::test]
async fn test_a_record_set_ttl_writes_only_ttl() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:a")))
        .and(query_param("name~", "a.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": A_REF,
            "name": "a.example.com",
            "ipv4addr": "10.0.0.1",
            "ttl": 500
        }])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(wapi_path(A_REF)))
        .and(body_json(json!({ "ttl": 500 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(A_REF)))
        .expect(1)
        .mount(&server)
        .await;

    let mut a = client.a_record("a.example.com");
    a.set_ttl(500).await.unwrap();

    let record = a.fetch().await.unwrap().unwrap();
    assert_eq!(record.ttl, Some(500));
}

#[tokio::test]
async fn test_a_record_add_with_ttl() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(wapi_path("record:a")))
        .and(body_json(json!({
            "name": "a.example.com",
            "ipv4addr": "10.0.0.1",
            "ttl": 300
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!(A_REF)))
        .expect(1)
        .mount(&server)
        .await;

    let mut a = client.a_record("a.example.com");
    a.add("10.0.0.1", Some(300)).await.unwrap();
}

#[tokio::test]
async fn test_cname_set_canonical_writes_only_canonical() {
    let (server, client) = setup().await;
    let cname_ref = "record:cname/ZG5zLmJpbmRfY25hbWU:alias.example.com/default";

    Mock::given(method("GET"))
        .and(path(wapi_path("record:cname")))
        .and(query_param("name~", "alias.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": cname_ref,
            "name": "alias.example.com",
            "canonical": "old.example.com"
        }])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(wapi_path(cname_ref)))
        .and(body_json(json!({ "canonical": "target.example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(cname_ref)))
        .expect(1)
        .mount(&server)
        .await;

    let mut cname = client.cname("alias.example.com");
    cname.set_canonical("target.example.com").await.unwrap();
}

// ── MX tests ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_mx_fetch_with_field_projection() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:mx")))
        .and(query_param("mail_exchanger~", "mail.example.com"))
        .and(query_param("_return_fields", "preference,ttl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": "record:mx/ZG5zLmJpbmRfbXg:example.com/default",
            "preference": 10,
            "ttl": 3600
        }])))
        .mount(&server)
        .await;

    let mx = client.mx("mail.example.com");
    let record = mx.fetch(&["preference", "ttl"]).await.unwrap().unwrap();

    assert_eq!(record.preference, Some(10));
    assert_eq!(record.ttl, Some(3600));
}

// ── SRV tests ───────────────────────────────────────────────────────

const SRV_REF: &str = "record:srv/ZG5zLmJpbmRfc3J2:_sip._tcp.example.com/default";

#[tokio::test]
async fn test_srv_add_posts_full_record() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(wapi_path("record:srv")))
        .and(body_json(json!({
            "target": "sip.example.com",
            "weight": 0,
            "name": "_sip._tcp.example.com",
            "priority": 0,
            "port": 5060
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!(SRV_REF)))
        .expect(1)
        .mount(&server)
        .await;

    let mut srv = client.srv("_sip._tcp.example.com", 5060);
    srv.add("sip.example.com", 0, 0).await.unwrap();
}

#[tokio::test]
async fn test_srv_update_preserves_unset_fields() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:srv")))
        .and(query_param("name~", "_sip._tcp.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": SRV_REF,
            "name": "_sip._tcp.example.com",
            "target": "sip.example.com",
            "port": 5060,
            "priority": 7,
            "weight": 5
        }])))
        .mount(&server)
        .await;

    // weight changes; target and priority must come back from the fetch
    Mock::given(method("PUT"))
        .and(path(wapi_path(SRV_REF)))
        .and(body_json(json!({
            "target": "sip.example.com",
            "weight": 1,
            "name": "_sip._tcp.example.com",
            "priority": 7,
            "port": 5060
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(SRV_REF)))
        .expect(1)
        .mount(&server)
        .await;

    let mut srv = client.srv("_sip._tcp.example.com", 5060);
    srv.update(None, Some(1), None).await.unwrap();
}

// ── Subnet tests ────────────────────────────────────────────────────

const NETWORK_REF: &str = "network/ZG5zLm5ldHdvcmskMTAuNC4xOS4wLzI0LzA:10.4.19.0/24/default";

#[tokio::test]
async fn test_next_available_ip_skips_gateway() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("network")))
        .and(query_param("network", "10.4.19.0/24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": NETWORK_REF,
            "network": "10.4.19.0/24"
        }])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(wapi_path(NETWORK_REF)))
        .and(query_param("_function", "next_available_ip"))
        .and(body_json(json!({ "num": 2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ips": ["10.4.19.1", "10.4.19.3"]
        })))
        .mount(&server)
        .await;

    let mut subnet = client.subnet("10.4.19.0/24");

    let network = subnet.fetch().await.unwrap().unwrap();
    assert_eq!(network.network.as_deref(), Some("10.4.19.0/24"));

    let ip = subnet.next_available_ip(2).await.unwrap().unwrap();
    assert_eq!(ip, "10.4.19.3");
    assert!(ip.parse::<std::net::Ipv4Addr>().is_ok());
}

#[tokio::test]
async fn test_next_available_ip_exhausted_pool() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("network")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": NETWORK_REF
        }])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(wapi_path(NETWORK_REF)))
        .and(query_param("_function", "next_available_ip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ips": [] })))
        .mount(&server)
        .await;

    let mut subnet = client.subnet("10.4.19.0/24");
    let ip = subnet.next_available_ip(2).await.unwrap();

    assert_eq!(ip, None);
}

// ── Lease tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_lease_fetch_with_return_fields() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("lease")))
        .and(query_param("address", "10.0.0.50"))
        .and(query_param("_return_fields", "hardware,network,starts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": "lease/ZG5zLmxlYXNlJDA:10.0.0.50/default",
            "hardware": "aa:bb:cc:dd:ee:ff",
            "network": "10.0.0.0/24",
            "starts": 1_718_000_000
        }])))
        .mount(&server)
        .await;

    let lease = client.lease("10.0.0.50");
    let entries = lease
        .fetch(&["hardware", "network", "starts"])
        .await
        .unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].hardware.as_deref(), Some("aa:bb:cc:dd:ee:ff"));
    assert_eq!(entries[0].network.as_deref(), Some("10.0.0.0/24"));
    assert_eq!(entries[0].starts.unwrap().timestamp(), 1_718_000_000);
}

// ── Grid tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_grid_restart_sends_fixed_parameters() {
    let (server, client) = setup().await;
    let grid_ref = "grid/b25lLmNsdXN0ZXIkMA:Infoblox";

    Mock::given(method("GET"))
        .and(path(wapi_path("grid")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": grid_ref
        }])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(wapi_path(grid_ref)))
        .and(query_param("_function", "restartservices"))
        .and(query_param("member_order", "SEQUENTIALLY"))
        .and(query_param("sequential_delay", "10"))
        .and(query_param("service_option", "ALL"))
        .and(query_param("restart_option", "RESTART_IF_NEEDED"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut grid = client.grid();
    grid.restart().await.unwrap();
}

// ── RPZ tests ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_rpz_cname_round_trip() {
    let (server, client) = setup().await;
    let rpz_ref = "record:rpz:cname/ZG5zLmJpbmRfY25hbWU:a.rpz.zone/default";

    Mock::given(method("POST"))
        .and(path(wapi_path("record:rpz:cname")))
        .and(body_json(json!({
            "name": "a.rpz.zone",
            "canonical": "b.example.com",
            "rp_zone": "rpz.zone",
            "view": "default"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!(rpz_ref)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:rpz:cname")))
        .and(query_param("name~", "a.rpz.zone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": rpz_ref,
            "name": "a.rpz.zone",
            "canonical": "b.example.com",
            "rp_zone": "rpz.zone",
            "view": "default"
        }])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:rpz:cname")))
        .and(query_param("name~", "a2.rpz.zone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_ref": "record:rpz:cname/ZG5zLmJpbmRfY25hbWU:a2.rpz.zone/default",
            "name": "a2.rpz.zone",
            "canonical": "c.example.com",
            "rp_zone": "rpz.zone",
            "view": "default"
        }])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(wapi_path(rpz_ref)))
        .and(body_json(json!({
            "name": "a2.rpz.zone",
            "canonical": "c.example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(rpz_ref)))
        .expect(1)
        .mount(&server)
        .await;

    let mut rule = client.rpz_cname("a");
    rule.add("b.example.com", "rpz.zone", None, None, Some("default"))
        .await
        .unwrap();

    let record = rule.fetch().await.unwrap().unwrap();
    assert_eq!(record.name.as_deref(), Some("a.rpz.zone"));
    assert_eq!(record.canonical.as_deref(), Some("b.example.com"));
    assert_eq!(record.view.as_deref(), Some("default"));

    rule.update(Some("a2"), Some("c.example.com"), None, None, None)
        .await
        .unwrap();

    let renamed = rule.fetch().await.unwrap().unwrap();
    assert_eq!(renamed.name.as_deref(), Some("a2.rpz.zone"));
    assert_eq!(renamed.canonical.as_deref(), Some("c.example.com"));
}

// ── Fixed address / MAC filter tests ────────────────────────────────

#[tokio::test]
async fn test_fixed_address_requires_an_identifier() {
    let (_server, client) = setup().await;

    let result = client
        .fixed_address()
        .add("10.0.0.9", &FixedAddressOptions::default())
        .await;

    assert!(
        matches!(result, Err(Error::Validation { .. })),
        "expected Validation error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_fixed_address_add_with_mac() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(wapi_path("fixedaddress")))
        .and(body_json(json!({
            "ipv4addr": "10.0.0.9",
            "mac": "aa:bb:cc:dd:ee:ff"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!("fixedaddress/ZG5zLmZpeGVkX2FkZHJlc3M:10.0.0.9/default")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let options = FixedAddressOptions {
        mac: Some("aa:bb:cc:dd:ee:ff".into()),
        ..FixedAddressOptions::default()
    };
    client.fixed_address().add("10.0.0.9", &options).await.unwrap();
}

#[tokio::test]
async fn test_mac_filter_add_with_profile_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(wapi_path("macfilteraddress")))
        .and(body_json(json!({
            "filter": "guests",
            "mac": "aa:bb:cc:dd:ee:ff",
            "username": "visitor",
            "never_expires": true
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!("macfilteraddress/ZG5zLm1hYw:aa%3Abb/guests")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let options = MacFilterOptions {
        username: Some("visitor".into()),
        never_expires: Some(true),
        ..MacFilterOptions::default()
    };
    client
        .mac_filter("guests")
        .add("aa:bb:cc:dd:ee:ff", &options)
        .await
        .unwrap();
}

// ── Error taxonomy tests ────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_maps_to_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client
        .a_record("a.example.com")
        .fetch()
        .await
        .unwrap_err();

    assert!(
        matches!(err, Error::Authentication { .. }),
        "expected Authentication error, got: {err:?}"
    );
    assert!(err.is_auth_rejected());
}

#[tokio::test]
async fn test_fetch_of_missing_record_is_none_not_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("record:cname")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let record = client.cname("nope.example.com").fetch().await.unwrap();
    assert!(record.is_none());
}
