// Integration tests for device CRUD and session endpoints using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use portglass_api::{CreateDeviceRequest, Error, SwitchClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, SwitchClient) {
    let server = MockServer::start().await;
    let base: Url = server.uri().parse().expect("mock server URI");
    let client = SwitchClient::new(base, &TransportConfig::default()).expect("client");
    (server, client)
}

fn device_body(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": "edge-sw",
        "ip_address": "10.0.0.5",
        "community": "public",
        "detected_ports": 28,
        "allow_port_zero": false,
        "enabled": true,
        "config": {
            "sections": [
                { "id": "sec-1", "title": "RJ45", "type": "RJ45", "port_type": "RJ45",
                  "layout": "odd_top", "rows": 2, "port_ranges": "1-24",
                  "is_combo": false, "ports": null },
                { "id": "sec-2", "title": "Combo Section", "type": "SFP", "port_type": "SFP",
                  "layout": "odd_top", "rows": 2, "port_ranges": "1-24",
                  "is_combo": true, "ports": null }
            ]
        }
    })
}

// ── Device CRUD ─────────────────────────────────────────────────────

#[tokio::test]
async fn list_switches() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/switches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([device_body(1)])))
        .mount(&server)
        .await;

    let devices = client.list_switches().await.expect("device list");
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].name, "edge-sw");
    let sections = devices[0].config.sections.as_deref().expect("sections");
    assert_eq!(sections.len(), 2);
    assert!(sections[1].is_combo);
}

#[tokio::test]
async fn list_switches_null_body_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/switches"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let devices = client.list_switches().await.expect("device list");
    assert!(devices.is_empty());
}

#[tokio::test]
async fn create_switch_round_trip() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/switches"))
        .and(body_partial_json(json!({ "ip_address": "10.0.0.5" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(device_body(42)))
        .mount(&server)
        .await;

    let req = CreateDeviceRequest {
        name: None,
        ip_address: "10.0.0.5".into(),
        community: "public".into(),
        allow_port_zero: false,
    };
    let created = client
        .create_switch(&req, &CancellationToken::new())
        .await
        .expect("created device");
    assert_eq!(created.id, 42);
}

#[tokio::test]
async fn create_switch_is_cancellable() {
    let (server, client) = setup().await;

    // SNMP probing makes creation slow; simulate with a long delay.
    Mock::given(method("POST"))
        .and(path("/api/switches"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(device_body(1))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let req = CreateDeviceRequest {
        name: Some("slow".into()),
        ip_address: "10.0.0.9".into(),
        community: "public".into(),
        allow_port_zero: false,
    };

    let cancel = CancellationToken::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let result = client.create_switch(&req, &cancel).await;
    assert!(
        matches!(result, Err(Error::Cancelled)),
        "expected Cancelled, got: {result:?}"
    );
}

#[tokio::test]
async fn delete_switch_sends_id() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/switches"))
        .and(query_param("id", "5"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.delete_switch(5).await.expect("delete");
}

#[tokio::test]
async fn sync_switch_returns_fresh_config() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/switches/sync"))
        .and(query_param("id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(device_body(7)))
        .mount(&server)
        .await;

    let device = client.sync_switch(7).await.expect("synced device");
    assert_eq!(device.id, 7);
    assert_eq!(device.detected_ports, 28);
}

#[tokio::test]
async fn mutation_403_maps_to_forbidden() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden\n"))
        .mount(&server)
        .await;

    let result = client.delete_switch(1).await;
    assert!(
        matches!(result, Err(Error::Forbidden)),
        "expected Forbidden, got: {result:?}"
    );
}

#[tokio::test]
async fn mutation_500_carries_backend_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/switches"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Failed to create device\n"))
        .mount(&server)
        .await;

    let req = CreateDeviceRequest {
        name: None,
        ip_address: "bad".into(),
        community: "public".into(),
        allow_port_zero: false,
    };
    match client.create_switch(&req, &CancellationToken::new()).await {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Failed to create device");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Session ─────────────────────────────────────────────────────────

#[tokio::test]
async fn login_returns_session() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_partial_json(json!({ "username": "admin" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "username": "admin",
            "role": "admin",
            "password_change_required": true
        })))
        .mount(&server)
        .await;

    let session = client
        .login("admin", &SecretString::from("hunter2".to_owned()))
        .await
        .expect("session");
    assert_eq!(session.role, "admin");
    assert!(session.password_change_required);
}

#[tokio::test]
async fn rate_limited_login() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests\n"))
        .mount(&server)
        .await;

    let result = client
        .login("admin", &SecretString::from("pw".to_owned()))
        .await;
    match result {
        Err(ref e @ Error::RateLimited) => assert!(e.is_transient()),
        other => panic!("expected RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn change_password_surfaces_backend_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/change-password"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid old password\n"))
        .mount(&server)
        .await;

    let result = client
        .change_password(
            &SecretString::from("wrong".to_owned()),
            &SecretString::from("newpw123".to_owned()),
        )
        .await;
    match result {
        Err(Error::Authentication { ref message }) => assert_eq!(message, "Invalid old password"),
        other => panic!("expected Authentication, got: {other:?}"),
    }
}

#[tokio::test]
async fn me_and_logout() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "viewer", "role": "user", "password_change_required": false
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let session = client.current_session().await.expect("session");
    assert_eq!(session.username, "viewer");
    assert!(!session.password_change_required);
    client.logout().await.expect("logout");
}
