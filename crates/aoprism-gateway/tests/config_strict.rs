#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use aoprism_gateway::config;

const MINIMAL: &str = r#"
version: 1
characters: ["Phoenix", "Edgeworth"]
areas:
  - name: "Lobby"
"#;

#[test]
fn ok_minimal_config_fills_defaults() {
    let cfg = config::load_from_str(MINIMAL).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.tcp_listen, "0.0.0.0:27016");
    assert_eq!(cfg.server.ws_listen, "0.0.0.0:27017");
    assert_eq!(cfg.server.max_players, 100);
    assert_eq!(cfg.server.keepalive_timeout_ms, 180_000);
    assert_eq!(cfg.server.max_buffer_bytes, 1024);
    assert!(cfg.server.motd.is_none());
    assert_eq!(cfg.flood.rps, 10);
    assert_eq!(cfg.flood.burst, 20);
    assert!(cfg.music.is_empty());
    assert_eq!(cfg.areas[0].background, "default");
    assert!(cfg.areas[0].evidence.is_empty());
}

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
characters: ["Phoenix"]
areas:
  - name: "Lobby"
    backgruond: "gs4" # typo should fail
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn deny_unknown_top_level_section() {
    let bad = format!("{MINIMAL}\ndiscord:\n  token: x\n");
    assert!(config::load_from_str(&bad).is_err());
}

#[test]
fn wrong_version_is_unsupported() {
    let bad = MINIMAL.replace("version: 1", "version: 2");
    let err = config::load_from_str(&bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn empty_lists_are_rejected() {
    let no_chars = r#"
version: 1
characters: []
areas: [{ name: "Lobby" }]
"#;
    assert!(config::load_from_str(no_chars).is_err());

    let no_areas = r#"
version: 1
characters: ["Phoenix"]
areas: []
"#;
    assert!(config::load_from_str(no_areas).is_err());
}

#[test]
fn duplicate_area_names_are_rejected() {
    let bad = r#"
version: 1
characters: ["Phoenix"]
areas:
  - name: "Lobby"
  - name: "Lobby"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("duplicate area"));
}

#[test]
fn server_ranges_are_enforced() {
    for (key, value) in [
        ("keepalive_timeout_ms", "5000"),
        ("keepalive_timeout_ms", "700000"),
        ("max_buffer_bytes", "100"),
        ("max_buffer_bytes", "100000"),
        ("max_players", "0"),
    ] {
        let bad = format!("{MINIMAL}server:\n  {key}: {value}\n");
        let err = config::load_from_str(&bad).expect_err(key);
        assert_eq!(err.client_code().as_str(), "BAD_REQUEST", "{key}={value}");
    }
}

#[test]
fn zero_flood_budget_is_rejected() {
    let bad = format!("{MINIMAL}flood:\n  rps: 0\n");
    assert!(config::load_from_str(&bad).is_err());
}

#[test]
fn lookups_by_name_and_id() {
    let cfg = config::load_from_str(MINIMAL).unwrap();
    assert_eq!(cfg.area_index("Lobby"), Some(0));
    assert_eq!(cfg.area_index("lobby"), None);
    assert_eq!(cfg.character(1), Some("Edgeworth"));
    assert_eq!(cfg.character(2), None);
    assert_eq!(cfg.character(-1), None);
}
