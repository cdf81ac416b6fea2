use std::collections::BTreeMap;

use xrpl_link_core::{
    connection_from_session, parse_account, DeviceClass, Session, SessionNamespace, StateCell,
};

fn session(topic: &str, accounts: &[&str]) -> Session {
    let mut namespaces = BTreeMap::new();
    namespaces.insert(
        "xrpl".to_owned(),
        SessionNamespace {
            accounts: accounts.iter().map(|a| (*a).to_owned()).collect(),
            methods: vec!["xrpl_signTransaction".to_owned()],
            events: vec![],
        },
    );
    Session {
        topic: topic.to_owned(),
        namespaces,
    }
}

#[test]
fn adopting_a_session_derives_address_and_chain() {
    let state = StateCell::new();
    state.adopt_session(session("t1", &["xrpl:0:rADDR"]));

    let snapshot = state.snapshot();
    assert!(snapshot.is_connected);
    assert_eq!(snapshot.address, "rADDR");
    assert_eq!(snapshot.chain_id, "0");
    assert_eq!(state.session().expect("session stored").topic, "t1");
}

#[test]
fn disconnected_state_has_empty_identity() {
    let state = StateCell::new();
    state.adopt_session(session("t1", &["xrpl:0:rADDR"]));
    state.clear_session();

    let snapshot = state.snapshot();
    assert!(!snapshot.is_connected);
    assert!(snapshot.address.is_empty());
    assert!(snapshot.chain_id.is_empty());
    assert!(state.session().is_none());
}

#[test]
fn loading_flag_survives_session_changes() {
    let state = StateCell::new();
    state.set_loading(true);
    state.adopt_session(session("t1", &["xrpl:1:rOTHER"]));
    assert!(state.is_loading());

    state.clear_session();
    assert!(state.is_loading());

    state.set_loading(false);
    assert!(!state.is_loading());
}

#[test]
fn session_without_payment_namespace_connects_without_identity() {
    let connection = connection_from_session(&Session {
        topic: "t2".to_owned(),
        namespaces: BTreeMap::new(),
    });
    assert!(connection.is_connected);
    assert!(connection.address.is_empty());
    assert!(connection.chain_id.is_empty());
}

#[test]
fn account_entries_split_into_three_parts() {
    let parts = parse_account("xrpl:0:rADDR").expect("well-formed account");
    assert_eq!(parts.namespace, "xrpl");
    assert_eq!(parts.reference, "0");
    assert_eq!(parts.address, "rADDR");

    assert!(parse_account("xrpl:0").is_none());
    assert!(parse_account("xrpl::rADDR").is_none());
    assert!(parse_account("").is_none());
}

#[test]
fn device_class_covers_the_mobile_marker_set() {
    let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
    assert_eq!(DeviceClass::from_user_agent(iphone), DeviceClass::MobileIos);

    let android = "Mozilla/5.0 (Linux; Android 14; Pixel 8)";
    assert_eq!(
        DeviceClass::from_user_agent(android),
        DeviceClass::MobileOther
    );

    let desktop = "Mozilla/5.0 (X11; Linux x86_64)";
    assert_eq!(DeviceClass::from_user_agent(desktop), DeviceClass::Desktop);

    assert!(DeviceClass::from_user_agent("OPERA MINI browser").is_mobile());
    assert!(!DeviceClass::from_user_agent("curl/8.0").is_mobile());
}
