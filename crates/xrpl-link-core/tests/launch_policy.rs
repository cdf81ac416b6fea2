use std::time::Duration;

use xrpl_link_core::{required_namespaces, AppLaunchHeuristic, LAUNCH_WINDOW_MS};

#[test]
fn deep_links_percent_encode_the_pairing_uri() {
    let policy = AppLaunchHeuristic::new("girinwallet://", None);
    let link = policy.deep_link("wc:abc@2?relay-protocol=irn&symKey=0a1b");
    assert_eq!(
        link,
        "girinwallet://wc?uri=wc%3Aabc%402%3Frelay-protocol%3Dirn%26symKey%3D0a1b"
    );
}

#[test]
fn detection_window_defaults_to_three_seconds() {
    let policy = AppLaunchHeuristic::new("girinwallet://", Some("https://girin.app".to_owned()));
    assert_eq!(policy.window, Duration::from_millis(LAUNCH_WINDOW_MS));
    assert_eq!(policy.window, Duration::from_secs(3));
}

#[test]
fn capability_request_names_both_ledger_families() {
    let namespaces = required_namespaces();

    let xrpl = namespaces.get("xrpl").expect("xrpl namespace");
    assert_eq!(xrpl.chains, vec!["xrpl:0", "xrpl:1"]);
    assert!(xrpl
        .methods
        .iter()
        .any(|m| m == "xrpl_signTransaction"));
    assert!(xrpl.methods.iter().any(|m| m == "xrpl_submit"));
    assert!(xrpl.events.iter().any(|e| e == "accountsChanged"));
    assert!(xrpl.events.iter().any(|e| e == "chainChanged"));

    let evm = namespaces.get("eip155").expect("eip155 namespace");
    assert_eq!(evm.chains, vec!["eip155:17000"]);
    assert!(evm.methods.iter().any(|m| m == "eth_sendTransaction"));
    assert!(evm.methods.iter().any(|m| m == "personal_sign"));
}
