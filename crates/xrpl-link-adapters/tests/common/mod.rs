#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use xrpl_link_adapters::{QrModalAdapter, ScriptedPlatformAdapter, SignClientAdapter};
use xrpl_link_core::{
    AppLaunchHeuristic, AppMetadata, ClientConfig, Connector, ConnectorConfig, RedirectUrls,
    Session, SessionNamespace,
};

pub type TestConnector = Connector<SignClientAdapter, QrModalAdapter, ScriptedPlatformAdapter>;

pub const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64)";
pub const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8)";

pub fn test_config() -> ConnectorConfig {
    let client = ClientConfig {
        project_id: "test-project".to_owned(),
        metadata: AppMetadata {
            name: "xrpl-link tests".to_owned(),
            description: "connection flow tests".to_owned(),
            url: "https://example.test".to_owned(),
            icons: vec!["https://example.test/icon.png".to_owned()],
            redirect: RedirectUrls {
                native: "girinwallet://".to_owned(),
                universal: Some("https://girin.app".to_owned()),
            },
        },
    };
    let mut launch =
        AppLaunchHeuristic::new("girinwallet://", Some("https://girin.app".to_owned()));
    // Short window so mobile flows settle quickly under real time.
    launch.window = Duration::from_millis(40);
    ConnectorConfig::new(client, launch)
}

pub struct TestHarness {
    pub connector: Arc<TestConnector>,
    pub client: SignClientAdapter,
    pub modal: QrModalAdapter,
    pub platform: ScriptedPlatformAdapter,
}

pub fn new_harness(user_agent: &str) -> TestHarness {
    let client = SignClientAdapter::new();
    let modal = QrModalAdapter::default();
    let platform = ScriptedPlatformAdapter::with_user_agent(user_agent);
    let connector = Arc::new(Connector::new(
        client.clone(),
        modal.clone(),
        platform.clone(),
        test_config(),
    ));
    TestHarness {
        connector,
        client,
        modal,
        platform,
    }
}

pub fn session(topic: &str, accounts: &[&str]) -> Session {
    let mut namespaces = BTreeMap::new();
    namespaces.insert(
        "xrpl".to_owned(),
        SessionNamespace {
            accounts: accounts.iter().map(|a| (*a).to_owned()).collect(),
            methods: vec![
                "xrpl_signTransaction".to_owned(),
                "xrpl_submit".to_owned(),
            ],
            events: vec!["chainChanged".to_owned(), "accountsChanged".to_owned()],
        },
    );
    Session {
        topic: topic.to_owned(),
        namespaces,
    }
}

/// Polls `check` until it holds, panicking after a generous bound.
pub async fn eventually(what: &str, check: impl Fn() -> bool) {
    for _ in 0..500 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("timed out waiting for {what}");
}
