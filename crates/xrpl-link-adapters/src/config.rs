use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

use xrpl_link_core::{
    AppLaunchHeuristic, AppMetadata, ClientConfig, ConnectorConfig, RedirectUrls, XRPL_TESTNET,
    LAUNCH_WINDOW_MS,
};

/// Theme handed to the QR modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalConfig {
    pub theme_mode: String,
    pub theme_variables: BTreeMap<String, String>,
}

impl Default for ModalConfig {
    fn default() -> Self {
        let mut theme_variables = BTreeMap::new();
        theme_variables.insert("--wcm-background-color".to_owned(), "#292A30CC".to_owned());
        theme_variables.insert("--wcm-accent-color".to_owned(), "#34D98F".to_owned());
        Self {
            theme_mode: "dark".to_owned(),
            theme_variables,
        }
    }
}

/// Startup configuration: project credential, application metadata,
/// redirect URLs and network selection. Loaded once, at the edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    pub project_id: String,
    pub app_name: String,
    pub app_description: String,
    pub app_url: String,
    pub app_icon: String,
    pub native_redirect: String,
    pub universal_redirect: Option<String>,
    pub default_network: String,
    pub user_agent: String,
    pub launch_window_ms: u64,
    pub modal: ModalConfig,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            project_id: "YOUR_PROJECT_ID".to_owned(),
            app_name: "XRPL Link".to_owned(),
            app_description: "XRPL wallet session and payment signing".to_owned(),
            app_url: "https://example.com".to_owned(),
            app_icon: "https://example.com/icon.png".to_owned(),
            native_redirect: "girinwallet://".to_owned(),
            universal_redirect: Some("https://girin.app".to_owned()),
            default_network: XRPL_TESTNET.to_owned(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64)".to_owned(),
            launch_window_ms: LAUNCH_WINDOW_MS,
            modal: ModalConfig::default(),
        }
    }
}

fn env_or(key: &str, fallback: String) -> String {
    env::var(key).ok().filter(|v| !v.is_empty()).unwrap_or(fallback)
}

impl LinkConfig {
    /// Defaults overridden by `XRPL_LINK_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            project_id: env_or("XRPL_LINK_PROJECT_ID", defaults.project_id),
            app_name: env_or("XRPL_LINK_APP_NAME", defaults.app_name),
            app_description: env_or("XRPL_LINK_APP_DESCRIPTION", defaults.app_description),
            app_url: env_or("XRPL_LINK_APP_URL", defaults.app_url),
            app_icon: env_or("XRPL_LINK_APP_ICON", defaults.app_icon),
            native_redirect: env_or("XRPL_LINK_NATIVE_REDIRECT", defaults.native_redirect),
            universal_redirect: env::var("XRPL_LINK_UNIVERSAL_REDIRECT")
                .ok()
                .filter(|v| !v.is_empty())
                .or(defaults.universal_redirect),
            default_network: env_or("XRPL_LINK_NETWORK", defaults.default_network),
            user_agent: defaults.user_agent,
            launch_window_ms: defaults.launch_window_ms,
            modal: defaults.modal,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            project_id: self.project_id.clone(),
            metadata: AppMetadata {
                name: self.app_name.clone(),
                description: self.app_description.clone(),
                url: self.app_url.clone(),
                icons: vec![self.app_icon.clone()],
                redirect: RedirectUrls {
                    native: self.native_redirect.clone(),
                    universal: self.universal_redirect.clone(),
                },
            },
        }
    }

    pub fn launch_heuristic(&self) -> AppLaunchHeuristic {
        let mut heuristic = AppLaunchHeuristic::new(
            self.native_redirect.clone(),
            self.universal_redirect.clone(),
        );
        heuristic.window = Duration::from_millis(self.launch_window_ms);
        heuristic
    }

    pub fn connector_config(&self) -> ConnectorConfig {
        let mut config = ConnectorConfig::new(self.client_config(), self.launch_heuristic());
        config.default_network = self.default_network.clone();
        config
    }
}
