use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::domain::DeviceClass;
use crate::ports::{ContextOpen, PlatformPort};

/// Default length of the app-launch detection window.
pub const LAUNCH_WINDOW_MS: u64 = 3000;

// encodeURIComponent leaves these unescaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Named policy for the "did the wallet app actually open" heuristic: the
/// native scheme to deep-link into, the universal fallback location, and
/// how long to watch for attention signals before giving up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLaunchHeuristic {
    pub native_scheme: String,
    pub universal_url: Option<String>,
    pub window: Duration,
}

impl AppLaunchHeuristic {
    pub fn new(native_scheme: impl Into<String>, universal_url: Option<String>) -> Self {
        Self {
            native_scheme: native_scheme.into(),
            universal_url,
            window: Duration::from_millis(LAUNCH_WINDOW_MS),
        }
    }

    /// Deep link that hands the pairing URI to the wallet app.
    pub fn deep_link(&self, pairing_uri: &str) -> String {
        format!(
            "{}wc?uri={}",
            self.native_scheme,
            utf8_percent_encode(pairing_uri, URI_COMPONENT)
        )
    }
}

/// What the detection window concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// An attention signal fired inside the window; the app appears open.
    Opened,
    /// No signal and a universal URL was configured; navigated there.
    FellBack,
    /// No signal and nowhere to fall back to.
    Undetected,
}

/// Attempts to launch the wallet app for `pairing_uri` and watches for it
/// taking the foreground.
///
/// This never returns an error: the approval wait is the true success
/// signal for the connect flow, so platform failures here are logged and
/// absorbed. The opened flag is sticky: a rapid app-switch-and-return
/// before the window elapses still suppresses the fallback redirect.
pub async fn attempt_launch<P: PlatformPort>(
    platform: &P,
    policy: &AppLaunchHeuristic,
    device: DeviceClass,
    pairing_uri: &str,
) -> LaunchOutcome {
    let href = policy.deep_link(pairing_uri);
    let mut signals = platform.attention_signals();

    match device {
        DeviceClass::MobileIos => {
            // New browsing context first; blocked contexts fall back to
            // direct navigation.
            let opened = match platform.open_new_context(&href) {
                Ok(ContextOpen::Opened) => true,
                Ok(ContextOpen::Blocked) => false,
                Err(err) => {
                    tracing::warn!(%err, "opening a new context failed");
                    false
                }
            };
            if !opened {
                if let Err(err) = platform.navigate(&href) {
                    tracing::warn!(%err, "deep link navigation failed");
                }
            }
        }
        _ => {
            if let Err(err) = platform.navigate_hidden_frame(&href).await {
                tracing::warn!(%err, "hidden-frame deep link failed");
            }
        }
    }

    let mut app_opened = false;
    let window = tokio::time::sleep(policy.window);
    tokio::pin!(window);
    loop {
        tokio::select! {
            _ = &mut window => break,
            signal = signals.recv() => match signal {
                Some(signal) => {
                    tracing::debug!(?signal, "attention signal inside launch window");
                    app_opened = true;
                }
                None => {
                    // Signal source went away; wait out the window.
                    window.as_mut().await;
                    break;
                }
            },
        }
    }
    drop(signals);

    if app_opened {
        return LaunchOutcome::Opened;
    }
    match policy.universal_url.as_deref() {
        Some(url) => {
            tracing::info!(%url, "wallet app did not open, redirecting to fallback");
            if let Err(err) = platform.navigate(url) {
                tracing::warn!(%err, "fallback navigation failed");
                return LaunchOutcome::Undetected;
            }
            LaunchOutcome::FellBack
        }
        None => LaunchOutcome::Undetected,
    }
}
