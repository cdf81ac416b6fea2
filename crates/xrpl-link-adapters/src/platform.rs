use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::mpsc;

use xrpl_link_core::{AttentionSignal, ContextOpen, PlatformPort, PortError};

/// Platform adapter for native hosts. Deep links and fallback URLs are
/// handed to the OS opener; attention signals never fire here because a
/// native process cannot observe the browser-style visibility events, so
/// the launch window simply runs out.
#[derive(Debug)]
pub struct NativePlatformAdapter {
    user_agent: String,
    // Held so subscribed channels stay open for the detection window.
    signal_senders: Mutex<Vec<mpsc::UnboundedSender<AttentionSignal>>>,
}

impl NativePlatformAdapter {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            signal_senders: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PlatformPort for NativePlatformAdapter {
    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn open_new_context(&self, url: &str) -> Result<ContextOpen, PortError> {
        open::that(url)
            .map(|_| ContextOpen::Opened)
            .map_err(|e| PortError::Transport(format!("opening {url} failed: {e}")))
    }

    fn navigate(&self, url: &str) -> Result<(), PortError> {
        open::that(url).map_err(|e| PortError::Transport(format!("opening {url} failed: {e}")))
    }

    async fn navigate_hidden_frame(&self, url: &str) -> Result<(), PortError> {
        // No frames outside an embedded webview; the OS opener is the
        // native equivalent of the transient frame.
        self.navigate(url)
    }

    fn attention_signals(&self) -> mpsc::UnboundedReceiver<AttentionSignal> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.signal_senders
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(sender);
        receiver
    }
}

/// Scriptable platform for exercising the launch detector and the device
/// branch of the connect flow: records every navigation and lets tests
/// inject visibility/blur signals.
#[derive(Debug, Clone)]
pub struct ScriptedPlatformAdapter {
    inner: Arc<Mutex<PlatformState>>,
}

#[derive(Debug)]
struct PlatformState {
    user_agent: String,
    block_new_context: bool,
    new_contexts: Vec<String>,
    navigations: Vec<String>,
    hidden_frames: Vec<String>,
    signals: Option<mpsc::UnboundedSender<AttentionSignal>>,
}

impl Default for ScriptedPlatformAdapter {
    fn default() -> Self {
        Self::with_user_agent("Mozilla/5.0 (X11; Linux x86_64)")
    }
}

impl ScriptedPlatformAdapter {
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PlatformState {
                user_agent: user_agent.into(),
                block_new_context: false,
                new_contexts: Vec::new(),
                navigations: Vec::new(),
                hidden_frames: Vec::new(),
                signals: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PlatformState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Makes subsequent new-context opens report as blocked.
    pub fn block_new_context(&self) {
        self.lock().block_new_context = true;
    }

    /// Delivers an attention signal; returns whether anyone was listening.
    pub fn signal(&self, signal: AttentionSignal) -> bool {
        match &self.lock().signals {
            Some(sender) => sender.send(signal).is_ok(),
            None => false,
        }
    }

    pub fn has_subscriber(&self) -> bool {
        self.lock().signals.is_some()
    }

    pub fn new_contexts(&self) -> Vec<String> {
        self.lock().new_contexts.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.lock().navigations.clone()
    }

    pub fn hidden_frames(&self) -> Vec<String> {
        self.lock().hidden_frames.clone()
    }
}

#[async_trait]
impl PlatformPort for ScriptedPlatformAdapter {
    fn user_agent(&self) -> String {
        self.lock().user_agent.clone()
    }

    fn open_new_context(&self, url: &str) -> Result<ContextOpen, PortError> {
        let mut state = self.lock();
        if state.block_new_context {
            return Ok(ContextOpen::Blocked);
        }
        state.new_contexts.push(url.to_owned());
        Ok(ContextOpen::Opened)
    }

    fn navigate(&self, url: &str) -> Result<(), PortError> {
        self.lock().navigations.push(url.to_owned());
        Ok(())
    }

    async fn navigate_hidden_frame(&self, url: &str) -> Result<(), PortError> {
        self.lock().hidden_frames.push(url.to_owned());
        Ok(())
    }

    fn attention_signals(&self) -> mpsc::UnboundedReceiver<AttentionSignal> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.lock().signals = Some(sender);
        receiver
    }
}
