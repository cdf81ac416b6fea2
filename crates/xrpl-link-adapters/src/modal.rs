use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use xrpl_link_core::{ModalPort, PortError};

use crate::config::ModalConfig;

/// QR-modal collaborator. Rendering is out of scope, so this records the
/// open/close lifecycle and surfaces the URI a shell would display.
#[derive(Debug, Clone, Default)]
pub struct QrModalAdapter {
    config: ModalConfig,
    inner: Arc<Mutex<ModalState>>,
}

#[derive(Debug, Default)]
struct ModalState {
    open_uri: Option<String>,
    open_count: u64,
    close_count: u64,
}

impl QrModalAdapter {
    pub fn new(config: ModalConfig) -> Self {
        Self {
            config,
            inner: Arc::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ModalState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.lock().open_uri.is_some()
    }

    pub fn displayed_uri(&self) -> Option<String> {
        self.lock().open_uri.clone()
    }

    pub fn open_count(&self) -> u64 {
        self.lock().open_count
    }

    pub fn close_count(&self) -> u64 {
        self.lock().close_count
    }
}

#[async_trait]
impl ModalPort for QrModalAdapter {
    async fn open(&self, uri: &str) -> Result<(), PortError> {
        tracing::info!(theme = %self.config.theme_mode, "opening pairing modal");
        let mut state = self.lock();
        state.open_uri = Some(uri.to_owned());
        state.open_count += 1;
        Ok(())
    }

    fn close(&self) {
        let mut state = self.lock();
        state.open_uri = None;
        state.close_count += 1;
    }
}
