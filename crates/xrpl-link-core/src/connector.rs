use std::sync::Arc;

use crate::domain::{
    required_namespaces, ClientConfig, ConnectionState, DeviceClass, DisconnectReason, Session,
    XRPL_TESTNET,
};
use crate::errors::WalletError;
use crate::launch::{self, AppLaunchHeuristic};
use crate::ports::{ModalPort, PairingHandle, PlatformPort, SignClientPort};
use crate::reconciler;
use crate::state::StateCell;

/// Everything the orchestrator needs to open a session: client credentials,
/// the launch heuristic for mobile pairing, and the network used for
/// payments that do not name one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    pub client: ClientConfig,
    pub launch: AppLaunchHeuristic,
    pub default_network: String,
}

impl ConnectorConfig {
    pub fn new(client: ClientConfig, launch: AppLaunchHeuristic) -> Self {
        Self {
            client,
            launch,
            default_network: XRPL_TESTNET.to_owned(),
        }
    }
}

/// Connection orchestrator: owns the port instances and the shared state
/// cell, and drives session establishment, teardown and signing.
///
/// One instance per application session; handles are cheap to clone at the
/// adapter level, so callers share the connector itself behind an `Arc`.
pub struct Connector<C, M, P> {
    pub(crate) client: Arc<C>,
    pub(crate) modal: Arc<M>,
    pub(crate) platform: Arc<P>,
    pub(crate) config: ConnectorConfig,
    pub(crate) state: StateCell,
    init: tokio::sync::Mutex<bool>,
}

impl<C, M, P> Connector<C, M, P>
where
    C: SignClientPort + 'static,
    M: ModalPort,
    P: PlatformPort,
{
    pub fn new(client: C, modal: M, platform: P, config: ConnectorConfig) -> Self {
        Self {
            client: Arc::new(client),
            modal: Arc::new(modal),
            platform: Arc::new(platform),
            config,
            state: StateCell::new(),
            init: tokio::sync::Mutex::new(false),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn address(&self) -> String {
        self.state.snapshot().address
    }

    pub fn chain_id(&self) -> String {
        self.state.snapshot().chain_id
    }

    pub fn snapshot(&self) -> ConnectionState {
        self.state.snapshot()
    }

    pub fn session(&self) -> Option<Session> {
        self.state.session()
    }

    /// Initializes the underlying client and registers the session event
    /// reconciler. Idempotent: repeat calls only re-check for persisted
    /// sessions, adopting the first one found.
    pub async fn initialize(&self) -> Result<(), WalletError> {
        let mut initialized = self.init.lock().await;
        if !*initialized {
            self.client
                .init(&self.config.client)
                .await
                .map_err(|e| WalletError::Initialization(e.to_string()))?;
            let notifications = self.client.subscribe();
            tokio::spawn(reconciler::run(
                notifications,
                self.state.clone(),
                Arc::clone(&self.client),
            ));
            *initialized = true;
        }
        drop(initialized);

        let sessions = self
            .client
            .all_sessions()
            .await
            .map_err(|e| WalletError::Initialization(e.to_string()))?;
        if let Some(existing) = sessions.into_iter().next() {
            tracing::info!(topic = %existing.topic, "restored persisted session");
            self.state.adopt_session(existing);
        }
        Ok(())
    }

    /// Establishes a session with the wallet. Mobile devices are driven
    /// through the deep-link launch flow, everything else through the QR
    /// modal; either way the remote approval is the suspension point, with
    /// no internal timeout. The loading flag is reset on every outcome.
    pub async fn connect(&self) -> Result<(), WalletError> {
        self.state.set_loading(true);
        let result = self.connect_inner().await;
        self.state.set_loading(false);
        result
    }

    async fn connect_inner(&self) -> Result<(), WalletError> {
        self.initialize()
            .await
            .map_err(|e| WalletError::Connection(e.to_string()))?;

        let namespaces = required_namespaces();
        let PairingHandle { uri, approval } = self
            .client
            .connect(&namespaces)
            .await
            .map_err(|e| WalletError::Connection(e.to_string()))?;

        let mut modal_open = false;
        if let Some(uri) = uri.as_deref() {
            let device = DeviceClass::from_user_agent(&self.platform.user_agent());
            if device.is_mobile() {
                let outcome =
                    launch::attempt_launch(self.platform.as_ref(), &self.config.launch, device, uri)
                        .await;
                tracing::debug!(?outcome, "mobile launch attempt finished");
            } else {
                self.modal
                    .open(uri)
                    .await
                    .map_err(|e| WalletError::Connection(e.to_string()))?;
                modal_open = true;
            }
        }

        let session = approval
            .await
            .map_err(|_| WalletError::Connection("approval dropped without settling".to_owned()))?
            .map_err(|e| WalletError::Connection(e.to_string()))?;

        tracing::info!(topic = %session.topic, "wallet session approved");
        self.state.adopt_session(session);
        if modal_open {
            self.modal.close();
        }
        Ok(())
    }

    /// Tears the session down. Disconnection is locally authoritative:
    /// session and state are cleared even when the remote call fails, and
    /// that failure is then reported as advisory.
    pub async fn disconnect(&self) -> Result<(), WalletError> {
        let remote = match self.state.session() {
            Some(session) => {
                self.client
                    .disconnect(&session.topic, DisconnectReason::user_initiated())
                    .await
            }
            None => Ok(()),
        };
        self.state.clear_session();
        remote.map_err(|e| WalletError::Disconnect(e.to_string()))
    }
}
