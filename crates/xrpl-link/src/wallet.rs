//! Wiring between the connection core and the default adapters.
//! This is the only boundary applications need to touch.

use std::sync::Arc;

use xrpl_link_adapters::{LinkConfig, NativePlatformAdapter, QrModalAdapter, SignClientAdapter};
use xrpl_link_core::{
    ConnectionState, Connector, PaymentRequest, Session, SignedResult, TransactionRequest,
    WalletError,
};

pub type LinkConnector = Connector<SignClientAdapter, QrModalAdapter, NativePlatformAdapter>;

/// One wallet connection per application session: reactive state accessors
/// plus the connect/disconnect/sign/pay operations.
#[derive(Clone)]
pub struct Wallet {
    connector: Arc<LinkConnector>,
    client: SignClientAdapter,
    modal: QrModalAdapter,
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new(LinkConfig::default())
    }
}

impl Wallet {
    pub fn new(config: LinkConfig) -> Self {
        let client = SignClientAdapter::new();
        let modal = QrModalAdapter::new(config.modal.clone());
        let platform = NativePlatformAdapter::new(config.user_agent.clone());
        let connector = Arc::new(Connector::new(
            client.clone(),
            modal.clone(),
            platform,
            config.connector_config(),
        ));
        Self {
            connector,
            client,
            modal,
        }
    }

    /// Configuration from `XRPL_LINK_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(LinkConfig::from_env())
    }

    pub async fn initialize(&self) -> Result<(), WalletError> {
        self.connector.initialize().await
    }

    pub async fn connect(&self) -> Result<(), WalletError> {
        self.connector.connect().await
    }

    pub async fn disconnect(&self) -> Result<(), WalletError> {
        self.connector.disconnect().await
    }

    pub async fn sign_transaction(
        &self,
        request: TransactionRequest,
        network: Option<&str>,
    ) -> Result<SignedResult, WalletError> {
        self.connector.sign_transaction(request, network).await
    }

    pub async fn send_payment(&self, payment: PaymentRequest) -> Result<SignedResult, WalletError> {
        self.connector.send_payment(payment).await
    }

    pub fn is_connected(&self) -> bool {
        self.connector.is_connected()
    }

    pub fn is_loading(&self) -> bool {
        self.connector.is_loading()
    }

    pub fn address(&self) -> String {
        self.connector.address()
    }

    pub fn chain_id(&self) -> String {
        self.connector.chain_id()
    }

    pub fn snapshot(&self) -> ConnectionState {
        self.connector.snapshot()
    }

    pub fn session(&self) -> Option<Session> {
        self.connector.session()
    }

    /// Underlying client handle, shared with the connector.
    pub fn client(&self) -> &SignClientAdapter {
        &self.client
    }

    /// Modal handle, shared with the connector.
    pub fn modal(&self) -> &QrModalAdapter {
        &self.modal
    }
}
