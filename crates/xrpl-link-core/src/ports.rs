use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::domain::{
    AttentionSignal, ClientConfig, DisconnectReason, NamespaceRequest, Session,
    SessionNotification,
};

#[derive(Debug, Error)]
pub enum PortError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Pairing material returned by a connect call: the one-time URI to hand to
/// the wallet, plus the approval the remote side eventually settles.
#[derive(Debug)]
pub struct PairingHandle {
    pub uri: Option<String>,
    pub approval: oneshot::Receiver<Result<Session, PortError>>,
}

/// A signing request scoped to one session topic and chain.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRequest {
    pub topic: String,
    pub chain_id: String,
    pub method: String,
    pub params: Value,
}

/// The underlying pairing/session protocol client. Transport, persistence
/// and relay negotiation all live behind this seam.
#[async_trait]
pub trait SignClientPort: Send + Sync {
    async fn init(&self, config: &ClientConfig) -> Result<(), PortError>;

    async fn connect(&self, namespaces: &NamespaceRequest) -> Result<PairingHandle, PortError>;

    async fn request(&self, request: SessionRequest) -> Result<Value, PortError>;

    async fn disconnect(&self, topic: &str, reason: DisconnectReason) -> Result<(), PortError>;

    async fn all_sessions(&self) -> Result<Vec<Session>, PortError>;

    async fn session(&self, topic: &str) -> Result<Option<Session>, PortError>;

    /// Single-consumer notification channel. The connector subscribes
    /// exactly once, inside its init guard.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<SessionNotification>;
}

/// QR-code modal shown on desktop while pairing is pending.
#[async_trait]
pub trait ModalPort: Send + Sync {
    async fn open(&self, uri: &str) -> Result<(), PortError>;

    fn close(&self);
}

/// Whether a new browsing context could actually be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextOpen {
    Opened,
    Blocked,
}

/// Host-platform primitives the mobile launch detector drives: navigation
/// and the attention signals that hint the wallet app took the foreground.
#[async_trait]
pub trait PlatformPort: Send + Sync {
    fn user_agent(&self) -> String;

    fn open_new_context(&self, url: &str) -> Result<ContextOpen, PortError>;

    fn navigate(&self, url: &str) -> Result<(), PortError>;

    /// Points a transient, invisible frame at `url`, removing it after a
    /// bounded delay regardless of whether navigation succeeded.
    async fn navigate_hidden_frame(&self, url: &str) -> Result<(), PortError>;

    fn attention_signals(&self) -> mpsc::UnboundedReceiver<AttentionSignal>;
}
