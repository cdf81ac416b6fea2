use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use xrpl_link_core::{
    ClientConfig, DisconnectReason, NamespaceRequest, PairingHandle, PortError, Session,
    SessionNotification, SessionRequest, SignClientPort,
};

/// In-memory stand-in for the pairing/session protocol client.
///
/// Session persistence, approvals, request results and lifecycle
/// notifications are all scriptable, which is what the connection flow
/// tests drive. Handles share state, so a clone kept by the test observes
/// everything the connector does.
#[derive(Debug, Clone, Default)]
pub struct SignClientAdapter {
    inner: Arc<Mutex<ClientState>>,
}

#[derive(Debug, Default)]
struct ClientState {
    initialized: bool,
    init_count: u64,
    init_failure: Option<String>,
    sessions: Vec<Session>,
    pairing_counter: u64,
    pending_approval: Option<oneshot::Sender<Result<Session, PortError>>>,
    scripted_approval: Option<Result<Session, PortError>>,
    requests: Vec<SessionRequest>,
    scripted_results: VecDeque<Result<Value, PortError>>,
    disconnects: Vec<(String, DisconnectReason)>,
    disconnect_failure: Option<String>,
    notifications: Option<mpsc::UnboundedSender<SessionNotification>>,
    subscribe_count: u64,
}

impl SignClientAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ClientState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Seeds a persisted session, as if restored from the client's store.
    pub fn seed_session(&self, session: Session) {
        self.lock().sessions.push(session);
    }

    /// Replaces (or inserts) the stored record for `session.topic`.
    pub fn upsert_session(&self, session: Session) {
        let mut state = self.lock();
        match state.sessions.iter_mut().find(|s| s.topic == session.topic) {
            Some(slot) => *slot = session,
            None => state.sessions.push(session),
        }
    }

    pub fn remove_session(&self, topic: &str) {
        self.lock().sessions.retain(|s| s.topic != topic);
    }

    /// The next connect call settles its approval immediately with this.
    pub fn script_approval(&self, approval: Result<Session, PortError>) {
        self.lock().scripted_approval = Some(approval);
    }

    /// Settles a held approval as approved.
    pub fn approve_pending(&self, session: Session) {
        let sender = {
            let mut state = self.lock();
            state.sessions.push(session.clone());
            state.pending_approval.take()
        };
        if let Some(sender) = sender {
            let _ = sender.send(Ok(session));
        }
    }

    /// Settles a held approval as rejected by the wallet user.
    pub fn reject_pending(&self, message: &str) {
        let sender = self.lock().pending_approval.take();
        if let Some(sender) = sender {
            let _ = sender.send(Err(PortError::Rejected(message.to_owned())));
        }
    }

    pub fn has_pending_approval(&self) -> bool {
        self.lock().pending_approval.is_some()
    }

    /// Queues the result for the next signing request.
    pub fn script_request_result(&self, result: Result<Value, PortError>) {
        self.lock().scripted_results.push_back(result);
    }

    pub fn fail_next_init(&self, message: &str) {
        self.lock().init_failure = Some(message.to_owned());
    }

    pub fn fail_next_disconnect(&self, message: &str) {
        self.lock().disconnect_failure = Some(message.to_owned());
    }

    /// Pushes a lifecycle notification to the subscriber, if any.
    pub fn emit(&self, notification: SessionNotification) {
        let state = self.lock();
        match &state.notifications {
            Some(sender) => {
                if sender.send(notification).is_err() {
                    tracing::debug!("notification receiver dropped");
                }
            }
            None => tracing::debug!("notification emitted before any subscriber"),
        }
    }

    pub fn init_count(&self) -> u64 {
        self.lock().init_count
    }

    pub fn subscribe_count(&self) -> u64 {
        self.lock().subscribe_count
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn recorded_requests(&self) -> Vec<SessionRequest> {
        self.lock().requests.clone()
    }

    pub fn recorded_disconnects(&self) -> Vec<(String, DisconnectReason)> {
        self.lock().disconnects.clone()
    }
}

#[async_trait]
impl SignClientPort for SignClientAdapter {
    async fn init(&self, _config: &ClientConfig) -> Result<(), PortError> {
        let mut state = self.lock();
        if let Some(message) = state.init_failure.take() {
            return Err(PortError::Transport(message));
        }
        state.initialized = true;
        state.init_count += 1;
        Ok(())
    }

    async fn connect(&self, _namespaces: &NamespaceRequest) -> Result<PairingHandle, PortError> {
        let (sender, receiver) = oneshot::channel();
        let uri = {
            let mut state = self.lock();
            if !state.initialized {
                return Err(PortError::Transport("client not initialized".to_owned()));
            }
            state.pairing_counter += 1;
            let uri = format!(
                "wc:{:08x}@2?relay-protocol=irn&symKey=stub",
                state.pairing_counter
            );
            match state.scripted_approval.take() {
                Some(approval) => {
                    if let Ok(session) = &approval {
                        state.sessions.push(session.clone());
                    }
                    let _ = sender.send(approval);
                }
                None => state.pending_approval = Some(sender),
            }
            uri
        };
        Ok(PairingHandle {
            uri: Some(uri),
            approval: receiver,
        })
    }

    async fn request(&self, request: SessionRequest) -> Result<Value, PortError> {
        let mut state = self.lock();
        state.requests.push(request);
        state
            .scripted_results
            .pop_front()
            .unwrap_or_else(|| Err(PortError::Transport("no scripted response".to_owned())))
    }

    async fn disconnect(&self, topic: &str, reason: DisconnectReason) -> Result<(), PortError> {
        let mut state = self.lock();
        state.disconnects.push((topic.to_owned(), reason));
        if let Some(message) = state.disconnect_failure.take() {
            return Err(PortError::Transport(message));
        }
        state.sessions.retain(|s| s.topic != topic);
        Ok(())
    }

    async fn all_sessions(&self) -> Result<Vec<Session>, PortError> {
        Ok(self.lock().sessions.clone())
    }

    async fn session(&self, topic: &str) -> Result<Option<Session>, PortError> {
        Ok(self
            .lock()
            .sessions
            .iter()
            .find(|s| s.topic == topic)
            .cloned())
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<SessionNotification> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut state = self.lock();
        state.notifications = Some(sender);
        state.subscribe_count += 1;
        receiver
    }
}
