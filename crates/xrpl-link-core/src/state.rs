use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{parse_account, ConnectionState, Session, XRPL_NAMESPACE};

/// Connection state derived from a session record: connected, with the
/// address and chain reference of the first payment-namespace account.
/// A session without an XRPL account still counts as connected.
pub fn connection_from_session(session: &Session) -> ConnectionState {
    let mut state = ConnectionState {
        is_connected: true,
        ..ConnectionState::default()
    };
    if let Some(parts) = session.first_account(XRPL_NAMESPACE).and_then(parse_account) {
        state.address = parts.address;
        state.chain_id = parts.reference;
    }
    state
}

#[derive(Debug, Default)]
struct Shared {
    connection: ConnectionState,
    session: Option<Session>,
}

/// Shared connection/session cell. All mutations take the one mutex, so
/// readers observe either the old or the new state, never a mix. Writers
/// follow last-writer-wins; the orchestrator and the reconciler are the
/// only two.
#[derive(Debug, Clone, Default)]
pub struct StateCell {
    inner: Arc<Mutex<Shared>>,
}

impl StateCell {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        // Poisoning only means a writer panicked; the value is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> ConnectionState {
        self.lock().connection.clone()
    }

    pub fn session(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.lock().connection.is_connected
    }

    pub fn is_loading(&self) -> bool {
        self.lock().connection.is_loading
    }

    pub fn set_loading(&self, loading: bool) {
        self.lock().connection.is_loading = loading;
    }

    /// Stores `session` as the active session and recomputes the derived
    /// connection fields, preserving the loading flag.
    pub fn adopt_session(&self, session: Session) {
        let mut shared = self.lock();
        let loading = shared.connection.is_loading;
        shared.connection = connection_from_session(&session);
        shared.connection.is_loading = loading;
        shared.session = Some(session);
    }

    /// Clears the session and resets to disconnected, preserving the
    /// loading flag.
    pub fn clear_session(&self) {
        let mut shared = self.lock();
        let loading = shared.connection.is_loading;
        shared.connection = ConnectionState {
            is_loading: loading,
            ..ConnectionState::default()
        };
        shared.session = None;
    }
}
