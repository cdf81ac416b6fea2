//! Folds external session lifecycle notifications into the shared state.
//!
//! The channel has one consumer, so updates apply in arrival order and
//! every state write is atomic behind the cell's mutex. Handlers may fire
//! at any time after initialization, including while a connect or signing
//! call is in flight.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::SessionNotification;
use crate::ports::SignClientPort;
use crate::state::StateCell;

/// Drains notifications until the client drops its sender.
pub(crate) async fn run<C: SignClientPort + ?Sized>(
    mut notifications: mpsc::UnboundedReceiver<SessionNotification>,
    state: StateCell,
    client: Arc<C>,
) {
    while let Some(notification) = notifications.recv().await {
        apply(notification, &state, client.as_ref()).await;
    }
    tracing::debug!("session notification channel closed");
}

/// Applies one notification. Separated from the drain loop so the folding
/// rules are directly testable.
pub async fn apply<C: SignClientPort + ?Sized>(
    notification: SessionNotification,
    state: &StateCell,
    client: &C,
) {
    match notification {
        SessionNotification::Event { topic, payload } => {
            // Observed only; reserved extension point.
            tracing::debug!(%topic, %payload, "session event");
        }
        SessionNotification::Update { topic } => match client.session(&topic).await {
            Ok(Some(session)) => {
                tracing::info!(%topic, "session updated");
                state.adopt_session(session);
            }
            Ok(None) => {
                // Stale update for a topic the client no longer knows.
                tracing::debug!(%topic, "ignoring update for unknown topic");
            }
            Err(err) => {
                tracing::warn!(%topic, %err, "session re-fetch failed");
            }
        },
        SessionNotification::Delete { topic } => {
            tracing::info!(%topic, "session deleted by remote");
            state.clear_session();
        }
    }
}
