use thiserror::Error;

/// Failure taxonomy surfaced to callers of the wallet operations.
///
/// `Initialization` and `Connection` are recoverable by retrying the call;
/// `NotConnected` is a precondition violation; `Signing` means the wallet
/// rejected or failed the request; `Disconnect` is advisory, local state is
/// already cleared when it is returned.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("wallet client initialization failed: {0}")]
    Initialization(String),
    #[error("wallet connection failed: {0}")]
    Connection(String),
    #[error("wallet is not connected")]
    NotConnected,
    #[error("transaction signing failed: {0}")]
    Signing(String),
    #[error("wallet disconnect failed: {0}")]
    Disconnect(String),
}
