pub mod connector;
pub mod domain;
pub mod errors;
pub mod launch;
pub mod ports;
pub mod reconciler;
mod signer;
pub mod state;

pub use connector::{Connector, ConnectorConfig};
pub use domain::{
    drops_from_xrp, parse_account, required_namespaces, xrpl_chain, AccountParts, AmountError,
    AppMetadata, AttentionSignal, ClientConfig, ConnectionState, DeviceClass, DisconnectReason,
    MemoEntry, NamespaceRequest, PaymentDraft, PaymentRequest, PayloadError, RedirectUrls,
    RequiredNamespace, Session, SessionNamespace, SessionNotification, SignedResult,
    TransactionPayload, TransactionRequest, DROPS_PER_XRP, METHOD_SIGN_TRANSACTION, METHOD_SUBMIT,
    PAYMENT_FEE_DROPS, XRPL_MAINNET, XRPL_NAMESPACE, XRPL_TESTNET,
};
pub use errors::WalletError;
pub use launch::{attempt_launch, AppLaunchHeuristic, LaunchOutcome, LAUNCH_WINDOW_MS};
pub use ports::{
    ContextOpen, ModalPort, PairingHandle, PlatformPort, PortError, SessionRequest, SignClientPort,
};
pub use state::{connection_from_session, StateCell};
