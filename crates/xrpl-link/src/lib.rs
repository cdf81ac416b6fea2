//! Wallet-session connection and XRPL payment signing.
//!
//! [`Wallet`] wires the connection core to the default adapters: construct
//! one per application session, `connect()` to pair with the wallet, then
//! `send_payment()` to sign and submit payments over the session.

mod telemetry;
mod wallet;

pub use telemetry::init_tracing;
pub use wallet::{LinkConnector, Wallet};

pub use xrpl_link_adapters::{LinkConfig, ModalConfig};
pub use xrpl_link_core::{
    ConnectionState, PaymentDraft, PaymentRequest, Session, SessionNamespace, SignedResult,
    TransactionRequest, WalletError,
};
