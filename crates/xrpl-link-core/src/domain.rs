use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// CAIP namespace of the payment ledger family.
pub const XRPL_NAMESPACE: &str = "xrpl";
/// XRPL mainnet chain reference.
pub const XRPL_MAINNET: &str = "0";
/// XRPL testnet chain reference.
pub const XRPL_TESTNET: &str = "1";

pub const EVM_NAMESPACE: &str = "eip155";
pub const EVM_TEST_CHAIN: &str = "17000";

pub const METHOD_SIGN_TRANSACTION: &str = "xrpl_signTransaction";
pub const METHOD_SUBMIT: &str = "xrpl_submit";

/// Flat fee applied to outgoing payments, in drops.
pub const PAYMENT_FEE_DROPS: &str = "12";

/// 1 XRP expressed in drops, the smallest ledger unit.
pub const DROPS_PER_XRP: u64 = 1_000_000;

// Total supply ceiling: 100 billion XRP.
const MAX_DROPS: u64 = 100_000_000_000 * DROPS_PER_XRP;

/// Fully qualified chain id for an XRPL network reference, e.g. `xrpl:0`.
pub fn xrpl_chain(reference: &str) -> String {
    format!("{XRPL_NAMESPACE}:{reference}")
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount must be a positive, finite number of XRP")]
    NotPositive,
    #[error("amount exceeds the representable drops range")]
    OutOfRange,
}

/// Converts an XRP amount to its integer drops string at the fixed 10^6
/// scale. Rejects amounts that round to zero or exceed total supply.
pub fn drops_from_xrp(amount: f64) -> Result<String, AmountError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AmountError::NotPositive);
    }
    let drops = (amount * DROPS_PER_XRP as f64).round();
    if drops < 1.0 {
        return Err(AmountError::NotPositive);
    }
    if drops > MAX_DROPS as f64 {
        return Err(AmountError::OutOfRange);
    }
    Ok(format!("{}", drops as u64))
}

/// Components of a CAIP account string, `namespace:reference:address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountParts {
    pub namespace: String,
    pub reference: String,
    pub address: String,
}

/// Splits a session account entry into its three parts. Malformed entries
/// yield `None` and are treated as absent by callers.
pub fn parse_account(raw: &str) -> Option<AccountParts> {
    let mut parts = raw.splitn(3, ':');
    let namespace = parts.next()?;
    let reference = parts.next()?;
    let address = parts.next()?;
    if namespace.is_empty() || reference.is_empty() || address.is_empty() {
        return None;
    }
    Some(AccountParts {
        namespace: namespace.to_owned(),
        reference: reference.to_owned(),
        address: address.to_owned(),
    })
}

/// Connection flags plus the identity of the connected account. Single
/// source of truth for "are we connected and to whom".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionState {
    pub is_connected: bool,
    pub is_loading: bool,
    pub address: String,
    pub chain_id: String,
}

/// Negotiated capabilities of one namespace within an established session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionNamespace {
    pub accounts: Vec<String>,
    #[serde(default)]
    pub methods: Vec<String>,
    #[serde(default)]
    pub events: Vec<String>,
}

/// An established, topic-keyed channel between application and wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub topic: String,
    pub namespaces: BTreeMap<String, SessionNamespace>,
}

impl Session {
    /// First account entry negotiated under `namespace`, if any.
    pub fn first_account(&self, namespace: &str) -> Option<&str> {
        self.namespaces
            .get(namespace)?
            .accounts
            .first()
            .map(String::as_str)
    }
}

/// Chains, methods and events requested for one namespace at connect time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredNamespace {
    pub chains: Vec<String>,
    pub methods: Vec<String>,
    pub events: Vec<String>,
}

pub type NamespaceRequest = BTreeMap<String, RequiredNamespace>;

/// Capability request for one session: the XRPL family across mainnet and
/// testnet plus a single EVM test chain.
pub fn required_namespaces() -> NamespaceRequest {
    let mut namespaces = NamespaceRequest::new();
    namespaces.insert(
        XRPL_NAMESPACE.to_owned(),
        RequiredNamespace {
            chains: vec![xrpl_chain(XRPL_MAINNET), xrpl_chain(XRPL_TESTNET)],
            methods: vec![
                METHOD_SIGN_TRANSACTION.to_owned(),
                METHOD_SUBMIT.to_owned(),
            ],
            events: vec!["chainChanged".to_owned(), "accountsChanged".to_owned()],
        },
    );
    namespaces.insert(
        EVM_NAMESPACE.to_owned(),
        RequiredNamespace {
            chains: vec![format!("{EVM_NAMESPACE}:{EVM_TEST_CHAIN}")],
            methods: vec![
                "eth_sendTransaction".to_owned(),
                "personal_sign".to_owned(),
                "eth_signTypedData".to_owned(),
            ],
            events: vec!["accountsChanged".to_owned(), "chainChanged".to_owned()],
        },
    );
    namespaces
}

/// A payment as the application describes it: whole XRP, optional routing
/// tag, optional memo text, optional target network reference.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub destination: String,
    pub amount: f64,
    pub destination_tag: Option<u32>,
    pub network: Option<String>,
    pub memo: Option<String>,
}

impl PaymentRequest {
    pub fn new(destination: impl Into<String>, amount: f64) -> Self {
        Self {
            destination: destination.into(),
            amount,
            destination_tag: None,
            network: None,
            memo: None,
        }
    }
}

/// Payment fields in wire units, validated before any remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDraft {
    pub destination: String,
    pub amount_drops: String,
    pub fee_drops: String,
    pub destination_tag: Option<u32>,
    pub memo: Option<String>,
}

impl PaymentDraft {
    pub fn new(destination: impl Into<String>, amount_drops: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            amount_drops: amount_drops.into(),
            fee_drops: PAYMENT_FEE_DROPS.to_owned(),
            destination_tag: None,
            memo: None,
        }
    }

    /// Required-field gaps are rejected here rather than by the wallet.
    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.destination.is_empty() {
            return Err(PayloadError::MissingDestination);
        }
        match self.amount_drops.parse::<u64>() {
            Ok(0) | Err(_) => return Err(PayloadError::InvalidAmount(self.amount_drops.clone())),
            Ok(_) => {}
        }
        if self.fee_drops.parse::<u64>().is_err() {
            return Err(PayloadError::InvalidFee(self.fee_drops.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("payment destination is required")]
    MissingDestination,
    #[error("payment amount is not a positive drops integer: {0}")]
    InvalidAmount(String),
    #[error("payment fee is not a drops integer: {0}")]
    InvalidFee(String),
}

/// Known signable operation kinds. Today only payments; the union leaves
/// room for further transaction types without changing call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransactionRequest {
    Payment(PaymentDraft),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoData {
    #[serde(rename = "MemoData")]
    pub memo_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoEntry {
    #[serde(rename = "Memo")]
    pub memo: MemoData,
}

impl MemoEntry {
    /// Hex-encodes arbitrary memo text into a single memo entry.
    pub fn from_text(text: &str) -> Self {
        Self {
            memo: MemoData {
                memo_data: hex::encode(text.as_bytes()),
            },
        }
    }
}

/// XRPL wire form of a payment, as submitted to the wallet for signing.
/// An absent destination tag omits the field entirely; an explicit tag of
/// zero is a valid, distinct tag and is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
    #[serde(rename = "TransactionType")]
    pub transaction_type: String,
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Destination")]
    pub destination: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Fee")]
    pub fee: String,
    #[serde(rename = "DestinationTag", skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
    #[serde(rename = "Memos", skip_serializing_if = "Option::is_none")]
    pub memos: Option<Vec<MemoEntry>>,
}

impl TransactionPayload {
    pub fn payment(account: &str, draft: &PaymentDraft) -> Self {
        Self {
            transaction_type: "Payment".to_owned(),
            account: account.to_owned(),
            destination: draft.destination.clone(),
            amount: draft.amount_drops.clone(),
            fee: draft.fee_drops.clone(),
            destination_tag: draft.destination_tag,
            memos: draft
                .memo
                .as_deref()
                .map(|text| vec![MemoEntry::from_text(text)]),
        }
    }
}

/// Signing result returned verbatim from the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedResult {
    pub signed_transaction: String,
    pub transaction_hash: String,
}

/// Reason code sent with a disconnect call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisconnectReason {
    pub code: u32,
    pub message: String,
}

impl DisconnectReason {
    pub fn user_initiated() -> Self {
        Self {
            code: 6000,
            message: "User disconnected".to_owned(),
        }
    }
}

/// Application metadata advertised to the wallet during pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    pub name: String,
    pub description: String,
    pub url: String,
    pub icons: Vec<String>,
    pub redirect: RedirectUrls,
}

/// Where the wallet should send the user back to, and where to send users
/// who do not have the wallet installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectUrls {
    pub native: String,
    pub universal: Option<String>,
}

/// Configuration handed to the underlying session-protocol client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub project_id: String,
    pub metadata: AppMetadata,
}

const MOBILE_MARKERS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

const IOS_MARKERS: [&str; 3] = ["ipad", "iphone", "ipod"];

/// Device class inferred from a user-agent string; decides whether pairing
/// goes through the deep-link flow or the QR modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    MobileIos,
    MobileOther,
}

impl DeviceClass {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let lower = user_agent.to_ascii_lowercase();
        if IOS_MARKERS.iter().any(|marker| lower.contains(marker)) {
            return DeviceClass::MobileIos;
        }
        if MOBILE_MARKERS.iter().any(|marker| lower.contains(marker)) {
            return DeviceClass::MobileOther;
        }
        DeviceClass::Desktop
    }

    pub fn is_mobile(&self) -> bool {
        !matches!(self, DeviceClass::Desktop)
    }
}

/// Attention signals observed while waiting for the wallet app to launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttentionSignal {
    PageHidden,
    FocusLost,
}

/// Session lifecycle notifications from the underlying client.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionNotification {
    Event { topic: String, payload: Value },
    Update { topic: String },
    Delete { topic: String },
}
