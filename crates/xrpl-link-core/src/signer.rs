use crate::domain::{
    drops_from_xrp, xrpl_chain, PaymentDraft, PaymentRequest, SignedResult, TransactionPayload,
    TransactionRequest, METHOD_SIGN_TRANSACTION,
};
use crate::errors::WalletError;
use crate::ports::{ModalPort, PlatformPort, SessionRequest, SignClientPort};
use crate::Connector;

impl<C, M, P> Connector<C, M, P>
where
    C: SignClientPort + 'static,
    M: ModalPort,
    P: PlatformPort,
{
    /// Signs and submits a transaction over the active session in one
    /// round trip. The target chain is `xrpl:{network}` when a network
    /// reference is supplied, otherwise the chain of the connected
    /// account.
    pub async fn sign_transaction(
        &self,
        request: TransactionRequest,
        network: Option<&str>,
    ) -> Result<SignedResult, WalletError> {
        let Some(session) = self.state.session() else {
            return Err(WalletError::NotConnected);
        };
        let connection = self.state.snapshot();

        let draft = match request {
            TransactionRequest::Payment(draft) => draft,
        };
        draft
            .validate()
            .map_err(|e| WalletError::Signing(e.to_string()))?;

        let chain_id = match network {
            Some(reference) => xrpl_chain(reference),
            None => xrpl_chain(&connection.chain_id),
        };
        let payload = TransactionPayload::payment(&connection.address, &draft);

        tracing::debug!(topic = %session.topic, chain = %chain_id, "requesting transaction signature");
        let params = serde_json::json!({
            "tx_json": payload,
            "submit": true,
        });
        let result = self
            .client
            .request(SessionRequest {
                topic: session.topic,
                chain_id,
                method: METHOD_SIGN_TRANSACTION.to_owned(),
                params,
            })
            .await
            .map_err(|e| WalletError::Signing(e.to_string()))?;

        serde_json::from_value(result)
            .map_err(|e| WalletError::Signing(format!("malformed signing result: {e}")))
    }

    /// Builds a payment from whole-XRP terms and signs it. Amounts convert
    /// at the fixed 10^6 drops scale with a flat fee; the network defaults
    /// to the configured one (testnet unless overridden). Errors from the
    /// signing step propagate unchanged.
    pub async fn send_payment(&self, payment: PaymentRequest) -> Result<SignedResult, WalletError> {
        if !self.state.is_connected() {
            return Err(WalletError::NotConnected);
        }

        let amount_drops =
            drops_from_xrp(payment.amount).map_err(|e| WalletError::Signing(e.to_string()))?;
        let mut draft = PaymentDraft::new(payment.destination, amount_drops);
        draft.destination_tag = payment.destination_tag;
        draft.memo = payment.memo;

        let network = payment
            .network
            .unwrap_or_else(|| self.config.default_network.clone());
        self.sign_transaction(TransactionRequest::Payment(draft), Some(network.as_str()))
            .await
    }
}
