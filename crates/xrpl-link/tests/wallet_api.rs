use std::collections::BTreeMap;

use serde_json::json;

use xrpl_link::{LinkConfig, PaymentRequest, Session, SessionNamespace, Wallet};

fn approved_session() -> Session {
    let mut namespaces = BTreeMap::new();
    namespaces.insert(
        "xrpl".to_owned(),
        SessionNamespace {
            accounts: vec!["xrpl:1:rFACADE".to_owned()],
            methods: vec!["xrpl_signTransaction".to_owned()],
            events: vec![],
        },
    );
    Session {
        topic: "facade-topic".to_owned(),
        namespaces,
    }
}

#[tokio::test]
async fn wallet_exposes_the_full_surface() {
    let wallet = Wallet::new(LinkConfig::default());
    assert!(!wallet.is_connected());
    assert!(!wallet.is_loading());

    wallet.client().script_approval(Ok(approved_session()));
    wallet.connect().await.expect("connect");

    assert!(wallet.is_connected());
    assert_eq!(wallet.address(), "rFACADE");
    assert_eq!(wallet.chain_id(), "1");
    assert_eq!(
        wallet.session().expect("session").topic,
        "facade-topic"
    );

    wallet.client().script_request_result(Ok(json!({
        "signedTransaction": "F00D",
        "transactionHash": "15EA",
    })));
    let result = wallet
        .send_payment(PaymentRequest::new("rDEST", 2.0))
        .await
        .expect("payment");
    assert_eq!(result.transaction_hash, "15EA");

    wallet.disconnect().await.expect("disconnect");
    assert!(!wallet.is_connected());
    assert!(wallet.address().is_empty());
}
