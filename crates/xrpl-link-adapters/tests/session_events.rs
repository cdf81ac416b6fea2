mod common;

use std::time::Duration;

use serde_json::json;

use xrpl_link_core::SessionNotification;

use common::{eventually, new_harness, session, DESKTOP_UA};

#[tokio::test]
async fn update_for_the_active_topic_replaces_the_stored_state() {
    let h = new_harness(DESKTOP_UA);
    h.client
        .script_approval(Ok(session("t1", &["xrpl:0:rADDR"])));
    h.connector.connect().await.expect("connect");

    h.client.upsert_session(session("t1", &["xrpl:1:rNEW"]));
    h.client.emit(SessionNotification::Update {
        topic: "t1".to_owned(),
    });

    eventually("updated session to apply", || {
        h.connector.address() == "rNEW"
    })
    .await;
    assert_eq!(h.connector.chain_id(), "1");
    assert!(h.connector.is_connected());
}

#[tokio::test]
async fn update_for_an_unknown_topic_changes_nothing() {
    let h = new_harness(DESKTOP_UA);
    h.client
        .script_approval(Ok(session("t1", &["xrpl:0:rADDR"])));
    h.connector.connect().await.expect("connect");

    h.client.emit(SessionNotification::Update {
        topic: "no-such-topic".to_owned(),
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    let state = h.connector.snapshot();
    assert!(state.is_connected);
    assert_eq!(state.address, "rADDR");
    assert_eq!(state.chain_id, "0");
}

#[tokio::test]
async fn remote_delete_disconnects_locally() {
    let h = new_harness(DESKTOP_UA);
    h.client
        .script_approval(Ok(session("t1", &["xrpl:0:rADDR"])));
    h.connector.connect().await.expect("connect");

    h.client.emit(SessionNotification::Delete {
        topic: "t1".to_owned(),
    });

    eventually("delete to apply", || !h.connector.is_connected()).await;
    let state = h.connector.snapshot();
    assert!(state.address.is_empty());
    assert!(state.chain_id.is_empty());
    assert!(h.connector.session().is_none());
}

#[tokio::test]
async fn generic_session_events_are_observed_only() {
    let h = new_harness(DESKTOP_UA);
    h.client
        .script_approval(Ok(session("t1", &["xrpl:0:rADDR"])));
    h.connector.connect().await.expect("connect");

    h.client.emit(SessionNotification::Event {
        topic: "t1".to_owned(),
        payload: json!({"name": "chainChanged", "data": "xrpl:0"}),
    });
    // Prove ordering: a later delete lands after the event was drained.
    h.client.emit(SessionNotification::Delete {
        topic: "t1".to_owned(),
    });

    eventually("queued notifications to drain", || {
        !h.connector.is_connected()
    })
    .await;
}
