//! Unit-style tests for the WebSocket connection manager.
//!
//! No database or network needed; the manager is just a concurrent map of
//! channel senders.

use axum::extract::ws::Message;

use pulsewatch_api::ws::WsManager;

#[tokio::test]
async fn add_and_remove_tracks_connection_count() {
    let manager = WsManager::new();
    assert_eq!(manager.connection_count().await, 0);

    let _rx1 = manager.add("conn-1".to_string(), 1).await;
    let _rx2 = manager.add("conn-2".to_string(), 2).await;
    assert_eq!(manager.connection_count().await, 2);

    manager.remove("conn-1").await;
    assert_eq!(manager.connection_count().await, 1);
}

#[tokio::test]
async fn send_to_user_only_reaches_that_users_connections() {
    let manager = WsManager::new();

    let mut alice_a = manager.add("alice-a".to_string(), 1).await;
    let mut alice_b = manager.add("alice-b".to_string(), 1).await;
    let mut bob = manager.add("bob".to_string(), 2).await;

    let sent = manager
        .send_to_user(1, Message::Text("hello".into()))
        .await;
    assert_eq!(sent, 2);

    assert!(matches!(alice_a.try_recv(), Ok(Message::Text(t)) if t == "hello"));
    assert!(matches!(alice_b.try_recv(), Ok(Message::Text(t)) if t == "hello"));
    assert!(bob.try_recv().is_err(), "bob must not receive alice's frame");
}

#[tokio::test]
async fn send_to_user_skips_closed_channels() {
    let manager = WsManager::new();

    let rx = manager.add("gone".to_string(), 1).await;
    drop(rx);

    // The send is counted but must not panic or error.
    let sent = manager.send_to_user(1, Message::Text("hi".into())).await;
    assert_eq!(sent, 1);
}

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();

    let mut rx = manager.add("conn".to_string(), 1).await;
    manager.shutdown_all().await;

    assert!(matches!(rx.try_recv(), Ok(Message::Close(_))));
    assert_eq!(manager.connection_count().await, 0);
}
