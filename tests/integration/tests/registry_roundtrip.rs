//! Channel registry persistence integration tests.
//!
//! These tests verify that the registry file written by one component can
//! be read back by another with identical contents and document shape.

use herald_channels::ChannelStore;
use herald_core::types::ChannelDescriptor;
use tempfile::TempDir;

#[tokio::test]
async fn test_registry_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("channels.json");

    let store = ChannelStore::new(&path);
    store
        .add(ChannelDescriptor::new("-1001", "Alpha"))
        .await
        .unwrap();
    store
        .add(ChannelDescriptor::new("-1002", "Beta"))
        .await
        .unwrap();

    // A fresh store over the same path sees the same registry, in order.
    let reopened = ChannelStore::new(&path);
    let channels = reopened.load().await.unwrap();
    assert_eq!(channels.len(), 2);
    assert_eq!(channels[0].name, "Alpha");
    assert_eq!(channels[1].name, "Beta");
}

#[tokio::test]
async fn test_registry_document_shape() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("channels.json");

    let store = ChannelStore::new(&path);
    store
        .add(ChannelDescriptor::new("-1001234567890", "Evening News"))
        .await
        .unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["channels"][0]["id"], "-1001234567890");
    assert_eq!(doc["channels"][0]["name"], "Evening News");
}

#[tokio::test]
async fn test_remove_then_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("channels.json");

    let store = ChannelStore::new(&path);
    store
        .add(ChannelDescriptor::new("-1001", "Alpha"))
        .await
        .unwrap();
    store
        .add(ChannelDescriptor::new("-1002", "Beta"))
        .await
        .unwrap();

    assert!(store.remove("-1001").await.unwrap());
    assert!(!store.remove("-1001").await.unwrap());

    let channels = ChannelStore::new(&path).load().await.unwrap();
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0].id, "-1002");
}

#[tokio::test]
async fn test_corrupt_registry_is_an_error_but_degrades() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("channels.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = ChannelStore::new(&path);
    assert!(store.load().await.is_err());
    assert!(store.load_or_empty().await.is_empty());
}
