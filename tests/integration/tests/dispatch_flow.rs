//! End-to-end dispatch flow over a file-backed registry.
//!
//! Exercises the full path a gateway request takes: load the registry from
//! disk, resolve targets, fan the article out through a sender, and report.

use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use herald_channels::{dispatch, ChannelError, ChannelSender, ChannelStore, DispatchPolicy};
use herald_channels::DispatchError;
use herald_core::types::{ChannelDescriptor, DispatchRequest, TextFormat};

/// Sender that fails scripted ids and records delivery order.
struct ScriptedSender {
    fail_ids: Vec<String>,
    delivered: Mutex<Vec<String>>,
}

impl ScriptedSender {
    fn new(fail_ids: &[&str]) -> Self {
        Self {
            fail_ids: fail_ids.iter().map(|s| s.to_string()).collect(),
            delivered: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChannelSender for ScriptedSender {
    async fn send(
        &self,
        channel_id: &str,
        _text: &str,
        _format: TextFormat,
    ) -> herald_channels::Result<()> {
        if self.fail_ids.iter().any(|id| id == channel_id) {
            return Err(ChannelError::channel("telegram", "forbidden"));
        }
        self.delivered.lock().unwrap().push(channel_id.to_string());
        Ok(())
    }
}

async fn seeded_store(dir: &TempDir) -> ChannelStore {
    let store = ChannelStore::new(dir.path().join("channels.json"));
    store
        .add(ChannelDescriptor::new("-1001", "Alpha"))
        .await
        .unwrap();
    store
        .add(ChannelDescriptor::new("-1002", "Beta"))
        .await
        .unwrap();
    store
        .add(ChannelDescriptor::new("-1003", "Gamma"))
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn test_broadcast_from_disk_registry() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir).await;

    let registry = store.load().await.unwrap();
    let sender = ScriptedSender::new(&[]);
    let request = DispatchRequest::to_all("The derby ended two to two.");

    let report = dispatch(&request, &registry, &sender, DispatchPolicy::default())
        .await
        .unwrap();

    assert_eq!(report.sent, 3);
    assert_eq!(report.total, 3);
    assert!(report.failures.is_empty());
    assert_eq!(
        *sender.delivered.lock().unwrap(),
        vec!["-1001", "-1002", "-1003"]
    );
}

#[tokio::test]
async fn test_partial_failure_keeps_registry_order() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir).await;

    let registry = store.load().await.unwrap();
    let sender = ScriptedSender::new(&["-1002"]);
    let request = DispatchRequest::to_all("The derby ended two to two.");

    let report = dispatch(&request, &registry, &sender, DispatchPolicy::default())
        .await
        .unwrap();

    assert_eq!(report.sent, 2);
    assert_eq!(report.total, 3);
    assert_eq!(report.sent + report.failures.len(), report.total);
    assert_eq!(report.failures[0].channel, "Beta");
    // The failure does not stop later channels.
    assert_eq!(
        *sender.delivered.lock().unwrap(),
        vec!["-1001", "-1003"]
    );
}

#[tokio::test]
async fn test_targeted_send_ignores_unknown_ids() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir).await;

    let registry = store.load().await.unwrap();
    let sender = ScriptedSender::new(&[]);
    let request = DispatchRequest::to_channels(
        "The derby ended two to two.",
        vec![
            "-1003".to_string(),
            "-9999".to_string(),
            "-1001".to_string(),
        ],
    );

    let report = dispatch(&request, &registry, &sender, DispatchPolicy::default())
        .await
        .unwrap();

    // Unknown -9999 is dropped; delivery follows registry order, not
    // request order.
    assert_eq!(report.total, 2);
    assert_eq!(
        *sender.delivered.lock().unwrap(),
        vec!["-1001", "-1003"]
    );
}

#[tokio::test]
async fn test_strict_policy_rejects_total_failure() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir).await;

    let registry = store.load().await.unwrap();
    let sender = ScriptedSender::new(&["-1001", "-1002", "-1003"]);
    let request = DispatchRequest::to_all("The derby ended two to two.");

    let err = dispatch(&request, &registry, &sender, DispatchPolicy::strict())
        .await
        .unwrap_err();

    match err {
        DispatchError::AllFailed { report } => {
            assert_eq!(report.sent, 0);
            assert_eq!(report.total, 3);
            assert_eq!(report.failures.len(), 3);
        }
        other => panic!("expected AllFailed, got: {other}"),
    }
}
