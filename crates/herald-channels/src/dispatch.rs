//! Broadcast dispatch: fan one article out to registered channels.

use tracing::{debug, info, warn};
use uuid::Uuid;

use herald_core::types::{
    ChannelDescriptor, ChannelFailure, DispatchReport, DispatchRequest, TextFormat,
};

use crate::error::DispatchError;
use crate::store::ChannelStore;
use crate::telegram::TelegramSender;
use crate::traits::ChannelSender;

/// Policy knobs for a dispatch batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchPolicy {
    /// Formatting mode passed to the sender. Broadcasts default to HTML.
    pub format: TextFormat,

    /// When true, a non-empty batch in which every send failed returns
    /// [`DispatchError::AllFailed`] instead of a report.
    pub fail_when_all_fail: bool,
}

impl DispatchPolicy {
    /// Lenient policy that reports total failure instead of erroring.
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Policy that turns an all-failed batch into an error.
    pub fn strict() -> Self {
        Self {
            fail_when_all_fail: true,
            ..Self::default()
        }
    }
}

/// Resolve the channels a request targets, preserving registry order.
///
/// An empty target list selects the whole registry. Unknown target ids are
/// dropped without error.
pub fn resolve_targets<'a>(
    registry: &'a [ChannelDescriptor],
    target_ids: &[String],
) -> Vec<&'a ChannelDescriptor> {
    if target_ids.is_empty() {
        registry.iter().collect()
    } else {
        registry
            .iter()
            .filter(|c| target_ids.iter().any(|id| id == &c.id))
            .collect()
    }
}

/// Broadcast one request through `sender`.
///
/// Sends are strictly sequential, one per resolved target. A failed send is
/// recorded as a [`ChannelFailure`] and the batch continues; the dispatcher
/// never retries. The returned report satisfies
/// `sent + failures.len() == total`.
pub async fn dispatch(
    request: &DispatchRequest,
    registry: &[ChannelDescriptor],
    sender: &dyn ChannelSender,
    policy: DispatchPolicy,
) -> Result<DispatchReport, DispatchError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(DispatchError::EmptyText);
    }

    let targets = resolve_targets(registry, &request.target_ids);
    if targets.is_empty() {
        return Err(DispatchError::NoChannels);
    }

    let dispatch_id = Uuid::new_v4();
    info!(
        "Dispatch {} starting: {} channels, {} chars",
        dispatch_id,
        targets.len(),
        text.chars().count()
    );

    let mut report = DispatchReport {
        sent: 0,
        total: targets.len(),
        failures: Vec::new(),
    };

    for channel in targets {
        match sender.send(&channel.id, text, policy.format).await {
            Ok(()) => {
                debug!(
                    "Dispatch {}: sent to {} ({})",
                    dispatch_id, channel.name, channel.id
                );
                report.sent += 1;
            }
            Err(e) => {
                warn!(
                    "Dispatch {}: send to {} ({}) failed: {}",
                    dispatch_id, channel.name, channel.id, e
                );
                report
                    .failures
                    .push(ChannelFailure::new(&channel.name, e.to_string()));
            }
        }
    }

    info!(
        "Dispatch {} finished: {}/{} sent, {} failed",
        dispatch_id,
        report.sent,
        report.total,
        report.failures.len()
    );

    if policy.fail_when_all_fail && report.all_failed() {
        return Err(DispatchError::AllFailed { report });
    }

    Ok(report)
}

/// High-level dispatch service.
///
/// Loads the registry and opens a fresh Telegram session for every call, so
/// no connection state outlives a batch.
pub struct Distributor {
    bot_token: String,
    store: ChannelStore,
    policy: DispatchPolicy,
}

impl Distributor {
    /// Create a distributor over the given registry store.
    pub fn new(bot_token: impl Into<String>, store: ChannelStore) -> Self {
        Self {
            bot_token: bot_token.into(),
            store,
            policy: DispatchPolicy::default(),
        }
    }

    /// Override the dispatch policy.
    pub fn with_policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Registry access for listing surfaces.
    pub fn store(&self) -> &ChannelStore {
        &self.store
    }

    /// Broadcast a request.
    ///
    /// The Telegram session lives only for the duration of this call; the
    /// sequential send loop guarantees nothing is in flight when it drops.
    pub async fn distribute(
        &self,
        request: &DispatchRequest,
    ) -> Result<DispatchReport, DispatchError> {
        let registry = self.store.load_or_empty().await;
        let sender = TelegramSender::new(&self.bot_token);
        dispatch(request, &registry, &sender, self.policy).await
    }
}
