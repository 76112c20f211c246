//! Shared request-handler state.

use std::sync::Arc;

use async_trait::async_trait;

use herald_channels::{ChannelStore, DispatchError, Distributor};
use herald_core::types::{DispatchReport, DispatchRequest};
use herald_rewrite::Rewriter;

/// The dispatch seam the HTTP handlers call through.
///
/// Production wires in a [`Distributor`]; tests substitute scripted
/// implementations.
#[async_trait]
pub trait ArticleDispatcher: Send + Sync {
    async fn dispatch_article(
        &self,
        request: &DispatchRequest,
    ) -> Result<DispatchReport, DispatchError>;
}

#[async_trait]
impl ArticleDispatcher for Distributor {
    async fn dispatch_article(
        &self,
        request: &DispatchRequest,
    ) -> Result<DispatchReport, DispatchError> {
        self.distribute(request).await
    }
}

/// State shared by all routes.
pub struct AppState {
    /// Broadcast path for `/api/send-article`.
    pub dispatcher: Arc<dyn ArticleDispatcher>,

    /// Registry read on `/api/channels`. Re-read per request so edits made
    /// through the admin bot show up without a restart.
    pub store: ChannelStore,

    /// Rewrite backend, present only when an API key is configured.
    pub rewriter: Option<Arc<Rewriter>>,
}

impl AppState {
    pub fn new(
        dispatcher: Arc<dyn ArticleDispatcher>,
        store: ChannelStore,
        rewriter: Option<Arc<Rewriter>>,
    ) -> Self {
        Self {
            dispatcher,
            store,
            rewriter,
        }
    }
}
