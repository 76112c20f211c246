//! File-backed channel registry.
//!
//! Channels are persisted as a single JSON document:
//!
//! ```json
//! { "channels": [ { "id": "-1001234567890", "name": "My Channel" } ] }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use herald_core::types::ChannelDescriptor;

use crate::error::ChannelError;
use crate::Result;

/// On-disk document shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ChannelsFile {
    #[serde(default)]
    channels: Vec<ChannelDescriptor>,
}

/// A file-backed channel registry.
///
/// The full list is read and rewritten on every mutation; the admin bot is
/// the only writer.
#[derive(Debug, Clone)]
pub struct ChannelStore {
    path: PathBuf,
}

impl ChannelStore {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all registered channels, preserving file order.
    ///
    /// A missing file is an empty registry, not an error.
    pub async fn load(&self) -> Result<Vec<ChannelDescriptor>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let file: ChannelsFile = serde_json::from_str(&content)?;
                Ok(file.channels)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Like [`ChannelStore::load`], but degrades failures to an empty
    /// registry with a warning. Dispatch paths use this so a corrupt file
    /// reads as "no channels configured" instead of a hard error.
    pub async fn load_or_empty(&self) -> Vec<ChannelDescriptor> {
        match self.load().await {
            Ok(channels) => channels,
            Err(e) => {
                warn!(
                    "Failed to load channel registry {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Persist the full channel list.
    pub async fn save(&self, channels: &[ChannelDescriptor]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let file = ChannelsFile {
            channels: channels.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        tokio::fs::write(&self.path, json).await?;

        debug!("Saved {} channels to {}", channels.len(), self.path.display());
        Ok(())
    }

    /// Register a channel. Fails when the id is already present.
    pub async fn add(&self, descriptor: ChannelDescriptor) -> Result<()> {
        let mut channels = self.load().await?;
        if channels.iter().any(|c| c.id == descriptor.id) {
            return Err(ChannelError::AlreadyRegistered(descriptor.id));
        }
        channels.push(descriptor);
        self.save(&channels).await
    }

    /// Remove a channel by id. Returns true when something was removed;
    /// removing an unknown id is not an error.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let mut channels = self.load().await?;
        let before = channels.len();
        channels.retain(|c| c.id != id);
        if channels.len() == before {
            return Ok(false);
        }
        self.save(&channels).await?;
        Ok(true)
    }
}
