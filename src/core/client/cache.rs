//! Process-wide holder for the discovered [`PlatformConfig`].

use crate::core::models::PlatformConfig;
use tokio::sync::RwLock;

/// In-memory, best-effort store for the discovered data-API config.
///
/// There is no expiry: an entry lives until [`ConfigCache::invalidate`] is
/// called after a rejected query. Concurrent imports may race to fill or clear
/// it; the worst outcome is one redundant discovery.
#[derive(Debug, Default)]
pub struct ConfigCache {
    slot: RwLock<Option<PlatformConfig>>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache already holding `config`.
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            slot: RwLock::new(Some(config)),
        }
    }

    /// Fill the cache if it is empty, without awaiting.
    ///
    /// Returns `false` when nothing was stored: the cache already held a config
    /// or another task held the lock at that moment.
    pub(crate) fn seed(&self, config: PlatformConfig) -> bool {
        match self.slot.try_write() {
            Ok(mut slot) if slot.is_none() => {
                *slot = Some(config);
                true
            }
            _ => false,
        }
    }

    pub async fn get(&self) -> Option<PlatformConfig> {
        self.slot.read().await.clone()
    }

    pub async fn set(&self, config: PlatformConfig) {
        *self.slot.write().await = Some(config);
    }

    pub async fn invalidate(&self) {
        self.slot.write().await.take();
    }

    pub async fn is_populated(&self) -> bool {
        self.slot.read().await.is_some()
    }
}
