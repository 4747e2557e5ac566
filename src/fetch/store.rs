//! Single-flight cache of validated modes.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

use crate::models::{EnumsInfo, RawSnapshot, StatId};
use crate::stats::Mode;

use super::{FetchError, SnapshotSource};

/// A settled fetch failure, shared by every caller waiting on the same mode.
#[derive(Debug, Clone, Error)]
#[error("Fetching mode {mode_id} failed: {source}")]
pub struct StoreError {
    pub mode_id: StatId,
    #[source]
    source: Arc<FetchError>,
}

impl StoreError {
    fn new(mode_id: StatId, source: FetchError) -> Self {
        Self {
            mode_id,
            source: Arc::new(source),
        }
    }

    pub fn fetch_error(&self) -> &FetchError {
        &self.source
    }
}

type ModeCell = Arc<OnceCell<Result<Arc<Mode>, StoreError>>>;

/// Fetches each mode at most once; concurrent callers share the fetch.
///
/// A failed fetch stays failed for the lifetime of the store. Modes are
/// never patched, only swapped wholesale with [`SnapshotStore::replace`].
pub struct SnapshotStore {
    source: Arc<dyn SnapshotSource>,
    enums: Arc<EnumsInfo>,
    modes: Mutex<HashMap<StatId, ModeCell>>,
}

impl SnapshotStore {
    pub fn new(source: Arc<dyn SnapshotSource>, enums: Arc<EnumsInfo>) -> Self {
        Self {
            source,
            enums,
            modes: Mutex::new(HashMap::new()),
        }
    }

    pub fn enums(&self) -> &Arc<EnumsInfo> {
        &self.enums
    }

    pub fn source(&self) -> &Arc<dyn SnapshotSource> {
        &self.source
    }

    async fn cell(&self, mode_id: StatId) -> ModeCell {
        let mut modes = self.modes.lock().await;
        modes.entry(mode_id).or_default().clone()
    }

    /// Resolve a mode, fetching it on first use.
    pub async fn fetch_mode(&self, mode_id: StatId) -> Result<Arc<Mode>, StoreError> {
        let cell = self.cell(mode_id).await;
        if cell.initialized() {
            debug!(mode_id, "Raw stats served from store");
        }
        cell.get_or_init(|| self.load(mode_id)).await.clone()
    }

    async fn load(&self, mode_id: StatId) -> Result<Arc<Mode>, StoreError> {
        info!(mode_id, source = self.source.name(), "Fetching raw stats");

        let result = match self.source.fetch_mode(mode_id).await {
            Ok(snapshots) => Mode::new(mode_id, snapshots, &self.enums).map_err(FetchError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(mode) => {
                info!(mode_id, snapshots = mode.len(), "Raw stats loaded");
                Ok(Arc::new(mode))
            }
            Err(e) => {
                warn!(mode_id, error = %e, "Raw stats fetch failed");
                Err(StoreError::new(mode_id, e))
            }
        }
    }

    /// A mode that has already loaded successfully, without fetching.
    pub async fn get_mode(&self, mode_id: StatId) -> Option<Arc<Mode>> {
        let modes = self.modes.lock().await;
        modes
            .get(&mode_id)
            .and_then(|cell| cell.get())
            .and_then(|result| result.as_ref().ok())
            .cloned()
    }

    /// Swap in a complete new set of snapshots for a mode.
    ///
    /// Holders of the previous `Arc<Mode>` keep reading the old data.
    pub async fn replace(
        &self,
        mode_id: StatId,
        snapshots: Vec<RawSnapshot>,
    ) -> Result<Arc<Mode>, StoreError> {
        let mode = Mode::new(mode_id, snapshots, &self.enums)
            .map(Arc::new)
            .map_err(|e| StoreError::new(mode_id, e.into()))?;

        let mut modes = self.modes.lock().await;
        modes.insert(
            mode_id,
            Arc::new(OnceCell::new_with(Some(Ok(mode.clone())))),
        );
        info!(mode_id, snapshots = mode.len(), "Raw stats replaced");
        Ok(mode)
    }
}
