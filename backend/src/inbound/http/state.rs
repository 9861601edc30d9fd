//! Shared application state handed to HTTP handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::auth::AccountRegistry;
use crate::domain::{CatalogueService, TagCache};

/// Services and counters shared across workers.
pub struct AppState {
    /// Catalogue orchestrator.
    pub catalogue: CatalogueService,
    /// Popular-tag cache.
    pub tags: Arc<TagCache>,
    /// Account registry.
    pub accounts: Arc<AccountRegistry>,
    /// Monotonic catalogue version, bumped to broadcast "please refetch".
    catalogue_version: AtomicU64,
}

impl AppState {
    /// Assemble the shared state.
    #[must_use]
    pub fn new(
        catalogue: CatalogueService,
        tags: Arc<TagCache>,
        accounts: Arc<AccountRegistry>,
    ) -> Self {
        Self {
            catalogue,
            tags,
            accounts,
            catalogue_version: AtomicU64::new(0),
        }
    }

    /// Current catalogue version.
    #[must_use]
    pub fn catalogue_version(&self) -> u64 {
        self.catalogue_version.load(Ordering::Acquire)
    }

    /// Bump the catalogue version after a mutation that clients should
    /// refetch for. The value carries no meaning beyond "changed".
    pub fn bump_catalogue_version(&self) -> u64 {
        self.catalogue_version.fetch_add(1, Ordering::AcqRel) + 1
    }
}
