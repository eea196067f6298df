use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::awards::AwardStore;
use crate::catalog::CatalogSource;
use crate::config::Config;
use crate::discovery::OffsetSampler;
use crate::history::InteractionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Book catalog. Default: OpenLibraryClient.
    pub catalog: Arc<dyn CatalogSource>,
    pub history: Arc<dyn InteractionStore>,
    pub awards: Arc<dyn AwardStore>,
    /// Random offset source for discovery. Default: ThreadRngSampler.
    pub sampler: Arc<dyn OffsetSampler>,
    pub config: Config,
    /// Cancelled on shutdown; discovery loops run on child tokens.
    pub shutdown: CancellationToken,
}
