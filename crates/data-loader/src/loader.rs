//! Single-load dataset cache.
//!
//! The dataset is fetched and parsed at most once per cache. The first
//! caller starts the load and stores it in the cache slot as a shared
//! future; every caller that arrives while it is running awaits that same
//! future and gets the same result. A successful result becomes the cache.
//! A failed one clears the slot so the next call can retry.
//!
//! ```text
//!   Empty ──load_dataset──▶ Loading(gen, shared) ──ok──▶ Ready(records)
//!     ▲                            │
//!     └────────────err─────────────┘
//!   reset() from any state ──▶ Empty
//! ```

use crate::error::{LoadError, Result};
use crate::normalizer;
use crate::parser;
use crate::source::{DatasetSource, StaticSource};
use crate::types::{MovieRecord, RawRow};
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// The loaded, immutable record set shared by every query
pub type Dataset = Arc<[MovieRecord]>;

/// Default bound on a single fetch of the raw source
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

type SharedLoad = Shared<BoxFuture<'static, Result<Dataset>>>;

enum Slot {
    Empty,
    Loading { generation: u64, load: SharedLoad },
    Ready(Dataset),
}

struct CacheInner {
    slot: Slot,
    /// Bumped whenever a load starts or the cache is reset, so a load can
    /// only settle the slot it was started for
    generation: u64,
}

/// Owned cache slot for one dataset.
///
/// The lock is only held to inspect or swap the slot, never across an await.
pub struct DatasetCache {
    inner: Mutex<CacheInner>,
}

impl DatasetCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                slot: Slot::Empty,
                generation: 0,
            }),
        }
    }

    /// Create a cache that already holds `records`
    pub fn with_records(records: Vec<MovieRecord>) -> Self {
        let cache = Self::new();
        cache.inner.lock().slot = Slot::Ready(records.into());
        cache
    }

    /// The cached records, if a load has completed
    pub fn get(&self) -> Option<Dataset> {
        match &self.inner.lock().slot {
            Slot::Ready(records) => Some(Arc::clone(records)),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.inner.lock().slot, Slot::Ready(_))
    }

    /// Drop the cached records and forget any in-flight load.
    ///
    /// A load that was running keeps going for whoever is awaiting it, but
    /// its result is no longer written back.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.slot = Slot::Empty;
    }

    /// Write a finished load back, if the slot still belongs to it
    fn settle(&self, generation: u64, result: &Result<Dataset>) {
        let mut inner = self.inner.lock();
        let owns_slot = matches!(
            &inner.slot,
            Slot::Loading { generation: g, .. } if *g == generation
        );
        if !owns_slot {
            return;
        }

        inner.slot = match result {
            Ok(records) => Slot::Ready(Arc::clone(records)),
            Err(e) => {
                warn!("Dataset load failed, a later call may retry: {}", e);
                Slot::Empty
            }
        };
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads the dataset from a source into its cache, once.
pub struct DatasetLoader {
    source: Arc<dyn DatasetSource>,
    cache: DatasetCache,
    fetch_timeout: Duration,
}

impl DatasetLoader {
    /// Create a loader with an empty cache
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self {
            source,
            cache: DatasetCache::new(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Create a loader whose cache already holds `records`
    pub fn preloaded(records: Vec<MovieRecord>) -> Self {
        Self {
            source: Arc::new(StaticSource::new("preloaded", "")),
            cache: DatasetCache::with_records(records),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Configure the fetch bound (default: 30s)
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.is_loaded()
    }

    /// Drop the cache so the next call loads again
    pub fn reset(&self) {
        self.cache.reset();
    }

    /// Return the cached records, loading them first if needed.
    ///
    /// Concurrent callers share one in-flight load and all receive its
    /// result. Errors only happen while no cache exists yet.
    #[instrument(skip(self), fields(source = %self.source.describe()))]
    pub async fn load_dataset(&self) -> Result<Dataset> {
        let (generation, load) = {
            let mut inner = self.cache.inner.lock();
            let pending = match &inner.slot {
                Slot::Ready(records) => return Ok(Arc::clone(records)),
                Slot::Loading { generation, load } => Some((*generation, load.clone())),
                Slot::Empty => None,
            };

            match pending {
                Some(pending) => {
                    debug!("Joining in-flight dataset load");
                    pending
                }
                None => {
                    inner.generation += 1;
                    let generation = inner.generation;
                    let load = fetch_and_build(Arc::clone(&self.source), self.fetch_timeout)
                        .boxed()
                        .shared();
                    inner.slot = Slot::Loading {
                        generation,
                        load: load.clone(),
                    };
                    (generation, load)
                }
            }
        };

        let result = load.await;
        self.cache.settle(generation, &result);
        result
    }
}

/// Fetch the raw text, then parse and normalize it off the async threads
async fn fetch_and_build(source: Arc<dyn DatasetSource>, fetch_timeout: Duration) -> Result<Dataset> {
    let source_name = source.describe();
    info!("Loading dataset from {}", source_name);
    let start = Instant::now();

    let text = tokio::time::timeout(fetch_timeout, source.fetch())
        .await
        .map_err(|_| LoadError::Timeout {
            source_name: source_name.clone(),
            seconds: fetch_timeout.as_secs(),
        })??;

    let records = tokio::task::spawn_blocking(move || build_records(&text))
        .await
        .map_err(|e| LoadError::Parse {
            reason: format!("Parse task failed: {}", e),
        })??;

    info!(
        "Loaded {} movies from {} in {:.2?}",
        records.len(),
        source_name,
        start.elapsed()
    );
    Ok(records.into())
}

/// Parse table text into normalized records.
///
/// Untitled rows are dropped first; the surviving rows are numbered in order
/// and normalized in parallel (order is preserved).
pub fn build_records(text: &str) -> Result<Vec<MovieRecord>> {
    let rows = parser::parse_rows(text)?;
    let total = rows.len();

    let titled: Vec<RawRow> = rows.into_iter().filter(RawRow::has_title).collect();
    if titled.len() < total {
        debug!("Dropped {} rows without a title", total - titled.len());
    }

    Ok(titled
        .into_par_iter()
        .enumerate()
        .map(|(index, row)| normalizer::normalize(row, index))
        .collect())
}
