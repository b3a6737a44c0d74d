//! The favorites collection: local durable list plus optional remote mirror.
//!
//! The whole collection lives as one JSON array under `FAVORITES_KEY`. Every
//! mutation is a read-modify-write of that array. Writers are not serialized
//! against each other, so with more than one writer the later write wins.

use crate::entry::FavoriteEntry;
use crate::error::{FavoritesError, Result};
use crate::mirror::MirrorTask;
use crate::store::KeyValueStore;
use chrono::NaiveDate;
use data_loader::MovieRecord;
use std::sync::Arc;
use sync_client::RemoteSync;
use tracing::{debug, info, instrument, warn};

/// Key the collection is stored under
pub const FAVORITES_KEY: &str = "favorites";

/// Source of "today" for `dateAdded`
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Local result of a save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Added,
    AlreadyFavorited,
}

/// What `save` hands back.
///
/// `mirror` is present only when a new entry was added and an initialized
/// remote was configured.
#[derive(Debug)]
pub struct SaveReceipt {
    pub outcome: SaveOutcome,
    pub mirror: Option<MirrorTask>,
}

impl SaveReceipt {
    pub fn is_added(&self) -> bool {
        self.outcome == SaveOutcome::Added
    }
}

pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
    remote: Option<Arc<dyn RemoteSync>>,
    clock: Clock,
}

impl FavoritesStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            remote: None,
            clock: Arc::new(local_today),
        }
    }

    /// Mirror new favorites to `remote` whenever it reports initialized
    pub fn with_remote(mut self, remote: Arc<dyn RemoteSync>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Add `movie` unless a favorite with the same title already exists.
    ///
    /// Only local persistence can fail this call. The remote append, if any,
    /// runs in a spawned task reported through `SaveReceipt::mirror`.
    #[instrument(skip(self, movie), fields(title = %movie.title))]
    pub async fn save(&self, movie: &MovieRecord) -> Result<SaveReceipt> {
        let mut entries = self.read_all().await;

        if entries.iter().any(|e| e.movie_title == movie.title) {
            debug!("Already a favorite");
            return Ok(SaveReceipt {
                outcome: SaveOutcome::AlreadyFavorited,
                mirror: None,
            });
        }

        let entry = FavoriteEntry::from_movie(movie, (self.clock)());
        entries.push(entry.clone());
        self.write_all(&entries).await?;
        info!("Saved favorite ({} total)", entries.len());

        let mirror = match &self.remote {
            Some(remote) if remote.is_initialized() => {
                Some(MirrorTask::spawn(Arc::clone(remote), &entry))
            }
            Some(_) => {
                debug!("Remote sync not initialized, skipping mirror");
                None
            }
            None => None,
        };

        Ok(SaveReceipt {
            outcome: SaveOutcome::Added,
            mirror,
        })
    }

    /// Drop every entry titled `title`. Removing a non-member is a no-op.
    #[instrument(skip(self))]
    pub async fn remove(&self, title: &str) -> Result<()> {
        let entries = self.read_all().await;
        let before = entries.len();

        let remaining: Vec<FavoriteEntry> = entries
            .into_iter()
            .filter(|e| e.movie_title != title)
            .collect();
        self.write_all(&remaining).await?;

        debug!("Removed {} entries", before - remaining.len());
        Ok(())
    }

    pub async fn is_favorited(&self, title: &str) -> bool {
        self.read_all()
            .await
            .iter()
            .any(|e| e.movie_title == title)
    }

    /// The persisted collection, in insertion order
    pub async fn get_favorites(&self) -> Vec<FavoriteEntry> {
        self.read_all().await
    }

    async fn read_all(&self) -> Vec<FavoriteEntry> {
        let text = match self.store.get(FAVORITES_KEY).await {
            Ok(Some(text)) => text,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not read favorites, treating as empty: {}", e);
                return Vec::new();
            }
        };

        serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!("Corrupt favorites payload, treating as empty: {}", e);
            Vec::new()
        })
    }

    async fn write_all(&self, entries: &[FavoriteEntry]) -> Result<()> {
        let text =
            serde_json::to_string(entries).map_err(|e| FavoritesError::Encode(e.to_string()))?;
        self.store.set(FAVORITES_KEY, text).await
    }
}
