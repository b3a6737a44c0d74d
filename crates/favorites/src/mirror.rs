//! Best-effort forwarding of saved favorites to the remote sheet.

use crate::entry::FavoriteEntry;
use std::fmt;
use std::sync::Arc;
use sync_client::RemoteSync;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Name of the remote sheet favorites are appended to
pub const FAVORITES_SHEET: &str = "Favorites";

/// How a mirror attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorOutcome {
    Mirrored,
    Failed(String),
}

impl fmt::Display for MirrorOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirrorOutcome::Mirrored => write!(f, "mirrored"),
            MirrorOutcome::Failed(reason) => write!(f, "mirror failed: {}", reason),
        }
    }
}

/// Handle to a mirror attempt running in the background.
///
/// Dropping the handle detaches the task; it still runs to completion.
#[derive(Debug)]
pub struct MirrorTask {
    handle: JoinHandle<MirrorOutcome>,
}

impl MirrorTask {
    /// Spawn the append of `entry` onto the current runtime.
    pub(crate) fn spawn(remote: Arc<dyn RemoteSync>, entry: &FavoriteEntry) -> Self {
        let title = entry.movie_title.clone();
        let row = entry.to_sheet_row();

        let handle = tokio::spawn(async move {
            match remote.append(FAVORITES_SHEET, vec![row]).await {
                Ok(receipt) => {
                    info!("Mirrored favorite {} ({} rows)", title, receipt.updated_rows);
                    MirrorOutcome::Mirrored
                }
                Err(e) => {
                    warn!("Failed to mirror favorite {}: {}", title, e);
                    MirrorOutcome::Failed(e.to_string())
                }
            }
        });

        Self { handle }
    }

    /// Wait for the attempt to finish.
    pub async fn outcome(self) -> MirrorOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => MirrorOutcome::Failed(format!("mirror task aborted: {}", e)),
        }
    }
}
