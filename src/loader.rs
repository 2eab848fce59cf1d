//! Asynchronous cover loading.
//!
//! The loader decides which cells need a fetch, runs fetches through an
//! [`ImageFetcher`], and turns results into [`ImagePatch`]es for the owner to
//! merge. It never touches the cell collection itself.
//!
//! A load is claimed only for a cell whose `image` is set and whose
//! `image_object` is empty, and only once per `(id, image)` pair: repeated
//! redraws or re-sets of the same source while a load is pending do not issue
//! a second fetch, and a failed source is not retried until the cell's
//! `image` changes or the grid is reset.

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

use std::collections::HashMap;

use crate::cell::{Cell, CellId, ImagePatch};

/// A failed fetch or decode.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to create image element: {0}")]
    Create(String),
    #[error("failed to decode {url}: {message}")]
    Decode { url: String, message: String },
}

/// Resolves an image URL into a drawable handle.
pub trait ImageFetcher {
    type Image;

    /// Fetch and decode `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Self::Image, LoadError>>;
}

/// A claimed load for one cell, tagged with the source it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub id: CellId,
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadStatus {
    InFlight,
    Failed,
}

#[derive(Debug, Clone)]
struct LoadEntry {
    image: String,
    status: LoadStatus,
}

/// Tracks which `(cell, source)` pairs have been issued.
///
/// A cell can have several sources in flight at once when the user swaps
/// covers faster than they load; each keeps its own entry until it finishes.
#[derive(Debug, Default)]
pub struct ImageLoader {
    entries: HashMap<CellId, Vec<LoadEntry>>,
}

impl ImageLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim every load `cells` currently needs, marking each as in flight.
    ///
    /// A source already in flight or already failed for that cell is skipped.
    /// Claiming a new source forgets the cell's earlier failures, so they are
    /// retried if the user switches back to them.
    pub fn claim<I>(&mut self, cells: &[Cell<I>]) -> Vec<LoadRequest> {
        let mut requests = Vec::new();
        for cell in cells.iter().filter(|c| c.needs_load()) {
            let Some(image) = cell.image.as_ref() else {
                continue;
            };
            let entries = self.entries.entry(cell.id).or_default();
            if entries.iter().any(|e| &e.image == image) {
                continue;
            }
            entries.retain(|e| e.status == LoadStatus::InFlight);
            entries.push(LoadEntry { image: image.clone(), status: LoadStatus::InFlight });
            requests.push(LoadRequest { id: cell.id, image: image.clone() });
        }
        requests
    }

    /// Record the end of a claimed load.
    ///
    /// Successful loads are forgotten (the cell now has an `image_object`);
    /// failed ones are remembered so the same source is not fetched again.
    pub fn finish(&mut self, request: &LoadRequest, succeeded: bool) {
        let Some(entries) = self.entries.get_mut(&request.id) else {
            return;
        };
        let Some(at) = entries.iter().position(|e| e.image == request.image) else {
            return;
        };
        if succeeded {
            entries.swap_remove(at);
            if entries.is_empty() {
                self.entries.remove(&request.id);
            }
        } else {
            entries[at].status = LoadStatus::Failed;
        }
    }

    /// Forget all history, e.g. when the whole grid is replaced.
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

/// Run one claimed request and wrap the result as a merge patch.
///
/// # Errors
///
/// Returns the fetcher's [`LoadError`], after logging it.
pub async fn load<F: ImageFetcher>(fetcher: &F, request: &LoadRequest) -> Result<ImagePatch<F::Image>, LoadError> {
    match fetcher.fetch(&request.image).await {
        Ok(image_object) => Ok(ImagePatch { id: request.id, image: request.image.clone(), image_object }),
        Err(err) => {
            log::error!("image load failed for cell {}: {err}", request.id);
            Err(err)
        }
    }
}
