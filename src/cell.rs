//! Cell state: the grid slots, their persisted subset, and image merge patches.
//!
//! The cell collection belongs to whoever owns the application state (the
//! browser host, or a test). Core functions borrow it as a slice; the image
//! loader never writes to it directly but hands back an [`ImagePatch`] that
//! the owner applies with [`apply_image_patch`]. Patches are tagged with the
//! `image` they were loaded for, so a completion that arrives after the user
//! replaced or cleared the cover is discarded instead of resurrecting the old
//! picture.

#[cfg(test)]
#[path = "cell_test.rs"]
mod cell_test;

use serde::{Deserialize, Serialize};

/// Stable, zero-based index of a grid slot.
pub type CellId = u32;

/// Slot titles for the default 5x3 grid.
pub const DEFAULT_CELL_TITLES: [&str; 15] = [
    "All-Time Favorite",
    "Most Influential",
    "Best Soundtrack",
    "Best Story",
    "Best Art Style",
    "Most Underrated",
    "Most Overrated",
    "Biggest Letdown",
    "Comfort Game",
    "Hardest Game",
    "Best Ending",
    "Best Protagonist",
    "Best Villain",
    "Most Hours Played",
    "Want to Replay",
];

/// One grid slot.
///
/// `I` is the drawable handle produced by the image loader for the active
/// surface (an `HtmlImageElement` in the browser).
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<I> {
    pub id: CellId,
    /// Static slot label drawn under the cover.
    pub title: String,
    /// Cover source URL or data URL.
    pub image: Option<String>,
    /// User-assigned display name drawn under the title.
    pub name: Option<String>,
    /// Decoded cover, set once per `image` value by an applied [`ImagePatch`].
    pub image_object: Option<I>,
}

impl<I> Cell<I> {
    #[must_use]
    pub fn new(id: CellId, title: impl Into<String>) -> Self {
        Self { id, title: title.into(), image: None, name: None, image_object: None }
    }

    /// Replace the cover source. A changed source drops the decoded cover so the loader fetches the new one.
    pub fn set_image(&mut self, image: Option<String>) {
        if self.image != image {
            self.image = image;
            self.image_object = None;
        }
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Whether this cell has a source to load and nothing decoded for it yet.
    #[must_use]
    pub fn needs_load(&self) -> bool {
        self.image.is_some() && self.image_object.is_none()
    }

    /// The persisted subset of this cell.
    #[must_use]
    pub fn record(&self) -> CellRecord {
        CellRecord { id: self.id, image: self.image.clone(), name: self.name.clone() }
    }
}

/// The subset of a cell that survives a reload, keyed by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub id: CellId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Build a fresh grid with one empty cell per title, ids in title order.
#[must_use]
pub fn initial_cells<I, S: AsRef<str>>(titles: &[S]) -> Vec<Cell<I>> {
    titles
        .iter()
        .zip(0..)
        .map(|(title, id)| Cell::new(id, title.as_ref()))
        .collect()
}

/// Merge saved records onto cells by id. Records for unknown ids are skipped.
///
/// Returns the number of records applied.
pub fn merge_records<I>(cells: &mut [Cell<I>], records: &[CellRecord]) -> usize {
    let mut applied = 0;
    for record in records {
        let Some(cell) = cells.iter_mut().find(|c| c.id == record.id) else {
            log::warn!("skipping saved record for unknown cell {}", record.id);
            continue;
        };
        cell.set_image(record.image.clone());
        cell.set_name(record.name.clone());
        applied += 1;
    }
    applied
}

/// Decoded cover for one cell, produced by the image loader.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePatch<I> {
    pub id: CellId,
    /// The `image` value this load was issued for.
    pub image: String,
    pub image_object: I,
}

/// What happened when a patch was offered to the cell collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Applied,
    /// The cell's `image` changed while the load was in flight.
    Stale,
    UnknownCell,
}

/// Apply a loader patch to the one cell it targets, leaving every other cell untouched.
pub fn apply_image_patch<I>(cells: &mut [Cell<I>], patch: ImagePatch<I>) -> PatchOutcome {
    let Some(cell) = cells.iter_mut().find(|c| c.id == patch.id) else {
        log::warn!("dropping image for unknown cell {}", patch.id);
        return PatchOutcome::UnknownCell;
    };
    if cell.image.as_deref() != Some(patch.image.as_str()) {
        log::debug!("discarding stale image for cell {}: {}", patch.id, patch.image);
        return PatchOutcome::Stale;
    }
    cell.image_object = Some(patch.image_object);
    PatchOutcome::Applied
}
