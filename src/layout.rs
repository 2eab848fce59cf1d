//! Cell geometry: where each cell, its border, cover, and labels go.
//!
//! Everything here is a pure function of a [`GridConfig`] and the canvas
//! size. The renderer calls it once per cell per frame; the drag-and-drop
//! wiring uses [`cell_at`] to find the drop target. Cell sizes are the grid
//! span divided evenly, so partial pixels are left as-is rather than
//! redistributed.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::cell::CellId;
use crate::config::GridConfig;

/// The rectangle the grid occupies below the title band, plus the per-cell size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl GridArea {
    #[must_use]
    pub fn new(config: &GridConfig, canvas_width: f64, canvas_height: f64) -> Self {
        let top = config.padding + config.title_height;
        let width = canvas_width - config.padding * 2.0;
        let height = canvas_height - top - config.padding;
        Self {
            left: config.padding,
            top,
            width,
            height,
            cell_width: width / f64::from(config.grid_cols),
            cell_height: height / f64::from(config.grid_rows),
        }
    }
}

/// Row and column of a cell, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

/// Map a cell index to its row and column (row-major).
#[must_use]
pub fn grid_position(config: &GridConfig, index: usize) -> GridPosition {
    let cols = config.grid_cols as usize;
    GridPosition { row: index / cols, col: index % cols }
}

/// Placement of one cell and its cover on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub cover_x: f64,
    pub cover_y: f64,
    pub cover_width: f64,
    pub cover_height: f64,
}

impl CellGeometry {
    /// Horizontal centre of the cell, where labels are anchored.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Border rectangle `(x, y, width, height)`, inset by half the cell padding.
    #[must_use]
    pub fn border_rect(&self, config: &GridConfig) -> (f64, f64, f64, f64) {
        let half = config.cell_padding / 2.0;
        (self.x + half, self.y + half, self.width - config.cell_padding, self.height - config.cell_padding)
    }

    /// Baseline of the slot title under the cover.
    #[must_use]
    pub fn title_baseline(&self, config: &GridConfig) -> f64 {
        self.cover_y + self.cover_height + config.cell_title_margin + config.cell_title_font_size
    }

    /// Baseline of the display name under the slot title.
    #[must_use]
    pub fn name_baseline(&self, config: &GridConfig) -> f64 {
        self.title_baseline(config) + config.cell_name_margin + config.cell_name_font_size
    }
}

/// Compute the geometry of cell `index` on a canvas of the given size.
#[must_use]
pub fn cell_geometry(config: &GridConfig, canvas_width: f64, canvas_height: f64, index: usize) -> CellGeometry {
    let area = GridArea::new(config, canvas_width, canvas_height);
    let pos = grid_position(config, index);

    #[allow(clippy::cast_precision_loss)]
    let (col, row) = (pos.col as f64, pos.row as f64);
    let x = area.left + col * area.cell_width;
    let y = area.top + row * area.cell_height;

    let inset = config.cover_inset();
    let cover_width = area.cell_width - inset * 2.0;

    CellGeometry {
        x,
        y,
        width: area.cell_width,
        height: area.cell_height,
        cover_x: x + inset,
        cover_y: y + inset,
        cover_width,
        cover_height: cover_width / config.cover_ratio,
    }
}

/// Find the cell under a canvas point given in backing-store pixels.
///
/// Returns `None` for points in the title band, the outer padding, or
/// outside the canvas.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn cell_at(config: &GridConfig, canvas_width: f64, canvas_height: f64, x: f64, y: f64) -> Option<CellId> {
    let area = GridArea::new(config, canvas_width, canvas_height);
    let dx = x - area.left;
    let dy = y - area.top;
    if !(dx.is_finite() && dy.is_finite()) || dx < 0.0 || dy < 0.0 || dx >= area.width || dy >= area.height {
        return None;
    }
    let col = ((dx / area.cell_width).floor() as u32).min(config.grid_cols.saturating_sub(1));
    let row = ((dy / area.cell_height).floor() as u32).min(config.grid_rows.saturating_sub(1));
    Some(row * config.grid_cols + col)
}

/// On-screen box of the canvas element, in client (viewport) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Map a client-coordinate point into backing-store pixels.
///
/// Uses the element's rendered box rather than the computed display scale,
/// so page CSS that constrains the canvas does not skew the result. Returns
/// `None` while the element has no rendered area.
#[must_use]
pub fn client_to_canvas(
    rect: ClientRect,
    canvas_width: f64,
    canvas_height: f64,
    client_x: f64,
    client_y: f64,
) -> Option<(f64, f64)> {
    if !(rect.width > 0.0 && rect.height > 0.0) {
        return None;
    }
    let x = (client_x - rect.left) * canvas_width / rect.width;
    let y = (client_y - rect.top) * canvas_height / rect.height;
    Some((x, y))
}
