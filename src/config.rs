//! Layout configuration for a single grid.
//!
//! [`GridConfig`] is an immutable value passed into every layout and render
//! call; nothing in the crate reads layout constants from global state, so
//! independent grids (and tests) can coexist in one process. Configs arriving
//! from the host as JSON are parsed with [`GridConfig::from_json`], which fills
//! missing keys from [`GridConfig::default`] and rejects layouts whose derived
//! geometry would go negative or spill the cover out of its cell.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellId};
use crate::layout::GridArea;

/// Errors raised while building or validating a [`GridConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid grid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must be a non-negative finite number, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("grid must have at least one row and one column, got {cols}x{rows}")]
    EmptyGrid { cols: u32, rows: u32 },
    #[error("grid holds {expected} cells but {actual} were supplied")]
    CellCountMismatch { expected: usize, actual: usize },
    #[error("cell at index {index} has id {id}; ids must equal their grid index")]
    CellIds { index: usize, id: CellId },
    #[error("grid area is negative ({width}x{height}) after padding and title")]
    NegativeGridArea { width: f64, height: f64 },
    #[error("cover width is not positive ({0}) after cell padding and border")]
    CoverWidth(f64),
    #[error("cover needs {needed}px of height but cells are only {available}px tall")]
    CoverOverflow { needed: f64, available: f64 },
    #[error("display name budget is not positive ({0}) after cell padding")]
    NameBudget(f64),
}

/// Layout constants for one grid canvas.
///
/// All lengths are in backing-store pixels. The cover aspect ratio is
/// `width / height`, so a portrait box cover is below `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Backing-store width of the canvas.
    pub width: f64,
    /// Backing-store height of the canvas.
    pub height: f64,
    /// Outer margin around the title and the grid.
    pub padding: f64,
    /// Vertical band reserved for the main title above the grid.
    pub title_height: f64,
    pub title_font_size: f64,
    pub grid_cols: u32,
    pub grid_rows: u32,
    pub cell_border_width: f64,
    pub cell_border_radius: f64,
    /// Inset between the cell rectangle and its border, and again between the border and the cover.
    pub cell_padding: f64,
    /// Cover width divided by cover height.
    pub cover_ratio: f64,
    pub cell_title_font_size: f64,
    /// Gap between the cover's bottom edge and the cell title.
    pub cell_title_margin: f64,
    pub cell_name_font_size: f64,
    /// Gap between the cell title and the display name.
    pub cell_name_margin: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 1200.0,
            padding: 20.0,
            title_height: 50.0,
            title_font_size: 32.0,
            grid_cols: 5,
            grid_rows: 3,
            cell_border_width: 2.0,
            cell_border_radius: 8.0,
            cell_padding: 8.0,
            cover_ratio: 0.75,
            cell_title_font_size: 16.0,
            cell_title_margin: 6.0,
            cell_name_font_size: 14.0,
            cell_name_margin: 4.0,
        }
    }
}

impl GridConfig {
    /// Parse a config from JSON, filling absent keys from the defaults.
    ///
    /// The result is only checked for self-consistency; the cell count is
    /// checked separately by [`GridConfig::validate`] once cells are known.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any
    /// self-consistency error from [`GridConfig::check_geometry`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.check_geometry()?;
        Ok(config)
    }

    /// Number of cells this grid holds.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.grid_cols as usize * self.grid_rows as usize
    }

    /// Validate the config against the number of cells it will lay out.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CellCountMismatch`] when `cell_count` differs
    /// from `grid_cols * grid_rows`, or any error from
    /// [`GridConfig::check_geometry`].
    pub fn validate(&self, cell_count: usize) -> Result<(), ConfigError> {
        self.check_geometry()?;
        let expected = self.cell_count();
        if expected != cell_count {
            return Err(ConfigError::CellCountMismatch { expected, actual: cell_count });
        }
        Ok(())
    }

    /// Validate the config against the cells it will lay out.
    ///
    /// The renderer places cells by position but highlights and patches them
    /// by id, so `cells[i].id` must be `i`.
    ///
    /// # Errors
    ///
    /// Returns any error from [`GridConfig::validate`], or
    /// [`ConfigError::CellIds`] for the first cell whose id is not its index.
    pub fn validate_cells<I>(&self, cells: &[Cell<I>]) -> Result<(), ConfigError> {
        self.validate(cells.len())?;
        match cells.iter().enumerate().find(|(index, cell)| cell.id as usize != *index) {
            Some((index, cell)) => Err(ConfigError::CellIds { index, id: cell.id }),
            None => Ok(()),
        }
    }

    /// Check that every derived length at the configured canvas size is non-negative
    /// and that covers fit inside their cells.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn check_geometry(&self) -> Result<(), ConfigError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("cover_ratio", self.cover_ratio)?;
        positive("title_font_size", self.title_font_size)?;
        positive("cell_title_font_size", self.cell_title_font_size)?;
        positive("cell_name_font_size", self.cell_name_font_size)?;
        non_negative("padding", self.padding)?;
        non_negative("title_height", self.title_height)?;
        non_negative("cell_border_width", self.cell_border_width)?;
        non_negative("cell_border_radius", self.cell_border_radius)?;
        non_negative("cell_padding", self.cell_padding)?;
        non_negative("cell_title_margin", self.cell_title_margin)?;
        non_negative("cell_name_margin", self.cell_name_margin)?;
        if self.grid_cols == 0 || self.grid_rows == 0 {
            return Err(ConfigError::EmptyGrid { cols: self.grid_cols, rows: self.grid_rows });
        }

        let area = GridArea::new(self, self.width, self.height);
        if area.width < 0.0 || area.height < 0.0 {
            return Err(ConfigError::NegativeGridArea { width: area.width, height: area.height });
        }

        let inset = self.cover_inset();
        let cover_width = area.cell_width - inset * 2.0;
        if cover_width <= 0.0 {
            return Err(ConfigError::CoverWidth(cover_width));
        }
        let needed = cover_width / self.cover_ratio + inset * 2.0;
        if needed > area.cell_height {
            return Err(ConfigError::CoverOverflow { needed, available: area.cell_height });
        }

        let name_budget = self.name_max_width(area.cell_width);
        if name_budget <= 0.0 {
            return Err(ConfigError::NameBudget(name_budget));
        }
        Ok(())
    }

    /// Distance from a cell edge to its cover edge.
    #[must_use]
    pub fn cover_inset(&self) -> f64 {
        self.cell_padding + self.cell_border_width
    }

    /// Widest a display name may render inside a cell of `cell_width`.
    #[must_use]
    pub fn name_max_width(&self, cell_width: f64) -> f64 {
        cell_width - self.cell_padding * 4.0
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
