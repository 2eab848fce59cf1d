//! Rendering: paints the whole grid onto a [`Surface`].
//!
//! Every call clears the surface and repaints from scratch: background, main
//! title, each cell (border, cover or placeholder, slot title, display name),
//! then the watermark. The renderer reads cell state and never mutates it.
//!
//! Failures are contained per step. A cell whose cover throws falls back to
//! the placeholder; a failed label is logged and the next step still runs.
//! [`render`] itself never returns an error.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::cell::{Cell, CellId};
use crate::config::GridConfig;
use crate::consts::{
    BACKGROUND_COLOR, DRAG_HIGHLIGHT_COLOR, ELLIPSIS, INK_COLOR, MUTED_COLOR, NAME_COLOR, WATERMARK,
    WATERMARK_FONT_SIZE,
};
use crate::layout::{CellGeometry, cell_geometry};
use crate::placeholder::draw_placeholder;
use crate::surface::{Capabilities, DrawError, Font, Surface, TextAlign};

/// Read-only inputs for one frame.
#[derive(Debug)]
pub struct Scene<'a, I> {
    /// Main title drawn above the grid.
    pub title: &'a str,
    /// Cells in canonical index order.
    pub cells: &'a [Cell<I>],
    /// Cell currently under a drag-hover, drawn with a highlighted border.
    pub drag_target: Option<CellId>,
}

/// Per-frame values shared by every cell.
struct Frame<'a> {
    caps: Capabilities,
    config: &'a GridConfig,
    width: f64,
    height: f64,
    drag_target: Option<CellId>,
}

/// Draw a full frame.
///
/// Canvas size is read from the surface, so the same call serves the on-screen
/// canvas and any offscreen export target.
pub fn render<S: Surface>(surface: &mut S, caps: Capabilities, config: &GridConfig, scene: &Scene<'_, S::Image>) {
    let frame = Frame {
        caps,
        config,
        width: surface.width(),
        height: surface.height(),
        drag_target: scene.drag_target,
    };

    clear(surface, &frame);
    guard("title", draw_title(surface, &frame, scene.title));

    for (index, cell) in scene.cells.iter().enumerate() {
        draw_cell(surface, &frame, index, cell);
    }

    guard("watermark", draw_watermark(surface, &frame));
}

// =============================================================
// Frame chrome
// =============================================================

fn clear<S: Surface>(surface: &mut S, frame: &Frame<'_>) {
    surface.clear_rect(0.0, 0.0, frame.width, frame.height);
    surface.set_fill_style(BACKGROUND_COLOR);
    surface.fill_rect(0.0, 0.0, frame.width, frame.height);
}

fn draw_title<S: Surface>(surface: &mut S, frame: &Frame<'_>, title: &str) -> Result<(), DrawError> {
    let config = frame.config;
    surface.set_fill_style(INK_COLOR);
    surface.set_font(Font::bold(config.title_font_size));
    surface.set_text_align(TextAlign::Center);
    surface.fill_text(title, frame.width / 2.0, config.padding + config.title_font_size / 2.0)
}

fn draw_watermark<S: Surface>(surface: &mut S, frame: &Frame<'_>) -> Result<(), DrawError> {
    let padding = frame.config.padding;
    surface.set_fill_style(MUTED_COLOR);
    surface.set_font(Font::regular(WATERMARK_FONT_SIZE));
    surface.set_text_align(TextAlign::Right);
    surface.fill_text(WATERMARK, frame.width - padding, frame.height - padding / 2.0)
}

// =============================================================
// Cells
// =============================================================

fn draw_cell<S: Surface>(surface: &mut S, frame: &Frame<'_>, index: usize, cell: &Cell<S::Image>) {
    let geom = cell_geometry(frame.config, frame.width, frame.height, index);
    let highlighted = frame.drag_target == Some(cell.id);

    if let Err(err) = draw_border(surface, frame, &geom, highlighted) {
        log::error!("border draw failed for cell {}: {err}", cell.id);
    }
    draw_cover(surface, frame.caps, &geom, cell);
    if let Err(err) = draw_cell_title(surface, frame.config, &geom, &cell.title) {
        log::error!("title draw failed for cell {}: {err}", cell.id);
    }
    if let Some(name) = cell.name.as_deref().filter(|n| !n.is_empty()) {
        if let Err(err) = draw_cell_name(surface, frame.config, &geom, name) {
            log::error!("name draw failed for cell {}: {err}", cell.id);
        }
    }
}

fn draw_border<S: Surface>(
    surface: &mut S,
    frame: &Frame<'_>,
    geom: &CellGeometry,
    highlighted: bool,
) -> Result<(), DrawError> {
    let config = frame.config;
    if highlighted {
        surface.set_stroke_style(DRAG_HIGHLIGHT_COLOR);
        surface.set_line_width(config.cell_border_width * 2.0);
    } else {
        surface.set_stroke_style(INK_COLOR);
        surface.set_line_width(config.cell_border_width);
    }

    let (x, y, width, height) = geom.border_rect(config);
    if frame.caps.round_rect {
        surface.begin_path();
        surface.round_rect(x, y, width, height, config.cell_border_radius)?;
        surface.stroke();
    } else {
        surface.stroke_rect(x, y, width, height);
    }
    Ok(())
}

fn draw_cover<S: Surface>(surface: &mut S, caps: Capabilities, geom: &CellGeometry, cell: &Cell<S::Image>) {
    if let Some(image) = &cell.image_object {
        match surface.draw_image(image, geom.cover_x, geom.cover_y, geom.cover_width, geom.cover_height) {
            Ok(()) => return,
            Err(err) => {
                let label = cell.name.clone().unwrap_or_else(|| cell.id.to_string());
                log::error!("cover draw failed for {label}: {err}");
            }
        }
    }
    draw_placeholder(surface, caps, geom.cover_x, geom.cover_y, geom.cover_width, geom.cover_height);
}

fn draw_cell_title<S: Surface>(
    surface: &mut S,
    config: &GridConfig,
    geom: &CellGeometry,
    title: &str,
) -> Result<(), DrawError> {
    surface.set_fill_style(INK_COLOR);
    surface.set_font(Font::regular(config.cell_title_font_size));
    surface.set_text_align(TextAlign::Center);
    surface.fill_text(title, geom.center_x(), geom.title_baseline(config))
}

fn draw_cell_name<S: Surface>(
    surface: &mut S,
    config: &GridConfig,
    geom: &CellGeometry,
    name: &str,
) -> Result<(), DrawError> {
    surface.set_fill_style(NAME_COLOR);
    surface.set_font(Font::regular(config.cell_name_font_size));
    surface.set_text_align(TextAlign::Center);
    let fitted = fit_text_with_ellipsis(surface, name, config.name_max_width(geom.width))?;
    if fitted.is_empty() {
        return Ok(());
    }
    surface.fill_text(&fitted, geom.center_x(), geom.name_baseline(config))
}

// =============================================================
// Text
// =============================================================

/// Shorten `text` one trailing character at a time until it plus an ellipsis
/// fits in `max_width` under the surface's current font.
///
/// Text that already fits is returned unchanged. If not even the bare
/// ellipsis fits, the result is empty and nothing should be drawn.
///
/// # Errors
///
/// Returns `Err` if the surface cannot measure text.
pub fn fit_text_with_ellipsis<S: Surface>(surface: &mut S, text: &str, max_width: f64) -> Result<String, DrawError> {
    if surface.measure_text(text)? <= max_width {
        return Ok(text.to_owned());
    }

    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate = format!("{}{ELLIPSIS}", chars.iter().collect::<String>());
        if surface.measure_text(&candidate)? <= max_width {
            return Ok(candidate);
        }
    }
    Ok(String::new())
}

fn guard(step: &str, result: Result<(), DrawError>) {
    if let Err(err) = result {
        log::error!("{step} draw failed: {err}");
    }
}
