//! Shared constants for the grid engine.

// ── Colours ─────────────────────────────────────────────────────

/// Canvas background.
pub const BACKGROUND_COLOR: &str = "white";

/// Main title, cell borders, and cell titles.
pub const INK_COLOR: &str = "black";

/// Border colour of the cell currently under a drag-hover.
pub const DRAG_HIGHLIGHT_COLOR: &str = "#3b82f6";

/// User-assigned display names under each cell title.
pub const NAME_COLOR: &str = "#4b5563";

/// Placeholder cover fill.
pub const PLACEHOLDER_FILL: &str = "#f3f4f6";

/// Placeholder glyph and watermark.
pub const MUTED_COLOR: &str = "#9ca3af";

// ── Text ────────────────────────────────────────────────────────

/// Suffix appended to truncated display names.
pub const ELLIPSIS: &str = "...";

/// Watermark drawn in the bottom-right corner of every frame.
pub const WATERMARK: &str = "gamegrid.shatranj.space";

/// Watermark font size in pixels.
pub const WATERMARK_FONT_SIZE: f64 = 14.0;

// ── Placeholder ─────────────────────────────────────────────────

/// Glyph edge length as a fraction of the shorter cover side.
pub const PLACEHOLDER_ICON_RATIO: f64 = 0.4;

/// Stroke width of the placeholder glyph.
pub const PLACEHOLDER_LINE_WIDTH: f64 = 3.0;

// ── Scaling ─────────────────────────────────────────────────────

/// Viewport widths above this are clamped before computing the display scale.
pub const MAX_DISPLAY_WIDTH: f64 = 1200.0;

/// Quiet period after the last resize notification before the layout is recomputed.
pub const RESIZE_DEBOUNCE_MS: u32 = 100;

/// Cross-origin mode for cover images, so the canvas stays exportable.
pub const CROSS_ORIGIN_MODE: &str = "anonymous";
