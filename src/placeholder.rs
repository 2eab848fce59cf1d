//! Placeholder cover: a grey box with a gamepad glyph.
//!
//! The glyph is data, not code: [`GAMEPAD_GLYPH`] is a list of
//! [`PathCommand`]s in a unit square, scaled into place by [`gamepad_glyph`]
//! and replayed onto a surface by [`trace`]. Tests assert on the command list
//! directly without any surface.

#[cfg(test)]
#[path = "placeholder_test.rs"]
mod placeholder_test;

use std::f64::consts::TAU;

use crate::consts::{MUTED_COLOR, PLACEHOLDER_FILL, PLACEHOLDER_ICON_RATIO, PLACEHOLDER_LINE_WIDTH};
use crate::surface::{Capabilities, DrawError, Surface};

/// One path primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    BezierCurveTo { cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64 },
    Arc { x: f64, y: f64, radius: f64, start: f64, end: f64 },
    RoundRect { x: f64, y: f64, width: f64, height: f64, radius: f64 },
    ClosePath,
    Fill,
    Stroke,
}

impl PathCommand {
    /// Map a unit-square command into the square at `(x, y)` with edge `size`.
    #[must_use]
    pub fn scaled(self, x: f64, y: f64, size: f64) -> Self {
        let px = |u: f64| x + u * size;
        let py = |v: f64| y + v * size;
        match self {
            Self::MoveTo { x: u, y: v } => Self::MoveTo { x: px(u), y: py(v) },
            Self::LineTo { x: u, y: v } => Self::LineTo { x: px(u), y: py(v) },
            Self::BezierCurveTo { cp1x, cp1y, cp2x, cp2y, x: u, y: v } => Self::BezierCurveTo {
                cp1x: px(cp1x),
                cp1y: py(cp1y),
                cp2x: px(cp2x),
                cp2y: py(cp2y),
                x: px(u),
                y: py(v),
            },
            Self::Arc { x: u, y: v, radius, start, end } => {
                Self::Arc { x: px(u), y: py(v), radius: radius * size, start, end }
            }
            Self::RoundRect { x: u, y: v, width, height, radius } => Self::RoundRect {
                x: px(u),
                y: py(v),
                width: width * size,
                height: height * size,
                radius: radius * size,
            },
            Self::BeginPath | Self::ClosePath | Self::Fill | Self::Stroke => self,
        }
    }
}

/// Gamepad outline in a unit square: body, d-pad, two face buttons, two grips.
pub const GAMEPAD_GLYPH: &[PathCommand] = &[
    // Body
    PathCommand::BeginPath,
    PathCommand::RoundRect { x: 0.0, y: 0.25, width: 1.0, height: 0.5, radius: 0.15 },
    PathCommand::Stroke,
    // D-pad
    PathCommand::BeginPath,
    PathCommand::MoveTo { x: 0.25, y: 0.38 },
    PathCommand::LineTo { x: 0.25, y: 0.62 },
    PathCommand::MoveTo { x: 0.13, y: 0.5 },
    PathCommand::LineTo { x: 0.37, y: 0.5 },
    PathCommand::Stroke,
    // Face buttons
    PathCommand::BeginPath,
    PathCommand::Arc { x: 0.68, y: 0.44, radius: 0.05, start: 0.0, end: TAU },
    PathCommand::Fill,
    PathCommand::BeginPath,
    PathCommand::Arc { x: 0.8, y: 0.56, radius: 0.05, start: 0.0, end: TAU },
    PathCommand::Fill,
    // Grips
    PathCommand::BeginPath,
    PathCommand::MoveTo { x: 0.12, y: 0.75 },
    PathCommand::BezierCurveTo { cp1x: 0.08, cp1y: 0.9, cp2x: 0.2, cp2y: 0.95, x: 0.3, y: 0.75 },
    PathCommand::MoveTo { x: 0.7, y: 0.75 },
    PathCommand::BezierCurveTo { cp1x: 0.8, cp1y: 0.95, cp2x: 0.92, cp2y: 0.9, x: 0.88, y: 0.75 },
    PathCommand::Stroke,
];

/// The gamepad glyph placed in the square at `(x, y)` with edge `size`.
#[must_use]
pub fn gamepad_glyph(x: f64, y: f64, size: f64) -> Vec<PathCommand> {
    GAMEPAD_GLYPH.iter().map(|cmd| cmd.scaled(x, y, size)).collect()
}

/// Replay path commands onto a surface.
///
/// Rounded rectangles degrade to plain rectangles when the surface lacks
/// `roundRect`.
///
/// # Errors
///
/// Returns the first error raised by the surface.
pub fn trace<S: Surface>(surface: &mut S, caps: Capabilities, commands: &[PathCommand]) -> Result<(), DrawError> {
    for cmd in commands {
        match *cmd {
            PathCommand::BeginPath => surface.begin_path(),
            PathCommand::MoveTo { x, y } => surface.move_to(x, y),
            PathCommand::LineTo { x, y } => surface.line_to(x, y),
            PathCommand::BezierCurveTo { cp1x, cp1y, cp2x, cp2y, x, y } => {
                surface.bezier_curve_to(cp1x, cp1y, cp2x, cp2y, x, y);
            }
            PathCommand::Arc { x, y, radius, start, end } => surface.arc(x, y, radius, start, end)?,
            PathCommand::RoundRect { x, y, width, height, radius } => {
                if caps.round_rect {
                    surface.round_rect(x, y, width, height, radius)?;
                } else {
                    surface.rect(x, y, width, height);
                }
            }
            PathCommand::ClosePath => surface.close_path(),
            PathCommand::Fill => surface.fill(),
            PathCommand::Stroke => surface.stroke(),
        }
    }
    Ok(())
}

/// Fill the rectangle and draw a centred gamepad glyph at 40% of its shorter side.
///
/// Never fails: drawing errors are logged and the rest of the frame carries on.
pub fn draw_placeholder<S: Surface>(surface: &mut S, caps: Capabilities, x: f64, y: f64, width: f64, height: f64) {
    if let Err(err) = paint(surface, caps, x, y, width, height) {
        log::error!("placeholder draw failed at ({x}, {y}): {err}");
    }
}

fn paint<S: Surface>(
    surface: &mut S,
    caps: Capabilities,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Result<(), DrawError> {
    surface.set_fill_style(PLACEHOLDER_FILL);
    surface.fill_rect(x, y, width, height);

    let size = width.min(height) * PLACEHOLDER_ICON_RATIO;
    if size <= 0.0 {
        return Ok(());
    }
    let icon_x = x + (width - size) / 2.0;
    let icon_y = y + (height - size) / 2.0;

    surface.set_fill_style(MUTED_COLOR);
    surface.set_stroke_style(MUTED_COLOR);
    surface.set_line_width(PLACEHOLDER_LINE_WIDTH);
    trace(surface, caps, &gamepad_glyph(icon_x, icon_y, size))
}
