#![allow(clippy::float_cmp)]

use super::*;
use crate::recording::{Op, RecordingSurface};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

const ROUNDED: Capabilities = Capabilities { round_rect: true };
const SQUARE: Capabilities = Capabilities { round_rect: false };

// =============================================================
// Glyph data
// =============================================================

#[test]
fn glyph_fits_unit_square() {
    for cmd in GAMEPAD_GLYPH {
        let points: Vec<(f64, f64)> = match *cmd {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => vec![(x, y)],
            PathCommand::BezierCurveTo { cp1x, cp1y, cp2x, cp2y, x, y } => vec![(cp1x, cp1y), (cp2x, cp2y), (x, y)],
            PathCommand::Arc { x, y, radius, .. } => vec![(x - radius, y - radius), (x + radius, y + radius)],
            PathCommand::RoundRect { x, y, width, height, .. } => vec![(x, y), (x + width, y + height)],
            _ => Vec::new(),
        };
        for (x, y) in points {
            assert!((0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y), "{cmd:?} leaves the unit square");
        }
    }
}

#[test]
fn glyph_has_body_dpad_buttons_grips() {
    let round_rects = GAMEPAD_GLYPH.iter().filter(|c| matches!(c, PathCommand::RoundRect { .. })).count();
    let arcs = GAMEPAD_GLYPH.iter().filter(|c| matches!(c, PathCommand::Arc { .. })).count();
    let lines = GAMEPAD_GLYPH.iter().filter(|c| matches!(c, PathCommand::LineTo { .. })).count();
    let curves = GAMEPAD_GLYPH.iter().filter(|c| matches!(c, PathCommand::BezierCurveTo { .. })).count();
    assert_eq!((round_rects, lines, arcs, curves), (1, 2, 2, 2));
}

#[test]
fn scaled_maps_points_into_square() {
    let cmd = PathCommand::LineTo { x: 0.5, y: 0.25 }.scaled(100.0, 200.0, 40.0);
    assert_eq!(cmd, PathCommand::LineTo { x: 120.0, y: 210.0 });
}

#[test]
fn scaled_scales_radii_but_not_angles() {
    let cmd = PathCommand::Arc { x: 0.5, y: 0.5, radius: 0.1, start: 0.0, end: TAU }.scaled(0.0, 0.0, 50.0);
    match cmd {
        PathCommand::Arc { x, y, radius, start, end } => {
            assert_eq!((x, y), (25.0, 25.0));
            assert!(approx_eq(radius, 5.0));
            assert_eq!((start, end), (0.0, TAU));
        }
        other => panic!("expected arc, got {other:?}"),
    }
}

#[test]
fn scaled_leaves_path_markers_alone() {
    assert_eq!(PathCommand::Stroke.scaled(5.0, 5.0, 2.0), PathCommand::Stroke);
}

#[test]
fn gamepad_glyph_has_one_command_per_template_entry() {
    assert_eq!(gamepad_glyph(0.0, 0.0, 10.0).len(), GAMEPAD_GLYPH.len());
}

// =============================================================
// Tracing
// =============================================================

#[test]
fn trace_uses_round_rect_when_supported() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    trace(&mut surface, ROUNDED, &gamepad_glyph(0.0, 0.0, 10.0)).unwrap();
    assert_eq!(surface.count(|op| matches!(op, Op::RoundRect(..))), 1);
    assert_eq!(surface.count(|op| matches!(op, Op::Rect(..))), 0);
}

#[test]
fn trace_falls_back_to_rect_without_round_rect() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    trace(&mut surface, SQUARE, &gamepad_glyph(0.0, 0.0, 10.0)).unwrap();
    assert_eq!(surface.count(|op| matches!(op, Op::RoundRect(..))), 0);
    assert!(surface.ops.contains(&Op::Rect(0.0, 2.5, 10.0, 5.0)));
}

#[test]
fn trace_stops_at_first_error() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    let commands = [
        PathCommand::BeginPath,
        PathCommand::Arc { x: 0.0, y: 0.0, radius: -1.0, start: 0.0, end: TAU },
        PathCommand::Fill,
    ];
    assert!(trace(&mut surface, ROUNDED, &commands).is_err());
    assert_eq!(surface.ops, vec![Op::BeginPath]);
}

// =============================================================
// Placeholder
// =============================================================

#[test]
fn placeholder_fills_the_cover_box() {
    let mut surface = RecordingSurface::new(400.0, 400.0);
    draw_placeholder(&mut surface, ROUNDED, 10.0, 20.0, 200.0, 300.0);
    assert_eq!(surface.ops[0], Op::FillStyle(PLACEHOLDER_FILL.into()));
    assert_eq!(surface.ops[1], Op::FillRect(10.0, 20.0, 200.0, 300.0));
}

#[test]
fn placeholder_glyph_is_centred_at_forty_percent() {
    let mut surface = RecordingSurface::new(400.0, 400.0);
    draw_placeholder(&mut surface, ROUNDED, 10.0, 20.0, 200.0, 300.0);
    // size = 80, so the glyph square starts at (70, 130).
    let expected = gamepad_glyph(70.0, 130.0, 80.0);
    let PathCommand::RoundRect { x, y, width, height, radius } = expected[1] else {
        panic!("glyph body is not a rounded rectangle");
    };
    assert!(surface.ops.contains(&Op::RoundRect(x, y, width, height, radius)));
    assert_eq!(x, 70.0);
    assert_eq!(width, 80.0);
}

#[test]
fn placeholder_uses_muted_ink() {
    let mut surface = RecordingSurface::new(400.0, 400.0);
    draw_placeholder(&mut surface, ROUNDED, 0.0, 0.0, 100.0, 100.0);
    assert!(surface.ops.contains(&Op::StrokeStyle(MUTED_COLOR.into())));
    assert!(surface.ops.contains(&Op::LineWidth(PLACEHOLDER_LINE_WIDTH)));
}

#[test]
fn placeholder_with_empty_box_draws_no_glyph() {
    let mut surface = RecordingSurface::new(400.0, 400.0);
    draw_placeholder(&mut surface, ROUNDED, 0.0, 0.0, 0.0, 100.0);
    assert_eq!(surface.ops.len(), 2);
}

#[test]
fn placeholder_swallows_surface_errors() {
    let mut surface = RecordingSurface::new(400.0, 400.0);
    surface.fail_round_rect = true;
    draw_placeholder(&mut surface, ROUNDED, 0.0, 0.0, 100.0, 100.0);
    assert_eq!(surface.count(|op| matches!(op, Op::FillRect(..))), 1);
}

#[test]
fn placeholder_is_deterministic() {
    let mut a = RecordingSurface::new(400.0, 400.0);
    let mut b = RecordingSurface::new(400.0, 400.0);
    draw_placeholder(&mut a, SQUARE, 5.0, 5.0, 120.0, 160.0);
    draw_placeholder(&mut b, SQUARE, 5.0, 5.0, 120.0, 160.0);
    assert_eq!(a.ops, b.ops);
}
