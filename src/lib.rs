//! Grid rendering and cell-state reconciliation engine for the game grid.
//!
//! This crate is compiled to WebAssembly and drives a single `<canvas>` that
//! shows a fixed grid of labeled cover-art cells. It owns the layout math, the
//! full-frame renderer, asynchronous cover loading with stale-result
//! rejection, and the resize/redraw scheduling. The host page is responsible
//! only for drag-and-drop wiring, persistence, and cover search; it talks to
//! the engine through [`web::GridHost`] and the plain data types in [`cell`].
//!
//! Everything except [`web`] is free of browser dependencies and is tested
//! natively against a recording surface.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Immutable layout constants ([`config::GridConfig`]) and validation |
//! | [`cell`] | Cell records, persistence records, and image merge patches |
//! | [`layout`] | Pure cell geometry and hit-testing |
//! | [`surface`] | Drawing-surface trait, fonts, capability probe results |
//! | [`placeholder`] | Gamepad glyph drawn when a cell has no usable cover |
//! | [`render`] | Full-frame renderer |
//! | [`loader`] | At-most-once asynchronous cover loading |
//! | [`scale`] | Display scale computation and resize debouncing |
//! | [`schedule`] | Animation-frame redraw coalescing |
//! | [`web`] | Browser adapter: canvas surface, image fetcher, host |
//! | [`consts`] | Shared colours, fonts, and numeric constants |

pub mod cell;
pub mod config;
pub mod consts;
pub mod layout;
pub mod loader;
pub mod placeholder;
pub mod render;
pub mod scale;
pub mod schedule;
pub mod surface;
pub mod web;

#[cfg(test)]
#[path = "recording_test.rs"]
pub(crate) mod recording;
