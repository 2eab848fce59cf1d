//! The drawing surface the renderer paints onto.
//!
//! [`Surface`] mirrors the subset of the Canvas 2D API the grid needs. The
//! browser implementation lives in [`crate::web::surface`]; tests use a
//! recording surface that logs every call. Calls that can throw in the
//! browser return `Result<_, DrawError>`; the rest are infallible, matching
//! `web_sys::CanvasRenderingContext2d`.
//!
//! Optional primitives are described by [`Capabilities`], probed once when a
//! surface is created and passed down to every draw call.

use wasm_bindgen::JsValue;

/// A failed drawing call.
#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    #[error("canvas call `{op}` failed: {message}")]
    Canvas { op: &'static str, message: String },
    #[error("primitive `{0}` is not supported by this surface")]
    Unsupported(&'static str),
}

impl DrawError {
    /// Wrap a thrown JS value from a canvas call.
    #[must_use]
    pub fn from_js(op: &'static str, err: &JsValue) -> Self {
        let message = err.as_string().unwrap_or_else(|| format!("{err:?}"));
        Self::Canvas { op, message }
    }
}

/// Horizontal anchor for `fill_text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    /// CSS keyword for `CanvasRenderingContext2D.textAlign`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// A sans-serif font at a pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size_px: f64,
    pub bold: bool,
}

impl Font {
    #[must_use]
    pub fn regular(size_px: f64) -> Self {
        Self { size_px, bold: false }
    }

    #[must_use]
    pub fn bold(size_px: f64) -> Self {
        Self { size_px, bold: true }
    }

    /// CSS font shorthand, e.g. `bold 32px sans-serif`.
    #[must_use]
    pub fn css(self) -> String {
        if self.bold {
            format!("bold {}px sans-serif", self.size_px)
        } else {
            format!("{}px sans-serif", self.size_px)
        }
    }
}

/// Optional primitives a surface supports, resolved once per surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// `roundRect` path primitive. Without it rounded rectangles become plain ones.
    pub round_rect: bool,
}

/// A 2D paintable target.
pub trait Surface {
    /// Decoded image type accepted by [`Surface::draw_image`].
    type Image;

    /// Backing-store width in pixels.
    fn width(&self) -> f64;
    /// Backing-store height in pixels.
    fn height(&self) -> f64;

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_font(&mut self, font: Font);
    fn set_text_align(&mut self, align: TextAlign);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Add a circular arc. Throws in the browser for a negative radius.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface rejects the arc.
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), DrawError>;
    /// Add a rounded rectangle. Only called when [`Capabilities::round_rect`] is set.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface rejects the rectangle or lacks the primitive.
    fn round_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) -> Result<(), DrawError>;
    fn fill(&mut self);
    fn stroke(&mut self);

    /// # Errors
    ///
    /// Returns `Err` if the surface fails to draw the text.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), DrawError>;
    /// Width of `text` in the current font.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface cannot measure text.
    fn measure_text(&mut self, text: &str) -> Result<f64, DrawError>;
    /// Draw `image` scaled into the given rectangle.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the image is broken or not yet decoded.
    fn draw_image(&mut self, image: &Self::Image, x: f64, y: f64, width: f64, height: f64) -> Result<(), DrawError>;
}
