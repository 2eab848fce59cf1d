//! [`Surface`] over a browser `CanvasRenderingContext2d`.

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::surface::{Capabilities, DrawError, Font, Surface, TextAlign};

/// A canvas element and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// `ctx.roundRect`, if this engine has it. Probed once at construction.
    round_rect: Option<Function>,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas` and probe its optional primitives.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, DrawError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| DrawError::from_js("getContext", &e))?
            .ok_or(DrawError::Unsupported("2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| DrawError::Unsupported("2d context"))?;
        let round_rect = probe_method(&ctx, "roundRect");
        if round_rect.is_none() {
            log::info!("canvas has no roundRect; cell borders fall back to plain rectangles");
        }
        Ok(Self { canvas, ctx, round_rect })
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        Capabilities { round_rect: self.round_rect.is_some() }
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

fn probe_method(ctx: &CanvasRenderingContext2d, name: &str) -> Option<Function> {
    match Reflect::get(ctx.as_ref(), &JsValue::from_str(name)) {
        Ok(value) if value.is_function() => Some(value.unchecked_into::<Function>()),
        _ => None,
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn width(&self) -> f64 {
        f64::from(self.canvas.width())
    }

    fn height(&self) -> f64 {
        f64::from(self.canvas.height())
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_font(&mut self, font: Font) {
        self.ctx.set_font(&font.css());
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_str());
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.stroke_rect(x, y, width, height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.ctx.bezier_curve_to(cp1x, cp1y, cp2x, cp2y, x, y);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.rect(x, y, width, height);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), DrawError> {
        self.ctx
            .arc(x, y, radius, start, end)
            .map_err(|e| DrawError::from_js("arc", &e))
    }

    fn round_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) -> Result<(), DrawError> {
        let Some(round_rect) = &self.round_rect else {
            return Err(DrawError::Unsupported("roundRect"));
        };
        let args = Array::of5(&x.into(), &y.into(), &width.into(), &height.into(), &radius.into());
        round_rect
            .apply(self.ctx.as_ref(), &args)
            .map(|_| ())
            .map_err(|e| DrawError::from_js("roundRect", &e))
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), DrawError> {
        self.ctx
            .fill_text(text, x, y)
            .map_err(|e| DrawError::from_js("fillText", &e))
    }

    fn measure_text(&mut self, text: &str) -> Result<f64, DrawError> {
        self.ctx
            .measure_text(text)
            .map(|metrics| metrics.width())
            .map_err(|e| DrawError::from_js("measureText", &e))
    }

    fn draw_image(
        &mut self,
        image: &HtmlImageElement,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), DrawError> {
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, width, height)
            .map_err(|e| DrawError::from_js("drawImage", &e))
    }
}
