//! Owner of a mounted grid in the browser.
//!
//! ARCHITECTURE
//! ============
//! `GridHost` holds the authoritative cell collection and wires the core
//! together: state changes claim cover loads and request a redraw; loads run
//! as `spawn_local` futures and merge their patches back by id; redraws are
//! coalesced into one `requestAnimationFrame` callback that paints whatever
//! the state is when the frame runs. Window resizes are debounced, then
//! rescale the canvas's CSS size and request a redraw.
//!
//! Dropping the host removes the resize listener, cancels the pending
//! debounce timer and animation frame, and stops new redraws. In-flight
//! loads are not cancelled; they hold only a weak reference and find the
//! host gone when they complete.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlCanvasElement, HtmlImageElement, Window};

use super::fetch::HtmlImageFetcher;
use super::js_message;
use super::surface::CanvasSurface;
use crate::cell::{Cell, CellId, CellRecord, PatchOutcome, apply_image_patch};
use crate::config::{ConfigError, GridConfig};
use crate::consts::RESIZE_DEBOUNCE_MS;
use crate::layout::{ClientRect, cell_at, client_to_canvas};
use crate::loader::{ImageLoader, load};
use crate::render::{Scene, render};
use crate::scale::{CanvasSizing, Debouncer, canvas_sizing};
use crate::schedule::RedrawScheduler;
use crate::surface::{Capabilities, DrawError, Surface};

/// Cell type held by the browser host.
pub type HtmlCell = Cell<HtmlImageElement>;

/// Errors raised while mounting or driving a grid.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("no browser window")]
    NoWindow,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Draw(#[from] DrawError),
    #[error("DOM call `{op}` failed: {message}")]
    Dom { op: &'static str, message: String },
}

impl HostError {
    fn dom(op: &'static str, err: &wasm_bindgen::JsValue) -> Self {
        Self::Dom { op, message: js_message(err) }
    }
}

struct GridState {
    title: String,
    cells: Vec<HtmlCell>,
    drag_target: Option<CellId>,
}

struct HostInner {
    config: GridConfig,
    caps: Capabilities,
    surface: RefCell<CanvasSurface>,
    state: RefCell<GridState>,
    loader: RefCell<ImageLoader>,
    scheduler: RefCell<RedrawScheduler>,
    sizing: RefCell<Option<CanvasSizing>>,
    /// Reused for every animation frame request.
    on_frame: Closure<dyn FnMut(f64)>,
    frame_handle: RefCell<Option<i32>>,
}

/// A grid mounted on a canvas element.
pub struct GridHost {
    inner: Rc<HostInner>,
    _resize: ResizeListener,
}

impl GridHost {
    /// Mount a grid on `canvas`, size it to the viewport, start cover loads, and paint.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the config does not fit `cells`, the canvas has no 2D
    /// context, or the resize listener cannot be attached.
    pub fn mount(
        canvas: HtmlCanvasElement,
        config: GridConfig,
        title: impl Into<String>,
        cells: Vec<HtmlCell>,
    ) -> Result<Self, HostError> {
        config.validate_cells(&cells)?;
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let surface = CanvasSurface::new(canvas)?;
        let caps = surface.capabilities();

        let state = GridState { title: title.into(), cells, drag_target: None };
        let inner = Rc::new_cyclic(|weak: &Weak<HostInner>| {
            let weak = weak.clone();
            let on_frame = Closure::wrap(Box::new(move |_ts: f64| {
                if let Some(inner) = weak.upgrade() {
                    inner.run_frame();
                }
            }) as Box<dyn FnMut(f64)>);
            HostInner {
                config,
                caps,
                surface: RefCell::new(surface),
                state: RefCell::new(state),
                loader: RefCell::new(ImageLoader::new()),
                scheduler: RefCell::new(RedrawScheduler::new()),
                sizing: RefCell::new(None),
                on_frame,
                frame_handle: RefCell::new(None),
            }
        });

        let resize = ResizeListener::attach(window, Rc::downgrade(&inner), Debouncer::new(RESIZE_DEBOUNCE_MS))?;
        HostInner::fit_viewport(&inner);
        HostInner::start_loads(&inner);
        log::debug!("grid mounted with {} cells", inner.state.borrow().cells.len());

        Ok(Self { inner, _resize: resize })
    }

    /// Replace the whole grid, e.g. after reloading from storage.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CellCountMismatch`] if `cells` does not fill the
    /// grid, or [`ConfigError::CellIds`] if an id is not its grid index.
    pub fn set_cells(&self, cells: Vec<HtmlCell>) -> Result<(), HostError> {
        self.inner.config.validate_cells(&cells)?;
        self.inner.loader.borrow_mut().reset();
        self.inner.state.borrow_mut().cells = cells;
        HostInner::start_loads(&self.inner);
        HostInner::request_redraw(&self.inner);
        Ok(())
    }

    /// Set a cell's cover and display name, as a drop or import does.
    ///
    /// Returns `false` if no cell has that id.
    pub fn update_cell(&self, id: CellId, image: Option<String>, name: Option<String>) -> bool {
        {
            let mut state = self.inner.state.borrow_mut();
            let Some(cell) = state.cells.iter_mut().find(|c| c.id == id) else {
                log::warn!("update for unknown cell {id}");
                return false;
            };
            cell.set_image(image);
            cell.set_name(name);
        }
        HostInner::start_loads(&self.inner);
        HostInner::request_redraw(&self.inner);
        true
    }

    /// Set or clear the cell under a drag-hover.
    pub fn set_drag_target(&self, target: Option<CellId>) {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.drag_target == target {
                return;
            }
            state.drag_target = target;
        }
        HostInner::request_redraw(&self.inner);
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.inner.state.borrow_mut().title = title.into();
        HostInner::request_redraw(&self.inner);
    }

    /// Queue a redraw on the next animation frame.
    pub fn redraw(&self) {
        HostInner::request_redraw(&self.inner);
    }

    /// Persisted subset of every cell, in grid order.
    #[must_use]
    pub fn records(&self) -> Vec<CellRecord> {
        self.inner.state.borrow().cells.iter().map(Cell::record).collect()
    }

    /// Current canvas sizing, once the first viewport fit has run.
    #[must_use]
    pub fn sizing(&self) -> Option<CanvasSizing> {
        *self.inner.sizing.borrow()
    }

    /// Cell under a pointer given in client (viewport) coordinates.
    #[must_use]
    pub fn cell_at_client(&self, client_x: f64, client_y: f64) -> Option<CellId> {
        let surface = self.inner.surface.borrow();
        let dom_rect = surface.canvas().get_bounding_client_rect();
        let rect = ClientRect {
            left: dom_rect.left(),
            top: dom_rect.top(),
            width: dom_rect.width(),
            height: dom_rect.height(),
        };
        let (width, height) = (surface.width(), surface.height());
        let (x, y) = client_to_canvas(rect, width, height, client_x, client_y)?;
        cell_at(&self.inner.config, width, height, x, y)
    }

    /// Paint the current state immediately and return it as a PNG data URL.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas is tainted or cannot be encoded.
    pub fn export_png(&self) -> Result<String, HostError> {
        self.inner.paint();
        self.inner
            .surface
            .borrow()
            .canvas()
            .to_data_url_with_type("image/png")
            .map_err(|e| HostError::dom("toDataURL", &e))
    }
}

impl Drop for GridHost {
    fn drop(&mut self) {
        self.inner.scheduler.borrow_mut().shutdown();
        if let Some(handle) = self.inner.frame_handle.borrow_mut().take() {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.cancel_animation_frame(handle) {
                    log::warn!("cancelAnimationFrame failed: {}", js_message(&err));
                }
            }
        }
        log::debug!("grid unmounted");
    }
}

impl HostInner {
    fn paint(&self) {
        let state = self.state.borrow();
        let scene = Scene { title: &state.title, cells: &state.cells, drag_target: state.drag_target };
        render(&mut *self.surface.borrow_mut(), self.caps, &self.config, &scene);
    }

    fn run_frame(&self) {
        self.frame_handle.borrow_mut().take();
        if self.scheduler.borrow_mut().begin_frame() {
            self.paint();
        }
    }

    fn request_redraw(inner: &Rc<Self>) {
        if !inner.scheduler.borrow_mut().request() {
            return;
        }
        let queued = web_sys::window().map(|window| {
            window.request_animation_frame(inner.on_frame.as_ref().unchecked_ref())
        });
        match queued {
            Some(Ok(handle)) => {
                *inner.frame_handle.borrow_mut() = Some(handle);
            }
            Some(Err(err)) => {
                log::warn!("requestAnimationFrame failed, painting now: {}", js_message(&err));
                inner.scheduler.borrow_mut().abandon();
                inner.paint();
            }
            None => {
                inner.scheduler.borrow_mut().abandon();
                inner.paint();
            }
        }
    }

    fn start_loads(inner: &Rc<Self>) {
        let requests = {
            let state = inner.state.borrow();
            inner.loader.borrow_mut().claim(&state.cells)
        };
        for request in requests {
            let weak = Rc::downgrade(inner);
            spawn_local(async move {
                let result = load(&HtmlImageFetcher, &request).await;
                let Some(inner) = weak.upgrade() else {
                    log::debug!("grid gone before cover for cell {} resolved", request.id);
                    return;
                };
                inner.loader.borrow_mut().finish(&request, result.is_ok());
                let Ok(patch) = result else {
                    return;
                };
                let outcome = apply_image_patch(&mut inner.state.borrow_mut().cells, patch);
                if outcome == PatchOutcome::Applied {
                    Self::request_redraw(&inner);
                }
            });
        }
    }

    fn fit_viewport(inner: &Rc<Self>) {
        match inner.apply_sizing() {
            Ok(sizing) => {
                log::debug!(
                    "canvas scaled to {:.4} ({}x{} css px)",
                    sizing.scale,
                    sizing.display_width,
                    sizing.display_height
                );
                Self::request_redraw(inner);
            }
            Err(err) => log::error!("canvas resize failed: {err}"),
        }
    }

    fn apply_sizing(&self) -> Result<CanvasSizing, HostError> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let viewport_width = window
            .inner_width()
            .map_err(|e| HostError::dom("innerWidth", &e))?
            .as_f64()
            .unwrap_or(self.config.width);
        let sizing = canvas_sizing(&self.config, viewport_width);

        let surface = self.surface.borrow();
        let canvas = surface.canvas();
        canvas.set_width(sizing.backing_width);
        canvas.set_height(sizing.backing_height);
        let style = canvas.style();
        style
            .set_property("width", &format!("{}px", sizing.display_width))
            .map_err(|e| HostError::dom("style.width", &e))?;
        style
            .set_property("height", &format!("{}px", sizing.display_height))
            .map_err(|e| HostError::dom("style.height", &e))?;

        *self.sizing.borrow_mut() = Some(sizing);
        Ok(sizing)
    }
}

/// Window `resize` subscription with a replaceable debounce timer.
///
/// Each notification supersedes the previous timer; dropping the listener
/// unsubscribes and cancels whatever timer is pending.
struct ResizeListener {
    window: Window,
    callback: Closure<dyn FnMut()>,
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl ResizeListener {
    fn attach(window: Window, inner: Weak<HostInner>, debouncer: Debouncer) -> Result<Self, HostError> {
        let pending = Rc::new(RefCell::new(None::<Timeout>));
        let quiet_ms = debouncer.quiet_ms();
        let debouncer = Rc::new(RefCell::new(debouncer));

        let pending_for_cb = Rc::clone(&pending);
        let callback = Closure::wrap(Box::new(move || {
            let ticket = debouncer.borrow_mut().trigger();
            let debouncer = Rc::clone(&debouncer);
            let inner = inner.clone();
            let timeout = Timeout::new(quiet_ms, move || {
                if !debouncer.borrow_mut().settle(ticket) {
                    return;
                }
                if let Some(inner) = inner.upgrade() {
                    HostInner::fit_viewport(&inner);
                }
            });
            // Dropping the previous Timeout clears it.
            *pending_for_cb.borrow_mut() = Some(timeout);
        }) as Box<dyn FnMut()>);

        window
            .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
            .map_err(|e| HostError::dom("addEventListener", &e))?;
        Ok(Self { window, callback, pending })
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove resize listener: {}", js_message(&err));
        }
        self.pending.borrow_mut().take();
    }
}
