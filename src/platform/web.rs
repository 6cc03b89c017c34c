//! Browser host: canvas 2D surface, listeners and the animation frame loop

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::DVec2;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::frame_loop::FrameLoop;
use crate::error::MountError;
use crate::renderer::{Rgba, Surface};
use crate::settings::FieldSettings;
use crate::sim::{Bounds, ParticleField};

/// Canvas attribute holding optional JSON field settings
const SETTINGS_ATTRIBUTE: &str = "data-field-settings";

fn js_err(e: JsValue) -> MountError {
    MountError::Js(format!("{:?}", e))
}

/// Install the panic hook and console logger. Safe to call more than once.
#[wasm_bindgen]
pub fn initialize() {
    console_error_panic_hook::set_once();
    // Err only means a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

/// [`Surface`] backed by a `<canvas>` 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, MountError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or(MountError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| MountError::NoContext)?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the element's layout size
    pub fn fit_to_layout(&self) {
        self.canvas.set_width(self.canvas.offset_width().max(0) as u32);
        self.canvas.set_height(self.canvas.offset_height().max(0) as u32);
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x, center.y, radius, 0.0, TAU);
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }
}

/// State touched by the frame callback and the listeners
struct Mounted {
    field: ParticleField,
    surface: CanvasSurface,
    frame_loop: FrameLoop<i32>,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A particle field attached to a canvas element.
///
/// Runs until [`ParticleCanvas::unmount`] is called or the handle is dropped.
#[wasm_bindgen]
pub struct ParticleCanvas {
    window: Window,
    canvas: HtmlCanvasElement,
    state: Rc<RefCell<Mounted>>,
    frame_callback: FrameCallback,
    on_resize: Closure<dyn FnMut(web_sys::Event)>,
    on_pointer_move: Closure<dyn FnMut(MouseEvent)>,
}

#[wasm_bindgen]
impl ParticleCanvas {
    /// Mount on the first element matching `selector`. `class_name` is added
    /// to the canvas class list and has no effect on the simulation.
    #[wasm_bindgen(js_name = mount)]
    pub fn mount_js(selector: &str, class_name: Option<String>) -> Result<ParticleCanvas, JsValue> {
        Self::mount(selector, class_name.as_deref()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Stop the loop, cancel the pending frame and remove listeners
    pub fn unmount(&mut self) {
        let pending = self.state.borrow_mut().frame_loop.stop();
        if let Some(handle) = pending {
            let _ = self.window.cancel_animation_frame(handle);
        }
        // Breaks the callback's reference to itself
        if self.frame_callback.borrow_mut().take().is_none() {
            return;
        }

        let _ = self.window.remove_event_listener_with_callback(
            "resize",
            self.on_resize.as_ref().unchecked_ref(),
        );
        let _ = self.canvas.remove_event_listener_with_callback(
            "mousemove",
            self.on_pointer_move.as_ref().unchecked_ref(),
        );
        log::info!("Particle field unmounted");
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.state.borrow().frame_loop.is_running()
    }

    #[wasm_bindgen(getter, js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.state.borrow().field.len()
    }
}

impl ParticleCanvas {
    pub fn mount(selector: &str, class_name: Option<&str>) -> Result<Self, MountError> {
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let document = window.document().ok_or(MountError::NoDocument)?;
        let canvas: HtmlCanvasElement = document
            .query_selector(selector)
            .map_err(js_err)?
            .ok_or_else(|| MountError::CanvasNotFound(selector.to_string()))?
            .dyn_into()
            .map_err(|_| MountError::NotACanvas)?;

        if let Some(class_name) = class_name {
            for token in class_name.split_whitespace() {
                canvas.class_list().add_1(token).map_err(js_err)?;
            }
        }

        let surface = CanvasSurface::new(canvas.clone())?;
        // Size first: particle count comes from the sized width
        surface.fit_to_layout();

        let settings = load_settings(&canvas);
        let seed = js_sys::Date::now() as u64;
        let field = ParticleField::initialize(Bounds::of(&surface), settings, seed);
        log::info!(
            "Particle field mounted on '{}' with {} particles",
            selector,
            field.len()
        );

        let state = Rc::new(RefCell::new(Mounted {
            field,
            surface,
            frame_loop: FrameLoop::new(),
        }));

        let on_resize = {
            let state = state.clone();
            Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut m = state.borrow_mut();
                m.surface.fit_to_layout();
                let bounds = Bounds::of(&m.surface);
                m.field.resize(bounds);
            })
        };

        let on_pointer_move = {
            let state = state.clone();
            let canvas = canvas.clone();
            let window = window.clone();
            Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas.get_bounding_client_rect();
                let x = event.client_x() as f64 - rect.left();
                let y = event.client_y() as f64 - rect.top();
                let now = window
                    .performance()
                    .map(|p| p.now())
                    .unwrap_or_else(js_sys::Date::now);
                state.borrow_mut().field.on_pointer_move(x, y, now);
            })
        };

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        {
            let state = state.clone();
            let window = window.clone();
            let next = frame_callback.clone();
            *frame_callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                let mut guard = state.borrow_mut();
                let Mounted {
                    field,
                    surface,
                    frame_loop,
                } = &mut *guard;

                if !frame_loop.begin_frame() {
                    return;
                }
                field.frame(surface, time);

                if let Some(callback) = next.borrow().as_ref() {
                    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                        Ok(handle) => frame_loop.set_pending(handle),
                        Err(e) => {
                            log::warn!("requestAnimationFrame failed: {:?}", e);
                            frame_loop.stop();
                        }
                    }
                }
            }));
        }

        let mounted = Self {
            window,
            canvas,
            state,
            frame_callback,
            on_resize,
            on_pointer_move,
        };
        // On error the drop below unmounts, removing whatever was attached
        mounted.attach()?;
        Ok(mounted)
    }

    /// Install listeners and schedule the first frame
    fn attach(&self) -> Result<(), MountError> {
        self.window
            .add_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
            .map_err(js_err)?;
        self.canvas
            .add_event_listener_with_callback(
                "mousemove",
                self.on_pointer_move.as_ref().unchecked_ref(),
            )
            .map_err(js_err)?;

        let mut m = self.state.borrow_mut();
        if !m.frame_loop.start() {
            return Ok(());
        }
        let callback = self.frame_callback.borrow();
        if let Some(callback) = callback.as_ref() {
            let handle = self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .map_err(js_err)?;
            m.frame_loop.set_pending(handle);
        }
        Ok(())
    }
}

impl Drop for ParticleCanvas {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Settings from the canvas attribute, or defaults if absent or invalid
fn load_settings(canvas: &HtmlCanvasElement) -> FieldSettings {
    match canvas.get_attribute(SETTINGS_ATTRIBUTE) {
        Some(json) => match FieldSettings::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded field settings from {}", SETTINGS_ATTRIBUTE);
                settings
            }
            Err(e) => {
                log::warn!("{}; using default field settings", e);
                FieldSettings::default()
            }
        },
        None => FieldSettings::default(),
    }
}
