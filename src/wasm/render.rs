use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlCanvasElement, Window};

use crate::config::{EffectConfig, FramePacing, FALLBACK_SIZE};
use crate::effect::BackgroundEffect;
use crate::error::EffectError;

type Effect = BackgroundEffect<HtmlCanvasElement>;
type SharedEffect = Rc<RefCell<Option<Effect>>>;
// Holds the frame closure so it can re-request itself.
type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

#[derive(Debug, Clone, Copy)]
enum Pending {
    AnimationFrame(i32),
    Interval(i32),
}

/// A running background: the frame loop, the resize listener and the effect.
///
/// Dropping the handle stops everything.
pub struct BackgroundHandle {
    window: Window,
    effect: SharedEffect,
    resize: Closure<dyn FnMut()>,
    frame: FrameSlot,
    pending: Rc<Cell<Option<Pending>>>,
}

impl BackgroundHandle {
    /// Cancels the loop, unsubscribes from `resize` and releases the program.
    /// Safe to call more than once.
    pub fn stop(&self) {
        match self.pending.take() {
            Some(Pending::AnimationFrame(id)) => {
                self.window.cancel_animation_frame(id).ok();
            }
            Some(Pending::Interval(id)) => self.window.clear_interval_with_handle(id),
            None => {}
        }
        self.window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref())
            .ok();
        self.frame.borrow_mut().take();

        if let Some(effect) = self.effect.borrow_mut().take() {
            effect.teardown();
            log::info!("bg-shader: stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.effect.borrow().is_some()
    }
}

impl Drop for BackgroundHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Finds the configured canvas in the current document and starts on it.
/// Overrides are read from the canvas `data-*` attributes.
pub(crate) fn start_on_page(config: EffectConfig) -> Result<BackgroundHandle, EffectError> {
    let window = window().ok_or_else(|| host_error("no window"))?;
    let document = window.document().ok_or_else(|| host_error("no document"))?;

    let canvas = match document.get_element_by_id(&config.canvas_id) {
        Some(element) => match element.dyn_into::<HtmlCanvasElement>() {
            Ok(canvas) => Some(canvas),
            Err(_) => {
                log::warn!("bg-shader: `{}` is not a canvas", config.canvas_id);
                return Err(EffectError::NotACanvas(config.canvas_id));
            }
        },
        None => None,
    };

    let config = match &canvas {
        Some(canvas) => {
            let dataset = canvas.dataset();
            config.with_overrides(|key| dataset.get(key))
        }
        None => config,
    };
    log::set_max_level(config.log_level.to_level_filter());

    start(window, canvas, &config)
}

/// Starts the effect on `canvas` and drives it until the handle is stopped.
pub fn start(
    window: Window,
    canvas: Option<HtmlCanvasElement>,
    config: &EffectConfig,
) -> Result<BackgroundHandle, EffectError> {
    let effect = BackgroundEffect::initialize(canvas, window_size(&window), config)?;
    let effect: SharedEffect = Rc::new(RefCell::new(Some(effect)));

    // Resize canvas and viewport to fit window
    let resize = {
        let window = window.clone();
        let effect = effect.clone();
        Closure::wrap(Box::new(move || {
            let (width, height) = window_size(&window);
            if let Some(effect) = effect.borrow_mut().as_mut() {
                effect.resize(width, height);
            }
        }) as Box<dyn FnMut()>)
    };
    window
        .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
        .map_err(js_error)?;

    let frame: FrameSlot = Rc::new(RefCell::new(None));
    let pending = Rc::new(Cell::new(None));
    let handle = BackgroundHandle {
        window: window.clone(),
        effect: effect.clone(),
        resize,
        frame: frame.clone(),
        pending: pending.clone(),
    };

    match config.frame_pacing {
        FramePacing::AnimationFrame => {
            let next = frame.clone();
            let host = window.clone();
            let scheduled = pending.clone();
            *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                {
                    let mut effect = effect.borrow_mut();
                    let Some(effect) = effect.as_mut() else {
                        return;
                    };
                    effect.render_frame(now_seconds(&host));
                }

                // schedule next
                match request_frame(&host, &next) {
                    Ok(id) => scheduled.set(Some(Pending::AnimationFrame(id))),
                    Err(err) => log::error!("bg-shader: frame loop stopped: {err}"),
                }
            }) as Box<dyn FnMut()>));

            let id = request_frame(&window, &frame)?;
            pending.set(Some(Pending::AnimationFrame(id)));
        }
        FramePacing::Interval { millis } => {
            let host = window.clone();
            *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                if let Some(effect) = effect.borrow_mut().as_mut() {
                    effect.render_frame(now_seconds(&host));
                }
            }) as Box<dyn FnMut()>));

            let id = {
                let slot = frame.borrow();
                let callback = slot.as_ref().ok_or_else(|| host_error("frame closure missing"))?;
                window
                    .set_interval_with_callback_and_timeout_and_arguments_0(
                        callback.as_ref().unchecked_ref(),
                        i32::try_from(millis).unwrap_or(i32::MAX),
                    )
                    .map_err(js_error)?
            };
            pending.set(Some(Pending::Interval(id)));
            log::debug!("bg-shader: drawing every {millis} ms");
        }
    }

    Ok(handle)
}

fn request_frame(window: &Window, slot: &FrameSlot) -> Result<i32, EffectError> {
    let slot = slot.borrow();
    let callback = slot
        .as_ref()
        .ok_or_else(|| host_error("frame closure missing"))?;
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(js_error)
}

fn window_size(window: &Window) -> (u32, u32) {
    let read = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64());
    match (read(window.inner_width()), read(window.inner_height())) {
        (Some(width), Some(height)) => (width as u32, height as u32),
        _ => FALLBACK_SIZE,
    }
}

/// `performance.now()` in seconds, or the wall clock when it is unavailable.
fn now_seconds(window: &Window) -> f64 {
    match window.performance() {
        Some(performance) => performance.now() / 1000.0,
        None => js_sys::Date::now() / 1000.0,
    }
}

fn host_error(message: &str) -> EffectError {
    log::error!("bg-shader: {message}");
    EffectError::Host(message.to_string())
}

fn js_error(err: JsValue) -> EffectError {
    let message = err
        .as_string()
        .unwrap_or_else(|| format!("{err:?}"));
    host_error(&message)
}
