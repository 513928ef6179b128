#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the carousel.
//!
//! [`InfiniteScroll`] mounts a [`Carousel`] over the page's lane containers,
//! listens for wheel events on the window, and drives each settle pass with
//! a one-shot `setTimeout`. Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::rc::Rc;

use carousel_core::{Carousel, CarouselConfig, CarouselError, Direction};
use js_sys::{Function, Reflect};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, WheelEvent, Window};

use crate::dom::DomHost;
use crate::timer::{SettleTimer, timeout_ms};

type SharedCarousel = Rc<RefCell<Carousel<DomHost>>>;
type SharedTimer = Rc<RefCell<SettleTimer>>;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn to_js(err: &CarouselError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Report a failure that has no caller to return to.
fn report(context: &str, err: &CarouselError) {
    warn!(target: "carousel_web", error = %err, "{context} failed");
    console_error(&format!("carousel {context} failed: {err}"));
}

/// Arms the settle timer after a step and clears it when it fires.
struct Scheduler {
    carousel: SharedCarousel,
    window: Window,
    timer: SharedTimer,
    callback: Function,
}

impl Scheduler {
    /// Arm the settle timer if a transition is in flight and none is pending.
    fn arm_if_animating(&self) {
        let (animating, delay) = {
            let carousel = self.carousel.borrow();
            (carousel.is_animating(), carousel.settle_delay())
        };
        if !self.timer.borrow().needs_arming(animating) {
            return;
        }
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(&self.callback, timeout_ms(delay))
        {
            Ok(handle) => self.timer.borrow_mut().armed(handle),
            Err(_) => {
                // No timer available: settle now rather than stay animating.
                if let Err(err) = self.carousel.borrow_mut().settle() {
                    report("settle", &err);
                }
            }
        }
    }
}

/// Infinite lockstep carousel bound to `[data-name="ProjectNav"]` and
/// `[data-name="ProjectCarousel"]`.
#[wasm_bindgen]
pub struct InfiniteScroll {
    carousel: SharedCarousel,
    scheduler: Rc<Scheduler>,
    window: Window,
    wheel_listener: Option<Closure<dyn FnMut(WheelEvent)>>,
    _settle_callback: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl InfiniteScroll {
    /// Mount over the current document. `config_json` is an optional JSON
    /// object; omitted fields keep their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<InfiniteScroll, JsValue> {
        install_panic_hook();

        let config = match config_json.as_deref() {
            Some(json) => CarouselConfig::from_json(json).map_err(|err| to_js(&err))?,
            None => CarouselConfig::default(),
        };
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        let carousel = Carousel::mount(config, DomHost::locate(document)).map_err(|err| to_js(&err))?;
        let carousel: SharedCarousel = Rc::new(RefCell::new(carousel));
        let timer: SharedTimer = Rc::new(RefCell::new(SettleTimer::new()));

        let settle_callback = {
            let carousel = Rc::clone(&carousel);
            let timer = Rc::clone(&timer);
            Closure::<dyn FnMut()>::new(move || {
                timer.borrow_mut().fired();
                if let Err(err) = carousel.borrow_mut().settle() {
                    report("settle", &err);
                }
            })
        };
        let scheduler = Rc::new(Scheduler {
            carousel: Rc::clone(&carousel),
            window: window.clone(),
            timer,
            callback: settle_callback.as_ref().unchecked_ref::<Function>().clone(),
        });

        let wheel_listener = {
            let scheduler = Rc::clone(&scheduler);
            Closure::<dyn FnMut(WheelEvent)>::new(move |event: WheelEvent| {
                event.prevent_default();
                let outcome = scheduler.carousel.borrow_mut().on_wheel(event.delta_y());
                if let Err(err) = outcome {
                    report("wheel step", &err);
                }
                scheduler.arm_if_animating();
            })
        };
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            wheel_listener.as_ref().unchecked_ref(),
            &options,
        )?;
        debug!(target: "carousel_web", "wheel listener attached");

        Ok(Self {
            carousel,
            scheduler,
            window,
            wheel_listener: Some(wheel_listener),
            _settle_callback: settle_callback,
        })
    }

    /// Index of the focused project name.
    #[wasm_bindgen(getter, js_name = projectIndex)]
    #[must_use]
    pub fn project_index(&self) -> u32 {
        u32::try_from(self.carousel.borrow().project_index()).unwrap_or(u32::MAX)
    }

    /// Index of the focused image.
    #[wasm_bindgen(getter, js_name = imageIndex)]
    #[must_use]
    pub fn image_index(&self) -> u32 {
        u32::try_from(self.carousel.borrow().image_index()).unwrap_or(u32::MAX)
    }

    #[wasm_bindgen(getter, js_name = focusedProject)]
    #[must_use]
    pub fn focused_project(&self) -> String {
        self.carousel.borrow().focused_project().to_owned()
    }

    #[wasm_bindgen(getter, js_name = isAnimating)]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.carousel.borrow().is_animating()
    }

    /// Request one step: positive `direction` moves forward, anything else
    /// backward. Returns whether a transition started.
    pub fn scroll(&self, direction: i32) -> Result<bool, JsValue> {
        let direction = if direction > 0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        let outcome = self.carousel.borrow_mut().scroll(direction);
        self.scheduler.arm_if_animating();
        outcome.map(|outcome| outcome.started()).map_err(|err| to_js(&err))
    }

    /// Controller state as a JSON string.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.carousel.borrow().snapshot())
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Detach the wheel listener, cancel any pending settle, and remove
    /// every node this carousel created.
    pub fn dispose(&mut self) -> Result<(), JsValue> {
        self.detach_listeners();
        let removed = self
            .carousel
            .borrow_mut()
            .detach()
            .map_err(|err| to_js(&err))?;
        debug!(target: "carousel_web", removed, "carousel disposed");
        Ok(())
    }
}

impl InfiniteScroll {
    fn detach_listeners(&mut self) {
        if let Some(listener) = self.wheel_listener.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("wheel", listener.as_ref().unchecked_ref());
        }
        if let Some(handle) = self.scheduler.timer.borrow_mut().take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

impl Drop for InfiniteScroll {
    fn drop(&mut self) {
        self.detach_listeners();
    }
}
