//! Browser binding: owns the canvas, the frame loop, the settle timer and the
//! DOM listeners, and forwards everything to the core navigator and engine.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use flipbook_core::config::{BookConfig, ParticleConfig};
use flipbook_core::input::{Control, InputEvent, Key, MarginSide, SwipeTracker};
use flipbook_core::navigation::Transition;
use flipbook_core::overlay::Overlay;
use flipbook_core::surface::{Surface, SurfaceSize};
use flipbook_core::theme::ThemeFade;
use flipbook_core::view::PageView;
use flipbook_core::{Catalog, Follow, LoopToken, Navigator, ParticleEngine};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, HtmlElement, KeyboardEvent, TouchEvent};

use crate::canvas::CanvasSurface;
use crate::instance::InstanceBuffer;

struct Inner {
    catalog: Catalog,
    nav: Navigator,
    engine: ParticleEngine,
    canvas: HtmlCanvasElement,
    /// `None` when no 2D context could be obtained; the engine stays inert.
    surface: Option<CanvasSurface>,
    /// The only pending animation-frame callback; replacing it cancels the old one.
    frame: Option<AnimationFrame>,
    /// Pending settle of the flip in flight; dropping it cancels the settle.
    settle: Option<Timeout>,
    theme: ThemeFade,
    overlay: Overlay,
    fx_rng: SmallRng,
    swipe: SwipeTracker,
    instances: InstanceBuffer,
    on_change: Option<js_sys::Function>,
}

#[wasm_bindgen]
pub struct Book {
    inner: Rc<RefCell<Inner>>,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl Book {
    /// Create a book drawing particles on `canvas`. `catalog_json` replaces
    /// the built-in seven-movement catalog when given.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, catalog_json: Option<String>) -> Result<Book, JsValue> {
        let catalog = match catalog_json {
            Some(json) => Catalog::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Catalog::reference(),
        };
        let config = BookConfig::default();
        let nav = Navigator::for_catalog(&catalog, &config);
        let now = js_sys::Date::now();

        fit_canvas(&canvas);
        let surface = CanvasSurface::new(&canvas);
        if surface.is_none() {
            warn!("book: 2d context unavailable, particles disabled");
        }

        let inner = Inner {
            theme: ThemeFade::settled(nav.theme(&catalog), config.theme_fade_ms),
            overlay: Overlay::new(None, now),
            catalog,
            nav,
            engine: ParticleEngine::new(ParticleConfig::default()),
            canvas,
            surface,
            frame: None,
            settle: None,
            fx_rng: SmallRng::from_entropy(),
            swipe: SwipeTracker::new(),
            instances: InstanceBuffer::default(),
            on_change: None,
        };
        Ok(Book {
            inner: Rc::new(RefCell::new(inner)),
            listeners: Vec::new(),
        })
    }

    /// Listen for keys and resizes on the window and for touches on `root`.
    pub fn attach(&mut self, root: &HtmlElement) -> Result<(), JsValue> {
        self.listeners.clear();
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let weak = Rc::downgrade(&self.inner);
        self.listeners.push(EventListener::new_with_options(
            &window,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let Some(key) = Key::from_dom(&event.key()) else {
                    return;
                };
                if dispatch(&weak, InputEvent::Key(key)) {
                    event.prevent_default();
                }
            },
        ));

        let weak = Rc::downgrade(&self.inner);
        self.listeners.push(EventListener::new(&window, "resize", move |_| {
            if let Some(inner) = weak.upgrade() {
                resize(&inner);
            }
        }));

        let weak = Rc::downgrade(&self.inner);
        self.listeners.push(EventListener::new(root, "touchstart", move |event| {
            if let (Some(inner), Some((x, y))) = (weak.upgrade(), first_touch(event)) {
                inner.borrow_mut().swipe.touch_start(x, y);
            }
        }));

        let weak = Rc::downgrade(&self.inner);
        self.listeners.push(EventListener::new(root, "touchmove", move |event| {
            if let (Some(inner), Some((x, y))) = (weak.upgrade(), first_touch(event)) {
                inner.borrow_mut().swipe.touch_move(x, y);
            }
        }));

        let weak = Rc::downgrade(&self.inner);
        self.listeners.push(EventListener::new(root, "touchend", move |_| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let gesture = inner.borrow_mut().swipe.touch_end();
            if let Some(gesture) = gesture {
                dispatch(&weak, InputEvent::Swipe(gesture));
            }
        }));

        debug!("book: attached listeners={}", self.listeners.len());
        Ok(())
    }

    /// Called with no arguments whenever the page, flip state or theme target changes.
    pub fn set_on_change(&mut self, callback: Option<js_sys::Function>) {
        self.inner.borrow_mut().on_change = callback;
    }

    pub fn next(&self) -> bool {
        dispatch(&Rc::downgrade(&self.inner), InputEvent::Click(Control::Next))
    }

    pub fn prev(&self) -> bool {
        dispatch(&Rc::downgrade(&self.inner), InputEvent::Click(Control::Prev))
    }

    /// Page-dot click; also the programmatic jump.
    pub fn go_to(&self, page: usize) -> bool {
        dispatch(&Rc::downgrade(&self.inner), InputEvent::Click(Control::Dot(page)))
    }

    pub fn click_margin(&self, left: bool) -> bool {
        let side = if left { MarginSide::Left } else { MarginSide::Right };
        dispatch(&Rc::downgrade(&self.inner), InputEvent::Click(Control::Margin(side)))
    }

    pub fn current_page(&self) -> usize {
        self.inner.borrow().nav.current_page()
    }

    pub fn page_count(&self) -> usize {
        self.inner.borrow().nav.page_count()
    }

    pub fn is_transitioning(&self) -> bool {
        self.inner.borrow().nav.is_transitioning()
    }

    pub fn direction(&self) -> String {
        self.inner.borrow().nav.direction().as_str().to_string()
    }

    /// Motif name of the current page, `undefined` on the cover.
    pub fn motif(&self) -> Option<String> {
        let inner = self.inner.borrow();
        inner.nav.active_motif(&inner.catalog).map(|m| m.to_string())
    }

    /// JSON page view model for the shell.
    pub fn view_json(&self) -> Result<String, JsValue> {
        let inner = self.inner.borrow();
        let view = PageView::build(&inner.catalog, &inner.nav);
        serde_json::to_string(&view).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Theme cross-fade snapshot: both layers, eased progress and blended colours.
    pub fn theme_json(&self) -> String {
        let inner = self.inner.borrow();
        let sample = inner.theme.sample(js_sys::Date::now());
        serde_json::json!({
            "from": sample.from,
            "to": sample.to,
            "progress": sample.progress,
            "accent": sample.accent.to_hex(),
            "atmosphere": sample.atmosphere.to_string(),
        })
        .to_string()
    }

    /// Decoration layers for the current motif plus the storm flash state.
    pub fn overlay_json(&self) -> String {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let flash = inner.overlay.tick(js_sys::Date::now(), &mut inner.fx_rng);
        serde_json::json!({
            "rootClass": inner.overlay.root_class(),
            "layers": inner.overlay.layers(),
            "lightningFlash": flash,
        })
        .to_string()
    }

    pub fn instance_buffer_ptr(&self) -> *const f32 {
        self.inner.borrow().instances.as_ptr()
    }

    pub fn instance_buffer_byte_length(&self) -> usize {
        self.inner.borrow().instances.bytes().len()
    }

    pub fn instance_count(&self) -> usize {
        self.inner.borrow().instances.len()
    }

    /// Re-fit the canvas to the window and re-seed the particle field.
    pub fn resize(&self) {
        resize(&self.inner);
    }

    /// Tear down: listeners, frame loop, pending settle and particle pool are
    /// released now. The engine is closed, so nothing can restart drawing.
    pub fn destroy(&mut self) {
        self.listeners.clear();
        let mut inner = self.inner.borrow_mut();
        inner.frame = None;
        inner.settle = None;
        inner.engine.close();
        inner.instances.clear();
        inner.on_change = None;
        debug!("book: destroyed");
    }
}

/// Route one input through the navigator. Returns whether the shell should
/// suppress the event's default action.
fn dispatch(weak: &Weak<RefCell<Inner>>, event: InputEvent) -> bool {
    let Some(inner) = weak.upgrade() else {
        return false;
    };
    let handled = inner.borrow_mut().nav.handle(event, js_sys::Date::now());
    if let Some(transition) = handled.transition {
        schedule_settle(&inner, transition);
        notify(&inner);
    }
    handled.consumed
}

/// Arm the settle timer for an accepted flip. The handle lives in
/// `Inner::settle` so `destroy` can cancel it; the gate admits one flip at a
/// time, so the slot never holds a live timer when it is replaced.
fn schedule_settle(inner: &Rc<RefCell<Inner>>, transition: Transition) {
    let delay = (transition.due_ms - js_sys::Date::now()).max(0.0).round() as u32;
    let weak = Rc::downgrade(inner);
    let handle = Timeout::new(delay, move || {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let settled = {
            let mut state = inner.borrow_mut();
            state.settle.take();
            state.nav.complete_pending()
        };
        if settled.is_some() {
            sync_page(&inner);
            notify(&inner);
        }
    });
    inner.borrow_mut().settle = Some(handle);
}

/// Bring engine, overlay and theme in line with the now-current page.
fn sync_page(inner: &Rc<RefCell<Inner>>) {
    let token = {
        let mut guard = inner.borrow_mut();
        let state = &mut *guard;
        let now = js_sys::Date::now();
        let motif = state.nav.active_motif(&state.catalog);
        state.theme.retarget(state.nav.theme(&state.catalog), now);
        if state.overlay.motif() != motif {
            state.overlay = Overlay::new(motif, now);
        }
        let size = state.surface.as_ref().and_then(|s| s.size());
        match state.engine.follow(motif, size) {
            Follow::Unchanged => return,
            Follow::Started(token) => {
                state.frame = None;
                state.instances.clear();
                Some(token)
            }
            Follow::Stopped => {
                state.frame = None;
                state.instances.clear();
                None
            }
        }
    };
    if let Some(token) = token {
        schedule_frame(inner, token);
    }
}

fn schedule_frame(inner: &Rc<RefCell<Inner>>, token: LoopToken) {
    let weak = Rc::downgrade(inner);
    let handle = request_animation_frame(move |_timestamp| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let again = {
            let mut guard = inner.borrow_mut();
            let state = &mut *guard;
            state.frame.take();
            let Some(surface) = state.surface.as_mut() else {
                return;
            };
            let again = state.engine.frame(token, surface);
            state.instances.write(state.engine.particles());
            again
        };
        if again {
            schedule_frame(&inner, token);
        }
    });
    inner.borrow_mut().frame = Some(handle);
}

fn resize(inner: &Rc<RefCell<Inner>>) {
    let token = {
        let mut guard = inner.borrow_mut();
        let state = &mut *guard;
        fit_canvas(&state.canvas);
        let Some(size) = state.surface.as_ref().and_then(|s| s.size()) else {
            return;
        };
        state.frame = None;
        state.engine.resize(size)
    };
    if let Some(token) = token {
        schedule_frame(inner, token);
    }
}

/// Call the shell's change callback without holding a borrow, so the shell
/// may read the book from inside it.
fn notify(inner: &Rc<RefCell<Inner>>) {
    let callback = inner.borrow().on_change.clone();
    if let Some(callback) = callback {
        if let Err(err) = callback.call0(&JsValue::NULL) {
            warn!("book: on_change threw {:?}", err);
        }
    }
}

fn fit_canvas(canvas: &HtmlCanvasElement) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let size = SurfaceSize::new(dim(window.inner_width()) as f32, dim(window.inner_height()) as f32);
    canvas.set_width(size.width as u32);
    canvas.set_height(size.height as u32);
}

fn first_touch(event: &Event) -> Option<(f32, f32)> {
    let touch = event.dyn_ref::<TouchEvent>()?.target_touches().get(0)?;
    Some((touch.client_x() as f32, touch.client_y() as f32))
}
