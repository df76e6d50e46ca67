//! Browser bindings for the folio window manager
//!
//! [`FolioDesktop`] wraps the pure Rust [`Desktop`] engine for JavaScript.
//! The page keeps rendering: it calls `open_project` from a card click, drives
//! `tick` from `requestAnimationFrame`, and positions its window elements
//! from `frames_json`. Pointer move/up, blur, Escape and window resizes are
//! picked up by listeners this crate attaches itself.

mod host;
mod logging;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_desktop::{
    Desktop, DesktopConfig, FolioError, OpenOutcome, Portfolio, Rect, ResizeHandle, Size, Vec2,
    WindowId,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, KeyboardEvent, MouseEvent, Window};

use host::{BrowserHost, ListenerSlot, PointerListeners};

fn to_js(err: FolioError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn now(window: &Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn viewport_of(window: &Window) -> Size {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    Size::new(dimension(window.inner_width()), dimension(window.inner_height()))
}

/// Run `f` against the engine if it is still alive and not already borrowed
fn with_desktop<R>(
    desktop: &Weak<RefCell<Desktop>>,
    f: impl FnOnce(&mut Desktop) -> R,
) -> Option<R> {
    let desktop = desktop.upgrade()?;
    let Ok(mut desktop) = desktop.try_borrow_mut() else {
        tracing::warn!("event dropped: desktop busy");
        return None;
    };
    Some(f(&mut desktop))
}

/// Enable debug-level engine logging; call before creating a desktop
#[wasm_bindgen]
pub fn init_logging(verbose: bool) {
    logging::init(verbose);
}

/// The floating project window manager, as seen from JavaScript
#[wasm_bindgen]
pub struct FolioDesktop {
    desktop: Rc<RefCell<Desktop>>,
    portfolio: Portfolio,
    window: Window,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    resize: Closure<dyn FnMut(Event)>,
    _listeners: ListenerSlot,
}

#[wasm_bindgen]
impl FolioDesktop {
    /// Create a desktop from a (possibly empty) JSON config
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<FolioDesktop, JsValue> {
        logging::init(false);

        let config = DesktopConfig::from_json(config_json).map_err(to_js)?;
        let window = web_sys::window().ok_or(FolioError::HostUnavailable("window")).map_err(to_js)?;
        let document = window
            .document()
            .ok_or(FolioError::HostUnavailable("document"))
            .map_err(to_js)?;
        let body = document
            .body()
            .ok_or(FolioError::HostUnavailable("body"))
            .map_err(to_js)?;

        let slot: ListenerSlot = Rc::new(RefCell::new(None));
        let host = BrowserHost::new(window.clone(), document, body, Rc::clone(&slot));
        let mut desktop = Desktop::new(config, host);
        desktop.set_viewport(viewport_of(&window));
        let desktop = Rc::new(RefCell::new(desktop));

        let weak = Rc::downgrade(&desktop);
        let on_move = Closure::<dyn FnMut(MouseEvent)>::new({
            let weak = weak.clone();
            move |event: MouseEvent| {
                let pointer = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                with_desktop(&weak, |d| d.pointer_move(pointer));
            }
        });
        let on_up = Closure::<dyn FnMut(MouseEvent)>::new({
            let weak = weak.clone();
            move |_event: MouseEvent| {
                with_desktop(&weak, Desktop::pointer_up);
            }
        });
        let on_blur = Closure::<dyn FnMut(Event)>::new({
            let weak = weak.clone();
            move |_event: Event| {
                with_desktop(&weak, Desktop::blur);
            }
        });
        *slot.borrow_mut() = Some(PointerListeners {
            on_move,
            on_up,
            on_blur,
        });

        let keydown = Closure::<dyn FnMut(KeyboardEvent)>::new({
            let window = window.clone();
            move |event: KeyboardEvent| {
                let time = now(&window);
                with_desktop(&weak, |d| d.key_down(&event.key(), time));
            }
        });
        window
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
            .map_err(|err| {
                tracing::warn!(?err, "keydown listener not attached");
                err
            })?;

        let resize = Closure::<dyn FnMut(Event)>::new({
            let window = window.clone();
            let weak = Rc::downgrade(&desktop);
            move |_event: Event| {
                let viewport = viewport_of(&window);
                with_desktop(&weak, |d| d.set_viewport(viewport));
            }
        });
        window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            .map_err(|err| {
                tracing::warn!(?err, "resize listener not attached");
                err
            })?;

        tracing::info!("folio desktop ready");
        Ok(FolioDesktop {
            desktop,
            portfolio: Portfolio::default(),
            window,
            keydown,
            resize,
            _listeners: slot,
        })
    }

    /// Load the portfolio JSON; returns the number of projects
    pub fn load_projects(&mut self, json: &str) -> Result<usize, JsValue> {
        self.portfolio = Portfolio::from_json(json).map_err(to_js)?;
        let count = self.portfolio.projects.len();
        tracing::debug!(count, "projects loaded");
        Ok(count)
    }

    /// Open a project from its card's bounding rectangle
    ///
    /// Returns the new window id, or `undefined` when the project was opened
    /// in a new tab or nothing could be opened.
    pub fn open_project(
        &mut self,
        project_id: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<Option<f64>, JsValue> {
        let project = Rc::new(self.portfolio.project(project_id).map_err(to_js)?.clone());

        let time = self.now();
        let outcome = self
            .desktop
            .borrow_mut()
            .open_project(project, Some(Rect::new(x, y, width, height)), time);
        match outcome {
            OpenOutcome::Window(id) => Ok(Some(id as f64)),
            OpenOutcome::External(url) => {
                self.window
                    .open_with_url_and_target_and_features(&url, "_blank", "noopener,noreferrer")?;
                Ok(None)
            }
            OpenOutcome::Ignored => Ok(None),
        }
    }

    pub fn close(&mut self, id: f64) -> bool {
        let time = self.now();
        self.desktop.borrow_mut().close(id as WindowId, time)
    }

    pub fn minimize(&mut self, id: f64) -> bool {
        let time = self.now();
        self.desktop.borrow_mut().minimize(id as WindowId, time)
    }

    /// Restore from the tray and raise the window
    pub fn restore(&mut self, id: f64) -> bool {
        let time = self.now();
        self.desktop.borrow_mut().restore(id as WindowId, time)
    }

    pub fn toggle_fullscreen(&mut self, id: f64) -> bool {
        let time = self.now();
        self.desktop.borrow_mut().toggle_fullscreen(id as WindowId, time)
    }

    pub fn bring_to_front(&mut self, id: f64) -> Option<u32> {
        self.desktop.borrow_mut().bring_to_front(id as WindowId)
    }

    /// Header `mousedown`
    pub fn begin_move(&mut self, id: f64, x: f32, y: f32, button: i16) -> bool {
        let time = self.now();
        self.desktop
            .borrow_mut()
            .begin_move(id as WindowId, Vec2::new(x, y), button, time)
    }

    /// Resize handle `mousedown`; `handle` is `top-left`, `right`, ...
    pub fn begin_resize(&mut self, id: f64, handle: &str, x: f32, y: f32, button: i16) -> bool {
        let Some(handle) = ResizeHandle::from_name(handle) else {
            tracing::warn!(handle, "unknown resize handle");
            return false;
        };
        let time = self.now();
        self.desktop
            .borrow_mut()
            .begin_resize(id as WindowId, handle, Vec2::new(x, y), button, time)
    }

    /// The window's embedded frame fired `load`
    pub fn content_loaded(&mut self, id: f64) -> bool {
        self.desktop.borrow_mut().content_loaded(id as WindowId)
    }

    /// Override the viewport; the window `resize` listener keeps it current
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.desktop.borrow_mut().set_viewport(Size::new(width, height));
    }

    pub fn viewport_width(&self) -> f32 {
        self.desktop.borrow().viewport().width
    }

    pub fn viewport_height(&self) -> f32 {
        self.desktop.borrow().viewport().height
    }

    /// Advance animations to the `requestAnimationFrame` timestamp;
    /// returns true while another frame is needed
    pub fn tick(&mut self, now: f64) -> bool {
        self.desktop.borrow_mut().tick(now)
    }

    /// Render model for every window as a JSON array
    pub fn frames_json(&self, now: f64) -> Result<String, JsValue> {
        let frames = self.desktop.borrow().frames(now);
        serde_json::to_string(&frames).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl FolioDesktop {
    fn now(&self) -> f64 {
        now(&self.window)
    }
}

impl Drop for FolioDesktop {
    fn drop(&mut self) {
        let listeners: [(&str, &js_sys::Function); 2] = [
            ("keydown", self.keydown.as_ref().unchecked_ref()),
            ("resize", self.resize.as_ref().unchecked_ref()),
        ];
        for (event, callback) in listeners {
            if let Err(err) = self.window.remove_event_listener_with_callback(event, callback) {
                tracing::warn!(?err, event, "listener not removed");
            }
        }
    }
}
