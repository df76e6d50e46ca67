//! Browser implementation of the document host
//!
//! Styles go on `document.body`. Pointer capture attaches a fixed set of
//! listener closures that are created once by the binding; the host only
//! adds and removes them, so a listener may detach itself while running.

use std::cell::RefCell;
use std::rc::Rc;

use folio_desktop::{DocumentEffect, DocumentHost, FolioError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlElement, MouseEvent, Window};

const USER_SELECT: [&str; 4] = [
    "user-select",
    "-webkit-user-select",
    "-moz-user-select",
    "-ms-user-select",
];

/// Listeners attached while a gesture is in progress
pub struct PointerListeners {
    pub on_move: Closure<dyn FnMut(MouseEvent)>,
    pub on_up: Closure<dyn FnMut(MouseEvent)>,
    pub on_blur: Closure<dyn FnMut(Event)>,
}

/// Filled in by the binding once the engine exists
pub type ListenerSlot = Rc<RefCell<Option<PointerListeners>>>;

pub struct BrowserHost {
    window: Window,
    document: Document,
    body: HtmlElement,
    listeners: ListenerSlot,
}

impl BrowserHost {
    pub fn new(
        window: Window,
        document: Document,
        body: HtmlElement,
        listeners: ListenerSlot,
    ) -> Self {
        Self {
            window,
            document,
            body,
            listeners,
        }
    }

    fn set_style(&self, property: &str, value: Option<&str>) -> Result<(), FolioError> {
        let style = self.body.style();
        let result = match value {
            Some(value) => style.set_property(property, value),
            None => style.remove_property(property).map(|_| ()),
        };
        result.map_err(|err| FolioError::Host {
            op: "style",
            reason: format!("{}: {:?}", property, err),
        })
    }

    fn set_pointer_capture(&self, active: bool) -> Result<(), FolioError> {
        let slot = self.listeners.borrow();
        let Some(listeners) = slot.as_ref() else {
            return Err(FolioError::HostUnavailable("pointer listeners"));
        };

        let document: &EventTarget = self.document.as_ref();
        let window: &EventTarget = self.window.as_ref();
        let bindings: [(&EventTarget, &str, &js_sys::Function); 4] = [
            (document, "mousemove", listeners.on_move.as_ref().unchecked_ref()),
            (document, "mouseup", listeners.on_up.as_ref().unchecked_ref()),
            (window, "mouseup", listeners.on_up.as_ref().unchecked_ref()),
            (window, "blur", listeners.on_blur.as_ref().unchecked_ref()),
        ];

        for (target, event, callback) in bindings {
            let result = if active {
                target.add_event_listener_with_callback_and_bool(event, callback, true)
            } else {
                target.remove_event_listener_with_callback_and_bool(event, callback, true)
            };
            result.map_err(|err| FolioError::Host {
                op: if active {
                    "addEventListener"
                } else {
                    "removeEventListener"
                },
                reason: format!("{}: {:?}", event, err),
            })?;
        }
        Ok(())
    }

    fn try_apply(&self, effect: DocumentEffect, active: bool) -> Result<(), FolioError> {
        match effect {
            DocumentEffect::SuppressSelection => {
                for property in USER_SELECT {
                    self.set_style(property, active.then_some("none"))?;
                }
                Ok(())
            }
            DocumentEffect::LockScroll => self.set_style("overflow", active.then_some("hidden")),
            DocumentEffect::CapturePointer => self.set_pointer_capture(active),
        }
    }
}

impl DocumentHost for BrowserHost {
    fn apply(&mut self, effect: DocumentEffect, active: bool) {
        if let Err(err) = self.try_apply(effect, active) {
            tracing::warn!(?effect, active, %err, "document effect failed");
        }
    }
}
