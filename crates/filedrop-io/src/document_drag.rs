//! Document-level drag listeners.
//!
//! Dioxus only delivers events for elements it renders, so tracking a
//! drag anywhere in the page needs raw listeners on `document`. The
//! listeners are removed when [`DocumentDragListeners`] is dropped.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;

/// Errors that can occur when installing the listeners.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// A browser API call returned an error or a required object was missing.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for ListenerError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

type Listener = Closure<dyn FnMut(web_sys::Event)>;

/// Installed drag listeners on the document.
pub struct DocumentDragListeners {
    document: web_sys::Document,
    listeners: Vec<(&'static str, Listener)>,
}

impl DocumentDragListeners {
    /// Install listeners calling `on_enter` for `dragenter`, `on_leave`
    /// for `dragleave` and `on_end` for `drop` and `dragend`.
    ///
    /// A drop fires no `dragleave`, so `on_end` is the only signal that
    /// a drag finished over some other element.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::JsError`] if there is no document or a
    /// listener cannot be added. Listeners added before the failure are
    /// removed again.
    pub fn attach(
        mut on_enter: impl FnMut() + 'static,
        mut on_leave: impl FnMut() + 'static,
        on_end: impl FnMut() + Clone + 'static,
    ) -> Result<Self, ListenerError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ListenerError::JsError("no document".into()))?;

        let mut on_drop = on_end.clone();
        let mut on_dragend = on_end;
        let handlers = [
            (
                "dragenter",
                Listener::new(move |_: web_sys::Event| on_enter()),
            ),
            (
                "dragleave",
                Listener::new(move |_: web_sys::Event| on_leave()),
            ),
            ("drop", Listener::new(move |_: web_sys::Event| on_drop())),
            (
                "dragend",
                Listener::new(move |_: web_sys::Event| on_dragend()),
            ),
        ];

        // Dropping `installed` on an early return detaches what was added.
        let mut installed = Self {
            document,
            listeners: Vec::with_capacity(handlers.len()),
        };
        for (event, listener) in handlers {
            installed
                .document
                .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
            installed.listeners.push((event, listener));
        }

        log::debug!("document drag listeners attached");
        Ok(installed)
    }
}

impl Drop for DocumentDragListeners {
    fn drop(&mut self) {
        // Best-effort: the document may already be gone during teardown.
        for (event, listener) in &self.listeners {
            let _ = self
                .document
                .remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
        }
        log::debug!("document drag listeners removed");
    }
}
