//! Document-level keyboard listeners with guaranteed removal

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, KeyboardEvent, Window};

use crate::input::InputState;

type KeyClosure = Closure<dyn FnMut(KeyboardEvent)>;
type BlurClosure = Closure<dyn FnMut(Event)>;

/// `keydown`/`keyup` listeners feeding an [`InputState`], plus a window
/// `blur` listener that releases every key when focus leaves the page.
///
/// Listeners are removed on [`detach`](Self::detach) or drop. Once removed
/// the closures (and their handle on the input state) are freed, so no
/// further event can reach the input.
pub struct KeyboardListeners {
    document: Document,
    window: Option<Window>,
    keydown: Option<KeyClosure>,
    keyup: Option<KeyClosure>,
    blur: Option<BlurClosure>,
}

impl KeyboardListeners {
    pub fn attach(document: &Document, input: Rc<RefCell<InputState>>) -> Result<Self, JsValue> {
        let keydown = {
            let input = input.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if input.borrow_mut().key_down(&event.code()) {
                    event.prevent_default();
                }
            })
        };
        let keyup = {
            let input = input.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                input.borrow_mut().key_up(&event.code());
            })
        };
        // A key released while another window has focus never sends keyup
        let blur = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            input.borrow_mut().clear();
        });

        document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        if let Err(e) =
            document.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())
        {
            let _ = document
                .remove_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
            return Err(e);
        }

        let mut listeners = Self {
            document: document.clone(),
            window: document.default_view(),
            keydown: Some(keydown),
            keyup: Some(keyup),
            blur: None,
        };
        // On error the partly built guard drops and removes the key listeners
        match &listeners.window {
            Some(window) => {
                window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
                listeners.blur = Some(blur);
            }
            None => log::warn!("No window for document; held keys survive focus loss"),
        }

        log::info!("Keyboard listeners attached");
        Ok(listeners)
    }

    /// Remove every listener. Safe to call more than once.
    pub fn detach(&mut self) {
        if let Some(keydown) = self.keydown.take() {
            let _ = self
                .document
                .remove_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
        }
        if let (Some(blur), Some(window)) = (self.blur.take(), &self.window) {
            let _ = window.remove_event_listener_with_callback("blur", blur.as_ref().unchecked_ref());
        }
        if let Some(keyup) = self.keyup.take() {
            let _ = self
                .document
                .remove_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref());
            log::info!("Keyboard listeners detached");
        }
    }
}

impl Drop for KeyboardListeners {
    fn drop(&mut self) {
        self.detach();
    }
}
