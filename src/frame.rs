use crate::constants::MAX_FRAME_DT_SEC;
use crate::core::{FrameHandle, FrameHost};
use crate::overlay;
use crate::render::Painter;
use crate::SharedBackdrop;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Slot holding the frame callback; emptied on unmount to break the
/// callback → backdrop → host → callback cycle.
pub type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame`-backed [`FrameHost`].
pub struct RafHost {
    window: web::Window,
    slot: FrameSlot,
}

impl RafHost {
    pub fn new(window: web::Window, slot: FrameSlot) -> Self {
        Self { window, slot }
    }
}

impl FrameHost for RafHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let slot = self.slot.borrow();
        let cb = slot.as_ref()?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        _ = self.window.cancel_animation_frame(handle);
    }
}

/// Install the frame callback: advance the backdrop, then paint the field.
pub fn install_loop(
    slot: &FrameSlot,
    backdrop: SharedBackdrop,
    painter: Rc<RefCell<Painter>>,
    root: web::Element,
) {
    let mut last_instant = Instant::now();
    let mut revealed = false;
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let now = Instant::now();
        let dt_sec = (now - last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        last_instant = now;

        if !backdrop.borrow_mut().on_frame(dt_sec) {
            return;
        }
        if let Some(field) = backdrop.borrow().renderer() {
            painter.borrow().draw(field);
        }
        if !revealed {
            overlay::reveal(&root);
            revealed = true;
        }
    }) as Box<dyn FnMut()>));
}
