use super::{Listener, Listeners};
use crate::dom;
use crate::SharedBackdrop;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer tracking: record the sample and request a frame, nothing more.
pub fn wire_pointer_handlers(
    window: &web::Window,
    document: &web::Document,
    backdrop: &SharedBackdrop,
    listeners: &mut Listeners,
) -> anyhow::Result<()> {
    let b = backdrop.clone();
    listeners.push(Listener::attach(window, "pointermove", true, move |ev| {
        if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
            b.borrow_mut()
                .on_pointer_move(ev.client_x() as f32, ev.client_y() as f32, dom::now_ms());
        }
    })?);

    if let Some(html) = document.document_element() {
        let b = backdrop.clone();
        listeners.push(Listener::attach(&html, "pointerleave", true, move |_| {
            b.borrow_mut().on_pointer_leave();
        })?);
    }
    Ok(())
}
