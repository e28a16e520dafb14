use super::{Listener, Listeners};
use crate::core::ParticleField;
use crate::dom;
use crate::render::Painter;
use crate::SharedBackdrop;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub fn wire_visibility(
    document: &web::Document,
    backdrop: &SharedBackdrop,
    listeners: &mut Listeners,
) -> anyhow::Result<()> {
    let b = backdrop.clone();
    let doc = document.clone();
    listeners.push(Listener::attach(document, "visibilitychange", false, move |_| {
        let visible = dom::document_visible(&doc);
        b.borrow_mut().on_visibility(visible);
    })?);
    Ok(())
}

/// Keep the canvas backing store and the field bounds in step with the viewport.
pub fn wire_resize(
    window: &web::Window,
    backdrop: &SharedBackdrop,
    painter: &Rc<RefCell<Painter>>,
    listeners: &mut Listeners,
) -> anyhow::Result<()> {
    let b = backdrop.clone();
    let p = painter.clone();
    listeners.push(Listener::attach(window, "resize", true, move |_| {
        let size = p.borrow_mut().resize();
        if let Some(field) = b.borrow_mut().renderer_mut() {
            resize_field(field, size.x, size.y);
        }
    })?);
    Ok(())
}

#[inline]
fn resize_field(field: &mut ParticleField, width: f32, height: f32) {
    field.resize(width, height);
    log::debug!("[resize] field {:.0}x{:.0}", width, height);
}
