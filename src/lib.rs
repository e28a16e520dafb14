#![cfg(target_arch = "wasm32")]
use crate::constants::{DEFAULT_ROOT_ID, VARIANT_ATTR};
use crate::core::{Backdrop, BackdropConfig, ParticleField, Variant};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

pub(crate) type SharedBackdrop =
    Rc<RefCell<Backdrop<ParticleField, dom::CssVarSink, frame::RafHost>>>;

thread_local! {
    static AUTO_MOUNTED: RefCell<Option<BackdropHandle>> = const { RefCell::new(None) };
}

/// A mounted backdrop. Unmounting (or freeing the handle from JS) releases
/// listeners, the pending frame and the glow variable.
#[wasm_bindgen]
pub struct BackdropHandle {
    backdrop: SharedBackdrop,
    listeners: Option<events::Listeners>,
    slot: frame::FrameSlot,
    root: web::Element,
    variant: Variant,
}

#[wasm_bindgen]
impl BackdropHandle {
    pub fn unmount(&mut self) {
        if self.listeners.take().is_none() {
            return;
        }
        self.backdrop.borrow_mut().unmount();
        self.slot.borrow_mut().take();
        overlay::remove_layers(&self.root);
        log::info!("[backdrop] unmounted ({})", self.variant);
    }

    #[wasm_bindgen(getter)]
    pub fn variant(&self) -> String {
        self.variant.as_str().to_string()
    }
}

impl Drop for BackdropHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("portfolio-backdrop starting");

    let has_root = dom::window_document()
        .and_then(|d| d.get_element_by_id(DEFAULT_ROOT_ID))
        .is_some();
    if has_root {
        match mount_inner(DEFAULT_ROOT_ID) {
            Ok(handle) => AUTO_MOUNTED.with(|slot| *slot.borrow_mut() = Some(handle)),
            Err(e) => log::error!("mount error: {:?}", e),
        }
    }
    Ok(())
}

/// Mount the backdrop into the element with id `root_id`.
#[wasm_bindgen]
pub fn mount(root_id: &str) -> Result<BackdropHandle, JsValue> {
    mount_inner(root_id).map_err(|e| JsValue::from_str(&format!("{:?}", e)))
}

/// Tear down the backdrop mounted automatically at startup, if any.
#[wasm_bindgen(js_name = unmountAuto)]
pub fn unmount_auto() {
    AUTO_MOUNTED.with(|slot| drop(slot.borrow_mut().take()));
}

fn resolve_variant(root: &web::Element) -> Variant {
    match root.get_attribute(VARIANT_ATTR) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            log::warn!("{:?}; using {}", e, Variant::default());
            Variant::default()
        }),
        None => Variant::default(),
    }
}

fn mount_inner(root_id: &str) -> anyhow::Result<BackdropHandle> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let root = document
        .get_element_by_id(root_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", root_id))?;

    let variant = resolve_variant(&root);
    let cfg = BackdropConfig::for_variant(variant);
    cfg.validate()?;

    let canvas = overlay::build_layers(&document, &root)?;
    let painter = Rc::new(RefCell::new(render::Painter::new(canvas)?));
    let size = painter.borrow().css_size();
    let field = ParticleField::new(cfg.field, size.x, size.y, rand::random());

    let slot: frame::FrameSlot = Rc::new(RefCell::new(None));
    let host = frame::RafHost::new(window.clone(), slot.clone());
    let sink = dom::CssVarSink::new(&document);
    let visible = dom::document_visible(&document);
    let backdrop: SharedBackdrop =
        Rc::new(RefCell::new(Backdrop::new(cfg.motion, sink, host, visible)));
    backdrop.borrow_mut().attach_renderer(field);

    frame::install_loop(&slot, backdrop.clone(), painter.clone(), root.clone());

    let mut listeners = events::Listeners::default();
    let wired = events::wire_pointer_handlers(&window, &document, &backdrop, &mut listeners)
        .and_then(|_| events::wire_visibility(&document, &backdrop, &mut listeners))
        .and_then(|_| events::wire_resize(&window, &backdrop, &painter, &mut listeners));
    if let Err(e) = wired {
        slot.borrow_mut().take();
        overlay::remove_layers(&root);
        return Err(e);
    }

    backdrop.borrow_mut().mount();
    log::info!(
        "[backdrop] mounted #{} variant={} particles={} visible={}",
        root_id,
        variant,
        backdrop
            .borrow()
            .renderer()
            .map(|f| f.particles().len())
            .unwrap_or(0),
        visible
    );

    Ok(BackdropHandle {
        backdrop,
        listeners: Some(listeners),
        slot,
        root,
        variant,
    })
}
