use crate::constants::GLOW_CSS_VAR;
use crate::core::StyleSink;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn document_visible(document: &web::Document) -> bool {
    document.visibility_state() == web::VisibilityState::Visible
}

/// High-resolution timestamp matching `performance.now()`.
#[inline]
pub fn now_ms() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Match the canvas backing store to its css size × devicePixelRatio.
/// Returns the css size and the ratio used.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (Vec2, f64) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr) as u32;
    let h_px = (rect.height() * dpr) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
    (Vec2::new(rect.width() as f32, rect.height() as f32), dpr)
}

/// Writes the glow opacity onto `document.documentElement`.
pub struct CssVarSink {
    root: Option<web::HtmlElement>,
}

impl CssVarSink {
    pub fn new(document: &web::Document) -> Self {
        let root = document
            .document_element()
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
        if root.is_none() {
            log::warn!("[dom] no html root element; glow variable disabled");
        }
        Self { root }
    }
}

impl StyleSink for CssVarSink {
    fn set_glow(&mut self, value: f32) {
        if let Some(root) = &self.root {
            _ = root.style().set_property(GLOW_CSS_VAR, &value.to_string());
        }
    }

    fn clear_glow(&mut self) {
        if let Some(root) = &self.root {
            _ = root.style().remove_property(GLOW_CSS_VAR);
        }
    }
}
