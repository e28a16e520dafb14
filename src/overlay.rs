use crate::constants::*;
use wasm_bindgen::JsCast;
use web_sys as web;

const GRADIENT_CLASS: &str = "backdrop-gradient";

/// Build the gradient, glow and canvas layers inside `root`.
pub fn build_layers(
    document: &web::Document,
    root: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let js = |e: wasm_bindgen::JsValue| anyhow::anyhow!("{:?}", e);

    root.set_inner_html("");
    root.set_attribute("aria-hidden", "true").map_err(js)?;
    root.set_attribute("style", ROOT_STYLE).map_err(js)?;

    let gradient = document.create_element("div").map_err(js)?;
    gradient.set_class_name(GRADIENT_CLASS);
    gradient
        .set_attribute(
            "style",
            &format!(
                "{}background:{};opacity:0;transition:opacity {}ms ease;",
                LAYER_STYLE, GRADIENT_BACKGROUND, GRADIENT_FADE_MS
            ),
        )
        .map_err(js)?;

    let glow = document.create_element("div").map_err(js)?;
    glow.set_attribute(
        "style",
        &format!(
            "{}background:{};opacity:var({});transition:opacity {}ms ease;",
            LAYER_STYLE, GLOW_BACKGROUND, GLOW_CSS_VAR, GLOW_FADE_MS
        ),
    )
    .map_err(js)?;

    let canvas = document
        .create_element("canvas")
        .map_err(js)?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_id(CANVAS_ID);
    canvas
        .set_attribute("style", &format!("{}width:100%;height:100%;", LAYER_STYLE))
        .map_err(js)?;

    root.append_child(&gradient).map_err(js)?;
    root.append_child(&glow).map_err(js)?;
    root.append_child(&canvas).map_err(js)?;
    Ok(canvas)
}

/// Fade the gradient layer in; called once the first frame has rendered.
pub fn reveal(root: &web::Element) {
    if let Ok(Some(el)) = root.query_selector(&format!(".{}", GRADIENT_CLASS)) {
        if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
            _ = html.style().set_property("opacity", "1");
        }
    }
}

#[inline]
pub fn remove_layers(root: &web::Element) {
    root.set_inner_html("");
    _ = root.remove_attribute("style");
}
