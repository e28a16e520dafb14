use crate::core::{Link, ParticleField};
use crate::dom;
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Canvas2D painter for a [`ParticleField`].
pub struct Painter {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    dpr: f64,
    css_size: Vec2,
}

impl Painter {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let mut painter = Self {
            canvas,
            ctx,
            dpr: 1.0,
            css_size: Vec2::ONE,
        };
        painter.resize();
        Ok(painter)
    }

    /// Resync the backing store; returns the css size particles live in.
    pub fn resize(&mut self) -> Vec2 {
        let (css, dpr) = dom::sync_canvas_backing_size(&self.canvas);
        self.css_size = css.max(Vec2::ONE);
        self.dpr = dpr;
        self.css_size
    }

    pub fn css_size(&self) -> Vec2 {
        self.css_size
    }

    pub fn draw(&self, field: &ParticleField) {
        let ctx = &self.ctx;
        _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        _ = ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);

        let cfg = field.config();
        ctx.set_line_width(cfg.link_width as f64);
        let link_css = |alpha: f32| cfg.link_color.css(alpha);
        self.stroke_links(&field.links(), link_css);
        self.stroke_links(&field.grab_links(), link_css);

        for p in field.particles() {
            ctx.begin_path();
            _ = ctx.arc(
                p.position.x as f64,
                p.position.y as f64,
                p.radius as f64,
                0.0,
                TAU,
            );
            ctx.set_fill_style_str(&p.color.css(p.opacity));
            ctx.fill();
        }
    }

    fn stroke_links(&self, links: &[Link], css: impl Fn(f32) -> String) {
        for link in links {
            self.ctx.begin_path();
            self.ctx.move_to(link.from.x as f64, link.from.y as f64);
            self.ctx.line_to(link.to.x as f64, link.to.y as f64);
            self.ctx.set_stroke_style_str(&css(link.alpha));
            self.ctx.stroke();
        }
    }
}
