use std::f64::consts::TAU;

use flipbook_core::color::Rgba;
use flipbook_core::surface::{Surface, SurfaceSize};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Canvas 2D implementation of the engine's drawing surface. Glow is the
/// context shadow blur, reset after each shape.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// `None` when the browser refuses a 2D context.
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas: canvas.clone(),
            ctx,
        })
    }

    fn set_glow(&self, color: &str, blur: f32) {
        self.ctx.set_shadow_blur(blur as f64);
        self.ctx.set_shadow_color(color);
    }

    fn clear_glow(&self) {
        self.ctx.set_shadow_blur(0.0);
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Option<SurfaceSize> {
        let size = SurfaceSize::new(self.canvas.width() as f32, self.canvas.height() as f32);
        size.is_usable().then_some(size)
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow: f32) {
        let css = color.to_string();
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(&css);
        self.set_glow(&css, glow);
        self.ctx.fill();
        self.clear_glow();
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(&color.to_string());
        let drawn = self.ctx.ellipse(
            center.x as f64,
            center.y as f64,
            radii.x.max(0.0) as f64,
            radii.y.max(0.0) as f64,
            rotation as f64,
            0.0,
            TAU,
        );
        if drawn.is_ok() {
            self.ctx.fill();
        }
    }

    fn stroke_ring(&mut self, center: Vec2, radius: f32, color: Rgba, line_width: f32) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, line_width: f32, glow: f32) {
        let css = color.to_string();
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&css);
        self.ctx.set_line_width(line_width as f64);
        self.set_glow(&css, glow);
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
        self.clear_glow();
    }
}
