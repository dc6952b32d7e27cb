//! Browser canvas surface

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::surface::{Color, Surface, TextStyle};
use crate::Rect;
use crate::error::SurfaceError;

const FONT_FAMILY: &str = "monospace";

fn backend(err: JsValue) -> SurfaceError {
    SurfaceError::Backend(format!("{err:?}"))
}

/// `Surface` over a 2D canvas context in logical coordinates
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Grab the 2D context of `canvas`
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(backend)?
            .ok_or(SurfaceError::Unavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::Unavailable)?;
        Ok(Self::new(ctx))
    }

    fn set_font(&self, size: f32) {
        self.ctx.set_font(&format!("{size}px {FONT_FAMILY}"));
    }
}

impl Surface for CanvasSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError> {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.width as f64, rect.height as f64);
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) -> Result<(), SurfaceError> {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(line_width as f64);
        self.ctx
            .stroke_rect(rect.x as f64, rect.y as f64, rect.width as f64, rect.height as f64);
        Ok(())
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) -> Result<(), SurfaceError> {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        self.ctx
            .arc(cx as f64, cy as f64, radius.max(0.0) as f64, 0.0, std::f64::consts::TAU)
            .map_err(backend)?;
        self.ctx.fill();
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        style: TextStyle,
        color: Color,
    ) -> Result<(), SurfaceError> {
        self.set_font(style.size);
        self.ctx.set_text_align(style.align.as_str());
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_text(text, x as f64, y as f64).map_err(backend)
    }

    fn measure_text(&mut self, text: &str, size: f32) -> Result<f32, SurfaceError> {
        self.set_font(size);
        let metrics = self.ctx.measure_text(text).map_err(backend)?;
        Ok(metrics.width() as f32)
    }

    fn set_alpha(&mut self, alpha: f32) -> Result<(), SurfaceError> {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        Ok(())
    }
}
