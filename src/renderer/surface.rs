//! Drawing-surface contract
//!
//! The engine only talks to this trait. It must not care whether the
//! backend is a browser canvas or an in-memory recorder.

use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::SurfaceError;

/// RGBA color, alpha in 0-1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS color string for canvas fill styles
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in logical pixels
    pub size: f32,
    pub align: TextAlign,
}

impl TextStyle {
    pub const fn new(size: f32) -> Self {
        Self {
            size,
            align: TextAlign::Left,
        }
    }

    pub const fn centered(size: f32) -> Self {
        Self {
            size,
            align: TextAlign::Center,
        }
    }

    pub const fn right(size: f32) -> Self {
        Self {
            size,
            align: TextAlign::Right,
        }
    }
}

/// Unified 2D drawing interface in logical (1000x700) coordinates.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError>;
    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32)
    -> Result<(), SurfaceError>;
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color)
    -> Result<(), SurfaceError>;
    /// Draw text with its baseline at `y`
    fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        style: TextStyle,
        color: Color,
    ) -> Result<(), SurfaceError>;
    /// Width of `text` at the given font size
    fn measure_text(&mut self, text: &str, size: f32) -> Result<f32, SurfaceError>;
    /// Global alpha applied to subsequent draws
    fn set_alpha(&mut self, alpha: f32) -> Result<(), SurfaceError>;

    fn clear(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.fill_rect(Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT), color)
    }
}

/// Shared handle, so a host can keep inspecting a surface it gave away
impl<S: Surface + ?Sized> Surface for std::rc::Rc<std::cell::RefCell<S>> {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError> {
        self.borrow_mut().fill_rect(rect, color)
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) -> Result<(), SurfaceError> {
        self.borrow_mut().stroke_rect(rect, color, line_width)
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) -> Result<(), SurfaceError> {
        self.borrow_mut().fill_circle(cx, cy, radius, color)
    }

    fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        style: TextStyle,
        color: Color,
    ) -> Result<(), SurfaceError> {
        self.borrow_mut().fill_text(text, x, y, style, color)
    }

    fn measure_text(&mut self, text: &str, size: f32) -> Result<f32, SurfaceError> {
        self.borrow_mut().measure_text(text, size)
    }

    fn set_alpha(&mut self, alpha: f32) -> Result<(), SurfaceError> {
        self.borrow_mut().set_alpha(alpha)
    }
}
