//! In-memory surface for headless runs and tests
//!
//! Records every draw call instead of rasterizing it.

use super::surface::{Color, Surface, TextStyle};
use crate::Rect;
use crate::error::SurfaceError;

/// Width of one glyph relative to the font size
const GLYPH_ADVANCE: f32 = 0.55;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect(Rect, Color),
    StrokeRect(Rect, Color, f32),
    FillCircle { cx: f32, cy: f32, radius: f32, color: Color },
    FillText { text: String, x: f32, y: f32, style: TextStyle, color: Color },
    SetAlpha(f32),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    /// Fail every call once this many commands have been recorded
    fail_after: Option<usize>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that starts rejecting draws after `count` successful ones
    pub fn failing_after(count: usize) -> Self {
        Self {
            commands: Vec::new(),
            fail_after: Some(count),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// All text drawn so far, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    fn record(&mut self, command: DrawCommand) -> Result<(), SurfaceError> {
        if self.fail_after.is_some_and(|n| self.commands.len() >= n) {
            return Err(SurfaceError::Backend("injected failure".into()));
        }
        self.commands.push(command);
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError> {
        self.record(DrawCommand::FillRect(rect, color))
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) -> Result<(), SurfaceError> {
        self.record(DrawCommand::StrokeRect(rect, color, line_width))
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) -> Result<(), SurfaceError> {
        self.record(DrawCommand::FillCircle {
            cx,
            cy,
            radius,
            color,
        })
    }

    fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        style: TextStyle,
        color: Color,
    ) -> Result<(), SurfaceError> {
        self.record(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            style,
            color,
        })
    }

    fn measure_text(&mut self, text: &str, size: f32) -> Result<f32, SurfaceError> {
        Ok(text.chars().count() as f32 * size * GLYPH_ADVANCE)
    }

    fn set_alpha(&mut self, alpha: f32) -> Result<(), SurfaceError> {
        self.record(DrawCommand::SetAlpha(alpha))
    }
}
