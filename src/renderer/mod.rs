//! Rendering module
//!
//! Pure draw functions over the `Surface` trait. Nothing here mutates the
//! simulation; the star field is advanced by the engine.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;
pub mod screens;
pub mod sprites;
pub mod stars;
pub mod surface;
pub mod text;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use screens::{draw_game_over, draw_level_transition, draw_menu, draw_skin_menu};
pub use sprites::{draw_hud, draw_world};
pub use stars::{STAR_COUNT, Starfield};
pub use surface::{Color, Surface, TextAlign, TextStyle};
pub use text::wrap_text;
