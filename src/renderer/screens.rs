//! Menu, skin picker, level transition, and game-over screens

use super::sprites::{BACKGROUND, draw_player};
use super::stars::Starfield;
use super::surface::{Color, Surface, TextStyle};
use super::text::wrap_text;
use crate::Rect;
use crate::consts::*;
use crate::engine::MenuOption;
use crate::error::SurfaceError;
use crate::settings::Skin;
use crate::sim::{WorldState, create_player};

const TITLE: Color = Color::rgb(120, 220, 255);
const TEXT: Color = Color::rgb(230, 230, 240);
const HIGHLIGHT: Color = Color::rgb(255, 210, 60);

/// Frames each flavor line stays up on the transition screen
pub const FLAVOR_ROTATION_FRAMES: u64 = 45;

const FLAVOR: &[&str] = &[
    "Recalibrating targeting systems...",
    "Refueling thrusters...",
    "Scanning the next sector...",
    "Reloading cannons...",
    "Intercepting enemy chatter...",
    "Charging shields...",
];

pub fn draw_menu(
    surface: &mut dyn Surface,
    stars: &Starfield,
    selected: usize,
    frame: u64,
) -> Result<(), SurfaceError> {
    surface.set_alpha(1.0)?;
    surface.clear(BACKGROUND)?;
    stars.draw(surface)?;

    surface.fill_text("TOMO", SCREEN_WIDTH / 2.0, 200.0, TextStyle::centered(72.0), TITLE)?;
    surface.fill_text(
        "Defend the line",
        SCREEN_WIDTH / 2.0,
        245.0,
        TextStyle::centered(20.0),
        TEXT.with_alpha(0.7),
    )?;

    let pulse = ((frame as f32) * 0.1).sin() * 0.25 + 0.75;
    for (i, option) in MenuOption::ALL.iter().enumerate() {
        let y = 340.0 + i as f32 * 60.0;
        if i == selected {
            surface.fill_text(
                &format!("> {} <", option.label()),
                SCREEN_WIDTH / 2.0,
                y,
                TextStyle::centered(32.0),
                HIGHLIGHT.with_alpha(pulse),
            )?;
        } else {
            surface.fill_text(option.label(), SCREEN_WIDTH / 2.0, y, TextStyle::centered(28.0), TEXT)?;
        }
    }

    surface.fill_text(
        "Up/Down to choose, Enter to confirm",
        SCREEN_WIDTH / 2.0,
        SCREEN_HEIGHT - 40.0,
        TextStyle::centered(16.0),
        TEXT.with_alpha(0.5),
    )
}

pub fn draw_skin_menu(
    surface: &mut dyn Surface,
    stars: &Starfield,
    palette: &[Skin],
    selected: usize,
) -> Result<(), SurfaceError> {
    surface.set_alpha(1.0)?;
    surface.clear(BACKGROUND)?;
    stars.draw(surface)?;

    surface.fill_text(
        "Choose Your Color",
        SCREEN_WIDTH / 2.0,
        150.0,
        TextStyle::centered(44.0),
        TITLE,
    )?;

    let slot = 130.0;
    let left = (SCREEN_WIDTH - slot * palette.len() as f32) / 2.0;
    for (i, skin) in palette.iter().enumerate() {
        let mut preview = create_player(skin.color);
        preview.x = left + slot * i as f32 + (slot - preview.width) / 2.0;
        preview.y = 300.0;
        draw_player(surface, &preview)?;
        if i == selected {
            surface.stroke_rect(
                Rect::new(preview.x - 15.0, preview.y - 15.0, preview.width + 30.0, preview.height + 30.0),
                HIGHLIGHT,
                3.0,
            )?;
        }
    }

    if let Some(skin) = palette.get(selected) {
        surface.fill_text(&skin.name, SCREEN_WIDTH / 2.0, 430.0, TextStyle::centered(28.0), skin.color)?;
    }
    surface.fill_text(
        "Arrows to browse, Enter to select",
        SCREEN_WIDTH / 2.0,
        SCREEN_HEIGHT - 40.0,
        TextStyle::centered(16.0),
        TEXT.with_alpha(0.5),
    )
}

/// Dimmed overlay with the final score
pub fn draw_game_over(surface: &mut dyn Surface, world: &WorldState, frame: u64) -> Result<(), SurfaceError> {
    surface.set_alpha(1.0)?;
    surface.clear(BACKGROUND)?;
    surface.fill_rect(
        Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT),
        Color::rgba(80, 0, 0, 0.3),
    )?;
    surface.fill_text(
        "GAME OVER",
        SCREEN_WIDTH / 2.0,
        250.0,
        TextStyle::centered(64.0),
        Color::rgb(255, 70, 70),
    )?;
    surface.fill_text(
        &format!("Final Score: {}", world.score),
        SCREEN_WIDTH / 2.0,
        330.0,
        TextStyle::centered(32.0),
        TEXT,
    )?;
    surface.fill_text(
        &format!("Reached level {}", world.level),
        SCREEN_WIDTH / 2.0,
        375.0,
        TextStyle::centered(22.0),
        TEXT.with_alpha(0.7),
    )?;
    // Blink the prompt
    if (frame / 30) % 2 == 0 {
        surface.fill_text(
            "Press Space to play again",
            SCREEN_WIDTH / 2.0,
            470.0,
            TextStyle::centered(24.0),
            HIGHLIGHT,
        )?;
    }
    Ok(())
}

/// Countdown screen between levels. `remaining` counts down from `total`.
pub fn draw_level_transition(
    surface: &mut dyn Surface,
    world: &WorldState,
    remaining: u32,
    total: u32,
    frame: u64,
) -> Result<(), SurfaceError> {
    let total = total.max(1);
    let elapsed = total.saturating_sub(remaining);

    surface.set_alpha(1.0)?;
    surface.clear(BACKGROUND)?;
    surface.fill_text(
        &format!("Level {}", world.level),
        SCREEN_WIDTH / 2.0,
        180.0,
        TextStyle::centered(56.0),
        TITLE,
    )?;
    surface.fill_text(
        world.theme.name,
        SCREEN_WIDTH / 2.0,
        235.0,
        TextStyle::centered(28.0),
        HIGHLIGHT,
    )?;

    let bar = Rect::new(300.0, 290.0, 400.0, 12.0);
    surface.stroke_rect(bar, TEXT.with_alpha(0.6), 1.0)?;
    surface.fill_rect(
        Rect::new(bar.x, bar.y, bar.width * elapsed as f32 / total as f32, bar.height),
        TITLE,
    )?;

    let flavor = FLAVOR[((frame / FLAVOR_ROTATION_FRAMES) as usize) % FLAVOR.len()];
    surface.fill_text(
        flavor,
        SCREEN_WIDTH / 2.0,
        340.0,
        TextStyle::centered(18.0),
        TEXT.with_alpha(0.6),
    )?;

    // Summary appears for the last two thirds
    if elapsed * 3 >= total {
        let size = 22.0;
        let mut y = 420.0;
        for line in wrap_text(surface, &world.level_summary, 700.0, size)? {
            surface.fill_text(&line, SCREEN_WIDTH / 2.0, y, TextStyle::centered(size), TEXT)?;
            y += size * 1.4;
        }
    }
    surface.fill_text(
        &format!("Score: {}", world.score),
        SCREEN_WIDTH / 2.0,
        SCREEN_HEIGHT - 40.0,
        TextStyle::centered(18.0),
        TEXT.with_alpha(0.7),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use crate::settings::Settings;
    use crate::sim::THEMES;

    #[test]
    fn test_menu_highlights_selection() {
        let mut surface = RecordingSurface::new();
        draw_menu(&mut surface, &Starfield::empty(), 1, 0).unwrap();
        assert!(surface.contains_text("> Choose Color <"));
        assert!(surface.texts().contains(&"Start Game"));
        assert!(surface.texts().contains(&"Quit"));
    }

    #[test]
    fn test_skin_menu_names_selection() {
        let settings = Settings::default();
        let mut surface = RecordingSurface::new();
        draw_skin_menu(&mut surface, &Starfield::empty(), &settings.palette, 2).unwrap();
        assert!(surface.contains_text(&settings.palette[2].name));
    }

    #[test]
    fn test_game_over_shows_score() {
        let mut world = WorldState::new(Color::WHITE, 5);
        world.score = -40;
        let mut surface = RecordingSurface::new();
        draw_game_over(&mut surface, &world, 0).unwrap();
        assert!(surface.contains_text("Final Score: -40"));
        assert!(surface.contains_text("Press Space"));
    }

    #[test]
    fn test_transition_reveals_summary_late() {
        let mut world = WorldState::new(Color::WHITE, 5);
        world.advance_level(THEMES[0]);
        let first_word = THEMES[0].summary.split_whitespace().next().unwrap();

        let mut early = RecordingSurface::new();
        draw_level_transition(&mut early, &world, 180, 180, 0).unwrap();
        assert!(early.contains_text("Level 2"));
        assert!(!early.texts().iter().any(|t| t.starts_with(first_word)));

        let mut late = RecordingSurface::new();
        draw_level_transition(&mut late, &world, 100, 180, 0).unwrap();
        assert!(late.texts().iter().any(|t| t.starts_with(first_word)));
    }

    #[test]
    fn test_flavor_rotates() {
        let world = WorldState::new(Color::WHITE, 5);
        let mut a = RecordingSurface::new();
        let mut b = RecordingSurface::new();
        draw_level_transition(&mut a, &world, 90, 180, 0).unwrap();
        draw_level_transition(&mut b, &world, 90, 180, FLAVOR_ROTATION_FRAMES).unwrap();
        assert!(a.contains_text(FLAVOR[0]));
        assert!(b.contains_text(FLAVOR[1]));
    }
}
