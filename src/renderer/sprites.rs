//! In-game drawing: entities, HUD, and the level caption
//!
//! Sprites are compositions of rectangles and circles.

use super::stars::Starfield;
use super::surface::{Color, Surface, TextStyle};
use super::text::wrap_text;
use crate::Rect;
use crate::consts::*;
use crate::error::SurfaceError;
use crate::sim::{Boss, Bullet, BulletOwner, Enemy, Player, WorldState};

pub const BACKGROUND: Color = Color::rgb(8, 8, 24);
const ENEMY_COLOR: Color = Color::rgb(220, 60, 90);
const BOSS_COLOR: Color = Color::rgb(170, 40, 200);
const HUD_COLOR: Color = Color::rgb(230, 230, 240);
const ACCENT: Color = Color::rgb(255, 210, 60);

const HUD_SIZE: f32 = 20.0;
const CAPTION_SIZE: f32 = 16.0;
const CAPTION_WIDTH: f32 = 820.0;
const PROGRESS_WIDTH: f32 = 300.0;

pub fn draw_player(surface: &mut dyn Surface, player: &Player) -> Result<(), SurfaceError> {
    let (x, y, w, h) = (player.x, player.y, player.width, player.height);
    // Hull, wings, cockpit
    surface.fill_rect(Rect::new(x + w * 0.3, y + h * 0.2, w * 0.4, h * 0.8), player.color)?;
    surface.fill_rect(Rect::new(x, y + h * 0.55, w, h * 0.3), player.color)?;
    surface.fill_rect(Rect::new(x + w * 0.42, y, w * 0.16, h * 0.25), player.color)?;
    surface.fill_circle(x + w / 2.0, y + h * 0.45, w * 0.1, Color::WHITE)?;
    if player.fast_fire {
        surface.stroke_rect(player.rect(), ACCENT.with_alpha(0.6), 1.5)?;
    }
    Ok(())
}

pub fn draw_enemy(surface: &mut dyn Surface, enemy: &Enemy, frame: u64) -> Result<(), SurfaceError> {
    let (x, y, w, h) = (enemy.x, enemy.y, enemy.width, enemy.height);
    surface.fill_rect(Rect::new(x, y + h * 0.15, w, h * 0.6), ENEMY_COLOR)?;
    surface.fill_circle(x + w * 0.3, y + h * 0.4, h * 0.1, Color::WHITE)?;
    surface.fill_circle(x + w * 0.7, y + h * 0.4, h * 0.1, Color::WHITE)?;
    // Legs alternate every 20 frames
    let spread = if (frame / 20) % 2 == 0 { 0.0 } else { w * 0.08 };
    surface.fill_rect(Rect::new(x + w * 0.1 - spread, y + h * 0.75, w * 0.15, h * 0.25), ENEMY_COLOR)?;
    surface.fill_rect(Rect::new(x + w * 0.75 + spread, y + h * 0.75, w * 0.15, h * 0.25), ENEMY_COLOR)?;
    Ok(())
}

pub fn draw_boss(surface: &mut dyn Surface, boss: &Boss, frame: u64) -> Result<(), SurfaceError> {
    let rect = boss.rect();
    let glow = ((frame as f32) * 0.1).sin() * 0.15 + 0.35;
    surface.fill_rect(
        Rect::new(rect.x - 6.0, rect.y - 6.0, rect.width + 12.0, rect.height + 12.0),
        BOSS_COLOR.with_alpha(glow),
    )?;
    surface.fill_rect(rect, BOSS_COLOR)?;
    for i in 0..3 {
        let cx = rect.x + rect.width * (0.25 + 0.25 * i as f32);
        surface.fill_circle(cx, rect.y + rect.height * 0.45, rect.height * 0.15, ACCENT)?;
    }

    // Health bar above the boss
    let bar = Rect::new(rect.x, rect.y - 14.0, rect.width, 6.0);
    surface.fill_rect(bar, Color::rgb(60, 60, 60))?;
    surface.fill_rect(
        Rect::new(bar.x, bar.y, bar.width * boss.health_fraction(), bar.height),
        Color::rgb(255, 70, 70),
    )?;
    Ok(())
}

pub fn bullet_color(owner: BulletOwner) -> Color {
    match owner {
        BulletOwner::Player => Color::rgb(255, 255, 120),
        BulletOwner::Ally => Color::rgb(90, 200, 255),
        BulletOwner::Hazard => Color::rgb(255, 80, 40),
    }
}

pub fn draw_bullet(surface: &mut dyn Surface, bullet: &Bullet) -> Result<(), SurfaceError> {
    surface.fill_rect(bullet.rect(), bullet_color(bullet.owner))
}

/// Score, level, toggles, and the level progress bar
pub fn draw_hud(surface: &mut dyn Surface, world: &WorldState) -> Result<(), SurfaceError> {
    surface.fill_text(
        &format!("Score: {}", world.score),
        20.0,
        32.0,
        TextStyle::new(HUD_SIZE),
        HUD_COLOR,
    )?;
    surface.fill_text(
        &format!("Level {}", world.level),
        SCREEN_WIDTH - 20.0,
        32.0,
        TextStyle::right(HUD_SIZE),
        HUD_COLOR,
    )?;

    let fast = if world.player.fast_fire { ACCENT } else { HUD_COLOR.with_alpha(0.35) };
    surface.fill_text("FAST FIRE [F]", 20.0, 56.0, TextStyle::new(14.0), fast)?;
    surface.fill_text("NUKE [N]", SCREEN_WIDTH - 20.0, 56.0, TextStyle::right(14.0), ACCENT)?;

    let bar = Rect::new((SCREEN_WIDTH - PROGRESS_WIDTH) / 2.0, 18.0, PROGRESS_WIDTH, 10.0);
    surface.stroke_rect(bar, HUD_COLOR.with_alpha(0.6), 1.0)?;
    let fill = if world.boss.is_some() { Color::rgb(255, 70, 70) } else { ENEMY_COLOR };
    surface.fill_rect(
        Rect::new(bar.x, bar.y, bar.width * world.progress_remaining(), bar.height),
        fill,
    )?;
    surface.fill_text(
        world.theme.name,
        SCREEN_WIDTH / 2.0,
        48.0,
        TextStyle::centered(14.0),
        HUD_COLOR.with_alpha(0.8),
    )?;
    Ok(())
}

/// Word-wrapped level summary along the bottom of the screen
pub fn draw_caption(surface: &mut dyn Surface, summary: &str) -> Result<(), SurfaceError> {
    let lines = wrap_text(surface, summary, CAPTION_WIDTH, CAPTION_SIZE)?;
    let line_height = CAPTION_SIZE * 1.3;
    let mut y = SCREEN_HEIGHT - 16.0 - line_height * (lines.len().saturating_sub(1)) as f32;
    for line in &lines {
        surface.fill_text(
            line,
            SCREEN_WIDTH / 2.0,
            y,
            TextStyle::centered(CAPTION_SIZE),
            HUD_COLOR.with_alpha(0.75),
        )?;
        y += line_height;
    }
    Ok(())
}

/// Full playing frame
pub fn draw_world(
    surface: &mut dyn Surface,
    world: &WorldState,
    stars: &Starfield,
    frame: u64,
) -> Result<(), SurfaceError> {
    surface.set_alpha(1.0)?;
    surface.clear(BACKGROUND)?;
    stars.draw(surface)?;

    for enemy in &world.enemies {
        draw_enemy(surface, enemy, frame)?;
    }
    if let Some(boss) = &world.boss {
        draw_boss(surface, boss, frame)?;
    }
    for bullet in &world.bullets {
        draw_bullet(surface, bullet)?;
    }
    draw_player(surface, &world.player)?;

    let player = world.player.rect();
    for object in &world.objects {
        // A broken object sprite must not cost the rest of the frame
        let _ = object.draw(surface, player, frame);
    }

    draw_hud(surface, world)?;
    draw_caption(surface, &world.level_summary)
}
