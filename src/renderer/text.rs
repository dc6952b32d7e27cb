//! Word wrapping against a surface's text metrics

use super::surface::Surface;
use crate::error::SurfaceError;

/// Split `text` on whitespace into lines no wider than `max_width`.
/// A single word wider than `max_width` gets a line of its own.
pub fn wrap_text(
    surface: &mut dyn Surface,
    text: &str,
    max_width: f32,
    size: f32,
) -> Result<Vec<String>, SurfaceError> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if surface.measure_text(&candidate, size)? <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;

    #[test]
    fn test_wraps_on_width() {
        let mut surface = RecordingSurface::new();
        // 10px font: 5.5px per char, so 60px fits 10 chars
        let lines = wrap_text(&mut surface, "aaaa bbbb cccc dddd", 60.0, 10.0).unwrap();
        assert_eq!(lines, vec!["aaaa bbbb", "cccc dddd"]);
    }

    #[test]
    fn test_overlong_word_alone() {
        let mut surface = RecordingSurface::new();
        let lines = wrap_text(&mut surface, "hi extraordinarily ok", 30.0, 10.0).unwrap();
        assert_eq!(lines, vec!["hi", "extraordinarily", "ok"]);
    }

    #[test]
    fn test_empty_and_whitespace() {
        let mut surface = RecordingSurface::new();
        assert!(wrap_text(&mut surface, "   ", 100.0, 10.0).unwrap().is_empty());
    }
}
