//! Themes and color helpers
//!
//! A compact theme struct with a couple of built-ins, plus the color math
//! for poster placeholders and watched-row pastels. Colors must be stable
//! across redraws, so "random" picks are derived by hashing instead of
//! sampling an RNG every frame.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use once_cell::sync::Lazy;
use ratatui::style::Color;

/// Colors used across the UI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub bg: Color,
    pub border: Color,
    pub title: Color,
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    /// Card and popup surface background.
    pub surface: Color,
    /// Skeleton-card shades, alternated for the shimmer effect.
    pub skeleton: Color,
    pub skeleton_alt: Color,
}

/// Poster placeholder palette: letterboxd green, orange, blue.
pub const POSTER_PALETTE: [Color; 3] = [
    Color::Rgb(0, 224, 84),
    Color::Rgb(255, 128, 0),
    Color::Rgb(0, 153, 255),
];

static MARQUEE: Lazy<Theme> = Lazy::new(|| Theme {
    name: "marquee".to_string(),
    bg: Color::Rgb(20, 24, 28),
    border: Color::Rgb(68, 85, 102),
    title: Color::Rgb(0, 224, 84),
    accent: Color::Rgb(0, 153, 255),
    text: Color::Rgb(204, 216, 228),
    dim: Color::Rgb(120, 135, 150),
    success: Color::Rgb(0, 224, 84),
    warning: Color::Rgb(255, 128, 0),
    error: Color::Rgb(255, 85, 85),
    surface: Color::Rgb(28, 34, 40),
    skeleton: Color::Rgb(38, 46, 54),
    skeleton_alt: Color::Rgb(48, 58, 68),
});

static MIDNIGHT: Lazy<Theme> = Lazy::new(|| Theme {
    name: "midnight".to_string(),
    bg: Color::Rgb(24, 24, 37),
    border: Color::Rgb(88, 91, 112),
    title: Color::Rgb(139, 233, 253),
    accent: Color::Rgb(189, 147, 249),
    text: Color::Rgb(203, 213, 225),
    dim: Color::Rgb(148, 163, 184),
    success: Color::Rgb(80, 250, 123),
    warning: Color::Rgb(255, 203, 107),
    error: Color::Rgb(255, 85, 85),
    surface: Color::Rgb(30, 30, 45),
    skeleton: Color::Rgb(40, 40, 60),
    skeleton_alt: Color::Rgb(51, 51, 75),
});

/// Look up a theme by name, falling back to the default.
pub fn by_name(name: &str) -> Theme {
    match name {
        "midnight" => MIDNIGHT.clone(),
        _ => MARQUEE.clone(),
    }
}

fn hash_str(s: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    s.hash(&mut hasher);
    hasher.finish()
}

/// Placeholder color for a movie's poster area, picked from the fixed
/// palette by hashing the title.
pub fn poster_color(name: &str) -> Color {
    POSTER_PALETTE[(hash_str(name) % POSTER_PALETTE.len() as u64) as usize]
}

/// Dark pastel background for a watched row: an arbitrary-but-stable hue at
/// fixed saturation/lightness (the original used `hsl(random, 70%, 30%)`).
pub fn pastel(seed: &str, index: usize) -> Color {
    let hue = ((hash_str(seed).wrapping_add(index as u64 * 47)) % 360) as f32;
    hsl_to_rgb(hue, 0.7, 0.3)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::Rgb(to_byte(r1), to_byte(g1), to_byte(b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_falls_back_to_default() {
        assert_eq!(by_name("no-such-theme").name, "marquee");
        assert_eq!(by_name("midnight").name, "midnight");
    }

    #[test]
    fn test_poster_color_is_stable_and_in_palette() {
        let a = poster_color("Dune");
        let b = poster_color("Dune");
        assert_eq!(a, b);
        assert!(POSTER_PALETTE.contains(&a));
    }

    #[test]
    fn test_pastel_is_stable_per_entry() {
        assert_eq!(pastel("Dune (2021)", 0), pastel("Dune (2021)", 0));
    }

    #[test]
    fn test_hsl_to_rgb_grayscale() {
        // Zero saturation collapses to gray regardless of hue.
        assert_eq!(hsl_to_rgb(120.0, 0.0, 0.5), Color::Rgb(128, 128, 128));
    }

    #[test]
    fn test_hsl_to_rgb_pure_red() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
    }
}
