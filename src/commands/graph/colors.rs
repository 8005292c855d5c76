//! Phase color assignment for visual differentiation
//!
//! Colors are picked from a hash of the phase id, so a phase keeps its color
//! across runs and between the level listing and the critical path line.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use colored::Color;

/// Terminal colors that read well on both dark and light backgrounds
const PHASE_COLORS: [Color; 12] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::BrightRed,
    Color::BrightGreen,
    Color::BrightYellow,
    Color::BrightBlue,
    Color::BrightMagenta,
    Color::BrightCyan,
];

/// Deterministically assign a color to a phase based on its id
pub fn phase_color(phase_id: &str) -> Color {
    let mut hasher = DefaultHasher::new();
    phase_id.hash(&mut hasher);
    let index = (hasher.finish() % PHASE_COLORS.len() as u64) as usize;
    PHASE_COLORS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_color_assignment() {
        assert_eq!(phase_color("3"), phase_color("3"));
    }

    #[test]
    fn test_color_comes_from_palette() {
        for id in ["1", "2", "schema", "release-notes"] {
            assert!(PHASE_COLORS.contains(&phase_color(id)));
        }
    }
}
