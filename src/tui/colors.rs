//! Color constants and accent handling for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Priority;

/// Used for High priority markers
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Used for Medium priority markers
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for Low priority markers
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);

// Fallback accents cycled across columns that declare no accent_color hint.
const FALLBACK_ACCENTS: [Color; 4] = [Color::Blue, Color::Yellow, Color::Magenta, Color::Green];

/// Resolve a column's accent color from its hint, falling back to a
/// position-based palette so adjacent columns stay distinguishable.
pub fn accent_color(hint: &str, column_index: usize) -> Color {
    match hint.to_lowercase().as_str() {
        "blue" => Color::Blue,
        "green" => Color::Green,
        "red" => Color::Red,
        "yellow" => Color::Yellow,
        "magenta" | "purple" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::DarkGray,
        "white" => Color::White,
        _ => FALLBACK_ACCENTS[column_index % FALLBACK_ACCENTS.len()],
    }
}

/// Marker color for a card's priority.
pub fn priority_color(p: Priority) -> Color {
    match p {
        Priority::High => DARK_RED,
        Priority::Medium => GOLD,
        Priority::Low => DARK_GREEN,
    }
}
