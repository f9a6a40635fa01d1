//! Terminal rendering of dashboard cards

use application::{CardView, Theme};
use domain::Suggestion;

/// Clear the screen and move the cursor home
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const TITLE: &str = "Weather Dashboard";

/// Draw one card as a box
pub fn card_box(card: &CardView) -> String {
    let mut lines = vec![format!("[ {} ]", card.city())];
    lines.extend(card.lines());

    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let border = format!("+{}+", "-".repeat(width + 2));

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    for line in &lines {
        let pad = width - line.chars().count();
        out.push_str(&format!("| {line}{} |\n", " ".repeat(pad)));
    }
    out.push_str(&border);
    out
}

/// Whole dashboard screen: title bar and one box per card
pub fn dashboard(cards: &[CardView], theme: Theme) -> String {
    let mut out = format!("{TITLE}    [{}]\n\n", theme.toggle_label());
    if cards.is_empty() {
        out.push_str("No cities tracked\n");
    }
    for card in cards {
        out.push_str(&card_box(card));
        out.push('\n');
    }
    out
}

/// Current query and its numbered suggestions
pub fn suggestions(input: &str, suggestions: &[Suggestion]) -> String {
    if input.is_empty() {
        return String::new();
    }
    let mut out = format!("Search: {input}\n");
    for (i, suggestion) in suggestions.iter().enumerate() {
        out.push_str(&format!("  {}. {suggestion}\n", i + 1));
    }
    out
}
