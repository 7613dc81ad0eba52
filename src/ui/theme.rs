use ratatui::style::{Color, Modifier, Style};

const GOLD: Color = Color::Rgb(212, 175, 55);
const SILVER: Color = Color::Rgb(176, 176, 176);
const GRAPHITE: Color = Color::Rgb(102, 102, 102);
const GREEN: Color = Color::Rgb(34, 197, 94);
const YELLOW: Color = Color::Rgb(234, 179, 8);
const ORANGE: Color = Color::Rgb(249, 115, 22);
const RED: Color = Color::Rgb(239, 68, 68);
const WHITE: Color = Color::Rgb(255, 255, 255);

#[derive(Debug, Clone)]
pub struct Theme {
    // Chrome
    pub logo_style: Style,
    pub title_style: Style,
    pub subtitle_style: Style,
    pub hint_style: Style,

    // Body text
    pub text_style: Style,
    pub heading_style: Style,
    pub error_style: Style,
    pub success_style: Style,
    pub indicator_style: Style,

    // Command palette
    pub palette_selected_style: Style,
    pub palette_item_style: Style,
    pub palette_help_style: Style,

    // Input fields
    pub input_border_style: Style,
    pub input_focused_border_style: Style,
    pub input_text_style: Style,
    pub input_cursor_style: Style,
    pub placeholder_style: Style,
    pub label_style: Style,
    pub focused_label_style: Style,

    // Score bar
    pub bar_empty_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mahoraga()
    }
}

impl Theme {
    /// Gold-on-dark palette used throughout the app.
    pub fn mahoraga() -> Self {
        Theme {
            logo_style: Style::default().fg(GOLD),
            title_style: Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            subtitle_style: Style::default().fg(GRAPHITE),
            hint_style: Style::default().fg(GRAPHITE),

            text_style: Style::default().fg(WHITE),
            heading_style: Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            error_style: Style::default().fg(RED),
            success_style: Style::default().fg(GREEN),
            indicator_style: Style::default().fg(GOLD),

            palette_selected_style: Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            palette_item_style: Style::default().fg(SILVER),
            palette_help_style: Style::default().fg(GRAPHITE),

            input_border_style: Style::default().fg(GRAPHITE),
            input_focused_border_style: Style::default().fg(GOLD),
            input_text_style: Style::default().fg(WHITE),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            placeholder_style: Style::default().fg(GRAPHITE),
            label_style: Style::default().fg(SILVER),
            focused_label_style: Style::default().fg(GOLD).add_modifier(Modifier::BOLD),

            bar_empty_style: Style::default().fg(GRAPHITE),
        }
    }

    /// Style for a score, banded the same way as [`score_label`].
    pub fn score_style(&self, percent: u8) -> Style {
        let color = match percent {
            70.. => GREEN,
            50..=69 => YELLOW,
            30..=49 => ORANGE,
            _ => RED,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

pub fn score_label(percent: u8) -> &'static str {
    match percent {
        90.. => "Excellent",
        70..=89 => "Good",
        50..=69 => "Fair",
        30..=49 => "Poor",
        _ => "Very Poor",
    }
}
