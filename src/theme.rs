use ratatui::style::{Color, Modifier, Style};

// Base colors: Color::Reset inherits terminal defaults
pub const BG: Color = Color::Reset;
pub const FG: Color = Color::Reset;
pub const BORDER: Color = Color::DarkGray;

// UI elements
pub const BAR_BG: Color = Color::Reset;
pub const HEADING: Color = Color::Rgb(130, 170, 255);
pub const KEY_HINT: Color = Color::Cyan;

// Grid cells
pub const EMPTY_CELL: Color = Color::Black;
pub const FILLED_CELL: Color = Color::Rgb(0x44, 0x44, 0x44);
pub const SELECTED_LABEL: Color = Color::Black;
pub const HOVER_OUTLINE: Color = Color::White;
pub const ARROW_ACTIVE: Color = Color::White;
pub const ARROW_IDLE: Color = Color::DarkGray;
pub const PLAYHEAD: Color = Color::White;

/// Per-channel label colours for patterns with no notes.
pub const CHANNEL_DIM: [Color; 4] = [
    Color::Rgb(0x00, 0x99, 0xa1),
    Color::Rgb(0xa1, 0xa1, 0x00),
    Color::Rgb(0xc7, 0x50, 0x00),
    Color::Rgb(0x6f, 0x6f, 0x6f),
];

/// Per-channel label colours for audible patterns, and selection fill.
pub const CHANNEL_BRIGHT: [Color; 4] = [
    Color::Rgb(0x25, 0xf3, 0xff),
    Color::Rgb(0xff, 0xff, 0x25),
    Color::Rgb(0xff, 0x97, 0x52),
    Color::Rgb(0xaa, 0xaa, 0xaa),
];

// Modified indicator
pub const WARNING: Color = Color::Yellow;

// White for text on colored backgrounds
pub const WHITE: Color = Color::White;

// Transport tab colors
pub const ACTIVE_TAB: Color = Color::Blue;
pub const INACTIVE_TAB: Color = Color::Gray;

/// Channels beyond the palette reuse it cyclically.
pub fn channel_dim(channel: usize) -> Color {
    CHANNEL_DIM[channel % CHANNEL_DIM.len()]
}

pub fn channel_bright(channel: usize) -> Color {
    CHANNEL_BRIGHT[channel % CHANNEL_BRIGHT.len()]
}

// Pre-built styles
pub fn editor_style() -> Style {
    Style::default().fg(FG).bg(BG)
}

pub fn header_style() -> Style {
    Style::default()
}

pub fn status_style() -> Style {
    Style::default()
}

pub fn heading_style() -> Style {
    Style::default()
        .fg(HEADING)
        .add_modifier(Modifier::BOLD)
}

pub fn key_hint_style() -> Style {
    Style::default().fg(KEY_HINT)
}
