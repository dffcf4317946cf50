use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme;

pub struct StatusInfo<'a> {
    /// 1-based.
    pub channel: usize,
    /// 1-based.
    pub bar: usize,
    pub pattern: usize,
    pub digits: &'a str,
    pub undo_depth: usize,
    pub message: &'a str,
    pub modified: bool,
}

pub fn render(frame: &mut Frame, area: Rect, info: StatusInfo) {
    // Fill the entire status bar background
    let bg = Paragraph::new("").style(theme::status_style());
    frame.render_widget(bg, area);

    let chunks = Layout::horizontal([
        Constraint::Length(24),
        Constraint::Fill(1),
        Constraint::Length(24),
    ])
    .split(area);

    // Left: selection and the pattern under it
    let pattern = if info.pattern == 0 {
        "-".to_string()
    } else {
        info.pattern.to_string()
    };
    let left = Paragraph::new(Line::from(Span::styled(
        format!("  Ch {}, Bar {}, Pat {}", info.channel, info.bar, pattern),
        theme::status_style(),
    )));
    frame.render_widget(left, chunks[0]);

    // Center: status message, or the digits typed so far
    let center_text = if !info.digits.is_empty() {
        format!("Pattern: {}_", info.digits)
    } else {
        info.message.to_string()
    };
    if !center_text.is_empty() {
        let center = Paragraph::new(Line::from(Span::styled(
            center_text,
            theme::status_style(),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(center, chunks[1]);
    }

    // Right: undo depth + save status
    let save_status = if info.modified { "Modified" } else { "Saved" };
    let right = Paragraph::new(Line::from(Span::styled(
        format!("{} edits | {}  ", info.undo_depth, save_status),
        theme::status_style(),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(right, chunks[2]);
}
