use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme;

pub fn render(frame: &mut Frame, area: Rect, filename: &str, modified: bool, playing: bool) {
    // Left side: filename + modified indicator
    let left_spans = render_filename(filename, modified);

    // Right side: transport tabs, the active one highlighted
    let tabs = [("STOPPED", !playing), ("PLAYING", playing)];
    let right_spans: Vec<Span> = tabs
        .iter()
        .map(|(label, active)| {
            if *active {
                Span::styled(
                    format!(" {} ", label),
                    Style::default()
                        .fg(theme::WHITE)
                        .bg(theme::ACTIVE_TAB)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(
                    format!(" {} ", label),
                    Style::default().fg(theme::INACTIVE_TAB).bg(theme::BAR_BG),
                )
            }
        })
        .collect();

    let chunks = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(right_spans.iter().map(|s| s.width() as u16).sum()),
    ])
    .split(area);

    // Fill background
    let bg = Paragraph::new("").style(theme::header_style());
    frame.render_widget(bg, area);

    let left = Paragraph::new(Line::from(left_spans));
    frame.render_widget(left, chunks[0]);

    let right = Paragraph::new(Line::from(right_spans));
    frame.render_widget(right, chunks[1]);
}

fn render_filename<'a>(filename: &str, modified: bool) -> Vec<Span<'a>> {
    let mut spans = vec![Span::styled(
        format!("  {}", filename),
        theme::header_style(),
    )];
    if modified {
        spans.push(Span::styled(
            " \u{2022}",
            Style::default().fg(theme::WARNING).bg(theme::BAR_BG),
        ));
    }
    spans
}
