//! UI rendering: main frame layout, grid canvas placement, and help modal
//! overlay.

use super::*;

impl App {
    /// Runs one frame of the main loop: draw + tick.
    /// This is the canonical render path -- tested by render_test to ensure
    /// no accidental screen clears (which cause flicker).
    pub fn render_frame<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> std::io::Result<()> {
        terminal.draw(|frame| self.render(frame))?;
        self.tick();
        Ok(())
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn render(&mut self, frame: &mut Frame) {
        let full = frame.area();

        // Fill entire frame background first (covers margins outside capped area)
        let bg = Paragraph::new("").style(theme::editor_style());
        frame.render_widget(bg, full);

        // Cap width and center horizontally
        let capped_width = full.width.min(MAX_WIDTH);
        let x_offset = (full.width - capped_width) / 2;
        let usable_area = Rect::new(x_offset, full.y, capped_width, full.height);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Divider
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Divider
            Constraint::Length(1), // Status
        ])
        .split(usable_area);

        let filename = self
            .file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("untitled");
        header::render(
            frame,
            chunks[0],
            filename,
            self.modified,
            self.doc.transport.is_playing(),
        );

        // Thin dividers between bars and content
        let divider_style = Style::default().fg(theme::BORDER);
        let top_divider =
            Paragraph::new("\u{2500}".repeat(chunks[1].width as usize)).style(divider_style);
        frame.render_widget(top_divider, chunks[1]);
        let bottom_divider =
            Paragraph::new("\u{2500}".repeat(chunks[3].width as usize)).style(divider_style);
        frame.render_widget(bottom_divider, chunks[3]);

        self.render_grid(frame, chunks[2]);

        let selection = self.doc.selection();
        status::render(
            frame,
            chunks[4],
            status::StatusInfo {
                channel: selection.channel + 1,
                bar: selection.bar + 1,
                pattern: self.doc.selected_pattern(),
                digits: self.grid.digit_buffer(),
                undo_depth: self.doc.history.undo_depth(),
                message: &self.status_message,
                modified: self.modified,
            },
        );

        // Help modal overlay -- rendered last so it sits on top of everything
        if self.show_help {
            self.render_help(frame);
        }
    }

    /// Places the canvas centred in the content area, one row below the
    /// divider, and remembers where it went for mouse hit-testing.
    fn render_grid(&mut self, frame: &mut Frame, area: Rect) {
        let (width, height) = self.canvas.size();
        let width = width.min(area.width);
        let height = height.min(area.height.saturating_sub(1));
        let x = area.x + (area.width - width) / 2;
        let y = area.y + area.height.min(1);
        self.grid_area = Rect::new(x, y, width, height);
        frame.render_widget(&self.canvas, self.grid_area);
    }

    /// Renders a centered modal overlay listing all keybindings.
    /// Dismissed by pressing any key.
    fn render_help(&self, frame: &mut Frame) {
        let area = frame.area();
        let width = 48u16.min(area.width.saturating_sub(4));
        let height = 20u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let help_area = Rect::new(x, y, width, height);

        frame.render_widget(Clear, help_area);

        // Must match the actual keybinding handlers!
        let entry = |keys: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {:<17}", keys), theme::key_hint_style()),
                Span::raw(what),
            ])
        };
        let help_text = vec![
            Line::from(Span::styled("Keybindings", theme::heading_style())),
            Line::from(""),
            entry("Arrows", "Move selection"),
            entry("0-9", "Type pattern number"),
            entry("PgUp / PgDn", "Scroll 16 bars"),
            entry("Space", "Play / pause"),
            entry("Ctrl+Z / Ctrl+Y", "Undo / Redo"),
            entry("Ctrl+S", "Save"),
            entry("Ctrl+Q", "Save & quit"),
            entry("F1", "This help"),
            Line::from(""),
            entry("Click", "Select bar"),
            entry("Click selected", "Next / previous pattern"),
            Line::from(Span::raw(
                "    (upper half steps up, lower half down)",
            )),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER))
            .style(Style::default().fg(theme::FG).bg(theme::BAR_BG));

        let paragraph = Paragraph::new(help_text)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, help_area);
    }
}
