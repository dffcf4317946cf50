//! Input handling: global keybindings, then grid keys; mouse events
//! translated into grid-local pointer calls.

use super::*;

impl App {
    // ─── Key handling ────────────────────────────────────────────────────

    /// Main key handler. The help modal swallows the first key, global
    /// bindings come next, everything else goes to the grid. Keys the grid
    /// never sees still end digit entry.
    pub(super) fn handle_key(&mut self, key: KeyEvent) {
        // Help modal: any key dismisses it (swallows the keypress)
        let handled = if self.show_help {
            self.show_help = false;
            true
        } else {
            self.handle_global_key(key)
        };

        if handled
            || key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            self.grid.clear_digits();
            return;
        }
        self.grid.handle_key(key.code, &mut self.doc, &mut self.canvas);
    }

    /// Returns whether the key was a global binding.
    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
                if self.modified {
                    self.save();
                }
                self.should_quit = true;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => self.save(),
            (KeyModifiers::CONTROL, KeyCode::Char('z')) => {
                if !self.doc.undo() {
                    self.set_status("Nothing to undo");
                }
            }
            (KeyModifiers::CONTROL, KeyCode::Char('y')) => self.redo(),
            // Redo (alternative: Ctrl+Shift+Z)
            (m, KeyCode::Char('Z') | KeyCode::Char('z'))
                if m.contains(KeyModifiers::CONTROL) && m.contains(KeyModifiers::SHIFT) =>
            {
                self.redo()
            }
            (_, KeyCode::F(1)) => self.show_help = true,
            (KeyModifiers::NONE, KeyCode::Char(' ')) => {
                self.doc.transport.toggle(Instant::now());
                let state = if self.doc.transport.is_playing() {
                    "Playing"
                } else {
                    "Paused"
                };
                tracing::debug!("transport: {}", state);
                self.set_status(state);
            }
            (_, KeyCode::PageUp) => {
                let pos = self.doc.bar_scroll_pos().saturating_sub(VISIBLE_BARS);
                self.doc.set_bar_scroll_pos(pos);
            }
            (_, KeyCode::PageDown) => {
                let pos = self.doc.bar_scroll_pos() + VISIBLE_BARS;
                self.doc.set_bar_scroll_pos(pos);
            }
            _ => return false,
        }
        true
    }

    fn redo(&mut self) {
        if !self.doc.redo() {
            self.set_status("Nothing to redo");
        }
    }

    // ─── Mouse handling ──────────────────────────────────────────────────

    /// Synthesises pointer enter/leave from the grid rectangle, then routes
    /// presses, moves and releases to the grid in grid-local coordinates.
    pub(super) fn handle_mouse(&mut self, mouse: MouseEvent) {
        let area = self.grid_area;
        let inside = mouse.column >= area.x
            && mouse.column < area.x + area.width
            && mouse.row >= area.y
            && mouse.row < area.y + area.height;
        let x = mouse.column as f64 - area.x as f64;
        let y = mouse.row as f64 - area.y as f64;

        match (inside, self.grid.pointer()) {
            (true, PointerPresence::Idle) => self.grid.pointer_enter(&self.doc, &mut self.canvas),
            (false, PointerPresence::Hover) => {
                self.grid.pointer_leave(&self.doc, &mut self.canvas)
            }
            _ => {}
        }

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                if inside {
                    self.grid.pointer_move(x, y, &self.doc, &mut self.canvas);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if inside {
                    self.grid
                        .pointer_press(x, y, &mut self.doc, &mut self.canvas);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.grid.pointer_release(),
            _ => {}
        }
    }
}
