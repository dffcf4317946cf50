//! The grid controller: owns the cells and overlays, turns pointer and key
//! input into document commands, and reconciles the cells with the song
//! whenever the document reports a change.

use std::time::Instant;

use crossterm::event::KeyCode;

use super::{
    navigate, ArrowShape, Attr, Cell, DigitEntry, Direction, Element, GridLayout, PatternEdits,
    Surface, BAR_WIDTH, EDITOR_WIDTH, ROW_HEIGHT, SQUASHED_ROW_HEIGHT, SQUASH_THRESHOLD,
};
use crate::song::{Command, Selection, SongDocument, Subscription, VISIBLE_BARS};
use crate::theme;

/// Whether the pointer is over the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPresence {
    Idle,
    Hover,
}

/// What the hover overlay currently shows.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Overlay {
    Hidden,
    Outline { x: f64, y: f64, height: f64 },
    Arrows { up: bool, shape: ArrowShape },
}

pub struct GridController {
    /// `cells[channel][slot]`
    cells: Vec<Vec<Cell>>,
    channel_count: usize,
    pointer: PointerPresence,
    mouse_x: f64,
    mouse_y: f64,
    digits: DigitEntry,
    edits: PatternEdits,
    editor_height: f64,
    row_height: f64,
    rendered_squashed: bool,
    rendered_playhead: Option<i64>,
    rendered_overlay: Option<Overlay>,
    subscription: Subscription,
}

impl GridController {
    pub fn new(doc: &mut SongDocument, surface: &mut dyn Surface) -> Self {
        let channel_count = doc.song.channel_count();
        let mut cells = Vec::with_capacity(channel_count);
        for channel in 0..channel_count {
            let mut row = Vec::with_capacity(VISIBLE_BARS);
            for slot in 0..VISIBLE_BARS {
                row.push(Cell::new(channel, slot, surface));
            }
            cells.push(row);
        }

        let editor_height = channel_count as f64 * ROW_HEIGHT;
        surface.write(
            Element::Editor,
            Attr::Size {
                width: EDITOR_WIDTH,
                height: editor_height,
            },
        );
        surface.write(Element::BoxHighlight, Attr::Fill(theme::HOVER_OUTLINE));
        surface.write(Element::Playhead, Attr::Fill(theme::PLAYHEAD));
        surface.write(
            Element::Playhead,
            Attr::Size {
                width: 1.0,
                height: editor_height,
            },
        );

        let mut controller = Self {
            cells,
            channel_count,
            pointer: PointerPresence::Idle,
            mouse_x: 0.0,
            mouse_y: 0.0,
            digits: DigitEntry::default(),
            edits: PatternEdits::default(),
            editor_height,
            row_height: ROW_HEIGHT,
            rendered_squashed: false,
            rendered_playhead: None,
            rendered_overlay: None,
            subscription: doc.subscribe(),
        };
        controller.document_changed(doc, surface);
        controller
    }

    pub fn pointer(&self) -> PointerPresence {
        self.pointer
    }

    pub fn digit_buffer(&self) -> &str {
        self.digits.buffer()
    }

    /// Ends digit entry for a key handled outside the grid.
    pub fn clear_digits(&mut self) {
        self.digits.clear();
    }

    pub fn editor_height(&self) -> f64 {
        self.editor_height
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    pub fn is_squashed(&self) -> bool {
        self.rendered_squashed
    }

    pub fn cell(&self, channel: usize, slot: usize) -> Option<&Cell> {
        self.cells.get(channel)?.get(slot)
    }

    pub fn layout(&self, doc: &SongDocument) -> GridLayout {
        GridLayout {
            row_height: self.row_height,
            column_width: BAR_WIDTH,
            bar_scroll_pos: doc.bar_scroll_pos(),
            channel_count: self.channel_count,
            song_bars: doc.song.bars(),
        }
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Returns whether the key was consumed.
    pub fn handle_key(
        &mut self,
        code: KeyCode,
        doc: &mut SongDocument,
        surface: &mut dyn Surface,
    ) -> bool {
        if let Some(direction) = Direction::from_key(code) {
            let next = navigate(
                doc.selection(),
                direction,
                self.channel_count,
                doc.song.bars(),
            );
            self.set_channel_bar(next, doc);
            self.sync(doc, surface);
            return true;
        }

        match code {
            KeyCode::Char(digit) if digit.is_ascii_digit() => {
                self.next_digit(digit, doc);
                self.sync(doc, surface);
                true
            }
            _ => {
                self.digits.clear();
                false
            }
        }
    }

    fn next_digit(&mut self, digit: char, doc: &mut SongDocument) {
        let pattern_count = doc.song.pattern_count(doc.channel());
        if let Some(pattern) = self.digits.push(digit, |value| value <= pattern_count) {
            self.edits.set_bar_pattern(doc, pattern);
        }
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    pub fn pointer_enter(&mut self, doc: &SongDocument, surface: &mut dyn Surface) {
        if self.pointer == PointerPresence::Hover {
            return;
        }
        self.pointer = PointerPresence::Hover;
        self.update_preview(doc, surface);
    }

    pub fn pointer_leave(&mut self, doc: &SongDocument, surface: &mut dyn Surface) {
        if self.pointer == PointerPresence::Idle {
            return;
        }
        self.pointer = PointerPresence::Idle;
        self.update_preview(doc, surface);
    }

    /// `x`/`y` are relative to the grid's top-left corner and may lie
    /// outside it.
    pub fn pointer_move(&mut self, x: f64, y: f64, doc: &SongDocument, surface: &mut dyn Surface) {
        self.mouse_x = x;
        self.mouse_y = y;
        self.update_preview(doc, surface);
    }

    /// Clicking the selected cell cycles its pattern (upper half up, lower
    /// half down, wrapping through empty); clicking elsewhere selects.
    pub fn pointer_press(
        &mut self,
        x: f64,
        y: f64,
        doc: &mut SongDocument,
        surface: &mut dyn Surface,
    ) {
        self.mouse_x = x;
        self.mouse_y = y;
        let layout = self.layout(doc);
        let target = layout.coordinate_at(x, y);

        if target == doc.selection() {
            let up = layout.is_upper_half(y);
            let pattern_count = doc.song.pattern_count(target.channel);
            let current = doc.song.bar_pattern(target.channel, target.bar);
            let step = if up { 1 } else { pattern_count };
            self.edits
                .set_bar_pattern(doc, (current + step) % (pattern_count + 1));
        } else {
            self.set_channel_bar(target, doc);
        }
        if !self.sync(doc, surface) {
            self.update_preview(doc, surface);
        }
    }

    pub fn pointer_release(&mut self) {}

    // ─── Commands ────────────────────────────────────────────────────────

    fn set_channel_bar(&mut self, target: Selection, doc: &mut SongDocument) {
        tracing::debug!("select ch{} bar{}", target.channel, target.bar);
        doc.execute(&Command::SelectChannelBar {
            old: doc.selection(),
            new: target,
        });
        self.digits.clear();
        doc.history.forget_last_change();
    }

    // ─── Reconciliation ──────────────────────────────────────────────────

    /// Runs a reconciliation pass if the document changed since the last
    /// one. Returns whether it did.
    pub fn sync(&mut self, doc: &SongDocument, surface: &mut dyn Surface) -> bool {
        if !self.subscription.take_changed() {
            return false;
        }
        self.document_changed(doc, surface);
        true
    }

    pub fn document_changed(&mut self, doc: &SongDocument, surface: &mut dyn Surface) {
        let squashed = doc.song.bars() > SQUASH_THRESHOLD;
        let row_height = if squashed {
            SQUASHED_ROW_HEIGHT
        } else {
            ROW_HEIGHT
        };
        let editor_height = row_height * self.channel_count as f64;
        if self.editor_height != editor_height {
            self.editor_height = editor_height;
            self.row_height = row_height;
            surface.write(
                Element::Editor,
                Attr::Size {
                    width: EDITOR_WIDTH,
                    height: editor_height,
                },
            );
            surface.write(
                Element::Playhead,
                Attr::Size {
                    width: 1.0,
                    height: editor_height,
                },
            );
        }
        self.render(doc, surface);
    }

    fn render(&mut self, doc: &SongDocument, surface: &mut dyn Surface) {
        let squashed = doc.song.bars() > SQUASH_THRESHOLD;
        if self.rendered_squashed != squashed {
            tracing::debug!("grid squashed: {}", squashed);
            self.rendered_squashed = squashed;
            for row in &mut self.cells {
                for cell in row {
                    cell.set_geometry(squashed, surface);
                }
            }
        }

        let selection = doc.selection();
        let scroll = doc.bar_scroll_pos();
        for (channel, row) in self.cells.iter_mut().enumerate() {
            for (slot, cell) in row.iter_mut().enumerate() {
                let bar = slot + scroll;
                if bar >= doc.song.bars() {
                    cell.set_visible(false, surface);
                    continue;
                }
                let dim = doc
                    .song
                    .pattern(channel, bar)
                    .map_or(true, |pattern| pattern.is_silent());
                let selected = selection == Selection::new(channel, bar);
                cell.set_state(doc.song.bar_pattern(channel, bar), dim, selected, surface);
                cell.set_visible(true, surface);
            }
        }

        self.update_preview(doc, surface);
    }

    /// Places the hover outline on a hovered unselected cell, or the
    /// increment/decrement arrows on a hovered selected cell. Writes only
    /// when the overlay differs from what is on the surface.
    fn update_preview(&mut self, doc: &SongDocument, surface: &mut dyn Surface) {
        let overlay = self.overlay(doc);
        if self.rendered_overlay == Some(overlay) {
            return;
        }
        self.rendered_overlay = Some(overlay);

        match overlay {
            Overlay::Outline { x, y, height } => {
                surface.write(Element::BoxHighlight, Attr::Position { x, y });
                surface.write(
                    Element::BoxHighlight,
                    Attr::Size {
                        width: BAR_WIDTH - 1.0,
                        height,
                    },
                );
                surface.write(Element::BoxHighlight, Attr::Visible(true));
            }
            _ => surface.write(Element::BoxHighlight, Attr::Visible(false)),
        }

        match overlay {
            Overlay::Arrows { up, shape } => {
                let (up_fill, down_fill) = if up {
                    (theme::ARROW_ACTIVE, theme::ARROW_IDLE)
                } else {
                    (theme::ARROW_IDLE, theme::ARROW_ACTIVE)
                };
                surface.write(Element::UpArrow, Attr::Fill(up_fill));
                surface.write(Element::DownArrow, Attr::Fill(down_fill));
                surface.write(Element::UpArrow, Attr::Arrow(shape));
                surface.write(Element::DownArrow, Attr::Arrow(shape));
                surface.write(Element::UpArrow, Attr::Visible(true));
                surface.write(Element::DownArrow, Attr::Visible(true));
            }
            _ => {
                surface.write(Element::UpArrow, Attr::Visible(false));
                surface.write(Element::DownArrow, Attr::Visible(false));
            }
        }
    }

    fn overlay(&self, doc: &SongDocument) -> Overlay {
        if self.pointer == PointerPresence::Idle {
            return Overlay::Hidden;
        }
        let layout = self.layout(doc);
        let target = layout.coordinate_at(self.mouse_x, self.mouse_y);
        let column = target.bar as f64 - doc.bar_scroll_pos() as f64;
        if target != doc.selection() {
            return Overlay::Outline {
                x: BAR_WIDTH * column,
                y: self.row_height * target.channel as f64,
                height: self.row_height,
            };
        }
        Overlay::Arrows {
            up: layout.is_upper_half(self.mouse_y),
            shape: ArrowShape {
                center: BAR_WIDTH * (column + 0.8),
                middle: self.row_height * (target.channel as f64 + 0.5),
                base: self.row_height * 0.1,
                tip: self.row_height * 0.4,
                half_width: self.row_height * 0.175,
            },
        }
    }

    // ─── Playhead ────────────────────────────────────────────────────────

    /// One animation step; writes only when the rounded column moved.
    pub fn animate_playhead(&mut self, doc: &SongDocument, now: Instant, surface: &mut dyn Surface) {
        let offset = doc.playhead(now) - doc.bar_scroll_pos() as f64;
        let x = (BAR_WIDTH * offset).round() as i64;
        if self.rendered_playhead != Some(x) {
            self.rendered_playhead = Some(x);
            surface.write(Element::Playhead, Attr::Position { x: x as f64, y: 0.0 });
        }
    }
}
