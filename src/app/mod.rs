use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::components::{canvas::Canvas, header, status};
use crate::grid::{GridController, PointerPresence};
use crate::song::{NewSongOptions, Song, SongDocument, SongError, Transport, VISIBLE_BARS};
use crate::theme;

/// How long status bar messages stay visible before auto-clearing.
const STATUS_DURATION: Duration = Duration::from_secs(3);

/// Maximum width for the UI content area. Wider terminals get centered, capped layout.
const MAX_WIDTH: u16 = 100;

pub struct App {
    // --- Core state ---
    pub file_path: PathBuf,
    pub doc: SongDocument,
    pub grid: GridController,
    pub canvas: Canvas,
    /// Song as last loaded or saved; used for modification detection.
    saved_song: Song,
    pub modified: bool,
    pub should_quit: bool,

    // --- Status bar ---
    pub status_message: String,
    pub status_time: Option<Instant>,

    // --- Help modal (F1) ---
    pub show_help: bool,

    // --- Internal tracking ---
    /// Grid rect from the last render (used for mouse hit-testing).
    grid_area: Rect,
}

impl App {
    /// Opens `file_path`, or starts a new song shaped by `options` when the
    /// file does not exist yet.
    pub fn new(
        file_path: PathBuf,
        options: NewSongOptions,
        bars_per_second: f64,
    ) -> Result<Self, SongError> {
        let (song, greeting) = if file_path.exists() {
            (Song::load(&file_path)?, "F1: help | Space: play | Ctrl+S: save | Ctrl+Q: quit")
        } else {
            tracing::info!("{:?} not found, starting a new song", file_path);
            (Song::new(options), "New song | F1: help | Ctrl+S: save")
        };

        let saved_song = song.clone();
        let mut doc = SongDocument::with_transport(song, Transport::new(bars_per_second));
        let mut canvas = Canvas::new();
        let grid = GridController::new(&mut doc, &mut canvas);

        Ok(Self {
            file_path,
            doc,
            grid,
            canvas,
            saved_song,
            modified: false,
            should_quit: false,
            status_message: greeting.to_string(),
            status_time: Some(Instant::now()),
            show_help: false,
            grid_area: Rect::default(),
        })
    }

    // ─── Tick / timers ───────────────────────────────────────────────────

    /// Called every main-loop pass. Advances the playhead and expires status
    /// messages.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        self.grid.animate_playhead(&self.doc, now, &mut self.canvas);

        if let Some(time) = self.status_time {
            if now.saturating_duration_since(time) >= STATUS_DURATION {
                self.status_message.clear();
                self.status_time = None;
            }
        }
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    /// Top-level event handler. Dispatches to key or mouse handlers, then
    /// lets the grid catch up with whatever the event changed.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(_, _) => {} // ratatui handles resize
            _ => {}
        }
        self.grid.sync(&self.doc, &mut self.canvas);
        self.update_modified();
    }

    fn update_modified(&mut self) {
        self.modified = self.doc.song != self.saved_song;
    }

    /// Shows a temporary message in the status bar.
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = msg.to_string();
        self.status_time = Some(Instant::now());
    }

    pub fn is_hovering(&self) -> bool {
        self.grid.pointer() == PointerPresence::Hover
    }

    /// Where the grid was last drawn.
    pub fn grid_area(&self) -> Rect {
        self.grid_area
    }
}

mod input;
mod render;
mod save;

#[cfg(test)]
mod tests;
