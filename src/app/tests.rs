//! Unit tests for the App module: loading, tick timers, global keys, mouse
//! translation and modification tracking.

use super::*;
use crate::song::Selection;
use tempfile::TempDir;

// ─── Helpers ─────────────────────────────────────────────────────

fn options(bars: usize) -> NewSongOptions {
    NewSongOptions {
        channels: 4,
        bars,
        patterns: 8,
    }
}

/// Creates an App for a not-yet-existing file inside a TempDir.
fn new_app(bars: usize) -> (App, TempDir) {
    let dir = TempDir::new().unwrap();
    let app = App::new(dir.path().join("song.json"), options(bars), 1.0).unwrap();
    (app, dir)
}

fn key_event(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl_key(ch: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn setup_grid_area(app: &mut App) {
    app.grid_area = Rect::new(10, 3, 64, 12);
}

// ─── Loading ──────────────────────────────────────────────────────

#[test]
fn missing_file_starts_new_song() {
    let (app, _dir) = new_app(12);
    assert_eq!(app.doc.song.bars(), 12);
    assert_eq!(app.doc.song.channel_count(), 4);
    assert!(!app.modified);
    assert!(app.status_message.contains("New song"));
}

#[test]
fn existing_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("song.json");
    Song::new(options(20)).save(&path).unwrap();
    let app = App::new(path, options(4), 1.0).unwrap();
    assert_eq!(app.doc.song.bars(), 20);
    assert!(app.grid.is_squashed());
}

#[test]
fn malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("song.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        App::new(path, options(4), 1.0),
        Err(SongError::Parse(_))
    ));
}

// ─── Tick Tests ───────────────────────────────────────────────────

#[test]
fn tick_clears_expired_status() {
    let (mut app, _dir) = new_app(8);
    app.set_status("hello");
    app.tick_at(Instant::now() + Duration::from_secs(4));
    assert!(app.status_message.is_empty());
    assert!(app.status_time.is_none());
}

#[test]
fn tick_keeps_fresh_status() {
    let (mut app, _dir) = new_app(8);
    app.set_status("hello");
    app.tick_at(Instant::now());
    assert_eq!(app.status_message, "hello");
}

#[test]
fn tick_moves_playhead_while_playing() {
    let (mut app, _dir) = new_app(8);
    let start = Instant::now();
    app.doc.transport.play(start);
    app.tick_at(start + Duration::from_secs(2));
    let playhead = app
        .canvas
        .element(crate::grid::Element::Playhead)
        .unwrap();
    // 1 bar per second, 4 cells per bar.
    assert_eq!(playhead.x, 8.0);
}

// ─── Global Keys ──────────────────────────────────────────────────

#[test]
fn space_toggles_transport() {
    let (mut app, _dir) = new_app(8);
    app.handle_event(key_event(KeyCode::Char(' ')));
    assert!(app.doc.transport.is_playing());
    assert_eq!(app.status_message, "Playing");
    app.handle_event(key_event(KeyCode::Char(' ')));
    assert!(!app.doc.transport.is_playing());
}

#[test]
fn help_swallows_next_key() {
    let (mut app, _dir) = new_app(8);
    app.handle_event(key_event(KeyCode::F(1)));
    assert!(app.show_help);
    app.handle_event(key_event(KeyCode::Down));
    assert!(!app.show_help);
    assert_eq!(app.doc.selection(), Selection::new(0, 0));
}

#[test]
fn page_down_scrolls_by_visible_window() {
    let (mut app, _dir) = new_app(40);
    app.handle_event(key_event(KeyCode::PageDown));
    assert_eq!(app.doc.bar_scroll_pos(), 16);
    app.handle_event(key_event(KeyCode::PageDown));
    assert_eq!(app.doc.bar_scroll_pos(), app.doc.max_bar_scroll_pos());
    app.handle_event(key_event(KeyCode::PageUp));
    app.handle_event(key_event(KeyCode::PageUp));
    assert_eq!(app.doc.bar_scroll_pos(), 0);
}

#[test]
fn scrolling_relabels_cells() {
    let (mut app, _dir) = new_app(40);
    app.doc.song.channel_mut(0).unwrap().bars[16] = 5;
    app.handle_event(key_event(KeyCode::PageDown));
    let label = &app
        .canvas
        .element(crate::grid::Element::Cell { channel: 0, slot: 0 })
        .unwrap()
        .label;
    assert_eq!(label, "5");
}

#[test]
fn ctrl_digit_does_not_reach_grid() {
    let (mut app, _dir) = new_app(8);
    app.handle_event(Event::Key(KeyEvent::new(
        KeyCode::Char('3'),
        KeyModifiers::CONTROL,
    )));
    assert_eq!(app.doc.selected_pattern(), 0);
}

#[test]
fn keys_outside_the_grid_end_digit_entry() {
    let dir = TempDir::new().unwrap();
    let song_options = NewSongOptions {
        channels: 4,
        bars: 40,
        patterns: 20,
    };
    let mut app = App::new(dir.path().join("song.json"), song_options, 1.0).unwrap();
    let alt_x = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));

    for other in [key_event(KeyCode::PageDown), ctrl_key('s'), alt_x] {
        app.handle_event(key_event(KeyCode::Char('1')));
        assert_eq!(app.grid.digit_buffer(), "1");
        app.handle_event(other);
        assert_eq!(app.grid.digit_buffer(), "");
    }

    // The key that closes help is swallowed but still ends entry.
    app.handle_event(key_event(KeyCode::Char('1')));
    app.handle_event(key_event(KeyCode::F(1)));
    app.handle_event(key_event(KeyCode::Char('7')));
    assert!(!app.show_help);
    assert_eq!(app.grid.digit_buffer(), "");
    app.handle_event(key_event(KeyCode::Char('2')));
    assert_eq!(app.doc.selected_pattern(), 2);
}

// ─── Modification Tracking ────────────────────────────────────────

#[test]
fn edit_marks_modified_and_undo_clears_it() {
    let (mut app, _dir) = new_app(8);
    app.handle_event(key_event(KeyCode::Char('4')));
    assert!(app.modified);
    app.handle_event(ctrl_key('z'));
    assert!(!app.modified);
    assert_eq!(app.doc.selected_pattern(), 0);
    app.handle_event(ctrl_key('y'));
    assert_eq!(app.doc.selected_pattern(), 4);
}

#[test]
fn undo_with_empty_history_reports_it() {
    let (mut app, _dir) = new_app(8);
    app.handle_event(ctrl_key('z'));
    assert_eq!(app.status_message, "Nothing to undo");
}

#[test]
fn save_writes_file_and_clears_modified() {
    let (mut app, dir) = new_app(8);
    app.handle_event(key_event(KeyCode::Char('2')));
    app.handle_event(ctrl_key('s'));
    assert!(!app.modified);
    assert_eq!(app.status_message, "Saved");
    let saved = Song::load(&dir.path().join("song.json")).unwrap();
    assert_eq!(saved.bar_pattern(0, 0), 2);
}

#[test]
fn save_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing-dir").join("song.json");
    let mut app = App::new(path, options(8), 1.0).unwrap();
    app.handle_event(ctrl_key('s'));
    assert!(app.status_message.starts_with("Error saving"));
}

// ─── Mouse Tests ──────────────────────────────────────────────────

#[test]
fn moving_into_grid_hovers_and_out_leaves() {
    let (mut app, _dir) = new_app(8);
    setup_grid_area(&mut app);
    app.handle_event(mouse(MouseEventKind::Moved, 20, 5));
    assert!(app.is_hovering());
    app.handle_event(mouse(MouseEventKind::Moved, 5, 5));
    assert!(!app.is_hovering());
}

#[test]
fn click_selects_cell_under_pointer() {
    let (mut app, _dir) = new_app(8);
    setup_grid_area(&mut app);
    // Grid-local (9, 7): bar 2, channel 2.
    app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 19, 10));
    app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 19, 10));
    assert_eq!(app.doc.selection(), Selection::new(2, 2));
}

#[test]
fn click_outside_grid_is_ignored() {
    let (mut app, _dir) = new_app(8);
    setup_grid_area(&mut app);
    app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 80, 10));
    assert_eq!(app.doc.selection(), Selection::new(0, 0));
    assert!(!app.modified);
}

#[test]
fn clicking_selected_cell_cycles_pattern() {
    let (mut app, _dir) = new_app(8);
    setup_grid_area(&mut app);
    // Upper half of cell (0, 0).
    app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 11, 3));
    app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 11, 3));
    assert_eq!(app.doc.selected_pattern(), 2);
    assert_eq!(app.doc.history.undo_depth(), 1);
    // Lower half steps back down.
    app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 11, 5));
    assert_eq!(app.doc.selected_pattern(), 1);
}
