//! Property-based invariant tests for the grid core.
//!
//! 1. Coordinate mapping always lands inside the grid, for any pointer position.
//! 2. Channel mapping is monotone in y.
//! 3. Arrow navigation wraps: n steps in one direction return to the start.
//! 4. Re-applying a cell's current state costs no surface writes.
//! 5. An uninterrupted run of pattern edits is at most one undo entry.

use proptest::prelude::*;
use trackgrid::components::canvas::Canvas;
use trackgrid::grid::{navigate, Cell, Direction, GridLayout, PatternEdits};
use trackgrid::song::{Command, NewSongOptions, Selection, Song, SongDocument};

// ── Helpers ─────────────────────────────────────────────────────────────

fn layout_strategy() -> impl Strategy<Value = GridLayout> {
    (1usize..=8, 1usize..=64, 0usize..=48, prop::bool::ANY).prop_map(
        |(channels, bars, scroll, squashed)| GridLayout {
            row_height: if squashed { 2.0 } else { 3.0 },
            column_width: 4.0,
            bar_scroll_pos: scroll.min(bars.saturating_sub(16)),
            channel_count: channels,
            song_bars: bars,
        },
    )
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Coordinate mapping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn coordinate_is_always_in_range(
        layout in layout_strategy(),
        x in -1.0e6f64..1.0e6,
        y in -1.0e6f64..1.0e6,
    ) {
        let at = layout.coordinate_at(x, y);
        prop_assert!(at.channel < layout.channel_count, "{:?} -> {:?}", layout, at);
        prop_assert!(at.bar < layout.song_bars, "{:?} -> {:?}", layout, at);
    }

    #[test]
    fn channel_is_monotone_in_y(
        layout in layout_strategy(),
        a in -100.0f64..100.0,
        b in -100.0f64..100.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(layout.channel_at(lo) <= layout.channel_at(hi));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Navigation wraps
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn full_cycle_returns_to_start(
        channels in 1usize..=8,
        bars in 1usize..=64,
        start_channel in 0usize..8,
        start_bar in 0usize..64,
        direction in direction_strategy(),
    ) {
        let start = Selection::new(start_channel % channels, start_bar % bars);
        let steps = match direction {
            Direction::Up | Direction::Down => channels,
            Direction::Left | Direction::Right => bars,
        };
        let mut at = start;
        for _ in 0..steps {
            at = navigate(at, direction, channels, bars);
            prop_assert!(at.channel < channels && at.bar < bars);
        }
        prop_assert_eq!(at, start);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Write avoidance
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn repeating_state_writes_nothing(
        states in prop::collection::vec((0usize..=12, prop::bool::ANY, prop::bool::ANY), 1..20),
    ) {
        let mut canvas = Canvas::new();
        let mut cell = Cell::new(1, 3, &mut canvas);
        for (index, dim, selected) in states {
            cell.set_state(index, dim, selected, &mut canvas);
            let before = canvas.write_count();
            cell.set_state(index, dim, selected, &mut canvas);
            prop_assert_eq!(canvas.write_count(), before);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Coalescing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn uninterrupted_run_is_at_most_one_entry(values in prop::collection::vec(0usize..=8, 1..12)) {
        let mut doc = SongDocument::new(Song::new(NewSongOptions {
            channels: 2,
            bars: 4,
            patterns: 8,
        }));
        let mut edits = PatternEdits::default();
        for &value in &values {
            edits.set_bar_pattern(&mut doc, value);
        }

        let expected_depth = usize::from(doc.selected_pattern() != 0);
        prop_assert_eq!(doc.history.undo_depth(), expected_depth);
        if let Some(Command::SetBarPattern { old_value, new_value, .. }) =
            doc.history.entries().first()
        {
            prop_assert_eq!(*old_value, 0);
            prop_assert_eq!(*new_value, doc.selected_pattern());
        }

        doc.undo();
        prop_assert_eq!(doc.selected_pattern(), 0);
    }
}
