//! Arrow-key selection movement with wraparound.

use crossterm::event::KeyCode;

use crate::song::Selection;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Up/down cycle through channels, left/right through bars.
pub fn navigate(from: Selection, direction: Direction, channels: usize, bars: usize) -> Selection {
    let channels = channels.max(1);
    let bars = bars.max(1);
    match direction {
        Direction::Up => Selection::new((from.channel + channels - 1) % channels, from.bar),
        Direction::Down => Selection::new((from.channel + 1) % channels, from.bar),
        Direction::Left => Selection::new(from.channel, (from.bar + bars - 1) % bars),
        Direction::Right => Selection::new(from.channel, (from.bar + 1) % bars),
    }
}
