//! Pixel ↔ (channel, bar) mapping. Every input is clamped into range;
//! pointer coordinates during fast drags can be anywhere.

use crate::song::Selection;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub row_height: f64,
    pub column_width: f64,
    pub bar_scroll_pos: usize,
    pub channel_count: usize,
    pub song_bars: usize,
}

impl GridLayout {
    pub fn channel_at(&self, y: f64) -> usize {
        let max = self.channel_count.saturating_sub(1) as f64;
        (y / self.row_height).clamp(0.0, max).floor() as usize
    }

    pub fn bar_at(&self, x: f64) -> usize {
        let max = self.song_bars.saturating_sub(1) as f64;
        (x / self.column_width + self.bar_scroll_pos as f64)
            .clamp(0.0, max)
            .floor() as usize
    }

    pub fn coordinate_at(&self, x: f64, y: f64) -> Selection {
        Selection {
            channel: self.channel_at(y),
            bar: self.bar_at(x),
        }
    }

    /// Whether `y` falls in the top half of its row (the increment half).
    pub fn is_upper_half(&self, y: f64) -> bool {
        y.rem_euclid(self.row_height) < self.row_height / 2.0
    }
}
