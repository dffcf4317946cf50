//! Turning rapid sequential edits into single history entries.

use crate::song::{Command, EditToken, SongDocument};

/// Pending decimal digits typed toward a pattern number.
#[derive(Debug, Default, Clone)]
pub struct DigitEntry {
    buffer: String,
}

impl DigitEntry {
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Appends a digit and returns the pattern number to commit, if any.
    ///
    /// When the accumulated number is not valid, the buffer restarts from
    /// the digit just typed; if that is not valid either, it is dropped.
    pub fn push(&mut self, digit: char, is_valid: impl Fn(usize) -> bool) -> Option<usize> {
        self.buffer.push(digit);
        if let Some(value) = parse_valid(&self.buffer, &is_valid) {
            return Some(value);
        }

        self.buffer.clear();
        self.buffer.push(digit);
        if let Some(value) = parse_valid(&self.buffer, &is_valid) {
            return Some(value);
        }

        self.buffer.clear();
        None
    }
}

fn parse_valid(text: &str, is_valid: &impl Fn(usize) -> bool) -> Option<usize> {
    text.parse::<usize>().ok().filter(|&v| is_valid(v))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LastEdit {
    token: EditToken,
    old_value: usize,
}

/// Merges consecutive pattern changes on the selected bar into one undo
/// step, as long as the history still has our last edit on top.
#[derive(Debug, Default)]
pub struct PatternEdits {
    last: Option<LastEdit>,
}

impl PatternEdits {
    /// Sets the selected bar's pattern. Returns whether a command was issued.
    pub fn set_bar_pattern(&mut self, doc: &mut SongDocument, pattern: usize) -> bool {
        let selection = doc.selection();
        let current = doc.selected_pattern();
        let continuation = doc.history.last_change_was(self.last.map(|l| l.token));
        let old_value = match self.last {
            Some(last) if continuation => last.old_value,
            _ => current,
        };
        if pattern == current {
            return false;
        }

        let token = doc.issue_token();
        tracing::debug!(
            "bar pattern ch{} bar{}: {} -> {} ({})",
            selection.channel,
            selection.bar,
            old_value,
            pattern,
            if continuation { "merged" } else { "new entry" }
        );
        doc.record(
            Command::SetBarPattern {
                channel: selection.channel,
                bar: selection.bar,
                old_value,
                new_value: pattern,
                token,
            },
            continuation,
        );
        self.last = Some(LastEdit { token, old_value });
        true
    }
}
