use std::time::Instant;

use super::{
    Command, EditToken, History, Notifier, Selection, Song, Subscription, Transport, VISIBLE_BARS,
};

/// The authoritative editing state shared by every view.
#[derive(Debug)]
pub struct SongDocument {
    pub song: Song,
    pub history: History,
    pub transport: Transport,
    selection: Selection,
    bar_scroll_pos: usize,
    notifier: Notifier,
    next_token: u64,
}

impl SongDocument {
    pub fn new(song: Song) -> Self {
        Self::with_transport(song, Transport::default())
    }

    pub fn with_transport(song: Song, transport: Transport) -> Self {
        Self {
            song,
            history: History::new(),
            transport,
            selection: Selection::default(),
            bar_scroll_pos: 0,
            notifier: Notifier::default(),
            next_token: 0,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn channel(&self) -> usize {
        self.selection.channel
    }

    pub fn bar(&self) -> usize {
        self.selection.bar
    }

    pub fn bar_scroll_pos(&self) -> usize {
        self.bar_scroll_pos
    }

    /// Largest scroll offset that still fills the visible window.
    pub fn max_bar_scroll_pos(&self) -> usize {
        self.song.bars().saturating_sub(VISIBLE_BARS)
    }

    pub fn set_bar_scroll_pos(&mut self, pos: usize) {
        let pos = pos.min(self.max_bar_scroll_pos());
        if pos != self.bar_scroll_pos {
            self.bar_scroll_pos = pos;
            self.notify();
        }
    }

    /// Pattern index under the selection.
    pub fn selected_pattern(&self) -> usize {
        self.song.bar_pattern(self.selection.channel, self.selection.bar)
    }

    pub fn subscribe(&mut self) -> Subscription {
        self.notifier.subscribe()
    }

    pub fn notify(&mut self) {
        self.notifier.notify();
    }

    pub fn issue_token(&mut self) -> EditToken {
        self.next_token += 1;
        EditToken(self.next_token)
    }

    /// Applies a command without recording it.
    pub fn execute(&mut self, command: &Command) {
        command.apply(self);
        self.notify();
    }

    /// Applies a command and records it in the history.
    pub fn record(&mut self, command: Command, continuation: bool) {
        self.execute(&command);
        self.history.record(command, continuation);
    }

    pub fn undo(&mut self) -> bool {
        let Some(command) = self.history.take_undo() else {
            return false;
        };
        tracing::debug!("undo {:?}", command);
        command.revert(self);
        self.focus_command(&command);
        self.notify();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(command) = self.history.take_redo() else {
            return false;
        };
        tracing::debug!("redo {:?}", command);
        command.apply(self);
        self.focus_command(&command);
        self.notify();
        true
    }

    /// Play position in bars.
    pub fn playhead(&self, now: Instant) -> f64 {
        self.transport.position(now, self.song.bars())
    }

    /// Moves the selection, scrolling just enough to keep the bar visible.
    pub(crate) fn set_selection(&mut self, selection: Selection) {
        let channel = selection
            .channel
            .min(self.song.channel_count().saturating_sub(1));
        let bar = selection.bar.min(self.song.bars().saturating_sub(1));
        self.selection = Selection { channel, bar };
        if bar < self.bar_scroll_pos {
            self.bar_scroll_pos = bar;
        } else if bar >= self.bar_scroll_pos + VISIBLE_BARS {
            self.bar_scroll_pos = bar + 1 - VISIBLE_BARS;
        }
    }

    fn focus_command(&mut self, command: &Command) {
        if let Command::SetBarPattern { channel, bar, .. } = *command {
            self.set_selection(Selection { channel, bar });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::NewSongOptions;

    fn doc(bars: usize) -> SongDocument {
        SongDocument::new(Song::new(NewSongOptions {
            channels: 4,
            bars,
            patterns: 4,
        }))
    }

    #[test]
    fn selecting_past_the_window_scrolls() {
        let mut doc = doc(40);
        doc.execute(&Command::SelectChannelBar {
            old: doc.selection(),
            new: Selection::new(2, 20),
        });
        assert_eq!(doc.selection(), Selection::new(2, 20));
        assert_eq!(doc.bar_scroll_pos(), 5);
        doc.execute(&Command::SelectChannelBar {
            old: doc.selection(),
            new: Selection::new(2, 3),
        });
        assert_eq!(doc.bar_scroll_pos(), 3);
    }

    #[test]
    fn scroll_is_clamped() {
        let mut doc = doc(20);
        doc.set_bar_scroll_pos(100);
        assert_eq!(doc.bar_scroll_pos(), 4);
    }

    #[test]
    fn execute_notifies_subscribers() {
        let mut doc = doc(8);
        let sub = doc.subscribe();
        doc.execute(&Command::SelectChannelBar {
            old: doc.selection(),
            new: Selection::new(1, 1),
        });
        assert!(sub.take_changed());
    }

    #[test]
    fn undo_and_redo_restore_values() {
        let mut doc = doc(8);
        let token = doc.issue_token();
        doc.record(
            Command::SetBarPattern {
                channel: 1,
                bar: 2,
                old_value: 0,
                new_value: 3,
                token,
            },
            false,
        );
        assert_eq!(doc.song.bar_pattern(1, 2), 3);
        assert!(doc.undo());
        assert_eq!(doc.song.bar_pattern(1, 2), 0);
        assert_eq!(doc.selection(), Selection::new(1, 2));
        assert!(doc.redo());
        assert_eq!(doc.song.bar_pattern(1, 2), 3);
        assert!(!doc.redo());
    }

    #[test]
    fn tokens_increase() {
        let mut doc = doc(8);
        let a = doc.issue_token();
        let b = doc.issue_token();
        assert!(b > a);
    }
}
