use super::SongDocument;

/// Identifies one coalescible edit. Issued in increasing order by the
/// document, so a token never repeats within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EditToken(pub(crate) u64);

/// A (channel, bar) coordinate in the song.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub channel: usize,
    pub bar: usize,
}

impl Selection {
    pub fn new(channel: usize, bar: usize) -> Self {
        Self { channel, bar }
    }
}

/// The two mutations the grid issues against the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    SelectChannelBar {
        old: Selection,
        new: Selection,
    },
    SetBarPattern {
        channel: usize,
        bar: usize,
        old_value: usize,
        new_value: usize,
        token: EditToken,
    },
}

impl Command {
    pub fn token(&self) -> Option<EditToken> {
        match self {
            Command::SetBarPattern { token, .. } => Some(*token),
            Command::SelectChannelBar { .. } => None,
        }
    }

    /// True for a pattern change that leaves the bar as it found it.
    pub fn is_no_op(&self) -> bool {
        match self {
            Command::SetBarPattern {
                old_value,
                new_value,
                ..
            } => old_value == new_value,
            Command::SelectChannelBar { old, new } => old == new,
        }
    }

    pub(crate) fn apply(&self, doc: &mut SongDocument) {
        match *self {
            Command::SelectChannelBar { new, .. } => doc.set_selection(new),
            Command::SetBarPattern {
                channel,
                bar,
                new_value,
                ..
            } => doc.song.set_bar_pattern(channel, bar, new_value),
        }
    }

    pub(crate) fn revert(&self, doc: &mut SongDocument) {
        match *self {
            Command::SelectChannelBar { old, .. } => doc.set_selection(old),
            Command::SetBarPattern {
                channel,
                bar,
                old_value,
                ..
            } => doc.song.set_bar_pattern(channel, bar, old_value),
        }
    }
}
