//! Song data model and the document that wraps it: selection, scroll offset,
//! undo history, change notification and the transport clock.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

mod command;
mod document;
mod history;
mod notifier;
mod transport;

pub use command::{Command, EditToken, Selection};
pub use document::SongDocument;
pub use history::History;
pub use notifier::{Notifier, Subscription};
pub use transport::Transport;

/// Number of bar slots visible at once.
pub const VISIBLE_BARS: usize = 16;

/// Errors raised while loading, saving or validating a song.
#[derive(Debug, thiserror::Error)]
pub enum SongError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed song file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid song: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub pitch: u8,
    pub start: u32,
    pub end: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Pattern {
    /// A pattern with no notes produces no sound.
    pub fn is_silent(&self) -> bool {
        self.notes.is_empty()
    }
}

/// One instrument track: its pattern pool and the pattern index assigned to
/// each bar (0 = no pattern).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub patterns: Vec<Pattern>,
    pub bars: Vec<usize>,
}

/// Dimensions for a freshly created song.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewSongOptions {
    pub channels: usize,
    pub bars: usize,
    pub patterns: usize,
}

impl Default for NewSongOptions {
    fn default() -> Self {
        Self {
            channels: 4,
            bars: 16,
            patterns: 8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    bars: usize,
    channels: Vec<Channel>,
}

impl Song {
    /// Builds an empty song: every bar unassigned, every pattern silent.
    pub fn new(options: NewSongOptions) -> Self {
        let channels = (0..options.channels.max(1))
            .map(|_| Channel {
                patterns: vec![Pattern::default(); options.patterns],
                bars: vec![0; options.bars.max(1)],
            })
            .collect();
        Self {
            bars: options.bars.max(1),
            channels,
        }
    }

    pub fn from_json(text: &str) -> Result<Self, SongError> {
        let song: Song = serde_json::from_str(text)?;
        song.validate()?;
        Ok(song)
    }

    pub fn to_json(&self) -> Result<String, SongError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, SongError> {
        let text = std::fs::read_to_string(path)?;
        let song = Self::from_json(&text)?;
        tracing::info!(
            "Loaded {:?}: {} channels, {} bars",
            path,
            song.channel_count(),
            song.bars()
        );
        Ok(song)
    }

    pub fn save(&self, path: &Path) -> Result<(), SongError> {
        std::fs::write(path, self.to_json()?)?;
        tracing::info!("Saved {:?}", path);
        Ok(())
    }

    /// Checks the structural invariants a loaded file must satisfy.
    pub fn validate(&self) -> Result<(), SongError> {
        if self.bars == 0 {
            return Err(SongError::Invalid("song has no bars".into()));
        }
        if self.channels.is_empty() {
            return Err(SongError::Invalid("song has no channels".into()));
        }
        for (index, channel) in self.channels.iter().enumerate() {
            if channel.bars.len() != self.bars {
                return Err(SongError::Invalid(format!(
                    "channel {} has {} bars, expected {}",
                    index,
                    channel.bars.len(),
                    self.bars
                )));
            }
            if let Some(bad) = channel.bars.iter().find(|&&p| p > channel.patterns.len()) {
                return Err(SongError::Invalid(format!(
                    "channel {} references pattern {} but has only {}",
                    index,
                    bad,
                    channel.patterns.len()
                )));
            }
        }
        Ok(())
    }

    pub fn bars(&self) -> usize {
        self.bars
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channel(&self, channel: usize) -> Option<&Channel> {
        self.channels.get(channel)
    }

    pub fn channel_mut(&mut self, channel: usize) -> Option<&mut Channel> {
        self.channels.get_mut(channel)
    }

    pub fn pattern_count(&self, channel: usize) -> usize {
        self.channels.get(channel).map_or(0, |c| c.patterns.len())
    }

    /// Pattern index assigned to a bar, 0 when empty or out of range.
    pub fn bar_pattern(&self, channel: usize, bar: usize) -> usize {
        self.channels
            .get(channel)
            .and_then(|c| c.bars.get(bar))
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn set_bar_pattern(&mut self, channel: usize, bar: usize, pattern: usize) {
        if let Some(slot) = self
            .channels
            .get_mut(channel)
            .and_then(|c| c.bars.get_mut(bar))
        {
            *slot = pattern;
        }
    }

    /// The pattern referenced by a bar; `None` for index 0.
    pub fn pattern(&self, channel: usize, bar: usize) -> Option<&Pattern> {
        let index = self.bar_pattern(channel, bar);
        if index == 0 {
            return None;
        }
        self.channels.get(channel)?.patterns.get(index - 1)
    }
}
