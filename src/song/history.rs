//! Undo/redo stacks with support for merging a run of edits into one entry.

use super::{Command, EditToken};

/// Oldest entries are dropped past this depth.
const MAX_DEPTH: usize = 256;

#[derive(Debug, Default)]
pub struct History {
    undo: Vec<Command>,
    redo: Vec<Command>,
    /// Token of the most recent recorded change, cleared by
    /// `forget_last_change`, undo and redo.
    last_change: Option<EditToken>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an already-applied command. A continuation replaces the
    /// entry it continues instead of pushing a new one. A run that ends
    /// where it started leaves no entry, but stays open for further edits.
    pub fn record(&mut self, command: Command, continuation: bool) {
        let merges = continuation
            && self.last_change.is_some()
            && self.undo.last().and_then(Command::token) == self.last_change;
        if merges {
            self.undo.pop();
            tracing::debug!("history: merging into previous entry");
        }
        self.last_change = command.token();
        if continuation && command.is_no_op() {
            tracing::debug!("history: run returned to its start, dropping entry");
            return;
        }
        self.undo.push(command);
        if self.undo.len() > MAX_DEPTH {
            self.undo.remove(0);
        }
        self.redo.clear();
    }

    /// Ends the current run: the next edit starts a fresh entry.
    pub fn forget_last_change(&mut self) {
        self.last_change = None;
    }

    pub fn last_change_was(&self, token: Option<EditToken>) -> bool {
        token.is_some() && self.last_change == token
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn entries(&self) -> &[Command] {
        &self.undo
    }

    pub(crate) fn take_undo(&mut self) -> Option<Command> {
        let command = self.undo.pop()?;
        self.redo.push(command.clone());
        self.last_change = None;
        Some(command)
    }

    pub(crate) fn take_redo(&mut self) -> Option<Command> {
        let command = self.redo.pop()?;
        self.undo.push(command.clone());
        self.last_change = None;
        Some(command)
    }
}
