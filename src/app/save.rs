//! File saving: write the song to disk as JSON.

use super::*;

impl App {
    /// Writes the song to `file_path` and resets the modified flag.
    pub(super) fn save(&mut self) {
        match self.doc.song.save(&self.file_path) {
            Ok(()) => {
                self.saved_song = self.doc.song.clone();
                self.modified = false;
                self.set_status("Saved");
            }
            Err(e) => {
                tracing::warn!("save to {:?} failed: {}", self.file_path, e);
                self.set_status(&format!("Error saving: {}", e));
            }
        }
    }
}
