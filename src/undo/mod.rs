use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::models::AlignmentState;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Linear snapshot history with a cursor
///
/// Entries are owned clones of `AlignmentState`; nothing in the live session
/// aliases them. `cursor` designates the entry matching the live state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct History {
    entries: VecDeque<AlignmentState>,
    /// Index of the current entry; `None` while the history is empty
    cursor: Option<usize>,
    /// Maximum number of entries kept
    max_size: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Create an empty history keeping at most `max_size` entries
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: None,
            max_size: max_size.max(1),
        }
    }

    /// Snapshot `state` as the newest entry
    ///
    /// Entries after the cursor (undone states) are discarded first. The
    /// oldest entries are dropped beyond `max_size`.
    pub fn record(&mut self, state: &AlignmentState) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push_back(state.clone());

        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }

        self.cursor = Some(self.entries.len() - 1);
        log::debug!("history: recorded entry {} of {}", self.entries.len() - 1, self.entries.len());
    }

    /// Step back one entry, returning the state to restore
    pub fn undo(&mut self) -> Option<AlignmentState> {
        let cursor = self.cursor.filter(|&c| c > 0)?;
        self.cursor = Some(cursor - 1);
        self.entries.get(cursor - 1).cloned()
    }

    /// Step forward one entry, returning the state to restore
    pub fn redo(&mut self) -> Option<AlignmentState> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor + 1);
        self.entries.get(cursor + 1).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> impl Iterator<Item = &AlignmentState> {
        self.entries.iter()
    }
}
