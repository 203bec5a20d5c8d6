// File: ./src/history.rs
// Recently displayed palettes, newest first
use crate::color_utils::Rgb;
use crate::model::Palette;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const HISTORY_LIMIT: usize = 5;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub colors: Palette,
    pub saved_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remembers a palette that is about to be replaced. Empty palettes are ignored.
    pub fn push(&mut self, palette: &[Rgb]) {
        if palette.is_empty() {
            return;
        }
        self.entries.insert(
            0,
            HistoryEntry {
                colors: palette.to_vec(),
                saved_at: Utc::now(),
            },
        );
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// Takes entry `index` out of the history and stores `current` in its
    /// place at the front. Returns the selected palette.
    pub fn select(&mut self, index: usize, current: &[Rgb]) -> Option<Palette> {
        let selected = self.entries.get(index)?.colors.clone();
        self.entries.retain(|e| e.colors != selected);
        self.push(current);
        Some(selected)
    }
}
