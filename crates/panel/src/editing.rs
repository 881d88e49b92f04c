//! Per-bookmark edit drafts.
//!
//! A draft exists exactly while its bookmark is in edit mode. Drafts are
//! never persisted; saving or cancelling discards them.

use std::collections::HashMap;

use ayah_core::bookmark::{Bookmark, BookmarkId};
use ayah_core::labels::{format_labels, parse_labels};

/// Unsaved notes and labels for one bookmark.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Draft {
    pub notes: String,
    /// Labels parsed from `labels_text`.
    pub labels: Vec<String>,
    /// Editor text as typed, so a trailing comma survives until the next label.
    pub labels_text: String,
}

#[derive(Debug, Default)]
pub struct EditingStates {
    drafts: HashMap<BookmarkId, Draft>,
}

impl EditingStates {
    /// Enter edit mode, seeding the draft from the bookmark's current values.
    pub fn begin(&mut self, bookmark: &Bookmark) {
        self.drafts.insert(
            bookmark.id.clone(),
            Draft {
                notes: bookmark.notes.clone(),
                labels: bookmark.labels.clone(),
                labels_text: format_labels(&bookmark.labels),
            },
        );
    }

    /// Returns `false` if `id` is not being edited.
    pub fn set_notes(&mut self, id: &BookmarkId, notes: String) -> bool {
        match self.drafts.get_mut(id) {
            Some(draft) => {
                draft.notes = notes;
                true
            }
            None => false,
        }
    }

    /// Returns `false` if `id` is not being edited.
    pub fn set_labels_text(&mut self, id: &BookmarkId, text: &str) -> bool {
        match self.drafts.get_mut(id) {
            Some(draft) => {
                draft.labels = parse_labels(text);
                draft.labels_text = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Leave edit mode, discarding the draft.
    pub fn cancel(&mut self, id: &BookmarkId) -> Option<Draft> {
        self.drafts.remove(id)
    }

    pub fn draft(&self, id: &BookmarkId) -> Option<&Draft> {
        self.drafts.get(id)
    }

    pub fn is_editing(&self, id: &BookmarkId) -> bool {
        self.drafts.contains_key(id)
    }

    pub fn clear(&mut self) {
        self.drafts.clear();
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}
