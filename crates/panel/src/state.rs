//! Panel state and reconciliation of the in-memory bookmark list.
//!
//! The data service is authoritative. The panel only ever changes its copy
//! through [`reduce`], one event per confirmed server response.

use ayah_core::bookmark::{Bookmark, BookmarkId};
use ayah_core::types::Timestamp;

use crate::editing::EditingStates;

/// Everything the panel renders from.
#[derive(Debug, Default)]
pub struct PanelState {
    pub bookmarks: Vec<Bookmark>,
    pub editing: EditingStates,
    /// Search box contents as typed.
    pub search_term: String,
    /// A list fetch is in flight.
    pub is_loading: bool,
    /// No signed-in user; nothing is fetched.
    pub login_required: bool,
    /// The most recent list fetch failed.
    pub load_failed: bool,
    /// Generation of the most recently issued list fetch.
    pub latest_generation: u64,
}

impl PanelState {
    pub fn has_search_term(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    pub fn find(&self, id: &BookmarkId) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| &b.id == id)
    }

    /// Make every list fetch issued so far stale, so its response is
    /// dropped when it lands.
    pub fn supersede_fetches(&mut self) {
        self.latest_generation += 1;
        self.is_loading = false;
    }

    /// Apply `event` to the list.
    pub fn apply(&mut self, event: ListEvent) {
        let list = std::mem::take(&mut self.bookmarks);
        self.bookmarks = reduce(list, event);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    /// A list response replaced the whole list.
    ListLoaded(Vec<Bookmark>),
    /// An edit was saved; patch notes, labels and timestamp in place.
    ItemSaved {
        id: BookmarkId,
        notes: String,
        labels: Vec<String>,
        updated_at: Timestamp,
    },
    /// A bookmark was deleted.
    ItemRemoved { bookmark_key: String },
}

pub fn reduce(mut list: Vec<Bookmark>, event: ListEvent) -> Vec<Bookmark> {
    match event {
        ListEvent::ListLoaded(loaded) => loaded,
        ListEvent::ItemSaved {
            id,
            notes,
            labels,
            updated_at,
        } => {
            if let Some(bookmark) = list.iter_mut().find(|b| b.id == id) {
                bookmark.notes = notes;
                bookmark.labels = labels;
                bookmark.updated_at = updated_at;
            }
            list
        }
        ListEvent::ItemRemoved { bookmark_key } => {
            list.retain(|b| b.bookmark_key != bookmark_key);
            list
        }
    }
}
