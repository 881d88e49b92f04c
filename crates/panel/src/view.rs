//! Render model for the bookmark panel.

use ayah_core::bookmark::{Bookmark, BookmarkId, Verse};
use ayah_core::types::Timestamp;

use crate::config::Locale;
use crate::state::PanelState;
use crate::time::{format_exact, format_relative};

/// What the panel shows. Exactly one state applies at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    /// First load in flight, nothing to show yet.
    Loading,
    LoginRequired,
    LoadFailed,
    /// A search is active and matched nothing.
    NoResults,
    /// The user has no bookmarks at all.
    NoBookmarks,
    Items(Vec<BookmarkCard>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkCard {
    pub id: BookmarkId,
    pub bookmark_key: String,
    pub verse: Option<VerseCard>,
    pub notes: String,
    pub labels: Vec<String>,
    /// `DD.MM.YYYY HH:mm:ss`, for the timestamp tooltip.
    pub updated_title: String,
    pub updated_relative: String,
    /// Present while the bookmark is in edit mode.
    pub editor: Option<EditorView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerseCard {
    pub surah_id: i32,
    pub surah_name: String,
    pub verse_number: i32,
    pub arabic: String,
    pub transcription: Option<String>,
    /// First translation by the configured author.
    pub translation: Option<String>,
    pub verse_link: String,
    pub page_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorView {
    pub notes: String,
    pub labels_text: String,
}

/// Path of the verse's own page.
pub fn verse_path(verse: &Verse) -> String {
    format!("/{}/{}", verse.surah.id, verse.verse_number)
}

/// Path of the mushaf page holding the verse, anchored at the verse.
pub fn page_path(verse: &Verse) -> Option<String> {
    verse
        .page
        .map(|page| format!("/page/{page}#{}:{}", verse.surah.id, verse.verse_number))
}

/// Build the view for `state`.
///
/// Precedence: login required, then loading, then load failure, then the
/// list itself, then the two empty states (no results while a search term is
/// set, otherwise no bookmarks). A refresh of a non-empty list keeps showing
/// the current items.
pub fn render(state: &PanelState, locale: Locale, now: Timestamp) -> PanelView {
    if state.login_required {
        return PanelView::LoginRequired;
    }
    if state.is_loading && state.bookmarks.is_empty() {
        return PanelView::Loading;
    }
    if state.load_failed {
        return PanelView::LoadFailed;
    }
    if state.bookmarks.is_empty() {
        return if state.has_search_term() {
            PanelView::NoResults
        } else {
            PanelView::NoBookmarks
        };
    }

    PanelView::Items(
        state
            .bookmarks
            .iter()
            .map(|bookmark| card(state, bookmark, locale, now))
            .collect(),
    )
}

fn card(state: &PanelState, bookmark: &Bookmark, locale: Locale, now: Timestamp) -> BookmarkCard {
    BookmarkCard {
        id: bookmark.id.clone(),
        bookmark_key: bookmark.bookmark_key.clone(),
        verse: bookmark.verse.as_ref().map(|verse| verse_card(verse, locale)),
        notes: bookmark.notes.clone(),
        labels: bookmark.labels.clone(),
        updated_title: format_exact(bookmark.updated_at),
        updated_relative: format_relative(bookmark.updated_at, now, locale),
        editor: state.editing.draft(&bookmark.id).map(|draft| EditorView {
            notes: draft.notes.clone(),
            labels_text: draft.labels_text.clone(),
        }),
    }
}

fn verse_card(verse: &Verse, locale: Locale) -> VerseCard {
    let surah_name = match locale {
        Locale::Tr => &verse.surah.name,
        Locale::En if verse.surah.name_en.is_empty() => &verse.surah.name,
        Locale::En => &verse.surah.name_en,
    };

    VerseCard {
        surah_id: verse.surah.id,
        surah_name: surah_name.clone(),
        verse_number: verse.verse_number,
        arabic: verse.verse.clone(),
        transcription: verse.transcription.clone(),
        translation: verse.translations.first().map(|t| t.text.clone()),
        verse_link: verse_path(verse),
        page_link: page_path(verse),
    }
}
