//! The bookmark panel controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use ayah_core::bookmark::{Bookmark, BookmarkId, BookmarkMutation, Verse};
use ayah_core::types::Timestamp;
use chrono::{DateTime, Utc};

use crate::api::BookmarkApi;
use crate::capabilities::{AuthProvider, Notifier, Router, Translator};
use crate::config::PanelConfig;
use crate::debounce::Debouncer;
use crate::editing::Draft;
use crate::error::PanelError;
use crate::state::{ListEvent, PanelState};
use crate::view::{self, PanelView};

/// Collaborators the panel talks to.
#[derive(Clone)]
pub struct PanelDeps {
    pub api: Arc<dyn BookmarkApi>,
    pub auth: Arc<dyn AuthProvider>,
    pub router: Arc<dyn Router>,
    pub translator: Arc<dyn Translator>,
    pub notifier: Arc<dyn Notifier>,
}

/// Bookmark list with search, inline editing and removal.
///
/// Cheap to clone; clones share state. List fetches are tagged with a
/// generation number and a response is applied only if no newer fetch was
/// issued and no save or removal succeeded after it, so completion order
/// never matters.
#[derive(Clone)]
pub struct BookmarkPanel {
    inner: Arc<Inner>,
}

struct Inner {
    config: PanelConfig,
    deps: PanelDeps,
    state: Mutex<PanelState>,
    search: Debouncer,
}

/// Outcome of preparing a save while the state lock is held.
enum SavePlan {
    Skip,
    MissingVerseId,
    Send(BookmarkMutation, Draft),
}

impl BookmarkPanel {
    pub fn new(config: PanelConfig, deps: PanelDeps) -> Self {
        let search = Debouncer::new(config.search_debounce);
        Self {
            inner: Arc::new(Inner {
                config,
                deps,
                state: Mutex::new(PanelState::default()),
                search,
            }),
        }
    }

    // -- List loading ---------------------------------------------------------

    /// Initial load when the panel opens.
    pub async fn mount(&self) {
        self.session_changed().await;
    }

    /// Re-evaluate the session: fetch when a user is signed in, otherwise
    /// clear the list and show the login prompt.
    pub async fn session_changed(&self) {
        self.fetch().await;
    }

    /// Fetch the list for the current search term right away.
    pub async fn refresh(&self) {
        self.fetch().await;
    }

    /// Record the search box contents and schedule a fetch once typing
    /// has been quiet for the configured debounce delay.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn set_search_term(&self, term: impl Into<String>) {
        self.state().search_term = term.into();

        let panel: Weak<Inner> = Arc::downgrade(&self.inner);
        self.inner.search.schedule(async move {
            if let Some(inner) = panel.upgrade() {
                BookmarkPanel { inner }.fetch().await;
            }
        });
    }

    /// Cancel any pending search and ignore responses still in flight.
    pub fn teardown(&self) {
        self.inner.search.cancel();
        self.state().supersede_fetches();
    }

    fn sign_out(&self) {
        let mut state = self.state();
        state.supersede_fetches();
        state.apply(ListEvent::ListLoaded(Vec::new()));
        state.editing.clear();
        state.login_required = true;
        state.load_failed = false;
    }

    async fn fetch(&self) {
        if self.inner.deps.auth.current_user().is_none() {
            self.sign_out();
            return;
        }

        let (generation, search_term) = {
            let mut state = self.state();
            state.latest_generation += 1;
            state.is_loading = true;
            state.login_required = false;
            (state.latest_generation, state.search_term.clone())
        };

        tracing::debug!(generation, search_term = %search_term, "Fetching bookmarks");
        let result = self
            .inner
            .deps
            .api
            .list(self.inner.config.author_id, &search_term)
            .await;

        let mut state = self.state();
        if generation != state.latest_generation {
            tracing::debug!(
                generation,
                latest = state.latest_generation,
                "Discarding stale bookmark list"
            );
            return;
        }

        state.is_loading = false;
        match result {
            Ok(bookmarks) => {
                state.load_failed = false;
                state.apply(ListEvent::ListLoaded(bookmarks));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load bookmarks");
                state.load_failed = true;
            }
        }
    }

    // -- Editing --------------------------------------------------------------

    /// Enter edit mode. Returns `false` if `id` is not in the list.
    pub fn edit(&self, id: &BookmarkId) -> bool {
        let mut state = self.state();
        let Some(bookmark) = state.find(id).cloned() else {
            return false;
        };
        state.editing.begin(&bookmark);
        true
    }

    pub fn change_notes(&self, id: &BookmarkId, notes: impl Into<String>) -> bool {
        self.state().editing.set_notes(id, notes.into())
    }

    /// Update the labels editor text (comma-separated).
    pub fn change_labels(&self, id: &BookmarkId, text: &str) -> bool {
        self.state().editing.set_labels_text(id, text)
    }

    /// Leave edit mode without saving.
    pub fn cancel_edit(&self, id: &BookmarkId) {
        self.state().editing.cancel(id);
    }

    /// Save the draft for `id`.
    ///
    /// Does nothing when `id` is not being edited. On failure the draft is
    /// kept so the user can retry.
    pub async fn save(&self, id: &BookmarkId) -> Result<(), PanelError> {
        if self.inner.deps.auth.current_user().is_none() {
            return Err(PanelError::NotSignedIn);
        }

        let plan = prepare_save(&self.state(), id);

        let (mutation, draft) = match plan {
            SavePlan::Skip => return Ok(()),
            SavePlan::MissingVerseId => {
                self.notify_error(
                    "bookmark__error_missing_verse_id",
                    "Missing verse information to save.",
                );
                return Err(PanelError::MissingVerseId);
            }
            SavePlan::Send(mutation, draft) => (mutation, draft),
        };

        match self.inner.deps.api.mutate(&mutation).await {
            Ok(response) => {
                let updated_at = saved_at(&response).unwrap_or_else(Utc::now);
                {
                    let mut state = self.state();
                    state.supersede_fetches();
                    state.apply(ListEvent::ItemSaved {
                        id: id.clone(),
                        notes: draft.notes,
                        labels: draft.labels,
                        updated_at,
                    });
                    state.editing.cancel(id);
                }
                tracing::info!(bookmark_key = %mutation.bookmark_key, "Bookmark saved");
                self.notify_success("bookmark__save_success", "Bookmark saved!");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, bookmark_key = %mutation.bookmark_key, "Failed to save bookmark");
                let message = match e.server_message() {
                    Some(message) => message.to_string(),
                    None => self.text(
                        "bookmark__save_error_detailed",
                        "Failed to save. Please try again.",
                    ),
                };
                self.inner.deps.notifier.error(&message);
                Err(e)
            }
        }
    }

    /// Delete the bookmark with `bookmark_key`. The list is left untouched
    /// if the request fails.
    pub async fn remove(&self, bookmark_key: &str) -> Result<(), PanelError> {
        if self.inner.deps.auth.current_user().is_none() {
            return Err(PanelError::NotSignedIn);
        }

        let mutation = BookmarkMutation::remove(bookmark_key);
        match self.inner.deps.api.mutate(&mutation).await {
            Ok(_) => {
                {
                    let mut state = self.state();
                    state.supersede_fetches();
                    let removed: Vec<BookmarkId> = state
                        .bookmarks
                        .iter()
                        .filter(|b| b.bookmark_key == bookmark_key)
                        .map(|b| b.id.clone())
                        .collect();
                    for id in &removed {
                        state.editing.cancel(id);
                    }
                    state.apply(ListEvent::ItemRemoved {
                        bookmark_key: bookmark_key.to_string(),
                    });
                }
                tracing::info!(bookmark_key, "Bookmark removed");
                self.notify_success("bookmark__remove_success", "Bookmark removed!");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, bookmark_key, "Failed to remove bookmark");
                self.notify_error("bookmark__remove_error", "Error removing bookmark!");
                Err(e)
            }
        }
    }

    // -- Navigation -----------------------------------------------------------

    /// Open the bookmarked verse and close the panel.
    pub fn go_to_verse(&self, id: &BookmarkId) -> bool {
        let path = self.with_verse(id, |verse| Some(view::verse_path(verse)));
        self.navigate(path)
    }

    /// Open the mushaf page holding the bookmarked verse and close the panel.
    pub fn go_to_page(&self, id: &BookmarkId) -> bool {
        let path = self.with_verse(id, view::page_path);
        self.navigate(path)
    }

    pub fn request_login(&self) {
        self.inner.deps.router.open_login();
    }

    fn with_verse(
        &self,
        id: &BookmarkId,
        f: impl FnOnce(&Verse) -> Option<String>,
    ) -> Option<String> {
        let state = self.state();
        let verse = state.find(id).and_then(|b| b.verse.as_ref())?;
        f(verse)
    }

    fn navigate(&self, path: Option<String>) -> bool {
        match path {
            Some(path) => {
                self.inner.deps.router.push(&path);
                self.inner.deps.router.close_panel();
                true
            }
            None => false,
        }
    }

    // -- Rendering and accessors ----------------------------------------------

    pub fn view(&self) -> PanelView {
        self.view_at(Utc::now())
    }

    /// Render with an explicit clock.
    pub fn view_at(&self, now: Timestamp) -> PanelView {
        view::render(&self.state(), self.inner.config.locale, now)
    }

    pub fn bookmarks(&self) -> Vec<Bookmark> {
        self.state().bookmarks.clone()
    }

    pub fn search_term(&self) -> String {
        self.state().search_term.clone()
    }

    pub fn draft(&self, id: &BookmarkId) -> Option<Draft> {
        self.state().editing.draft(id).cloned()
    }

    pub fn is_editing(&self, id: &BookmarkId) -> bool {
        self.state().editing.is_editing(id)
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    // -- Helpers --------------------------------------------------------------

    fn state(&self) -> MutexGuard<'_, PanelState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn text(&self, key: &str, fallback: &str) -> String {
        self.inner.deps.translator.text(key, fallback)
    }

    fn notify_success(&self, key: &str, fallback: &str) {
        self.inner.deps.notifier.success(&self.text(key, fallback));
    }

    fn notify_error(&self, key: &str, fallback: &str) {
        self.inner.deps.notifier.error(&self.text(key, fallback));
    }
}

fn prepare_save(state: &PanelState, id: &BookmarkId) -> SavePlan {
    let (Some(draft), Some(bookmark)) = (state.editing.draft(id), state.find(id)) else {
        return SavePlan::Skip;
    };
    match bookmark.verse_id_for_save() {
        Some(verse_id) => SavePlan::Send(
            BookmarkMutation::save(bookmark, verse_id, draft.notes.clone(), draft.labels.clone()),
            draft.clone(),
        ),
        None => SavePlan::MissingVerseId,
    }
}

/// `updated_at` from an upsert response, when present.
fn saved_at(response: &serde_json::Value) -> Option<Timestamp> {
    let raw = response
        .pointer("/insert_users_bookmarks_one/updated_at")?
        .as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}
