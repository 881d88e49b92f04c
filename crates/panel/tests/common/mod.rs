#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ayah_core::bookmark::{Bookmark, BookmarkId, BookmarkMutation, Surah, Translation, Verse};
use ayah_core::types::AuthorId;
use ayah_panel::api::BookmarkApi;
use ayah_panel::capabilities::{AuthProvider, Notifier, Router, SessionUser, Translator};
use ayah_panel::config::PanelConfig;
use ayah_panel::error::PanelError;
use ayah_panel::{BookmarkPanel, PanelDeps};
use chrono::TimeZone;
use tokio::time::Instant;

pub const TEST_USER_ID: &str = "user-123";

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A verse bookmark for `surah:verse` with id `id`.
pub fn verse_bookmark(id: i64, surah: i32, verse: i32) -> Bookmark {
    Bookmark {
        id: BookmarkId::from(id),
        bookmark_key: format!("{surah}:{verse}"),
        kind: Some("verse".to_string()),
        bookmark_item: serde_json::json!({ "surah": surah, "verse": verse }),
        notes: String::new(),
        labels: Vec::new(),
        updated_at: chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        verse_id: Some(100 + id),
        verse: Some(Verse {
            id: Some(100 + id),
            page: Some(1),
            verse_number: verse,
            verse: "بِسْمِ اللَّهِ".to_string(),
            transcription: Some("Bismillahirrahmanirrahim".to_string()),
            surah: Surah {
                id: surah,
                name: "Fâtiha".to_string(),
                name_en: "Al-Fatiha".to_string(),
            },
            translations: vec![Translation {
                author_id: 105,
                text: "In the name of God".to_string(),
            }],
        }),
    }
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeAuth {
    user: Mutex<Option<SessionUser>>,
}

impl FakeAuth {
    pub fn signed_in() -> Self {
        let auth = Self::default();
        auth.sign_in();
        auth
    }

    pub fn sign_in(&self) {
        *self.user.lock().unwrap() = Some(SessionUser {
            id: TEST_USER_ID.to_string(),
        });
    }

    pub fn sign_out(&self) {
        *self.user.lock().unwrap() = None;
    }
}

impl AuthProvider for FakeAuth {
    fn current_user(&self) -> Option<SessionUser> {
        self.user.lock().unwrap().clone()
    }
}

/// Records navigation as `push:<path>`, `close` and `login`.
#[derive(Default)]
pub struct RecordingRouter {
    events: Mutex<Vec<String>>,
}

impl RecordingRouter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Router for RecordingRouter {
    fn push(&self, path: &str) {
        self.events.lock().unwrap().push(format!("push:{path}"));
    }

    fn close_panel(&self) {
        self.events.lock().unwrap().push("close".to_string());
    }

    fn open_login(&self) {
        self.events.lock().unwrap().push("login".to_string());
    }
}

/// Translates every key to itself.
pub struct KeyTranslator;

impl Translator for KeyTranslator {
    fn translate(&self, key: &str) -> Option<String> {
        Some(key.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::Error(message.to_string()));
    }
}

/// One recorded list call.
#[derive(Debug, Clone)]
pub struct ListCall {
    pub author_id: AuthorId,
    pub search_term: String,
    pub at: Instant,
}

/// Scripted list answer for one search term.
#[derive(Clone)]
struct ListScript {
    delay: Duration,
    outcome: Option<Vec<Bookmark>>,
}

/// Bookmark API that records calls and replays scripted answers.
///
/// List calls answer immediately with an empty list unless a script is
/// registered for the search term. Mutations succeed with `{}` unless an
/// outcome is queued.
#[derive(Default)]
pub struct FakeApi {
    list_calls: Mutex<Vec<ListCall>>,
    list_scripts: Mutex<HashMap<String, ListScript>>,
    mutations: Mutex<Vec<BookmarkMutation>>,
    mutation_outcomes: Mutex<VecDeque<Result<serde_json::Value, Option<String>>>>,
}

impl FakeApi {
    pub fn list_returns(&self, search_term: &str, bookmarks: Vec<Bookmark>) {
        self.list_after(search_term, Duration::ZERO, bookmarks);
    }

    pub fn list_after(&self, search_term: &str, delay: Duration, bookmarks: Vec<Bookmark>) {
        self.list_scripts.lock().unwrap().insert(
            search_term.to_string(),
            ListScript {
                delay,
                outcome: Some(bookmarks),
            },
        );
    }

    pub fn list_fails(&self, search_term: &str) {
        self.list_scripts.lock().unwrap().insert(
            search_term.to_string(),
            ListScript {
                delay: Duration::ZERO,
                outcome: None,
            },
        );
    }

    pub fn mutation_returns(&self, data: serde_json::Value) {
        self.mutation_outcomes.lock().unwrap().push_back(Ok(data));
    }

    /// Fail the next mutation with a 500, optionally carrying a server message.
    pub fn mutation_fails(&self, message: Option<&str>) {
        self.mutation_outcomes
            .lock()
            .unwrap()
            .push_back(Err(message.map(str::to_string)));
    }

    pub fn list_calls(&self) -> Vec<ListCall> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<BookmarkMutation> {
        self.mutations.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookmarkApi for FakeApi {
    async fn list(
        &self,
        author_id: AuthorId,
        search_term: &str,
    ) -> Result<Vec<Bookmark>, PanelError> {
        self.list_calls.lock().unwrap().push(ListCall {
            author_id,
            search_term: search_term.to_string(),
            at: Instant::now(),
        });

        let script = self.list_scripts.lock().unwrap().get(search_term).cloned();
        let Some(script) = script else {
            return Ok(Vec::new());
        };

        if !script.delay.is_zero() {
            tokio::time::sleep(script.delay).await;
        }
        script.outcome.ok_or(PanelError::Status {
            status: 500,
            message: Some("Error while fetching bookmarks".to_string()),
        })
    }

    async fn mutate(&self, mutation: &BookmarkMutation) -> Result<serde_json::Value, PanelError> {
        self.mutations.lock().unwrap().push(mutation.clone());
        match self.mutation_outcomes.lock().unwrap().pop_front() {
            Some(Ok(data)) => Ok(data),
            Some(Err(message)) => Err(PanelError::Status {
                status: 500,
                message,
            }),
            None => Ok(serde_json::json!({})),
        }
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct Harness {
    pub panel: BookmarkPanel,
    pub api: Arc<FakeApi>,
    pub auth: Arc<FakeAuth>,
    pub router: Arc<RecordingRouter>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new(auth: FakeAuth) -> Self {
        let api = Arc::new(FakeApi::default());
        let auth = Arc::new(auth);
        let router = Arc::new(RecordingRouter::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let panel = BookmarkPanel::new(
            PanelConfig::default(),
            PanelDeps {
                api: api.clone(),
                auth: auth.clone(),
                router: router.clone(),
                translator: Arc::new(KeyTranslator),
                notifier: notifier.clone(),
            },
        );

        Self {
            panel,
            api,
            auth,
            router,
            notifier,
        }
    }

    pub fn signed_in() -> Self {
        Self::new(FakeAuth::signed_in())
    }

    pub fn signed_out() -> Self {
        Self::new(FakeAuth::default())
    }
}
