//! Bookmark models and mutation DTOs.
//!
//! The authoritative bookmark rows live in the external data service; these
//! types mirror the JSON it returns (`users_bookmarks`) and the body accepted
//! by the mutation endpoint.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::{AuthorId, Timestamp};

// ---------------------------------------------------------------------------
// Read model
// ---------------------------------------------------------------------------

/// Opaque bookmark identifier.
///
/// The data service may hand out numeric or string ids; both are normalised
/// to their string form so the panel can key its editing state on them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BookmarkId(String);

impl BookmarkId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BookmarkId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for BookmarkId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BookmarkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

/// A row of the `users_bookmarks` collection as returned by the list query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: BookmarkId,
    #[serde(rename = "bookmarkKey")]
    pub bookmark_key: String,
    /// Kind of bookmarked item (e.g. `"verse"`).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Type-dependent location payload, stored verbatim.
    #[serde(rename = "bookmarkItem", default)]
    pub bookmark_item: serde_json::Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub verse_id: Option<i64>,
    /// Denormalised verse join, present on list reads only.
    #[serde(default)]
    pub verse: Option<Verse>,
}

impl Bookmark {
    /// Verse id to send back when saving an edit.
    ///
    /// Prefers the joined verse row and falls back to the foreign key column.
    pub fn verse_id_for_save(&self) -> Option<i64> {
        self.verse.as_ref().and_then(|v| v.id).or(self.verse_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub page: Option<i32>,
    pub verse_number: i32,
    /// Original-language verse text.
    #[serde(default)]
    pub verse: String,
    #[serde(default)]
    pub transcription: Option<String>,
    pub surah: Surah,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surah {
    pub id: i32,
    /// Turkish surah name.
    pub name: String,
    #[serde(default)]
    pub name_en: String,
}

/// A verse translation. Its row id is not needed and is not decoded, since
/// the data service may hand it out as a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub author_id: AuthorId,
    pub text: String,
}

/// Payload of a successful list query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkList {
    #[serde(default)]
    pub users_bookmarks: Vec<Bookmark>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Mutation DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkAction {
    Add,
    Remove,
}

/// Body of `POST /api/bookmark`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkMutation {
    pub action: BookmarkAction,
    pub bookmark_key: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmark_item: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Upsert input with absent `labels`/`notes` already defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct AddBookmark {
    pub bookmark_key: String,
    pub kind: Option<String>,
    pub bookmark_item: Option<serde_json::Value>,
    pub verse_id: Option<i64>,
    pub labels: Vec<String>,
    pub notes: String,
}

/// A validated mutation, ready to be turned into a GraphQL document.
#[derive(Debug, Clone, PartialEq)]
pub enum BookmarkCommand {
    Add(AddBookmark),
    Remove { bookmark_key: String },
}

impl BookmarkMutation {
    /// Build an `add` request re-sending the bookmark's immutable fields
    /// alongside edited notes and labels.
    pub fn save(bookmark: &Bookmark, verse_id: i64, notes: String, labels: Vec<String>) -> Self {
        Self {
            action: BookmarkAction::Add,
            bookmark_key: bookmark.bookmark_key.clone(),
            kind: bookmark.kind.clone(),
            bookmark_item: Some(bookmark.bookmark_item.clone()),
            verse_id: Some(verse_id),
            labels: Some(labels),
            notes: Some(notes),
        }
    }

    pub fn remove(bookmark_key: impl Into<String>) -> Self {
        Self {
            action: BookmarkAction::Remove,
            bookmark_key: bookmark_key.into(),
            kind: None,
            bookmark_item: None,
            verse_id: None,
            labels: None,
            notes: None,
        }
    }

    /// Presence-check the request and apply defaults.
    ///
    /// Only a blank `bookmarkKey` is rejected; missing optional fields are
    /// defaulted (`labels` → `[]`, `notes` → `""`) rather than treated as errors.
    pub fn into_command(self) -> Result<BookmarkCommand, CoreError> {
        if self.bookmark_key.trim().is_empty() {
            return Err(CoreError::Validation(
                "bookmarkKey must not be empty".to_string(),
            ));
        }

        Ok(match self.action {
            BookmarkAction::Add => BookmarkCommand::Add(AddBookmark {
                bookmark_key: self.bookmark_key,
                kind: self.kind,
                bookmark_item: self.bookmark_item,
                verse_id: self.verse_id,
                labels: self.labels.unwrap_or_default(),
                notes: self.notes.unwrap_or_default(),
            }),
            BookmarkAction::Remove => BookmarkCommand::Remove {
                bookmark_key: self.bookmark_key,
            },
        })
    }
}
