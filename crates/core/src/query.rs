//! GraphQL document builders for the `users_bookmarks` collection.
//!
//! Documents are assembled from static fragments only. Everything that comes
//! from a request (search text, author, user id, bookmark fields) is bound as
//! a typed variable, so no caller input is ever spliced into a document.

use serde_json::json;

use crate::bookmark::AddBookmark;
use crate::graphql::GraphQlRequest;
use crate::types::AuthorId;

// ---------------------------------------------------------------------------
// Search term
// ---------------------------------------------------------------------------

/// A non-empty, trimmed search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Returns `None` for absent, empty, or whitespace-only input.
    pub fn parse(input: Option<&str>) -> Option<Self> {
        let trimmed = input?.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substring pattern for `_ilike`. Wildcards inside the term are kept.
    pub fn ilike_pattern(&self) -> String {
        format!("%{}%", self.0)
    }
}

// ---------------------------------------------------------------------------
// List query
// ---------------------------------------------------------------------------

const BOOKMARK_SELECTION: &str = "    id
    bookmarkKey
    bookmarkItem
    type
    updated_at
    notes
    labels
    verse_id
    verse {
      id
      page
      verse_number
      verse
      transcription
      surah {
        id
        name
        name_en
      }
      translations(where: { author_id: { _eq: $authorId } }) {
        author_id
        text
      }
    }
";

/// Disjunction of the five case-insensitive substring conditions.
const SEARCH_FILTER: &str = "where: {
      _or: [
        { notes: { _ilike: $pattern } }
        { labels: { _cast: { String: { _ilike: $pattern } } } }
        { verse: { verse: { _ilike: $pattern } } }
        { verse: { transcription: { _ilike: $pattern } } }
        { verse: { translations: { author_id: { _eq: $authorId }, text: { _ilike: $pattern } } } }
      ]
    }";

pub const LIST_OPERATION: &str = "usersBookmarksQuery";

/// Build the list query, newest-updated first.
///
/// Without a search term the document carries no `where` clause at all and
/// every bookmark of the caller is returned.
pub fn list_bookmarks_query(search: Option<&SearchTerm>, author_id: AuthorId) -> GraphQlRequest {
    let (declarations, variables) = match search {
        Some(term) => (
            "$authorId: Int!, $pattern: String!",
            json!({ "authorId": author_id, "pattern": term.ilike_pattern() }),
        ),
        None => ("$authorId: Int!", json!({ "authorId": author_id })),
    };

    let mut query = String::with_capacity(1024);
    query.push_str("query ");
    query.push_str(LIST_OPERATION);
    query.push('(');
    query.push_str(declarations);
    query.push_str(") {\n  users_bookmarks(\n    order_by: { updated_at: desc }");
    if search.is_some() {
        query.push_str("\n    ");
        query.push_str(SEARCH_FILTER);
    }
    query.push_str("\n  ) {\n");
    query.push_str(BOOKMARK_SELECTION);
    query.push_str("  }\n}\n");

    GraphQlRequest {
        query,
        variables,
        operation_name: LIST_OPERATION,
    }
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

pub const UPSERT_OPERATION: &str = "addBookmark";
pub const DELETE_OPERATION: &str = "removeBookmark";

/// Upsert keyed on `(userId, bookmarkKey)`. On conflict only `updated_at`,
/// `labels` and `notes` change; `type`, `bookmarkItem` and `verse_id` keep
/// their first-write values.
const UPSERT_DOCUMENT: &str = "mutation addBookmark(
  $userId: String!
  $type: String
  $bookmarkItem: jsonb
  $bookmarkKey: String!
  $verseId: Int
  $labels: jsonb
  $notes: String
) {
  insert_users_bookmarks_one(
    object: {
      userId: $userId
      type: $type
      bookmarkItem: $bookmarkItem
      bookmarkKey: $bookmarkKey
      verse_id: $verseId
      labels: $labels
      notes: $notes
    }
    on_conflict: {
      constraint: users_bookmarks_userId_bookmarkKey_key
      update_columns: [updated_at, labels, notes]
    }
  ) {
    id
    bookmarkKey
    updated_at
  }
}
";

const DELETE_DOCUMENT: &str = "mutation removeBookmark($userId: String!, $bookmarkKey: String!) {
  delete_users_bookmarks(
    where: { userId: { _eq: $userId }, bookmarkKey: { _eq: $bookmarkKey } }
  ) {
    affected_rows
  }
}
";

pub fn upsert_bookmark_mutation(user_id: &str, input: &AddBookmark) -> GraphQlRequest {
    GraphQlRequest {
        query: UPSERT_DOCUMENT.to_string(),
        variables: json!({
            "userId": user_id,
            "type": input.kind,
            "bookmarkItem": input.bookmark_item,
            "bookmarkKey": input.bookmark_key,
            "verseId": input.verse_id,
            "labels": input.labels,
            "notes": input.notes,
        }),
        operation_name: UPSERT_OPERATION,
    }
}

pub fn delete_bookmark_mutation(user_id: &str, bookmark_key: &str) -> GraphQlRequest {
    GraphQlRequest {
        query: DELETE_DOCUMENT.to_string(),
        variables: json!({
            "userId": user_id,
            "bookmarkKey": bookmark_key,
        }),
        operation_name: DELETE_OPERATION,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
