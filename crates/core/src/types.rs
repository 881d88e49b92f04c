/// Identifier of the signed-in user as issued by the session provider.
pub type UserId = String;

/// Translation author identifier used to select verse translations.
pub type AuthorId = i64;

/// Author whose translation is requested when the caller names none.
pub const DEFAULT_AUTHOR_ID: AuthorId = 105;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
