//! Collaborators injected into the panel.

/// The signed-in user as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
}

/// Client-side session lookup.
pub trait AuthProvider: Send + Sync {
    fn current_user(&self) -> Option<SessionUser>;
}

/// Navigation and modal control.
pub trait Router: Send + Sync {
    fn push(&self, path: &str);

    /// Close the bookmark panel.
    fn close_panel(&self);

    /// Open the login dialog.
    fn open_login(&self);
}

/// Translation lookup (`key` → localized string).
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> Option<String>;

    /// Translation for `key`, or `fallback` when the key is missing.
    fn text(&self, key: &str, fallback: &str) -> String {
        self.translate(key).unwrap_or_else(|| fallback.to_string())
    }
}

/// Transient user notifications.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}
