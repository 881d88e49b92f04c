//! Request extractors.
//!
//! - [`auth::AuthSession`] -- Requires a session and a derivable access token.

pub mod auth;
