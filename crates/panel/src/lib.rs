//! Headless bookmark panel.
//!
//! Drives the bookmark list and mutation endpoints on behalf of a UI: holds
//! the in-memory bookmark list and per-item edit drafts, debounces search
//! input, discards stale list responses, and renders a [`view::PanelView`]
//! the UI layer can paint directly. Every outside collaborator (session,
//! navigation, translations, notifications, HTTP) is injected as a trait
//! object.

pub mod api;
pub mod capabilities;
pub mod config;
pub mod debounce;
pub mod editing;
pub mod error;
pub mod panel;
pub mod state;
pub mod time;
pub mod view;

pub use panel::{BookmarkPanel, PanelDeps};
