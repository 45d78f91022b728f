//! User bookmarks and their reconciliation against the content catalog.
//!
//! Bookmarks are fetched from the remote profile (see [`crate::api`]) and
//! are read-only here. Every render recomputes the reconciliation from
//! fresh data; nothing is cached.

pub mod reconcile;
pub mod types;

pub use reconcile::{reconcile_bookmarks, Reconciled};
pub use types::{Bookmark, BookmarkSet};
