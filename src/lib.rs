//! nyxo - content core for the Nyxo sleep-coaching site
//!
//! The site is generated from content exported by a headless CMS and
//! decorated at runtime with user-specific state. This crate holds the
//! parts of that pipeline with actual logic.
//!
//! # Modules
//!
//! - `richtext`: CMS rich-text documents, plain-text rendering, excerpts
//! - `content`: weeks, lessons and habits; the catalog export
//! - `build`: attaches derived fields (excerpt, reading time) to nodes
//! - `bookmarks`: type-qualified bookmarks and catalog reconciliation
//! - `api`: GraphQL client for bookmarks and comments
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Attach excerpts to every node of the catalog export
//! nyxo build --catalog public/catalog.json
//!
//! # Show the signed-in user's bookmarks
//! NYXO_API_TOKEN=... nyxo bookmarks --locale fi
//! ```

pub mod api;
pub mod bookmarks;
pub mod build;
pub mod cli;
pub mod config;
pub mod content;
pub mod richtext;

// Re-export main types at crate root for convenience
pub use api::{ApiClient, ApiError, Session, UserContentSource};
pub use bookmarks::{reconcile_bookmarks, Bookmark, BookmarkSet, Reconciled};
pub use build::{BuildReport, NodeProcessor};
pub use content::{Catalog, ContentKind, ContentNode, Locale};
pub use richtext::{extract_excerpt, Document, ParseError};
