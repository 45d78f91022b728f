//! Coaching content exported from the CMS.
//!
//! The site build exports every week, lesson and habit for every locale
//! into a single catalog file:
//!
//! ```text
//! ~/.nyxo/
//! └── catalog.json    # { "version": 1, "nodes": [ ContentNode, ... ] }
//! ```
//!
//! Derived fields (`fields.excerpt`, `fields.reading_time`) are filled in
//! by the build step, see [`crate::build`].

pub mod catalog;
pub mod locale;
pub mod node;
pub mod sections;

pub use catalog::{Catalog, INTRODUCTION_SLUG};
pub use locale::Locale;
pub use node::{
    ContentId, ContentKind, ContentNode, NodeFields, ReadingTime, RichTextSource, Section,
};
pub use sections::{group_by_section, LessonSection};
