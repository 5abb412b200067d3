//! Core types - pure value objects shared across the codebase.

mod entry;
mod priority;
mod url;

pub use entry::{SourceId, UrlEntry};
pub use priority::{ChangeFreq, Priority};
pub use url::{SiteUrl, SiteUrlError, UrlPath};
