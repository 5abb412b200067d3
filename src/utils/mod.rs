//! Utility modules shared across sources.

pub mod convert;
pub mod date;
pub mod text;

pub use date::DateTimeUtc;
