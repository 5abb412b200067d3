//! Placeholder substitution.
//!
//! | Placeholder  | Value                                     |
//! |--------------|-------------------------------------------|
//! | `:slug`      | record slug, record id when slug is empty |
//! | `:id`        | record id                                 |
//! | `:kind_name` | content kind's machine name               |
//! | `:<other>`   | extra values supplied by the source       |

use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

static RE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern `{pattern}` has unresolved placeholder `:{name}`")]
    UnresolvedPlaceholder { pattern: String, name: String },

    #[error("pattern `{pattern}` has empty value for `:{name}`")]
    EmptyValue { pattern: String, name: String },
}

/// Values available to one substitution
#[derive(Debug, Clone, Default)]
pub struct Substitution {
    values: Vec<(String, String)>,
}

impl Substitution {
    /// Values for a listing page: only `:kind_name`.
    pub fn for_kind(kind_name: &str) -> Self {
        Self::default().with("kind_name", kind_name)
    }

    /// Values for one record of `kind_name`.
    pub fn for_record(kind_name: &str, id: &str, slug: &str) -> Self {
        let slug = if slug.trim().is_empty() { id } else { slug };
        Self::for_kind(kind_name).with("id", id).with("slug", slug)
    }

    /// Add or replace a value.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        let value = value.trim().to_string();
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name.to_string(), value)),
        }
        self
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Placeholder names used by `pattern`, in order.
pub fn placeholders(pattern: &str) -> Vec<&str> {
    RE_PLACEHOLDER
        .captures_iter(pattern)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Substitute every placeholder of `pattern`.
///
/// A placeholder without a value, or with an empty one, fails the whole
/// substitution; callers skip the record.
pub fn substitute(pattern: &str, values: &Substitution) -> Result<String, PatternError> {
    let mut failure = None;
    let out = RE_PLACEHOLDER.replace_all(pattern, |caps: &Captures| {
        let name = &caps[1];
        match values.get(name) {
            Some(v) if !v.is_empty() => v.to_string(),
            found => {
                failure.get_or_insert_with(|| {
                    let (pattern, name) = (pattern.to_string(), name.to_string());
                    if found.is_some() {
                        PatternError::EmptyValue { pattern, name }
                    } else {
                        PatternError::UnresolvedPlaceholder { pattern, name }
                    }
                });
                String::new()
            }
        }
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(out.into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_template() {
        let values = Substitution::for_record("article", "7", "hello-world");
        assert_eq!(substitute("/:kind_name/:slug", &values).unwrap(), "/article/hello-world");
    }

    #[test]
    fn test_slug_falls_back_to_id() {
        let values = Substitution::for_record("article", "7", "  ");
        assert_eq!(substitute("/a/:slug", &values).unwrap(), "/a/7");
        assert_eq!(substitute("/a/:id-:slug", &values).unwrap(), "/a/7-7");
    }

    #[test]
    fn test_extra_values() {
        let values = Substitution::for_record("blog_post", "1", "first").with("blog", "news");
        assert_eq!(substitute("/blog/:blog/:slug", &values).unwrap(), "/blog/news/first");
    }

    #[test]
    fn test_unknown_placeholder_fails() {
        let values = Substitution::for_kind("article");
        let err = substitute("/:kind_name/:year/:slug", &values).unwrap_err();
        assert_eq!(
            err,
            PatternError::UnresolvedPlaceholder {
                pattern: "/:kind_name/:year/:slug".to_string(),
                name: "year".to_string()
            }
        );
    }

    #[test]
    fn test_empty_value_fails() {
        let values = Substitution::for_record("post", "1", "x").with("blog", "");
        assert!(matches!(
            substitute("/blog/:blog/:slug", &values),
            Err(PatternError::EmptyValue { .. })
        ));
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders("/blog/:blog/:slug"), vec!["blog", "slug"]);
        assert!(placeholders("/about").is_empty());
    }
}
