//! Read-only adapter over the host application's route table.
//!
//! | Module       | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `table`      | `RouteInfo` rows and JSON loading              |
//! | `protection` | Pipeline / mount-hook deny-lists               |
//! | `handler`    | Handler-name to content-kind matching          |
//! | `resolver`   | Pattern lookup and access checks for sources   |
//!
//! The table is plain data populated once from the host framework's own
//! route listing; this engine never mutates it.

mod handler;
mod protection;
mod resolver;
mod table;

pub use handler::{handler_matches, tokenize};
pub use protection::{DEFAULT_AUTH_HOOKS, DEFAULT_PROTECTED_PIPELINES, ProtectionPolicy};
pub use resolver::{RouteLookup, RouteResolver};
pub use table::{RouteInfo, RouteTable, RouteTableError};

/// Segments of a route pattern with placeholder names erased.
///
/// `/blog/:blog/:slug` and `/blog/:name/:id` share the shape
/// `["blog", ":", ":"]`; a `*rest` glob becomes `"*"`.
pub(crate) fn pattern_shape(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.starts_with(':') {
                ":"
            } else if s.starts_with('*') {
                "*"
            } else {
                s
            }
        })
        .collect()
}

/// Match a concrete path against a route pattern.
///
/// `:param` matches exactly one segment, `*rest` the remainder (possibly
/// empty). Literal segments compare exactly.
pub(crate) fn pattern_matches(pattern: &str, path: &str) -> bool {
    let mut concrete = path.split('/').filter(|s| !s.is_empty());
    for segment in pattern.split('/').filter(|s| !s.is_empty()) {
        if segment.starts_with('*') {
            return true;
        }
        match concrete.next() {
            Some(actual) if segment.starts_with(':') || segment == actual => {}
            _ => return false,
        }
    }
    concrete.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_shape() {
        assert_eq!(pattern_shape("/blog/:blog/:slug"), vec!["blog", ":", ":"]);
        assert_eq!(pattern_shape("/"), Vec::<&str>::new());
        assert_eq!(pattern_shape("/files/*path"), vec!["files", "*"]);
        assert_eq!(pattern_shape("/blog/:a/:b"), pattern_shape("/blog/:blog/:slug/"));
    }

    #[test]
    fn test_pattern_matches() {
        assert!(pattern_matches("/", "/"));
        assert!(pattern_matches("/about", "/about"));
        assert!(!pattern_matches("/about", "/about/team"));
        assert!(pattern_matches("/posts/:id", "/posts/42"));
        assert!(!pattern_matches("/posts/:id", "/posts"));
        assert!(pattern_matches("/files/*rest", "/files/a/b/c"));
        assert!(pattern_matches("/files/*rest", "/files"));
        assert!(!pattern_matches("/admin", "/"));
    }
}
