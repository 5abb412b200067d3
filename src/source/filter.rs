//! Regex lists from settings (exclude / include-only).

use regex::Regex;

use crate::log;

/// Compiled list of regular expressions
///
/// A pattern that fails to compile is kept as a never-matching slot, so a
/// typo in settings can neither crash the filter nor match everything.
#[derive(Debug, Clone, Default)]
pub struct RegexList {
    patterns: Vec<(String, Option<Regex>)>,
}

impl RegexList {
    /// Compile `patterns`, logging each malformed one under `context`.
    pub fn compile<I, S>(context: &str, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|raw| {
                let raw = raw.as_ref().to_string();
                let compiled = match Regex::new(&raw) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        log!("warning"; "{}: ignoring invalid pattern `{}`: {}", context, raw, e);
                        None
                    }
                };
                (raw, compiled)
            })
            .collect();
        Self { patterns }
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.patterns
            .iter()
            .any(|(_, re)| re.as_ref().is_some_and(|re| re.is_match(path)))
    }

    /// Whether no pattern was configured (malformed ones count as configured).
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}
