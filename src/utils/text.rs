//! Display-text helpers.

/// Turn a URL segment or machine name into a display title.
///
/// `about-us` → `About Us`, `blog_post` → `Blog Post`.
pub fn humanize(segment: &str) -> String {
    segment
        .split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Title for a root-relative path: last segment humanized, `Home` for `/`.
pub fn title_from_path(path: &str) -> String {
    match path.trim_end_matches('/').rsplit('/').next() {
        Some(last) if !last.is_empty() => humanize(last),
        _ => "Home".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("about-us"), "About Us");
        assert_eq!(humanize("blog_post"), "Blog Post");
        assert_eq!(humanize("faq"), "Faq");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_title_from_path() {
        assert_eq!(title_from_path("/"), "Home");
        assert_eq!(title_from_path(""), "Home");
        assert_eq!(title_from_path("/legal/privacy-policy"), "Privacy Policy");
        assert_eq!(title_from_path("/contact/"), "Contact");
    }
}
