//! Handler naming convention.
//!
//! Route handlers are opaque references such as `MyAppWeb.ArticleLive.Show`
//! or `blog_post_controller#show`. A handler matches a content kind when its
//! tokens contain the kind's tokens contiguously, the last one singular or
//! plural.

/// Split on non-alphanumerics and CamelCase boundaries, lowercased.
///
/// `ArticleLive.Show` → `["article", "live", "show"]`,
/// `HTTPServer` → `["http", "server"]`.
pub fn tokenize(name: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for word in name.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        let chars: Vec<char> = word.chars().collect();
        let mut current = String::new();
        for (i, &c) in chars.iter().enumerate() {
            let boundary = c.is_uppercase()
                && !current.is_empty()
                && (chars[i - 1].is_lowercase()
                    || chars[i - 1].is_ascii_digit()
                    || chars.get(i + 1).is_some_and(|n| n.is_lowercase()));
            if boundary {
                tokens.push(std::mem::take(&mut current));
            }
            current.extend(c.to_lowercase());
        }
        if !current.is_empty() {
            tokens.push(current);
        }
    }
    tokens
}

fn plural_forms(word: &str) -> [String; 2] {
    let plural = if let Some(stem) = word.strip_suffix('y')
        && !stem.ends_with(['a', 'e', 'i', 'o', 'u'])
    {
        format!("{stem}ies")
    } else if word.ends_with(['s', 'x', 'z']) || word.ends_with("ch") || word.ends_with("sh") {
        format!("{word}es")
    } else {
        format!("{word}s")
    };
    [word.to_string(), plural]
}

/// Whether `handler` follows the naming convention for `kind`.
pub fn handler_matches(handler: &str, kind: &str) -> bool {
    let kind_tokens = tokenize(kind);
    let Some((last, head)) = kind_tokens.split_last() else {
        return false;
    };
    let last_forms = plural_forms(last);
    let handler_tokens = tokenize(handler);

    handler_tokens.windows(kind_tokens.len()).any(|window| {
        let Some((window_last, window_head)) = window.split_last() else {
            return false;
        };
        window_head == head && last_forms.iter().any(|f| f == window_last)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("MyAppWeb.ArticleLive.Show"),
            vec!["my", "app", "web", "article", "live", "show"]
        );
        assert_eq!(
            tokenize("blog_post_controller#show"),
            vec!["blog", "post", "controller", "show"]
        );
        assert_eq!(tokenize("HTTPServer"), vec!["http", "server"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_handler_matches_singular_and_plural() {
        assert!(handler_matches("MyAppWeb.ArticleLive.Show", "article"));
        assert!(handler_matches("ArticlesController", "article"));
        assert!(handler_matches("CategoryController.show", "category"));
        assert!(handler_matches("CategoriesLive", "category"));
        assert!(!handler_matches("ArticleCommentController", "comment_article"));
    }

    #[test]
    fn test_handler_matches_multi_token_kind() {
        assert!(handler_matches("MyAppWeb.BlogPostLive.Show", "blog_post"));
        assert!(handler_matches("blog_posts#show", "blog_post"));
        assert!(!handler_matches("MyAppWeb.BlogLive.Show", "blog_post"));
        assert!(!handler_matches("PostController", "blog_post"));
    }

    #[test]
    fn test_handler_does_not_match_partial_token() {
        assert!(!handler_matches("PostmanController", "post"));
        assert!(!handler_matches("", "post"));
        assert!(!handler_matches("PostController", ""));
    }
}
