//! Sitemap rendering.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:xhtml="http://www.w3.org/1999/xhtml">
//!   <url>
//!     <loc>https://example.com/fr/posts/42</loc>
//!     <xhtml:link rel="alternate" hreflang="en-US" href="https://example.com/en/posts/42"/>
//!     <xhtml:link rel="alternate" hreflang="fr-FR" href="https://example.com/fr/posts/42"/>
//!     <lastmod>2025-01-01T00:00:00Z</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>0.7</priority>
//!   </url>
//! </urlset>
//! ```

use std::borrow::Cow;

use crate::collector::{LanguageRun, alternates, dedup};
use crate::core::UrlEntry;
use crate::language::AlternateMap;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Render entries, with alternates when given.
pub fn render(entries: &[UrlEntry], alternates: Option<&AlternateMap>) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 192);

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push('"');
    if alternates.is_some_and(|a| !a.is_empty()) {
        xml.push_str(" xmlns:xhtml=\"");
        xml.push_str(XHTML_NS);
        xml.push('"');
    }
    xml.push_str(">\n");

    for entry in entries {
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&escape_xml(&entry.loc));
        xml.push_str("</loc>\n");

        if let Some(group) = alternates.and_then(|a| a.get(&entry.canonical_path)) {
            for alt in group {
                xml.push_str("    <xhtml:link rel=\"alternate\" hreflang=\"");
                xml.push_str(&escape_xml(&alt.hreflang));
                xml.push_str("\" href=\"");
                xml.push_str(&escape_xml(&alt.href));
                xml.push_str("\"/>\n");
            }
        }
        if let Some(lastmod) = entry.lastmod {
            xml.push_str("    <lastmod>");
            xml.push_str(&lastmod.to_rfc3339());
            xml.push_str("</lastmod>\n");
        }
        xml.push_str("    <changefreq>");
        xml.push_str(entry.changefreq.as_str());
        xml.push_str("</changefreq>\n    <priority>");
        xml.push_str(&entry.priority.to_string());
        xml.push_str("</priority>\n  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Render every language run into one document with hreflang alternates.
pub fn render_languages(runs: &[LanguageRun]) -> String {
    let map = alternates(runs);
    let entries = dedup(runs.iter().map(|r| r.entries.clone()));
    render(&entries, Some(&map))
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChangeFreq, Priority, SourceId, UrlPath};
    use crate::language::LanguageContext;
    use crate::utils::DateTimeUtc;

    fn entry(loc: &str, path: &str) -> UrlEntry {
        UrlEntry::new(loc.to_string(), UrlPath::new(path), SourceId::Static)
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_sitemap_empty() {
        let xml = render(&[], None);
        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_sitemap_entry_fields() {
        let e = entry("https://example.com/search?q=a&b", "/search")
            .with_lastmod(Some(DateTimeUtc::from_ymd(2025, 1, 2)))
            .with_priority(Priority::new(0.7))
            .with_changefreq(ChangeFreq::Daily);
        let xml = render(&[e, entry("https://example.com/", "/")], None);

        assert!(xml.contains("<loc>https://example.com/search?q=a&amp;b</loc>"));
        assert!(xml.contains("<lastmod>2025-01-02T00:00:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>0.7</priority>"));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert_eq!(xml.matches("<lastmod>").count(), 1);
    }

    #[test]
    fn test_render_languages() {
        let en = LanguageRun {
            language: LanguageContext::new(Some("en"), true, false),
            entries: vec![entry("https://x.org/en/a", "/a")],
        };
        let fr = LanguageRun {
            language: LanguageContext::new(Some("fr"), false, false),
            entries: vec![entry("https://x.org/fr/a", "/a")],
        };
        let xml = render_languages(&[en, fr]);

        assert!(xml.contains(&format!(r#"xmlns:xhtml="{XHTML_NS}""#)));
        assert_eq!(xml.matches("<url>").count(), 2);
        let x_default =
            r#"<xhtml:link rel="alternate" hreflang="x-default" href="https://x.org/en/a"/>"#;
        assert_eq!(xml.matches(x_default).count(), 2);
        assert!(xml.contains(r#"hreflang="fr" href="https://x.org/fr/a""#));
    }
}
