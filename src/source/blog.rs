//! Blogs and blog posts.
//!
//! | Level | Setting                          | Default             |
//! |-------|----------------------------------|---------------------|
//! | index | `sitemap_blogging_index_pattern` | `/blog`             |
//! | blog  | `sitemap_blogging_blog_pattern`  | `/blog/:blog`       |
//! | post  | `sitemap_blogging_post_pattern`  | `/blog/:blog/:slug` |
//!
//! Each level is emitted only when a public route confirms its pattern.
//! Posts reach their blog through the `blog` (slug) or `blog_id` metadata.

use std::sync::Arc;

use super::{CollectRun, SeoDefaults, Slot, Source, SourceError, SourceId};
use crate::backend::{Collection, Record, RecordStore};
use crate::core::{UrlEntry, UrlPath};
use crate::pattern::{Substitution, substitute};
use crate::route::RouteLookup;
use crate::settings::keys;
use crate::utils::text::humanize;
use crate::{debug, log};

const CATEGORY: &str = "Blog";

pub struct BlogSource {
    store: Arc<dyn RecordStore>,
}

impl BlogSource {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Configured (or default) pattern, if a public route serves it.
    fn public_pattern(&self, run: &CollectRun, level: &str, default: &str) -> Option<String> {
        let key = keys::scoped(&self.name().feature(), &format!("{level}_pattern"));
        let pattern = run.settings().string(&key, default);
        match run.routes.lookup(&pattern) {
            RouteLookup::Public(_) => Some(pattern),
            other => {
                debug!("blogging"; "{} pattern `{}` not public: {:?}", level, pattern, other);
                None
            }
        }
    }

    fn path(&self, pattern: &str, values: &Substitution, what: &str) -> Option<UrlPath> {
        match substitute(pattern, values) {
            Ok(path) => Some(UrlPath::new(&path)),
            Err(e) => {
                log!("warning"; "{}: skipping {}: {}", self.name(), what, e);
                None
            }
        }
    }
}

fn title_of(record: &Record) -> String {
    if record.title.trim().is_empty() {
        humanize(record.slug_or_id())
    } else {
        record.title.clone()
    }
}

/// Whether `post` belongs to `blog`.
fn belongs_to(post: &Record, blog: &Record) -> bool {
    if let Some(slug) = post.meta_text("blog") {
        return slug == blog.slug_or_id();
    }
    post.meta_text("blog_id")
        .is_some_and(|id| id == blog.id.as_str())
}

impl Source for BlogSource {
    fn name(&self) -> SourceId {
        SourceId::Blogging
    }

    fn try_collect(&self, run: &CollectRun) -> Result<Vec<UrlEntry>, SourceError> {
        let index_pattern = self.public_pattern(run, "index", "/blog");
        let blog_pattern = self.public_pattern(run, "blog", "/blog/:blog");
        let post_pattern = self.public_pattern(run, "post", "/blog/:blog/:slug");
        if index_pattern.is_none() && blog_pattern.is_none() && post_pattern.is_none() {
            log!("warning"; "{}: no public blog route, skipping", self.name());
            return Ok(Vec::new());
        }

        let blogs: Vec<Record> = self
            .store
            .published_records(&Collection::Blogs)?
            .into_iter()
            .filter(|b| b.is_published() && !b.is_excluded())
            .collect();
        let posts: Vec<Record> = self
            .store
            .published_records(&Collection::BlogPosts)?
            .into_iter()
            .filter(|p| p.is_published() && !p.is_excluded())
            .collect();

        let item_seo = SeoDefaults::resolve(self.name(), Slot::Item, run.settings());
        let mut blog_entries = Vec::new();

        for blog in &blogs {
            let blog_slug = blog.slug_or_id();
            let mut post_entries = Vec::new();

            if let Some(pattern) = &post_pattern {
                for post in posts.iter().filter(|p| belongs_to(p, blog)) {
                    let values = Substitution::for_record("blog_post", post.id.as_str(), &post.slug)
                        .with("blog", blog_slug);
                    let label = format!("post {}", post.id);
                    let Some(path) = self.path(pattern, &values, &label) else {
                        continue;
                    };
                    post_entries.push(
                        run.entry(path, self.name())
                            .with_title(title_of(post))
                            .with_category(blog.title.as_str())
                            .with_lastmod(post.lastmod())
                            .with_priority(post.priority().unwrap_or(item_seo.priority))
                            .with_changefreq(post.changefreq().unwrap_or(item_seo.changefreq)),
                    );
                }
            }

            if let Some(pattern) = &blog_pattern {
                let values = Substitution::for_record("blog", blog.id.as_str(), &blog.slug)
                    .with("blog", blog_slug);
                if let Some(path) = self.path(pattern, &values, &format!("blog {}", blog.id)) {
                    let lastmod = post_entries
                        .iter()
                        .filter_map(|e| e.lastmod)
                        .chain(blog.lastmod())
                        .max();
                    blog_entries.push(
                        run.seo_entry(path, self.name(), Slot::Index)
                            .with_title(title_of(blog))
                            .with_category(CATEGORY)
                            .with_lastmod(lastmod),
                    );
                }
            }
            blog_entries.extend(post_entries);
        }

        let mut entries = Vec::with_capacity(blog_entries.len() + 1);
        if let Some(pattern) = &index_pattern
            && let Some(path) = self.path(pattern, &Substitution::default(), "blog index")
        {
            let lastmod = blog_entries.iter().filter_map(|e| e.lastmod).max();
            entries.push(
                run.seo_entry(path, self.name(), Slot::Index)
                    .with_title(CATEGORY)
                    .with_category(CATEGORY)
                    .with_lastmod(lastmod),
            );
        }
        entries.extend(blog_entries);
        Ok(entries)
    }
}
