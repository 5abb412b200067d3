//! Front-matter documents on disk.
//!
//! Every `.md` / `.markdown` file under the pages directory whose front
//! matter says `status: published` (and not `draft`) becomes one entry.
//!
//! Path: `permalink` if set, else `<prefix>/<slug>`, else the file's
//! relative path without extension (`index` files map to their directory).
//!
//! `name.<lang>.md`, where `<lang>` is an enabled or the default language,
//! (or a `lang` field) marks a language-specific document:
//! it is only emitted when the run's base locale matches, and then wins over
//! the untagged document with the same path.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use jwalk::WalkDir;
use rayon::prelude::*;
use regex::Regex;
use rustc_hash::FxHashMap;

use super::{CollectRun, SeoDefaults, Slot, Source, SourceError, SourceId};
use crate::backend::{DocumentMeta, parse_document};
use crate::core::{Priority, UrlEntry, UrlPath};
use crate::language::{base_locale, default_language, enabled_languages};
use crate::settings::{SettingsReader, keys};
use crate::utils::DateTimeUtc;
use crate::utils::text::title_from_path;
use crate::{debug, log};

const EXTENSIONS: &[&str] = &["md", "markdown"];
const CATEGORY: &str = "Pages";

static RE_LOCALE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}([-_][A-Za-z0-9]{2,4})?$").unwrap());

/// A parsed document before path resolution
struct ScannedDocument {
    /// Relative path without extension and language tag
    stem: String,
    lang: Option<String>,
    meta: DocumentMeta,
    modified: Option<DateTimeUtc>,
}

pub struct PageSource {
    dir: PathBuf,
}

impl PageSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn scan(&self) -> Result<Vec<PathBuf>, SourceError> {
        if !self.dir.is_dir() {
            return Err(SourceError::Io {
                path: self.dir.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "pages directory not found",
                ),
            });
        }
        Ok(WalkDir::new(&self.dir)
            .sort(true)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            })
            .collect())
    }

    fn load(&self, path: &Path, known: &[String]) -> Option<ScannedDocument> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log!("warning"; "{}: cannot read {}: {}", self.name(), path.display(), e);
                return None;
            }
        };
        let meta = match parse_document(&content) {
            Ok(meta) => meta,
            Err(e) => {
                log!("warning"; "{}: skipping {}: {}", self.name(), path.display(), e);
                return None;
            }
        };
        if !meta.is_published() || meta.is_excluded() {
            debug!("pages"; "skipping {} (unpublished or excluded)", path.display());
            return None;
        }

        let relative = path.strip_prefix(&self.dir).unwrap_or(path).with_extension("");
        let relative = relative.to_string_lossy().replace('\\', "/");
        let (stem, file_lang) = split_language_tag(&relative, known);
        let modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(DateTimeUtc::from_system_time);

        Some(ScannedDocument {
            stem: stem.to_string(),
            lang: file_lang.map(str::to_string).or_else(|| meta.lang.clone()),
            meta,
            modified,
        })
    }

    fn canonical(prefix: &UrlPath, doc: &ScannedDocument) -> UrlPath {
        if let Some(permalink) = doc.meta.permalink.as_deref().filter(|p| !p.trim().is_empty()) {
            return UrlPath::new(permalink);
        }
        let relative = match doc.meta.slug.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(slug) => slug.to_string(),
            None => strip_index(&doc.stem).to_string(),
        };
        prefix.join(&relative)
    }
}

/// Base locales a file-name suffix may name: enabled languages plus the
/// default one.
fn known_locales(settings: &dyn SettingsReader) -> Vec<String> {
    let mut known: Vec<String> = enabled_languages(settings)
        .iter()
        .map(|code| base_locale(code))
        .collect();
    let default = base_locale(&default_language(settings));
    if !known.contains(&default) {
        known.push(default);
    }
    known
}

/// `about.fr` → (`about`, `fr`) when `fr` is a known locale;
/// `release.api` and `v1.2` stay untouched.
fn split_language_tag<'a>(relative: &'a str, known: &[String]) -> (&'a str, Option<&'a str>) {
    if let Some((stem, tag)) = relative.rsplit_once('.')
        && !tag.contains('/')
        && RE_LOCALE_TAG.is_match(tag)
        && known.contains(&base_locale(tag))
    {
        return (stem, Some(tag));
    }
    (relative, None)
}

/// `blog/index` → `blog`, `index` → ``.
fn strip_index(stem: &str) -> &str {
    if stem == "index" {
        return "";
    }
    stem.strip_suffix("/index").unwrap_or(stem)
}

impl Source for PageSource {
    fn name(&self) -> SourceId {
        SourceId::Pages
    }

    fn try_collect(&self, run: &CollectRun) -> Result<Vec<UrlEntry>, SourceError> {
        let settings = run.settings();
        let known = known_locales(settings);
        let files = self.scan()?;
        let documents: Vec<ScannedDocument> = files
            .par_iter()
            .filter_map(|path| self.load(path, &known))
            .collect();

        let prefix_key = keys::scoped(&self.name().feature(), "prefix");
        let prefix = UrlPath::new(&settings.string(&prefix_key, "/"));
        let run_base = run
            .language
            .base()
            .unwrap_or_else(|| base_locale(&default_language(settings)));

        // Tagged documents replace untagged ones in place; first seen keeps its slot
        let mut slots: FxHashMap<UrlPath, usize> = FxHashMap::default();
        let mut chosen: Vec<(UrlPath, &ScannedDocument)> = Vec::new();
        for doc in &documents {
            if let Some(lang) = &doc.lang
                && base_locale(lang) != run_base
            {
                continue;
            }
            let canonical = Self::canonical(&prefix, doc);
            match slots.get(&canonical) {
                Some(&i) if doc.lang.is_some() && chosen[i].1.lang.is_none() => chosen[i].1 = doc,
                Some(_) => debug!("pages"; "duplicate document for `{}`", canonical),
                None => {
                    slots.insert(canonical.clone(), chosen.len());
                    chosen.push((canonical, doc));
                }
            }
        }

        let seo = SeoDefaults::resolve(self.name(), Slot::Item, settings);
        let entries = chosen
            .into_iter()
            .map(|(canonical, doc)| {
                let meta = &doc.meta;
                let title = meta
                    .title
                    .clone()
                    .unwrap_or_else(|| title_from_path(canonical.as_str()));
                run.entry(canonical, self.name())
                    .with_title(title)
                    .with_category(meta.category().unwrap_or(CATEGORY))
                    .with_lastmod(meta.lastmod().or(doc.modified))
                    .with_priority(meta.priority.map_or(seo.priority, Priority::new))
                    .with_changefreq(meta.changefreq().unwrap_or(seo.changefreq))
            })
            .collect();
        Ok(entries)
    }
}
