//! Collection orchestration.
//!
//! - Asks every registered source whether it is enabled
//! - Runs enabled sources inside a failure boundary, optionally in parallel
//! - Merges results in registration order and drops duplicate `loc`s,
//!   first occurrence wins
//!
//! Collection always succeeds: a source that errors, panics or misses its
//! deadline contributes an empty list.


use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, RecvTimeoutError};
use rustc_hash::FxHashSet;

use crate::backend::RecordStore;
use crate::core::UrlEntry;
use crate::language::{AlternateMap, LanguageContext, contexts_for_install, group_alternates};
use crate::route::RouteTable;
use crate::settings::SettingsReader;
use crate::source::{
    BlogSource, CollectRun, EntitySource, PageSource, PostSource, RouteDiscoverySource, Source,
    SourceId, StaticSource,
};
use crate::{debug, log};

/// Per-source deadline used when none is configured.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy)]
pub struct CollectorOptions {
    /// Run sources on worker threads (one per enabled source).
    pub parallel: bool,
    /// Per-source deadline; only enforced in parallel mode.
    pub source_timeout: Option<Duration>,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            source_timeout: Some(DEFAULT_SOURCE_TIMEOUT),
        }
    }
}

impl CollectorOptions {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            source_timeout: None,
        }
    }
}

/// Entries collected for one language
#[derive(Debug, Clone)]
pub struct LanguageRun {
    pub language: LanguageContext,
    pub entries: Vec<UrlEntry>,
}

/// hreflang alternates across language runs.
pub fn alternates(runs: &[LanguageRun]) -> AlternateMap {
    group_alternates(runs.iter().map(|r| (&r.language, r.entries.as_slice())))
}

/// Drop entries whose `loc` was already seen, keeping order.
pub fn dedup<I>(batches: I) -> Vec<UrlEntry>
where
    I: IntoIterator<Item = Vec<UrlEntry>>,
{
    let mut seen = FxHashSet::default();
    batches
        .into_iter()
        .flatten()
        .filter(|entry| seen.insert(entry.loc.clone()))
        .collect()
}

pub struct Collector {
    settings: Arc<dyn SettingsReader>,
    routes: Option<Arc<RouteTable>>,
    sources: Vec<Arc<dyn Source>>,
    options: CollectorOptions,
}

impl Collector {
    pub fn new(settings: Arc<dyn SettingsReader>, routes: Option<Arc<RouteTable>>) -> Self {
        Self {
            settings,
            routes,
            sources: Vec::new(),
            options: CollectorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CollectorOptions) -> Self {
        self.options = options;
        self
    }

    /// Append a source; registration order is dedup priority.
    pub fn register(mut self, source: impl Source + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// The built-in sources in their standard order: static, pages,
    /// entities, posts, blogging, route discovery.
    ///
    /// Record-backed sources need a store, the page source a directory.
    pub fn with_default_sources(
        mut self,
        store: Option<Arc<dyn RecordStore>>,
        pages_dir: Option<PathBuf>,
    ) -> Self {
        self = self.register(StaticSource);
        if let Some(dir) = pages_dir {
            self = self.register(PageSource::new(dir));
        }
        if let Some(store) = store {
            self = self
                .register(EntitySource::new(Arc::clone(&store)))
                .register(PostSource::new(Arc::clone(&store)))
                .register(BlogSource::new(store));
        }
        self.register(RouteDiscoverySource)
    }

    /// Registered source ids, in order.
    pub fn source_ids(&self) -> Vec<SourceId> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn options(&self) -> CollectorOptions {
        self.options
    }

    /// Collect for one language.
    pub fn collect(&self, language: &LanguageContext) -> Vec<UrlEntry> {
        let run = Arc::new(CollectRun::new(
            Arc::clone(&self.settings),
            language.clone(),
            self.routes.clone(),
        ));

        let enabled: Vec<Arc<dyn Source>> = self
            .sources
            .iter()
            .filter(|source| self.is_enabled(source.as_ref()))
            .cloned()
            .collect();

        let batches = if self.options.parallel {
            self.collect_parallel(&enabled, &run)
        } else {
            enabled
                .iter()
                .map(|source| collect_guarded(source.as_ref(), &run))
                .collect()
        };

        for (source, batch) in enabled.iter().zip(&batches) {
            debug!("collect"; "{}: {} entries", source.name(), batch.len());
        }

        let entries = dedup(batches);
        debug!("collect"; "{} unique entries", entries.len());
        entries
    }

    /// Collect for a requested language, resolved against the install.
    pub fn collect_for(&self, requested: Option<&str>) -> Vec<UrlEntry> {
        self.collect(&LanguageContext::resolve(self.settings.as_ref(), requested))
    }

    /// One run per enabled language (a single run in single-language mode).
    pub fn collect_languages(&self) -> Vec<LanguageRun> {
        contexts_for_install(self.settings.as_ref())
            .into_iter()
            .map(|language| {
                let entries = self.collect(&language);
                LanguageRun { language, entries }
            })
            .collect()
    }

    fn is_enabled(&self, source: &dyn Source) -> bool {
        let check = catch_unwind(AssertUnwindSafe(|| source.enabled(self.settings.as_ref())));
        check.unwrap_or_else(|_| {
            log!("warning"; "{}: enabled check panicked, treating as disabled", source.name());
            false
        })
    }

    /// One worker per source; results re-imposed in registration order.
    fn collect_parallel(
        &self,
        sources: &[Arc<dyn Source>],
        run: &Arc<CollectRun>,
    ) -> Vec<Vec<UrlEntry>> {
        let deadline = self.options.source_timeout.map(|t| Instant::now() + t);

        let workers: Vec<(SourceId, Option<Receiver<Vec<UrlEntry>>>)> = sources
            .iter()
            .map(|source| {
                let id = source.name();
                let (tx, rx) = channel::bounded(1);
                let source = Arc::clone(source);
                let run = Arc::clone(run);
                let spawned = thread::Builder::new()
                    .name(format!("canonry-{id}"))
                    .spawn(move || {
                        let _ = tx.send(source.collect(&run));
                    });
                match spawned {
                    Ok(_) => (id, Some(rx)),
                    Err(e) => {
                        log!("warning"; "{}: cannot spawn worker: {}", id, e);
                        (id, None)
                    }
                }
            })
            .collect();

        workers
            .into_iter()
            .map(|(id, rx)| {
                let Some(rx) = rx else {
                    return Vec::new();
                };
                let received = match deadline {
                    Some(deadline) => rx.recv_deadline(deadline),
                    None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
                };
                received.unwrap_or_else(|e| {
                    match e {
                        RecvTimeoutError::Timeout => log!("warning"; "{}: timed out", id),
                        RecvTimeoutError::Disconnected => {
                            log!("warning"; "{}: worker panicked", id)
                        }
                    }
                    Vec::new()
                })
            })
            .collect()
    }
}

/// Run one source, containing panics.
fn collect_guarded(source: &dyn Source, run: &CollectRun) -> Vec<UrlEntry> {
    catch_unwind(AssertUnwindSafe(|| source.collect(run))).unwrap_or_else(|_| {
        log!("warning"; "{}: panicked during collection", source.name());
        Vec::new()
    })
}
