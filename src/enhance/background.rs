//! Eager background image preloading.
//!
//! Elements styling themselves with `background-image: url(...)` get the
//! referenced resource fetched off-DOM as soon as the document is scanned.
//! A successful fetch marks the owning element `loaded`; failures are logged
//! and dropped, never retried.

use crate::dom::{first_background_url, Document, ElementId};
use crate::error::FetchError;
use crate::fetch::{FetchedResource, ResourceFetcher};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use url::Url;

/// Scans for inline background images and preloads them.
pub struct BackgroundPreloader {
    fetcher: Option<Arc<dyn ResourceFetcher>>,
    pending: JoinSet<(ElementId, Result<FetchedResource, FetchError>)>,
    found: usize,
    skipped: usize,
    loaded: usize,
    failed: usize,
}

impl BackgroundPreloader {
    /// Without a fetcher capability, scanning still counts candidates but no
    /// preload is issued and no element ever gains the `loaded` class.
    pub fn new(fetcher: Option<Arc<dyn ResourceFetcher>>) -> Self {
        Self {
            fetcher,
            pending: JoinSet::new(),
            found: 0,
            skipped: 0,
            loaded: 0,
            failed: 0,
        }
    }

    /// Scan the document and spawn a preload per extractable URL.
    ///
    /// The first `url(...)` in an element's serialized style wins; entries
    /// with no extractable URL are skipped silently. Must run inside a tokio
    /// runtime when a fetcher is configured.
    pub fn scan(&mut self, doc: &Document) -> usize {
        let mut found = 0;
        for id in doc.background_image_candidates() {
            let css = doc.element(id).style().to_css();
            let Some(raw) = first_background_url(&css) else {
                self.skipped += 1;
                debug!(element = %id, "no extractable background url, skipping");
                continue;
            };

            found += 1;
            let target = resolve_url(doc.base_url(), raw);
            match &self.fetcher {
                Some(fetcher) => {
                    let fetcher = Arc::clone(fetcher);
                    self.pending
                        .spawn(async move { (id, fetcher.fetch(&target).await) });
                }
                None => {
                    debug!(element = %id, url = %target, "no fetcher capability, preload not issued");
                }
            }
        }
        self.found += found;
        found
    }

    /// Await every pending preload and mark the successful ones `loaded`.
    /// Returns the number of elements newly marked.
    pub async fn drain(&mut self, doc: &mut Document) -> usize {
        let mut newly_loaded = 0;
        while let Some(joined) = self.pending.join_next().await {
            match joined {
                Ok((id, Ok(resource))) => {
                    doc.element_mut(id).add_class("loaded");
                    self.loaded += 1;
                    newly_loaded += 1;
                    debug!(
                        element = %id,
                        url = %resource.url,
                        bytes = resource.bytes,
                        "background image preloaded"
                    );
                }
                Ok((id, Err(error))) => {
                    self.failed += 1;
                    warn!(element = %id, %error, "background preload failed");
                }
                Err(error) => {
                    self.failed += 1;
                    warn!(%error, "background preload task aborted");
                }
            }
        }
        newly_loaded
    }

    pub fn found(&self) -> usize {
        self.found
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

/// Resolve a raw style URL against the document base, falling back to the
/// raw text when there is no base or the join fails.
fn resolve_url(base: Option<&Url>, raw: &str) -> String {
    match base {
        Some(base) => base
            .join(raw)
            .map(|resolved| resolved.to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => raw.to_string(),
    }
}
