//! The page enhancer: four independent tasks over one page lifecycle.
//!
//! [`PageEnhancer`] wires the lazy image loader, background preloader, font
//! loader, and load-state signaler to an explicit event surface. The
//! embedder parses a [`Document`], installs the enhancer, and dispatches
//! lifecycle events as its platform produces them:
//!
//! ```
//! use pagelift::dom::Document;
//! use pagelift::enhance::{PageEnhancer, PageEvent, Platform};
//! use pagelift::config::EnhancerConfig;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut doc = Document::parse("<body><img loading=\"lazy\" data-src=\"a.png\"></body>");
//! pagelift::layout::flow_layout(&mut doc);
//!
//! let mut enhancer = PageEnhancer::new(EnhancerConfig::default(), Platform::default());
//! enhancer.install(&mut doc);
//! enhancer.dispatch(&mut doc, PageEvent::DomReady);
//! enhancer.dispatch(&mut doc, PageEvent::FullLoad);
//! enhancer.drive(&mut doc).await;
//! # }
//! ```

mod background;
mod fonts;
mod lazy;
mod signal;

pub use background::BackgroundPreloader;
pub use fonts::FontLoader;
pub use lazy::LazyImageLoader;
pub use signal::LoadSignaler;

use crate::animate::ScrollAnimator;
use crate::config::EnhancerConfig;
use crate::dom::{Document, ElementId, ReadyState};
use crate::fetch::ResourceFetcher;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Lifecycle events the embedder feeds into the enhancer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// The DOM finished parsing. Single-fire; duplicates are ignored.
    DomReady,
    /// Every sub-resource finished loading. Single-fire; duplicates are
    /// ignored.
    FullLoad,
    /// The viewport moved. Multi-fire; each dispatch re-checks proximity.
    Scrolled,
}

/// Page lifecycle progress. Strictly monotonic, never reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageState {
    Uninitialized,
    DomReady,
    FullyLoaded,
}

/// Capabilities the embedding platform exposes to the enhancer.
///
/// Every capability is optional; a missing one disables only the task that
/// needs it.
#[derive(Clone)]
pub struct Platform {
    /// Whether proximity observation is available. Without it, deferred
    /// images are never promoted.
    pub proximity_observer: bool,
    /// Whether a font-loading API is available. Without it, no font
    /// stylesheet is injected.
    pub font_api: bool,
    /// Transport for background preloads. Without it, candidates are
    /// counted but never fetched.
    pub fetcher: Option<Arc<dyn ResourceFetcher>>,
    /// Scroll-animation engine. Without it, initialization is skipped.
    pub animator: Option<Arc<dyn ScrollAnimator>>,
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            proximity_observer: true,
            font_api: true,
            fetcher: None,
            animator: None,
        }
    }
}

impl fmt::Debug for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform")
            .field("proximity_observer", &self.proximity_observer)
            .field("font_api", &self.font_api)
            .field("fetcher", &self.fetcher.is_some())
            .field("animator", &self.animator.is_some())
            .finish()
    }
}

impl Platform {
    pub fn with_fetcher(mut self, fetcher: Arc<dyn ResourceFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_animator(mut self, animator: Arc<dyn ScrollAnimator>) -> Self {
        self.animator = Some(animator);
        self
    }

    pub fn without_proximity_observer(mut self) -> Self {
        self.proximity_observer = false;
        self
    }

    pub fn without_font_api(mut self) -> Self {
        self.font_api = false;
        self
    }
}

/// Serializable summary of what one enhancement run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceReport {
    pub state: PageState,
    pub images_observed: usize,
    pub images_promoted: usize,
    pub backgrounds_found: usize,
    pub backgrounds_loaded: usize,
    pub backgrounds_failed: usize,
    pub backgrounds_skipped: usize,
    pub fonts_injected: usize,
}

/// Orchestrates the four enhancement tasks across the page lifecycle.
pub struct PageEnhancer {
    config: EnhancerConfig,
    state: PageState,
    installed: bool,
    lazy: LazyImageLoader,
    backgrounds: BackgroundPreloader,
    fonts: FontLoader,
    signaler: LoadSignaler,
}

impl PageEnhancer {
    pub fn new(config: EnhancerConfig, platform: Platform) -> Self {
        let lazy = LazyImageLoader::new(&config, platform.proximity_observer);
        let backgrounds = BackgroundPreloader::new(platform.fetcher);
        let fonts = FontLoader::new(platform.font_api);
        let signaler = LoadSignaler::new(&config, platform.animator);
        Self {
            config,
            state: PageState::Uninitialized,
            installed: false,
            lazy,
            backgrounds,
            fonts,
            signaler,
        }
    }

    /// Stock configuration on a platform with no injected capabilities.
    pub fn with_defaults() -> Self {
        Self::new(EnhancerConfig::default(), Platform::default())
    }

    /// Attach to a document. Runs once; re-installs are ignored.
    ///
    /// Clears the `no-js` marker immediately. When the document is already
    /// past [`ReadyState::Loading`], DOM-ready work runs right here instead
    /// of waiting for the event, mirroring a script evaluated after parse.
    pub fn install(&mut self, doc: &mut Document) {
        if self.installed {
            return;
        }
        self.installed = true;

        if let Some(base) = self.config.base_url.clone() {
            match Url::parse(&base) {
                Ok(url) => doc.set_base_url(url),
                Err(error) => warn!(base, %error, "ignoring unparsable base url"),
            }
        }

        self.signaler.clear_noscript_marker(doc);

        if doc.ready_state() != ReadyState::Loading {
            debug!("document already parsed at install, running dom-ready work now");
            self.run_dom_ready(doc);
        }
    }

    /// Feed a lifecycle event. Out-of-order and duplicate events never move
    /// the state backwards; a `FullLoad` arriving before `DomReady` runs the
    /// deferred DOM-ready work first so the ordering invariant holds.
    pub fn dispatch(&mut self, doc: &mut Document, event: PageEvent) {
        match event {
            PageEvent::DomReady => {
                if self.state == PageState::Uninitialized {
                    self.run_dom_ready(doc);
                }
            }
            PageEvent::FullLoad => {
                if self.state == PageState::Uninitialized {
                    debug!("full load before dom ready, running deferred dom-ready work first");
                    self.run_dom_ready(doc);
                }
                if self.state == PageState::DomReady {
                    self.run_full_load(doc);
                }
            }
            PageEvent::Scrolled => {
                self.lazy.poll(doc);
            }
        }
    }

    fn run_dom_ready(&mut self, doc: &mut Document) {
        info!("dom ready");
        self.state = PageState::DomReady;
        if doc.ready_state() == ReadyState::Loading {
            doc.set_ready_state(ReadyState::Interactive);
        }

        self.lazy.scan(doc);
        // Elements already inside the proximity region load without any
        // scroll event.
        self.lazy.poll(doc);
        self.backgrounds.scan(doc);
        self.fonts.inject_primary(doc, &self.config.primary_font_url);
        self.signaler.mark_dom_ready(doc);
    }

    fn run_full_load(&mut self, doc: &mut Document) {
        info!("page fully loaded");
        self.state = PageState::FullyLoaded;
        doc.set_ready_state(ReadyState::Complete);

        self.fonts.inject_secondary(doc, &self.config.secondary_font_url);
        self.signaler.mark_fully_loaded(doc);
    }

    /// Re-check proximity and promote any newly nearby deferred images.
    /// Equivalent to dispatching [`PageEvent::Scrolled`].
    pub fn poll(&mut self, doc: &mut Document) -> Vec<ElementId> {
        self.lazy.poll(doc)
    }

    /// Await all pending background preloads, applying `loaded` classes as
    /// they complete. Returns the number of elements newly marked.
    pub async fn drive(&mut self, doc: &mut Document) -> usize {
        self.backgrounds.drain(doc).await
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    /// Snapshot of the counters so far.
    pub fn report(&self) -> EnhanceReport {
        EnhanceReport {
            state: self.state,
            images_observed: self.lazy.observed(),
            images_promoted: self.lazy.promoted(),
            backgrounds_found: self.backgrounds.found(),
            backgrounds_loaded: self.backgrounds.loaded(),
            backgrounds_failed: self.backgrounds.failed(),
            backgrounds_skipped: self.backgrounds.skipped(),
            fonts_injected: self.fonts.injected_count(),
        }
    }
}
