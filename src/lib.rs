//! PageLift: a page enhancement runtime for parsed HTML documents.
//!
//! One enhancer run per page load, four independent tasks: proximity-driven
//! lazy image loading, eager background image preloading, staged web font
//! injection, and load-state signaling. The embedding platform supplies the
//! optional capabilities (fetcher, scroll animator, observer and font API
//! support) and feeds lifecycle events; everything the runtime cannot do is
//! skipped silently rather than surfaced as an error.

pub mod animate;
pub mod config;
pub mod dom;
pub mod enhance;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod observer;
pub mod viewport;

pub use animate::{AnimationSettings, Easing, ScrollAnimator};
pub use config::EnhancerConfig;
pub use dom::{Document, Element, ElementId, ReadyState};
pub use enhance::{EnhanceReport, PageEnhancer, PageEvent, PageState, Platform};
pub use error::{EnhanceError, FetchError};
pub use fetch::{FetchedResource, HttpFetcher, ResourceFetcher};
pub use observer::ProximityObserver;
pub use viewport::{Margin, Rect, Viewport};
