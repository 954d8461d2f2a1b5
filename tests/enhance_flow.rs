//! End-to-end enhancement flow over a realistic page.

use pagelift::animate::{AnimationSettings, ScrollAnimator};
use pagelift::config::EnhancerConfig;
use pagelift::dom::Document;
use pagelift::enhance::{PageEnhancer, PageEvent, PageState, Platform};
use pagelift::fetch::HttpFetcher;
use pagelift::layout::flow_layout;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct RecordingAnimator {
    inits: Mutex<Vec<AnimationSettings>>,
}

impl ScrollAnimator for RecordingAnimator {
    fn init(&self, settings: &AnimationSettings) {
        self.inits.lock().unwrap().push(settings.clone());
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("pagelift=debug")
        .with_test_writer()
        .try_init();
}

fn page_html(server_uri: &str) -> String {
    format!(
        r#"<html class="no-js">
        <head><title>demo</title></head>
        <body>
            <div class="preloader" style="display: flex"></div>
            <img loading="lazy" data-src="a.png" height="100">
            <div height="3000"></div>
            <img loading="lazy" data-src="b.png" data-srcset="b.png 1x" height="100">
            <div style="background-image: url({server_uri}/hero.png)"></div>
            <div style="background-image: url({server_uri}/missing.png)"></div>
            <div style="background-image: none"></div>
        </body>
        </html>"#
    )
}

async fn mock_image_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hero.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0u8; 256])
                .insert_header("content-type", "image/png"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn full_page_lifecycle() {
    init_tracing();
    let server = mock_image_server().await;

    let mut doc = Document::parse(&page_html(&server.uri()));
    flow_layout(&mut doc);

    let animator = Arc::new(RecordingAnimator::default());
    let fetcher = Arc::new(HttpFetcher::new().unwrap());
    let platform = Platform::default()
        .with_fetcher(fetcher)
        .with_animator(animator.clone());

    let mut enhancer = PageEnhancer::new(EnhancerConfig::default(), platform);
    enhancer.install(&mut doc);
    assert!(!doc.element(doc.root()).has_class("no-js"));

    // DOM ready: near image promotes immediately, far image stays deferred,
    // background preloads are in flight, primary font is in the head.
    enhancer.dispatch(&mut doc, PageEvent::DomReady);

    let images = doc.lazy_images();
    assert_eq!(doc.element(images[0]).attr("src"), Some("a.png"));
    assert!(doc.element(images[0]).has_class("loaded"));
    assert_eq!(doc.element(images[1]).attr("src"), None);

    let body = doc.element(doc.body().unwrap());
    assert!(body.has_class("loaded"));
    assert!(!body.has_class("fully-loaded"));
    assert_eq!(animator.inits.lock().unwrap().len(), 1);

    // Background preloads settle: one success, one 404 left unmarked.
    enhancer.drive(&mut doc).await;
    let backgrounds = doc.background_image_candidates();
    assert!(doc.element(backgrounds[0]).has_class("loaded"));
    assert!(!doc.element(backgrounds[1]).has_class("loaded"));
    assert!(!doc.element(backgrounds[2]).has_class("loaded"));

    // Scrolling down brings the far image into the pre-trigger margin.
    doc.scroll_to(0.0, 2600.0);
    enhancer.dispatch(&mut doc, PageEvent::Scrolled);
    assert_eq!(doc.element(images[1]).attr("src"), Some("b.png"));
    assert_eq!(doc.element(images[1]).attr("srcset"), Some("b.png 1x"));

    // Full load: final gate class, preloader hidden, secondary font in.
    enhancer.dispatch(&mut doc, PageEvent::FullLoad);
    let body = doc.element(doc.body().unwrap());
    assert!(body.has_class("fully-loaded"));

    let preloader = doc.first_by_class("preloader").unwrap();
    assert_eq!(doc.element(preloader).style().get("display"), Some("none"));

    let head = doc.head().unwrap();
    let stylesheets: Vec<&str> = doc
        .element(head)
        .children()
        .iter()
        .filter(|id| doc.element(**id).tag() == "link")
        .filter_map(|id| doc.element(*id).attr("href"))
        .collect();
    assert_eq!(stylesheets.len(), 2);
    assert!(stylesheets[0].contains("DM+Sans"));
    assert!(stylesheets[1].contains("Amatic+SC"));

    assert_json_diff::assert_json_include!(
        actual: serde_json::to_value(enhancer.report()).unwrap(),
        expected: serde_json::json!({
            "state": "fully-loaded",
            "images_observed": 2,
            "images_promoted": 2,
            "backgrounds_found": 2,
            "backgrounds_loaded": 1,
            "backgrounds_failed": 1,
            "backgrounds_skipped": 1,
            "fonts_injected": 2,
        })
    );
}

#[tokio::test]
async fn degraded_platform_enhances_nothing_and_stays_quiet() {
    init_tracing();

    let mut doc = Document::parse(&page_html("https://unreachable.invalid"));
    flow_layout(&mut doc);

    let platform = Platform::default()
        .without_proximity_observer()
        .without_font_api();
    let mut enhancer = PageEnhancer::new(EnhancerConfig::default(), platform);

    enhancer.install(&mut doc);
    enhancer.dispatch(&mut doc, PageEvent::DomReady);
    enhancer.drive(&mut doc).await;
    enhancer.dispatch(&mut doc, PageEvent::FullLoad);

    // Lazy images never promote without proximity observation.
    for id in doc.lazy_images() {
        assert_eq!(doc.element(id).attr("src"), None);
    }
    // No font API, no links.
    let head = doc.head().unwrap();
    assert!(doc
        .element(head)
        .children()
        .iter()
        .all(|id| doc.element(*id).tag() != "link"));
    // No fetcher, no loaded backgrounds.
    for id in doc.background_image_candidates() {
        assert!(!doc.element(id).has_class("loaded"));
    }

    // Load-state signaling still works on the degraded platform.
    let body = doc.element(doc.body().unwrap());
    assert!(body.has_class("loaded"));
    assert!(body.has_class("fully-loaded"));
    assert_eq!(enhancer.state(), PageState::FullyLoaded);
}

#[tokio::test]
async fn data_url_backgrounds_load_without_network() {
    init_tracing();

    let mut doc = Document::parse(
        r#"<body>
            <div style="background-image: url(data:image/gif;base64,R0lGODlh)"></div>
        </body>"#,
    );
    flow_layout(&mut doc);

    let platform = Platform::default().with_fetcher(Arc::new(HttpFetcher::new().unwrap()));
    let mut enhancer = PageEnhancer::new(EnhancerConfig::default(), platform);
    enhancer.install(&mut doc);
    enhancer.dispatch(&mut doc, PageEvent::DomReady);
    enhancer.drive(&mut doc).await;

    let id = doc.background_image_candidates()[0];
    assert!(doc.element(id).has_class("loaded"));
}
