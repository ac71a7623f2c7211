mod support;

use std::sync::OnceLock;

use axum::http::StatusCode;
use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
use serial_test::serial;

use folio::infra::telemetry::{
    METRIC_HTTP_CRAWLER_HINT_TOTAL, METRIC_HTTP_REDIRECT_TOTAL, METRIC_POST_NOT_FOUND_TOTAL,
    describe_metrics,
};
use support::{app, get};

fn snapshotter() -> &'static Snapshotter {
    static SNAPSHOTTER: OnceLock<Snapshotter> = OnceLock::new();
    SNAPSHOTTER.get_or_init(|| {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        recorder
            .install()
            .expect("debug metrics recorder should install in this test process");
        describe_metrics();
        snapshotter
    })
}

fn counter(name: &str) -> u64 {
    snapshotter()
        .snapshot()
        .into_vec()
        .into_iter()
        .find_map(|(key, _, _, value)| match value {
            DebugValue::Counter(count) if key.key().name() == name => Some(count),
            _ => None,
        })
        .unwrap_or(0)
}

#[tokio::test]
#[serial]
async fn redirects_are_counted() {
    let before = counter(METRIC_HTTP_REDIRECT_TOTAL);
    let app = app();

    let response = get(&app, "/blog/", None).await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    let response = get(&app, "/blog", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(counter(METRIC_HTTP_REDIRECT_TOTAL), before + 1);
}

#[tokio::test]
#[serial]
async fn crawler_hints_are_counted() {
    let before = counter(METRIC_HTTP_CRAWLER_HINT_TOTAL);
    let app = app();

    get(&app, "/", Some("PerplexityBot/1.0")).await;
    get(&app, "/", Some("Mozilla/5.0")).await;

    assert_eq!(counter(METRIC_HTTP_CRAWLER_HINT_TOTAL), before + 1);
}

#[tokio::test]
#[serial]
async fn missing_posts_are_counted() {
    let before = counter(METRIC_POST_NOT_FOUND_TOTAL);
    let app = app();

    let response = get(&app, "/blog/not-a-post", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(counter(METRIC_POST_NOT_FOUND_TOTAL), before + 1);
}
