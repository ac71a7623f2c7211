use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

pub const METRIC_HTTP_REDIRECT_TOTAL: &str = "folio_http_redirect_total";
pub const METRIC_HTTP_CRAWLER_HINT_TOTAL: &str = "folio_http_crawler_hint_total";
pub const METRIC_POST_NOT_FOUND_TOTAL: &str = "folio_post_not_found_total";
pub const METRIC_LISTING_DATE_FALLBACK_TOTAL: &str = "folio_listing_date_fallback_total";

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

/// Register descriptions for every counter the server emits. Idempotent.
pub fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            METRIC_HTTP_REDIRECT_TOTAL,
            Unit::Count,
            "Requests answered with a trailing-slash redirect."
        );
        describe_counter!(
            METRIC_HTTP_CRAWLER_HINT_TOTAL,
            Unit::Count,
            "Responses decorated with a preload hint for a recognised crawler."
        );
        describe_counter!(
            METRIC_POST_NOT_FOUND_TOTAL,
            Unit::Count,
            "Blog post requests whose slug matched no post."
        );
        describe_counter!(
            METRIC_LISTING_DATE_FALLBACK_TOTAL,
            Unit::Count,
            "Listing dates that could not be parsed and fell back to the current time."
        );
    });
}
