use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("reviewdash.client.requests");
pub(crate) static CLIENT_TRANSPORT_ERRORS: Counter =
    Counter::new("reviewdash.client.transport_errors");
pub(crate) static CLIENT_BACKEND_REJECTIONS: Counter =
    Counter::new("reviewdash.client.backend_rejections");
pub(crate) static CLIENT_MALFORMED_RESPONSES: Counter =
    Counter::new("reviewdash.client.malformed_responses");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("reviewdash.client.request_duration_seconds");
pub(crate) static CLIENT_UPLOAD_BYTES: Counter = Counter::new("reviewdash.client.upload_bytes");

pub(crate) static SESSION_SUBMISSIONS: Counter = Counter::new("reviewdash.session.submissions");
pub(crate) static SESSION_IGNORED: Counter = Counter::new("reviewdash.session.ignored");
pub(crate) static SESSION_STALE_COMPLETIONS: Counter =
    Counter::new("reviewdash.session.stale_completions");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_TRANSPORT_ERRORS);
    collector.register_counter(&CLIENT_BACKEND_REJECTIONS);
    collector.register_counter(&CLIENT_MALFORMED_RESPONSES);
    collector.register_moments(&CLIENT_REQUEST_DURATION);
    collector.register_counter(&CLIENT_UPLOAD_BYTES);

    collector.register_counter(&SESSION_SUBMISSIONS);
    collector.register_counter(&SESSION_IGNORED);
    collector.register_counter(&SESSION_STALE_COMPLETIONS);
}
