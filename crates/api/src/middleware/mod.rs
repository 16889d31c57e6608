//! HTTP middleware components.

pub mod auth;
pub mod authorize;
pub mod logging;
pub mod metrics;
pub mod rate_limit;
pub mod security_headers;
pub mod trace_id;

pub use auth::require_auth;
pub use authorize::require_permission;
pub use metrics::{
    init_metrics, metrics_handler, metrics_middleware, record_appeals_imported,
    record_search_query,
};
pub use rate_limit::{auth_rate_limit_middleware, rate_limit_middleware, RateLimiterState};
pub use security_headers::security_headers_middleware;
pub use trace_id::{trace_id, RequestId, REQUEST_ID_HEADER};
