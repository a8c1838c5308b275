//! Per-address throttling on `tower_governor`.
//!
//! `app.rs` installs two GCRA limiters keyed by [`ClientIpKeyExtractor`]: a
//! global one over every route and a stricter one over `POST /login`.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use axum::http::Request;
use tower_governor::{key_extractor::KeyExtractor, GovernorError};

use crate::auth::extractors::client_ip;

/// Keys requests by the same address the audit trail records. Requests
/// without a known address share one bucket.
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    trust_proxy: bool,
}

impl ClientIpKeyExtractor {
    pub fn new(trust_proxy: bool) -> Self {
        Self { trust_proxy }
    }
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn name(&self) -> &'static str {
        "client IP"
    }

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        Ok(client_ip(req.headers(), req.extensions(), self.trust_proxy)
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)))
    }

    fn key_name(&self, key: &Self::Key) -> Option<String> {
        Some(key.to_string())
    }
}

/// Bucket shape `(replenish_ms, burst)` admitting `max_requests` per
/// `window`: the whole budget up front, refilled evenly over the window.
pub fn bucket(max_requests: usize, window: Duration) -> (u64, u32) {
    let burst = u32::try_from(max_requests.max(1)).unwrap_or(u32::MAX);
    let replenish_ms = (window.as_millis() / u128::from(burst)).max(1);
    (u64::try_from(replenish_ms).unwrap_or(u64::MAX), burst)
}
