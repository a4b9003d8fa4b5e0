//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Requests per second and burst for the general API.
const API_PER_SECOND: u64 = 5;
const API_BURST: u32 = 100;

/// Stricter bucket for credential checks.
const LOGIN_PER_SECOND: u64 = 1;
const LOGIN_BURST: u32 = 10;

fn governor_layer<K>(
    key_extractor: K,
    per_second: u64,
    burst: u32,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>
where
    K: KeyExtractor,
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(per_second)
            .burst_size(burst)
            .finish()
            .expect("rate limit period and burst are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Applies the general rate limit to `router`.
///
/// # Limits
///
/// - **Rate**: 5 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Per client IP. With `behind_proxy` the IP is read from `X-Forwarded-For`,
/// `X-Real-IP` or `Forwarded`; otherwise from the socket peer address, which
/// requires serving with `into_make_service_with_connect_info`.
pub fn apply(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(governor_layer(SmartIpKeyExtractor, API_PER_SECOND, API_BURST))
    } else {
        router.layer(governor_layer(PeerIpKeyExtractor, API_PER_SECOND, API_BURST))
    }
}

/// Applies the login rate limit to `router`.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Slows down password guessing against `POST /login`.
pub fn apply_login(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(governor_layer(
            SmartIpKeyExtractor,
            LOGIN_PER_SECOND,
            LOGIN_BURST,
        ))
    } else {
        router.layer(governor_layer(
            PeerIpKeyExtractor,
            LOGIN_PER_SECOND,
            LOGIN_BURST,
        ))
    }
}
