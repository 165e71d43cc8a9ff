// ABOUTME: Interpretation of 429 responses that advertise their quota through
// ABOUTME: X-Rate-Limit-Remaining and X-Rate-Limit-Reset headers.

use std::time::Duration;

use reqwest::header::HeaderMap;

pub const REMAINING_HEADER: &str = "x-rate-limit-remaining";
pub const RESET_HEADER: &str = "x-rate-limit-reset";

/// What a rate-limited response asks the client to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitSignal {
    /// Quota is spent but resets at the given epoch second.
    WaitUntil(i64),
    /// Quota is spent and no reset time was advertised.
    Exhausted,
    /// No explicit quota information; treat as an ordinary transient failure.
    Unspecified,
}

impl RateLimitSignal {
    /// Read the signal from the headers of a 429 response.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
        };

        if header(REMAINING_HEADER) != Some("0") {
            return RateLimitSignal::Unspecified;
        }

        match header(RESET_HEADER).and_then(|v| v.parse::<i64>().ok()) {
            Some(reset) => RateLimitSignal::WaitUntil(reset),
            None => RateLimitSignal::Exhausted,
        }
    }
}

/// Time to wait for a reset at `reset_epoch`, seen from `now_epoch`, plus grace.
pub fn wait_for_reset(reset_epoch: i64, now_epoch: i64, grace: Duration) -> Duration {
    let remaining = (reset_epoch - now_epoch).max(0) as u64;
    Duration::from_secs(remaining) + grace
}
