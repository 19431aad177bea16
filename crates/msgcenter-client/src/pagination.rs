//! Scroll-triggered pagination.

use std::time::Duration;

use tokio::time::Instant;

use crate::schedule::Throttle;

/// Default spacing between scroll checks.
pub const DEFAULT_SCROLL_THROTTLE: Duration = Duration::from_millis(200);

/// Default distance from the bottom, in pixels, that counts as "near".
pub const DEFAULT_THRESHOLD: f64 = 100.0;

/// Geometry of a scrolled container at one scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top.
    pub scroll_top: f64,
    /// Full height of the content.
    pub scroll_height: f64,
    /// Visible height of the container.
    pub client_height: f64,
}

impl ScrollMetrics {
    /// True when the bottom of the content is within `threshold` of the
    /// bottom of the viewport.
    #[must_use]
    pub fn near_bottom(&self, threshold: f64) -> bool {
        self.scroll_height - self.scroll_top <= self.client_height + threshold
    }
}

/// Decides when a scroll event should trigger loading the next page.
#[derive(Debug, Clone)]
pub struct ScrollPagination {
    throttle: Throttle,
    threshold: f64,
}

impl Default for ScrollPagination {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THROTTLE, DEFAULT_THRESHOLD)
    }
}

impl ScrollPagination {
    /// Create a controller with a check interval and a bottom threshold.
    #[must_use]
    pub const fn new(interval: Duration, threshold: f64) -> Self {
        Self {
            throttle: Throttle::new(interval),
            threshold,
        }
    }

    /// Handle a scroll event; returns true if a load-more should fire.
    ///
    /// Events arriving within the throttle interval of the last checked
    /// event are ignored.
    pub fn on_scroll(
        &mut self,
        metrics: ScrollMetrics,
        now: Instant,
        has_more: bool,
        loading: bool,
    ) -> bool {
        if !self.throttle.ready(now) {
            return false;
        }
        metrics.near_bottom(self.threshold) && has_more && !loading
    }
}
