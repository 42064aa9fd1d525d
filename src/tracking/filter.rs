//! Position sample filtering
//!
//! Turns the raw position stream into a stable one: stale and low-accuracy
//! samples are dropped, physically implausible jumps are rejected, and
//! accepted positions are blended with an exponential moving average.
//! Rejections are silent by design and surface only in the logs.

use chrono::{DateTime, Duration, Utc};
use geo::Point;
use log::debug;

use crate::geo_math;

/// Tuning knobs for [`PositionFilter`]. Defaults fit pedestrian tracking on a
/// campus-sized area.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Samples older than this relative to "now" are discarded.
    pub stale_threshold: Duration,
    /// Samples reporting an accuracy radius above this are discarded.
    pub accuracy_max_m: f64,
    /// Highest plausible walking speed for the jump guard.
    pub jump_speed_mps: f64,
    /// Fixed slack added on top of the speed allowance.
    pub jump_slack_m: f64,
    /// EMA blend factor applied per accepted sample.
    pub smoothing_alpha: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            stale_threshold: Duration::seconds(10),
            accuracy_max_m: 100.0,
            jump_speed_mps: 7.0,
            jump_slack_m: 15.0,
            smoothing_alpha: 0.28,
        }
    }
}

/// Raw sample from the position source.
#[derive(Debug, Clone, Copy)]
pub struct PositionSample {
    /// Reported position (x = lng, y = lat).
    pub point: Point<f64>,
    /// Accuracy radius in meters, when the source reports one.
    pub accuracy_m: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
struct FilterState {
    /// Last accepted raw position; the jump guard compares raw against raw
    /// so smoothing lag cannot compound into false rejections.
    last_raw: Point<f64>,
    last_timestamp: DateTime<Utc>,
    smoothed: Point<f64>,
}

/// Per-session position filter.
///
/// Owned by exactly one tracking session; [`PositionFilter::reset`] returns
/// it to the uninitialized state.
#[derive(Debug, Clone, Default)]
pub struct PositionFilter {
    config: FilterConfig,
    state: Option<FilterState>,
}

impl PositionFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Offers a sample to the filter.
    ///
    /// Returns the new smoothed position, or `None` when the sample was
    /// rejected by one of the gates. The first accepted sample of a session
    /// passes through unsmoothed.
    pub fn offer(&mut self, sample: &PositionSample, now: DateTime<Utc>) -> Option<Point<f64>> {
        let age = now - sample.timestamp;
        if age > self.config.stale_threshold {
            debug!("Discarding stale sample ({} ms old)", age.num_milliseconds());
            return None;
        }

        if let Some(accuracy) = sample.accuracy_m {
            if accuracy > self.config.accuracy_max_m {
                debug!("Discarding low-accuracy sample ({accuracy:.0} m)");
                return None;
            }
        }

        if let Some(state) = &self.state {
            let elapsed = (sample.timestamp - state.last_timestamp).num_milliseconds();
            let dt = (elapsed as f64 / 1000.0).max(1.0);
            let moved = geo_math::geodesic_distance(state.last_raw, sample.point);
            if moved > self.config.jump_speed_mps * dt + self.config.jump_slack_m {
                debug!("Discarding implausible jump: {moved:.0} m in {dt:.1} s");
                return None;
            }
        }

        let smoothed = match &self.state {
            None => sample.point,
            Some(state) => {
                let alpha = self.config.smoothing_alpha;
                Point::new(
                    state.smoothed.x() + alpha * (sample.point.x() - state.smoothed.x()),
                    state.smoothed.y() + alpha * (sample.point.y() - state.smoothed.y()),
                )
            }
        };

        self.state = Some(FilterState {
            last_raw: sample.point,
            last_timestamp: sample.timestamp,
            smoothed,
        });

        Some(smoothed)
    }

    /// Last emitted smoothed position, if any sample has been accepted.
    pub fn smoothed(&self) -> Option<Point<f64>> {
        self.state.map(|state| state.smoothed)
    }

    /// True when no sample has been accepted for twice the stale threshold.
    /// Consumers may flag the last position as possibly outdated; it is not
    /// discarded.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.state
            .is_some_and(|state| now - state.last_timestamp > self.config.stale_threshold * 2)
    }

    /// Drops all session state.
    pub fn reset(&mut self) {
        self.state = None;
    }
}
