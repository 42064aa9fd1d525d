//! Tracking session lifecycle and consumer fan-out

use chrono::{DateTime, Utc};
use geo::Point;
use log::info;

use super::filter::{FilterConfig, PositionFilter, PositionSample};

type Consumer = Box<dyn FnMut(Point<f64>)>;

/// A single tracking session.
///
/// Owns one [`PositionFilter`] and pushes every accepted smoothed position to
/// the registered consumers. Samples are processed one at a time on the
/// caller's thread; run one tracker per concurrent session.
#[derive(Default)]
pub struct PositionTracker {
    filter: PositionFilter,
    consumers: Vec<Consumer>,
    running: bool,
}

impl PositionTracker {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            filter: PositionFilter::new(config),
            consumers: Vec::new(),
            running: false,
        }
    }

    /// Registers a consumer for smoothed positions.
    pub fn subscribe(&mut self, consumer: impl FnMut(Point<f64>) + 'static) {
        self.consumers.push(Box::new(consumer));
    }

    pub fn start(&mut self) {
        if !self.running {
            info!("Tracking session started");
            self.running = true;
        }
    }

    /// Stops the session and discards all filter state.
    pub fn stop(&mut self) {
        if self.running {
            info!("Tracking session stopped");
            self.running = false;
        }
        self.filter.reset();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feeds one sample through the filter, fanning an accepted position out
    /// to all consumers. Samples offered while stopped are ignored.
    pub fn push(&mut self, sample: &PositionSample, now: DateTime<Utc>) -> Option<Point<f64>> {
        if !self.running {
            return None;
        }
        let smoothed = self.filter.offer(sample, now)?;
        for consumer in &mut self.consumers {
            consumer(smoothed);
        }
        Some(smoothed)
    }

    /// Last smoothed position of the current session.
    pub fn position(&self) -> Option<Point<f64>> {
        self.filter.smoothed()
    }

    /// True when the current position should be flagged as possibly outdated.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.filter.is_stale(now)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + seconds, 0).unwrap()
    }

    fn sample(lng: f64, seconds: i64) -> PositionSample {
        PositionSample {
            point: Point::new(lng, 0.0),
            accuracy_m: Some(5.0),
            timestamp: at(seconds),
        }
    }

    #[test]
    fn consumers_receive_accepted_positions() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut tracker = PositionTracker::default();
        tracker.subscribe(move |point| sink.borrow_mut().push(point));
        tracker.start();

        tracker.push(&sample(0.0, 0), at(1)).unwrap();
        tracker.push(&sample(0.0001, 5), at(6)).unwrap();

        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn rejected_samples_reach_no_consumer() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut tracker = PositionTracker::default();
        tracker.subscribe(move |point| sink.borrow_mut().push(point));
        tracker.start();

        tracker.push(&sample(0.0, 0), at(1)).unwrap();
        // Teleport; dropped by the jump guard
        assert!(tracker.push(&sample(0.5, 2), at(3)).is_none());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn samples_are_ignored_while_stopped() {
        let mut tracker = PositionTracker::default();
        assert!(tracker.push(&sample(0.0, 0), at(1)).is_none());

        tracker.start();
        tracker.push(&sample(0.0, 2), at(3)).unwrap();
        assert!(tracker.position().is_some());
    }

    #[test]
    fn stop_discards_session_state() {
        let mut tracker = PositionTracker::default();
        tracker.start();
        tracker.push(&sample(0.0, 0), at(1)).unwrap();

        tracker.stop();
        assert!(!tracker.is_running());
        assert!(tracker.position().is_none());

        // Restarting begins a fresh session; the next sample is "first"
        tracker.start();
        let smoothed = tracker.push(&sample(0.002, 10), at(11)).unwrap();
        assert_eq!(smoothed, Point::new(0.002, 0.0));
    }

    #[test]
    fn staleness_is_exposed_to_the_session() {
        let mut tracker = PositionTracker::default();
        tracker.start();
        tracker.push(&sample(0.0, 0), at(1)).unwrap();

        assert!(!tracker.is_stale(at(5)));
        assert!(tracker.is_stale(at(60)));
    }
}
