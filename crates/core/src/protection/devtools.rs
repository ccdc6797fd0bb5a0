//! Window-size devtools heuristic.

use jiff::{SignedDuration, Timestamp};

use super::interval::Interval;

/// Outer-minus-inner gap, in CSS pixels, above which devtools count as open.
pub const DEVTOOLS_THRESHOLD: u32 = 160;

/// How often the window size is sampled.
pub const DEVTOOLS_POLL_PERIOD: SignedDuration = SignedDuration::from_secs(1);

/// Window outer and inner dimensions, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowMetrics {
    /// `window.outerWidth`
    pub outer_width: u32,
    /// `window.innerWidth`
    pub inner_width: u32,
    /// `window.outerHeight`
    pub outer_height: u32,
    /// `window.innerHeight`
    pub inner_height: u32,
}

impl WindowMetrics {
    /// Horizontal space taken by browser chrome.
    pub fn width_gap(&self) -> u32 {
        self.outer_width.saturating_sub(self.inner_width)
    }

    /// Vertical space taken by browser chrome.
    pub fn height_gap(&self) -> u32 {
        self.outer_height.saturating_sub(self.inner_height)
    }
}

/// Edge-triggered detector: reports once per open, re-arms once closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevtoolsDetector {
    threshold: u32,
    open: bool,
}

impl Default for DevtoolsDetector {
    fn default() -> Self {
        Self::new(DEVTOOLS_THRESHOLD)
    }
}

impl DevtoolsDetector {
    /// Detector that trips above `threshold` pixels.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            open: false,
        }
    }

    /// Whether the last sample was over the threshold.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Feed a sample. Returns `true` only on the closed-to-open transition.
    pub fn check(&mut self, metrics: WindowMetrics) -> bool {
        let exceeded =
            metrics.width_gap() > self.threshold || metrics.height_gap() > self.threshold;

        let detected = exceeded && !self.open;
        self.open = exceeded;

        detected
    }
}

/// Detector driven by a polling interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevtoolsMonitor {
    detector: DevtoolsDetector,
    interval: Interval,
}

impl DevtoolsMonitor {
    /// Monitor with the default threshold and period, first due at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self::with_settings(DEVTOOLS_THRESHOLD, DEVTOOLS_POLL_PERIOD, start)
    }

    /// Monitor with a custom threshold and period.
    pub fn with_settings(threshold: u32, period: SignedDuration, start: Timestamp) -> Self {
        Self {
            detector: DevtoolsDetector::new(threshold),
            interval: Interval::new(period, start),
        }
    }

    /// Sample the window if a check is due. Returns `true` when devtools were
    /// just detected.
    pub fn poll(&mut self, now: Timestamp, metrics: impl FnOnce() -> WindowMetrics) -> bool {
        self.interval.poll(now) && self.detector.check(metrics())
    }

    /// Whether devtools currently look open.
    pub fn is_open(&self) -> bool {
        self.detector.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docked(gap: u32) -> WindowMetrics {
        WindowMetrics {
            outer_width: 1280 + gap,
            inner_width: 1280,
            outer_height: 800,
            inner_height: 800,
        }
    }

    #[test]
    fn threshold_is_strict() {
        let mut detector = DevtoolsDetector::default();

        assert!(!detector.check(docked(160)));
        assert!(detector.check(docked(161)));
    }

    #[test]
    fn reports_once_until_closed() {
        let mut detector = DevtoolsDetector::default();

        assert!(detector.check(docked(300)));
        assert!(!detector.check(docked(300)));
        assert!(detector.is_open());

        assert!(!detector.check(docked(0)));
        assert!(!detector.is_open());

        assert!(detector.check(docked(300)));
    }

    #[test]
    fn height_gap_counts_too() {
        let mut detector = DevtoolsDetector::default();

        assert!(detector.check(WindowMetrics {
            outer_width: 1000,
            inner_width: 1000,
            outer_height: 900,
            inner_height: 500,
        }));
    }

    #[test]
    fn monitor_only_samples_when_due() {
        let start = Timestamp::UNIX_EPOCH;
        let mut monitor = DevtoolsMonitor::new(start);
        let mut samples = 0;

        let early = monitor.poll(start + SignedDuration::from_millis(500), || {
            samples += 1;
            docked(400)
        });
        assert!(!early);
        assert_eq!(samples, 0);

        let due = monitor.poll(start + SignedDuration::from_secs(1), || {
            samples += 1;
            docked(400)
        });
        assert!(due);
        assert_eq!(samples, 1);
        assert!(monitor.is_open());
    }
}
