//! Periodic debug reporting.
//!
//! [`DebugReporter`] is a polled timer: the tick cycle feeds it elapsed
//! seconds and it reports `true` once per interval. The caller decides what
//! to log.

use crate::config::DebugConfig;

/// Fires once every `interval_seconds` of simulated time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugReporter {
    interval_seconds: f32,
    elapsed: f32,
}

impl DebugReporter {
    /// Build a reporter from config. Returns `None` when reporting is off
    /// or the interval is not positive.
    pub fn from_config(config: &DebugConfig) -> Option<Self> {
        let usable = config.interval_seconds.is_finite() && config.interval_seconds > 0.0;
        (config.enabled && usable).then_some(Self {
            interval_seconds: config.interval_seconds,
            elapsed: 0.0,
        })
    }

    /// Add `dt` seconds and report whether an interval has passed.
    ///
    /// At most one report is due per poll, even after a long step. A
    /// negative or non-finite `dt` reports nothing and is not counted.
    pub fn poll(&mut self, dt: f32) -> bool {
        if !dt.is_finite() || dt < 0.0 {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.interval_seconds {
            self.elapsed = self.elapsed.rem_euclid(self.interval_seconds);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn disabled_config_builds_nothing() {
        assert!(DebugReporter::from_config(&DebugConfig::default()).is_none());
        let zero = DebugConfig {
            enabled: true,
            interval_seconds: 0.0,
        };
        assert!(DebugReporter::from_config(&zero).is_none());
    }

    #[test]
    fn reports_once_per_interval() {
        let mut reporter = DebugReporter::from_config(&DebugConfig {
            enabled: true,
            interval_seconds: 5.0,
        })
        .unwrap();
        let fired: Vec<bool> = (0..12).map(|_| reporter.poll(1.0)).collect();
        let count = fired.iter().filter(|f| **f).count();
        assert_eq!(count, 2);
        assert_eq!(fired.get(4), Some(&true));
        assert_eq!(fired.get(9), Some(&true));
    }

    #[test]
    fn bad_steps_are_not_counted() {
        let mut reporter = DebugReporter::from_config(&DebugConfig {
            enabled: true,
            interval_seconds: 2.0,
        })
        .unwrap();
        assert!(!reporter.poll(1.5));
        let before = reporter;
        assert!(!reporter.poll(-1.0));
        assert!(!reporter.poll(f32::NAN));
        assert!(!reporter.poll(f32::INFINITY));
        assert_eq!(reporter, before);
        assert!(reporter.poll(0.5));
    }
}
