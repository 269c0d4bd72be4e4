//! The discussion countdown's value.
//!
//! This is only the number; the tick source that decrements it lives in
//! `impostor-tick` and is owned by the game actor.

use serde::{Deserialize, Serialize};

/// Remaining discussion time, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    total_secs: u32,
    remaining_secs: u32,
    paused: bool,
}

impl Countdown {
    pub fn new(total_secs: u32) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
            paused: false,
        }
    }

    /// Takes one second off, unless paused or already at zero.
    /// Returns `true` if the value changed.
    pub fn tick(&mut self) -> bool {
        if self.paused || self.remaining_secs == 0 {
            return false;
        }
        self.remaining_secs -= 1;
        true
    }

    /// Returns `true` if this call paused a running countdown.
    pub fn pause(&mut self) -> bool {
        !std::mem::replace(&mut self.paused, true)
    }

    /// Returns `true` if this call resumed a paused countdown.
    pub fn resume(&mut self) -> bool {
        std::mem::replace(&mut self.paused, false)
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    /// Fraction of time left, from 1.0 at the start to 0.0 at expiry.
    pub fn fraction_left(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        f64::from(self.remaining_secs) / f64::from(self.total_secs)
    }

    /// `mm:ss` rendering of the remaining time.
    pub fn clock(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

/// Formats seconds as zero-padded `mm:ss`. Minutes are not wrapped into
/// hours: 3725 seconds is `62:05`.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_decrements_until_zero() {
        let mut c = Countdown::new(2);
        assert!(c.tick());
        assert!(c.tick());
        assert!(c.is_expired());
        assert!(!c.tick());
        assert_eq!(c.remaining_secs(), 0);
    }

    #[test]
    fn test_paused_ticks_do_not_change_value() {
        let mut c = Countdown::new(300);
        c.tick();
        assert!(c.pause());
        for _ in 0..10 {
            assert!(!c.tick());
        }
        assert!(c.resume());
        assert_eq!(c.remaining_secs(), 299);
    }

    #[test]
    fn test_pause_resume_report_changes_only() {
        let mut c = Countdown::new(10);
        assert!(!c.resume());
        assert!(c.pause());
        assert!(!c.pause());
        assert!(c.resume());
    }

    #[test]
    fn test_format_clock_pads() {
        assert_eq!(format_clock(300), "05:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(3725), "62:05");
    }

    #[test]
    fn test_fraction_left() {
        let mut c = Countdown::new(4);
        assert_eq!(c.fraction_left(), 1.0);
        c.tick();
        assert_eq!(c.fraction_left(), 0.75);
    }
}
