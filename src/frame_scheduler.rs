//! Redraw scheduling and backlight timing.
//!
//! Three independent timers decide what a tick does: the animation timer
//! advances the frame counter, the poll timer gates all further work, and the
//! redraw timestamp drives the backlight timeout. The scheduler only keeps
//! time; the caller performs the drawing and drives the backlight pin.
//!
//! # Usage
//!
//! ```ignore
//! let mut scheduler = RedrawScheduler::new();
//!
//! loop {
//!     let now = Instant::from_millis(millis());
//!     if scheduler.animation_step(now, speed) {
//!         lights.tick(speed, &mut rng);
//!     }
//!     if !scheduler.poll_due(now) {
//!         continue;
//!     }
//!     if scheduler.begin_redraw(now) {
//!         // repaint
//!     }
//! }
//! ```

use embassy_time::{Duration, Instant};

/// Minimum time between two polls that may repaint.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Hue rotation per animation step.
pub const HUE_STEP: u8 = 5;

/// Time between animation steps for the given speed setting
///
/// Never increases with speed: 500 ms at speed 1, 50 ms at speed 10.
pub fn animation_interval(speed: u8) -> Duration {
    Duration::from_millis(1000 / (u64::from(speed.max(1)) * 2))
}

/// Timers and flags behind the redraw decisions
#[derive(Debug, Clone)]
pub struct RedrawScheduler {
    last_animation: Instant,
    last_update: Instant,
    last_redraw: Instant,
    /// Animation frame counter, wraps at 256
    frame: u8,
    /// Rotating hue, wraps at 256
    hue: u8,
    need_redraw: bool,
    backlight_off: bool,
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RedrawScheduler {
    /// Create a scheduler with all timers at zero and a redraw pending
    pub const fn new() -> Self {
        Self {
            last_animation: Instant::from_millis(0),
            last_update: Instant::from_millis(0),
            last_redraw: Instant::from_millis(0),
            frame: 0,
            hue: 0,
            need_redraw: true,
            backlight_off: false,
        }
    }

    /// Mark the display as accessed
    ///
    /// Returns `true` if the backlight was off and must be switched on.
    pub fn wake(&mut self) -> bool {
        let was_off = self.backlight_off;
        self.backlight_off = false;
        was_off
    }

    /// Advance the animation if its interval has elapsed
    ///
    /// Returns `true` when a step was taken; the caller then advances the
    /// lights. A step always requests a redraw.
    pub fn animation_step(&mut self, now: Instant, speed: u8) -> bool {
        if now.saturating_duration_since(self.last_animation) < animation_interval(speed) {
            return false;
        }
        self.last_animation = now;
        self.frame = self.frame.wrapping_add(1);
        self.hue = self.hue.wrapping_add(HUE_STEP);
        self.need_redraw = true;
        true
    }

    /// Check the coarse poll gate, restarting it when it has elapsed
    pub fn poll_due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_update) < POLL_INTERVAL {
            return false;
        }
        self.last_update = now;
        true
    }

    /// Check whether the backlight should go off
    ///
    /// Measured from the last full repaint, not the last animation step.
    /// Stays `true` until [`Self::mark_backlight_off`] records the switch.
    pub fn backlight_expired(&self, now: Instant, timeout: Option<Duration>) -> bool {
        let Some(timeout) = timeout else {
            return false;
        };
        !self.backlight_off && now.saturating_duration_since(self.last_redraw) > timeout
    }

    /// Record that the backlight was switched off
    pub fn mark_backlight_off(&mut self) {
        self.backlight_off = true;
    }

    /// Request a full repaint on the next poll
    pub fn request_redraw(&mut self) {
        self.need_redraw = true;
    }

    /// Consume a pending redraw request
    ///
    /// Returns `false` if nothing is pending. Otherwise the request is cleared
    /// and `now` becomes the last repaint time.
    pub fn begin_redraw(&mut self, now: Instant) -> bool {
        if !self.need_redraw {
            return false;
        }
        self.need_redraw = false;
        self.last_redraw = now;
        true
    }

    pub const fn frame(&self) -> u8 {
        self.frame
    }

    pub const fn hue(&self) -> u8 {
        self.hue
    }

    pub const fn needs_redraw(&self) -> bool {
        self.need_redraw
    }

    pub const fn is_backlight_off(&self) -> bool {
        self.backlight_off
    }

    pub const fn last_redraw(&self) -> Instant {
        self.last_redraw
    }
}
