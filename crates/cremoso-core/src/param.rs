//! Parameter smoothing for zipper-free control changes.
//!
//! Audio parameters (drive, tone, level) need smooth transitions to avoid
//! audible "zipper noise" when a knob moves. [`SmoothedParam`] ramps the
//! current value linearly toward the target over a configured window,
//! landing on the target exactly.
//!
//! A linear ramp (rather than an exponential one-pole) is used because it
//! reaches the target in a known, fixed number of samples: the full
//! smoothing window. That makes convergence testable and keeps a moving
//! control from trailing off asymptotically.
//!
//! ## Usage
//!
//! ```rust
//! use cremoso_core::SmoothedParam;
//!
//! let mut drive = SmoothedParam::new(0.5);
//! drive.configure(48000.0, 0.05).unwrap(); // 50 ms window
//!
//! drive.set_target(1.0);
//! // In the audio callback, pull one value per sample frame
//! for _ in 0..2400 {
//!     let _d = drive.advance();
//! }
//! assert!(drive.current() == 1.0);
//! ```

use crate::error::ConfigError;

/// A control value that ramps linearly toward its target.
///
/// # Invariants
///
/// - `current` converges monotonically toward `target` over the configured
///   window whenever the target changes
/// - once `current == target`, [`advance`](Self::advance) returns `target`
///   unchanged
/// - reconfiguring (e.g. on a sample-rate change) preserves `current` as the
///   starting point of the new ramp — no value discontinuity
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    /// Current smoothed value.
    current: f32,
    /// Target value the ramp is heading toward.
    target: f32,
    /// Per-sample increment (positive or negative) while ramping.
    increment: f32,
    /// Samples remaining until the target is reached.
    samples_remaining: u32,
    /// Full ramp length in samples, derived from rate × window.
    ramp_samples: u32,
}

impl SmoothedParam {
    /// Create a new parameter resting at `initial`.
    ///
    /// Smoothing is disabled (instant changes) until
    /// [`configure`](Self::configure) is called.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            increment: 0.0,
            samples_remaining: 0,
            ramp_samples: 0,
        }
    }

    /// Set the sample rate and smoothing window, re-deriving the step size.
    ///
    /// The current value is preserved and becomes the starting point of a
    /// fresh ramp toward the target, so a sample-rate change mid-trajectory
    /// never produces a jump.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSampleRate`] if `sample_rate` is not positive
    /// and finite; [`ConfigError::InvalidSmoothingWindow`] if
    /// `window_seconds` is negative or not finite.
    pub fn configure(&mut self, sample_rate: f32, window_seconds: f32) -> Result<(), ConfigError> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate { sample_rate });
        }
        if !(window_seconds.is_finite() && window_seconds >= 0.0) {
            return Err(ConfigError::InvalidSmoothingWindow {
                seconds: window_seconds,
            });
        }
        self.ramp_samples = (window_seconds * sample_rate) as u32;
        self.restart_ramp();
        Ok(())
    }

    /// Record a new target without disturbing the current value.
    ///
    /// A fresh ramp starts from `current` and lands on the target after one
    /// full smoothing window. Setting the target it already has is a no-op.
    pub fn set_target(&mut self, target: f32) {
        if target == self.target {
            return;
        }
        self.target = target;
        self.restart_ramp();
    }

    /// Jump straight to `value` with no ramp.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.increment = 0.0;
        self.samples_remaining = 0;
    }

    /// Advance by one sample and return the new current value.
    ///
    /// Call exactly once per sample frame (not once per channel). At
    /// convergence this keeps returning the target unchanged.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.samples_remaining > 0 {
            self.current += self.increment;
            self.samples_remaining -= 1;
            if self.samples_remaining == 0 {
                // land exactly, no float residue
                self.current = self.target;
            }
        }
        self.current
    }

    /// Read the current value without advancing.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Read the target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether the ramp has reached its target.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.samples_remaining == 0
    }

    /// Finish the ramp immediately.
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
        self.increment = 0.0;
        self.samples_remaining = 0;
    }

    /// Start a ramp from `current` toward `target` over the full window.
    fn restart_ramp(&mut self) {
        if self.ramp_samples == 0 || self.current == self.target {
            self.current = self.target;
            self.increment = 0.0;
            self.samples_remaining = 0;
        } else {
            self.increment = (self.target - self.current) / self.ramp_samples as f32;
            self.samples_remaining = self.ramp_samples;
        }
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}
