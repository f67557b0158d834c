//! Single-pole IIR filter with lowpass and highpass coefficient sets.
//!
//! One first-order section covers all three filters in the overdrive chain
//! (input high-pass, tone low-pass, output high-pass). The difference
//! equation is:
//!
//! ```text
//! y[n] = b0 * x[n] + b1 * x[n-1] - a1 * y[n-1]
//! ```
//!
//! with the pole placed at `a = exp(-2π * cutoff / sample_rate)`:
//!
//! - lowpass:  `b0 = 1 - a`, `b1 = 0`,        `a1 = -a`
//! - highpass: `b0 = (1 + a) / 2`, `b1 = -b0`, `a1 = -a`
//!
//! For any cutoff strictly between 0 Hz and Nyquist, `a` lies in (0, 1), so
//! every coefficient set this module produces is unconditionally stable.
//!
//! Coefficient computation is split in two, by call site:
//!
//! - [`OnePoleCoefficients::compute`] validates its inputs and returns a
//!   [`ConfigError`] — use it at configuration time
//! - [`lowpass_coefficients`] / [`highpass_coefficients`] clamp the cutoff
//!   into the valid band and cannot fail — use them on the block-rate
//!   refresh path once the sample rate has been validated
//!
//! # Reference
//!
//! Julius O. Smith III, "Introduction to Digital Filters with Audio
//! Applications", Section: One-Pole Filter.

use crate::error::ConfigError;
use crate::math::flush_denormal;
use libm::expf;

/// Lowest cutoff the clamped constructors will produce, in Hz.
const MIN_CUTOFF_HZ: f32 = 0.01;

/// Fraction of the sample rate the clamped constructors cap the cutoff at.
/// Kept below 0.5 so the pole never lands on the unit circle.
const MAX_CUTOFF_RATIO: f32 = 0.49;

/// Filter response shape of a first-order section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// 6 dB/oct low-pass (passes DC, attenuates highs).
    Lowpass,
    /// 6 dB/oct high-pass (blocks DC, passes highs).
    Highpass,
}

/// Coefficient set for one first-order IIR section.
///
/// A pure function of `(sample_rate, cutoff_hz, kind)` — holds no signal
/// state. Recompute whenever the sample rate or cutoff changes; stable to
/// share across a block otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnePoleCoefficients {
    /// Feedforward coefficient on x[n].
    b0: f32,
    /// Feedforward coefficient on x[n-1].
    b1: f32,
    /// Feedback coefficient on y[n-1] (negated in the difference equation).
    a1: f32,
}

impl OnePoleCoefficients {
    /// Compute a validated coefficient set.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSampleRate`] if `sample_rate` is not positive
    /// and finite; [`ConfigError::CutoffOutOfRange`] unless
    /// `0 < cutoff_hz < sample_rate / 2`.
    pub fn compute(
        sample_rate: f32,
        cutoff_hz: f32,
        kind: FilterKind,
    ) -> Result<Self, ConfigError> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate { sample_rate });
        }
        let nyquist_hz = sample_rate / 2.0;
        if !(cutoff_hz.is_finite() && cutoff_hz > 0.0 && cutoff_hz < nyquist_hz) {
            return Err(ConfigError::CutoffOutOfRange {
                cutoff_hz,
                nyquist_hz,
            });
        }
        Ok(match kind {
            FilterKind::Lowpass => Self::lowpass(sample_rate, cutoff_hz),
            FilterKind::Highpass => Self::highpass(sample_rate, cutoff_hz),
        })
    }

    /// Identity section (`y[n] = x[n]`) — the state of an unprepared filter.
    pub fn passthrough() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            a1: 0.0,
        }
    }

    /// Pole radius `a = exp(-2π * cutoff / sample_rate)`, in (0, 1).
    fn pole(sample_rate: f32, cutoff_hz: f32) -> f32 {
        expf(-core::f32::consts::TAU * cutoff_hz / sample_rate)
    }

    fn lowpass(sample_rate: f32, cutoff_hz: f32) -> Self {
        let a = Self::pole(sample_rate, cutoff_hz);
        Self {
            b0: 1.0 - a,
            b1: 0.0,
            a1: -a,
        }
    }

    fn highpass(sample_rate: f32, cutoff_hz: f32) -> Self {
        let a = Self::pole(sample_rate, cutoff_hz);
        let b0 = (1.0 + a) / 2.0;
        Self { b0, b1: -b0, a1: -a }
    }
}

/// Lowpass coefficients with the cutoff clamped into the valid band.
///
/// Infallible counterpart to [`OnePoleCoefficients::compute`] for the
/// audio-rate refresh path. `sample_rate` must already be valid (enforced at
/// prepare time); the cutoff is clamped to `[0.01, 0.49 * sample_rate]` Hz.
#[inline]
pub fn lowpass_coefficients(cutoff_hz: f32, sample_rate: f32) -> OnePoleCoefficients {
    let cutoff = cutoff_hz.clamp(MIN_CUTOFF_HZ, MAX_CUTOFF_RATIO * sample_rate);
    OnePoleCoefficients::lowpass(sample_rate, cutoff)
}

/// Highpass coefficients with the cutoff clamped into the valid band.
///
/// See [`lowpass_coefficients`] for the clamping contract.
#[inline]
pub fn highpass_coefficients(cutoff_hz: f32, sample_rate: f32) -> OnePoleCoefficients {
    let cutoff = cutoff_hz.clamp(MIN_CUTOFF_HZ, MAX_CUTOFF_RATIO * sample_rate);
    OnePoleCoefficients::highpass(sample_rate, cutoff)
}

/// One first-order filter instance: a coefficient set plus one sample of
/// input/output history.
///
/// The history is owned exclusively by this instance and mutated once per
/// processed sample. [`reset`](Self::reset) returns it to silence without
/// touching the coefficients; [`set_coefficients`](Self::set_coefficients)
/// swaps the section without touching the history, so a block-rate cutoff
/// change never clicks.
#[derive(Debug, Clone)]
pub struct OnePole {
    coeffs: OnePoleCoefficients,
    /// Previous input sample x[n-1].
    x1: f32,
    /// Previous output sample y[n-1].
    y1: f32,
}

impl OnePole {
    /// Create a filter with the given coefficients and silent history.
    pub fn new(coeffs: OnePoleCoefficients) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            y1: 0.0,
        }
    }

    /// Replace the coefficient set, keeping the delay-line history.
    #[inline]
    pub fn set_coefficients(&mut self, coeffs: OnePoleCoefficients) {
        self.coeffs = coeffs;
    }

    /// Current coefficient set.
    pub fn coefficients(&self) -> OnePoleCoefficients {
        self.coeffs
    }

    /// Advance the filter by one sample and return the output.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = flush_denormal(
            self.coeffs.b0 * input + self.coeffs.b1 * self.x1 - self.coeffs.a1 * self.y1,
        );
        self.x1 = input;
        self.y1 = output;
        output
    }

    /// Clear the history to silence.
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.y1 = 0.0;
    }
}

impl Default for OnePole {
    fn default() -> Self {
        Self::new(OnePoleCoefficients::passthrough())
    }
}
