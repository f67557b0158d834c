//! Error types for configuration-time validation.
//!
//! Everything that can go wrong in this crate is a configuration mistake:
//! a non-positive sample rate, a cutoff at or above Nyquist, a negative
//! smoothing window. These are all detected eagerly when a component is
//! prepared or coefficients are computed — never inside the per-sample path.
//! There is no transient or retriable error class.

use thiserror::Error;

/// Errors raised when a component is configured with invalid values.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// Sample rate must be positive and finite.
    #[error("invalid sample rate: {sample_rate} Hz (must be positive)")]
    InvalidSampleRate {
        /// The rejected sample rate in Hz.
        sample_rate: f32,
    },

    /// Block size must be at least one sample.
    #[error("invalid block size: {block_size} (must be at least 1)")]
    InvalidBlockSize {
        /// The rejected block size in samples.
        block_size: usize,
    },

    /// Channel count must be at least one.
    #[error("invalid channel count: 0 (must be at least 1)")]
    InvalidChannelCount,

    /// Smoothing window must be non-negative and finite.
    #[error("invalid smoothing window: {seconds} s (must be non-negative)")]
    InvalidSmoothingWindow {
        /// The rejected window length in seconds.
        seconds: f32,
    },

    /// Filter cutoff must lie strictly between 0 Hz and Nyquist.
    #[error("cutoff {cutoff_hz} Hz out of range (0, {nyquist_hz}) Hz")]
    CutoffOutOfRange {
        /// The rejected cutoff frequency in Hz.
        cutoff_hz: f32,
        /// Nyquist frequency (half the sample rate) in Hz.
        nyquist_hz: f32,
    },
}
