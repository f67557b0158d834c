//! Cremoso Core - DSP primitives for the cremoso overdrive
//!
//! This crate provides the building blocks the overdrive circuit is composed
//! from, designed for real-time audio processing with zero allocation in the
//! audio path.
//!
//! # Contents
//!
//! - [`SmoothedParam`] - Linear-ramp parameter smoothing for click-free
//!   automation
//! - [`OnePole`] / [`OnePoleCoefficients`] - Single-pole IIR filter with
//!   recomputable lowpass/highpass coefficient sets
//! - [`diode_clip`] - Asymmetric soft clipper emulating diode saturation
//! - [`ConfigError`] - Configuration-time error type
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cremoso-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Eager validation**: Configuration mistakes surface as [`ConfigError`]
//!   at setup time, never inside the per-sample path

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod math;
pub mod one_pole;
pub mod param;

// Re-export main types at crate root
pub use error::ConfigError;
pub use math::{diode_clip, flush_denormal};
pub use one_pole::{
    FilterKind, OnePole, OnePoleCoefficients, highpass_coefficients, lowpass_coefficients,
};
pub use param::SmoothedParam;
