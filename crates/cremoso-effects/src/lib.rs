//! Cremoso Effects - TubeScreamer-style overdrive
//!
//! An emulation of the classic TS-1 overdrive circuit: an input buffer
//! high-pass, a fixed op-amp gain stage, a drive-controlled gain into
//! asymmetric diode clipping, a variable-cutoff tone low-pass, an output
//! coupling high-pass, and an output level control.
//!
//! Two layers:
//!
//! - [`OverdriveCircuit`] - the per-channel signal path (stateless controls,
//!   stateful filters)
//! - [`OverdriveProcessor`] - the host-facing block processor: one circuit
//!   per channel, three shared smoothed parameters, in-place buffer
//!   processing
//!
//! ## Example
//!
//! ```rust
//! use cremoso_effects::OverdriveProcessor;
//!
//! let mut processor = OverdriveProcessor::new();
//! processor.prepare(48000.0, 512, 2).unwrap();
//! processor.set_drive(0.8);
//! processor.set_tone(0.4);
//! processor.set_level(0.9);
//!
//! let mut left = [0.0f32; 512];
//! let mut right = [0.0f32; 512];
//! processor.process_block(&mut [&mut left, &mut right]);
//! ```
//!
//! Processing is real-time safe: the only allocating call is
//! [`OverdriveProcessor::prepare`].

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod overdrive;
pub mod processor;

// Re-export main types at crate root
pub use overdrive::OverdriveCircuit;
pub use processor::OverdriveProcessor;
