//! Host-facing block processor: N overdrive circuits, three shared knobs.
//!
//! The processor owns one [`OverdriveCircuit`] per channel and three
//! [`SmoothedParam`]s — drive, tone, level — shared across all channels
//! (smoothing is a property of the knob, not of a channel).
//!
//! # Per-block cycle
//!
//! 1. Targets latched earlier via the `set_*` setters are already on the
//!    smoothers.
//! 2. Filter coefficients are refreshed once per circuit from the
//!    *start-of-block* smoothed values — `current()`, read before any
//!    advance. The filters therefore trail the gain/clip stages by up to one
//!    block of parameter motion; that lag is part of the designed sound.
//! 3. Samples run sample-major, channel-minor: each smoother advances
//!    exactly once per sample frame and the frame's values are broadcast to
//!    every channel. A channel-major loop would advance the shared smoothers
//!    N× too fast for N channels; the loop order here is the invariant that
//!    keeps multi-channel output bit-identical to the mono case.
//!
//! Samples within one channel are strictly sequential (each depends on the
//! filter state left by the previous one); do not parallelize the inner
//! loop.
//!
//! # Real-time safety
//!
//! [`prepare`](OverdriveProcessor::prepare) is the only operation that
//! allocates; [`process_block`](OverdriveProcessor::process_block) is
//! allocation- and lock-free. The host must not call `prepare` concurrently
//! with processing.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use cremoso_core::{ConfigError, SmoothedParam};

use crate::overdrive::OverdriveCircuit;

/// Parameter smoothing window in seconds (50 ms).
const SMOOTHING_WINDOW_SECONDS: f32 = 0.05;

/// Default normalized value for all three knobs.
const DEFAULT_PARAM: f32 = 0.5;

/// The complete overdrive: a bank of per-channel circuits driven by three
/// globally smoothed control parameters.
///
/// ## Parameters
/// - `drive`: saturation amount, 0.0–1.0 (default 0.5)
/// - `tone`: low-pass brightness, 0.0–1.0 (default 0.5)
/// - `level`: output gain, 0.0–1.0 (default 0.5)
pub struct OverdriveProcessor {
    /// One circuit per channel, in channel order.
    circuits: Vec<OverdriveCircuit>,
    /// Drive knob, shared across channels.
    drive: SmoothedParam,
    /// Tone knob, shared across channels.
    tone: SmoothedParam,
    /// Level knob, shared across channels.
    level: SmoothedParam,
    /// Prepared sample rate in Hz; 0.0 while unprepared.
    sample_rate: f32,
    /// Prepared maximum block size in samples.
    max_block_size: usize,
}

impl OverdriveProcessor {
    /// Create an unprepared processor with all knobs centered.
    pub fn new() -> Self {
        Self {
            circuits: Vec::new(),
            drive: SmoothedParam::new(DEFAULT_PARAM),
            tone: SmoothedParam::new(DEFAULT_PARAM),
            level: SmoothedParam::new(DEFAULT_PARAM),
            sample_rate: 0.0,
            max_block_size: 0,
        }
    }

    /// Whether [`prepare`](Self::prepare) has succeeded.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.sample_rate > 0.0
    }

    /// Number of channels the processor is prepared for.
    pub fn channels(&self) -> usize {
        self.circuits.len()
    }

    /// Prepared sample rate in Hz; 0.0 while unprepared.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Prepared maximum block size in samples.
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Configure for a sample rate, maximum block size and channel count.
    ///
    /// Resizes the circuit bank to `channels`, re-prepares every circuit
    /// (filter state returns to silence), and reconfigures the smoothers at
    /// the new rate while preserving their in-flight values — a sample-rate
    /// change never makes a knob jump. This is the only allocating
    /// operation; call it before processing and never concurrently with it.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSampleRate`], [`ConfigError::InvalidBlockSize`],
    /// [`ConfigError::InvalidChannelCount`], or
    /// [`ConfigError::CutoffOutOfRange`] for sample rates too low to fit the
    /// circuit's cutoffs.
    pub fn prepare(
        &mut self,
        sample_rate: f32,
        max_block_size: usize,
        channels: usize,
    ) -> Result<(), ConfigError> {
        if channels == 0 {
            return Err(ConfigError::InvalidChannelCount);
        }

        self.circuits.resize_with(channels, OverdriveCircuit::new);
        for circuit in &mut self.circuits {
            circuit.prepare(sample_rate, max_block_size)?;
        }

        self.drive.configure(sample_rate, SMOOTHING_WINDOW_SECONDS)?;
        self.tone.configure(sample_rate, SMOOTHING_WINDOW_SECONDS)?;
        self.level.configure(sample_rate, SMOOTHING_WINDOW_SECONDS)?;

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            max_block_size,
            channels,
            "overdrive_prepare: circuit bank reconfigured"
        );

        Ok(())
    }

    /// Latch a new drive target (clamped to [0, 1]).
    pub fn set_drive(&mut self, value: f32) {
        self.drive.set_target(value.clamp(0.0, 1.0));
    }

    /// Latch a new tone target (clamped to [0, 1]).
    pub fn set_tone(&mut self, value: f32) {
        self.tone.set_target(value.clamp(0.0, 1.0));
    }

    /// Latch a new level target (clamped to [0, 1]).
    pub fn set_level(&mut self, value: f32) {
        self.level.set_target(value.clamp(0.0, 1.0));
    }

    /// Current drive target.
    pub fn drive(&self) -> f32 {
        self.drive.target()
    }

    /// Current tone target.
    pub fn tone(&self) -> f32 {
        self.tone.target()
    }

    /// Current level target.
    pub fn level(&self) -> f32 {
        self.level.target()
    }

    /// Process one block in place, one buffer slice per channel.
    ///
    /// All channel buffers must have the same length, at most the prepared
    /// maximum block size; the number of buffers must equal the prepared
    /// channel count. Violations — including processing before a successful
    /// `prepare` — are caller bugs, checked with `debug_assert`.
    pub fn process_block(&mut self, buffers: &mut [&mut [f32]]) {
        debug_assert!(self.is_ready(), "process_block before prepare");
        debug_assert_eq!(
            buffers.len(),
            self.circuits.len(),
            "channel count mismatch"
        );

        let frames = buffers.first().map_or(0, |b| b.len());
        debug_assert!(
            buffers.iter().all(|b| b.len() == frames),
            "channel buffers must share one length"
        );
        debug_assert!(frames <= self.max_block_size, "block exceeds prepared size");

        // Refresh filters once per block from the start-of-block smoothed
        // values, read before any advance.
        let drive_now = self.drive.current();
        let tone_now = self.tone.current();
        for circuit in &mut self.circuits {
            circuit.update_filters(drive_now, tone_now);
        }

        // Sample-major, channel-minor: one smoother advance per frame, the
        // triple broadcast to every channel.
        for frame in 0..frames {
            let drive = self.drive.advance();
            let tone = self.tone.advance();
            let level = self.level.advance();
            for (circuit, buffer) in self.circuits.iter_mut().zip(buffers.iter_mut()) {
                buffer[frame] = circuit.process_sample(buffer[frame], drive, tone, level);
            }
        }
    }

    /// Clear every circuit's filter state and finish all parameter ramps.
    ///
    /// Use when playback stops/starts to avoid replaying stale filter tails.
    pub fn reset(&mut self) {
        for circuit in &mut self.circuits {
            circuit.reset();
        }
        self.drive.snap_to_target();
        self.tone.snap_to_target();
        self.level.snap_to_target();
    }
}

impl Default for OverdriveProcessor {
    fn default() -> Self {
        Self::new()
    }
}
