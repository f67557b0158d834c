//! Per-channel TS-1 overdrive circuit.
//!
//! # Signal Flow
//!
//! ```text
//! Input
//!   → Input high-pass (20 Hz, DC/rumble removal)
//!   → ×3.0 pre-gain (internal op-amp stage)
//!   → ×(1 + drive·50) drive gain
//!   → Asymmetric diode clipping (diode_clip)
//!   → Tone low-pass (500 Hz – 5 kHz, tone knob)
//!   → Output high-pass (35 Hz, output coupling capacitor)
//!   → ×level
//! Output
//! ```
//!
//! The three filters are single-pole sections whose coefficients are
//! refreshed once per block, not per sample — a deliberate amortization that
//! is part of the circuit's sound, since the filters then track parameter
//! sweeps in block-sized steps while gain and clipping track per sample.
//!
//! One instance serves exactly one audio channel; it owns its filter
//! histories and never observes another channel's samples.

use cremoso_core::{
    ConfigError, FilterKind, OnePole, OnePoleCoefficients, diode_clip, highpass_coefficients,
    lowpass_coefficients,
};

/// Input buffer high-pass cutoff in Hz.
const INPUT_HP_HZ: f32 = 20.0;

/// Output coupling high-pass cutoff in Hz.
const OUTPUT_HP_HZ: f32 = 35.0;

/// Tone low-pass cutoff at tone = 0, in Hz.
const TONE_MIN_HZ: f32 = 500.0;

/// Tone low-pass cutoff span: tone = 1 maps to 500 + 4500 = 5000 Hz.
const TONE_SPAN_HZ: f32 = 4500.0;

/// Fixed internal pre-gain of the op-amp stage.
const PRE_GAIN: f32 = 3.0;

/// Drive gain range: drive in [0, 1] maps to [1, 51]×.
const DRIVE_GAIN_RANGE: f32 = 50.0;

/// Default normalized parameter value used for initial coefficients.
const DEFAULT_PARAM: f32 = 0.5;

/// One channel's worth of the overdrive circuit.
///
/// Lifecycle: starts unprepared (passthrough filters, no sample rate) and
/// becomes ready via [`prepare`](Self::prepare). [`update_filters`](Self::update_filters)
/// and [`process_sample`](Self::process_sample) require the ready state;
/// calling them unprepared is a caller bug, checked by `debug_assert`.
#[derive(Debug, Clone)]
pub struct OverdriveCircuit {
    /// Input buffer stage (removes DC and very low frequencies).
    input_hp: OnePole,
    /// Tone control stage (variable-cutoff low-pass).
    tone_lp: OnePole,
    /// Output stage (mimics the coupling capacitor at the output).
    output_hp: OnePole,
    /// Prepared sample rate in Hz; 0.0 while unprepared.
    sample_rate: f32,
}

impl OverdriveCircuit {
    /// Create an unprepared circuit.
    pub fn new() -> Self {
        Self {
            input_hp: OnePole::default(),
            tone_lp: OnePole::default(),
            output_hp: OnePole::default(),
            sample_rate: 0.0,
        }
    }

    /// Whether the circuit has been prepared and may process samples.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.sample_rate > 0.0
    }

    /// Sample rate the circuit was prepared with; 0.0 while unprepared.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Configure the circuit for a sample rate and maximum block size.
    ///
    /// Resets all three filter histories to silence and installs initial
    /// coefficients at the default (centered) parameter values. The block
    /// size is part of the host contract but the circuit itself holds no
    /// per-block storage; it is validated and otherwise unused.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSampleRate`], [`ConfigError::InvalidBlockSize`],
    /// or [`ConfigError::CutoffOutOfRange`] when the sample rate is too low
    /// to fit the circuit's fixed cutoffs below Nyquist.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) -> Result<(), ConfigError> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate { sample_rate });
        }
        if max_block_size == 0 {
            return Err(ConfigError::InvalidBlockSize { block_size: 0 });
        }

        // Validated coefficient computation: a sample rate that cannot fit
        // the fixed cutoffs below Nyquist is rejected here, eagerly, rather
        // than clamped into a different-sounding circuit.
        let input_hp =
            OnePoleCoefficients::compute(sample_rate, INPUT_HP_HZ, FilterKind::Highpass)?;
        let tone_lp = OnePoleCoefficients::compute(
            sample_rate,
            tone_cutoff_hz(DEFAULT_PARAM),
            FilterKind::Lowpass,
        )?;
        let output_hp =
            OnePoleCoefficients::compute(sample_rate, OUTPUT_HP_HZ, FilterKind::Highpass)?;

        self.sample_rate = sample_rate;
        self.input_hp.set_coefficients(input_hp);
        self.tone_lp.set_coefficients(tone_lp);
        self.output_hp.set_coefficients(output_hp);
        self.reset();
        Ok(())
    }

    /// Recompute filter coefficients from the current smoothed knob values.
    ///
    /// Called once per block. The input and output high-pass cutoffs are
    /// fixed; only the tone knob moves a cutoff. `drive` is accepted to
    /// mirror the hardware's refresh interface but shapes no coefficient —
    /// drive only changes gain into the clipper.
    pub fn update_filters(&mut self, drive: f32, tone: f32) {
        debug_assert!(self.is_ready(), "update_filters on unprepared circuit");
        let _ = drive;
        self.input_hp
            .set_coefficients(highpass_coefficients(INPUT_HP_HZ, self.sample_rate));
        self.tone_lp.set_coefficients(lowpass_coefficients(
            tone_cutoff_hz(tone),
            self.sample_rate,
        ));
        self.output_hp
            .set_coefficients(highpass_coefficients(OUTPUT_HP_HZ, self.sample_rate));
    }

    /// Run one sample through the full circuit.
    ///
    /// `drive`, `tone` and `level` are the already-smoothed per-frame values
    /// in [0, 1]; `tone` is unused here because the tone filter's
    /// coefficients are only refreshed at block rate.
    #[inline]
    pub fn process_sample(&mut self, input: f32, drive: f32, tone: f32, level: f32) -> f32 {
        debug_assert!(self.is_ready(), "process_sample on unprepared circuit");
        let _ = tone;

        // Input buffer stage
        let mut sample = self.input_hp.process(input);

        // Internal op-amp gain stage
        sample *= PRE_GAIN;

        // Drive gain: [0, 1] → [1, 51]×
        sample *= 1.0 + drive * DRIVE_GAIN_RANGE;

        // Asymmetric diode clipping
        sample = diode_clip(sample);

        // Tone and output stages
        sample = self.tone_lp.process(sample);
        sample = self.output_hp.process(sample);

        sample * level
    }

    /// Clear all filter histories to silence, keeping coefficients.
    pub fn reset(&mut self) {
        self.input_hp.reset();
        self.tone_lp.reset();
        self.output_hp.reset();
    }
}

impl Default for OverdriveCircuit {
    fn default() -> Self {
        Self::new()
    }
}

/// Map the normalized tone knob to a low-pass cutoff in Hz.
#[inline]
fn tone_cutoff_hz(tone: f32) -> f32 {
    TONE_MIN_HZ + tone.clamp(0.0, 1.0) * TONE_SPAN_HZ
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_circuit() -> OverdriveCircuit {
        let mut circuit = OverdriveCircuit::new();
        circuit.prepare(44100.0, 512).unwrap();
        circuit
    }

    #[test]
    fn prepare_validates_configuration() {
        let mut circuit = OverdriveCircuit::new();
        assert!(matches!(
            circuit.prepare(0.0, 512),
            Err(ConfigError::InvalidSampleRate { .. })
        ));
        assert!(matches!(
            circuit.prepare(44100.0, 0),
            Err(ConfigError::InvalidBlockSize { .. })
        ));
        assert!(!circuit.is_ready());

        circuit.prepare(44100.0, 512).unwrap();
        assert!(circuit.is_ready());
        assert_eq!(circuit.sample_rate(), 44100.0);
    }

    #[test]
    fn prepare_rejects_rate_below_circuit_cutoffs() {
        // 4 kHz sample rate puts Nyquist at 2 kHz, below the default
        // 2750 Hz tone cutoff
        let mut circuit = OverdriveCircuit::new();
        assert!(matches!(
            circuit.prepare(4000.0, 512),
            Err(ConfigError::CutoffOutOfRange { .. })
        ));
    }

    #[test]
    fn silence_in_silence_out() {
        let mut circuit = ready_circuit();
        for _ in 0..1000 {
            assert_eq!(circuit.process_sample(0.0, 0.0, 0.5, 1.0), 0.0);
        }
    }

    #[test]
    fn output_is_bounded_by_clipper_and_level() {
        let mut circuit = ready_circuit();
        circuit.update_filters(1.0, 0.5);
        for i in 0..4410 {
            let t = i as f32 / 44100.0;
            let input = (core::f32::consts::TAU * 220.0 * t).sin();
            let out = circuit.process_sample(input, 1.0, 0.5, 1.0);
            assert!(out.is_finite());
            assert!(out.abs() < 1.2, "sample {i} escaped clipper bound: {out}");
        }
    }

    #[test]
    fn impulse_engages_clipper_at_full_drive() {
        let mut circuit = ready_circuit();
        let out = circuit.process_sample(1.0, 1.0, 0.5, 1.0);
        // Pre-clip peak would be 1.0 × 3.0 × 51.0 = 153.0; the clipper must
        // have collapsed that to under its ±1.2 ceiling.
        assert!(out.abs() < 1.2, "clipping did not engage: {out}");
    }

    #[test]
    fn drive_increases_saturation() {
        let mut clean = ready_circuit();
        let mut driven = ready_circuit();
        let mut clean_energy = 0.0f32;
        let mut driven_energy = 0.0f32;
        for i in 0..4410 {
            let t = i as f32 / 44100.0;
            let input = 0.1 * (core::f32::consts::TAU * 330.0 * t).sin();
            clean_energy += clean.process_sample(input, 0.0, 0.5, 1.0).powi(2);
            driven_energy += driven.process_sample(input, 1.0, 0.5, 1.0).powi(2);
        }
        assert!(
            driven_energy > clean_energy * 2.0,
            "full drive should be much louder into the clipper: {driven_energy} vs {clean_energy}"
        );
    }

    #[test]
    fn level_scales_output_linearly() {
        let mut full = ready_circuit();
        let mut half = ready_circuit();
        for i in 0..1000 {
            let t = i as f32 / 44100.0;
            let input = 0.5 * (core::f32::consts::TAU * 440.0 * t).sin();
            let a = full.process_sample(input, 0.3, 0.5, 1.0);
            let b = half.process_sample(input, 0.3, 0.5, 0.5);
            assert!((a * 0.5 - b).abs() < 1e-6);
        }
    }

    #[test]
    fn tone_darkens_the_top_end() {
        // Compare output energy of a bright (5 kHz) vs dark (500 Hz) tone
        // setting on a high-frequency tone
        let mut dark = ready_circuit();
        dark.update_filters(0.5, 0.0);
        let mut bright = ready_circuit();
        bright.update_filters(0.5, 1.0);

        let mut dark_energy = 0.0f32;
        let mut bright_energy = 0.0f32;
        for i in 0..4410 {
            let t = i as f32 / 44100.0;
            let input = 0.05 * (core::f32::consts::TAU * 4000.0 * t).sin();
            dark_energy += dark.process_sample(input, 0.2, 0.0, 1.0).powi(2);
            bright_energy += bright.process_sample(input, 0.2, 1.0, 1.0).powi(2);
        }
        assert!(
            bright_energy > dark_energy * 1.5,
            "tone low-pass should attenuate 4 kHz: {bright_energy} vs {dark_energy}"
        );
    }

    #[test]
    fn reset_returns_to_silent_fixed_point() {
        let mut circuit = ready_circuit();
        for _ in 0..100 {
            circuit.process_sample(0.7, 0.9, 0.5, 1.0);
        }
        circuit.reset();
        assert_eq!(circuit.process_sample(0.0, 0.9, 0.5, 1.0), 0.0);
    }

    #[test]
    fn re_prepare_resets_state() {
        let mut circuit = ready_circuit();
        for _ in 0..100 {
            circuit.process_sample(0.7, 0.9, 0.5, 1.0);
        }
        circuit.prepare(48000.0, 256).unwrap();
        assert_eq!(circuit.sample_rate(), 48000.0);
        assert_eq!(circuit.process_sample(0.0, 0.0, 0.5, 1.0), 0.0);
    }
}
