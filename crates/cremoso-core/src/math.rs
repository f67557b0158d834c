//! Waveshaping and numeric helpers for the overdrive path.
//!
//! The centerpiece is [`diode_clip`], the asymmetric soft clipper that gives
//! the circuit its character. Both halves use `tanh`, but the negative half
//! saturates earlier and swings further — the classic behavior of a diode
//! pair where one branch has an extra diode in series.

use libm::tanhf;

/// Asymmetric soft clipper emulating back-to-back diode saturation.
///
/// ```text
/// x >= 0:  y = tanh(x)             → bounded by  1.0
/// x <  0:  y = tanh(0.8 x) * 1.2   → bounded by -1.2
/// ```
///
/// The negative half compresses more gently (0.8 input scale) but is allowed
/// a larger swing (1.2 output scale). The asymmetry produces even harmonics
/// on top of tanh's odd ones. The curve is continuous at zero with a slope
/// break (1.0 vs 0.96) that is part of the emulated characteristic — keep it.
///
/// Monotonic non-decreasing over the whole real line; output lies in
/// (-1.2, 1.0] for finite input; `diode_clip(0.0) == 0.0`.
#[inline]
pub fn diode_clip(x: f32) -> f32 {
    if x >= 0.0 {
        tanhf(x)
    } else {
        tanhf(0.8 * x) * 1.2
    }
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats cause severe CPU performance degradation on most
/// architectures. This replaces values below 1e-20 with zero, giving margin
/// before the IEEE 754 subnormal range begins. Use in filter feedback paths
/// where the signal can decay indefinitely toward zero.
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}
