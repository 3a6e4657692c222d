//! Preset periodic waveforms over `f64`.
//!
//! Every waveform evaluates its raw function at
//! `((t * frequency) + phase) * PHASE_SCALE` and adds the offset. The
//! amplitude multiplier is applied by [`PeriodicOperation`], outside the
//! transform.

use std::sync::Arc;

use plotline_types::{PeriodicTransform, Result};

use crate::periodic::{PeriodicOperation, PeriodicParams};

/// Scale from input units to radians: one input unit is a quarter degree,
/// so a full period spans 1440 units at frequency 1.
pub const PHASE_SCALE: f64 = std::f64::consts::PI / 720.0;

/// The preset waveform set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    Sine,
    Cosine,
    Tangent,
    Square,
    Triangle,
    Sawtooth,
}

impl Waveform {
    pub const ALL: [Waveform; 6] = [
        Waveform::Sine,
        Waveform::Cosine,
        Waveform::Tangent,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::Sawtooth,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Waveform::Sine => "sin",
            Waveform::Cosine => "cos",
            Waveform::Tangent => "tan",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|w| w.symbol() == symbol)
    }

    /// The raw transform for this waveform.
    pub fn transform(self) -> PeriodicTransform {
        match self {
            Waveform::Sine => periodic_transform(f64::sin),
            Waveform::Cosine => periodic_transform(f64::cos),
            Waveform::Tangent => periodic_transform(f64::tan),
            Waveform::Square => periodic_transform(|x| sign(x.sin())),
            Waveform::Triangle => periodic_transform(|x| x.sin().asin()),
            Waveform::Sawtooth => periodic_transform(|x| (1.0 / x.tan()).atan()),
        }
    }
}

fn periodic_transform(raw: impl Fn(f64) -> f64 + Send + Sync + 'static) -> PeriodicTransform {
    Arc::new(move |t, frequency, phase, offset| {
        Ok(raw((t * frequency + phase) * PHASE_SCALE) + offset.unwrap_or(0.0))
    })
}

// Zero stays zero, unlike `f64::signum`.
fn sign(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x.signum()
    }
}

/// Construct a fresh periodic operation for `waveform`.
pub fn generate(waveform: Waveform, params: PeriodicParams) -> Result<PeriodicOperation> {
    PeriodicOperation::with_params(waveform.symbol(), waveform.transform(), params)
}
