//! The waveform-parameterized operation: frequency, phase, amplitude.

use std::fmt;

use async_trait::async_trait;

use plotline_types::{Evaluate, PeriodicTransform, PlotlineError, Result};

/// Parameter bundle for constructing a periodic operation.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicParams {
    pub frequency: f64,
    pub phase: f64,
    pub amplitude: f64,
    pub offset: Option<f64>,
}

impl Default for PeriodicParams {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            phase: 0.0,
            amplitude: 1.0,
            offset: None,
        }
    }
}

/// A named periodic operation over `f64`.
///
/// Output is `amplitude * transform(t, frequency, phase, offset)`. The
/// amplitude multiplier sits outside the transform so amplitude scaling is
/// linear for every waveform.
pub struct PeriodicOperation {
    name: String,
    transform: PeriodicTransform,
    offset: Option<f64>,
    frequency: f64,
    phase: f64,
    amplitude: f64,
}

impl PeriodicOperation {
    /// Create a periodic operation with default parameters
    /// (frequency 1, phase 0, amplitude 1, no offset).
    pub fn new(name: impl Into<String>, transform: PeriodicTransform) -> Self {
        Self {
            name: name.into(),
            transform,
            offset: None,
            frequency: 1.0,
            phase: 0.0,
            amplitude: 1.0,
        }
    }

    /// Create a periodic operation with explicit parameters.
    ///
    /// Fails with `InvalidArgument` under the same domain rules as the
    /// setters: `frequency <= 0` or `amplitude < 0`.
    pub fn with_params(
        name: impl Into<String>,
        transform: PeriodicTransform,
        params: PeriodicParams,
    ) -> Result<Self> {
        let mut op = Self::new(name, transform);
        op.set_frequency(params.frequency)?;
        op.set_amplitude(params.amplitude)?;
        op.set_phase(params.phase);
        op.set_offset(params.offset);
        Ok(op)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn offset(&self) -> Option<f64> {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Option<f64>) {
        self.offset = offset;
    }

    pub fn transform(&self) -> PeriodicTransform {
        self.transform.clone()
    }

    pub fn set_transform(&mut self, transform: PeriodicTransform) {
        self.transform = transform;
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Fails with `InvalidArgument` when `frequency <= 0`.
    pub fn set_frequency(&mut self, frequency: f64) -> Result<()> {
        if frequency <= 0.0 {
            return Err(PlotlineError::InvalidArgument {
                param: "frequency",
                message: format!("must be greater than 0, got {frequency}"),
            });
        }
        self.frequency = frequency;
        Ok(())
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Fails with `InvalidArgument` when `amplitude < 0`.
    pub fn set_amplitude(&mut self, amplitude: f64) -> Result<()> {
        if amplitude < 0.0 {
            return Err(PlotlineError::InvalidArgument {
                param: "amplitude",
                message: format!("must be greater than or equal to 0, got {amplitude}"),
            });
        }
        self.amplitude = amplitude;
        Ok(())
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Any real phase is accepted.
    pub fn set_phase(&mut self, phase: f64) {
        self.phase = phase;
    }
}

impl Clone for PeriodicOperation {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            transform: self.transform.clone(),
            offset: self.offset,
            frequency: self.frequency,
            phase: self.phase,
            amplitude: self.amplitude,
        }
    }
}

impl fmt::Debug for PeriodicOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeriodicOperation")
            .field("name", &self.name)
            .field("frequency", &self.frequency)
            .field("phase", &self.phase)
            .field("amplitude", &self.amplitude)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Evaluate<f64> for PeriodicOperation {
    async fn evaluate(&self, args: &[f64]) -> Result<f64> {
        let t = args.first().copied().unwrap_or(f64::NAN);
        let raw = (self.transform)(t, self.frequency, self.phase, self.offset)?;
        Ok(self.amplitude * raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // Raw transform that just exposes its inputs: t * frequency + phase + offset.
    fn linear_transform() -> PeriodicTransform {
        Arc::new(|t, frequency, phase, offset| Ok(t * frequency + phase + offset.unwrap_or(0.0)))
    }

    #[tokio::test]
    async fn evaluate_multiplies_by_amplitude() {
        let op = PeriodicOperation::with_params(
            "lin",
            linear_transform(),
            PeriodicParams {
                frequency: 2.0,
                phase: 1.0,
                amplitude: 3.0,
                offset: None,
            },
        )
        .unwrap();
        // 3 * (4 * 2 + 1)
        assert_eq!(op.evaluate(&[4.0]).await.unwrap(), 27.0);
    }

    #[test]
    fn set_frequency_rejects_non_positive() {
        let mut op = PeriodicOperation::new("lin", linear_transform());
        let err = op.set_frequency(0.0).unwrap_err();
        assert!(matches!(err, PlotlineError::InvalidArgument { param: "frequency", .. }));
        assert!(op.set_frequency(-1.0).is_err());
        // Value unchanged after rejection
        assert_eq!(op.frequency(), 1.0);
        op.set_frequency(0.5).unwrap();
        assert_eq!(op.frequency(), 0.5);
    }

    #[test]
    fn set_amplitude_rejects_negative() {
        let mut op = PeriodicOperation::new("lin", linear_transform());
        let err = op.set_amplitude(-0.1).unwrap_err();
        assert!(matches!(err, PlotlineError::InvalidArgument { param: "amplitude", .. }));
        assert_eq!(op.amplitude(), 1.0);
        // Zero amplitude is allowed
        op.set_amplitude(0.0).unwrap();
        assert_eq!(op.amplitude(), 0.0);
    }

    #[test]
    fn set_phase_accepts_any_real() {
        let mut op = PeriodicOperation::new("lin", linear_transform());
        op.set_phase(-123.45);
        assert_eq!(op.phase(), -123.45);
    }

    #[test]
    fn with_params_validates_like_setters() {
        let result = PeriodicOperation::with_params(
            "lin",
            linear_transform(),
            PeriodicParams {
                frequency: -1.0,
                ..PeriodicParams::default()
            },
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn zero_amplitude_flattens_output() {
        let mut op = PeriodicOperation::new("lin", linear_transform());
        op.set_amplitude(0.0).unwrap();
        assert_eq!(op.evaluate(&[99.0]).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn offset_reaches_the_transform() {
        let mut op = PeriodicOperation::new("lin", linear_transform());
        op.set_offset(Some(10.0));
        assert_eq!(op.evaluate(&[1.0]).await.unwrap(), 11.0);
    }
}
