//! Shared types and errors for the plotline evaluation engine.
//!
//! This crate provides the foundational pieces used across all other
//! plotline crates:
//! - `PlotlineError` — unified error taxonomy
//! - `Value` — marker trait for the value types pipelines carry
//! - `Transform` / `PeriodicTransform` — callable transform aliases
//! - `Evaluate` — the async evaluation capability trait

use std::sync::Arc;

use async_trait::async_trait;

/// Unified error type for all plotline subsystems.
#[derive(Debug, thiserror::Error)]
pub enum PlotlineError {
    // === Setter domain errors ===
    #[error("Invalid {param}: {message}")]
    InvalidArgument {
        param: &'static str,
        message: String,
    },

    // === Pipeline structural errors ===
    #[error("{op}: index {index} is out of range for pipeline of length {len}")]
    IndexOutOfRange {
        op: &'static str,
        index: usize,
        len: usize,
    },

    // === Registry errors ===
    #[error("Unknown {category} operation '{symbol}'")]
    UnknownOperation {
        category: &'static str,
        symbol: String,
    },

    // === Evaluation errors ===
    #[error("Transform '{name}' failed: {message}")]
    TransformFailure { name: String, message: String },

    // === Boundary errors ===
    #[error("Invalid pipeline description: {0}")]
    Description(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlotlineError {
    /// Returns `true` if the error is a caller mistake that must be corrected
    /// and resubmitted (bad setter argument, bad index, unknown symbol,
    /// malformed description) rather than an evaluation failure.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            PlotlineError::InvalidArgument { .. }
                | PlotlineError::IndexOutOfRange { .. }
                | PlotlineError::UnknownOperation { .. }
                | PlotlineError::Description(_)
        )
    }
}

/// A convenience alias for `Result<T, PlotlineError>`.
pub type Result<T> = std::result::Result<T, PlotlineError>;

// ---------------------------------------------------------------------------
// Value — the types a pipeline can carry
// ---------------------------------------------------------------------------

/// Marker trait for pipeline value types.
///
/// The engine is generic over its value type: arithmetic and periodic
/// operations run over `f64`, boolean operations over `bool`. Values are
/// small `Copy` types so stored inputs and outputs can be cached and
/// propagated without ownership ceremony.
pub trait Value: Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static {}

impl Value for f64 {}
impl Value for bool {}

// ---------------------------------------------------------------------------
// Transform aliases
// ---------------------------------------------------------------------------

/// A transform callable: the variadic arguments plus the operation's
/// baked-in offset, producing one value.
///
/// The offset is passed into the callable rather than applied around it, so
/// each transform decides how (and whether) its offset participates.
pub type Transform<T> = Arc<dyn Fn(&[T], Option<T>) -> Result<T> + Send + Sync>;

/// A periodic transform callable over `(t, frequency, phase, offset)`.
pub type PeriodicTransform = Arc<dyn Fn(f64, f64, f64, Option<f64>) -> Result<f64> + Send + Sync>;

// ---------------------------------------------------------------------------
// Evaluate — the common evaluation capability
// ---------------------------------------------------------------------------

/// Anything that can evaluate a slice of arguments to a single value.
///
/// All evaluation paths are async as a uniform call convention; the built-in
/// operations perform synchronous math inside it.
#[async_trait]
pub trait Evaluate<T: Value>: Send + Sync {
    async fn evaluate(&self, args: &[T]) -> Result<T>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_invalid_argument() {
        let err = PlotlineError::InvalidArgument {
            param: "frequency",
            message: "must be greater than 0".into(),
        };
        assert_eq!(err.to_string(), "Invalid frequency: must be greater than 0");
    }

    #[test]
    fn error_display_index_out_of_range() {
        let err = PlotlineError::IndexOutOfRange {
            op: "swap",
            index: 5,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "swap: index 5 is out of range for pipeline of length 2"
        );
    }

    #[test]
    fn error_display_unknown_operation() {
        let err = PlotlineError::UnknownOperation {
            category: "arithmetic",
            symbol: "%".into(),
        };
        assert_eq!(err.to_string(), "Unknown arithmetic operation '%'");
    }

    #[test]
    fn error_display_transform_failure() {
        let err = PlotlineError::TransformFailure {
            name: "custom".into(),
            message: "division by zero".into(),
        };
        assert_eq!(err.to_string(), "Transform 'custom' failed: division by zero");
    }

    #[test]
    fn error_display_description() {
        let err = PlotlineError::Description("element 2 has no operation".into());
        assert_eq!(
            err.to_string(),
            "Invalid pipeline description: element 2 has no operation"
        );
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PlotlineError = io_err.into();
        assert!(matches!(err, PlotlineError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: PlotlineError = json_err.into();
        assert!(matches!(err, PlotlineError::Json(_)));
    }

    // --- is_caller_error ---

    #[test]
    fn caller_error_classification() {
        let caller = PlotlineError::IndexOutOfRange {
            op: "add",
            index: 1,
            len: 0,
        };
        assert!(caller.is_caller_error());

        let caller = PlotlineError::InvalidArgument {
            param: "amplitude",
            message: "negative".into(),
        };
        assert!(caller.is_caller_error());

        let eval = PlotlineError::TransformFailure {
            name: "f".into(),
            message: "boom".into(),
        };
        assert!(!eval.is_caller_error());
    }

    // --- Result alias ---

    #[test]
    fn result_alias_works() {
        fn example() -> Result<u32> {
            Ok(42)
        }
        assert_eq!(example().unwrap(), 42);
    }

    // --- Evaluate trait object safety ---

    struct Doubler;

    #[async_trait]
    impl Evaluate<f64> for Doubler {
        async fn evaluate(&self, args: &[f64]) -> Result<f64> {
            Ok(args.first().copied().unwrap_or(f64::NAN) * 2.0)
        }
    }

    #[tokio::test]
    async fn evaluate_usable_as_trait_object() {
        let op: Box<dyn Evaluate<f64>> = Box::new(Doubler);
        assert_eq!(op.evaluate(&[21.0]).await.unwrap(), 42.0);
    }

    #[tokio::test]
    async fn evaluate_with_empty_args_is_nan_not_a_panic() {
        let op: Box<dyn Evaluate<f64>> = Box::new(Doubler);
        assert!(op.evaluate(&[]).await.unwrap().is_nan());
    }
}
