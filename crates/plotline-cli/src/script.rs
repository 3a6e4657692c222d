//! User-authored expression transforms, compiled with Rhai.
//!
//! This is the only place arbitrary user text becomes executable code. The
//! engine crates accept already-constructed callables exclusively; here an
//! expression over `t` (and the operation's `offset`) is compiled once and
//! wrapped into a [`Transform`] the pipeline can call like any preset.

use std::sync::Arc;

use plotline_types::{PlotlineError, Result, Transform};
use rhai::{Dynamic, Engine, Scope, AST};

/// Compiles and executes expression transforms.
pub struct ScriptHost {
    engine: Engine,
}

impl ScriptHost {
    pub fn new() -> Self {
        let mut engine = Engine::new();
        // Bound runaway expressions; pipeline evaluation has no timeout of
        // its own.
        engine.set_max_operations(100_000);
        Self { engine }
    }

    /// Compile `source` into a transform over `(t, offset)`.
    ///
    /// Compile errors surface immediately as `TransformFailure`; runtime
    /// script errors surface from the evaluate call that hits them.
    pub fn compile_transform(self: &Arc<Self>, source: &str) -> Result<Transform<f64>> {
        let ast = self
            .engine
            .compile_expression(source)
            .map_err(|e| transform_failure(source, e.to_string()))?;

        let host = Arc::clone(self);
        let source = source.to_string();
        Ok(Arc::new(move |args: &[f64], offset: Option<f64>| {
            host.eval(&ast, &source, args.first().copied().unwrap_or(f64::NAN), offset)
        }))
    }

    fn eval(&self, ast: &AST, source: &str, t: f64, offset: Option<f64>) -> Result<f64> {
        let mut scope = Scope::new();
        scope.push("t", t);
        scope.push("offset", offset.unwrap_or(0.0));

        let value = self
            .engine
            .eval_ast_with_scope::<Dynamic>(&mut scope, ast)
            .map_err(|e| transform_failure(source, e.to_string()))?;

        // Accept integer-typed results; everything else is a script bug.
        value
            .as_float()
            .or_else(|_| value.as_int().map(|i| i as f64))
            .map_err(|actual| {
                transform_failure(source, format!("expression returned {actual}, expected a number"))
            })
    }
}

impl Default for ScriptHost {
    fn default() -> Self {
        Self::new()
    }
}

fn transform_failure(source: &str, message: String) -> PlotlineError {
    PlotlineError::TransformFailure {
        name: source.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> Arc<ScriptHost> {
        Arc::new(ScriptHost::new())
    }

    #[test]
    fn compiles_and_evaluates_an_expression_over_t() {
        let transform = host().compile_transform("t * t + 1.0").unwrap();
        assert_eq!(transform(&[3.0], None).unwrap(), 10.0);
    }

    #[test]
    fn offset_is_visible_to_the_expression() {
        let transform = host().compile_transform("t + offset").unwrap();
        assert_eq!(transform(&[1.0], Some(5.0)).unwrap(), 6.0);
        // Missing offset defaults to 0
        assert_eq!(transform(&[1.0], None).unwrap(), 1.0);
    }

    #[test]
    fn integer_results_are_coerced_to_float() {
        let transform = host().compile_transform("2 + 2").unwrap();
        assert_eq!(transform(&[0.0], None).unwrap(), 4.0);
    }

    #[test]
    fn compile_errors_surface_before_evaluation() {
        let err = host().compile_transform("t +").err().unwrap();
        assert!(matches!(err, PlotlineError::TransformFailure { .. }));
    }

    #[test]
    fn runtime_errors_surface_from_the_call() {
        let transform = host().compile_transform("t.unknown_method()").unwrap();
        let err = transform(&[1.0], None).unwrap_err();
        assert!(matches!(err, PlotlineError::TransformFailure { .. }));
    }

    #[test]
    fn non_numeric_results_are_rejected() {
        let transform = host().compile_transform("\"hello\"").unwrap();
        let err = transform(&[1.0], None).unwrap_err();
        assert!(matches!(err, PlotlineError::TransformFailure { .. }));
    }

    #[test]
    fn missing_first_argument_evaluates_as_nan() {
        let transform = host().compile_transform("t").unwrap();
        assert!(transform(&[], None).unwrap().is_nan());
    }
}
