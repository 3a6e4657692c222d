//! Clone-on-generate registries of named preset operations.
//!
//! A registry maps a symbol to a generator; every `generate` call constructs
//! a fresh operation so mutating one instance can never bleed into another
//! node. Custom generators can be registered alongside the presets.

use std::collections::HashMap;

use plotline_types::{PlotlineError, Result, Value};

use crate::operation::Operation;
use crate::periodic::{PeriodicOperation, PeriodicParams};
use crate::presets::{arithmetic, boolean, periodic};
use crate::presets::arithmetic::ArithmeticOp;
use crate::presets::boolean::BooleanOp;
use crate::presets::periodic::Waveform;

// ---------------------------------------------------------------------------
// OperationRegistry — arithmetic and boolean categories
// ---------------------------------------------------------------------------

/// Generator producing a fresh operation from an optional offset.
pub type Generator<T> = Box<dyn Fn(Option<T>) -> Operation<T> + Send + Sync>;

/// Registry of named operation generators for one value-type category.
pub struct OperationRegistry<T: Value> {
    category: &'static str,
    generators: HashMap<String, Generator<T>>,
}

impl<T: Value> OperationRegistry<T> {
    pub fn new(category: &'static str) -> Self {
        Self {
            category,
            generators: HashMap::new(),
        }
    }

    pub fn category(&self) -> &'static str {
        self.category
    }

    pub fn register(&mut self, symbol: impl Into<String>, generator: Generator<T>) {
        self.generators.insert(symbol.into(), generator);
    }

    pub fn unregister(&mut self, symbol: &str) -> bool {
        self.generators.remove(symbol).is_some()
    }

    pub fn has(&self, symbol: &str) -> bool {
        self.generators.contains_key(symbol)
    }

    /// Construct a fresh operation for `symbol`.
    pub fn generate(&self, symbol: &str, offset: Option<T>) -> Result<Operation<T>> {
        let generator = self.generators.get(symbol).ok_or_else(|| {
            PlotlineError::UnknownOperation {
                category: self.category,
                symbol: symbol.to_string(),
            }
        })?;
        tracing::trace!(category = self.category, symbol, "generating operation");
        Ok(generator(offset))
    }

    /// Registered symbols, sorted for stable listings.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.generators.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PeriodicRegistry — waveform generators take a parameter bundle
// ---------------------------------------------------------------------------

/// Generator producing a fresh periodic operation from a parameter bundle.
pub type PeriodicGenerator = Box<dyn Fn(PeriodicParams) -> Result<PeriodicOperation> + Send + Sync>;

/// Registry of named periodic operation generators.
pub struct PeriodicRegistry {
    generators: HashMap<String, PeriodicGenerator>,
}

impl PeriodicRegistry {
    pub fn new() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    pub fn register(&mut self, symbol: impl Into<String>, generator: PeriodicGenerator) {
        self.generators.insert(symbol.into(), generator);
    }

    pub fn unregister(&mut self, symbol: &str) -> bool {
        self.generators.remove(symbol).is_some()
    }

    pub fn has(&self, symbol: &str) -> bool {
        self.generators.contains_key(symbol)
    }

    /// Construct a fresh periodic operation for `symbol`.
    ///
    /// Parameter domain violations surface as `InvalidArgument`, exactly as
    /// they would through the setters.
    pub fn generate(&self, symbol: &str, params: PeriodicParams) -> Result<PeriodicOperation> {
        let generator = self.generators.get(symbol).ok_or_else(|| {
            PlotlineError::UnknownOperation {
                category: "periodic",
                symbol: symbol.to_string(),
            }
        })?;
        tracing::trace!(category = "periodic", symbol, "generating operation");
        generator(params)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.generators.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl Default for PeriodicRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Default registry factories
// ---------------------------------------------------------------------------

/// Registry pre-loaded with every preset arithmetic operation.
pub fn default_arithmetic_registry() -> OperationRegistry<f64> {
    let mut registry = OperationRegistry::new("arithmetic");
    for op in ArithmeticOp::ALL {
        registry.register(op.symbol(), Box::new(move |offset| arithmetic::generate(op, offset)));
    }
    registry
}

/// Registry pre-loaded with every preset boolean operation.
pub fn default_boolean_registry() -> OperationRegistry<bool> {
    let mut registry = OperationRegistry::new("boolean");
    for op in BooleanOp::ALL {
        registry.register(op.symbol(), Box::new(move |offset| boolean::generate(op, offset)));
    }
    registry
}

/// Registry pre-loaded with every preset waveform.
pub fn default_periodic_registry() -> PeriodicRegistry {
    let mut registry = PeriodicRegistry::new();
    for waveform in Waveform::ALL {
        registry.register(
            waveform.symbol(),
            Box::new(move |params| periodic::generate(waveform, params)),
        );
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotline_types::Evaluate;
    use std::sync::Arc;

    #[test]
    fn default_arithmetic_registry_has_all_presets() {
        let registry = default_arithmetic_registry();
        assert_eq!(registry.len(), ArithmeticOp::ALL.len());
        for op in ArithmeticOp::ALL {
            assert!(registry.has(op.symbol()));
        }
    }

    #[test]
    fn default_boolean_registry_has_all_presets() {
        let registry = default_boolean_registry();
        assert_eq!(registry.len(), BooleanOp::ALL.len());
        assert!(registry.has("XNOR"));
    }

    #[test]
    fn default_periodic_registry_has_all_waveforms() {
        let registry = default_periodic_registry();
        assert_eq!(registry.len(), Waveform::ALL.len());
        assert!(registry.has("sawtooth"));
    }

    #[tokio::test]
    async fn generate_by_symbol_with_offset() {
        let registry = default_arithmetic_registry();
        let add_five = registry.generate("+", Some(5.0)).unwrap();
        assert_eq!(add_five.evaluate(&[1.0]).await.unwrap(), 6.0);
    }

    #[test]
    fn unknown_symbol_is_an_error() {
        let registry = default_arithmetic_registry();
        let err = registry.generate("%", None).unwrap_err();
        assert!(matches!(
            err,
            PlotlineError::UnknownOperation {
                category: "arithmetic",
                ..
            }
        ));
        assert!(err.is_caller_error());
    }

    #[test]
    fn periodic_generate_propagates_domain_errors() {
        let registry = default_periodic_registry();
        let err = registry
            .generate(
                "sin",
                PeriodicParams {
                    frequency: 0.0,
                    ..PeriodicParams::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, PlotlineError::InvalidArgument { .. }));
    }

    #[test]
    fn generated_instances_are_independent() {
        let registry = default_arithmetic_registry();
        let mut a = registry.generate("+", Some(1.0)).unwrap();
        let b = registry.generate("+", Some(1.0)).unwrap();
        a.set_offset(Some(42.0));
        assert_eq!(b.offset(), Some(1.0));
    }

    #[tokio::test]
    async fn custom_generators_can_be_registered() {
        let mut registry = default_arithmetic_registry();
        registry.register(
            "neg",
            Box::new(|offset| {
                Operation::new(
                    "neg",
                    Arc::new(|args: &[f64], offset: Option<f64>| {
                        Ok(-(args.first().copied().unwrap_or(f64::NAN)) + offset.unwrap_or(0.0))
                    }),
                )
                .with_offset(offset.unwrap_or(0.0))
            }),
        );
        let neg = registry.generate("neg", None).unwrap();
        assert_eq!(neg.evaluate(&[3.0]).await.unwrap(), -3.0);
        assert!(registry.unregister("neg"));
        assert!(!registry.has("neg"));
    }

    #[test]
    fn names_are_sorted() {
        let registry = default_periodic_registry();
        let names = registry.names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 6);
    }
}
