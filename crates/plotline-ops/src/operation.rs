//! The generic named operation: a transform with a baked-in offset.

use std::fmt;

use async_trait::async_trait;

use plotline_types::{Evaluate, Result, Transform, Value};

/// A named transformation over a pipeline value type.
///
/// The transform receives the full argument slice plus the operation's
/// current offset; how the offset participates is the transform's business
/// (the presets fold it in as a seed or an addend). Operations are cheap to
/// clone — the transform itself is `Arc`-shared — and registries construct a
/// fresh `Operation` per generate call so mutating one instance never bleeds
/// into another node's.
pub struct Operation<T: Value> {
    name: String,
    transform: Transform<T>,
    offset: Option<T>,
}

impl<T: Value> Operation<T> {
    /// Create an operation with no offset.
    pub fn new(name: impl Into<String>, transform: Transform<T>) -> Self {
        Self {
            name: name.into(),
            transform,
            offset: None,
        }
    }

    /// Builder-style offset.
    pub fn with_offset(mut self, offset: T) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn offset(&self) -> Option<T> {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Option<T>) {
        self.offset = offset;
    }

    pub fn transform(&self) -> Transform<T> {
        self.transform.clone()
    }

    pub fn set_transform(&mut self, transform: Transform<T>) {
        self.transform = transform;
    }
}

impl<T: Value> Clone for Operation<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            transform: self.transform.clone(),
            offset: self.offset,
        }
    }
}

impl<T: Value> fmt::Debug for Operation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T: Value> Evaluate<T> for Operation<T> {
    async fn evaluate(&self, args: &[T]) -> Result<T> {
        (self.transform)(args, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn add_transform() -> Transform<f64> {
        Arc::new(|args, offset| Ok(args.iter().fold(offset.unwrap_or(0.0), |s, n| s + n)))
    }

    #[tokio::test]
    async fn evaluate_applies_transform_with_offset() {
        let op = Operation::new("+", add_transform()).with_offset(5.0);
        assert_eq!(op.evaluate(&[1.0]).await.unwrap(), 6.0);
    }

    #[tokio::test]
    async fn evaluate_without_offset_uses_transform_default() {
        let op = Operation::new("+", add_transform());
        assert_eq!(op.evaluate(&[1.0, 2.0]).await.unwrap(), 3.0);
    }

    #[tokio::test]
    async fn set_offset_is_observable_on_next_evaluate() {
        let mut op = Operation::new("+", add_transform());
        assert_eq!(op.evaluate(&[1.0]).await.unwrap(), 1.0);
        op.set_offset(Some(10.0));
        assert_eq!(op.evaluate(&[1.0]).await.unwrap(), 11.0);
        op.set_offset(None);
        assert_eq!(op.evaluate(&[1.0]).await.unwrap(), 1.0);
    }

    #[tokio::test]
    async fn set_transform_replaces_behavior() {
        let mut op = Operation::new("f", add_transform());
        op.set_transform(Arc::new(|args, _| {
            Ok(args.first().copied().unwrap_or(f64::NAN) * 3.0)
        }));
        assert_eq!(op.evaluate(&[2.0]).await.unwrap(), 6.0);
    }

    #[test]
    fn name_accessors() {
        let mut op = Operation::new("+", add_transform());
        assert_eq!(op.name(), "+");
        op.set_name("plus");
        assert_eq!(op.name(), "plus");
    }

    #[tokio::test]
    async fn clone_shares_transform_but_not_offset_state() {
        let op = Operation::new("+", add_transform()).with_offset(1.0);
        let mut copy = op.clone();
        copy.set_offset(Some(100.0));
        assert_eq!(op.evaluate(&[0.0]).await.unwrap(), 1.0);
        assert_eq!(copy.evaluate(&[0.0]).await.unwrap(), 100.0);
    }

    #[tokio::test]
    async fn transform_errors_propagate() {
        let op: Operation<f64> = Operation::new(
            "boom",
            Arc::new(|_, _| {
                Err(plotline_types::PlotlineError::TransformFailure {
                    name: "boom".into(),
                    message: "intentional".into(),
                })
            }),
        );
        let err = op.evaluate(&[1.0]).await.unwrap_err();
        assert!(matches!(
            err,
            plotline_types::PlotlineError::TransformFailure { .. }
        ));
    }

    #[tokio::test]
    async fn boolean_operations_work_through_same_model() {
        let op: Operation<bool> = Operation::new(
            "AND",
            Arc::new(|args, offset| Ok(args.iter().fold(offset.unwrap_or(true), |s, n| *n && s))),
        );
        assert!(op.evaluate(&[true, true]).await.unwrap());
        assert!(!op.evaluate(&[true, false]).await.unwrap());
    }
}
