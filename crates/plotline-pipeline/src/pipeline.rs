//! The ordered pipeline: sequential evaluation with value propagation.

use std::future::Future;
use std::pin::Pin;

use plotline_types::{PlotlineError, Result, Value};

use crate::node::PipelineNode;

// ---------------------------------------------------------------------------
// Element — node or nested pipeline
// ---------------------------------------------------------------------------

/// One pipeline element: a node, or a nested pipeline.
#[derive(Debug)]
pub enum Element<T: Value> {
    Node(PipelineNode<T>),
    Sub(Pipeline<T>),
}

impl<T: Value> Element<T> {
    /// Evaluate this element with the pipeline's driving value.
    ///
    /// Nodes always produce a value; a nested pipeline produces `None` when
    /// it is empty. Boxed so nested pipelines can recurse.
    pub fn evaluate<'a>(
        &'a mut self,
        value: T,
    ) -> Pin<Box<dyn Future<Output = Result<Option<T>>> + Send + 'a>> {
        Box::pin(async move {
            match self {
                Element::Node(node) => Ok(Some(node.evaluate(value).await?)),
                Element::Sub(pipeline) => pipeline.evaluate(value).await,
            }
        })
    }

    /// Assign the stored input of this element's entry node, resolving
    /// nesting recursively. A nested pipeline with no elements has no entry
    /// node and the value is dropped.
    fn set_entry_input(&mut self, value: Option<T>) {
        match self {
            Element::Node(node) => node.set_input(value),
            Element::Sub(pipeline) => pipeline.set_entry_input(value),
        }
    }

    pub fn as_node(&self) -> Option<&PipelineNode<T>> {
        match self {
            Element::Node(node) => Some(node),
            Element::Sub(_) => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut PipelineNode<T>> {
        match self {
            Element::Node(node) => Some(node),
            Element::Sub(_) => None,
        }
    }

    pub fn as_pipeline(&self) -> Option<&Pipeline<T>> {
        match self {
            Element::Node(_) => None,
            Element::Sub(pipeline) => Some(pipeline),
        }
    }
}

impl<T: Value> From<PipelineNode<T>> for Element<T> {
    fn from(node: PipelineNode<T>) -> Self {
        Element::Node(node)
    }
}

impl<T: Value> From<Pipeline<T>> for Element<T> {
    fn from(pipeline: Pipeline<T>) -> Self {
        Element::Sub(pipeline)
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// An ordered, mutable sequence of nodes and nested pipelines, evaluated
/// left to right with output-to-input propagation.
///
/// The pipeline exclusively owns its elements. Structural mutations are
/// immediate; callers must not mutate a pipeline while an `evaluate` call is
/// in flight, since stored node inputs are read and written across awaited
/// steps.
#[derive(Debug, Default)]
pub struct Pipeline<T: Value> {
    elements: Vec<Element<T>>,
}

impl<T: Value> Pipeline<T> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Insert an element.
    ///
    /// With no index the element is appended. An explicit index must address
    /// an existing position in `[0, len - 1]`; inserting at the true tail by
    /// explicit index is rejected (append is omitted-index only).
    pub fn add(&mut self, element: impl Into<Element<T>>, index: Option<usize>) -> Result<()> {
        let element = element.into();
        match index {
            None => self.elements.push(element),
            Some(index) => {
                if index >= self.elements.len() {
                    return Err(self.range_error("add", index));
                }
                self.elements.insert(index, element);
            }
        }
        tracing::debug!(len = self.elements.len(), "element added");
        Ok(())
    }

    /// Remove an element. With no index the tail is removed (a no-op when
    /// the pipeline is empty); an explicit index must be in `[0, len - 1]`.
    pub fn remove(&mut self, index: Option<usize>) -> Result<()> {
        match index {
            None => {
                self.elements.pop();
            }
            Some(index) => {
                if index >= self.elements.len() {
                    return Err(self.range_error("remove", index));
                }
                self.elements.remove(index);
            }
        }
        tracing::debug!(len = self.elements.len(), "element removed");
        Ok(())
    }

    /// Exchange the elements at `from` and `to`.
    pub fn swap(&mut self, from: usize, to: usize) -> Result<()> {
        if from >= self.elements.len() {
            return Err(self.range_error("swap", from));
        }
        if to >= self.elements.len() {
            return Err(self.range_error("swap", to));
        }
        self.elements.swap(from, to);
        Ok(())
    }

    /// Remove the element at `from` and reinsert it at `to`.
    pub fn move_element(&mut self, from: usize, to: usize) -> Result<()> {
        if from >= self.elements.len() {
            return Err(self.range_error("move", from));
        }
        if to >= self.elements.len() {
            return Err(self.range_error("move", to));
        }
        let element = self.elements.remove(from);
        self.elements.insert(to, element);
        Ok(())
    }

    fn range_error(&self, op: &'static str, index: usize) -> PlotlineError {
        PlotlineError::IndexOutOfRange {
            op,
            index,
            len: self.elements.len(),
        }
    }

    /// Evaluate one value through the pipeline.
    ///
    /// Every element is driven with the original `value`; propagation
    /// happens through stored inputs, which override the argument. After the
    /// full pass the entry node's stored input is cleared so the next call
    /// starts fresh. Returns the last element's output, `None` when the
    /// pipeline is empty.
    pub async fn evaluate(&mut self, value: T) -> Result<Option<T>> {
        let mut calc = None;
        let len = self.elements.len();

        for i in 0..len {
            calc = self.elements[i].evaluate(value).await?;
            // Thread this element's output into the next element's stored
            // input. An empty nested pipeline has no entry node to receive
            // it, so the propagated value is simply dropped there.
            if i + 1 < len {
                self.elements[i + 1].set_entry_input(calc);
            }
        }

        self.set_entry_input(None);
        tracing::trace!(elements = len, "pipeline evaluated");
        Ok(calc)
    }

    /// Evaluate a series of values, strictly in order.
    ///
    /// Each evaluation's propagation side effects are visible to the next;
    /// a mid-series failure aborts the remainder.
    pub async fn evaluate_series(&mut self, values: &[T]) -> Result<Vec<Option<T>>> {
        let mut results = Vec::with_capacity(values.len());
        for value in values {
            results.push(self.evaluate(*value).await?);
        }
        Ok(results)
    }

    /// Assign the stored input of the entry node, if any.
    fn set_entry_input(&mut self, value: Option<T>) {
        if let Some(first) = self.elements.first_mut() {
            first.set_entry_input(value);
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Element<T>> {
        self.elements.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Element<T>> {
        self.elements.get_mut(index)
    }

    /// Lazy, restartable iteration over direct elements in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, Element<T>> {
        self.elements.iter()
    }
}

impl<'a, T: Value> IntoIterator for &'a Pipeline<T> {
    type Item = &'a Element<T>;
    type IntoIter = std::slice::Iter<'a, Element<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
