//! The plotline evaluation engine.
//!
//! This crate implements the ordered pipeline abstraction: single evaluation
//! units ([`PipelineNode`]) wrapping up to three operations with bypass and
//! stored-input state, composed into a [`Pipeline`] that threads each
//! element's output into the next element's stored input and supports
//! arbitrary nesting through the [`Element`] sum type.

pub mod node;
pub mod pipeline;

pub use node::{BoxedOp, NodeConfig, PipelineNode};
pub use pipeline::{Element, Pipeline};
