//! Declarative pipeline descriptions and the builder that turns them into
//! engine pipelines.
//!
//! A description is plain data: elements are nodes or nested pipelines, and
//! operations are referenced by preset symbol (plus parameters) or supplied
//! as an expression compiled at the boundary by [`ScriptHost`].

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use plotline_ops::{
    default_arithmetic_registry, default_boolean_registry, default_periodic_registry, Operation,
    OperationRegistry, PeriodicParams, PeriodicRegistry,
};
use plotline_pipeline::{BoxedOp, Element, NodeConfig, Pipeline, PipelineNode};
use plotline_types::{PlotlineError, Result};

use crate::script::ScriptHost;

// ---------------------------------------------------------------------------
// Description data types
// ---------------------------------------------------------------------------

/// Which value type the pipeline carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    Number,
    Boolean,
}

/// Top-level pipeline description.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineDescription {
    #[serde(default)]
    pub values: ValueKind,
    pub elements: Vec<ElementDescription>,
}

/// One element: a node, or a nested pipeline.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ElementDescription {
    Sub {
        pipeline: Vec<ElementDescription>,
    },
    Node(NodeDescription),
}

/// A node description; every field is optional, `{}` is an identity node.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDescription {
    #[serde(default)]
    pub bypass: bool,
    pub input: Option<serde_json::Value>,
    pub main: Option<OpDescription>,
    pub pre: Option<OpDescription>,
    pub post: Option<OpDescription>,
}

/// An operation reference: a preset symbol with parameters, or an
/// expression over `t`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpDescription {
    pub op: Option<String>,
    pub expr: Option<String>,
    pub offset: Option<serde_json::Value>,
    pub frequency: Option<f64>,
    pub phase: Option<f64>,
    pub amplitude: Option<f64>,
}

impl OpDescription {
    fn has_periodic_params(&self) -> bool {
        self.frequency.is_some() || self.phase.is_some() || self.amplitude.is_some()
    }
}

/// Read and deserialize a description file.
pub fn load_description(path: &Path) -> Result<PipelineDescription> {
    let source = std::fs::read_to_string(path)?;
    parse_description(&source)
}

/// Deserialize a description from JSON text.
pub fn parse_description(source: &str) -> Result<PipelineDescription> {
    serde_json::from_str(source).map_err(|e| PlotlineError::Description(e.to_string()))
}

// ---------------------------------------------------------------------------
// Registries — one per value-type category
// ---------------------------------------------------------------------------

/// The preset registries the builder resolves symbols against.
pub struct Registries {
    pub arithmetic: OperationRegistry<f64>,
    pub periodic: PeriodicRegistry,
    pub boolean: OperationRegistry<bool>,
}

impl Default for Registries {
    fn default() -> Self {
        Self {
            arithmetic: default_arithmetic_registry(),
            periodic: default_periodic_registry(),
            boolean: default_boolean_registry(),
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

impl PipelineDescription {
    /// Build a number pipeline from this description.
    pub fn build_number(
        &self,
        registries: &Registries,
        scripts: &Arc<ScriptHost>,
    ) -> Result<Pipeline<f64>> {
        build_number_pipeline(&self.elements, registries, scripts)
    }

    /// Build a boolean pipeline from this description.
    pub fn build_boolean(&self, registries: &Registries) -> Result<Pipeline<bool>> {
        build_boolean_pipeline(&self.elements, registries)
    }
}

fn build_number_pipeline(
    elements: &[ElementDescription],
    registries: &Registries,
    scripts: &Arc<ScriptHost>,
) -> Result<Pipeline<f64>> {
    let mut pipeline = Pipeline::new();
    for element in elements {
        pipeline.add(build_number_element(element, registries, scripts)?, None)?;
    }
    Ok(pipeline)
}

fn build_number_element(
    element: &ElementDescription,
    registries: &Registries,
    scripts: &Arc<ScriptHost>,
) -> Result<Element<f64>> {
    match element {
        ElementDescription::Sub { pipeline } => Ok(Element::Sub(build_number_pipeline(
            pipeline, registries, scripts,
        )?)),
        ElementDescription::Node(node) => {
            let config = NodeConfig {
                input: node.input.as_ref().map(number_value).transpose()?,
                bypass: node.bypass,
                main_op: node
                    .main
                    .as_ref()
                    .map(|op| number_op(op, registries, scripts))
                    .transpose()?,
                pre_op: node
                    .pre
                    .as_ref()
                    .map(|op| number_op(op, registries, scripts))
                    .transpose()?,
                post_op: node
                    .post
                    .as_ref()
                    .map(|op| number_op(op, registries, scripts))
                    .transpose()?,
            };
            Ok(Element::Node(PipelineNode::new(config)))
        }
    }
}

fn number_op(
    desc: &OpDescription,
    registries: &Registries,
    scripts: &Arc<ScriptHost>,
) -> Result<BoxedOp<f64>> {
    let offset = desc.offset.as_ref().map(number_value).transpose()?;
    match (&desc.op, &desc.expr) {
        (Some(_), Some(_)) => Err(PlotlineError::Description(
            "an operation takes either 'op' or 'expr', not both".into(),
        )),
        (None, None) => Err(PlotlineError::Description(
            "an operation needs an 'op' symbol or an 'expr'".into(),
        )),
        (None, Some(expr)) => {
            if desc.has_periodic_params() {
                return Err(PlotlineError::Description(
                    "'expr' operations take only 'offset'".into(),
                ));
            }
            let transform = scripts.compile_transform(expr)?;
            let mut operation = Operation::new(expr.clone(), transform);
            operation.set_offset(offset);
            Ok(Box::new(operation))
        }
        (Some(symbol), None) => {
            if registries.periodic.has(symbol) {
                let params = PeriodicParams {
                    frequency: desc.frequency.unwrap_or(1.0),
                    phase: desc.phase.unwrap_or(0.0),
                    amplitude: desc.amplitude.unwrap_or(1.0),
                    offset,
                };
                Ok(Box::new(registries.periodic.generate(symbol, params)?))
            } else {
                if desc.has_periodic_params() {
                    return Err(PlotlineError::Description(format!(
                        "frequency/phase/amplitude are only valid for periodic operations, not '{symbol}'"
                    )));
                }
                Ok(Box::new(registries.arithmetic.generate(symbol, offset)?))
            }
        }
    }
}

fn build_boolean_pipeline(
    elements: &[ElementDescription],
    registries: &Registries,
) -> Result<Pipeline<bool>> {
    let mut pipeline = Pipeline::new();
    for element in elements {
        pipeline.add(build_boolean_element(element, registries)?, None)?;
    }
    Ok(pipeline)
}

fn build_boolean_element(
    element: &ElementDescription,
    registries: &Registries,
) -> Result<Element<bool>> {
    match element {
        ElementDescription::Sub { pipeline } => {
            Ok(Element::Sub(build_boolean_pipeline(pipeline, registries)?))
        }
        ElementDescription::Node(node) => {
            let config = NodeConfig {
                input: node.input.as_ref().map(boolean_value).transpose()?,
                bypass: node.bypass,
                main_op: node
                    .main
                    .as_ref()
                    .map(|op| boolean_op(op, registries))
                    .transpose()?,
                pre_op: node
                    .pre
                    .as_ref()
                    .map(|op| boolean_op(op, registries))
                    .transpose()?,
                post_op: node
                    .post
                    .as_ref()
                    .map(|op| boolean_op(op, registries))
                    .transpose()?,
            };
            Ok(Element::Node(PipelineNode::new(config)))
        }
    }
}

fn boolean_op(desc: &OpDescription, registries: &Registries) -> Result<BoxedOp<bool>> {
    if desc.expr.is_some() {
        return Err(PlotlineError::Description(
            "'expr' operations are only available in number pipelines".into(),
        ));
    }
    if desc.has_periodic_params() {
        return Err(PlotlineError::Description(
            "frequency/phase/amplitude are only valid in number pipelines".into(),
        ));
    }
    let symbol = desc.op.as_deref().ok_or_else(|| {
        PlotlineError::Description("an operation needs an 'op' symbol".into())
    })?;
    let offset = desc.offset.as_ref().map(boolean_value).transpose()?;
    Ok(Box::new(registries.boolean.generate(symbol, offset)?))
}

fn number_value(value: &serde_json::Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| PlotlineError::Description(format!("expected a number, got {value}")))
}

fn boolean_value(value: &serde_json::Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| PlotlineError::Description(format!("expected a boolean, got {value}")))
}
