//! A single evaluation unit: up to three operations plus bypass and
//! stored-input state.

use std::fmt;

use plotline_types::{Evaluate, Result, Value};

/// Boxed operation slot held by a node.
///
/// Nodes own their slots exclusively; any operation kind that implements
/// [`Evaluate`] fits (generic, periodic, or caller-supplied).
pub type BoxedOp<T> = Box<dyn Evaluate<T>>;

/// Configuration bundle for constructing a node.
pub struct NodeConfig<T: Value> {
    /// Stored input override; takes priority over the evaluate argument.
    pub input: Option<T>,
    /// Main operation; `None` means identity.
    pub main_op: Option<BoxedOp<T>>,
    /// Operation applied to the input before the main operation.
    pub pre_op: Option<BoxedOp<T>>,
    /// Operation applied to the output after the main operation.
    pub post_op: Option<BoxedOp<T>>,
    pub bypass: bool,
}

impl<T: Value> Default for NodeConfig<T> {
    fn default() -> Self {
        Self {
            input: None,
            main_op: None,
            pre_op: None,
            post_op: None,
            bypass: false,
        }
    }
}

/// A single pipeline evaluation unit.
///
/// The stored `input` is transient: the owning pipeline assigns it during
/// propagation and clears the entry node's after each full pass, so a node's
/// next evaluation is driven purely by the external argument unless a caller
/// has set an explicit override.
pub struct PipelineNode<T: Value> {
    input: Option<T>,
    output: Option<T>,
    bypass: bool,
    main_op: Option<BoxedOp<T>>,
    pre_op: Option<BoxedOp<T>>,
    post_op: Option<BoxedOp<T>>,
}

impl<T: Value> PipelineNode<T> {
    pub fn new(config: NodeConfig<T>) -> Self {
        Self {
            input: config.input,
            output: config.input,
            bypass: config.bypass,
            main_op: config.main_op,
            pre_op: config.pre_op,
            post_op: config.post_op,
        }
    }

    /// Evaluate one value through this node.
    ///
    /// The stored input, when set, overrides `value`. With `bypass` on, the
    /// effective input is returned untouched and no operation runs.
    pub async fn evaluate(&mut self, value: T) -> Result<T> {
        if self.bypass {
            return Ok(self.input.unwrap_or(value));
        }

        let mut effective = self.input.unwrap_or(value);
        if let Some(op) = &self.pre_op {
            effective = op.evaluate(&[effective]).await?;
        }
        self.input = Some(effective);

        let mut output = match &self.main_op {
            Some(op) => op.evaluate(&[effective]).await?,
            // Identity: no main operation configured
            None => effective,
        };

        if let Some(op) = &self.post_op {
            output = op.evaluate(&[output]).await?;
        }

        self.output = Some(output);
        Ok(output)
    }

    pub fn input(&self) -> Option<T> {
        self.input
    }

    /// Direct override; takes priority over the argument passed to the next
    /// `evaluate` call. `None` clears the override.
    pub fn set_input(&mut self, input: Option<T>) {
        self.input = input;
    }

    /// Last computed output, cached for inspection.
    pub fn output(&self) -> Option<T> {
        self.output
    }

    pub fn bypass(&self) -> bool {
        self.bypass
    }

    pub fn set_bypass(&mut self, bypass: bool) {
        self.bypass = bypass;
    }

    /// `None` resets the node to identity.
    pub fn set_main_op(&mut self, op: Option<BoxedOp<T>>) {
        self.main_op = op;
    }

    pub fn set_pre_op(&mut self, op: Option<BoxedOp<T>>) {
        self.pre_op = op;
    }

    pub fn set_post_op(&mut self, op: Option<BoxedOp<T>>) {
        self.post_op = op;
    }

    pub fn has_main_op(&self) -> bool {
        self.main_op.is_some()
    }

    pub fn has_pre_op(&self) -> bool {
        self.pre_op.is_some()
    }

    pub fn has_post_op(&self) -> bool {
        self.post_op.is_some()
    }
}

impl<T: Value> Default for PipelineNode<T> {
    fn default() -> Self {
        Self::new(NodeConfig::default())
    }
}

impl<T: Value> fmt::Debug for PipelineNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineNode")
            .field("input", &self.input)
            .field("output", &self.output)
            .field("bypass", &self.bypass)
            .field("main_op", &self.main_op.is_some())
            .field("pre_op", &self.pre_op.is_some())
            .field("post_op", &self.post_op.is_some())
            .finish()
    }
}
