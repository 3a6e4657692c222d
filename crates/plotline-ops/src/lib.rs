//! Operation model and preset operation registries.
//!
//! This crate implements the two operation kinds the pipeline engine wraps —
//! the generic [`Operation`] and the waveform-parameterized
//! [`PeriodicOperation`] — plus the named preset tables (arithmetic,
//! periodic, boolean) and the clone-on-generate registries external code
//! uses to instantiate them by symbol.

pub mod operation;
pub mod periodic;
pub mod presets;
pub mod registry;

pub use operation::Operation;
pub use periodic::{PeriodicOperation, PeriodicParams};
pub use presets::arithmetic::ArithmeticOp;
pub use presets::boolean::BooleanOp;
pub use presets::periodic::{Waveform, PHASE_SCALE};
pub use registry::{
    default_arithmetic_registry, default_boolean_registry, default_periodic_registry,
    OperationRegistry, PeriodicRegistry,
};
