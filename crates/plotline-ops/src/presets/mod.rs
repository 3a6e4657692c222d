//! Preset operation tables: arithmetic, periodic, and boolean.
//!
//! Each module defines the symbolic operation set for one value-type
//! category, the transform bodies, and a `generate` function that
//! constructs a fresh operation per call.

pub mod arithmetic;
pub mod boolean;
pub mod periodic;
