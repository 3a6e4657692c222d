//! Preset boolean operations.
//!
//! All operations fold over the argument slice; the fold seed is the offset
//! when set, `true` otherwise. The seeds and fold bodies reproduce the
//! behavior of the shipped operation table, quirks included (`NOT` folds
//! `!(n && s)`, and `OR`'s default seed makes it constant-true until an
//! offset of `false` is supplied).

use std::sync::Arc;

use plotline_types::Transform;

use crate::operation::Operation;

/// The preset boolean operation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    And,
    Or,
    Not,
    Xor,
    Nand,
    Nor,
    Xnor,
}

impl BooleanOp {
    pub const ALL: [BooleanOp; 7] = [
        BooleanOp::And,
        BooleanOp::Or,
        BooleanOp::Not,
        BooleanOp::Xor,
        BooleanOp::Nand,
        BooleanOp::Nor,
        BooleanOp::Xnor,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BooleanOp::And => "AND",
            BooleanOp::Or => "OR",
            BooleanOp::Not => "NOT",
            BooleanOp::Xor => "XOR",
            BooleanOp::Nand => "NAND",
            BooleanOp::Nor => "NOR",
            BooleanOp::Xnor => "XNOR",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.symbol() == symbol)
    }

    /// The transform body for this operation.
    pub fn transform(self) -> Transform<bool> {
        match self {
            BooleanOp::And => {
                Arc::new(|args, offset| Ok(args.iter().fold(offset.unwrap_or(true), |s, n| *n && s)))
            }
            BooleanOp::Or => {
                Arc::new(|args, offset| Ok(args.iter().fold(offset.unwrap_or(true), |s, n| *n || s)))
            }
            BooleanOp::Not => {
                Arc::new(|args, offset| Ok(args.iter().fold(offset.unwrap_or(true), |s, n| !(*n && s))))
            }
            BooleanOp::Xor => {
                Arc::new(|args, offset| Ok(args.iter().fold(offset.unwrap_or(true), |s, n| s ^ *n)))
            }
            BooleanOp::Nand => {
                Arc::new(|args, offset| Ok(!args.iter().fold(offset.unwrap_or(true), |s, n| s && *n)))
            }
            BooleanOp::Nor => {
                Arc::new(|args, offset| Ok(!args.iter().fold(offset.unwrap_or(true), |s, n| s || *n)))
            }
            BooleanOp::Xnor => {
                Arc::new(|args, offset| Ok(args.iter().fold(offset.unwrap_or(true), |s, n| s == *n)))
            }
        }
    }
}

/// Construct a fresh boolean operation.
pub fn generate(op: BooleanOp, offset: Option<bool>) -> Operation<bool> {
    let mut operation = Operation::new(op.symbol(), op.transform());
    operation.set_offset(offset);
    operation
}
