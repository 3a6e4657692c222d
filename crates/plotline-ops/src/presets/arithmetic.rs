//! Preset arithmetic operations over `f64`.
//!
//! Variadic operations fold over the argument slice with the offset as the
//! seed; unary operations apply to `args[0] + offset`. A missing first
//! argument yields NaN, matching IEEE semantics rather than raising an
//! error.

use std::sync::Arc;

use plotline_types::Transform;

use crate::operation::Operation;

/// The preset arithmetic operation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Identity,
    Sqrt,
    Cbrt,
    Abs,
    Exp,
    ExpM1,
    Ln,
    Log10,
    Log2,
    Hypot,
}

impl ArithmeticOp {
    pub const ALL: [ArithmeticOp; 15] = [
        ArithmeticOp::Add,
        ArithmeticOp::Sub,
        ArithmeticOp::Mul,
        ArithmeticOp::Div,
        ArithmeticOp::Pow,
        ArithmeticOp::Identity,
        ArithmeticOp::Sqrt,
        ArithmeticOp::Cbrt,
        ArithmeticOp::Abs,
        ArithmeticOp::Exp,
        ArithmeticOp::ExpM1,
        ArithmeticOp::Ln,
        ArithmeticOp::Log10,
        ArithmeticOp::Log2,
        ArithmeticOp::Hypot,
    ];

    /// The display symbol, as shown in operation pickers.
    pub fn symbol(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Sub => "-",
            ArithmeticOp::Mul => "*",
            ArithmeticOp::Div => "/",
            ArithmeticOp::Pow => "^",
            ArithmeticOp::Identity => "=",
            ArithmeticOp::Sqrt => "√",
            ArithmeticOp::Cbrt => "∛",
            ArithmeticOp::Abs => "abs",
            ArithmeticOp::Exp => "eˣ",
            ArithmeticOp::ExpM1 => "eˣ-1",
            ArithmeticOp::Ln => "ln",
            ArithmeticOp::Log10 => "log",
            ArithmeticOp::Log2 => "log2",
            ArithmeticOp::Hypot => "hypot",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.symbol() == symbol)
    }

    /// The transform body for this operation.
    pub fn transform(self) -> Transform<f64> {
        match self {
            ArithmeticOp::Add => {
                Arc::new(|args, offset| Ok(args.iter().fold(offset.unwrap_or(0.0), |s, n| s + n)))
            }
            ArithmeticOp::Sub => {
                Arc::new(|args, offset| Ok(args.iter().sum::<f64>() - offset.unwrap_or(0.0)))
            }
            ArithmeticOp::Mul => {
                Arc::new(|args, offset| Ok(args.iter().fold(offset.unwrap_or(1.0), |s, n| n * s)))
            }
            // Folds acc = arg / acc, seeded with the offset: a single argument
            // divides by the offset.
            ArithmeticOp::Div => {
                Arc::new(|args, offset| Ok(args.iter().fold(offset.unwrap_or(1.0), |acc, n| n / acc)))
            }
            // The offset is the exponent.
            ArithmeticOp::Pow => Arc::new(|args, offset| Ok(first(args).powf(offset.unwrap_or(1.0)))),
            ArithmeticOp::Identity => Arc::new(|args, offset| Ok(first(args) + offset.unwrap_or(0.0))),
            ArithmeticOp::Sqrt => Arc::new(|args, offset| Ok((first(args) + offset.unwrap_or(0.0)).sqrt())),
            ArithmeticOp::Cbrt => Arc::new(|args, offset| Ok((first(args) + offset.unwrap_or(0.0)).cbrt())),
            ArithmeticOp::Abs => Arc::new(|args, offset| Ok((first(args) + offset.unwrap_or(0.0)).abs())),
            ArithmeticOp::Exp => Arc::new(|args, offset| Ok((first(args) + offset.unwrap_or(0.0)).exp())),
            ArithmeticOp::ExpM1 => Arc::new(|args, offset| Ok((first(args) + offset.unwrap_or(0.0)).exp_m1())),
            ArithmeticOp::Ln => Arc::new(|args, offset| Ok((first(args) + offset.unwrap_or(0.0)).ln())),
            ArithmeticOp::Log10 => Arc::new(|args, offset| Ok((first(args) + offset.unwrap_or(0.0)).log10())),
            ArithmeticOp::Log2 => Arc::new(|args, offset| Ok((first(args) + offset.unwrap_or(0.0)).log2())),
            ArithmeticOp::Hypot => Arc::new(|args, offset| {
                Ok(args.iter().fold(0.0f64, |acc, n| acc.hypot(*n)) + offset.unwrap_or(0.0))
            }),
        }
    }
}

fn first(args: &[f64]) -> f64 {
    args.first().copied().unwrap_or(f64::NAN)
}

/// Construct a fresh arithmetic operation.
pub fn generate(op: ArithmeticOp, offset: Option<f64>) -> Operation<f64> {
    let mut operation = Operation::new(op.symbol(), op.transform());
    operation.set_offset(offset);
    operation
}
