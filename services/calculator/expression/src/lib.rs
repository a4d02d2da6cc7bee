use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

pub use error::{EvalError, Side};
pub use eval::{evaluate, evaluate_json};

mod decode;
mod error;
mod eval;

/// Default bound on how many node levels a submitted tree may contain
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Operation {
    #[serde(rename = "+")]
    #[strum(serialize = "+")]
    Add,
    #[serde(rename = "-")]
    #[strum(serialize = "-")]
    Sub,
    #[serde(rename = "*")]
    #[strum(serialize = "*")]
    Mul,
    #[serde(rename = "/")]
    #[strum(serialize = "/")]
    Div,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Operand {
    Number(f64),
    SubExpression(Box<ExpressionNode>),
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Operand::Number(v)
    }
}

impl From<ExpressionNode> for Operand {
    fn from(node: ExpressionNode) -> Self {
        Operand::SubExpression(Box::new(node))
    }
}

/// A single arithmetic application, serialized as `{"op": .., "a": .., "b": ..}`
///
/// Deserializing through serde is strict and reports shape problems as serde
/// errors, [`ExpressionNode::decode`] classifies them as [`EvalError`]s instead.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExpressionNode {
    #[serde(rename = "op")]
    pub operation: Operation,
    pub a: Operand,
    pub b: Operand,
}

impl ExpressionNode {
    pub fn new(operation: Operation, a: impl Into<Operand>, b: impl Into<Operand>) -> Self {
        ExpressionNode {
            operation,
            a: a.into(),
            b: b.into(),
        }
    }

    /// Number of node levels in this tree, a node with two number operands has depth 1
    pub fn depth(&self) -> usize {
        1 + self.a.depth().max(self.b.depth())
    }
}

impl Operand {
    fn depth(&self) -> usize {
        match self {
            Operand::Number(_) => 0,
            Operand::SubExpression(node) => node.depth(),
        }
    }
}
