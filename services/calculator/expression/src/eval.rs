use serde_json::Value;

use crate::{EvalError, ExpressionNode, Operand, Operation, Side};

/// Evaluates an expression tree, resolving operand A then operand B
///
/// The first failure encountered is returned unchanged, no partial results
/// are produced.
pub fn evaluate(node: &ExpressionNode) -> Result<f64, EvalError> {
    let a = resolve(&node.a, Side::A)?;
    let b = resolve(&node.b, Side::B)?;

    let result = match node.operation {
        Operation::Add => a + b,
        Operation::Sub => a - b,
        Operation::Mul => a * b,
        Operation::Div if b == 0. => return Err(EvalError::DivisionByZero),
        Operation::Div => a / b,
    };

    if !result.is_finite() {
        return Err(EvalError::Overflow(node.operation));
    }
    Ok(result)
}

/// Decodes `value` and evaluates it
pub fn evaluate_json(value: &Value, max_depth: usize) -> Result<f64, EvalError> {
    evaluate(&ExpressionNode::decode(value, max_depth)?)
}

fn resolve(operand: &Operand, side: Side) -> Result<f64, EvalError> {
    let v = match operand {
        Operand::Number(v) => *v,
        Operand::SubExpression(node) => evaluate(node)?,
    };

    if !v.is_finite() {
        return Err(EvalError::TypeCoercion { side });
    }
    Ok(v)
}
