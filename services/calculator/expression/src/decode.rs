use serde_json::Value;

use crate::{EvalError, ExpressionNode, Operand, Operation, Side};

impl ExpressionNode {
    /// Decodes an untyped JSON value into an expression tree
    ///
    /// Operands are checked before the operator, A before B, so the error
    /// reported is the first one evaluation would have hit. Trees with more
    /// than `max_depth` node levels are rejected as malformed.
    pub fn decode(value: &Value, max_depth: usize) -> Result<ExpressionNode, EvalError> {
        decode_node(value, 1, max_depth)
    }
}

fn decode_node(value: &Value, depth: usize, max_depth: usize) -> Result<ExpressionNode, EvalError> {
    if depth > max_depth {
        return Err(EvalError::MalformedNode(format!(
            "nesting exceeds maximum depth of {}",
            max_depth
        )));
    }

    let fields = value.as_object().ok_or_else(|| {
        EvalError::MalformedNode(format!("expected an object, found {}", describe(value)))
    })?;

    let op = match fields.get("op") {
        Some(Value::String(op)) => op,
        Some(other) => {
            return Err(EvalError::MalformedNode(format!(
                "op must be a string, found {}",
                describe(other)
            )))
        }
        None => return Err(EvalError::MalformedNode("missing field `op`".to_string())),
    };

    let a = decode_operand(fields.get("a"), Side::A, depth, max_depth)?;
    let b = decode_operand(fields.get("b"), Side::B, depth, max_depth)?;

    let operation = op
        .parse::<Operation>()
        .map_err(|_| EvalError::UnknownOperation(op.clone()))?;

    Ok(ExpressionNode { operation, a, b })
}

fn decode_operand(
    value: Option<&Value>,
    side: Side,
    depth: usize,
    max_depth: usize,
) -> Result<Operand, EvalError> {
    match value {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v.is_finite() => Ok(Operand::Number(v)),
            _ => Err(EvalError::TypeCoercion { side }),
        },
        Some(v @ Value::Object(_)) => Ok(decode_node(v, depth + 1, max_depth)?.into()),
        _ => Err(EvalError::TypeCoercion { side }),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::DEFAULT_MAX_DEPTH;

    fn decode(value: Value) -> Result<ExpressionNode, EvalError> {
        ExpressionNode::decode(&value, DEFAULT_MAX_DEPTH)
    }

    #[test]
    fn test_decode_nested() -> Result<(), Box<dyn std::error::Error>> {
        let node = decode(json!({"op": "+", "a": {"op": "*", "a": 2, "b": 3.5}, "b": -4}))?;

        assert_eq!(
            node,
            ExpressionNode::new(
                Operation::Add,
                ExpressionNode::new(Operation::Mul, 2.0, 3.5),
                -4.0
            )
        );
        Ok(())
    }

    #[test]
    fn test_decode_ignores_unknown_fields() -> Result<(), Box<dyn std::error::Error>> {
        let node = decode(json!({"op": "-", "a": 1, "b": 2, "comment": "ignored"}))?;
        assert_eq!(node, ExpressionNode::new(Operation::Sub, 1.0, 2.0));
        Ok(())
    }

    #[test]
    fn test_decode_malformed() {
        let cases = vec![
            json!(42),
            json!("1 + 2"),
            json!([1, 2]),
            json!({"a": 1, "b": 2}),
            json!({"op": 1, "a": 1, "b": 2}),
            json!({"op": null, "a": 1, "b": 2}),
        ];

        for case in cases {
            match decode(case.clone()) {
                Err(EvalError::MalformedNode(_)) => {}
                other => panic!("{} decoded to {:?}", case, other),
            }
        }
    }

    #[test]
    fn test_decode_type_coercion() {
        let cases = vec![
            (json!({"op": "+", "a": "not a number", "b": 1}), Side::A),
            (json!({"op": "+", "a": "1", "b": 1}), Side::A),
            (json!({"op": "+", "a": true, "b": 1}), Side::A),
            (json!({"op": "+", "a": null, "b": 1}), Side::A),
            (json!({"op": "+", "b": 1}), Side::A),
            (json!({"op": "+", "a": 1, "b": [1]}), Side::B),
            (json!({"op": "+", "a": 1}), Side::B),
            (json!({"op": "*", "a": 1, "b": {"op": "-", "a": false, "b": 1}}), Side::A),
        ];

        for (case, side) in cases {
            assert_eq!(
                decode(case.clone()),
                Err(EvalError::TypeCoercion { side }),
                "{}",
                case
            );
        }
    }

    #[test]
    fn test_decode_unknown_operation() {
        assert_eq!(
            decode(json!({"op": "%", "a": 1, "b": 1})),
            Err(EvalError::UnknownOperation("%".to_string()))
        );
        assert_eq!(
            decode(json!({"op": "+", "a": {"op": "pow", "a": 2, "b": 3}, "b": 1})),
            Err(EvalError::UnknownOperation("pow".to_string()))
        );
    }

    #[test]
    fn test_decode_operands_before_operator() {
        assert_eq!(
            decode(json!({"op": "%", "a": "x", "b": 1})),
            Err(EvalError::TypeCoercion { side: Side::A })
        );
    }

    #[test]
    fn test_decode_max_depth() {
        let mut value = json!({"op": "+", "a": 1, "b": 1});
        for _ in 1..4 {
            value = json!({"op": "+", "a": value, "b": 1});
        }

        assert!(ExpressionNode::decode(&value, 4).is_ok());
        match ExpressionNode::decode(&value, 3) {
            Err(EvalError::MalformedNode(msg)) => {
                assert_eq!(msg, "nesting exceeds maximum depth of 3")
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
