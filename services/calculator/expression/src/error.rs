use derive_more::Display;
use strum_macros::IntoStaticStr;

use crate::Operation;

/// The operand an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Side {
    A,
    B,
}

#[derive(Debug, Display, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EvalError {
    #[display(fmt = "malformed expression: {}", _0)]
    MalformedNode(String),

    #[display(fmt = "failed to convert {} to number", side)]
    TypeCoercion { side: Side },

    #[display(fmt = "division by zero")]
    DivisionByZero,

    #[display(fmt = "unknown operation: {}", _0)]
    UnknownOperation(String),

    #[display(fmt = "result of {} is not a finite number", _0)]
    Overflow(Operation),
}

impl EvalError {
    /// Stable label for attributing the failure, e.g. `division_by_zero`
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl std::error::Error for EvalError {}
