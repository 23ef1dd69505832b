//! Expression language for template holes.
//!
//! A deliberately small, general-purpose expression language: literals,
//! environment names, arithmetic, comparison, and boolean logic. Nothing in
//! it knows about commands or packs; holes produce plain [`Value`]s that the
//! interpolator splices into the surrounding line.
//!
//! Semantics in brief:
//!
//! - `+ - * %` keep integers integral; mixing in a float promotes to float
//! - `/` always produces a float, so `3 / 2` is `1.5`
//! - `+` with a string operand concatenates the rendered forms
//! - comparisons work on numbers and between strings
//! - `! && ||` require booleans, with both operands evaluated
//! - integer overflow and division by zero are errors, not wrap-around

use thiserror::Error;

use crate::env::{TemplateEnv, Value};

mod eval;
mod lexer;
mod token;

/// Errors produced while lexing or evaluating a template hole.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// A character outside the expression language was encountered.
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: u32 },

    /// A string literal was not properly terminated.
    #[error("unterminated string at offset {offset}")]
    UnterminatedString { offset: u32 },

    /// A numeric literal could not be parsed.
    #[error("invalid number '{text}' at offset {offset}")]
    InvalidNumber { text: String, offset: u32 },

    /// A token appeared where the grammar does not allow it.
    #[error("unexpected token {found} at offset {offset}")]
    UnexpectedToken { found: String, offset: u32 },

    /// The expression ended mid-construct.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// A name has no binding in the pass environment.
    #[error("unknown name '{name}'")]
    UnknownName { name: String },

    /// A binary operator was applied to operand types it does not support.
    #[error("cannot apply '{op}' to {lhs} and {rhs}")]
    Unsupported {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    /// A unary operator was applied to an operand type it does not support.
    #[error("cannot apply unary '{op}' to {operand}")]
    UnsupportedUnary {
        op: &'static str,
        operand: &'static str,
    },

    /// Integer arithmetic overflowed.
    #[error("integer overflow in '{op}'")]
    Overflow { op: &'static str },

    /// Division or remainder by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// An interpolation hole was opened but never closed.
    #[error("unterminated interpolation at offset {offset}")]
    UnterminatedInterpolation { offset: u32 },
}

/// Evaluate a hole's expression text against the environment.
pub(crate) fn eval(src: &str, env: &TemplateEnv) -> Result<Value, ExprError> {
    let tokens = lexer::lex(src)?;
    eval::Evaluator::new(tokens, env).run()
}
