//! Direct evaluator for template hole expressions.
//!
//! Evaluation walks the token stream with one recursive-descent level per
//! precedence tier, producing a [`Value`] without building an AST.

use super::ExprError;
use super::token::{Token, TokenKind};
use crate::env::{TemplateEnv, Value};

pub(crate) struct Evaluator<'env> {
    tokens: Vec<Token>,
    pos: usize,
    env: &'env TemplateEnv,
}

impl<'env> Evaluator<'env> {
    pub(crate) fn new(tokens: Vec<Token>, env: &'env TemplateEnv) -> Self {
        Self {
            tokens,
            pos: 0,
            env,
        }
    }

    /// Evaluate the whole expression, rejecting trailing tokens.
    pub(crate) fn run(mut self) -> Result<Value, ExprError> {
        let value = self.or_expr()?;
        match self.peek() {
            None => Ok(value),
            Some(tok) => Err(ExprError::UnexpectedToken {
                found: tok.kind.describe(),
                offset: tok.offset,
            }),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Consume the next token if it matches one of the given kinds.
    fn eat_one_of(&mut self, kinds: &[TokenKind]) -> Option<TokenKind> {
        let kind = &self.peek()?.kind;
        if kinds.contains(kind) {
            self.advance().map(|t| t.kind)
        } else {
            None
        }
    }

    fn or_expr(&mut self) -> Result<Value, ExprError> {
        let mut lhs = self.and_expr()?;
        while self.eat_one_of(&[TokenKind::OrOr]).is_some() {
            let rhs = self.and_expr()?;
            lhs = logical("||", lhs, rhs, |a, b| a || b)?;
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> Result<Value, ExprError> {
        let mut lhs = self.equality()?;
        while self.eat_one_of(&[TokenKind::AndAnd]).is_some() {
            let rhs = self.equality()?;
            lhs = logical("&&", lhs, rhs, |a, b| a && b)?;
        }
        Ok(lhs)
    }

    fn equality(&mut self) -> Result<Value, ExprError> {
        let mut lhs = self.comparison()?;
        while let Some(op) = self.eat_one_of(&[TokenKind::EqEq, TokenKind::NotEq]) {
            let rhs = self.comparison()?;
            let equal = values_equal(&lhs, &rhs)?;
            lhs = Value::Bool(if op == TokenKind::EqEq { equal } else { !equal });
        }
        Ok(lhs)
    }

    fn comparison(&mut self) -> Result<Value, ExprError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.eat_one_of(&[
            TokenKind::Lt,
            TokenKind::LtEq,
            TokenKind::Gt,
            TokenKind::GtEq,
        ]) {
            let rhs = self.term()?;
            lhs = compare(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Value, ExprError> {
        let mut lhs = self.factor()?;
        while let Some(op) = self.eat_one_of(&[TokenKind::Plus, TokenKind::Minus]) {
            let rhs = self.factor()?;
            lhs = match op {
                TokenKind::Plus => add(lhs, rhs)?,
                _ => numeric("-", lhs, rhs, |a, b| a.checked_sub(b), |a, b| a - b)?,
            };
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<Value, ExprError> {
        let mut lhs = self.unary()?;
        while let Some(op) =
            self.eat_one_of(&[TokenKind::Star, TokenKind::Slash, TokenKind::Percent])
        {
            let rhs = self.unary()?;
            lhs = match op {
                TokenKind::Star => numeric("*", lhs, rhs, |a, b| a.checked_mul(b), |a, b| a * b)?,
                TokenKind::Slash => divide(lhs, rhs)?,
                _ => remainder(lhs, rhs)?,
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Value, ExprError> {
        if self.eat_one_of(&[TokenKind::Bang]).is_some() {
            return match self.unary()? {
                Value::Bool(b) => Ok(Value::Bool(!b)),
                other => Err(ExprError::UnsupportedUnary {
                    op: "!",
                    operand: other.type_name(),
                }),
            };
        }
        if self.eat_one_of(&[TokenKind::Minus]).is_some() {
            return match self.unary()? {
                Value::Int(n) => n
                    .checked_neg()
                    .map(Value::Int)
                    .ok_or(ExprError::Overflow { op: "-" }),
                Value::Float(n) => Ok(Value::Float(-n)),
                other => Err(ExprError::UnsupportedUnary {
                    op: "-",
                    operand: other.type_name(),
                }),
            };
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Value, ExprError> {
        let tok = match self.advance() {
            Some(tok) => tok,
            None => return Err(ExprError::UnexpectedEnd),
        };
        match tok.kind {
            TokenKind::Int(n) => Ok(Value::Int(n)),
            TokenKind::Float(n) => Ok(Value::Float(n)),
            TokenKind::Str(s) => Ok(Value::Str(s)),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::Ident(name) => match self.env.get(&name) {
                Some(value) => Ok(value.clone()),
                None => Err(ExprError::UnknownName { name }),
            },
            TokenKind::LParen => {
                let value = self.or_expr()?;
                match self.advance() {
                    Some(tok) if tok.kind == TokenKind::RParen => Ok(value),
                    Some(tok) => Err(ExprError::UnexpectedToken {
                        found: tok.kind.describe(),
                        offset: tok.offset,
                    }),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            kind => Err(ExprError::UnexpectedToken {
                found: kind.describe(),
                offset: tok.offset,
            }),
        }
    }
}

// ============================================================================
// Operator semantics
// ============================================================================

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Int(n) => Some(*n as f64),
        Value::Float(n) => Some(*n),
        _ => None,
    }
}

fn logical(
    op: &'static str,
    lhs: Value,
    rhs: Value,
    apply: fn(bool, bool) -> bool,
) -> Result<Value, ExprError> {
    match (&lhs, &rhs) {
        (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(apply(*a, *b))),
        _ => Err(ExprError::Unsupported {
            op,
            lhs: lhs.type_name(),
            rhs: rhs.type_name(),
        }),
    }
}

fn values_equal(lhs: &Value, rhs: &Value) -> Result<bool, ExprError> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(a == b),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        _ => match (as_f64(lhs), as_f64(rhs)) {
            (Some(a), Some(b)) => Ok(a == b),
            _ => Err(ExprError::Unsupported {
                op: "==",
                lhs: lhs.type_name(),
                rhs: rhs.type_name(),
            }),
        },
    }
}

fn compare(op: TokenKind, lhs: Value, rhs: Value) -> Result<Value, ExprError> {
    let ordering = match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
        _ => match (as_f64(&lhs), as_f64(&rhs)) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => {
                return Err(ExprError::Unsupported {
                    op: comparison_name(&op),
                    lhs: lhs.type_name(),
                    rhs: rhs.type_name(),
                });
            }
        },
    };

    // NaN comparisons are simply false.
    let passes = ordering.is_some_and(|ord| match op {
        TokenKind::Lt => ord.is_lt(),
        TokenKind::LtEq => ord.is_le(),
        TokenKind::Gt => ord.is_gt(),
        _ => ord.is_ge(),
    });
    Ok(Value::Bool(passes))
}

fn comparison_name(op: &TokenKind) -> &'static str {
    match op {
        TokenKind::Lt => "<",
        TokenKind::LtEq => "<=",
        TokenKind::Gt => ">",
        _ => ">=",
    }
}

fn add(lhs: Value, rhs: Value) -> Result<Value, ExprError> {
    // A string operand turns '+' into concatenation of rendered forms.
    if matches!(lhs, Value::Str(_)) || matches!(rhs, Value::Str(_)) {
        return Ok(Value::Str(format!("{lhs}{rhs}")));
    }
    numeric("+", lhs, rhs, |a, b| a.checked_add(b), |a, b| a + b)
}

fn numeric(
    op: &'static str,
    lhs: Value,
    rhs: Value,
    int_apply: fn(i64, i64) -> Option<i64>,
    float_apply: fn(f64, f64) -> f64,
) -> Result<Value, ExprError> {
    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => int_apply(*a, *b)
            .map(Value::Int)
            .ok_or(ExprError::Overflow { op }),
        _ => match (as_f64(&lhs), as_f64(&rhs)) {
            (Some(a), Some(b)) => Ok(Value::Float(float_apply(a, b))),
            _ => Err(ExprError::Unsupported {
                op,
                lhs: lhs.type_name(),
                rhs: rhs.type_name(),
            }),
        },
    }
}

fn divide(lhs: Value, rhs: Value) -> Result<Value, ExprError> {
    match (as_f64(&lhs), as_f64(&rhs)) {
        (Some(a), Some(b)) => {
            if b == 0.0 {
                Err(ExprError::DivisionByZero)
            } else {
                // Division always produces a float, so 3 / 2 is 1.5.
                Ok(Value::Float(a / b))
            }
        }
        _ => Err(ExprError::Unsupported {
            op: "/",
            lhs: lhs.type_name(),
            rhs: rhs.type_name(),
        }),
    }
}

fn remainder(lhs: Value, rhs: Value) -> Result<Value, ExprError> {
    match (&lhs, &rhs) {
        (Value::Int(_), Value::Int(0)) => Err(ExprError::DivisionByZero),
        (Value::Int(a), Value::Int(b)) => a
            .checked_rem(*b)
            .map(Value::Int)
            .ok_or(ExprError::Overflow { op: "%" }),
        _ => match (as_f64(&lhs), as_f64(&rhs)) {
            (Some(_), Some(b)) if b == 0.0 => Err(ExprError::DivisionByZero),
            (Some(a), Some(b)) => Ok(Value::Float(a % b)),
            _ => Err(ExprError::Unsupported {
                op: "%",
                lhs: lhs.type_name(),
                rhs: rhs.type_name(),
            }),
        },
    }
}
