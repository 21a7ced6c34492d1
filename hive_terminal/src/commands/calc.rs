//! Restricted arithmetic evaluator for the `calc` command.
//!
//! Grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ('-' | '+') factor | number | '(' expr ')'
//! ```

use thiserror::Error;

/// Deepest parenthesis / unary nesting accepted.
const MAX_DEPTH: usize = 64;

/// Why an expression could not be evaluated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected character '{0}' at {1}")]
    UnexpectedChar(char, usize),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("expression nested too deeply")]
    TooDeep,

    #[error("result is not a finite number")]
    NotFinite,
}

/// Evaluate an arithmetic expression.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let mut parser = Parser {
        chars: input.chars().filter(|c| !c.is_whitespace()).collect(),
        pos: 0,
        depth: 0,
    };

    if parser.chars.is_empty() {
        return Err(EvalError::Empty);
    }

    let value = parser.expr()?;
    if let Some(&c) = parser.chars.get(parser.pos) {
        return Err(EvalError::UnexpectedChar(c, parser.pos));
    }
    if !value.is_finite() {
        return Err(EvalError::NotFinite);
    }
    Ok(value)
}

/// Render a result the way a calculator display would: integers without a
/// fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        // Also folds -0 into 0.
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.factor()?;
        while let Some(op @ ('*' | '/')) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            value = if op == '*' {
                value * rhs
            } else {
                if rhs == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                value / rhs
            };
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        let value = self.factor_inner();
        self.depth -= 1;
        value
    }

    fn factor_inner(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            None => Err(EvalError::UnexpectedEnd),
            Some('-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some('+') => {
                self.pos += 1;
                self.factor()
            }
            Some('(') => {
                self.pos += 1;
                let value = self.expr()?;
                match self.peek() {
                    Some(')') => {
                        self.pos += 1;
                        Ok(value)
                    }
                    Some(c) => Err(EvalError::UnexpectedChar(c, self.pos)),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) => Err(EvalError::UnexpectedChar(c, self.pos)),
        }
    }

    fn number(&mut self) -> Result<f64, EvalError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        literal
            .parse::<f64>()
            .map_err(|_| EvalError::InvalidNumber(literal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate("2+2*4"), Ok(10.0));
        assert_eq!(evaluate("(2+2)*4"), Ok(16.0));
        assert_eq!(evaluate("10-4-3"), Ok(3.0));
        assert_eq!(evaluate("8/4/2"), Ok(1.0));
    }

    #[test]
    fn test_unary_and_decimals() {
        assert_eq!(evaluate("-3+5"), Ok(2.0));
        assert_eq!(evaluate("2*-(1.5)"), Ok(-3.0));
        assert_eq!(evaluate(".5+.25"), Ok(0.75));
    }

    #[test]
    fn test_whitespace_is_ignored() {
        assert_eq!(evaluate(" 2 + 2 * 4 "), Ok(10.0));
    }

    #[test]
    fn test_errors() {
        assert_eq!(evaluate(""), Err(EvalError::Empty));
        assert_eq!(evaluate("1/0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("2+"), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("(1+2"), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("2^3"), Err(EvalError::UnexpectedChar('^', 1)));
        assert!(matches!(evaluate("1.2.3"), Err(EvalError::InvalidNumber(_))));
        assert!(matches!(evaluate("alert(1)"), Err(EvalError::UnexpectedChar('a', 0))));
    }

    #[test]
    fn test_depth_limit() {
        let deep = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(evaluate(&deep), Err(EvalError::TooDeep));
        assert_eq!(evaluate(&"-".repeat(200)), Err(EvalError::TooDeep));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.75), "0.75");
    }
}
