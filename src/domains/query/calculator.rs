//! Constrained arithmetic evaluator for the calculation trigger.
//!
//! Grammar (recursive descent, usual precedence, left associative):
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := factor (('*' | '/') factor)*
//! factor  := ('+' | '-') factor | primary
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! Only numeric literals and these operators are accepted; nothing in the
//! input is ever executed.

use super::error::ExpressionError;

/// Upper bound on parenthesis and unary-operator nesting.
const MAX_DEPTH: usize = 256;

/// Evaluate an arithmetic expression.
pub fn evaluate(expression: &str) -> Result<f64, ExpressionError> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(ExpressionError::Empty);
    }

    let mut parser = Parser {
        tokens: &tokens,
        index: 0,
        depth: 0,
    };
    let value = parser.expr()?;

    if let Some(token) = parser.peek() {
        return Err(token.unexpected());
    }
    if !value.is_finite() {
        return Err(ExpressionError::NotFinite);
    }
    Ok(value)
}

/// Render a result the way people write numbers: integral values without
/// a fractional part, everything else in shortest round-trip form.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    position: usize,
}

impl Token {
    fn unexpected(&self) -> ExpressionError {
        let token = match self.kind {
            TokenKind::Number(n) => format_number(n),
            TokenKind::Plus => "+".to_string(),
            TokenKind::Minus => "-".to_string(),
            TokenKind::Star => "*".to_string(),
            TokenKind::Slash => "/".to_string(),
            TokenKind::LParen => "(".to_string(),
            TokenKind::RParen => ")".to_string(),
        };
        ExpressionError::UnexpectedToken {
            token,
            position: self.position,
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, ExpressionError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let kind = match ch {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| ExpressionError::InvalidNumber(literal.clone()))?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    position: start,
                });
                continue;
            }
            other => {
                return Err(ExpressionError::UnexpectedChar {
                    ch: other,
                    position: i,
                });
            }
        };
        tokens.push(Token { kind, position: i });
        i += 1;
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).copied();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), ExpressionError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExpressionError::TooDeep);
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.term()?;
        while let Some(kind) = self.peek().map(|t| t.kind) {
            match kind {
                TokenKind::Plus => {
                    self.index += 1;
                    value += self.term()?;
                }
                TokenKind::Minus => {
                    self.index += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.factor()?;
        while let Some(kind) = self.peek().map(|t| t.kind) {
            match kind {
                TokenKind::Star => {
                    self.index += 1;
                    value *= self.factor()?;
                }
                TokenKind::Slash => {
                    self.index += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(ExpressionError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, ExpressionError> {
        let sign = match self.peek().map(|t| t.kind) {
            Some(TokenKind::Plus) => 1.0,
            Some(TokenKind::Minus) => -1.0,
            _ => return self.primary(),
        };
        self.index += 1;
        self.descend()?;
        let value = self.factor()?;
        self.depth -= 1;
        Ok(sign * value)
    }

    fn primary(&mut self) -> Result<f64, ExpressionError> {
        let token = self.next().ok_or(ExpressionError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::Number(value) => Ok(value),
            TokenKind::LParen => {
                self.descend()?;
                let value = self.expr()?;
                match self.next() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => {
                        self.depth -= 1;
                        Ok(value)
                    }
                    Some(other) => Err(other.unexpected()),
                    None => Err(ExpressionError::UnexpectedEnd),
                }
            }
            _ => Err(token.unexpected()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(evaluate("2 + 2"), Ok(4.0));
        assert_eq!(evaluate("10 - 4 - 3"), Ok(3.0));
        assert_eq!(evaluate("2 * 3 + 4"), Ok(10.0));
        assert_eq!(evaluate("2 + 3 * 4"), Ok(14.0));
        assert_eq!(evaluate("10 / 4"), Ok(2.5));
        assert_eq!(evaluate("(1 + 2) * 3"), Ok(9.0));
    }

    #[test]
    fn test_unary_and_decimals() {
        assert_eq!(evaluate("-3 + 5"), Ok(2.0));
        assert_eq!(evaluate("-(2 + 3)"), Ok(-5.0));
        assert_eq!(evaluate("--4"), Ok(4.0));
        assert_eq!(evaluate(".5 * 4"), Ok(2.0));
        assert_eq!(evaluate("1.25 + 0.75"), Ok(2.0));
    }

    #[test]
    fn test_malformed_expressions() {
        assert_eq!(evaluate(""), Err(ExpressionError::Empty));
        assert_eq!(evaluate("   "), Err(ExpressionError::Empty));
        assert_eq!(
            evaluate("???"),
            Err(ExpressionError::UnexpectedChar {
                ch: '?',
                position: 0
            })
        );
        assert!(matches!(
            evaluate("invalid"),
            Err(ExpressionError::UnexpectedChar { ch: 'i', .. })
        ));
        assert_eq!(evaluate("2 +"), Err(ExpressionError::UnexpectedEnd));
        assert_eq!(evaluate("(1 + 2"), Err(ExpressionError::UnexpectedEnd));
        assert!(matches!(
            evaluate("1 + 2)"),
            Err(ExpressionError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            evaluate("2 3"),
            Err(ExpressionError::UnexpectedToken { .. })
        ));
        assert_eq!(
            evaluate("1.2.3"),
            Err(ExpressionError::InvalidNumber("1.2.3".to_string()))
        );
    }

    #[test]
    fn test_no_code_execution_surface() {
        assert!(evaluate("process.exit(1)").is_err());
        assert!(evaluate("2 ** 3").is_err());
        assert!(evaluate("Math.max(1, 2)").is_err());
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("1 / 0"), Err(ExpressionError::DivisionByZero));
        assert_eq!(evaluate("1 / (2 - 2)"), Err(ExpressionError::DivisionByZero));
    }

    #[test]
    fn test_overflow_is_not_finite() {
        let huge = format!("{0} * {0}", "9".repeat(200));
        assert_eq!(evaluate(&huge), Err(ExpressionError::NotFinite));
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let nested = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(evaluate(&nested), Err(ExpressionError::TooDeep));

        let unary = format!("{}1", "-".repeat(10_000));
        assert_eq!(evaluate(&unary), Err(ExpressionError::TooDeep));

        let moderate = format!("{}1{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(evaluate(&moderate), Ok(1.0));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-5.0), "-5");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }
}
