//! Arithmetic expression parser
//!
//! A recursive descent parser with the usual precedence: `* /` bind tighter
//! than `+ -`, parentheses group, and a leading `+` or `-` applies to the
//! following factor. Literals are decimal, with optional fraction and
//! exponent. Formula text only reaches this parser after reference
//! substitution, so any identifier left in the input is a parse error --
//! there are no variables and no function calls here.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};

/// Parse an arithmetic expression
///
/// # Example
/// ```rust
/// use gridcalc_formula::parse_expr;
///
/// let expr = parse_expr("1+2*(3-4)").unwrap();
/// assert_eq!(expr.eval(), -1.0);
/// ```
pub fn parse_expr(input: &str) -> FormulaResult<Expr> {
    let mut parser = ExprParser::new(input);
    let expr = parser.parse_additive()?;

    // Make sure we consumed all input
    parser.skip_whitespace();
    if !parser.is_at_end() {
        return Err(FormulaError::Parse(format!(
            "unexpected characters after expression: '{}'",
            &parser.input[parser.pos..]
        )));
    }

    Ok(expr)
}

struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    // === Grammar ===
    // additive       := multiplicative (('+' | '-') multiplicative)*
    // multiplicative := unary (('*' | '/') unary)*
    // unary          := ('+' | '-') unary | primary
    // primary        := number | '(' additive ')'

    fn parse_additive(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            self.skip_whitespace();
            let op = match self.peek_char() {
                Some('+') => BinaryOperator::Add,
                Some('-') => BinaryOperator::Subtract,
                _ => break,
            };

            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            self.skip_whitespace();
            let op = match self.peek_char() {
                Some('*') => BinaryOperator::Multiply,
                Some('/') => BinaryOperator::Divide,
                _ => break,
            };

            self.advance();
            let right = self.parse_unary()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> FormulaResult<Expr> {
        self.skip_whitespace();

        match self.peek_char() {
            Some('-') => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(Expr::UnaryOp {
                    op: UnaryOperator::Negate,
                    operand: Box::new(operand),
                })
            }
            // Prefix plus is a no-op
            Some('+') => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> FormulaResult<Expr> {
        self.skip_whitespace();

        match self.peek_char() {
            Some('(') => {
                self.advance();
                let expr = self.parse_additive()?;
                self.skip_whitespace();
                if self.peek_char() != Some(')') {
                    return Err(FormulaError::Parse("expected ')'".into()));
                }
                self.advance();
                Ok(expr)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.scan_number(),
            Some(c) => Err(FormulaError::Parse(format!("unexpected character '{}'", c))),
            None => Err(FormulaError::Parse("unexpected end of expression".into())),
        }
    }

    fn scan_number(&mut self) -> FormulaResult<Expr> {
        let start = self.pos;

        // Integer part
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        // Decimal part
        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent part
        if self.peek_char().map_or(false, |c| c == 'e' || c == 'E') {
            let mark = self.pos;
            self.advance();
            if self.peek_char().map_or(false, |c| c == '+' || c == '-') {
                self.advance();
            }
            if self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                    self.advance();
                }
            } else {
                // Not an exponent after all
                self.pos = mark;
            }
        }

        let num_str = &self.input[start..self.pos];
        num_str
            .parse::<f64>()
            .map(Expr::Number)
            .map_err(|_| FormulaError::Parse(format!("invalid number '{}'", num_str)))
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn eval(input: &str) -> f64 {
        parse_expr(input).unwrap().eval()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_expr("42").unwrap(), Expr::Number(42.0));
        assert_eq!(parse_expr("3.14").unwrap(), Expr::Number(3.14));
        assert_eq!(parse_expr(".5").unwrap(), Expr::Number(0.5));
        assert_eq!(parse_expr("1e3").unwrap(), Expr::Number(1000.0));
        assert_eq!(parse_expr("2E-2").unwrap(), Expr::Number(0.02));
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("1+2*3"), 7.0);
        assert_eq!(eval("(1+2)*3"), 9.0);
        assert_eq!(eval("10-4/2"), 8.0);
        assert_eq!(eval("2*3+4*5"), 26.0);
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(eval("10-3-2"), 5.0);
        assert_eq!(eval("16/4/2"), 2.0);
    }

    #[test]
    fn test_unary() {
        assert_eq!(eval("-5"), -5.0);
        assert_eq!(eval("--5"), 5.0);
        assert_eq!(eval("+5"), 5.0);
        // Substituting a negative value after '-' yields a double minus
        assert_eq!(eval("3--5"), 8.0);
        assert_eq!(eval("2*-3"), -6.0);
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(eval(" 1 + 2 * ( 3 - 1 ) "), 5.0);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_expr("").is_err());
        assert!(parse_expr("1+").is_err());
        assert!(parse_expr("(1+2").is_err());
        assert!(parse_expr("1+2)").is_err());
        assert!(parse_expr("foo").is_err());
        assert!(parse_expr("1 2").is_err());
        assert!(parse_expr("1**2").is_err());
        assert!(parse_expr(".").is_err());
        // No variables, no function calls
        assert!(parse_expr("A1+1").is_err());
        assert!(parse_expr("SUM(1)").is_err());
    }

    #[test]
    fn test_division_by_zero() {
        // The parser accepts it; the result is non-finite and rejected later
        assert!(eval("1/0").is_infinite());
    }
}
