//! Arithmetic expression AST
//!
//! The expressions the evaluator runs after substitution: numeric literals,
//! the four arithmetic operators, and parentheses. Nothing else exists in
//! the substituted language.

/// Arithmetic expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal
    Number(f64),
    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
}

impl Expr {
    /// Reduce the expression to a number
    ///
    /// Division by zero propagates as IEEE infinity; the caller rejects
    /// non-finite results with [`FormulaError::NonFinite`].
    ///
    /// [`FormulaError::NonFinite`]: crate::error::FormulaError::NonFinite
    pub fn eval(&self) -> f64 {
        match self {
            Expr::Number(n) => *n,
            Expr::UnaryOp { op, operand } => match op {
                UnaryOperator::Negate => -operand.eval(),
            },
            Expr::BinaryOp { op, left, right } => {
                let (l, r) = (left.eval(), right.eval());
                match op {
                    BinaryOperator::Add => l + r,
                    BinaryOperator::Subtract => l - r,
                    BinaryOperator::Multiply => l * r,
                    BinaryOperator::Divide => l / r,
                }
            }
        }
    }
}
