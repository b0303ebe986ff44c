//! The Dendron parse tree.
//!
//! A [`Program`] owns an ordered list of [`Action`]s, each action owns its
//! [`Expression`] tree. Nodes are never shared. The tree is read-only to
//! every traversal: display ([`core::fmt::Display`]), interpretation
//! ([`crate::interpret`]) and code generation ([`crate::codegen`]).

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use soros::Value;

use crate::error::{DendronError, DendronResult};
use crate::token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    SquareRoot,
}

impl UnaryOp {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            token::NEGATE => Some(UnaryOp::Negate),
            token::SQUARE_ROOT => Some(UnaryOp::SquareRoot),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Negate => token::NEGATE,
            UnaryOp::SquareRoot => token::SQUARE_ROOT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            token::ADD => Some(BinaryOp::Add),
            token::SUBTRACT => Some(BinaryOp::Subtract),
            token::MULTIPLY => Some(BinaryOp::Multiply),
            token::DIVIDE => Some(BinaryOp::Divide),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => token::ADD,
            BinaryOp::Subtract => token::SUBTRACT,
            BinaryOp::Multiply => token::MULTIPLY,
            BinaryOp::Divide => token::DIVIDE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Constant(Value),
    Variable(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
}

impl Expression {
    pub fn constant(value: Value) -> Self {
        Self::Constant(value)
    }

    pub fn variable(name: &str) -> Self {
        Self::Variable(String::from(name))
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expression, rhs: Expression) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

/// Infix form: `( lhs OP rhs )` for binary nodes, the operator glued to its
/// operand for unary ones.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(value) => write!(f, "{value}"),
            Expression::Variable(name) => f.write_str(name),
            Expression::Unary { op, operand } => write!(f, "{}{operand}", op.symbol()),
            Expression::Binary { op, lhs, rhs } => {
                write!(f, "( {lhs} {} {rhs} )", op.symbol())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Assign { target: String, value: Expression },
    Print(Expression),
}

impl Action {
    /// Fails with `IllegalValue` when `target` looks like an integer literal,
    /// so constants can never be shadowed by a variable.
    pub fn assign(target: &str, value: Expression) -> DendronResult<Self> {
        if token::is_numeral(target) {
            return Err(DendronError::illegal(target));
        }
        Ok(Self::Assign {
            target: String::from(target),
            value,
        })
    }

    pub fn print(value: Expression) -> Self {
        Self::Print(value)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Assign { target, value } => write!(f, "{target} := {value}"),
            Action::Print(value) => write!(f, "Print {value}"),
        }
    }
}

/// Actions run, display and compile in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    actions: Vec<Action>,
}

impl Program {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl FromIterator<Action> for Program {
    fn from_iter<T: IntoIterator<Item = Action>>(iter: T) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

/// One action per line.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in &self.actions {
            writeln!(f, "{action}")?;
        }
        Ok(())
    }
}
