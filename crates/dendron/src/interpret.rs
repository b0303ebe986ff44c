//! Direct evaluation of the parse tree.

use core::fmt::Write;

use log::debug;
use soros::{divide, square_root, SymbolTable, Value, PRINT_PREFIX};

use crate::ast::{Action, BinaryOp, Expression, Program, UnaryOp};
use crate::error::{DendronError, DendronResult};

impl Expression {
    /// Operands are evaluated left before right. A divisor is checked for
    /// zero before the quotient is taken.
    pub fn evaluate(&self, symbols: &SymbolTable) -> DendronResult<Value> {
        match self {
            Expression::Constant(value) => Ok(*value),
            Expression::Variable(name) => symbols
                .get(name)
                .ok_or_else(|| DendronError::Uninitialized(name.clone())),
            Expression::Unary { op, operand } => {
                let value = operand.evaluate(symbols)?;
                match op {
                    UnaryOp::Negate => Ok(value.wrapping_neg()),
                    UnaryOp::SquareRoot => {
                        square_root(value).ok_or(DendronError::NegativeSquareRoot(value))
                    }
                }
            }
            Expression::Binary { op, lhs, rhs } => {
                let lhs = lhs.evaluate(symbols)?;
                let rhs = rhs.evaluate(symbols)?;
                match op {
                    BinaryOp::Add => Ok(lhs.wrapping_add(rhs)),
                    BinaryOp::Subtract => Ok(lhs.wrapping_sub(rhs)),
                    BinaryOp::Multiply => Ok(lhs.wrapping_mul(rhs)),
                    BinaryOp::Divide => divide(lhs, rhs).ok_or(DendronError::DivideByZero),
                }
            }
        }
    }
}

impl Action {
    pub fn execute<W: Write>(&self, symbols: &mut SymbolTable, out: &mut W) -> DendronResult<()> {
        match self {
            Action::Assign { target, value } => {
                let result = value.evaluate(symbols)?;
                symbols.assign(target, result);
            }
            Action::Print(value) => {
                let result = value.evaluate(symbols)?;
                writeln!(out, "{PRINT_PREFIX}{result}")?;
            }
        }
        Ok(())
    }
}

impl Program {
    /// Runs every action in order against `symbols`, stopping at the first
    /// failure. Lines already printed stay printed.
    pub fn execute<W: Write>(&self, symbols: &mut SymbolTable, out: &mut W) -> DendronResult<()> {
        for (index, action) in self.actions().iter().enumerate() {
            debug!("interpreting action {index}: {action}");
            action.execute(symbols, out)?;
        }
        Ok(())
    }
}

/// Interprets `program` from an empty symbol table and returns the final
/// table.
pub fn interpret<W: Write>(program: &Program, out: &mut W) -> DendronResult<SymbolTable> {
    let mut symbols = SymbolTable::new();
    program.execute(&mut symbols, out)?;
    Ok(symbols)
}
