//! Lowering to Soros instructions.
//!
//! Code is emitted in post-order: operands first, operator last. Every
//! expression leaves exactly one value on the machine stack and every action
//! consumes it, so compiled programs finish with an empty stack.

use alloc::vec::Vec;
use core::fmt::Write;

use log::debug;
use soros::Instruction;

use crate::ast::{Action, BinaryOp, Expression, Program, UnaryOp};

impl Expression {
    pub fn lower_into(&self, code: &mut Vec<Instruction>) {
        match self {
            Expression::Constant(value) => code.push(Instruction::PushConst(*value)),
            Expression::Variable(name) => code.push(Instruction::Load(name.clone())),
            Expression::Unary { op, operand } => {
                operand.lower_into(code);
                code.push(match op {
                    UnaryOp::Negate => Instruction::Negate,
                    UnaryOp::SquareRoot => Instruction::Sqrt,
                });
            }
            Expression::Binary { op, lhs, rhs } => {
                lhs.lower_into(code);
                rhs.lower_into(code);
                code.push(match op {
                    BinaryOp::Add => Instruction::Add,
                    BinaryOp::Subtract => Instruction::Sub,
                    BinaryOp::Multiply => Instruction::Mul,
                    BinaryOp::Divide => Instruction::Div,
                });
            }
        }
    }
}

impl Action {
    pub fn lower_into(&self, code: &mut Vec<Instruction>) {
        match self {
            Action::Assign { target, value } => {
                value.lower_into(code);
                code.push(Instruction::Store(target.clone()));
            }
            Action::Print(value) => {
                value.lower_into(code);
                code.push(Instruction::Print);
            }
        }
    }
}

pub fn lower(program: &Program) -> Vec<Instruction> {
    let mut code = Vec::new();
    for action in program.actions() {
        action.lower_into(&mut code);
    }
    debug!("lowered {} actions to {} instructions", program.len(), code.len());
    code
}

/// Writes the program as Soros assembly text, one instruction per line.
pub fn compile<W: Write>(program: &Program, out: &mut W) -> core::fmt::Result {
    for instruction in lower(program) {
        writeln!(out, "{instruction}")?;
    }
    Ok(())
}
