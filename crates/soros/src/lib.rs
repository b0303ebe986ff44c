#![no_std]

#![cfg_attr(
    not(test),
    deny(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing,
        clippy::string_slice,
        clippy::arithmetic_side_effects,
        clippy::panicking_unwrap,
        clippy::out_of_bounds_indexing,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
    )
)]
#![cfg_attr(not(test), warn(clippy::missing_panics_doc))]

//! The Soros stack machine.
//!
//! Soros programs are straight-line sequences of [`Instruction`]s. Every
//! instruction works against two pieces of state owned by a [`Machine`]:
//! an operand stack of [`Value`]s and a [`SymbolTable`] mapping variable
//! names to their last stored value. Both are reset at the start of each
//! run, so one machine can be reused for independent programs.
//!
//! Programs travel between the compiler and the machine as assembly text,
//! one instruction per line:
//! ```text
//! PUSH 4
//! LOAD a
//! MUL
//! STORE b
//! ```
//! The [`assembler`] decodes that text and the [`machine`] executes it.

extern crate alloc;

use alloc::string::String;
use thiserror_no_std::Error;

pub mod assembler;
pub mod instruction;
pub mod machine;
pub mod symbols;


pub use instruction::{Instruction, Opcode};
pub use machine::{DefaultMachine, Machine, MachineState, Outcome, DEFAULT_STACK_SIZE};
pub use symbols::SymbolTable;

/// All runtime values are 32 bit signed integers. Arithmetic wraps.
pub type Value = i32;

/// Text written in front of every printed value.
pub const PRINT_PREFIX: &str = "=== ";

/// Failure categories shared by every stage of the Dendron/Soros pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Token sequence ran out in the middle of a construct.
    PrematureEnd,
    /// A token or value does not fit the role it appears in.
    IllegalValue,
    DivideByZero,
    /// Read of a variable that was never assigned.
    Uninitialized,
    StackUnderflow,
    StackOverflow,
    /// The output sink refused a write.
    Output,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MachineError {
    #[error("division by zero")]
    DivideByZero,
    #[error("variable {0} is uninitialized")]
    Uninitialized(String),
    #[error("square root of negative value {0}")]
    NegativeSquareRoot(Value),
    #[error("attempted operation would underflow the stack")]
    StackUnderflow,
    #[error("attempted operation would overflow the stack")]
    StackOverflow,
    #[error("could not write program output")]
    Output,
}

impl MachineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MachineError::DivideByZero => ErrorKind::DivideByZero,
            MachineError::Uninitialized(_) => ErrorKind::Uninitialized,
            MachineError::NegativeSquareRoot(_) => ErrorKind::IllegalValue,
            MachineError::StackUnderflow => ErrorKind::StackUnderflow,
            MachineError::StackOverflow => ErrorKind::StackOverflow,
            MachineError::Output => ErrorKind::Output,
        }
    }
}

impl From<core::fmt::Error> for MachineError {
    fn from(_: core::fmt::Error) -> Self {
        MachineError::Output
    }
}

/// Integer square root, truncated toward zero. `None` for negative input.
///
/// Equal to truncating the real valued root for every [`Value`], without
/// needing floating point support in `no_std`.
pub fn square_root(value: Value) -> Option<Value> {
    value.checked_isqrt()
}

/// Quotient truncated toward zero. `None` when `rhs` is zero.
pub fn divide(lhs: Value, rhs: Value) -> Option<Value> {
    if rhs == 0 {
        return None;
    }
    Some(lhs.wrapping_div(rhs))
}

#[cfg(test)]
mod test;
