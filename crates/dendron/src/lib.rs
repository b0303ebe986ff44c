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

//! Dendron, a tiny prefix notation language.
//!
//! A program is a sequence of actions over integer variables:
//! ```text
//! := a 3          a := 3
//! := b * a _ 2    b := ( a * _2 )
//! # + a b         Print ( a + b )
//! ```
//! Tokens are parsed into a tree ([`ast::Program`]) which can be displayed
//! in infix form, interpreted directly ([`interpret`]) or compiled to Soros
//! assembly text ([`codegen::compile`]) for the [`soros`] machine. Both back
//! ends produce the same prints and the same final variables.

extern crate alloc;

use alloc::string::String;
use core::fmt::Write;

use soros::{DefaultMachine, Outcome};

pub mod ast;
pub mod codegen;
pub mod error;
pub mod interpret;
pub mod parser;
pub mod token;

pub use ast::{Action, BinaryOp, Expression, Program, UnaryOp};
pub use error::{DendronError, DendronResult};
pub use interpret::interpret;
pub use parser::parse;

/// Compiles `program` to assembly text, assembles it back and executes it on
/// a fresh machine, printing to `out`.
pub fn round_trip<W: Write>(program: &Program, out: &mut W) -> DendronResult<Outcome> {
    let mut text = String::new();
    codegen::compile(program, &mut text)?;
    let assembly = soros::assembler::assemble(&text)?;
    let mut machine = DefaultMachine::new();
    Ok(machine.execute(&assembly.instructions, out)?)
}
