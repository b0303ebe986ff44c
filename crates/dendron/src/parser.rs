//! Recursive descent over prefix notation.
//!
//! The grammar is LL(1): the class of the head token alone picks the
//! production, and an operator's arity says how many sub-expressions follow.
//!
//! ```text
//! program    := action*
//! action     := ":=" NAME expression | "#" expression
//! expression := NUMERAL | NAME
//!             | ("_" | "%") expression
//!             | ("+" | "-" | "*" | "/") expression expression
//! ```

use log::debug;
use soros::{Value, DEFAULT_STACK_SIZE};

use crate::ast::{Action, BinaryOp, Expression, Program, UnaryOp};
use crate::error::{DendronError, DendronResult};
use crate::token::{self, TokenCursor};

/// Deepest expression nesting the parser accepts, counting the leaf.
///
/// Post-order code for an expression never holds more values on the machine
/// stack than the expression is deep, so every parsed program fits a
/// [`soros::DefaultMachine`] and stays within native recursion limits.
pub const MAX_DEPTH: usize = DEFAULT_STACK_SIZE;

/// Parses a whole token sequence. An empty sequence is an empty program.
pub fn parse<S: AsRef<str>>(tokens: &[S]) -> DendronResult<Program> {
    Parser::new(tokens).parse_program()
}

pub struct Parser<'a, S> {
    cursor: TokenCursor<'a, S>,
    depth: usize,
}

impl<'a, S: AsRef<str>> Parser<'a, S> {
    pub fn new(tokens: &'a [S]) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            depth: 0,
        }
    }

    /// Parses actions until the tokens run out. The first failure abandons
    /// the program built so far.
    pub fn parse_program(&mut self) -> DendronResult<Program> {
        let mut program = Program::new();
        while !self.cursor.is_exhausted() {
            let action = self.parse_action()?;
            debug!(
                "parsed action {}: {action} ({} tokens left)",
                program.len(),
                self.cursor.remaining()
            );
            program.add_action(action);
        }
        Ok(program)
    }

    pub fn parse_action(&mut self) -> DendronResult<Action> {
        let Some(head) = self.cursor.next_token() else {
            return Err(DendronError::PrematureEnd);
        };
        match head {
            token::ASSIGN => {
                let Some(target) = self.cursor.next_token() else {
                    return Err(DendronError::PrematureEnd);
                };
                let value = self.parse_expression()?;
                Action::assign(target, value)
            }
            token::PRINT => {
                if self.cursor.is_exhausted() {
                    return Err(DendronError::PrematureEnd);
                }
                Ok(Action::print(self.parse_expression()?))
            }
            other => Err(DendronError::illegal(other)),
        }
    }

    pub fn parse_expression(&mut self) -> DendronResult<Expression> {
        let outer = self.depth;
        let Some(depth) = outer.checked_add(1).filter(|depth| *depth <= MAX_DEPTH) else {
            return Err(DendronError::NestingTooDeep(MAX_DEPTH));
        };
        self.depth = depth;
        let expression = self.parse_nested();
        self.depth = outer;
        expression
    }

    fn parse_nested(&mut self) -> DendronResult<Expression> {
        let Some(head) = self.cursor.next_token() else {
            return Err(DendronError::IllegalValue(None));
        };

        if token::is_numeral(head) {
            let value = head
                .parse::<Value>()
                .map_err(|_| DendronError::illegal(head))?;
            return Ok(Expression::constant(value));
        }
        if token::is_identifier(head) {
            return Ok(Expression::variable(head));
        }
        if let Some(op) = UnaryOp::from_token(head) {
            let operand = self.parse_expression()?;
            return Ok(Expression::unary(op, operand));
        }
        if let Some(op) = BinaryOp::from_token(head) {
            let lhs = self.parse_expression()?;
            let rhs = self.parse_expression()?;
            return Ok(Expression::binary(op, lhs, rhs));
        }
        Err(DendronError::illegal(head))
    }

    /// Tokens consumed so far.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }
}
