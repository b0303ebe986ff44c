use core::fmt::{self, Write};

use heapless::Vec;
use log::{debug, trace};

use crate::{divide, square_root, Instruction, MachineError, SymbolTable, Value, PRINT_PREFIX};

pub const DEFAULT_STACK_SIZE: usize = 256;

pub type DefaultMachine = Machine<DEFAULT_STACK_SIZE>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineState {
    /// Empty stack, empty symbol table.
    Reset,
    /// Executing, or holding the state left by the last run.
    Running,
}

/// What a finished run leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Zero for balanced code. A non-zero depth is reported, not an error.
    pub stack_depth: usize,
    pub symbols: SymbolTable,
}

impl Outcome {
    /// Writes the end-of-run report: stack depth followed by the table dump.
    pub fn report<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(
            out,
            "Soros: execution ended with {} items left on the stack.",
            self.stack_depth
        )?;
        writeln!(out)?;
        write!(out, "{}", self.symbols)
    }
}

/// The Soros stack machine.
///
/// The operand stack holds at most `STACK_SIZE` values; pushing past that
/// fails with [`MachineError::StackOverflow`]. Each call to
/// [`Machine::execute`] starts from a reset machine, so nothing leaks from
/// one run into the next.
pub struct Machine<const STACK_SIZE: usize> {
    stack: Vec<Value, STACK_SIZE>,
    symbols: SymbolTable,
    state: MachineState,
}

impl<const STACK_SIZE: usize> Machine<STACK_SIZE> {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            symbols: SymbolTable::new(),
            state: MachineState::Reset,
        }
    }

    pub fn reset(&mut self) {
        self.stack.clear();
        self.symbols.clear();
        self.state = MachineState::Reset;
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    pub fn stack(&self) -> &[Value] {
        self.stack.as_slice()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Runs `program` in order from a reset machine. `PRINT` output goes to
    /// `out`, one `=== value` line per print.
    ///
    /// The first failing instruction aborts the run; output already written
    /// stays written and the machine keeps the state it had at the failure.
    pub fn execute<W: Write>(
        &mut self,
        program: &[Instruction],
        out: &mut W,
    ) -> Result<Outcome, MachineError> {
        self.reset();
        self.state = MachineState::Running;
        debug!("executing {} instructions", program.len());

        for instruction in program {
            trace!("{instruction} depth={}", self.stack.len());
            self.step(instruction, out)?;
        }

        debug!("execution ended with stack depth {}", self.stack.len());
        Ok(Outcome {
            stack_depth: self.stack.len(),
            symbols: self.symbols.clone(),
        })
    }

    fn step<W: Write>(&mut self, instruction: &Instruction, out: &mut W) -> Result<(), MachineError> {
        let stack = &mut self.stack;
        match instruction {
            Instruction::PushConst(value) => push(stack, *value)?,
            Instruction::Load(name) => {
                let Some(value) = self.symbols.get(name) else {
                    return Err(MachineError::Uninitialized(name.clone()));
                };
                push(stack, value)?;
            }
            Instruction::Store(name) => {
                let value = pop(stack)?;
                self.symbols.assign(name, value);
            }
            Instruction::Add => {
                let (lhs, rhs) = pop2(stack)?;
                push(stack, lhs.wrapping_add(rhs))?;
            }
            Instruction::Sub => {
                let (lhs, rhs) = pop2(stack)?;
                push(stack, lhs.wrapping_sub(rhs))?;
            }
            Instruction::Mul => {
                let (lhs, rhs) = pop2(stack)?;
                push(stack, lhs.wrapping_mul(rhs))?;
            }
            Instruction::Div => {
                let (lhs, rhs) = pop2(stack)?;
                let result = divide(lhs, rhs).ok_or(MachineError::DivideByZero)?;
                push(stack, result)?;
            }
            Instruction::Negate => {
                let value = pop(stack)?;
                push(stack, value.wrapping_neg())?;
            }
            Instruction::Sqrt => {
                let value = pop(stack)?;
                let result = square_root(value).ok_or(MachineError::NegativeSquareRoot(value))?;
                push(stack, result)?;
            }
            Instruction::Print => {
                let value = pop(stack)?;
                writeln!(out, "{PRINT_PREFIX}{value}")?;
            }
        }
        Ok(())
    }
}

impl<const STACK_SIZE: usize> Default for Machine<STACK_SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

fn pop<const STACK_SIZE: usize>(stack: &mut Vec<Value, STACK_SIZE>) -> Result<Value, MachineError> {
    stack.pop().ok_or(MachineError::StackUnderflow)
}

/// Pops the right operand first, then the left.
fn pop2<const STACK_SIZE: usize>(
    stack: &mut Vec<Value, STACK_SIZE>,
) -> Result<(Value, Value), MachineError> {
    let rhs = pop(stack)?;
    let lhs = pop(stack)?;
    Ok((lhs, rhs))
}

fn push<const STACK_SIZE: usize>(
    stack: &mut Vec<Value, STACK_SIZE>,
    value: Value,
) -> Result<(), MachineError> {
    if stack.push(value).is_err() {
        return Err(MachineError::StackOverflow);
    }
    Ok(())
}
