// Line oriented decoder for Soros assembly text.
//
// Each non-blank line is `MNEMONIC` or `MNEMONIC operand`. Unknown mnemonics
// are warned about and skipped, a line holding only `.` ends the input, and
// anything else malformed is a hard error tagged with its line number.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use log::{debug, warn};
use thiserror_no_std::Error;

use crate::{Instruction, Opcode, Value};

/// Line that ends decoding early.
pub const END_OF_INPUT: &str = ".";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblerError {
    #[error("{0}")]
    Kind(AssemblerErrorKind),
    #[error("line {line}: {kind}")]
    WithLine { line: u32, kind: AssemblerErrorKind },
}

impl AssemblerError {
    fn with_line(self, line: u32) -> Self {
        match self {
            AssemblerError::WithLine { .. } => self,
            AssemblerError::Kind(kind) => AssemblerError::WithLine { line, kind },
        }
    }

    pub fn line_number(&self) -> Option<u32> {
        match self {
            Self::Kind(_) => None,
            Self::WithLine { line, .. } => Some(*line),
        }
    }

    pub fn error_kind(&self) -> &AssemblerErrorKind {
        match self {
            Self::Kind(kind) => kind,
            Self::WithLine { kind, .. } => kind,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblerErrorKind {
    #[error("{0} needs an operand")]
    MissingOperand(Opcode),
    #[error("{0} takes no operand")]
    UnexpectedOperand(Opcode),
    #[error("more than one operand")]
    TooManyTokens,
    #[error("{0} is not a valid integer")]
    InvalidNumber(String),
    #[error("too many lines")]
    LineNumberOverflow,
}

/// A skipped line. Assembly carries on after a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerWarning {
    pub line: u32,
    pub mnemonic: String,
}

impl fmt::Display for AssemblerWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: illegal assembly instr {}", self.line, self.mnemonic)
    }
}

/// What happened to a single line handed to [`Assembler::add_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    Decoded,
    Blank,
    /// Unknown mnemonic, recorded as a warning.
    Skipped,
    /// The end of input sentinel, or any line after it.
    Finished,
}

/// Decoded program together with the lines that were skipped on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    pub instructions: Vec<Instruction>,
    pub warnings: Vec<AssemblerWarning>,
}

#[derive(Debug, Default)]
pub struct Assembler {
    instructions: Vec<Instruction>,
    warnings: Vec<AssemblerWarning>,
    line_number: u32,
    finished: bool,
}

impl Assembler {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
            warnings: Vec::new(),
            line_number: 0,
            finished: false,
        }
    }

    /// True once the `.` sentinel has been seen.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn add_line(&mut self, line: &str) -> Result<LineStatus, AssemblerError> {
        if self.finished {
            return Ok(LineStatus::Finished);
        }
        self.line_number = self
            .line_number
            .checked_add(1)
            .ok_or(AssemblerError::Kind(AssemblerErrorKind::LineNumberOverflow))?;
        let line_number = self.line_number;

        let mut tokens = line.split_whitespace();
        let Some(mnemonic) = tokens.next() else {
            return Ok(LineStatus::Blank);
        };

        if mnemonic == END_OF_INPUT {
            debug!("end of input at line {line_number}");
            self.finished = true;
            return Ok(LineStatus::Finished);
        }

        let Some(opcode) = Opcode::from_mnemonic(mnemonic) else {
            warn!("line {line_number}: illegal assembly instr {mnemonic}");
            self.warnings.push(AssemblerWarning {
                line: line_number,
                mnemonic: String::from(mnemonic),
            });
            return Ok(LineStatus::Skipped);
        };

        let operand = tokens.next();
        if tokens.next().is_some() {
            // Only the operand slot may follow the mnemonic.
            return Err(AssemblerError::Kind(AssemblerErrorKind::TooManyTokens).with_line(line_number));
        }

        let instruction = decode(opcode, operand).map_err(|err| err.with_line(line_number))?;
        self.instructions.push(instruction);
        Ok(LineStatus::Decoded)
    }

    pub fn finish(self) -> Assembly {
        debug!(
            "assembled {} instructions, {} warnings",
            self.instructions.len(),
            self.warnings.len()
        );
        Assembly {
            instructions: self.instructions,
            warnings: self.warnings,
        }
    }
}

/// Assembles every line of `text`.
pub fn assemble(text: &str) -> Result<Assembly, AssemblerError> {
    assemble_lines(text.lines())
}

pub fn assemble_lines<'a, I>(lines: I) -> Result<Assembly, AssemblerError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut assembler = Assembler::new();
    for line in lines {
        if assembler.add_line(line)? == LineStatus::Finished {
            break;
        }
    }
    Ok(assembler.finish())
}

fn decode(opcode: Opcode, operand: Option<&str>) -> Result<Instruction, AssemblerError> {
    let operand = match (opcode.takes_operand(), operand) {
        (true, Some(token)) => token,
        (true, None) => {
            return Err(AssemblerError::Kind(AssemblerErrorKind::MissingOperand(opcode)));
        }
        (false, Some(_)) => {
            return Err(AssemblerError::Kind(AssemblerErrorKind::UnexpectedOperand(opcode)));
        }
        (false, None) => "",
    };

    let instruction = match opcode {
        Opcode::Push => Instruction::PushConst(parse_value(operand)?),
        Opcode::Load => Instruction::Load(String::from(operand)),
        Opcode::Store => Instruction::Store(String::from(operand)),
        Opcode::Add => Instruction::Add,
        Opcode::Subtract => Instruction::Sub,
        Opcode::Multiply => Instruction::Mul,
        Opcode::Divide => Instruction::Div,
        Opcode::Negate => Instruction::Negate,
        Opcode::SquareRoot => Instruction::Sqrt,
        Opcode::Print => Instruction::Print,
    };
    Ok(instruction)
}

fn parse_value(token: &str) -> Result<Value, AssemblerError> {
    token
        .parse::<Value>()
        .map_err(|_| AssemblerError::Kind(AssemblerErrorKind::InvalidNumber(String::from(token))))
}
