use core::fmt;

use alloc::string::String;
use variant_count::VariantCount;

use crate::Value;

/// Operation codes of the Soros machine, without operands.
#[derive(VariantCount, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Push,
    Load,
    Store,
    Add,
    Subtract,
    Multiply,
    Divide,
    Negate,
    SquareRoot,
    Print,
}

// Must list every opcode exactly once.
const MNEMONICS: [(Opcode, &str); Opcode::VARIANT_COUNT] = [
    (Opcode::Push, "PUSH"),
    (Opcode::Load, "LOAD"),
    (Opcode::Store, "STORE"),
    (Opcode::Add, "ADD"),
    (Opcode::Subtract, "SUB"),
    (Opcode::Multiply, "MUL"),
    (Opcode::Divide, "DIV"),
    (Opcode::Negate, "NEG"),
    (Opcode::SquareRoot, "SQRT"),
    (Opcode::Print, "PRINT"),
];

impl Opcode {
    pub fn mnemonic(self) -> &'static str {
        match MNEMONICS.iter().find(|(op, _)| *op == self) {
            Some((_, mnemonic)) => mnemonic,
            None => "",
        }
    }

    /// Mnemonics are case sensitive, upper case only.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        MNEMONICS
            .iter()
            .find(|(_, text)| *text == mnemonic)
            .map(|(op, _)| *op)
    }

    /// `PUSH`, `LOAD` and `STORE` carry exactly one operand, the rest none.
    pub fn takes_operand(self) -> bool {
        matches!(self, Opcode::Push | Opcode::Load | Opcode::Store)
    }

    /// Net change of the operand stack depth.
    pub fn stack_effect(self) -> isize {
        match self {
            Opcode::Push | Opcode::Load => 1,
            Opcode::Store | Opcode::Print => -1,
            Opcode::Add | Opcode::Subtract | Opcode::Multiply | Opcode::Divide => -1,
            Opcode::Negate | Opcode::SquareRoot => 0,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A single machine instruction. A compiled program is a `[Instruction]`
/// executed front to back; there are no jumps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    PushConst(Value),
    Load(String),
    Store(String),
    Add,
    Sub,
    Mul,
    Div,
    Negate,
    Sqrt,
    Print,
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::PushConst(_) => Opcode::Push,
            Instruction::Load(_) => Opcode::Load,
            Instruction::Store(_) => Opcode::Store,
            Instruction::Add => Opcode::Add,
            Instruction::Sub => Opcode::Subtract,
            Instruction::Mul => Opcode::Multiply,
            Instruction::Div => Opcode::Divide,
            Instruction::Negate => Opcode::Negate,
            Instruction::Sqrt => Opcode::SquareRoot,
            Instruction::Print => Opcode::Print,
        }
    }
}

/// Renders the assembly text form, e.g. `PUSH 5` or `ADD`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode();
        match self {
            Instruction::PushConst(value) => write!(f, "{op} {value}"),
            Instruction::Load(name) | Instruction::Store(name) => write!(f, "{op} {name}"),
            _ => write!(f, "{op}"),
        }
    }
}
