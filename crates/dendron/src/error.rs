use alloc::string::String;
use core::fmt;

use soros::assembler::AssemblerError;
use soros::{ErrorKind, MachineError, Value};
use thiserror_no_std::Error;

pub type DendronResult<T> = Result<T, DendronError>;

/// Everything that can stop a parse, an interpretation or a compiled run.
///
/// Each error aborts the whole run it occurs in; nothing is retried or
/// resumed. The variants map onto the shared [`ErrorKind`] taxonomy through
/// [`DendronError::kind`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DendronError {
    #[error("premature end of program")]
    PrematureEnd,
    #[error("illegal value {}", Offending(.0))]
    IllegalValue(Option<String>),
    #[error("division by zero")]
    DivideByZero,
    #[error("variable {0} is uninitialized")]
    Uninitialized(String),
    #[error("square root of negative value {0}")]
    NegativeSquareRoot(Value),
    #[error("expression nested deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error("could not write program output")]
    Output,
    #[error("compiled code failed to assemble: {0}")]
    Assembly(#[from] AssemblerError),
    #[error("compiled code failed: {0}")]
    Machine(#[from] MachineError),
}

impl DendronError {
    pub(crate) fn illegal(token: &str) -> Self {
        DendronError::IllegalValue(Some(String::from(token)))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DendronError::PrematureEnd => ErrorKind::PrematureEnd,
            DendronError::IllegalValue(_) => ErrorKind::IllegalValue,
            DendronError::DivideByZero => ErrorKind::DivideByZero,
            DendronError::Uninitialized(_) => ErrorKind::Uninitialized,
            DendronError::NegativeSquareRoot(_) => ErrorKind::IllegalValue,
            DendronError::NestingTooDeep(_) => ErrorKind::IllegalValue,
            DendronError::Output => ErrorKind::Output,
            DendronError::Assembly(_) => ErrorKind::IllegalValue,
            DendronError::Machine(err) => err.kind(),
        }
    }
}

impl From<fmt::Error> for DendronError {
    fn from(_: fmt::Error) -> Self {
        DendronError::Output
    }
}

struct Offending<'a>(&'a Option<String>);

impl fmt::Display for Offending<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(token) => write!(f, "'{token}'"),
            None => f.write_str("at end of input"),
        }
    }
}
