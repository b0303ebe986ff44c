use super::*;
use crate::assembler::assemble;

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

fn run(text: &str) -> Result<(Outcome, String), MachineError> {
    let assembly = assemble(text).unwrap();
    let mut machine = DefaultMachine::new();
    let mut out = String::new();
    let outcome = machine.execute(&assembly.instructions, &mut out)?;
    Ok((outcome, out))
}

#[test]
fn test_push_and_print() -> Result<(), MachineError> {
    let (outcome, out) = run("PUSH 5\nPRINT\n")?;
    assert_eq!(out, "=== 5\n");
    assert_eq!(outcome.stack_depth, 0);
    assert!(outcome.symbols.is_empty());
    Ok(())
}

#[test]
fn test_operand_order() -> Result<(), MachineError> {
    // Right operand is popped first.
    let (_, out) = run("PUSH 5\nPUSH 25\nSUB\nPRINT\nPUSH 25\nPUSH 5\nDIV\nPRINT\n")?;
    assert_eq!(out, "=== -20\n=== 5\n");
    Ok(())
}

#[test]
fn test_arithmetic() -> Result<(), MachineError> {
    let (_, out) = run(
        "PUSH 5\nPUSH 25\nADD\nPRINT\n\
         PUSH 25\nPUSH 5\nMUL\nPRINT\n\
         PUSH 5\nNEG\nPRINT\n\
         PUSH 5\nSQRT\nPRINT\n\
         PUSH 25\nSQRT\nPRINT\n\
         PUSH -7\nPUSH 2\nDIV\nPRINT\n",
    )?;
    assert_eq!(out, "=== 30\n=== 125\n=== -5\n=== 2\n=== 5\n=== -3\n");
    Ok(())
}

#[test]
fn test_arithmetic_wraps() -> Result<(), MachineError> {
    let text = alloc::format!(
        "PUSH {max}\nPUSH 1\nADD\nPRINT\nPUSH {min}\nNEG\nPRINT\nPUSH {min}\nPUSH -1\nDIV\nPRINT\n",
        max = Value::MAX,
        min = Value::MIN,
    );
    let (_, out) = run(&text)?;
    assert_eq!(
        out,
        alloc::format!("=== {min}\n=== {min}\n=== {min}\n", min = Value::MIN)
    );
    Ok(())
}

#[test]
fn test_store_and_load() -> Result<(), MachineError> {
    let (outcome, out) = run("PUSH 3\nSTORE a\nLOAD a\nLOAD a\nMUL\nSTORE b\nPUSH 1\nSTORE a\n")?;
    assert_eq!(out, "");
    assert_eq!(outcome.stack_depth, 0);
    assert_eq!(outcome.symbols.get("a"), Some(1));
    assert_eq!(outcome.symbols.get("b"), Some(9));
    assert_eq!(outcome.symbols.len(), 2);
    Ok(())
}

#[test]
fn test_unbalanced_stack_is_reported() -> Result<(), MachineError> {
    let (outcome, _) = run("PUSH 1\nPUSH 2\nPUSH 3\nADD\n")?;
    assert_eq!(outcome.stack_depth, 2);
    Ok(())
}

#[test]
fn test_uninitialized_load() {
    let err = run("PUSH 1\nPRINT\nLOAD abracadabra\n").unwrap_err();
    assert_eq!(err, MachineError::Uninitialized("abracadabra".to_string()));
    assert_eq!(err.kind(), ErrorKind::Uninitialized);
}

#[test]
fn test_divide_by_zero() {
    let err = run("PUSH 5\nPUSH 0\nDIV\nPRINT\n").unwrap_err();
    assert_eq!(err, MachineError::DivideByZero);
    assert_eq!(err.kind(), ErrorKind::DivideByZero);
}

#[test]
fn test_negative_square_root() {
    let err = run("PUSH 4\nNEG\nSQRT\n").unwrap_err();
    assert_eq!(err, MachineError::NegativeSquareRoot(-4));
    assert_eq!(err.kind(), ErrorKind::IllegalValue);
}

#[test]
fn test_stack_underflow() {
    assert_eq!(run("PUSH 1\nADD\n").unwrap_err(), MachineError::StackUnderflow);
    assert_eq!(run("PRINT\n").unwrap_err(), MachineError::StackUnderflow);
    assert_eq!(run("STORE x\n").unwrap_err(), MachineError::StackUnderflow);
}

#[test]
fn test_stack_overflow() {
    let program = vec![Instruction::PushConst(1); 5];
    let mut machine = Machine::<4>::new();
    let mut out = String::new();
    let err = machine.execute(&program, &mut out).unwrap_err();
    assert_eq!(err, MachineError::StackOverflow);
    assert_eq!(machine.stack(), &[1, 1, 1, 1]);
}

#[test]
fn test_output_written_before_failure_is_kept() {
    let assembly = assemble("PUSH 1\nPRINT\nPUSH 1\nPUSH 0\nDIV\nPRINT\n").unwrap();
    let mut machine = DefaultMachine::new();
    let mut out = String::new();
    let result = machine.execute(&assembly.instructions, &mut out);
    assert!(result.is_err());
    assert_eq!(out, "=== 1\n");
}

#[test]
fn test_runs_are_independent() -> Result<(), MachineError> {
    let mut machine = DefaultMachine::new();
    assert_eq!(machine.state(), MachineState::Reset);
    let mut out = String::new();

    let first = [Instruction::PushConst(8), Instruction::Store("x".to_string()), Instruction::PushConst(1)];
    let outcome = machine.execute(&first, &mut out)?;
    assert_eq!(machine.state(), MachineState::Running);
    assert_eq!(outcome.stack_depth, 1);
    assert_eq!(machine.symbols().get("x"), Some(8));

    let second = [Instruction::Load("x".to_string())];
    let err = machine.execute(&second, &mut out).unwrap_err();
    assert_eq!(err, MachineError::Uninitialized("x".to_string()));

    machine.reset();
    assert_eq!(machine.state(), MachineState::Reset);
    assert!(machine.stack().is_empty());
    assert!(machine.symbols().is_empty());
    Ok(())
}

#[test]
fn test_report() -> Result<(), MachineError> {
    let (outcome, _) = run("PUSH 4\nSTORE b\nPUSH 3\nSTORE a\n")?;
    let mut report = String::new();
    outcome.report(&mut report).unwrap();
    assert_eq!(
        report,
        "Soros: execution ended with 0 items left on the stack.\n\na :   3\nb :   4\n"
    );
    Ok(())
}

#[test]
fn test_symbol_table() {
    let mut table = SymbolTable::new();
    assert!(table.is_empty());
    table.assign("zeta", 1);
    table.assign("alpha", 2);
    table.assign("zeta", 3);
    assert!(table.contains("zeta"));
    assert!(!table.contains("beta"));
    assert_eq!(table.get("zeta"), Some(3));
    assert_eq!(table.get("beta"), None);
    let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
    let rebuilt: SymbolTable = [("alpha", 2), ("zeta", 3)].into_iter().collect();
    assert_eq!(rebuilt, table);
}

#[test]
fn test_helpers() {
    assert_eq!(square_root(0), Some(0));
    assert_eq!(square_root(24), Some(4));
    assert_eq!(square_root(Value::MAX), Some(46340));
    assert_eq!(square_root(-1), None);
    assert_eq!(divide(7, 0), None);
    assert_eq!(divide(-7, 2), Some(-3));
}
