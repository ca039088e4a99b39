//! Structured error types for the assembler and the running simulation.

use thiserror::Error;

/// A failure while turning source text into an assembled program.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}, column {column}: {message}\n  {source_line}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub source_line: String,
    pub message: String,
}

/// A failure discovered while the pipeline is actually running. By the
/// time execution starts, the program has already been assembled
/// successfully, so these only arise from bounds a correct assembler
/// can't check up front (an address computed at runtime, a program
/// whose control flow never reaches HALT).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OperationalError {
    #[error(
        "program counter {pc:#x} ran past the end of instruction memory ({size} instructions) \
         without reaching HALT"
    )]
    PcPastEnd { pc: u32, size: usize },

    #[error("data memory access at word address {word} is out of range (0..{size})")]
    DataMemoryOutOfRange { word: i64, size: usize },

    #[error("program contains {count} instructions, which exceeds the {max}-instruction capacity of instruction memory")]
    InstructionMemoryOverflow { count: usize, max: usize },
}

/// Top-level error returned by the CLI driver.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Operational(#[from] OperationalError),
    #[error("{0}")]
    Io(String),
}
