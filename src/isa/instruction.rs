use super::opcode::{InstKind, Opcode};

/// A single instruction record as it travels through the pipeline.
///
/// `rs` and `rt` are deliberately dual-purpose: while the record sits in
/// the IF/ID latch they hold register *indices* (0-31), and the decode
/// stage overwrites them with the register *values* at the moment it
/// dispatches into ID/EX. Everything downstream of decode only ever sees
/// values. This mirrors the hazard check, which must compare the IF/ID
/// indices against the destination of every occupied latch before that
/// substitution happens.
#[derive(Clone, Copy, Debug)]
pub struct Instruction {
    pub opcode: Opcode,
    pub kind: InstKind,
    pub rs: i32,
    pub rt: i32,
    /// Destination register, already canonicalized: ADDI and LW mirror
    /// `rt` into this field during decode so every later stage has a
    /// single destination to look at. `None` for instructions that never
    /// write a register (BEQ, SW, HALT, DEADBEQ).
    pub rd: Option<u8>,
    pub immediate: i16,
    pub ex_result: i32,
    pub source_line: u32,
}

impl Instruction {
    pub fn new(opcode: Opcode, source_line: u32) -> Self {
        Instruction {
            opcode,
            kind: opcode.kind(),
            rs: 0,
            rt: 0,
            rd: None,
            immediate: 0,
            ex_result: 0,
            source_line,
        }
    }

    pub fn halt(source_line: u32) -> Self {
        Instruction::new(Opcode::Halt, source_line)
    }

    /// The register sources still expressed as indices. Only meaningful
    /// before the decode stage substitutes values in place.
    pub fn source_indices(&self) -> (Option<u8>, Option<u8>) {
        let rs = if self.opcode.reads_rs() {
            Some(self.rs as u8)
        } else {
            None
        };
        let rt = if self.opcode.reads_rt() {
            Some(self.rt as u8)
        } else {
            None
        };
        (rs, rt)
    }
}
