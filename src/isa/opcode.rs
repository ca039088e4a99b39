use std::fmt;

/// The operations understood by the core. `DeadBeq` never appears in a
/// program; it is written into ID/EX by the decode stage to neutralize a
/// branch that has already resolved, so a second BEQ entering behind it
/// can't retrigger the freeze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    Add,
    Addi,
    Sub,
    Mul,
    Beq,
    Lw,
    Sw,
    Halt,
    DeadBeq,
}

impl Opcode {
    pub fn kind(self) -> InstKind {
        match self {
            Opcode::Add | Opcode::Sub | Opcode::Mul => InstKind::RType,
            Opcode::Addi | Opcode::Beq | Opcode::Lw | Opcode::Sw => InstKind::IType,
            Opcode::Halt | Opcode::DeadBeq => InstKind::Na,
        }
    }

    /// Whether the decode stage must read `rt` out of the register file
    /// (as opposed to treating the field as a destination index).
    pub fn reads_rt(self) -> bool {
        matches!(self, Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Beq | Opcode::Sw)
    }

    pub fn reads_rs(self) -> bool {
        matches!(
            self,
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Beq | Opcode::Addi | Opcode::Lw | Opcode::Sw
        )
    }

    pub fn ex_latency(self, m: u32, n: u32) -> u32 {
        if self == Opcode::Mul {
            m
        } else {
            n
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Addi => "addi",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Beq => "beq",
            Opcode::Lw => "lw",
            Opcode::Sw => "sw",
            Opcode::Halt => "haltSimulation",
            Opcode::DeadBeq => "deadbeq",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Mirrors the operand shape used to drive the assembler's dispatch and,
/// historically, the decode stage's type-level validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstKind {
    RType,
    IType,
    Na,
}
