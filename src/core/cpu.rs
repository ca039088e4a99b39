use crate::core::memory::{DataMemory, InstructionMemory};
use crate::core::pipeline::stages;
use crate::core::pipeline::Latches;
use crate::core::regfile::RegisterFile;
use crate::error::OperationalError;
use crate::stats::Stats;

/// The three latency parameters every program is run with: `m` cycles
/// for a MUL to reach its result, `n` cycles for every other EX
/// operation, `c` cycles for a fetch or a memory access.
#[derive(Clone, Copy, Debug)]
pub struct LatencyConfig {
    pub m: u32,
    pub n: u32,
    pub c: u32,
}

/// Owns every piece of simulator state and drives it one cycle at a
/// time. Stage functions take `&mut Cpu` rather than threading
/// individual pieces of state through, mirroring how the stages
/// themselves share one pipeline in hardware.
pub struct Cpu {
    pub regs: RegisterFile,
    pub im: InstructionMemory,
    pub dm: DataMemory,
    pub pc: u32,
    pub latches: Latches,
    pub latency: LatencyConfig,
    pub stats: Stats,
    pub halted: bool,
    pub trace: bool,

    pub(crate) if_cycles: u32,
    pub(crate) ex_cycles: u32,
    pub(crate) mem_timer: u32,
    pub(crate) beq_timer: u32,
}

impl Cpu {
    pub fn new(im: InstructionMemory, latency: LatencyConfig, trace: bool) -> Self {
        Cpu {
            regs: RegisterFile::default(),
            im,
            dm: DataMemory::default(),
            pc: 0,
            latches: Latches::default(),
            latency,
            stats: Stats::default(),
            halted: false,
            trace,
            if_cycles: 0,
            ex_cycles: 0,
            mem_timer: 0,
            beq_timer: 0,
        }
    }

    /// Runs every stage exactly once, in write-back-first order, so a
    /// stage that frees its output latch this cycle is already empty by
    /// the time the stage upstream of it checks for room to advance.
    pub fn tick(&mut self) -> Result<(), OperationalError> {
        stages::write_back::run(self);
        stages::memory_access::run(self)?;
        stages::execute::run(self);
        stages::decode::run(self);
        stages::fetch::run(self)?;
        self.stats.cycles += 1;
        if self.trace {
            log::trace!(
                "cycle {:>5}  IF:{} ID:{} EX:{} MEM:{} WB:{}",
                self.stats.cycles,
                occ(&self.latches.if_id),
                occ(&self.latches.id_ex),
                occ(&self.latches.ex_mem),
                occ(&self.latches.mem_wb),
                if self.halted { "HALT" } else { "-" },
            );
        }
        Ok(())
    }

    pub fn run(&mut self) -> Result<(), OperationalError> {
        while !self.halted {
            self.tick()?;
        }
        Ok(())
    }
}

fn occ(latch: &Option<crate::isa::Instruction>) -> &'static str {
    match latch {
        Some(inst) => inst.opcode.mnemonic(),
        None => "-",
    }
}
