use crate::core::cpu::Cpu;
use crate::error::OperationalError;
use crate::isa::opcode::Opcode;

/// Services a load or store over `c` cycles; everything else passes
/// through EX/MEM untouched in a single cycle. Write-back never stalls
/// on this stage, so once an access completes it either finishes here
/// (SW) or hands straight to MEM/WB (LW).
pub fn run(cpu: &mut Cpu) -> Result<(), OperationalError> {
    let Some(inst) = cpu.latches.ex_mem else {
        return Ok(());
    };

    match inst.opcode {
        Opcode::Sw | Opcode::Lw => {
            if cpu.mem_timer == 0 {
                cpu.mem_timer = cpu.latency.c;
            }
            cpu.mem_timer -= 1;
            cpu.stats.mem_useful_cycles += 1;

            if cpu.mem_timer == 0 {
                if inst.opcode == Opcode::Sw {
                    cpu.dm.write(inst.ex_result, inst.rt)?;
                    cpu.latches.ex_mem = None;
                } else {
                    let mut loaded = inst;
                    loaded.ex_result = cpu.dm.read(inst.ex_result)?;
                    cpu.latches.mem_wb = Some(loaded);
                    cpu.latches.ex_mem = None;
                }
            }
        }
        _ => {
            cpu.latches.mem_wb = Some(inst);
            cpu.latches.ex_mem = None;
        }
    }
    Ok(())
}
