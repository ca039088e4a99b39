use crate::core::cpu::Cpu;
use crate::error::OperationalError;

/// Fetches the next instruction once IF/ID is free and at least `c`
/// cycles have elapsed since the last fetch. The cycle counter keeps
/// ticking even while IF/ID is occupied, so a fetch that became eligible
/// while stalled fires on the very first cycle after the latch drains
/// rather than waiting another `c` cycles.
pub fn run(cpu: &mut Cpu) -> Result<(), OperationalError> {
    cpu.if_cycles += 1;

    if cpu.latches.if_id.is_some() {
        return Ok(());
    }
    if cpu.if_cycles < cpu.latency.c {
        return Ok(());
    }

    let inst = cpu.im.fetch(cpu.pc)?;
    cpu.latches.if_id = Some(inst);
    cpu.pc = cpu.pc.wrapping_add(4);
    cpu.if_cycles = 0;
    cpu.stats.if_useful_cycles += cpu.latency.c as u64;
    Ok(())
}
