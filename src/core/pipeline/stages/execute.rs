use crate::core::cpu::Cpu;
use crate::isa::opcode::Opcode;
use crate::isa::Instruction;

fn compute_result(inst: &Instruction) -> i32 {
    match inst.opcode {
        Opcode::Add => inst.rs.wrapping_add(inst.rt),
        Opcode::Addi => inst.rs.wrapping_add(inst.immediate as i32),
        Opcode::Sub => inst.rs.wrapping_sub(inst.rt),
        Opcode::Mul => inst.rs.wrapping_mul(inst.rt),
        Opcode::Beq => inst.rt.wrapping_sub(inst.rs),
        Opcode::Lw | Opcode::Sw => inst.rs.wrapping_add(inst.immediate as i32),
        Opcode::Halt | Opcode::DeadBeq => 0,
    }
}

/// Executes whatever sits in ID/EX. A MUL takes `m` cycles to resolve;
/// everything else takes `n`. Once resolved, the instruction is held in
/// ID/EX (recomputing its result redundantly, which is harmless) until
/// EX/MEM has room to receive it.
pub fn run(cpu: &mut Cpu) {
    let Some(mut inst) = cpu.latches.id_ex else { return };

    cpu.ex_cycles += 1;
    let latency = inst.opcode.ex_latency(cpu.latency.m, cpu.latency.n);
    let resolved = cpu.ex_cycles >= latency;

    if resolved {
        inst.ex_result = compute_result(&inst);
        if inst.opcode == Opcode::Beq && inst.ex_result == 0 {
            // `cpu.pc` has already advanced past the branch itself (IF froze
            // right after fetching it), so the branch's own address is
            // `cpu.pc - 4`; the target is that address plus `4 * immediate`.
            let branch_addr = (cpu.pc as i32).wrapping_sub(4);
            let offset = (inst.immediate as i32).wrapping_mul(4);
            cpu.pc = branch_addr.wrapping_add(offset) as u32;
        }
    }

    cpu.latches.id_ex = Some(inst);

    if resolved && cpu.latches.ex_mem.is_none() {
        cpu.latches.ex_mem = cpu.latches.id_ex.take();
        cpu.ex_cycles = 0;
        match inst.opcode {
            Opcode::Mul => cpu.stats.ex_useful_cycles += cpu.latency.m as u64,
            Opcode::Halt => {}
            _ => cpu.stats.ex_useful_cycles += cpu.latency.n as u64,
        }
    }
}
