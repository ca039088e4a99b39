use crate::core::cpu::Cpu;
use crate::core::pipeline::hazards;
use crate::isa::opcode::Opcode;

/// Decodes the instruction sitting in IF/ID: canonicalizes its
/// destination register, checks for a RAW hazard against every
/// downstream latch, and either dispatches it into ID/EX or stalls.
///
/// A branch that clears the hazard check and dispatches starts a
/// freeze: IF/ID is deliberately left occupied (not advanced) for
/// `n + 1` cycles while EX resolves it, which is also what blocks a
/// second BEQ from entering behind it. The hazard check wraps that
/// freeze countdown too, so a RAW hazard against a latch still draining
/// from an earlier instruction holds the timer, not just new dispatch.
pub fn run(cpu: &mut Cpu) {
    if let Some(inst) = cpu.latches.if_id.as_mut() {
        if matches!(inst.opcode, Opcode::Addi | Opcode::Lw) {
            inst.rd = Some(inst.rt as u8);
        }
    }

    let Some(if_id) = cpu.latches.if_id else { return };

    if hazards::raw_hazard(&if_id, &cpu.latches.id_ex, &cpu.latches.ex_mem, &cpu.latches.mem_wb) {
        return;
    }

    let id_ex_empty = cpu.latches.id_ex.is_none();

    // `cpu.beq_timer == 0` is this port's equivalent of the original's
    // `ID_EX_latch.op != BEQ`: once a freeze is armed, EX eventually
    // empties ID/EX on its own (execute.rs's `take()`), and an
    // `Option`-based latch can't tell "never occupied" apart from
    // "occupied, then drained" the way a sticky `.op` field can. Gating
    // on the timer instead of on occupancy keeps a BEQ from redispatching
    // itself the moment EX clears it mid-freeze.
    if if_id.opcode == Opcode::Beq && id_ex_empty && cpu.beq_timer == 0 {
        let mut dispatched = if_id;
        dispatched.rs = cpu.regs.read(dispatched.rs as u8);
        dispatched.rt = cpu.regs.read(dispatched.rt as u8);
        cpu.latches.id_ex = Some(dispatched);
        cpu.beq_timer = cpu.latency.n + 1;
        cpu.stats.id_useful_cycles += 1;
        // IF/ID stays occupied: the branch freezes fetch until it resolves.
        return;
    }

    if cpu.beq_timer != 0 {
        if cpu.beq_timer > 1 {
            cpu.beq_timer -= 1;
        } else {
            cpu.beq_timer = 0;
            cpu.latches.if_id = None;
            if let Some(id_ex) = cpu.latches.id_ex.as_mut() {
                id_ex.opcode = Opcode::DeadBeq;
            }
        }
        return;
    }

    if !id_ex_empty {
        return;
    }

    match if_id.opcode {
        Opcode::Halt => {
            cpu.latches.id_ex = Some(if_id);
            // IF/ID intentionally left occupied; nothing follows HALT.
        }
        Opcode::Add | Opcode::Sub | Opcode::Mul => {
            let mut dispatched = if_id;
            dispatched.rs = cpu.regs.read(dispatched.rs as u8);
            dispatched.rt = cpu.regs.read(dispatched.rt as u8);
            cpu.latches.id_ex = Some(dispatched);
            cpu.latches.if_id = None;
            cpu.stats.id_useful_cycles += 1;
        }
        Opcode::Addi | Opcode::Lw => {
            let mut dispatched = if_id;
            dispatched.rs = cpu.regs.read(dispatched.rs as u8);
            cpu.latches.id_ex = Some(dispatched);
            cpu.latches.if_id = None;
            cpu.stats.id_useful_cycles += 1;
        }
        Opcode::Sw => {
            let mut dispatched = if_id;
            dispatched.rs = cpu.regs.read(dispatched.rs as u8);
            dispatched.rt = cpu.regs.read(dispatched.rt as u8);
            cpu.latches.id_ex = Some(dispatched);
            cpu.latches.if_id = None;
            cpu.stats.id_useful_cycles += 1;
        }
        Opcode::Beq | Opcode::DeadBeq => unreachable!("handled above"),
    }
}
