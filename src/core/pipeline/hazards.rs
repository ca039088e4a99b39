use crate::isa::Instruction;

/// True if `candidate` (sitting in IF/ID) reads a register that any
/// occupied downstream latch will write. An empty latch (`None`) is
/// stale -- its write, if any, has already landed -- and never blocks.
///
/// This is the pipeline's only hazard-resolution mechanism: there is no
/// forwarding, so a RAW hazard simply freezes decode until the
/// conflicting latch drains.
pub fn raw_hazard(
    candidate: &Instruction,
    id_ex: &Option<Instruction>,
    ex_mem: &Option<Instruction>,
    mem_wb: &Option<Instruction>,
) -> bool {
    let (rs, rt) = candidate.source_indices();
    [id_ex, ex_mem, mem_wb].into_iter().flatten().any(|occupant| {
        let Some(rd) = occupant.rd else { return false };
        Some(rd) == rs || Some(rd) == rt
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::opcode::Opcode;

    fn r_type(opcode: Opcode, rd: u8, rs: i32, rt: i32) -> Instruction {
        let mut inst = Instruction::new(opcode, 1);
        inst.rd = Some(rd);
        inst.rs = rs;
        inst.rt = rt;
        inst
    }

    #[test]
    fn no_hazard_when_all_latches_empty() {
        let candidate = r_type(Opcode::Add, 1, 2, 3);
        assert!(!raw_hazard(&candidate, &None, &None, &None));
    }

    #[test]
    fn hazard_when_source_matches_occupied_destination() {
        let candidate = r_type(Opcode::Add, 1, 2, 3);
        let producer = r_type(Opcode::Addi, 2, 5, 0);
        assert!(raw_hazard(&candidate, &Some(producer), &None, &None));
    }

    #[test]
    fn no_hazard_against_a_stale_empty_latch() {
        let candidate = r_type(Opcode::Add, 1, 2, 3);
        let producer = r_type(Opcode::Addi, 2, 5, 0);
        assert!(!raw_hazard(&candidate, &None, &Some(producer), &None));
        // only checks the latch actually passed as occupied:
        assert!(raw_hazard(&candidate, &Some(producer), &None, &None));
    }

    #[test]
    fn no_hazard_against_a_latch_with_no_destination() {
        let candidate = r_type(Opcode::Add, 1, 2, 3);
        let mut sw = Instruction::new(Opcode::Sw, 1);
        sw.rd = None;
        sw.rs = 2;
        sw.rt = 9;
        assert!(!raw_hazard(&candidate, &Some(sw), &None, &None));
    }
}
