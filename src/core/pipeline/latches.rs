use crate::isa::Instruction;

/// The four inter-stage latches. Each one is single-entry: `None` means
/// empty (and therefore stale for hazard-checking purposes), `Some`
/// means occupied. There is no bundle width here, unlike a superscalar
/// design -- one instruction per latch, full stop.
#[derive(Default)]
pub struct Latches {
    pub if_id: Option<Instruction>,
    pub id_ex: Option<Instruction>,
    pub ex_mem: Option<Instruction>,
    pub mem_wb: Option<Instruction>,
}
