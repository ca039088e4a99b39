//! Per-stage useful-cycle accounting and the utilization figures derived
//! from it once the run halts.

/// Accumulates, over the life of a run, how many cycles each stage
/// spent doing real work (as opposed to stalling, waiting on a latch,
/// or simply being empty). `cycles` is the total number of simulation
/// cycles executed.
#[derive(Default, Debug)]
pub struct Stats {
    pub cycles: u64,
    pub if_useful_cycles: u64,
    pub id_useful_cycles: u64,
    pub ex_useful_cycles: u64,
    pub mem_useful_cycles: u64,
    pub wb_useful_cycles: u64,
}

/// Utilization of each of the five stages, in IF/ID/EX/MEM/WB order.
pub struct Utilization(pub [f64; 5]);

impl Stats {
    pub fn utilization(&self) -> Utilization {
        let cycles = if self.cycles == 0 { 1 } else { self.cycles } as f64;
        Utilization([
            self.if_useful_cycles as f64 / cycles,
            self.id_useful_cycles as f64 / cycles,
            self.ex_useful_cycles as f64 / cycles,
            self.mem_useful_cycles as f64 / cycles,
            self.wb_useful_cycles as f64 / cycles,
        ])
    }

    /// Human-readable summary, printed to stdout regardless of run mode.
    pub fn print(&self, program_name: &str) {
        let Utilization([if_u, id_u, ex_u, mem_u, wb_u]) = self.utilization();
        println!("Program name: {program_name}");
        println!("Stage utilization: {if_u:.6}  {id_u:.6}  {ex_u:.6}  {mem_u:.6}  {wb_u:.6}");
        println!("Total CPU Cycles: {}", self.cycles);
    }
}
