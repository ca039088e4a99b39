//! Output formatting that has to match the batch-mode file format byte
//! for byte, plus the single-step interactive printout.

use std::io::{self, Write};

use crate::core::regfile::RegisterFile;
use crate::isa::registers::REGISTER_COUNT;
use crate::stats::{Stats, Utilization};

pub fn write_batch_report<W: Write>(
    mut out: W,
    program_name: &str,
    stats: &Stats,
    regs: &RegisterFile,
    pc: u32,
) -> io::Result<()> {
    let Utilization([if_u, id_u, ex_u, mem_u, wb_u]) = stats.utilization();
    writeln!(out, "program name: {program_name}")?;
    writeln!(out, "stage utilization: {if_u:.6}  {id_u:.6}  {ex_u:.6}  {mem_u:.6}  {wb_u:.6} ")?;

    write!(out, "register values ")?;
    let values = regs.snapshot();
    for value in &values[1..REGISTER_COUNT] {
        write!(out, "{value}  ")?;
    }
    writeln!(out, "{pc}")?;
    Ok(())
}

/// Prints the single cycle's register snapshot and waits for the user
/// to press Enter, matching single-step mode's interactive pacing.
pub fn print_single_step(cycle: u64, regs: &RegisterFile, pc: u32) {
    print!("cycle: {cycle} register value: ");
    let values = regs.snapshot();
    for value in &values[1..REGISTER_COUNT] {
        print!("{value}  ");
    }
    println!();
    println!("program counter: {pc}");
    println!("press ENTER to continue");
    let mut discard = String::new();
    let _ = io::stdin().read_line(&mut discard);
}
