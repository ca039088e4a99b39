//! MIPS pipeline simulator CLI.
//!
//! Assembles an input program, runs it through the 5-stage core to
//! completion, and reports per-stage utilization plus the final
//! architectural state -- either once to a batch output file, or once
//! per cycle in single-step mode.

use std::fs;
use std::process;

use clap::Parser;

use mips_pipesim::asm;
use mips_pipesim::core::memory::InstructionMemory;
use mips_pipesim::core::{Cpu, LatencyConfig};
use mips_pipesim::error::SimError;
use mips_pipesim::report;

/// `sim -s|-b m n c input_file output_file [--trace]`
#[derive(Parser, Debug)]
#[command(author, version, about = "Cycle-accurate 5-stage MIPS pipeline simulator")]
struct Args {
    /// Single-step mode: print registers and PC after every cycle, waiting for Enter.
    #[arg(short = 's', long = "single-step")]
    single_step: bool,

    /// Batch mode: run to completion and write one report to the output file.
    #[arg(short = 'b', long = "batch")]
    batch: bool,

    /// Cycles a MUL takes to resolve in EX.
    m: u32,
    /// Cycles every other EX operation takes to resolve.
    n: u32,
    /// Cycles a fetch or a memory access takes.
    c: u32,

    input_file: String,
    output_file: String,

    /// Emit per-cycle, per-stage diagnostics to stderr. Purely observational.
    #[arg(long)]
    trace: bool,
}

fn run(args: &Args) -> Result<(), SimError> {
    let source = fs::read_to_string(&args.input_file).map_err(|e| SimError::Io(e.to_string()))?;
    let program = asm::assemble(&source)?;
    let im = InstructionMemory::load(program.instructions)?;

    let latency = LatencyConfig {
        m: args.m,
        n: args.n,
        c: args.c,
    };
    let mut cpu = Cpu::new(im, latency, args.trace);

    if args.single_step {
        while !cpu.halted {
            cpu.tick()?;
            report::print_single_step(cpu.stats.cycles, &cpu.regs, cpu.pc);
        }
    } else {
        cpu.run()?;
    }

    cpu.stats.print(&args.input_file);

    if args.batch {
        let output = fs::File::create(&args.output_file).map_err(|e| SimError::Io(e.to_string()))?;
        report::write_batch_report(output, &args.input_file, &cpu.stats, &cpu.regs, cpu.pc)
            .map_err(|e| SimError::Io(e.to_string()))?;
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.single_step == args.batch {
        eprintln!("choose exactly one of -s (single-step) or -b (batch)");
        process::exit(1);
    }

    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
