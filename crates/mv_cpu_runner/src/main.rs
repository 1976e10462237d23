use std::fs;
use std::process;

use clap::Parser;
use colored::Colorize;
use mv_cpu::{Cpu, CpuError, StepTrace};
use tracing::{info, Level};

/// Standardized exit codes for the runner.
/// 0 = step budget exhausted without fault, 2 = image load error,
/// 3 = execution fault, 1 = other.
const EXIT_OTHER: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_FAULT: i32 = 3;

#[derive(Parser)]
#[command(
    name = "mv_cpu_runner",
    version,
    about = "MV-CPU runner — load a program image and execute it"
)]
struct Cli {
    /// Path to the program image (raw bytes, loaded at address 0)
    image: String,

    /// Stop cleanly after this many instructions (default: run until fault)
    #[arg(long)]
    max_steps: Option<u64>,

    /// Print per-step snapshots as JSON lines instead of register dumps
    #[arg(long)]
    json: bool,

    /// Suppress per-step output
    #[arg(long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("{} {err:#}", "error:".red().bold());
        process::exit(exit_code(&err));
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CpuError>() {
        Some(CpuError::ImageLoad { .. }) => EXIT_INPUT,
        Some(_) => EXIT_FAULT,
        None => EXIT_OTHER,
    }
}

fn load_image(path: &str) -> Result<Vec<u8>, CpuError> {
    fs::read(path).map_err(|err| CpuError::ImageLoad {
        path: path.to_string(),
        detail: err.to_string(),
    })
}

fn dump(trace: &StepTrace) {
    let operands = trace
        .operands
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "#{} {} {:02x} {}",
        trace.step,
        trace.mnemonic.bold(),
        trace.opcode,
        operands
    );
    for (name, value) in ["R0", "R1", "R2", "R3"].iter().zip(trace.regs) {
        println!("{}: {:02x}", name.cyan(), value);
    }
    println!("{}: {:02x}", "PC".cyan(), trace.pc);
    println!("{}: {}", "ZF".cyan(), trace.zf);
    println!();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let image = load_image(&cli.image)?;
    info!("image loaded, memory size: {} bytes", image.len());

    let mut cpu = Cpu::new(image);
    let report = |trace: &StepTrace| {
        if cli.quiet {
            return;
        }
        if cli.json {
            // serializing a StepTrace cannot fail
            println!("{}", serde_json::to_string(trace).expect("step trace json"));
        } else {
            dump(trace);
        }
    };

    match cli.max_steps {
        Some(budget) => {
            for _ in 0..budget {
                let trace = cpu.step()?;
                report(&trace);
            }
            info!("step budget exhausted after {} instructions, halting", cpu.steps());
            Ok(())
        }
        None => {
            cpu.run_with(report)?;
            Ok(())
        }
    }
}
