//! MV-CPU - minimal register virtual CPU
//!
//! Goals:
//! - Flat byte memory, bounds-checked on every access
//! - Four signed 64-bit registers with wraparound arithmetic
//! - Fetch-decode-execute over a fixed 12-instruction table
//! - Crash-on-error: every fault is fatal and surfaced to the caller

pub mod error;
pub mod exec;
pub mod memory;
pub mod opcode;
pub mod registers;

pub use error::{CpuError, Result};
pub use exec::{Cpu, StepTrace};
pub use memory::Memory;
pub use opcode::Opcode;
pub use registers::{Reg, RegisterFile};
