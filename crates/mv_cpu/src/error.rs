use thiserror::Error;

/// Faults raised while loading or executing a program image.
///
/// All of them are fatal: execution stops at the first fault and the error
/// is surfaced to the caller unchanged. Nothing is retried or recovered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CpuError {
    /// A memory access addressed a location outside the loaded image,
    /// including program-counter fetches past the end.
    #[error("memory access out of bounds: address {addr:#x}, memory size {len}")]
    OutOfBounds { addr: u64, len: u64 },
    /// A register selector byte did not name any general-purpose register.
    #[error("invalid register selector {selector:#04x} at {addr:#x}")]
    InvalidRegister { selector: u8, addr: u64 },
    /// The opcode byte at the program counter is not in the instruction table.
    #[error("unsupported instruction {opcode:#04x} at {addr:#x}")]
    UnsupportedInstruction { opcode: u8, addr: u64 },
    /// The program image could not be obtained from its source.
    #[error("cannot load program image {path}: {detail}")]
    ImageLoad { path: String, detail: String },
}

pub type Result<T> = std::result::Result<T, CpuError>;
