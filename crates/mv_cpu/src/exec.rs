//! Fetch-decode-execute engine.

use crate::error::{CpuError, Result};
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::registers::{Reg, RegisterFile};

/// Snapshot handed to observers after each dispatched instruction.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StepTrace {
    pub step: u64,
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub operands: Vec<u8>,
    pub regs: [i64; 4],
    pub pc: u64,
    pub zf: bool,
}

/// The virtual CPU: memory plus register file, driven one instruction at a
/// time. Owns both exclusively; there is no shared or global state.
pub struct Cpu {
    mem: Memory,
    regs: RegisterFile,
    steps: u64,
}

impl Cpu {
    /// Builds a CPU with the program image loaded at address 0.
    /// Registers, program counter and zero flag start at zero.
    pub fn new(image: Vec<u8>) -> Self {
        Self {
            mem: Memory::load(image),
            regs: RegisterFile::new(),
            steps: 0,
        }
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Mutable register access for external tooling (debuggers, harnesses).
    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.regs
    }

    pub fn memory(&self) -> &Memory {
        &self.mem
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn resolve(&self, selector: u8, at: u64) -> Result<Reg> {
        Reg::from_selector(selector).ok_or(CpuError::InvalidRegister { selector, addr: at })
    }

    /// Executes the instruction at the program counter and returns its trace
    /// snapshot.
    ///
    /// Operand bytes are always fetched before selectors are resolved, so a
    /// truncated instruction faults with `OutOfBounds` rather than
    /// `InvalidRegister`.
    pub fn step(&mut self) -> Result<StepTrace> {
        let pc = self.regs.pc;
        let byte = self.mem.read(pc)?;
        let op = Opcode::try_from(byte)
            .map_err(|()| CpuError::UnsupportedInstruction { opcode: byte, addr: pc })?;

        let mut operands = Vec::with_capacity(2);
        for off in 1..op.encoded_len() {
            operands.push(self.mem.read(pc + off)?);
        }

        match op {
            Opcode::AddImm => {
                let reg = self.resolve(operands[0], pc + 1)?;
                let value = self.regs.get(reg).wrapping_add(i64::from(operands[1]));
                self.regs.set(reg, value);
                self.regs.pc = pc + op.encoded_len();
            }
            Opcode::AddReg => {
                let dst = self.resolve(operands[0], pc + 1)?;
                let src = self.resolve(operands[1], pc + 2)?;
                let value = self.regs.get(dst).wrapping_add(self.regs.get(src));
                self.regs.set(dst, value);
                self.regs.pc = pc + op.encoded_len();
            }
            Opcode::Inc => {
                let reg = self.resolve(operands[0], pc + 1)?;
                self.regs.set(reg, self.regs.get(reg).wrapping_add(1));
                self.regs.pc = pc + op.encoded_len();
            }
            Opcode::Dec => {
                let reg = self.resolve(operands[0], pc + 1)?;
                self.regs.set(reg, self.regs.get(reg).wrapping_sub(1));
                self.regs.pc = pc + op.encoded_len();
            }
            Opcode::SubImm => {
                let reg = self.resolve(operands[0], pc + 1)?;
                let value = self.regs.get(reg).wrapping_sub(i64::from(operands[1]));
                self.regs.set(reg, value);
                self.regs.pc = pc + op.encoded_len();
            }
            Opcode::SubReg => {
                let dst = self.resolve(operands[0], pc + 1)?;
                let src = self.resolve(operands[1], pc + 2)?;
                let value = self.regs.get(dst).wrapping_sub(self.regs.get(src));
                self.regs.set(dst, value);
                self.regs.pc = pc + op.encoded_len();
            }
            Opcode::MovImm => {
                let reg = self.resolve(operands[0], pc + 1)?;
                self.regs.set(reg, i64::from(operands[1]));
                self.regs.pc = pc + op.encoded_len();
            }
            Opcode::MovReg => {
                let dst = self.resolve(operands[0], pc + 1)?;
                let src = self.resolve(operands[1], pc + 2)?;
                self.regs.set(dst, self.regs.get(src));
                self.regs.pc = pc + op.encoded_len();
            }
            Opcode::Jmp => {
                self.regs.pc = u64::from(operands[0]);
            }
            Opcode::CmpImm => {
                let reg = self.resolve(operands[0], pc + 1)?;
                self.regs.zf = self.regs.get(reg) == i64::from(operands[1]);
                self.regs.pc = pc + op.encoded_len();
            }
            Opcode::CmpReg => {
                let a = self.resolve(operands[0], pc + 1)?;
                let b = self.resolve(operands[1], pc + 2)?;
                self.regs.zf = self.regs.get(a) == self.regs.get(b);
                self.regs.pc = pc + op.encoded_len();
            }
            Opcode::Jz => {
                if self.regs.zf {
                    self.regs.pc = u64::from(operands[0]);
                } else {
                    self.regs.pc = pc + op.encoded_len();
                }
            }
        }

        self.steps += 1;
        Ok(StepTrace {
            step: self.steps,
            opcode: byte,
            mnemonic: op.mnemonic(),
            operands,
            regs: self.regs.snapshot(),
            pc: self.regs.pc,
            zf: self.regs.zf,
        })
    }

    /// Runs instruction by instruction, handing each snapshot to `on_step`.
    ///
    /// The instruction set has no halt, so this returns only by propagating
    /// the first fault; callers wanting a bounded run drive [`Cpu::step`]
    /// themselves.
    pub fn run_with<F>(&mut self, mut on_step: F) -> Result<()>
    where
        F: FnMut(&StepTrace),
    {
        loop {
            let trace = self.step()?;
            on_step(&trace);
        }
    }
}
