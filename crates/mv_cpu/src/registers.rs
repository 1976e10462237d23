//! General-purpose register file, program counter and zero flag.

/// One of the four general-purpose registers.
///
/// Selector bytes in the instruction stream map to registers through
/// [`Reg::from_selector`]; every other selector value is rejected by the
/// engine instead of being dereferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
    R0,
    R1,
    R2,
    R3,
}

impl Reg {
    /// Maps a selector byte to a register. Selector values follow the
    /// program image format: `0x02..=0x05`.
    pub fn from_selector(selector: u8) -> Option<Reg> {
        match selector {
            0x02 => Some(Reg::R0),
            0x03 => Some(Reg::R1),
            0x04 => Some(Reg::R2),
            0x05 => Some(Reg::R3),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Reg::R0 => "R0",
            Reg::R1 => "R1",
            Reg::R2 => "R2",
            Reg::R3 => "R3",
        }
    }
}

/// Register file: four signed 64-bit general-purpose registers, the program
/// counter and the zero flag, all zero at startup.
///
/// Register arithmetic wraps two's-complement; overflow is never a fault.
#[derive(Debug, Default, Clone)]
pub struct RegisterFile {
    gpr: [i64; 4],
    /// Address of the next instruction to fetch.
    pub pc: u64,
    /// Set by CMP, consumed by JZ.
    pub zf: bool,
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, reg: Reg) -> i64 {
        self.gpr[reg as usize]
    }

    pub fn set(&mut self, reg: Reg, value: i64) {
        self.gpr[reg as usize] = value;
    }

    /// Current values of R0..R3, in order.
    pub fn snapshot(&self) -> [i64; 4] {
        self.gpr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_map_to_distinct_registers() {
        let regs: Vec<Reg> = (0x02..=0x05u8)
            .map(|s| Reg::from_selector(s).unwrap())
            .collect();
        assert_eq!(regs, vec![Reg::R0, Reg::R1, Reg::R2, Reg::R3]);
    }

    #[test]
    fn unknown_selectors_resolve_to_none() {
        for selector in [0x00, 0x01, 0x06, 0x42, 0xFF] {
            assert_eq!(Reg::from_selector(selector), None);
        }
    }

    #[test]
    fn registers_start_at_zero() {
        let regs = RegisterFile::new();
        assert_eq!(regs.snapshot(), [0; 4]);
        assert_eq!(regs.pc, 0);
        assert!(!regs.zf);
    }
}
