//! Property tests over the core CPU invariants:
//! 1. Memory bounds: reads and writes succeed iff the address is inside the image
//! 2. Selector totality: exactly 0x02..=0x05 resolve, each to a distinct register
//! 3. CMP/JZ coupling: zf == (left == right), JZ jumps iff zf
//! 4. Wraparound arithmetic never panics, for any register value
//! 5. Step traces always serialize

use mv_cpu::{Cpu, CpuError, Memory, Reg};
use proptest::prelude::*;

proptest! {
    #[test]
    fn read_succeeds_iff_in_bounds(
        image in proptest::collection::vec(any::<u8>(), 0..64),
        addr in 0u64..128,
    ) {
        let mem = Memory::load(image.clone());
        match mem.read(addr) {
            Ok(byte) => {
                prop_assert!((addr as usize) < image.len());
                prop_assert_eq!(byte, image[addr as usize]);
            }
            Err(err) => {
                prop_assert!((addr as usize) >= image.len());
                prop_assert_eq!(err, CpuError::OutOfBounds { addr, len: image.len() as u64 });
            }
        }
    }

    #[test]
    fn write_succeeds_iff_in_bounds(
        len in 0usize..64,
        addr in 0u64..128,
        value: u8,
    ) {
        let mut mem = Memory::load(vec![0; len]);
        let result = mem.write(addr, value);
        if (addr as usize) < len {
            prop_assert!(result.is_ok());
            prop_assert_eq!(mem.read(addr).unwrap(), value);
        } else {
            prop_assert_eq!(result.unwrap_err(), CpuError::OutOfBounds { addr, len: len as u64 });
        }
    }

    #[test]
    fn selector_resolution_is_total_and_checked(selector: u8) {
        match selector {
            0x02..=0x05 => prop_assert!(Reg::from_selector(selector).is_some()),
            _ => prop_assert!(Reg::from_selector(selector).is_none()),
        }
    }

    #[test]
    fn cmp_imm_couples_zf_to_equality(value: i64, imm: u8) {
        let mut cpu = Cpu::new(vec![0x60, 0x02, imm]);
        cpu.registers_mut().set(Reg::R0, value);
        cpu.step().unwrap();
        prop_assert_eq!(cpu.registers().zf, value == i64::from(imm));
        prop_assert_eq!(cpu.registers().pc, 3);
    }

    #[test]
    fn cmp_reg_couples_zf_to_equality(a: i64, b: i64) {
        let mut cpu = Cpu::new(vec![0x61, 0x02, 0x03]);
        cpu.registers_mut().set(Reg::R0, a);
        cpu.registers_mut().set(Reg::R1, b);
        cpu.step().unwrap();
        prop_assert_eq!(cpu.registers().zf, a == b);
    }

    #[test]
    fn jz_jumps_iff_zf(zf: bool, target: u8) {
        let mut cpu = Cpu::new(vec![0x70, target]);
        cpu.registers_mut().zf = zf;
        cpu.step().unwrap();
        let expected = if zf { u64::from(target) } else { 2 };
        prop_assert_eq!(cpu.registers().pc, expected);
    }

    #[test]
    fn add_imm_wraps_for_any_operands(value: i64, imm: u8) {
        let mut cpu = Cpu::new(vec![0x00, 0x02, imm]);
        cpu.registers_mut().set(Reg::R0, value);
        cpu.step().unwrap();
        prop_assert_eq!(
            cpu.registers().get(Reg::R0),
            value.wrapping_add(i64::from(imm))
        );
    }

    #[test]
    fn sub_imm_wraps_for_any_operands(value: i64, imm: u8) {
        let mut cpu = Cpu::new(vec![0x30, 0x02, imm]);
        cpu.registers_mut().set(Reg::R0, value);
        cpu.step().unwrap();
        prop_assert_eq!(
            cpu.registers().get(Reg::R0),
            value.wrapping_sub(i64::from(imm))
        );
    }

    #[test]
    fn step_traces_serialize(value: i64, imm: u8) {
        let mut cpu = Cpu::new(vec![0x40, 0x02, imm]);
        cpu.registers_mut().set(Reg::R1, value);
        let trace = cpu.step().unwrap();
        let json = serde_json::to_value(&trace).unwrap();
        prop_assert_eq!(json["opcode"].as_u64(), Some(0x40));
        prop_assert_eq!(json["regs"][1].as_i64(), Some(value));
    }
}
