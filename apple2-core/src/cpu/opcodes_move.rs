//! Loads, stores, register transfers, and the stack push/pull pair.
//! Doc-comment shorthand follows the teacher's convention: `Function:`
//! gives the register-transfer-level effect, `Flags:` lists the status
//! bits the instruction touches.

use super::addressing::AddressingMode;
use super::{Cpu, StatusFlag};

/// Function: A:={adr}
/// Flags: N Z
pub fn lda(cpu: &mut Cpu, mode: AddressingMode) {
    let (value, _address) = mode.resolve(cpu);
    cpu.a = value;
    cpu.modify_zero_and_negative(cpu.a);
}

/// Function: {adr}:=A
/// Flags:
pub fn sta(cpu: &mut Cpu, mode: AddressingMode) {
    let (_value, address) = mode.resolve(cpu);
    cpu.write_u8(address, cpu.a);
}

/// Function: X:={adr}
/// Flags: N Z
pub fn ldx(cpu: &mut Cpu, mode: AddressingMode) {
    let (value, _address) = mode.resolve(cpu);
    cpu.x = value;
    cpu.modify_zero_and_negative(cpu.x);
}

/// Function: {adr}:=X
/// Flags:
pub fn stx(cpu: &mut Cpu, mode: AddressingMode) {
    let (_value, address) = mode.resolve(cpu);
    cpu.write_u8(address, cpu.x);
}

/// Function: Y:={adr}
/// Flags: N Z
pub fn ldy(cpu: &mut Cpu, mode: AddressingMode) {
    let (value, _address) = mode.resolve(cpu);
    cpu.y = value;
    cpu.modify_zero_and_negative(cpu.y);
}

/// Function: {adr}:=Y
/// Flags:
pub fn sty(cpu: &mut Cpu, mode: AddressingMode) {
    let (_value, address) = mode.resolve(cpu);
    cpu.write_u8(address, cpu.y);
}

/// Function: X:=A
/// Flags: N Z
pub fn tax(cpu: &mut Cpu) {
    cpu.x = cpu.a;
    cpu.modify_zero_and_negative(cpu.x);
}

/// Function: A:=X
/// Flags: N Z
pub fn txa(cpu: &mut Cpu) {
    cpu.a = cpu.x;
    cpu.modify_zero_and_negative(cpu.a);
}

/// Function: Y:=A
/// Flags: N Z
pub fn tay(cpu: &mut Cpu) {
    cpu.y = cpu.a;
    cpu.modify_zero_and_negative(cpu.y);
}

/// Function: A:=Y
/// Flags: N Z
pub fn tya(cpu: &mut Cpu) {
    cpu.a = cpu.y;
    cpu.modify_zero_and_negative(cpu.a);
}

/// Function: X:=S
/// Flags: N Z
pub fn tsx(cpu: &mut Cpu) {
    cpu.x = cpu.s;
    cpu.modify_zero_and_negative(cpu.x);
}

/// Function: S:=X
/// Flags:
pub fn txs(cpu: &mut Cpu) {
    cpu.s = cpu.x;
}

/// Function: A:=+(S)
/// Flags: N Z
pub fn pla(cpu: &mut Cpu) {
    cpu.a = cpu.pull_u8();
    cpu.modify_zero_and_negative(cpu.a);
}

/// Function: (S)-:=A
/// Flags:
pub fn pha(cpu: &mut Cpu) {
    cpu.push_u8(cpu.a);
}

/// Function: P:=+(S)
/// Flags: N V D I Z C
pub fn plp(cpu: &mut Cpu) {
    cpu.p = cpu.pull_u8();
}

/// Function: (S)-:=P
/// Flags:
///
/// Pushes with the break and unused bits set, matching `brk`'s own push
/// (see `opcodes_jump::brk`); software-initiated pushes of `P` always
/// carry those two bits regardless of their live value.
pub fn php(cpu: &mut Cpu) {
    let value = cpu.p | (StatusFlag::Break as u8) | (StatusFlag::Unused as u8);
    cpu.push_u8(value);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::machine::Machine;

    fn cpu() -> Cpu {
        Cpu::new(Machine::new_shared())
    }

    #[test]
    fn lda_sets_zero_flag_on_zero_value() {
        let mut cpu = cpu();
        cpu.pc = 0x10;
        cpu.write_u8(0x10, 0x30);
        cpu.write_u8(0x30, 0x00);
        lda(&mut cpu, AddressingMode::ZeroPage);
        assert!(cpu.flag(StatusFlag::Zero));
    }

    #[test]
    fn sta_writes_accumulator_to_resolved_address() {
        let mut cpu = cpu();
        cpu.a = 0x55;
        cpu.pc = 0x20;
        cpu.write_u8(0x20, 0x30);
        sta(&mut cpu, AddressingMode::ZeroPage);
        assert_eq!(cpu.read_u8(0x30), 0x55);
    }

    #[test]
    fn pha_then_pla_round_trips() {
        let mut cpu = cpu();
        cpu.a = 0x7E;
        pha(&mut cpu);
        cpu.a = 0;
        pla(&mut cpu);
        assert_eq!(cpu.a, 0x7E);
        assert!(!cpu.flag(StatusFlag::Zero));
    }
}
