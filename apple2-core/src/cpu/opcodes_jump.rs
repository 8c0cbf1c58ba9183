//! Branches, jumps, subroutine linkage, `BRK`/`RTI`, status-flag set/clear,
//! `BIT`, and `NOP`. Mirrors the teacher's `opcodes_jump` family split.

use super::addressing::AddressingMode;
use super::{Cpu, StatusFlag};

/// A taken branch costs one extra cycle, two if it also crosses a page;
/// an untaken branch costs the table's base cycles only. Shared by every
/// `Bxx` handler below.
fn branch(cpu: &mut Cpu, mode: AddressingMode, condition: bool) {
    let (_value, address) = mode.resolve(cpu);
    if condition {
        let extra = if cpu.page_crossed { 2 } else { 1 };
        cpu.branch_extra_cycles = Some(extra);
        cpu.pc = address;
    }
}

/// Function: branch on N=0
pub fn bpl(cpu: &mut Cpu, mode: AddressingMode) {
    let taken = !cpu.flag(StatusFlag::Negative);
    branch(cpu, mode, taken);
}

/// Function: branch on N=1
pub fn bmi(cpu: &mut Cpu, mode: AddressingMode) {
    let taken = cpu.flag(StatusFlag::Negative);
    branch(cpu, mode, taken);
}

/// Function: branch on V=0
pub fn bvc(cpu: &mut Cpu, mode: AddressingMode) {
    let taken = !cpu.flag(StatusFlag::Overflow);
    branch(cpu, mode, taken);
}

/// Function: branch on V=1
pub fn bvs(cpu: &mut Cpu, mode: AddressingMode) {
    let taken = cpu.flag(StatusFlag::Overflow);
    branch(cpu, mode, taken);
}

/// Function: branch on C=0
pub fn bcc(cpu: &mut Cpu, mode: AddressingMode) {
    let taken = !cpu.flag(StatusFlag::Carry);
    branch(cpu, mode, taken);
}

/// Function: branch on C=1
pub fn bcs(cpu: &mut Cpu, mode: AddressingMode) {
    let taken = cpu.flag(StatusFlag::Carry);
    branch(cpu, mode, taken);
}

/// Function: branch on Z=0
pub fn bne(cpu: &mut Cpu, mode: AddressingMode) {
    let taken = !cpu.flag(StatusFlag::Zero);
    branch(cpu, mode, taken);
}

/// Function: branch on Z=1
pub fn beq(cpu: &mut Cpu, mode: AddressingMode) {
    let taken = cpu.flag(StatusFlag::Zero);
    branch(cpu, mode, taken);
}

/// Function: (S)-:=PC,P PC:=PC+2
/// Flags: B I D
///
/// Consumes the padding byte following the opcode (its table mode is
/// `Immediate`, used here only to advance `PC` past that byte, the way
/// `nop` discards its operand), then pushes `cpu.instruction_pc` — `PC`
/// as it stood before the opcode byte was consumed — rather than the
/// post-advance `PC`. The pushed `P` carries the break and unused bits
/// set, and only after that push does this set the interrupt-disable
/// bit and clear decimal mode. No vector fetch: `PC` ends at
/// `instruction_pc + 2`, matching the source's plain `cpu->PC += 2`.
pub fn brk(cpu: &mut Cpu, mode: AddressingMode) {
    mode.resolve(cpu);
    cpu.push_u16(cpu.instruction_pc);
    let pushed_p = cpu.p | (StatusFlag::Break as u8) | (StatusFlag::Unused as u8);
    cpu.push_u8(pushed_p);
    cpu.set_flag(StatusFlag::InterruptDisable, true);
    cpu.set_flag(StatusFlag::Decimal, false);
}

/// Function: P,PC:=+(S)
/// Flags: N V D I Z C
pub fn rti(cpu: &mut Cpu) {
    cpu.p = cpu.pull_u8();
    cpu.pc = cpu.pull_u16();
}

/// Function: (S)-:=PC PC:={adr}
/// Flags:
///
/// Pushes the address of the last byte of the `JSR` instruction (not the
/// byte after it); `rts` adds 1 back when it pops.
pub fn jsr(cpu: &mut Cpu, mode: AddressingMode) {
    let (_value, address) = mode.resolve(cpu);
    cpu.push_u16(cpu.pc.wrapping_sub(1));
    cpu.pc = address;
}

/// Function: PC:=+(S)
/// Flags:
pub fn rts(cpu: &mut Cpu) {
    cpu.pc = cpu.pull_u16().wrapping_add(1);
}

/// Function: PC:={adr}
/// Flags:
pub fn jmp(cpu: &mut Cpu, mode: AddressingMode) {
    let (_value, address) = mode.resolve(cpu);
    cpu.pc = address;
}

/// Function: N:=b7 V:=b6 Z:=A&{adr}
/// Flags: N V Z
pub fn bit(cpu: &mut Cpu, mode: AddressingMode) {
    let (value, _address) = mode.resolve(cpu);
    cpu.set_flag(StatusFlag::Negative, value & 0x80 != 0);
    cpu.set_flag(StatusFlag::Overflow, value & 0x40 != 0);
    cpu.set_flag(StatusFlag::Zero, (cpu.a & value) == 0);
}

/// Function: C:=0
pub fn clc(cpu: &mut Cpu) {
    cpu.set_flag(StatusFlag::Carry, false);
}

/// Function: C:=1
pub fn sec(cpu: &mut Cpu) {
    cpu.set_flag(StatusFlag::Carry, true);
}

/// Function: D:=0
pub fn cld(cpu: &mut Cpu) {
    cpu.set_flag(StatusFlag::Decimal, false);
}

/// Function: D:=1
pub fn sed(cpu: &mut Cpu) {
    cpu.set_flag(StatusFlag::Decimal, true);
}

/// Function: I:=0
pub fn cli(cpu: &mut Cpu) {
    cpu.set_flag(StatusFlag::InterruptDisable, false);
}

/// Function: I:=1
pub fn sei(cpu: &mut Cpu) {
    cpu.set_flag(StatusFlag::InterruptDisable, true);
}

/// Function: V:=0
pub fn clv(cpu: &mut Cpu) {
    cpu.set_flag(StatusFlag::Overflow, false);
}

/// Function: (no-op; resolves and discards its operand at its table mode)
pub fn nop(cpu: &mut Cpu, mode: AddressingMode) {
    mode.resolve(cpu);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::machine::Machine;

    fn cpu_at(pc: u16) -> Cpu {
        let mut cpu = Cpu::new(Machine::new_shared());
        cpu.pc = pc;
        cpu
    }

    #[test]
    fn untaken_branch_does_not_move_pc_past_the_operand() {
        let mut cpu = cpu_at(0x10);
        cpu.write_u8(0x10, 0x05);
        bne(&mut cpu, AddressingMode::Relative);
        // Z was clear by default so BNE should not have been taken; PC
        // still advanced past the one-byte operand from resolve().
        assert_eq!(cpu.pc, 0x16);
        assert!(cpu.branch_extra_cycles.is_none());
    }

    #[test]
    fn taken_branch_jumps_and_records_extra_cycle() {
        let mut cpu = cpu_at(0x10);
        cpu.write_u8(0x10, 0x05);
        cpu.set_flag(StatusFlag::Zero, true);
        beq(&mut cpu, AddressingMode::Relative);
        assert_eq!(cpu.pc, 0x16);
        assert_eq!(cpu.branch_extra_cycles, Some(1));
    }

    #[test]
    fn jsr_pushes_return_minus_one_and_rts_restores_it() {
        // PC is already past the opcode byte here, matching how `step`
        // calls a handler after its own `next_u8` for the opcode itself.
        let mut cpu = cpu_at(124);
        cpu.write_u8(124, 0x21);
        cpu.write_u8(125, 0x43);
        jsr(&mut cpu, AddressingMode::Absolute);
        assert_eq!(cpu.pc, 0x4321);
        rts(&mut cpu);
        assert_eq!(cpu.pc, 126);
    }

    #[test]
    fn bit_sets_negative_overflow_and_zero_from_memory_not_accumulator() {
        let mut cpu = cpu_at(0x10);
        cpu.a = 0x0F;
        cpu.write_u8(0x10, 0x20);
        cpu.write_u8(0x20, 0xC0); // bits 7 and 6 set, bits overlapping A clear
        bit(&mut cpu, AddressingMode::ZeroPage);
        assert!(cpu.flag(StatusFlag::Negative));
        assert!(cpu.flag(StatusFlag::Overflow));
        assert!(cpu.flag(StatusFlag::Zero));
    }
}
