//! Two-pass disassembler sharing the CPU's `OPCODE_TABLE`: a lookahead
//! scan builds a jump-label bit-vector, then a print pass renders one
//! line per instruction, prefixing a label line wherever the scan set a
//! bit. Grounded in the teacher's own two-table CPU plumbing (`opcodes.rs`'s
//! `OPCODE_STRING_TABLE`) generalized to a label-aware printer.

use colored::Colorize;

use crate::cpu::addressing::AddressingMode;
use crate::cpu::instruction::OPCODE_TABLE;
use crate::memory::MemorySegment;

/// Bytes following the opcode for a given mode, i.e. how far the scan
/// advances before decoding the next opcode.
fn operand_len(mode: AddressingMode) -> u16 {
    match mode {
        AddressingMode::Accumulator | AddressingMode::Implied => 0,
        AddressingMode::Immediate
        | AddressingMode::ZeroPage
        | AddressingMode::ZeroPageX
        | AddressingMode::ZeroPageY
        | AddressingMode::IndirectX
        | AddressingMode::IndirectY
        | AddressingMode::Relative => 1,
        AddressingMode::Absolute
        | AddressingMode::AbsoluteX
        | AddressingMode::AbsoluteY
        | AddressingMode::Indirect => 2,
    }
}

/// A 64 KiB bit-vector keyed by absolute address, one bit per byte of
/// address space. Cheaper than a `HashSet<u16>` and just as simple to
/// walk a second time during the print pass.
struct JumpLabels {
    bits: Box<[bool; 0x10000]>,
}

impl JumpLabels {
    fn new() -> Self {
        JumpLabels {
            bits: Box::new([false; 0x10000]),
        }
    }

    fn set(&mut self, address: u16) {
        self.bits[address as usize] = true;
    }

    fn get(&self, address: u16) -> bool {
        self.bits[address as usize]
    }
}

/// Walk `[start, end)` decoding opcode + operand length from the table
/// (without executing), and for any `Jmp`/`Jsr`/`Brk`/branch whose target
/// is computable without running the program, label that target address.
/// Indirect `JMP`'s target is not resolved.
fn scan_jump_labels(memory: &MemorySegment, start: u16, end: u16) -> JumpLabels {
    let mut labels = JumpLabels::new();
    let mut pc = start;

    while pc < end {
        let opcode = memory.as_slice()[pc as usize];
        let (instruction, mode, _cycles) = OPCODE_TABLE[opcode as usize];
        let operand_address = pc.wrapping_add(1);
        let len = operand_len(mode);

        if instruction.is_jump_label_source() {
            match mode {
                AddressingMode::Absolute => {
                    let target = read_u16(memory, operand_address);
                    labels.set(target);
                }
                AddressingMode::Relative => {
                    let displacement = memory.as_slice()[operand_address as usize] as i8;
                    let base = pc.wrapping_add(2);
                    labels.set(base.wrapping_add(displacement as u16));
                }
                AddressingMode::Immediate => {
                    // BRK: its operand is a padding byte, not a target;
                    // there is nothing to label beyond the instruction.
                }
                _ => {}
            }
        }

        pc = pc.wrapping_add(1 + len);
        if pc <= operand_address {
            // Wrapped past the top of the address space.
            break;
        }
    }

    labels
}

fn read_u16(memory: &MemorySegment, address: u16) -> u16 {
    let lo = memory.as_slice()[address as usize] as u16;
    let hi = memory.as_slice()[address.wrapping_add(1) as usize] as u16;
    (hi << 8) | lo
}

fn operand_text(memory: &MemorySegment, labels: &JumpLabels, pc: u16, mode: AddressingMode) -> String {
    let operand_address = pc.wrapping_add(1);
    let byte = || memory.as_slice()[operand_address as usize];
    let word = || read_u16(memory, operand_address);

    match mode {
        AddressingMode::Accumulator | AddressingMode::Implied => String::new(),
        AddressingMode::Immediate => format!("#${:02X}", byte()),
        AddressingMode::ZeroPage => format!("${:02X}", byte()),
        AddressingMode::ZeroPageX => format!("${:02X},X", byte()),
        AddressingMode::ZeroPageY => format!("${:02X},Y", byte()),
        AddressingMode::IndirectX => format!("(${:02X},X)", byte()),
        AddressingMode::IndirectY => format!("(${:02X}),Y", byte()),
        AddressingMode::Indirect => format!("(${:04X})", word()),
        AddressingMode::Absolute => absolute_or_label(labels, word()),
        AddressingMode::AbsoluteX => format!("{},X", absolute_or_label(labels, word())),
        AddressingMode::AbsoluteY => format!("{},Y", absolute_or_label(labels, word())),
        AddressingMode::Relative => {
            let displacement = byte() as i8;
            let base = pc.wrapping_add(2);
            absolute_or_label(labels, base.wrapping_add(displacement as u16))
        }
    }
}

fn absolute_or_label(labels: &JumpLabels, address: u16) -> String {
    if labels.get(address) {
        format!("ADDR_{:04X}", address)
    } else {
        format!("${:04X}", address)
    }
}

/// Disassemble `[start, end)` of `memory` into one line of text per
/// instruction, with a label line immediately before any address the
/// lookahead pass marked as a jump/branch target.
pub fn disassemble(memory: &MemorySegment, start: u16, end: u16) -> String {
    let labels = scan_jump_labels(memory, start, end);
    let mut out = String::new();
    let mut pc = start;

    while pc < end {
        if labels.get(pc) {
            out.push_str(&format!("{}\n", format!("ADDR_{:04X}:", pc).cyan()));
        }

        let opcode = memory.as_slice()[pc as usize];
        let (instruction, mode, _cycles) = OPCODE_TABLE[opcode as usize];
        let operand = operand_text(memory, &labels, pc, mode);

        out.push_str("    ");
        out.push_str(instruction.mnemonic());
        out.push_str("     ");
        out.push_str(&operand);
        out.push('\n');

        let len = operand_len(mode);
        let next_pc = pc.wrapping_add(1 + len);
        if next_pc <= pc {
            break;
        }
        pc = next_pc;
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::machine::Peripherals;

    fn memory_with(bytes: &[(u16, u8)]) -> MemorySegment {
        let mut memory = MemorySegment::new(0x10000);
        let mut peripherals = Peripherals::new();
        for &(address, value) in bytes {
            memory.set(address, value, &mut peripherals);
        }
        memory
    }

    #[test]
    fn labels_a_forward_branch_target() {
        // Target = pc + 2 (past BEQ's own operand byte) + displacement
        // = 0x10 + 2 + 2 = 0x14.
        let memory = memory_with(&[
            (0x10, 0xF0), // BEQ +2
            (0x11, 0x02),
            (0x12, 0xEA), // NOP
            (0x13, 0xEA), // NOP
            (0x14, 0xEA), // NOP (branch target)
        ]);
        let text = disassemble(&memory, 0x10, 0x15);
        assert!(text.contains("ADDR_0014:"));
        assert!(text.contains("BEQ     ADDR_0014"));
    }

    #[test]
    fn labels_a_jsr_target() {
        let memory = memory_with(&[
            (0x00, 0x20), // JSR $0004
            (0x01, 0x04),
            (0x02, 0x00),
            (0x03, 0xEA), // NOP
            (0x04, 0x60), // RTS (target)
        ]);
        let text = disassemble(&memory, 0x00, 0x05);
        assert!(text.contains("ADDR_0004:"));
        assert!(text.contains("JSR     ADDR_0004"));
    }

    #[test]
    fn immediate_operand_is_rendered_as_a_literal() {
        let memory = memory_with(&[(0x00, 0xA9), (0x01, 0x42)]);
        let text = disassemble(&memory, 0x00, 0x02);
        assert!(text.contains("LDA     #$42"));
    }
}
