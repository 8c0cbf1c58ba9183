//! Wires the Disk II controller's sixteen soft-switch addresses into the
//! machine's memory segment. Both reads and writes trap through the same
//! dispatch on the address's low nibble.

use crate::disk::drive::DriveMode;
use crate::machine::{DriveSlot, Peripherals};
use crate::memory::MemorySegment;

/// Matches the C source's `apple2_dd_map`, which maps the controller's
/// switches across the full `0xC0E0..0xC100` span (twice the logical
/// sixteen addresses); the dispatch below only looks at `addr & 0xF`, so
/// the repeat is harmless and preserved rather than narrowed.
const SWITCH_BASE: u16 = 0xC0E0;
const SWITCH_END: u16 = 0xC100;

pub fn install(memory: &mut MemorySegment) {
    let mut addr = SWITCH_BASE;
    while addr < SWITCH_END {
        memory.install_read_trap(addr, switch_read);
        memory.install_write_trap(addr, switch_write);
        addr += 1;
    }
}

fn switch_phase(peripherals: &mut Peripherals, nib: u16) {
    let phase = match nib {
        0x1 => 1,
        0x3 => 2,
        0x5 => 3,
        0x7 => 4,
        _ => return,
    };
    peripherals.selected_drive().phaser(phase);
}

fn switch_drive(peripherals: &mut Peripherals, nib: u16) {
    match nib {
        0x8 => {
            peripherals.drive1.turn_on(false);
            peripherals.drive2.turn_on(false);
        }
        0x9 => peripherals.selected_drive().turn_on(true),
        0xA => peripherals.selected = DriveSlot::One,
        0xB => peripherals.selected = DriveSlot::Two,
        0xE => peripherals.selected_drive().set_mode(DriveMode::Read),
        0xF => peripherals.selected_drive().set_mode(DriveMode::Write),
        _ => {}
    }
}

fn dispatch_common(peripherals: &mut Peripherals, nib: u16) {
    if nib < 0x8 {
        switch_phase(peripherals, nib);
    } else if nib < 0xC || nib > 0xD {
        switch_drive(peripherals, nib);
    }
}

fn switch_read(_segment: &mut MemorySegment, address: u16, peripherals: &mut Peripherals) -> u8 {
    let nib = address & 0xF;
    dispatch_common(peripherals, nib);

    if nib == 0xC {
        return peripherals.selected_drive().read_write_switch();
    }
    if nib == 0xD {
        // Reading the latch switch always drives a zero in; it only
        // actually takes if the drive is in WRITE mode.
        peripherals.selected_drive().set_latch(0);
    }
    peripherals.floating_bus_byte()
}

fn switch_write(_segment: &mut MemorySegment, address: u16, value: u8, peripherals: &mut Peripherals) {
    let nib = address & 0xF;
    dispatch_common(peripherals, nib);

    if nib == 0xC {
        peripherals.selected_drive().read_write_switch();
    } else if nib == 0xD {
        peripherals.selected_drive().set_latch(value);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::machine::Machine;

    #[test]
    fn selecting_drive_two_and_energizing_phase_steps_its_head() {
        let mut machine = Machine::new();
        machine.set(0xC0EB, 0); // select drive 2
        assert_eq!(machine.peripherals.selected, DriveSlot::Two);

        machine.set(0xC0E3, 0); // energize phase 2 from phase 0: no-op per transition table
        assert_eq!(machine.peripherals.drive2.phase, 2);
    }

    #[test]
    fn read_mode_switch_puts_selected_drive_in_read() {
        let mut machine = Machine::new();
        machine.set(0xC0EF, 0); // write mode
        assert_eq!(machine.peripherals.drive1.mode, DriveMode::Write);
        machine.set(0xC0EE, 0); // read mode
        assert_eq!(machine.peripherals.drive1.mode, DriveMode::Read);
    }

    #[test]
    fn floating_bus_read_does_not_panic_on_unused_nibble() {
        let mut machine = Machine::new();
        let _ = machine.get(0xC0E8);
    }
}
