use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::disk::drive::Drive;
use crate::memory::MemorySegment;

pub const MEMORY_SIZE: usize = 0x10000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveSlot {
    One,
    Two,
}

/// Everything a memory trap might need besides the segment it was called
/// on: the two disk drives, which one is selected, and a seeded source of
/// floating-bus noise. Never holds a reference back to the `Machine` or
/// `MemorySegment` that owns it.
pub struct Peripherals {
    pub drive1: Drive,
    pub drive2: Drive,
    pub selected: DriveSlot,
    rng: StdRng,
}

impl Peripherals {
    pub fn new() -> Self {
        Peripherals {
            drive1: Drive::new(),
            drive2: Drive::new(),
            selected: DriveSlot::One,
            rng: StdRng::seed_from_u64(0x4415_0002),
        }
    }

    pub fn selected_drive(&mut self) -> &mut Drive {
        match self.selected {
            DriveSlot::One => &mut self.drive1,
            DriveSlot::Two => &mut self.drive2,
        }
    }

    /// Floating-bus byte for soft-switch reads that aren't the data path.
    /// Reproducible under test because the RNG is seeded, unlike real
    /// hardware noise.
    pub fn floating_bus_byte(&mut self) -> u8 {
        (self.rng.next_u32() & 0xFF) as u8
    }
}

impl Default for Peripherals {
    fn default() -> Self {
        Peripherals::new()
    }
}

/// Owns the whole address space and every peripheral reachable through it.
/// The CPU holds a `SharedMachine` and issues reads/writes through it;
/// nothing downstream of `Machine` ever holds a pointer back up to it.
pub struct Machine {
    pub memory: MemorySegment,
    pub peripherals: Peripherals,
}

pub type SharedMachine = Rc<RefCell<Machine>>;

impl Machine {
    pub fn new() -> Self {
        let mut machine = Machine {
            memory: MemorySegment::new(MEMORY_SIZE),
            peripherals: Peripherals::new(),
        };
        crate::disk::softswitch::install(&mut machine.memory);
        machine
    }

    pub fn new_shared() -> SharedMachine {
        Rc::new(RefCell::new(Machine::new()))
    }

    /// `self.memory` and `self.peripherals` are disjoint top-level fields,
    /// so this borrows each independently instead of needing an unsafe or
    /// reference-counted back-pointer from the segment to its owner.
    pub fn get(&mut self, address: u16) -> u8 {
        self.memory.get(address, &mut self.peripherals)
    }

    pub fn set(&mut self, address: u16, value: u8) {
        self.memory.set(address, value, &mut self.peripherals)
    }
}

impl Default for Machine {
    fn default() -> Self {
        Machine::new()
    }
}
