/// Test doubles simulating an AT24CS0x chip, its bus and a virtual clock
/// during integration tests.
use at24cs0x::{
    core::{ADDRESS_WINDOW, PAGE_SIZE, SERIAL_NUMBER_LEN, SERIAL_NUMBER_OFFSET},
    protocol::transport::traits::{
        clock::Clock,
        i2c_bus::{I2cBus, I2cDevice},
        settle_timer::SettleTimer,
    },
};
use embassy_time::Duration;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[allow(dead_code)]
/// Serial number burnt into every simulated chip.
pub const FACTORY_SERIAL: [u8; SERIAL_NUMBER_LEN] = [
    0xA1, 0xB2, 0xC3, 0xD4, 0xE5, 0xF6, 0x07, 0x18, 0x29, 0x3A, 0x4B, 0x5C, 0x6D, 0x7E, 0x8F, 0x90,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
/// Errors reported by the simulated bus.
pub enum SimError {
    /// No device acknowledged the address (absent, or busy committing a page).
    Nack,
    /// Failure injected by the test.
    Injected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
/// One transaction as seen on the wires.
pub enum Transaction {
    Write { device: u8, bytes: Vec<u8>, at: u64 },
    WriteRead { device: u8, bytes: Vec<u8>, len: usize, at: u64 },
    Read { device: u8, len: usize, at: u64 },
}

#[allow(dead_code)]
impl Transaction {
    pub fn device(&self) -> u8 {
        match self {
            Transaction::Write { device, .. }
            | Transaction::WriteRead { device, .. }
            | Transaction::Read { device, .. } => *device,
        }
    }

    pub fn at(&self) -> u64 {
        match self {
            Transaction::Write { at, .. }
            | Transaction::WriteRead { at, .. }
            | Transaction::Read { at, .. } => *at,
        }
    }
}

#[allow(dead_code)]
/// Virtual microsecond clock shared by the chip and the settle timer.
/// Every `now()` poll advances it by `step`, modelling a spinning CPU.
#[derive(Clone)]
pub struct VirtualClock {
    micros: Rc<Cell<u64>>,
    step: u64,
}

#[allow(dead_code)]
impl VirtualClock {
    pub fn new(start: u64, step: u64) -> Self {
        Self {
            micros: Rc::new(Cell::new(start)),
            step,
        }
    }

    pub fn peek(&self) -> u64 {
        self.micros.get()
    }
}

impl Clock for VirtualClock {
    const TICK_HZ: u64 = 1_000_000;

    fn now(&mut self) -> u64 {
        let current = self.micros.get();
        self.micros.set(current.wrapping_add(self.step));
        current
    }
}

#[allow(dead_code)]
/// Same clock seen through a 32-bit counter that wraps.
#[derive(Clone)]
pub struct WrappingClock32(pub VirtualClock);

impl Clock for WrappingClock32 {
    const TICK_HZ: u64 = 1_000_000;
    const COUNTER_BITS: u32 = 32;

    fn now(&mut self) -> u64 {
        self.0.now() & u32::MAX as u64
    }
}

#[allow(dead_code)]
/// Settle timer jumping the virtual clock forward instead of spinning.
pub struct JumpTimer {
    clock: VirtualClock,
    pub waits: usize,
}

#[allow(dead_code)]
impl JumpTimer {
    pub fn new(clock: VirtualClock) -> Self {
        Self { clock, waits: 0 }
    }
}

impl SettleTimer for JumpTimer {
    fn wait(&mut self, duration: Duration) {
        self.waits += 1;
        let now = self.clock.micros.get();
        self.clock.micros.set(now.wrapping_add(duration.as_micros()));
    }
}

#[allow(dead_code)]
/// Behavioural model of one AT24CS0x.
///
/// Page writes wrap inside their page like the real part, the device NACKs
/// while a write cycle is in progress, and reads roll over the whole array.
pub struct SimulatedChip {
    pub base_address: u8,
    pub capacity: usize,
    pub memory: [u8; ADDRESS_WINDOW],
    pub serial: [u8; SERIAL_NUMBER_LEN],
    pub log: Vec<Transaction>,
    pub write_cycle_us: u64,
    /// 1-based index of the memory write that must fail.
    pub fail_write_number: Option<usize>,
    /// Fail every transaction to the memory address.
    pub memory_offline: bool,
    pub writes_seen: usize,
    pointer: usize,
    busy_until: Option<u64>,
    clock: VirtualClock,
}

#[allow(dead_code)]
impl SimulatedChip {
    pub fn new(base_address: u8, capacity: usize, clock: VirtualClock) -> Self {
        Self {
            base_address,
            capacity,
            memory: [0xFF; ADDRESS_WINDOW],
            serial: FACTORY_SERIAL,
            log: Vec::new(),
            write_cycle_us: 5_000,
            fail_write_number: None,
            memory_offline: false,
            writes_seen: 0,
            pointer: 0,
            busy_until: None,
            clock,
        }
    }

    pub fn memory_writes(&self) -> Vec<&Transaction> {
        self.log
            .iter()
            .filter(|t| matches!(t, Transaction::Write { .. }) && t.device() == self.base_address)
            .collect()
    }

    fn is_serial(&self, device: u8) -> bool {
        device == self.base_address | 0x08
    }

    fn check_ready(&mut self, now: u64) -> Result<(), SimError> {
        match self.busy_until {
            Some(until) if now < until => Err(SimError::Nack),
            _ => {
                self.busy_until = None;
                Ok(())
            }
        }
    }

    fn write(&mut self, device: u8, bytes: &[u8]) -> Result<(), SimError> {
        let now = self.clock.peek();
        self.log.push(Transaction::Write {
            device,
            bytes: bytes.to_vec(),
            at: now,
        });
        self.check_ready(now)?;
        if self.is_serial(device) {
            // The serial number region is read only.
            return Err(SimError::Nack);
        }
        if self.memory_offline {
            return Err(SimError::Injected);
        }
        self.writes_seen += 1;
        if self.fail_write_number == Some(self.writes_seen) {
            return Err(SimError::Injected);
        }

        let Some((&word, data)) = bytes.split_first() else {
            return Ok(());
        };
        let mask = self.capacity - 1;
        let page_base = (word as usize & mask) / PAGE_SIZE * PAGE_SIZE;
        let mut column = word as usize % PAGE_SIZE;
        for &byte in data {
            self.memory[page_base + column] = byte;
            // The address counter only rolls over inside the page.
            column = (column + 1) % PAGE_SIZE;
        }
        self.pointer = (page_base + column) & mask;
        if !data.is_empty() {
            self.busy_until = Some(now + self.write_cycle_us);
        }
        Ok(())
    }

    fn write_read(&mut self, device: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), SimError> {
        let now = self.clock.peek();
        self.log.push(Transaction::WriteRead {
            device,
            bytes: bytes.to_vec(),
            len: buffer.len(),
            at: now,
        });
        self.check_ready(now)?;
        if self.is_serial(device) {
            let offset = bytes[0] as usize - SERIAL_NUMBER_OFFSET as usize;
            for (i, byte) in buffer.iter_mut().enumerate() {
                *byte = self.serial[(offset + i) % SERIAL_NUMBER_LEN];
            }
            return Ok(());
        }
        if self.memory_offline {
            return Err(SimError::Injected);
        }
        self.pointer = bytes[0] as usize & (self.capacity - 1);
        self.read_sequential(buffer);
        Ok(())
    }

    fn read(&mut self, device: u8, buffer: &mut [u8]) -> Result<(), SimError> {
        let now = self.clock.peek();
        self.log.push(Transaction::Read {
            device,
            len: buffer.len(),
            at: now,
        });
        self.check_ready(now)?;
        if self.memory_offline {
            return Err(SimError::Injected);
        }
        self.read_sequential(buffer);
        Ok(())
    }

    fn read_sequential(&mut self, buffer: &mut [u8]) {
        for byte in buffer.iter_mut() {
            *byte = self.memory[self.pointer];
            // Sequential reads roll over the whole array, not the page.
            self.pointer = (self.pointer + 1) % self.capacity;
        }
    }
}

#[allow(dead_code)]
/// Bus with one simulated chip on it.
pub struct SimBus {
    pub chip: Rc<RefCell<SimulatedChip>>,
}

#[allow(dead_code)]
impl SimBus {
    pub fn new(chip: SimulatedChip) -> Self {
        Self {
            chip: Rc::new(RefCell::new(chip)),
        }
    }
}

impl I2cBus for SimBus {
    type Device = SimDevice;

    fn attach(&mut self, address: u8) -> Result<SimDevice, SimError> {
        let base = self.chip.borrow().base_address;
        if address != base && address != base | 0x08 {
            return Err(SimError::Nack);
        }
        Ok(SimDevice {
            chip: Rc::clone(&self.chip),
            address,
        })
    }
}

/// One address of the simulated chip.
pub struct SimDevice {
    chip: Rc<RefCell<SimulatedChip>>,
    address: u8,
}

impl I2cDevice for SimDevice {
    type Error = SimError;

    fn write(&mut self, bytes: &[u8]) -> Result<(), SimError> {
        self.chip.borrow_mut().write(self.address, bytes)
    }

    fn write_read(&mut self, bytes: &[u8], buffer: &mut [u8]) -> Result<(), SimError> {
        self.chip.borrow_mut().write_read(self.address, bytes, buffer)
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<(), SimError> {
        self.chip.borrow_mut().read(self.address, buffer)
    }
}
