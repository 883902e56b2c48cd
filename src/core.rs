//! Data types shared by the framing engine, the page-split transport and
//! the device handle.
//!
//! Every AT24CS0x part uses the same 8-byte write page and the same one-byte
//! word address; only the total capacity differs between models.

/// Size of one write page in bytes (identical for every supported model).
pub const PAGE_SIZE: usize = 8;

/// Number of addresses reachable through the one-byte word address register.
pub const ADDRESS_WINDOW: usize = 256;

/// Length of the factory-programmed serial number.
pub const SERIAL_NUMBER_LEN: usize = 16;

/// Word address of the first serial number byte behind the secondary bus address.
pub const SERIAL_NUMBER_OFFSET: u8 = 0x80;

/// Supported members of the AT24CS0x family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Model {
    /// 1 Kbit (128 x 8).
    At24cs01,
    /// 2 Kbit (256 x 8).
    #[default]
    At24cs02,
}

impl Model {
    /// Page geometry of this model.
    pub const fn geometry(self) -> Geometry {
        match self {
            Model::At24cs01 => Geometry::new(128),
            Model::At24cs02 => Geometry::new(256),
        }
    }
}

// Evaluated at compile time: every model is a whole number of pages.
const _: () = {
    Model::At24cs01.geometry();
    Model::At24cs02.geometry();
};

/// Page layout derived from the model. Never stored per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    capacity: usize,
}

impl Geometry {
    const fn new(capacity: usize) -> Self {
        assert!(capacity % PAGE_SIZE == 0, "capacity must be a whole number of pages");
        assert!(capacity <= ADDRESS_WINDOW);
        Self { capacity }
    }

    /// Write page size in bytes.
    #[inline]
    pub const fn page_size(&self) -> usize {
        PAGE_SIZE
    }

    /// Total storage in bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of write pages.
    #[inline]
    pub const fn page_count(&self) -> usize {
        self.capacity / PAGE_SIZE
    }

    /// Page holding `address`.
    #[inline]
    pub const fn page_of(&self, address: u8) -> usize {
        address as usize / PAGE_SIZE
    }

    /// Bytes left in the page of `address`, `address` included.
    #[inline]
    pub const fn room_in_page(&self, address: u8) -> usize {
        (self.page_of(address) + 1) * PAGE_SIZE - address as usize
    }
}

/// 128-bit factory serial number, read only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialNumber(pub [u8; SERIAL_NUMBER_LEN]);

impl SerialNumber {
    /// Raw bytes, in the order the device returns them.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SERIAL_NUMBER_LEN] {
        &self.0
    }
}

impl core::fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for byte in self.0 {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}
