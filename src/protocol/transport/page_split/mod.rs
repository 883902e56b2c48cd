//! Page-boundary planner for EEPROM writes. Splits a logical write into the
//! sequence of chunks the device accepts: none of them crosses an 8-byte page.
//!
//! A chunk that straddles a page boundary is not rejected by the device: its
//! internal address counter wraps to the start of the same page and silently
//! overwrites the bytes already there. The planner exists to make that
//! impossible.
use crate::core::{ADDRESS_WINDOW, PAGE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// One page-contained slice of a logical write.
pub struct Chunk {
    /// Word address of the first byte.
    pub address: u8,
    /// Offset of the first byte inside the caller payload.
    pub offset: usize,
    /// Number of bytes, 1 to [`PAGE_SIZE`].
    pub len: usize,
}

impl Chunk {
    /// Slice of `payload` covered by this chunk.
    #[inline]
    pub fn of<'a>(&self, payload: &'a [u8]) -> &'a [u8] {
        &payload[self.offset..self.offset + self.len]
    }
}

/// Lazy iterator returning chunks one by one.
///
/// The first chunk runs from the start address to the end of its page (or to
/// the end of the payload), every following chunk starts page-aligned and
/// carries at most one full page.
#[derive(Debug, Clone)]
pub struct PageChunks {
    address: usize,
    offset: usize,
    remaining: usize,
    room_in_page: usize,
}

impl PageChunks {
    /// Plan a write of `len` bytes starting at `start`.
    ///
    /// The range is clamped to the one-byte address window; callers validate
    /// it beforehand.
    pub fn new(start: u8, len: usize) -> Self {
        let address = start as usize;
        let page = address / PAGE_SIZE;
        Self {
            address,
            offset: 0,
            remaining: len.min(ADDRESS_WINDOW - address),
            room_in_page: (page + 1) * PAGE_SIZE - address,
        }
    }
}

impl Iterator for PageChunks {
    type Item = Chunk;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let len = self.remaining.min(self.room_in_page);
        let chunk = Chunk {
            address: self.address as u8,
            offset: self.offset,
            len,
        };

        // Next chunk starts on the following page boundary with a full page of room.
        self.address = (self.address / PAGE_SIZE + 1) * PAGE_SIZE;
        self.offset += len;
        self.remaining -= len;
        self.room_in_page = PAGE_SIZE;

        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = if self.remaining == 0 {
            0
        } else if self.remaining <= self.room_in_page {
            1
        } else {
            1 + (self.remaining - self.room_in_page).div_ceil(PAGE_SIZE)
        };
        (count, Some(count))
    }
}

impl ExactSizeIterator for PageChunks {}

impl core::iter::FusedIterator for PageChunks {}
