//! Emulated memory management unit.
//!
//! A logical address is resolved through the TLB first, then the page table.
//! When neither knows the page, a page fault loads it from the backing store
//! into the next free physical frame.

pub mod address;
pub mod frame_allocator;
pub mod page_table;
pub mod statistics;
pub mod tlb;

use std::fmt;

use disk::{Disk, DiskError};
use log::{debug, log_enabled, trace, Level};
use memory::{MemoryError, PhysicalMemory};

pub use address::LogicalAddress;
pub use frame_allocator::FrameAllocator;
pub use page_table::{PageTable, PageTableError};
pub use statistics::Statistics;
pub use tlb::{Tlb, TlbEntry};

pub const PAGE_SIZE: usize = 256;
pub const PAGE_COUNT: usize = 256;
pub const TLB_ENTRIES: usize = 16;
pub const PHYSICAL_MEMORY_SIZE: usize = PAGE_SIZE * PAGE_COUNT;

/// The MMU with the default geometry: 64 KiB of physical memory and a
/// 16 entry TLB.
pub type DefaultMmu = Mmu<PHYSICAL_MEMORY_SIZE, TLB_ENTRIES>;

/// How an address was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    TlbHit,
    PageTableHit,
    PageFault,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::TlbHit => "TLB hit",
            Outcome::PageTableHit => "page table hit",
            Outcome::PageFault => "page fault",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub address: LogicalAddress,
    pub frame_number: u32,
    pub physical_address: u32,
    pub value: u8,
    pub outcome: Outcome,
}

#[derive(Debug)]
pub enum MmuError {
    CapacityExhausted { page_number: u8 },
    Disk(DiskError),
    Memory(MemoryError),
    PageTable(PageTableError),
}

impl fmt::Display for MmuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MmuError::CapacityExhausted { page_number } => write!(
                f,
                "no free frame left to load page {:#04x}, physical memory is full",
                page_number
            ),
            MmuError::Disk(e) => write!(f, "{}", e),
            MmuError::Memory(e) => write!(f, "{}", e),
            MmuError::PageTable(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MmuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MmuError::CapacityExhausted { .. } => None,
            MmuError::Disk(e) => Some(e),
            MmuError::Memory(e) => Some(e),
            MmuError::PageTable(e) => Some(e),
        }
    }
}

impl From<DiskError> for MmuError {
    fn from(e: DiskError) -> Self {
        MmuError::Disk(e)
    }
}

impl From<MemoryError> for MmuError {
    fn from(e: MemoryError) -> Self {
        MmuError::Memory(e)
    }
}

impl From<PageTableError> for MmuError {
    fn from(e: PageTableError) -> Self {
        MmuError::PageTable(e)
    }
}

pub struct Mmu<const MEMORY_CAPACITY: usize, const TLB_SIZE: usize> {
    page_table: PageTable<PAGE_COUNT>,
    tlb: Tlb<TLB_SIZE>,
    memory: PhysicalMemory<MEMORY_CAPACITY>,
    frame_allocator: FrameAllocator<MEMORY_CAPACITY, PAGE_SIZE>,
    statistics: Statistics,
}

impl<const MEMORY_CAPACITY: usize, const TLB_SIZE: usize> Mmu<MEMORY_CAPACITY, TLB_SIZE> {
    pub fn init() -> Self {
        assert!(
            MEMORY_CAPACITY >= PAGE_SIZE,
            "Physical memory must hold at least one frame"
        );
        Self {
            page_table: PageTable::init(),
            tlb: Tlb::new(),
            memory: PhysicalMemory::new(),
            frame_allocator: FrameAllocator::init(),
            statistics: Statistics::new(),
        }
    }

    /// Resolves `address` to the byte it names, loading its page from `disk`
    /// on a page fault.
    pub fn translate(
        &mut self,
        address: LogicalAddress,
        disk: &Disk<PAGE_SIZE>,
    ) -> Result<Translation, MmuError> {
        if log_enabled!(Level::Trace) {
            self.dump();
        }
        let page_number = address.page_number();

        let (frame_number, outcome) = match self.tlb.lookup(page_number) {
            Some(frame_number) => (frame_number, Outcome::TlbHit),
            None => match self.page_table.get_frame(page_number as usize) {
                Some(frame_number) => {
                    self.tlb.insert(page_number, frame_number);
                    (frame_number, Outcome::PageTableHit)
                }
                None => {
                    let frame_number = self.handle_page_fault(page_number, disk)?;
                    self.tlb.insert(page_number, frame_number);
                    (frame_number, Outcome::PageFault)
                }
            },
        };

        let physical_address = frame_number * PAGE_SIZE as u32 + address.offset() as u32;
        let value = self.memory.read_u8(physical_address as u64)?;
        self.statistics.record(outcome);
        debug!(
            "{} -> {:#06x} = {:#04x} ({})",
            address, physical_address, value, outcome
        );

        Ok(Translation {
            address,
            frame_number,
            physical_address,
            value,
            outcome,
        })
    }

    fn handle_page_fault(
        &mut self,
        page_number: u8,
        disk: &Disk<PAGE_SIZE>,
    ) -> Result<u32, MmuError> {
        debug!("Page fault on page[{}]", page_number);
        if self.frame_allocator.is_exhausted() {
            return Err(MmuError::CapacityExhausted { page_number });
        }
        let page = disk.read_block(page_number as usize)?;
        let frame_number = self
            .frame_allocator
            .allocate_frame()
            .ok_or(MmuError::CapacityExhausted { page_number })?;
        self.memory
            .write_block(frame_number as u64 * PAGE_SIZE as u64, &page[..])?;
        self.page_table
            .map_to_frame(page_number as usize, frame_number)?;
        Ok(frame_number)
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn page_table(&self) -> &PageTable<PAGE_COUNT> {
        &self.page_table
    }

    pub fn tlb(&self) -> &Tlb<TLB_SIZE> {
        &self.tlb
    }

    pub fn allocated_frames(&self) -> usize {
        self.frame_allocator.allocated()
    }

    pub fn frame_count() -> usize {
        FrameAllocator::<MEMORY_CAPACITY, PAGE_SIZE>::frame_count()
    }

    fn dump(&self) {
        trace!("Page Table:");
        for (page_number, frame_number) in self.page_table.iter() {
            trace!("[{:#04x}] -> {:#04x}", page_number, frame_number);
        }
        trace!("TLB:");
        for entry in self.tlb.iter() {
            trace!("[{:#04x}] -> {:#04x}", entry.page_number, entry.frame_number);
        }
    }
}
