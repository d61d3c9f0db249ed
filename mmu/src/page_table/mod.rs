mod iter;
mod page_table_entry;

use std::fmt;

use log::debug;

pub use page_table_entry::PageTableEntry;

use self::iter::PageTableIterator;

#[derive(Debug, PartialEq, Eq)]
pub enum PageTableError {
    OutOfRange { page_number: usize },
    AlreadyMapped { page_number: usize, frame_number: u32 },
}

impl fmt::Display for PageTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageTableError::OutOfRange { page_number } => {
                write!(f, "page {:#04x} is outside the page table", page_number)
            }
            PageTableError::AlreadyMapped {
                page_number,
                frame_number,
            } => write!(
                f,
                "page {:#04x} is already mapped to frame {:#04x}",
                page_number, frame_number
            ),
        }
    }
}

impl std::error::Error for PageTableError {}

/// Single-level page table with one entry per page. Entries start unmapped
/// and are mapped at most once.
#[derive(Debug, Clone)]
pub struct PageTable<const PAGES: usize> {
    entries: Vec<PageTableEntry>,
}

impl<const PAGES: usize> PageTable<PAGES> {
    pub fn init() -> Self {
        Self {
            entries: vec![PageTableEntry::unmapped(); PAGES],
        }
    }

    fn get_entry(&self, page_number: usize) -> Option<PageTableEntry> {
        self.entries.get(page_number).copied()
    }

    pub fn get_frame(&self, page_number: usize) -> Option<u32> {
        self.get_entry(page_number)?.get_frame_number()
    }

    pub fn map_to_frame(
        &mut self,
        page_number: usize,
        frame_number: u32,
    ) -> Result<(), PageTableError> {
        let entry = self
            .entries
            .get_mut(page_number)
            .ok_or(PageTableError::OutOfRange { page_number })?;
        if let Some(frame_number) = entry.get_frame_number() {
            return Err(PageTableError::AlreadyMapped {
                page_number,
                frame_number,
            });
        }
        entry.set_frame_number(frame_number);
        debug!("Mapped page[{}] -> frame[{}]", page_number, frame_number);
        Ok(())
    }

    pub fn mapped_count(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> PageTableIterator<'_> {
        PageTableIterator::new(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::{PageTable, PageTableError};

    #[test]
    fn starts_unmapped() {
        let table: PageTable<256> = PageTable::init();
        assert!((0..256).all(|page| table.get_frame(page).is_none()));
        assert_eq!(table.mapped_count(), 0);
    }

    #[test]
    fn create_mapping() {
        let mut table: PageTable<256> = PageTable::init();
        table.map_to_frame(12, 43).unwrap();
        table.map_to_frame(4, 45).unwrap();
        assert_eq!(table.get_frame(12), Some(43));
        assert_eq!(table.get_frame(4), Some(45));
        assert_eq!(table.get_frame(5), None);
    }

    #[test]
    fn mapping_is_never_reassigned() {
        let mut table: PageTable<256> = PageTable::init();
        table.map_to_frame(12, 43).unwrap();
        assert_eq!(
            table.map_to_frame(12, 49),
            Err(PageTableError::AlreadyMapped {
                page_number: 12,
                frame_number: 43
            })
        );
        assert_eq!(table.get_frame(12), Some(43));
    }

    #[test]
    fn out_of_range() {
        let mut table: PageTable<16> = PageTable::init();
        assert_eq!(table.get_frame(16), None);
        assert_eq!(
            table.map_to_frame(16, 0),
            Err(PageTableError::OutOfRange { page_number: 16 })
        );
    }

    #[test]
    fn iterate_mappings() {
        let mut table: PageTable<256> = PageTable::init();
        table.map_to_frame(200, 0).unwrap();
        table.map_to_frame(3, 1).unwrap();
        table.map_to_frame(255, 2).unwrap();
        let mappings: Vec<_> = table.iter().collect();
        assert_eq!(mappings, vec![(3, 1), (200, 0), (255, 2)]);
        assert_eq!(table.mapped_count(), 3);
    }
}
