use std::collections::VecDeque;

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlbEntry {
    pub page_number: u8,
    pub frame_number: u32,
}

/// Translation lookaside buffer holding at most `ENTRIES` mappings.
///
/// Entries are kept in insertion order and evicted first-in first-out; a
/// lookup hit does not move an entry. The same page may appear more than
/// once, in which case the oldest copy answers lookups.
#[derive(Debug, Clone)]
pub struct Tlb<const ENTRIES: usize> {
    entries: VecDeque<TlbEntry>,
}

impl<const ENTRIES: usize> Tlb<ENTRIES> {
    pub fn new() -> Self {
        assert!(ENTRIES > 0, "TLB must hold at least one entry");
        Self {
            entries: VecDeque::with_capacity(ENTRIES),
        }
    }

    pub const fn capacity() -> usize {
        ENTRIES
    }

    pub fn lookup(&self, page_number: u8) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.page_number == page_number)
            .map(|entry| entry.frame_number)
    }

    /// Appends a mapping, evicting the oldest entry first when full. Returns
    /// the evicted entry, if any.
    pub fn insert(&mut self, page_number: u8, frame_number: u32) -> Option<TlbEntry> {
        let evicted = if self.is_full() {
            self.entries.pop_front()
        } else {
            None
        };
        if let Some(evicted) = evicted {
            debug!(
                "TLB full, evicted page[{}] -> frame[{}]",
                evicted.page_number, evicted.frame_number
            );
        }
        self.entries.push_back(TlbEntry {
            page_number,
            frame_number,
        });
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= ENTRIES
    }

    /// Oldest entry first.
    pub fn iter(&self) -> impl Iterator<Item = &TlbEntry> {
        self.entries.iter()
    }
}

impl<const ENTRIES: usize> Default for Tlb<ENTRIES> {
    fn default() -> Self {
        Self::new()
    }
}
