use super::PageTableEntry;

/// Walks the mapped entries of a page table as `(page number, frame number)`.
pub struct PageTableIterator<'a> {
    current: usize,
    entries: &'a [PageTableEntry],
}

impl<'a> PageTableIterator<'a> {
    pub fn new(entries: &'a [PageTableEntry]) -> Self {
        Self {
            current: 0,
            entries,
        }
    }
}

impl<'a> Iterator for PageTableIterator<'a> {
    type Item = (usize, u32);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(entry) = self.entries.get(self.current) {
            let page_number = self.current;
            self.current += 1;
            if let Some(frame_number) = entry.get_frame_number() {
                return Some((page_number, frame_number));
            }
        }
        None
    }
}
