/// Maps one page to the frame holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTableEntry {
    /// | valid: u8 | frame number: u32 |
    pub(super) entry: [u8; 5],
}

impl PageTableEntry {
    pub(super) fn unmapped() -> Self {
        PageTableEntry { entry: [0; 5] }
    }

    pub fn is_mapped(&self) -> bool {
        self.entry[0] == 1
    }

    pub fn get_frame_number(&self) -> Option<u32> {
        if !self.is_mapped() {
            return None;
        }
        let mut bytes = [0; 4];
        bytes.copy_from_slice(&self.entry[1..5]);
        Some(u32::from_be_bytes(bytes))
    }

    pub(super) fn set_frame_number(&mut self, frame_number: u32) {
        self.entry[0] = 1;
        self.entry[1..5].copy_from_slice(&frame_number.to_be_bytes());
    }
}
