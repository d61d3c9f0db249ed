use log::debug;

/// Hands out physical frames in increasing order. Frames are never freed.
#[derive(Debug, Clone, Default)]
pub struct FrameAllocator<const MEMORY_CAPACITY: usize, const FRAME_SIZE: usize> {
    next_free: u32,
}

impl<const MEMORY_CAPACITY: usize, const FRAME_SIZE: usize>
    FrameAllocator<MEMORY_CAPACITY, FRAME_SIZE>
{
    /// How many frames fit in physical memory
    pub const fn frame_count() -> usize {
        MEMORY_CAPACITY / FRAME_SIZE
    }

    pub fn init() -> Self {
        Self { next_free: 0 }
    }

    pub fn allocate_frame(&mut self) -> Option<u32> {
        if self.next_free as usize >= Self::frame_count() {
            debug!("No free frames");
            return None;
        }
        let frame_number = self.next_free;
        self.next_free += 1;
        debug!("Allocated frame[{}]", frame_number);
        Some(frame_number)
    }

    pub fn allocated(&self) -> usize {
        self.next_free as usize
    }

    pub fn free_frames(&self) -> usize {
        Self::frame_count() - self.allocated()
    }

    pub fn is_exhausted(&self) -> bool {
        self.free_frames() == 0
    }
}
