//! Monotone identifier allocation

use questsmith_domain::FormId;

use crate::ports::IdAllocator;

/// Issues form ids from a monotone counter; never reuses an id.
///
/// `with_burn` reserves a block of low ids for hand-pinned records (the
/// companion build pins its quest, actor, and placement ids below 0x300)
/// before sequential allocation starts.
#[derive(Debug, Clone)]
pub struct SequentialAllocator {
    next: u32,
}

impl SequentialAllocator {
    pub fn new() -> Self {
        Self { next: 0x800 }
    }

    pub fn with_burn(burned: u32) -> Self {
        Self { next: 0x800 + burned }
    }

    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }
}

impl Default for SequentialAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator for SequentialAllocator {
    fn next_id(&mut self) -> FormId {
        let id = FormId::new(self.next);
        self.next += 1;
        id
    }
}
