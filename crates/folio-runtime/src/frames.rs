//! requestAnimationFrame

/// Animation frame request handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

/// Callbacks requested for the next frame
#[derive(Debug, Default)]
pub struct AnimationFrames {
    next_id: u64,
    pending: Vec<FrameId>,
}

impl AnimationFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a callback on the next frame
    pub fn request(&mut self) -> FrameId {
        self.next_id += 1;
        let id = FrameId(self.next_id);
        self.pending.push(id);
        id
    }

    /// Cancel a pending request
    pub fn cancel(&mut self, id: FrameId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|&f| f != id);
        self.pending.len() != before
    }

    /// Take the requests due this frame; requests made while they run wait
    /// for the next frame
    pub fn take(&mut self) -> Vec<FrameId> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self, id: FrameId) -> bool {
        self.pending.contains(&id)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
