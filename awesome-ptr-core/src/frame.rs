//! Touch-move coalescing onto animation frames

use crate::TouchSample;

/// What the host does with a touch-move sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coalesced {
    /// First move of a gesture: apply it now, so the page-scroll decision
    /// for the following moves already sees the drag
    Immediate(TouchSample),
    /// Held until the next frame, which the host must request
    RequestFrame,
    /// Replaced the sample already waiting for the requested frame
    Merged,
}

/// Holds the most recent touch-move sample until the next frame.
///
/// Only the final pulled height matters for a frame, so intermediate
/// samples are overwritten.
#[derive(Debug)]
pub struct FrameCoalescer {
    pending: Option<TouchSample>,
    frame_requested: bool,
    leading: bool,
}

impl Default for FrameCoalescer {
    fn default() -> Self {
        Self {
            pending: None,
            frame_requested: false,
            leading: true,
        }
    }
}

impl FrameCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: TouchSample) -> Coalesced {
        if self.leading {
            self.leading = false;
            return Coalesced::Immediate(sample);
        }
        self.pending = Some(sample);
        if self.frame_requested {
            Coalesced::Merged
        } else {
            self.frame_requested = true;
            Coalesced::RequestFrame
        }
    }

    /// Frame boundary reached: hand out the latest sample
    pub fn take(&mut self) -> Option<TouchSample> {
        self.frame_requested = false;
        self.pending.take()
    }

    /// Gesture over: drop anything pending and pass the next move through
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
