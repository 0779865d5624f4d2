use super::frame::StreamFlags;

/// Shift register for `valid`/`last` matched to a stage's pipeline depth
///
/// Shifts only when the stage advances, so during a stall the flags hold
/// together with the data registers they describe.
#[derive(Debug, Clone)]
pub struct ControlDelay<const DEPTH: usize> {
    slots: [StreamFlags; DEPTH],
}

impl<const DEPTH: usize> ControlDelay<DEPTH> {
    pub fn new() -> Self {
        const { assert!(DEPTH > 0, "control delay needs at least one stage") };
        Self {
            slots: [StreamFlags::default(); DEPTH],
        }
    }

    /// Flags of the sample currently at the pipeline output
    pub fn head(&self) -> StreamFlags {
        self.slots[DEPTH - 1]
    }

    /// Advance one step, entering `flags` at the input end
    pub fn shift(&mut self, flags: StreamFlags) {
        self.slots.copy_within(0..DEPTH - 1, 1);
        self.slots[0] = flags;
    }

    /// Number of valid samples in flight
    pub fn occupancy(&self) -> usize {
        self.slots.iter().filter(|f| f.valid).count()
    }

    pub fn clear(&mut self) {
        self.slots = [StreamFlags::default(); DEPTH];
    }

    pub fn depth(&self) -> usize {
        DEPTH
    }
}

impl<const DEPTH: usize> Default for ControlDelay<DEPTH> {
    fn default() -> Self {
        Self::new()
    }
}
