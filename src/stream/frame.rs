/// One beat on a valid/ready stream port
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame<T> {
    pub data: T,
    pub valid: bool,
    /// End of block
    pub last: bool,
}

impl<T> Frame<T> {
    pub fn valid(data: T) -> Self {
        Self {
            data,
            valid: true,
            last: false,
        }
    }

    /// Valid frame closing a block
    pub fn last(data: T) -> Self {
        Self {
            data,
            valid: true,
            last: true,
        }
    }

    pub fn with_last(mut self, last: bool) -> Self {
        self.last = last;
        self
    }

    /// True when this frame moves on a step where the receiver is ready
    pub fn transfers(&self, ready: bool) -> bool {
        self.valid && ready
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Frame<U> {
        Frame {
            data: f(self.data),
            valid: self.valid,
            last: self.last,
        }
    }
}

impl<T: Default> Frame<T> {
    /// Nothing offered this step
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Side-channel flags that travel alongside a sample through a pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamFlags {
    pub valid: bool,
    pub last: bool,
}

/// Checks the producer side of one input port
///
/// Once `valid` is raised it must stay raised until a transfer happens.
/// Violations are integration bugs and fail fast in debug builds.
///
/// Only the producer is checked. The transfer is defined as `valid && ready`
/// on this side, so a consumer that takes a frame without asserting ready
/// is invisible here and has to be caught at the consumer.
#[derive(Debug, Clone, Default)]
pub struct HandshakeMonitor {
    name: &'static str,
    pending: bool,
}

impl HandshakeMonitor {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            pending: false,
        }
    }

    /// Record one step of the port and return whether a transfer occurred
    pub fn observe(&mut self, valid: bool, ready: bool) -> bool {
        debug_assert!(
            valid || !self.pending,
            "{} port: valid retracted before transfer",
            self.name
        );
        let transferred = valid && ready;
        self.pending = valid && !ready;
        transferred
    }

    /// Forget a pending offer, e.g. after a reset of the whole chain
    pub fn clear(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
