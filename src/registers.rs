//! Control and coefficient register file
//!
//! | Address            | Contents                                   |
//! |--------------------|--------------------------------------------|
//! | `0x00`             | global enable, bit 0 (other bits ignored)  |
//! | `(k + 1) * 4`      | tap `k` coefficient, sign-extended 16 bits |
//!
//! Every register is its own atomic word, so a writer on the control plane
//! never tears a coefficient the data plane is reading. A generation
//! counter tells the data plane when its cached coefficient snapshot is
//! stale; the streaming stages re-read it only at step boundaries.
//!
//! Accesses outside the map (beyond the last tap, or not a multiple of 4)
//! are rejected with `QmfError::UnmappedAddress` and change nothing.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use crate::constants::{REG_ENABLE, REG_STRIDE};
use crate::error::{QmfError, Result};
use crate::signal_processing::{Coefficient, CoefficientSet};

/// Decoded register address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    Enable,
    Tap(usize),
}

/// Memory-mapped enable flag and coefficient store
#[derive(Debug)]
pub struct RegisterFile {
    enable: AtomicBool,
    taps: Vec<AtomicU32>,
    generation: AtomicU64,
}

impl RegisterFile {
    /// Create a register file for `ntaps` coefficients, all zero and disabled
    pub fn new(ntaps: usize) -> Self {
        Self {
            enable: AtomicBool::new(false),
            taps: (0..ntaps).map(|_| AtomicU32::new(0)).collect(),
            generation: AtomicU64::new(0),
        }
    }

    /// Create a register file preloaded with a coefficient set and enable state
    pub fn with_coefficients(coefficients: &CoefficientSet, enabled: bool) -> Self {
        let regs = Self::new(coefficients.num_taps());
        regs.load_coefficients(coefficients);
        regs.set_enabled(enabled);
        regs
    }

    /// Map an address onto a register
    pub fn decode(&self, address: u32) -> Result<Register> {
        if address == REG_ENABLE {
            return Ok(Register::Enable);
        }
        if !address.is_multiple_of(REG_STRIDE) {
            return Err(QmfError::UnmappedAddress(address));
        }
        let tap = (address / REG_STRIDE) as usize - 1;
        if tap < self.taps.len() {
            Ok(Register::Tap(tap))
        } else {
            Err(QmfError::UnmappedAddress(address))
        }
    }

    /// Write one register; `Ok` is the completion acknowledgment
    ///
    /// Coefficient writes keep the low 16 bits of `data`.
    pub fn write(&self, address: u32, data: u32) -> Result<()> {
        let register = self.decode(address).inspect_err(|_| {
            log::warn!("Rejected write of {:#010x} to unmapped address {:#06x}", data, address);
        })?;
        match register {
            Register::Enable => self.set_enabled(data & 1 != 0),
            Register::Tap(k) => self.store_tap(k, data as u16 as Coefficient),
        }
        Ok(())
    }

    /// Read one register
    ///
    /// Coefficients come back sign-extended to the full word.
    pub fn read(&self, address: u32) -> Result<u32> {
        let register = self.decode(address).inspect_err(|_| {
            log::warn!("Rejected read of unmapped address {:#06x}", address);
        })?;
        Ok(match register {
            Register::Enable => self.enabled() as u32,
            Register::Tap(k) => self.taps[k].load(Ordering::Acquire),
        })
    }

    pub fn enabled(&self) -> bool {
        self.enable.load(Ordering::Acquire)
    }

    pub fn set_enabled(&self, enabled: bool) {
        let was = self.enable.swap(enabled, Ordering::AcqRel);
        if was != enabled {
            log::debug!("Register file {}", if enabled { "enabled" } else { "disabled" });
        }
    }

    /// Write every tap of a coefficient set
    ///
    /// Each tap is updated atomically; a reader may see a mix of old and new
    /// taps until the stages take their next step-boundary snapshot.
    pub fn load_coefficients(&self, coefficients: &CoefficientSet) {
        for (k, &c) in coefficients.prototype().iter().enumerate().take(self.taps.len()) {
            self.store_tap(k, c);
        }
    }

    fn store_tap(&self, k: usize, value: Coefficient) {
        self.taps[k].store(value as i32 as u32, Ordering::Release);
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Coefficient of tap `k`
    pub fn coefficient(&self, k: usize) -> Option<Coefficient> {
        self.taps
            .get(k)
            .map(|word| word.load(Ordering::Acquire) as u16 as Coefficient)
    }

    /// Counter bumped on every coefficient write
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Read all taps into an immutable coefficient set
    pub fn snapshot(&self) -> Result<CoefficientSet> {
        let taps = self
            .taps
            .iter()
            .map(|word| word.load(Ordering::Acquire) as u16 as Coefficient)
            .collect();
        CoefficientSet::new(taps)
    }

    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    /// Address of tap `k`
    pub fn tap_address(k: usize) -> u32 {
        (k as u32 + 1) * REG_STRIDE
    }
}

/// Per-step view of the register file used by the data path
///
/// Taken at construction and at every step boundary; a whole step runs
/// against one snapshot.
#[derive(Debug, Clone)]
pub struct ControlSnapshot {
    pub enabled: bool,
    pub coefficients: CoefficientSet,
    generation: u64,
}

impl ControlSnapshot {
    pub fn capture(regs: &RegisterFile) -> Result<Self> {
        let generation = regs.generation();
        Ok(Self {
            enabled: regs.enabled(),
            coefficients: regs.snapshot()?,
            generation,
        })
    }

    /// Refresh from the register file, re-reading coefficients only when a
    /// write happened since the last snapshot
    pub fn refresh(&mut self, regs: &RegisterFile) {
        self.enabled = regs.enabled();
        let generation = regs.generation();
        if generation != self.generation {
            if let Ok(coefficients) = regs.snapshot() {
                log::debug!("Coefficient snapshot refreshed (generation {})", generation);
                self.coefficients = coefficients;
                self.generation = generation;
            }
        }
    }

    /// Copy another snapshot, cloning the coefficients only if they differ
    pub fn follow(&mut self, leader: &ControlSnapshot) {
        self.enabled = leader.enabled;
        if self.generation != leader.generation {
            self.coefficients = leader.coefficients.clone();
            self.generation = leader.generation;
        }
    }
}
