//! Stereo packing of two Q1.15 channels into one 32-bit data word
//!
//! Bits [15:0] carry the left (first) channel, bits [31:16] the right
//! (second) channel, both two's complement.

use crate::qmf::SubbandPair;
use crate::signal_processing::Sample;

pub fn pack_stereo(left: Sample, right: Sample) -> u32 {
    (left as u16 as u32) | ((right as u16 as u32) << 16)
}

pub fn unpack_stereo(word: u32) -> (Sample, Sample) {
    (word as u16 as Sample, (word >> 16) as u16 as Sample)
}

impl SubbandPair {
    /// Low band in the left slot, high band in the right slot
    pub fn pack(&self) -> u32 {
        pack_stereo(self.low, self.high)
    }

    pub fn unpack(word: u32) -> Self {
        let (low, high) = unpack_stereo(word);
        Self { low, high }
    }
}
