//! ES8311 clock coefficient table
//!
//! Every supported (MCLK, sample rate) pair maps to one fixed set of
//! divider and oversampling values. Lookup is exact-match only: a pair
//! missing from the table is a configuration error, never approximated.
//! Reference: ES8311 datasheet, clock manager registers 0x02..0x08

use crate::error::AudioError;

/// One row of the coefficient table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockProfile {
    /// Reference (master) clock in Hz
    pub mclk_hz: u32,
    /// Sample rate in Hz
    pub sample_rate_hz: u32,
    pub pre_div: u8,
    pub pre_multi: u8,
    pub adc_div: u8,
    pub dac_div: u8,
    /// Single/double speed select
    pub fs_mode: u8,
    pub lrck_h: u8,
    pub lrck_l: u8,
    pub bclk_div: u8,
    pub adc_osr: u8,
    pub dac_osr: u8,
}

impl ClockProfile {
    #[allow(clippy::too_many_arguments)]
    const fn new(
        mclk_hz: u32,
        sample_rate_hz: u32,
        pre_div: u8,
        pre_multi: u8,
        adc_div: u8,
        dac_div: u8,
        fs_mode: u8,
        lrck_h: u8,
        lrck_l: u8,
        bclk_div: u8,
        adc_osr: u8,
        dac_osr: u8,
    ) -> Self {
        Self {
            mclk_hz,
            sample_rate_hz,
            pre_div,
            pre_multi,
            adc_div,
            dac_div,
            fs_mode,
            lrck_h,
            lrck_l,
            bclk_div,
            adc_osr,
            dac_osr,
        }
    }

    /// REG02: keep bits 2:0, pre-divider in 7:5, multiplier in 4:3
    #[inline]
    pub fn reg02(&self, current: u8) -> u8 {
        (current & 0x07) | ((self.pre_div - 1) << 5) | (self.pre_multi << 3)
    }

    /// REG03: fs mode in bit 6, ADC oversampling in 5:0
    #[inline]
    pub fn reg03(&self) -> u8 {
        (self.fs_mode << 6) | self.adc_osr
    }

    /// REG04: DAC oversampling
    #[inline]
    pub fn reg04(&self) -> u8 {
        self.dac_osr
    }

    /// REG05: ADC divider in 7:4, DAC divider in 3:0
    #[inline]
    pub fn reg05(&self) -> u8 {
        ((self.adc_div - 1) << 4) | (self.dac_div - 1)
    }

    /// REG06: keep bits 7:5, bit clock divider in 4:0
    ///
    /// Dividers below 19 are stored minus one, larger ones verbatim.
    #[inline]
    pub fn reg06(&self, current: u8) -> u8 {
        let div = if self.bclk_div < 19 {
            self.bclk_div - 1
        } else {
            self.bclk_div
        };
        (current & 0xE0) | div
    }

    /// REG07: keep bits 7:6, LRCK divider high bits in 5:0
    #[inline]
    pub fn reg07(&self, current: u8) -> u8 {
        (current & 0xC0) | self.lrck_h
    }

    /// REG08: LRCK divider low byte
    #[inline]
    pub fn reg08(&self) -> u8 {
        self.lrck_l
    }
}

/// Codec clock divider coefficients
pub static CLOCK_PROFILES: [ClockProfile; 11] = [
    // 8k
    ClockProfile::new(12_288_000, 8000, 0x06, 0x00, 0x01, 0x01, 0x00, 0x00, 0xff, 0x04, 0x10, 0x10),
    ClockProfile::new(18_432_000, 8000, 0x03, 0x01, 0x03, 0x03, 0x00, 0x05, 0xff, 0x18, 0x10, 0x10),
    ClockProfile::new(16_384_000, 8000, 0x08, 0x00, 0x01, 0x01, 0x00, 0x00, 0xff, 0x04, 0x10, 0x10),
    ClockProfile::new(8_192_000, 8000, 0x04, 0x00, 0x01, 0x01, 0x00, 0x00, 0xff, 0x04, 0x10, 0x10),
    // 16k
    ClockProfile::new(12_288_000, 16000, 0x03, 0x00, 0x01, 0x01, 0x00, 0x00, 0xff, 0x04, 0x10, 0x10),
    ClockProfile::new(18_432_000, 16000, 0x03, 0x01, 0x03, 0x03, 0x00, 0x02, 0xff, 0x0c, 0x10, 0x10),
    ClockProfile::new(16_384_000, 16000, 0x04, 0x00, 0x01, 0x01, 0x00, 0x00, 0xff, 0x04, 0x10, 0x10),
    // 24k
    ClockProfile::new(12_288_000, 24000, 0x02, 0x00, 0x01, 0x01, 0x00, 0x00, 0xff, 0x04, 0x10, 0x10),
    ClockProfile::new(6_144_000, 24000, 0x01, 0x00, 0x01, 0x01, 0x00, 0x00, 0xff, 0x04, 0x10, 0x10),
    // 44.1k
    ClockProfile::new(11_289_600, 44100, 0x01, 0x00, 0x01, 0x01, 0x00, 0x00, 0xff, 0x04, 0x10, 0x10),
    // 48k
    ClockProfile::new(12_288_000, 48000, 0x01, 0x00, 0x01, 0x01, 0x00, 0x00, 0xff, 0x04, 0x10, 0x10),
];

/// Look up the clock profile for an exact (MCLK, sample rate) pair.
pub fn resolve(mclk_hz: u32, sample_rate_hz: u32) -> Result<&'static ClockProfile, AudioError> {
    CLOCK_PROFILES
        .iter()
        .find(|p| p.mclk_hz == mclk_hz && p.sample_rate_hz == sample_rate_hz)
        .ok_or(AudioError::UnsupportedRate {
            mclk_hz,
            sample_rate_hz,
        })
}
