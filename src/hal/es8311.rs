//! ES8311 audio codec driver
//!
//! I2C control only; samples reach the chip through [`crate::hal::audio`].
//! The bus is borrowed per call so the RTC can share it.
//! Reference: ES8311 datasheet

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::{AudioConfig, SettleDelays};
use crate::error::AudioError;
use crate::hal::coeff::{self, ClockProfile};
use crate::{audio_debug, audio_error, audio_info};

/// ES8311 I2C address (depends on AD0 pin)
pub const ES8311_ADDR: u8 = 0x18; // AD0 = LOW

/// Number of registers covered by [`Es8311::dump_registers`].
pub const REG_DUMP_LEN: usize = 0x4A;

/// ES8311 register addresses
pub mod regs {
    pub const RESET: u8 = 0x00;
    pub const CLK_MANAGER1: u8 = 0x01;
    pub const CLK_MANAGER2: u8 = 0x02;
    pub const CLK_MANAGER3: u8 = 0x03;
    pub const CLK_MANAGER4: u8 = 0x04;
    pub const CLK_MANAGER5: u8 = 0x05;
    pub const CLK_MANAGER6: u8 = 0x06;
    pub const CLK_MANAGER7: u8 = 0x07;
    pub const CLK_MANAGER8: u8 = 0x08;
    pub const SDP_IN: u8 = 0x09;
    pub const SDP_OUT: u8 = 0x0A;
    pub const SYSTEM_PWR: u8 = 0x0D;
    pub const SYSTEM_PDN: u8 = 0x0E;
    pub const SYSTEM_DAC_PWR: u8 = 0x12;
    pub const SYSTEM_HP_DRIVE: u8 = 0x13;
    pub const SYSTEM_MIC: u8 = 0x14;
    pub const ADC_RAMP: u8 = 0x15;
    pub const ADC_PGA_GAIN: u8 = 0x16;
    pub const ADC_VOL: u8 = 0x17;
    pub const ADC_EQ: u8 = 0x1C;
    pub const DAC_MUTE: u8 = 0x31;
    pub const DAC_VOL: u8 = 0x32;
    pub const DAC_RAMP: u8 = 0x37;
    pub const CHIP_ID1: u8 = 0xFD;
    pub const CHIP_ID2: u8 = 0xFE;
    pub const CHIP_VER: u8 = 0xFF;
}

/// DAC soft-mute bits in [`regs::DAC_MUTE`]
const DAC_MUTE_BITS: u8 = (1 << 6) | (1 << 5);

/// Serial audio port word length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Bits16,
    Bits18,
    Bits20,
    Bits24,
    Bits32,
}

impl Resolution {
    /// Map a bit count to a resolution, if the port supports it.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            16 => Some(Self::Bits16),
            18 => Some(Self::Bits18),
            20 => Some(Self::Bits20),
            24 => Some(Self::Bits24),
            32 => Some(Self::Bits32),
            _ => None,
        }
    }

    /// Word-length field of SDP_IN / SDP_OUT (bits 4:2)
    #[inline]
    pub fn sdp_bits(self) -> u8 {
        let code = match self {
            Self::Bits16 => 3,
            Self::Bits18 => 2,
            Self::Bits20 => 1,
            Self::Bits24 => 0,
            Self::Bits32 => 4,
        };
        code << 2
    }
}

/// Microphone PGA gain
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicGain {
    Gain0dB = 0,
    Gain6dB = 1,
    Gain12dB = 2,
    Gain18dB = 3,
    Gain24dB = 4,
    Gain30dB = 5,
    Gain36dB = 6,
    Gain42dB = 7,
}

/// Volume ramp rate, in LRCK periods per 0.25 dB step
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    Off = 0,
    Lrck4 = 1,
    Lrck8 = 2,
    Lrck16 = 3,
    Lrck32 = 4,
    Lrck64 = 5,
    Lrck128 = 6,
    Lrck256 = 7,
    Lrck512 = 8,
    Lrck1024 = 9,
    Lrck2048 = 10,
    Lrck4096 = 11,
    Lrck8192 = 12,
    Lrck16384 = 13,
    Lrck32768 = 14,
    Lrck65536 = 15,
}

/// Driver-side mirror of the codec registers.
///
/// There is no read-back verification: this is what the driver last wrote
/// (or will write at bring-up, for values set before initialization).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecState {
    /// DAC volume (0-100%)
    pub volume: u8,
    pub muted: bool,
    pub mic_gain: MicGain,
    pub resolution_in: Resolution,
    pub resolution_out: Resolution,
    /// Sample rate of the active clock profile, 0 before bring-up
    pub sample_rate_hz: u32,
    pub initialized: bool,
}

/// Map 0-100% to the 8-bit DAC volume register.
#[inline]
pub fn volume_to_reg(volume: u8) -> u8 {
    let volume = volume.min(100) as u16;
    if volume == 0 {
        0
    } else {
        (volume * 256 / 100 - 1) as u8
    }
}

/// Inverse of [`volume_to_reg`] (approximate: the forward map is lossy).
#[inline]
pub fn reg_to_volume(reg: u8) -> u8 {
    if reg == 0 {
        0
    } else {
        (reg as u16 * 100 / 256 + 1) as u8
    }
}

/// ES8311 codec register sequencer
pub struct Es8311 {
    state: CodecState,
}

impl Es8311 {
    /// Create driver state from configuration. Nothing is written yet.
    pub fn new(config: &AudioConfig) -> Self {
        Self {
            state: CodecState {
                volume: config.volume.min(100),
                muted: false,
                mic_gain: config.mic_gain,
                resolution_in: config.resolution_in,
                resolution_out: config.resolution_out,
                sample_rate_hz: 0,
                initialized: false,
            },
        }
    }

    /// Bring the codec from power-on reset to streaming-ready.
    ///
    /// Sequence: reset, clock, format, analog power-up, microphone, then
    /// volume / mute / mic gain from the current state. Every step ends with
    /// a settling delay.
    ///
    /// The clock profile is resolved before the first write, so an
    /// unsupported pair leaves the chip untouched. A bus error aborts the
    /// sequence where it happened; there is no retry and no rollback, the
    /// caller restarts from scratch with a fresh driver.
    ///
    /// Precondition: not already initialized. A second call is a caller bug
    /// (debug assertion), not a re-initialization.
    pub fn initialize<I2C: I2c, D: DelayNs>(
        &mut self,
        i2c: &mut I2C,
        delay: &mut D,
        mclk_hz: u32,
        sample_rate_hz: u32,
        settle: &SettleDelays,
    ) -> Result<(), AudioError> {
        debug_assert!(
            !self.state.initialized,
            "ES8311 initialized twice without teardown"
        );

        let profile = coeff::resolve(mclk_hz, sample_rate_hz).map_err(|e| {
            audio_error!(
                "ES8311: unable to configure {} Hz with {} Hz MCLK",
                sample_rate_hz,
                mclk_hz
            );
            e
        })?;

        self.reset(i2c, delay, settle.reset_ms)?;
        delay.delay_ms(settle.step_ms);

        self.configure_clock(i2c, profile)?;
        delay.delay_ms(settle.step_ms);

        self.configure_format(i2c)?;
        delay.delay_ms(settle.step_ms);

        self.power_up_analog(i2c)?;
        delay.delay_ms(settle.power_up_ms);

        self.configure_microphone(i2c)?;
        delay.delay_ms(settle.step_ms);

        self.write_reg(i2c, regs::DAC_VOL, volume_to_reg(self.state.volume))?;
        delay.delay_ms(settle.step_ms);

        self.write_mute(i2c, self.state.muted)?;
        delay.delay_ms(settle.step_ms);

        self.write_reg(i2c, regs::ADC_PGA_GAIN, self.state.mic_gain as u8)?;
        delay.delay_ms(settle.step_ms);

        self.state.sample_rate_hz = sample_rate_hz;
        self.state.initialized = true;

        audio_info!(
            "ES8311 ready: {} Hz, MCLK {} Hz, vol {}%",
            sample_rate_hz,
            mclk_hz,
            self.state.volume
        );
        Ok(())
    }

    fn reset<I2C: I2c, D: DelayNs>(
        &self,
        i2c: &mut I2C,
        delay: &mut D,
        hold_ms: u32,
    ) -> Result<(), AudioError> {
        self.write_reg(i2c, regs::RESET, 0x1F)?;
        delay.delay_ms(hold_ms);
        self.write_reg(i2c, regs::RESET, 0x00)?;
        // Power on, slave state machine start
        self.write_reg(i2c, regs::RESET, 0x80)
    }

    fn configure_clock<I2C: I2c>(
        &self,
        i2c: &mut I2C,
        profile: &ClockProfile,
    ) -> Result<(), AudioError> {
        // MCLK from pin, not inverted, all clocks on
        self.write_reg(i2c, regs::CLK_MANAGER1, 0x3F)?;

        // SCLK not inverted
        self.modify_reg(i2c, regs::CLK_MANAGER6, |r| (r & !(1 << 5)) | 0x03)?;

        self.modify_reg(i2c, regs::CLK_MANAGER2, |r| profile.reg02(r))?;
        self.write_reg(i2c, regs::CLK_MANAGER3, profile.reg03())?;
        self.write_reg(i2c, regs::CLK_MANAGER4, profile.reg04())?;
        self.write_reg(i2c, regs::CLK_MANAGER5, profile.reg05())?;
        self.modify_reg(i2c, regs::CLK_MANAGER6, |r| profile.reg06(r))?;
        self.modify_reg(i2c, regs::CLK_MANAGER7, |r| profile.reg07(r))?;
        self.write_reg(i2c, regs::CLK_MANAGER8, profile.reg08())
    }

    fn configure_format<I2C: I2c>(&self, i2c: &mut I2C) -> Result<(), AudioError> {
        // Master mode, standard I2S framing
        self.modify_reg(i2c, regs::RESET, |r| r | 0x40)?;
        self.write_reg(i2c, regs::SDP_IN, self.state.resolution_in.sdp_bits())?;
        self.write_reg(i2c, regs::SDP_OUT, self.state.resolution_out.sdp_bits())
    }

    fn power_up_analog<I2C: I2c>(&self, i2c: &mut I2C) -> Result<(), AudioError> {
        self.write_reg(i2c, regs::SYSTEM_PWR, 0x01)?;
        self.write_reg(i2c, regs::SYSTEM_PDN, 0x02)?;
        self.write_reg(i2c, regs::SYSTEM_DAC_PWR, 0x00)?;
        self.write_reg(i2c, regs::SYSTEM_HP_DRIVE, 0x10)?;
        self.write_reg(i2c, regs::ADC_EQ, 0x6A)?;
        self.write_reg(i2c, regs::DAC_RAMP, 0x08)
    }

    /// ADC path must be configured even for playback-only use.
    fn configure_microphone<I2C: I2c>(&self, i2c: &mut I2C) -> Result<(), AudioError> {
        // Analog mic, PGA enabled
        self.write_reg(i2c, regs::ADC_VOL, 0xFF)?;
        self.write_reg(i2c, regs::SYSTEM_MIC, 0x1A)
    }

    /// Set DAC volume (0-100%), clamping larger values to 100.
    ///
    /// Before initialization the level is only recorded and applied during
    /// bring-up. Returns the clamped level.
    pub fn set_volume<I2C: I2c>(&mut self, i2c: &mut I2C, volume: u8) -> Result<u8, AudioError> {
        let volume = volume.min(100);
        if self.state.initialized {
            let reg = volume_to_reg(volume);
            self.write_reg(i2c, regs::DAC_VOL, reg)?;
            audio_debug!("volume {}% -> {:#04x}", volume, reg);
        }
        self.state.volume = volume;
        Ok(volume)
    }

    /// Read the DAC volume back from the chip.
    pub fn read_volume<I2C: I2c>(&self, i2c: &mut I2C) -> Result<u8, AudioError> {
        Ok(reg_to_volume(self.read_reg(i2c, regs::DAC_VOL)?))
    }

    /// Soft-mute the DAC, preserving the other DAC_MUTE bits.
    ///
    /// Before initialization the flag is only recorded.
    pub fn set_mute<I2C: I2c>(&mut self, i2c: &mut I2C, mute: bool) -> Result<(), AudioError> {
        if self.state.initialized {
            self.write_mute(i2c, mute)?;
        }
        self.state.muted = mute;
        Ok(())
    }

    fn write_mute<I2C: I2c>(&self, i2c: &mut I2C, mute: bool) -> Result<(), AudioError> {
        self.modify_reg(i2c, regs::DAC_MUTE, |r| {
            if mute {
                r | DAC_MUTE_BITS
            } else {
                r & !DAC_MUTE_BITS
            }
        })?;
        Ok(())
    }

    /// Set microphone PGA gain.
    ///
    /// Before initialization the gain is only recorded.
    pub fn set_mic_gain<I2C: I2c>(&mut self, i2c: &mut I2C, gain: MicGain) -> Result<(), AudioError> {
        if self.state.initialized {
            self.write_reg(i2c, regs::ADC_PGA_GAIN, gain as u8)?;
        }
        self.state.mic_gain = gain;
        Ok(())
    }

    /// DAC volume ramp rate (high nibble of DAC_RAMP).
    pub fn set_dac_fade<I2C: I2c>(&self, i2c: &mut I2C, fade: Fade) -> Result<(), AudioError> {
        self.modify_reg(i2c, regs::DAC_RAMP, |r| (r & 0x0F) | ((fade as u8) << 4))?;
        Ok(())
    }

    /// ADC volume ramp rate (high nibble of ADC_RAMP).
    pub fn set_mic_fade<I2C: I2c>(&self, i2c: &mut I2C, fade: Fade) -> Result<(), AudioError> {
        self.modify_reg(i2c, regs::ADC_RAMP, |r| (r & 0x0F) | ((fade as u8) << 4))?;
        Ok(())
    }

    /// Chip ID: CHIP_ID2 in the high byte, CHIP_ID1 in the low byte.
    pub fn chip_id<I2C: I2c>(&self, i2c: &mut I2C) -> Result<u16, AudioError> {
        let lsb = self.read_reg(i2c, regs::CHIP_ID1)?;
        let msb = self.read_reg(i2c, regs::CHIP_ID2)?;
        Ok(((msb as u16) << 8) | lsb as u16)
    }

    /// Read registers 0x00..0x49 into `out` (index = register address).
    pub fn dump_registers<I2C: I2c>(
        &self,
        i2c: &mut I2C,
        out: &mut [u8; REG_DUMP_LEN],
    ) -> Result<(), AudioError> {
        for (reg, slot) in out.iter_mut().enumerate() {
            *slot = self.read_reg(i2c, reg as u8)?;
        }
        Ok(())
    }

    /// Current driver-side register mirror
    #[inline]
    pub fn state(&self) -> &CodecState {
        &self.state
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    /// Get current volume
    #[inline]
    pub fn volume(&self) -> u8 {
        self.state.volume
    }

    /// Check if muted
    #[inline]
    pub fn is_muted(&self) -> bool {
        self.state.muted
    }

    fn write_reg<I2C: I2c>(&self, i2c: &mut I2C, reg: u8, val: u8) -> Result<(), AudioError> {
        i2c.write(ES8311_ADDR, &[reg, val])
            .map_err(|_| AudioError::Io)
    }

    fn read_reg<I2C: I2c>(&self, i2c: &mut I2C, reg: u8) -> Result<u8, AudioError> {
        let mut buf = [0u8; 1];
        i2c.write_read(ES8311_ADDR, &[reg], &mut buf)
            .map_err(|_| AudioError::Io)?;
        Ok(buf[0])
    }

    fn modify_reg<I2C: I2c>(
        &self,
        i2c: &mut I2C,
        reg: u8,
        f: impl FnOnce(u8) -> u8,
    ) -> Result<u8, AudioError> {
        let val = f(self.read_reg(i2c, reg)?);
        self.write_reg(i2c, reg, val)?;
        Ok(val)
    }
}
