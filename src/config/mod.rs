//! Module: config
//!
//! Purpose: Build-time defaults for codec bring-up, tone synthesis and the
//! alarm timer.
//!
//! Architecture:
//! - Plain `Copy` structs with `Default`, owned by whoever consumes them
//! - No persistence: every restart starts from these values
//! - Defaults match the watch board: 6.144 MHz MCLK = 256 x 24 kHz

use crate::hal::es8311::{MicGain, Resolution};

/// Settling delays between bring-up steps.
///
/// Register writes only take effect after a minimum bus-idle interval,
/// so each step of the codec sequence ends with one of these waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleDelays {
    /// Hold time after asserting reset
    pub reset_ms: u32,
    /// Gap after clock, format, microphone, volume, mute and gain steps
    pub step_ms: u32,
    /// Wait for the analog references to ramp after power-up
    pub power_up_ms: u32,
}

impl Default for SettleDelays {
    fn default() -> Self {
        Self {
            reset_ms: 20,
            step_ms: 50,
            power_up_ms: 100,
        }
    }
}

/// Audio configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioConfig {
    /// Master clock fed to the codec MCLK pin
    pub mclk_hz: u32,
    /// Output sample rate
    pub sample_rate_hz: u32,
    /// Serial data in (ADC) word length
    pub resolution_in: Resolution,
    /// Serial data out (DAC) word length
    pub resolution_out: Resolution,
    /// Initial DAC volume (0-100%)
    pub volume: u8,
    /// Microphone PGA gain applied at bring-up
    pub mic_gain: MicGain,
    /// Peak amplitude of generated tones, kept below i16::MAX to avoid clipping
    pub amplitude: i16,
    pub settle: SettleDelays,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            mclk_hz: 24_000 * 256,
            sample_rate_hz: 24_000,
            resolution_in: Resolution::Bits16,
            resolution_out: Resolution::Bits16,
            volume: 70,
            mic_gain: MicGain::Gain18dB,
            amplitude: 16_000,
            settle: SettleDelays::default(),
        }
    }
}

/// Alarm timer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmConfig {
    /// Ringing stops by itself after this long
    pub ring_timeout_ms: u32,
    /// Pause after each alarm effect cycle
    pub cycle_pause_ms: u32,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            ring_timeout_ms: 60_000,
            cycle_pause_ms: 1_000,
        }
    }
}
