//! Hardware Abstraction Layer for the watch audio engine.
//!
//! Codec and RTC drivers over `embedded-hal` I2C, plus the sample output
//! seam. Platform bindings live behind the `esp32s3` feature.

pub mod audio;
pub mod coeff;
pub mod es8311;
pub mod pcf85063;

#[cfg(feature = "esp32s3")]
pub mod i2s_esp;

pub use audio::{SampleSink, SampleStreamer};
pub use coeff::{ClockProfile, CLOCK_PROFILES};
pub use es8311::{CodecState, Es8311, Fade, MicGain, Resolution, ES8311_ADDR};
pub use pcf85063::{Pcf85063, RtcDateTime, RtcError, PCF85063_ADDR};
