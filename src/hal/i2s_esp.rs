//! ESP-IDF I2S transport for [`SampleSink`].
//!
//! Each word goes out as one 16-bit stereo frame, left channel first.

use esp_idf_svc::hal::delay::BLOCK;
use esp_idf_svc::hal::i2s::{I2sDriver, I2sTx};
use esp_idf_svc::sys::EspError;

use super::audio::{unpack_stereo, SampleSink};
use crate::audio_warn;

/// Blocking I2S TX sink
pub struct EspI2sSink<'d> {
    driver: I2sDriver<'d, I2sTx>,
    /// Failed frame writes since creation
    errors: u32,
}

impl<'d> EspI2sSink<'d> {
    /// Take an I2S TX driver and start the channel.
    pub fn new(mut driver: I2sDriver<'d, I2sTx>) -> Result<Self, EspError> {
        driver.tx_enable()?;
        Ok(Self { driver, errors: 0 })
    }

    #[inline]
    pub fn errors(&self) -> u32 {
        self.errors
    }
}

impl SampleSink for EspI2sSink<'_> {
    fn put_blocking(&mut self, word: u32) {
        let (left, right) = unpack_stereo(word);
        let mut frame = [0u8; 4];
        frame[..2].copy_from_slice(&left.to_le_bytes());
        frame[2..].copy_from_slice(&right.to_le_bytes());

        if let Err(e) = self.driver.write_all(&frame, BLOCK) {
            // First failure only
            if self.errors == 0 {
                audio_warn!("I2S write failed: {}", e);
            }
            self.errors = self.errors.saturating_add(1);
        }
    }
}
