//! PCF85063 real-time clock
//!
//! Time registers 0x04..0x0A, BCD encoded. Only the calendar is
//! touched; alarm, timer and offset registers stay at their reset values.

use embedded_hal::i2c::I2c;

use crate::rtc::{RtcTime, TimeSource};

/// PCF85063 I2C address (fixed)
pub const PCF85063_ADDR: u8 = 0x51;

/// First time register (seconds)
const REG_SECONDS: u8 = 0x04;

/// Masks for the reserved / oscillator-stop bits of each time register
const MASKS: [u8; 7] = [0x7F, 0x7F, 0x3F, 0x3F, 0x07, 0x1F, 0xFF];

/// RTC error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcError {
    /// R01: I2C transfer failed
    Bus,
    /// R02: Registers hold an impossible date or time
    InvalidTime,
}

impl RtcError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Bus => "R01",
            Self::InvalidTime => "R02",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Bus => "RTC bus error",
            Self::InvalidTime => "RTC time invalid",
        }
    }
}

impl core::fmt::Display for RtcError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// Calendar date and time, 2000-2099.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtcDateTime {
    pub year: u16,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// 0-6, 0 = Sunday
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl RtcDateTime {
    /// Field ranges only; day-of-month is not checked against the month.
    pub fn is_valid(&self) -> bool {
        (2000..=2099).contains(&self.year)
            && (1..=12).contains(&self.month)
            && (1..=31).contains(&self.day)
            && self.weekday < 7
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }

    /// Hour and minute, if in range.
    pub fn time(&self) -> Option<RtcTime> {
        RtcTime::new(self.hour, self.minute)
    }
}

#[inline]
pub fn bcd2dec(val: u8) -> u8 {
    (val >> 4) * 10 + (val & 0x0F)
}

#[inline]
pub fn dec2bcd(val: u8) -> u8 {
    ((val / 10) << 4) | (val % 10)
}

/// PCF85063 driver. Holds no bus; the bus is passed per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pcf85063;

impl Pcf85063 {
    pub const fn new() -> Self {
        Self
    }

    /// Burst-read the seven time registers.
    pub fn datetime<I2C: I2c>(&self, i2c: &mut I2C) -> Result<RtcDateTime, RtcError> {
        let mut raw = [0u8; 7];
        i2c.write_read(PCF85063_ADDR, &[REG_SECONDS], &mut raw)
            .map_err(|_| RtcError::Bus)?;

        for (byte, mask) in raw.iter_mut().zip(MASKS) {
            *byte = bcd2dec(*byte & mask);
        }

        Ok(RtcDateTime {
            second: raw[0],
            minute: raw[1],
            hour: raw[2],
            day: raw[3],
            weekday: raw[4],
            month: raw[5],
            year: 2000 + raw[6] as u16,
        })
    }

    /// Write all seven time registers in one transfer.
    pub fn set_datetime<I2C: I2c>(&self, i2c: &mut I2C, dt: &RtcDateTime) -> Result<(), RtcError> {
        if !dt.is_valid() {
            return Err(RtcError::InvalidTime);
        }
        let frame = [
            REG_SECONDS,
            dec2bcd(dt.second),
            dec2bcd(dt.minute),
            dec2bcd(dt.hour),
            dec2bcd(dt.day),
            dec2bcd(dt.weekday),
            dec2bcd(dt.month),
            dec2bcd((dt.year - 2000) as u8),
        ];
        i2c.write(PCF85063_ADDR, &frame).map_err(|_| RtcError::Bus)
    }

    /// Pair the driver with a bus for use as a [`TimeSource`].
    pub fn bind<'a, I2C: I2c>(&'a self, i2c: &'a mut I2C) -> BoundRtc<'a, I2C> {
        BoundRtc { rtc: self, i2c }
    }
}

/// PCF85063 with a borrowed bus
pub struct BoundRtc<'a, I2C> {
    rtc: &'a Pcf85063,
    i2c: &'a mut I2C,
}

impl<I2C: I2c> TimeSource for BoundRtc<'_, I2C> {
    type Error = RtcError;

    fn now(&mut self) -> Result<RtcTime, RtcError> {
        self.rtc
            .datetime(self.i2c)?
            .time()
            .ok_or(RtcError::InvalidTime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcd() {
        assert_eq!(bcd2dec(0x59), 59);
        assert_eq!(bcd2dec(0x00), 0);
        assert_eq!(dec2bcd(23), 0x23);
        for v in 0..100 {
            assert_eq!(bcd2dec(dec2bcd(v)), v);
        }
    }

    #[test]
    fn test_is_valid() {
        let dt = RtcDateTime {
            year: 2025,
            month: 3,
            day: 14,
            weekday: 5,
            hour: 7,
            minute: 0,
            second: 0,
        };
        assert!(dt.is_valid());
        assert!(!RtcDateTime { month: 13, ..dt }.is_valid());
        assert!(!RtcDateTime { year: 1999, ..dt }.is_valid());
        assert!(!RtcDateTime { hour: 24, ..dt }.is_valid());
    }
}
