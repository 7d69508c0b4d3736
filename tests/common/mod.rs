//! Host-side mocks shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, ErrorType, I2c, Operation};

use watch_game_audio::alarm::AlarmOutput;
use watch_game_audio::hal::audio::SampleSink;
use watch_game_audio::rtc::{RtcTime, TimeSource};

// ── Mock I2C with per-device register files ─────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl i2c::Error for MockError {
    fn kind(&self) -> i2c::ErrorKind {
        i2c::ErrorKind::Other
    }
}

/// Register-file I2C bus.
///
/// `write(addr, [reg, v0, v1, ..])` stores v0 at reg, v1 at reg+1 and so
/// on; `write_read(addr, [reg], buf)` reads back with the same
/// auto-increment. Every stored byte is logged as (device, reg, value).
#[derive(Default)]
pub struct MockI2c {
    regs: HashMap<u8, [u8; 256]>,
    /// Write log in chronological order
    pub writes: Vec<(u8, u8, u8)>,
    /// Transfers before the bus starts failing
    fail_after: Option<usize>,
    transfers: usize,
}

impl MockI2c {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bus that fails every transfer after the first `n`.
    pub fn failing_after(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::default()
        }
    }

    pub fn reg(&self, dev: u8, reg: u8) -> u8 {
        self.regs.get(&dev).map_or(0, |r| r[reg as usize])
    }

    /// Preset a register without logging it.
    pub fn set_reg(&mut self, dev: u8, reg: u8, val: u8) {
        self.regs.entry(dev).or_insert([0; 256])[reg as usize] = val;
    }

    /// Writes to one device, as (reg, value)
    pub fn writes_to(&self, dev: u8) -> Vec<(u8, u8)> {
        self.writes
            .iter()
            .filter(|w| w.0 == dev)
            .map(|w| (w.1, w.2))
            .collect()
    }

    pub fn clear_log(&mut self) {
        self.writes.clear();
    }

    fn begin(&mut self) -> Result<(), MockError> {
        self.transfers += 1;
        match self.fail_after {
            Some(n) if self.transfers > n => Err(MockError),
            _ => Ok(()),
        }
    }
}

impl ErrorType for MockI2c {
    type Error = MockError;
}

impl I2c for MockI2c {
    fn read(&mut self, _addr: u8, _buf: &mut [u8]) -> Result<(), Self::Error> {
        self.begin()
    }

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.begin()?;
        if let Some((&start, data)) = bytes.split_first() {
            for (i, &val) in data.iter().enumerate() {
                let reg = start.wrapping_add(i as u8);
                self.set_reg(addr, reg, val);
                self.writes.push((addr, reg, val));
            }
        }
        Ok(())
    }

    fn write_read(&mut self, addr: u8, wr: &[u8], rd: &mut [u8]) -> Result<(), Self::Error> {
        self.begin()?;
        let start = wr.first().copied().unwrap_or(0);
        for (i, slot) in rd.iter_mut().enumerate() {
            *slot = self.reg(addr, start.wrapping_add(i as u8));
        }
        Ok(())
    }

    fn transaction(
        &mut self,
        _addr: u8,
        _operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.begin()
    }
}

// ── Mock delay (records, never sleeps) ──────────────────────────────

#[derive(Default)]
pub struct MockDelay {
    /// Every delay_ms call, in order
    pub ms: Vec<u32>,
}

impl MockDelay {
    pub fn total_ms(&self) -> u64 {
        self.ms.iter().map(|&m| m as u64).sum()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.ms.push(ms);
    }
}

// ── Recording sample sink ───────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub words: Vec<u32>,
}

impl SampleSink for RecordingSink {
    fn put_blocking(&mut self, word: u32) {
        self.words.push(word);
    }
}

// ── Alarm collaborators ─────────────────────────────────────────────

/// Alarm output that only counts cycles.
pub struct CountingOutput {
    pub ready: bool,
    /// Pause requested by each cycle
    pub cycles: Vec<u32>,
}

impl CountingOutput {
    pub fn ready() -> Self {
        Self {
            ready: true,
            cycles: Vec::new(),
        }
    }
}

impl AlarmOutput for CountingOutput {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn ring_cycle(&mut self, pause_ms: u32) {
        self.cycles.push(pause_ms);
    }
}

/// Time source returning a fixed time, or failing.
pub struct FixedClock(pub Option<RtcTime>);

impl TimeSource for FixedClock {
    type Error = &'static str;

    fn now(&mut self) -> Result<RtcTime, Self::Error> {
        self.0.ok_or("clock unavailable")
    }
}

pub fn hm(hour: u8, minute: u8) -> RtcTime {
    RtcTime::new(hour, minute).unwrap()
}
