//! Pure-tone sample generator
//!
//! Produces sample words lazily, one per `next()`, so a tone is never
//! materialized as a buffer: the streamer pulls a word, blocks on the
//! transport, pulls the next.
//!
//! Sample i of a tone at frequency f and sample rate R:
//! `round(sin(2π · f · i / R) · amplitude)`, duplicated into both channels.

use core::f32::consts::PI;

use crate::hal::audio::pack_stereo;

/// One tone: frequency and duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneRequest {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

impl ToneRequest {
    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }
}

/// Number of samples in `duration_ms` at `sample_rate_hz` (truncated).
#[inline]
pub fn sample_count(sample_rate_hz: u32, duration_ms: u32) -> usize {
    (sample_rate_hz as u64 * duration_ms as u64 / 1000) as usize
}

/// Iterator over the packed stereo words of one tone.
#[derive(Debug, Clone)]
pub struct Tone {
    frequency_hz: u32,
    sample_rate_hz: u32,
    amplitude: f32,
    index: usize,
    total: usize,
}

impl Tone {
    /// Create a tone generator.
    ///
    /// Zero duration, zero frequency or zero sample rate give an empty tone.
    pub fn new(request: ToneRequest, sample_rate_hz: u32, amplitude: i16) -> Self {
        let total = if request.frequency_hz == 0 || sample_rate_hz == 0 {
            0
        } else {
            sample_count(sample_rate_hz, request.duration_ms)
        };

        Self {
            frequency_hz: request.frequency_hz,
            sample_rate_hz,
            amplitude: amplitude as f32,
            index: 0,
            total,
        }
    }

    /// Mono sample at index `i`.
    ///
    /// The phase is reduced modulo one period in integer arithmetic
    /// before going to float.
    #[inline]
    pub fn sample_at(&self, i: usize) -> i16 {
        let rate = self.sample_rate_hz as u64;
        if rate == 0 {
            return 0;
        }
        let cycle_pos = (self.frequency_hz as u64 * i as u64) % rate;
        let phase = 2.0 * PI * (cycle_pos as f32 / rate as f32);
        let value = libm::roundf(libm::sinf(phase) * self.amplitude);
        value.clamp(i16::MIN as f32, i16::MAX as f32) as i16
    }

    /// Samples not yet produced
    #[inline]
    pub fn remaining(&self) -> usize {
        self.total - self.index
    }
}

impl Iterator for Tone {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        if self.index >= self.total {
            return None;
        }
        let word = pack_stereo(self.sample_at(self.index));
        self.index += 1;
        Some(word)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for Tone {}
