//! Audio error types
//!
//! Only two failures ever reach a caller. Out-of-range volumes, durations
//! and alarm times are absorbed by clamping or turned into no-ops.

/// Audio error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioError {
    /// A01: No clock profile for this (MCLK, sample rate) pair
    UnsupportedRate { mclk_hz: u32, sample_rate_hz: u32 },
    /// A02: Control bus transfer failed
    Io,
}

impl AudioError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedRate { .. } => "A01",
            Self::Io => "A02",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnsupportedRate { .. } => "unsupported sample rate",
            Self::Io => "bus I/O error",
        }
    }
}

impl core::fmt::Display for AudioError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedRate { mclk_hz, sample_rate_hz } => write!(
                f,
                "{}: {} ({} Hz with {} Hz MCLK)",
                self.code(),
                self.message(),
                sample_rate_hz,
                mclk_hz
            ),
            Self::Io => write!(f, "{}: {}", self.code(), self.message()),
        }
    }
}
