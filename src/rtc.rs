//! Wall-clock time as seen by the alarm timer.

/// Hour and minute of the day, always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RtcTime {
    hour: u8,
    minute: u8,
}

impl RtcTime {
    /// `None` unless `hour < 24` and `minute < 60`.
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight
    #[inline]
    pub const fn minute_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

impl core::fmt::Display for RtcTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Source of the current wall-clock time.
pub trait TimeSource {
    type Error: core::fmt::Debug;

    fn now(&mut self) -> Result<RtcTime, Self::Error>;
}

impl<T: TimeSource + ?Sized> TimeSource for &mut T {
    type Error = T::Error;

    #[inline]
    fn now(&mut self) -> Result<RtcTime, Self::Error> {
        (**self).now()
    }
}
