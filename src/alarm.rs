//! Alarm timer state machine
//!
//! Rings when the wall-clock time equals the target, then keeps ringing
//! for a fixed window unless stopped. Ringing plays one alarm cycle per
//! check, so the caller's check cadence sets the cycle rate.
//!
//! ```text
//!            set_alarm(.., true)         time == target
//!   Idle ─────────────────────▶ Armed ───────────────────▶ Ringing
//!    ▲                            ▲                            │
//!    │  set_alarm(.., false)      │  stop() / timeout          │
//!    └────────────────────────────┴────────────────────────────┘
//! ```

use crate::config::AlarmConfig;
use crate::rtc::{RtcTime, TimeSource};
use crate::{audio_info, audio_warn};

/// Target until the first `set_alarm`
const DEFAULT_TARGET: RtcTime = match RtcTime::new(7, 0) {
    Some(t) => t,
    None => panic!("invalid default alarm time"),
};

/// Alarm phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmPhase {
    /// Disabled
    Idle,
    /// Enabled, waiting for the target time
    Armed,
    /// Target reached, playing alarm cycles
    Ringing,
}

/// Sound output driven by the alarm.
pub trait AlarmOutput {
    /// Output initialized; checks are no-ops otherwise.
    fn is_ready(&self) -> bool;

    /// Play one alarm cycle followed by a `pause_ms` pause, blocking.
    fn ring_cycle(&mut self, pause_ms: u32);
}

/// Alarm timer
pub struct AlarmTimer {
    config: AlarmConfig,
    target: RtcTime,
    enabled: bool,
    ringing: bool,
    /// Caller timestamp when ringing started (milliseconds)
    ring_start_ms: u64,
}

impl AlarmTimer {
    /// Disabled alarm, target 07:00.
    pub fn new(config: AlarmConfig) -> Self {
        Self {
            config,
            target: DEFAULT_TARGET,
            enabled: false,
            ringing: false,
            ring_start_ms: 0,
        }
    }

    /// Set target time and enable flag, silencing any ringing alarm.
    ///
    /// Returns `false` and changes nothing if `hour`/`minute` is out of range.
    pub fn set_alarm(&mut self, hour: u8, minute: u8, enabled: bool) -> bool {
        let Some(target) = RtcTime::new(hour, minute) else {
            audio_warn!("alarm {}:{} rejected", hour, minute);
            return false;
        };
        self.target = target;
        self.enabled = enabled;
        self.ringing = false;
        audio_info!("alarm {} {}", target, if enabled { "on" } else { "off" });
        true
    }

    /// Run one alarm tick against the current wall-clock time.
    ///
    /// # Arguments
    /// * `now` - Current wall-clock time
    /// * `timestamp_ms` - Monotonic time in milliseconds
    /// * `out` - Where alarm cycles are played
    ///
    /// While ringing and inside the ring window, this blocks for one full
    /// alarm cycle plus the cycle pause.
    pub fn check<O: AlarmOutput + ?Sized>(
        &mut self,
        now: RtcTime,
        timestamp_ms: u64,
        out: &mut O,
    ) -> AlarmPhase {
        if !self.enabled || !out.is_ready() {
            return self.phase();
        }

        if !self.ringing && now == self.target {
            self.ringing = true;
            self.ring_start_ms = timestamp_ms;
            audio_info!("alarm ringing at {}", now);
        }

        self.ring_tick(timestamp_ms, out);
        self.phase()
    }

    /// Read the time from `source` and run [`check`](Self::check).
    ///
    /// A failed read is logged and cannot start ringing. A ringing alarm
    /// still plays its cycle and times out on `timestamp_ms` alone.
    pub fn poll<T: TimeSource, O: AlarmOutput + ?Sized>(
        &mut self,
        mut source: T,
        timestamp_ms: u64,
        out: &mut O,
    ) -> AlarmPhase {
        match source.now() {
            Ok(now) => self.check(now, timestamp_ms, out),
            Err(e) => {
                audio_warn!("alarm: time read failed: {:?}", e);
                if self.enabled && out.is_ready() {
                    self.ring_tick(timestamp_ms, out);
                }
                self.phase()
            }
        }
    }

    /// One ring cycle inside the window, or end ringing past it.
    fn ring_tick<O: AlarmOutput + ?Sized>(&mut self, timestamp_ms: u64, out: &mut O) {
        if !self.ringing {
            return;
        }
        let elapsed = timestamp_ms.saturating_sub(self.ring_start_ms);
        if elapsed < self.config.ring_timeout_ms as u64 {
            out.ring_cycle(self.config.cycle_pause_ms);
        } else {
            self.ringing = false;
            audio_info!("alarm timed out after {} ms", elapsed);
        }
    }

    /// Silence the alarm. The target and enable flag are kept.
    pub fn stop(&mut self) {
        if self.ringing {
            audio_info!("alarm stopped");
        }
        self.ringing = false;
    }

    #[inline]
    pub fn is_ringing(&self) -> bool {
        self.ringing
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn target(&self) -> RtcTime {
        self.target
    }

    pub fn phase(&self) -> AlarmPhase {
        if self.ringing {
            AlarmPhase::Ringing
        } else if self.enabled {
            AlarmPhase::Armed
        } else {
            AlarmPhase::Idle
        }
    }
}
