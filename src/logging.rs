//! Non-blocking logging for the audio engine.
//!
//! # Architecture
//!
//! ```text
//! Audio path             LogStream            Log drain
//! ──────────             ─────────            ─────────
//!
//! audio_info!() ──────▶ [L0][L1][L2] ──────▶ UART / host writer
//! no alloc                ring buffer         blocking ok
//! never blocks            drops when full     main loop
//! ```
//!
//! Tone playback already blocks on the I2S FIFO, so a log call must never
//! add its own wait on top: pushing formats into a fixed buffer and either
//! lands in the ring or is counted as dropped.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 96;

/// Log buffer size (number of entries).
pub const LOG_BUFFER_SIZE: usize = 64;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Timestamp in microseconds.
    pub timestamp_us: i64,
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        timestamp_us: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message text, cut before any UTF-8 sequence split by truncation.
    pub fn text(&self) -> &str {
        utf8_prefix(&self.msg[..self.len as usize])
    }
}

/// Longest prefix of `bytes` that is valid UTF-8.
pub fn utf8_prefix(bytes: &[u8]) -> &str {
    match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// One ring slot: the entry plus its published flag.
struct Slot {
    entry: UnsafeCell<LogEntry>,
    /// Set by the producer after the entry is written, cleared by the drain
    ready: AtomicBool,
}

impl Slot {
    #[allow(clippy::declare_interior_mutable_const)]
    const EMPTY: Self = Self {
        entry: UnsafeCell::new(LogEntry::EMPTY),
        ready: AtomicBool::new(false),
    };
}

/// Fixed-size log ring (multiple producers, single drain).
///
/// Producers claim a slot by advancing `write_idx` with a CAS, only when the
/// slot is free, then publish it through the slot's `ready` flag. The drain
/// side is serialized by the `draining` flag; a second concurrent drain
/// returns `None`.
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    slots: [Slot; N],
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    draining: AtomicBool,
    dropped: AtomicU32,
}

// SAFETY: A slot's entry is written only by the producer whose CAS claimed
// its index, and only after read_idx (Acquire) shows the drain has finished
// with it. The drain reads an entry only after observing `ready` (Acquire)
// and holds the `draining` flag, so there is never more than one reader.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    /// Create a new empty log stream.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");

        Self {
            slots: [Slot::EMPTY; N],
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            draining: AtomicBool::new(false),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a log entry, never blocks.
    ///
    /// Returns `true` if message was queued, `false` if dropped (ring full).
    /// Messages longer than [`MAX_MSG_LEN`] are truncated.
    ///
    /// # Thread Safety
    ///
    /// Safe for multiple concurrent producers.
    #[inline]
    pub fn push(&self, timestamp_us: i64, level: LogLevel, msg: &[u8]) -> bool {
        let mut write = self.write_idx.load(Ordering::Relaxed);
        loop {
            let read = self.read_idx.load(Ordering::Acquire);
            let used = write.wrapping_sub(read);
            if used > u32::MAX / 2 {
                // Drain moved past a stale write index
                write = self.write_idx.load(Ordering::Relaxed);
                continue;
            }
            if used >= N as u32 {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            }
            match self.write_idx.compare_exchange_weak(
                write,
                write.wrapping_add(1),
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(current) => write = current,
            }
        }

        let slot = &self.slots[(write as usize) & Self::MASK];

        // SAFETY: the CAS above made this producer the sole owner of the
        // slot until `ready` is set; the drain released it before advancing
        // read_idx.
        unsafe {
            let entry = &mut *slot.entry.get();
            entry.timestamp_us = timestamp_us;
            entry.level = level;
            entry.len = msg.len().min(MAX_MSG_LEN) as u8;
            entry.msg[..entry.len as usize].copy_from_slice(&msg[..entry.len as usize]);
        }

        slot.ready.store(true, Ordering::Release);
        true
    }

    /// Drain next log entry.
    ///
    /// Returns `None` if no entry is published yet, or if another drain is
    /// running.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        if self.draining.swap(true, Ordering::Acquire) {
            return None;
        }

        let read = self.read_idx.load(Ordering::Relaxed);
        let slot = &self.slots[(read as usize) & Self::MASK];

        let entry = if slot.ready.load(Ordering::Acquire) {
            // SAFETY: `ready` is set, so the producer has finished writing,
            // and `draining` makes this the only reader.
            let entry = unsafe { *slot.entry.get() };
            slot.ready.store(false, Ordering::Relaxed);
            self.read_idx.store(read.wrapping_add(1), Ordering::Release);
            Some(entry)
        } else {
            None
        };

        self.draining.store(false, Ordering::Release);
        entry
    }

    /// Get count of dropped messages.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    /// Number of claimed slots not yet drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Acquire);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Microseconds since boot, used to stamp log entries.
#[cfg(feature = "esp32s3")]
#[inline]
pub fn timestamp_us() -> i64 {
    // SAFETY: esp_timer_get_time has no preconditions once the system is up
    unsafe { esp_idf_svc::sys::esp_timer_get_time() }
}

/// Host builds have no system timer; entries are stamped with 0.
#[cfg(not(feature = "esp32s3"))]
#[inline]
pub fn timestamp_us() -> i64 {
    0
}

/// Format a message into a buffer, truncating at the buffer end.
///
/// Returns the number of bytes written.
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    let mut writer = SliceWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// `core::fmt::Write` over a byte slice; excess output is discarded on a
/// char boundary.
pub(crate) struct SliceWriter<'a> {
    pub(crate) buf: &'a mut [u8],
    pub(crate) pos: usize,
}

impl core::fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let mut to_write = s.len().min(self.buf.len() - self.pos);
        // Never split a UTF-8 sequence
        while !s.is_char_boundary(to_write) {
            to_write -= 1;
        }
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&s.as_bytes()[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}

/// Log into an explicit stream with an explicit timestamp.
///
/// # Example
///
/// ```ignore
/// rt_log!(LogLevel::Info, AUDIO_LOG_STREAM, timestamp, "tone {} Hz", freq);
/// ```
#[macro_export]
macro_rules! rt_log {
    ($level:expr, $stream:expr, $timestamp:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $stream.push($timestamp, $level, &buf[..len]);
    }};
}

#[macro_export]
macro_rules! rt_info {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Info, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! rt_warn {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Warn, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! rt_error {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Error, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! rt_debug {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Debug, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! rt_trace {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Trace, $stream, $timestamp, $($arg)*)
    };
}
