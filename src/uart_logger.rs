//! Log drain: formats [`LogStream`] entries onto a text writer.
//!
//! On the board the writer is UART1 TX; on the host any
//! `core::fmt::Write` works.
//!
//! # Hardware Setup
//!
//! ```text
//! ESP32-S3 GPIO17 (TX) ──────▶ USB-UART RX
//!                               └─▶ PC Serial Monitor
//! ```

use core::fmt::Write;

use crate::logging::{utf8_prefix, LogEntry, LogStream, SliceWriter};

#[cfg(feature = "esp32s3")]
use esp_idf_svc::hal::{
    gpio,
    peripheral::Peripheral,
    uart::{self, UartTxDriver},
};

/// Formatted line buffer size
pub const LINE_BUF_LEN: usize = 160;

/// UART configuration for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartLoggerConfig {
    pub baud_rate: u32,
    pub tx_pin: u8,
}

impl Default for UartLoggerConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115200,
            tx_pin: 17,
        }
    }
}

/// Format log entry to bytes.
///
/// Format: `[timestamp_us] LEVEL: message\n`
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    let mut writer = SliceWriter { buf, pos: 0 };
    let _ = writeln!(
        writer,
        "[{:10}] {}: {}",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.text()
    );
    writer.pos
}

/// Drain every pending entry of `stream` into `out`.
///
/// Dropped entries since the last drain are reported as one warning line
/// after the backlog, then the drop counter is cleared. Returns the number
/// of entries written.
pub fn drain_to<const N: usize, W: Write>(stream: &LogStream<N>, out: &mut W) -> usize {
    let mut line = [0u8; LINE_BUF_LEN];
    let mut count = 0;

    while let Some(entry) = stream.drain() {
        let len = format_log_entry(&entry, &mut line);
        let _ = out.write_str(utf8_prefix(&line[..len]));
        count += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let _ = writeln!(out, "[WARN] Dropped: {} log entries", dropped);
        stream.reset_dropped();
    }

    count
}

/// Initialize UART1 TX-only for logging output.
#[cfg(feature = "esp32s3")]
pub fn init_uart_logger<'d>(
    uart: impl Peripheral<P = uart::UART1> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
    config: &UartLoggerConfig,
) -> Result<UartLogWriter<'d>, esp_idf_svc::sys::EspError> {
    let uart_config = uart::config::Config::default()
        .baudrate(esp_idf_svc::hal::units::Hertz(config.baud_rate));

    let driver = UartTxDriver::new(
        uart,
        tx_pin,
        Option::<gpio::AnyIOPin>::None, // CTS
        Option::<gpio::AnyIOPin>::None, // RTS
        &uart_config,
    )?;
    Ok(UartLogWriter { driver })
}

/// `core::fmt::Write` adapter over a UART TX driver.
#[cfg(feature = "esp32s3")]
pub struct UartLogWriter<'d> {
    driver: UartTxDriver<'d>,
}

#[cfg(feature = "esp32s3")]
impl Write for UartLogWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let mut bytes = s.as_bytes();
        while !bytes.is_empty() {
            let n = self.driver.write(bytes).map_err(|_| core::fmt::Error)?;
            bytes = &bytes[n..];
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MAX_MSG_LEN};

    #[test]
    fn test_format_log_entry() {
        let mut entry = LogEntry::default();
        entry.timestamp_us = 1234567;
        entry.level = LogLevel::Info;
        entry.msg[..11].copy_from_slice(b"codec ready");
        entry.len = 11;

        let mut buf = [0u8; LINE_BUF_LEN];
        let len = format_log_entry(&entry, &mut buf);

        let formatted = core::str::from_utf8(&buf[..len]).unwrap();
        assert_eq!(formatted, "[   1234567] INFO: codec ready\n");
    }

    #[test]
    fn test_drain_to_writes_all_entries() {
        let stream = LogStream::<8>::new();
        stream.push(1, LogLevel::Info, b"one");
        stream.push(2, LogLevel::Error, b"two");

        let mut out = String::new();
        assert_eq!(drain_to(&stream, &mut out), 2);
        assert_eq!(out, "[         1] INFO: one\n[         2] ERROR: two\n");
        assert_eq!(stream.pending(), 0);
    }

    #[test]
    fn test_drain_to_keeps_line_with_split_multibyte() {
        let stream = LogStream::<4>::new();
        let mut msg = [b'a'; MAX_MSG_LEN + 1];
        msg[MAX_MSG_LEN - 1..].copy_from_slice("µ".as_bytes());
        stream.push(5, LogLevel::Info, &msg);

        let mut out = String::new();
        assert_eq!(drain_to(&stream, &mut out), 1);
        let expected = format!("[         5] INFO: {}\n", "a".repeat(MAX_MSG_LEN - 1));
        assert_eq!(out, expected);
    }

    #[test]
    fn test_format_log_entry_cuts_on_char_boundary() {
        let mut entry = LogEntry::default();
        entry.level = LogLevel::Info;
        let text = "µ".repeat(MAX_MSG_LEN / 2);
        entry.msg.copy_from_slice(text.as_bytes());
        entry.len = MAX_MSG_LEN as u8;

        let mut buf = [0u8; 40];
        let len = format_log_entry(&entry, &mut buf);
        let line = core::str::from_utf8(&buf[..len]).unwrap();
        assert_eq!(line, format!("[         0] INFO: {}\n", "µ".repeat(10)));
    }

    #[test]
    fn test_drain_to_reports_drops_once() {
        let stream = LogStream::<2>::new();
        stream.push(1, LogLevel::Info, b"a");
        stream.push(2, LogLevel::Info, b"b");
        stream.push(3, LogLevel::Info, b"c");

        let mut out = String::new();
        drain_to(&stream, &mut out);
        assert!(out.ends_with("[WARN] Dropped: 1 log entries\n"));
        assert_eq!(stream.dropped(), 0);

        let mut again = String::new();
        assert_eq!(drain_to(&stream, &mut again), 0);
        assert!(again.is_empty());
    }
}
