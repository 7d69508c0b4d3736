//! Global log stream instance.
//!
//! The codec sequencer, tone player and alarm timer share one stream.

use crate::logging::LogStream;

/// Audio engine log stream.
///
/// Any context may log into it; the main loop drains it.
pub static AUDIO_LOG_STREAM: LogStream = LogStream::new();

/// Info log into [`AUDIO_LOG_STREAM`], stamped with the system timer.
#[macro_export]
macro_rules! audio_info {
    ($($arg:tt)*) => {
        $crate::rt_info!($crate::log_globals::AUDIO_LOG_STREAM, $crate::logging::timestamp_us(), $($arg)*)
    };
}

#[macro_export]
macro_rules! audio_warn {
    ($($arg:tt)*) => {
        $crate::rt_warn!($crate::log_globals::AUDIO_LOG_STREAM, $crate::logging::timestamp_us(), $($arg)*)
    };
}

#[macro_export]
macro_rules! audio_error {
    ($($arg:tt)*) => {
        $crate::rt_error!($crate::log_globals::AUDIO_LOG_STREAM, $crate::logging::timestamp_us(), $($arg)*)
    };
}

#[macro_export]
macro_rules! audio_debug {
    ($($arg:tt)*) => {
        $crate::rt_debug!($crate::log_globals::AUDIO_LOG_STREAM, $crate::logging::timestamp_us(), $($arg)*)
    };
}
