//! # watch-game-audio
//!
//! ES8311 codec bring-up, game sound effects and an alarm timer for a
//! smartwatch board.
//!
//! ## Architecture
//!
//! Everything runs synchronously on the caller's context:
//! - [`hal::es8311`] sequences the codec registers over a borrowed I2C bus
//! - [`audio::GameAudio`] synthesizes tones and streams them one stereo
//!   word at a time, blocking on the sample transport
//! - [`alarm::AlarmTimer`] compares RTC time to a target and drives the
//!   player while ringing
//!
//! Logging never blocks: entries go to [`log_globals::AUDIO_LOG_STREAM`]
//! and are drained by the main loop.

#![cfg_attr(not(test), no_std)]

pub mod logging;
pub mod log_globals;
pub mod uart_logger;
pub mod config;
pub mod error;
pub mod hal;
pub mod audio;
pub mod rtc;
pub mod alarm;

pub use alarm::{AlarmOutput, AlarmPhase, AlarmTimer};
pub use audio::{GameAudio, SoundEffect};
pub use config::{AlarmConfig, AudioConfig, SettleDelays};
pub use error::AudioError;
pub use log_globals::AUDIO_LOG_STREAM;
pub use rtc::{RtcTime, TimeSource};
