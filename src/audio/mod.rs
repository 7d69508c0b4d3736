//! Tone synthesis and game sound effects
//!
//! Architecture:
//! - Tone generator: lazy sine iterator, one stereo word per sample
//! - Effect catalog: static tone/silence tables per effect
//! - Player: codec + streamer + delay behind one facade
//! - All playback blocks on the I2S FIFO; nothing is buffered

pub mod effects;
pub mod player;
pub mod tone;

pub use effects::{SoundEffect, Step};
pub use player::GameAudio;
pub use tone::{sample_count, Tone, ToneRequest};
