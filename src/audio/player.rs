//! Game audio player
//!
//! Ties the codec sequencer, the sample streamer and the delay provider
//! together behind one caller-facing object. The I2C bus is borrowed per
//! call; the sample transport and the delay are owned.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::effects::{SoundEffect, Step};
use super::tone::{Tone, ToneRequest};
use crate::alarm::AlarmOutput;
use crate::config::AudioConfig;
use crate::error::AudioError;
use crate::hal::audio::{SampleSink, SampleStreamer};
use crate::hal::es8311::{Es8311, MicGain};
use crate::{audio_debug, audio_error};

/// Codec + sample output + blocking delay
pub struct GameAudio<S, D> {
    codec: Es8311,
    streamer: SampleStreamer<S>,
    delay: D,
    config: AudioConfig,
}

impl<S: SampleSink, D: DelayNs> GameAudio<S, D> {
    pub fn new(sink: S, delay: D, config: AudioConfig) -> Self {
        Self {
            codec: Es8311::new(&config),
            streamer: SampleStreamer::new(sink),
            delay,
            config,
        }
    }

    /// Bring up the codec at `sample_rate_hz` with `mclk_hz` on the MCLK pin.
    ///
    /// On failure the player stays not ready and every tone/effect call is
    /// a no-op.
    pub fn initialize<I2C: I2c>(
        &mut self,
        i2c: &mut I2C,
        mclk_hz: u32,
        sample_rate_hz: u32,
    ) -> Result<(), AudioError> {
        let settle = self.config.settle;
        self.codec
            .initialize(i2c, &mut self.delay, mclk_hz, sample_rate_hz, &settle)
            .map_err(|e| {
                audio_error!("audio init failed: {}", e);
                e
            })
    }

    /// Bring up the codec with the configured clock pair.
    pub fn initialize_default<I2C: I2c>(&mut self, i2c: &mut I2C) -> Result<(), AudioError> {
        let AudioConfig {
            mclk_hz,
            sample_rate_hz,
            ..
        } = self.config;
        self.initialize(i2c, mclk_hz, sample_rate_hz)
    }

    /// Set DAC volume (0-100%). Returns the clamped level.
    pub fn set_volume<I2C: I2c>(&mut self, i2c: &mut I2C, volume: u8) -> Result<u8, AudioError> {
        self.codec.set_volume(i2c, volume)
    }

    pub fn set_mute<I2C: I2c>(&mut self, i2c: &mut I2C, mute: bool) -> Result<(), AudioError> {
        self.codec.set_mute(i2c, mute)
    }

    pub fn set_mic_gain<I2C: I2c>(&mut self, i2c: &mut I2C, gain: MicGain) -> Result<(), AudioError> {
        self.codec.set_mic_gain(i2c, gain)
    }

    /// Codec initialized
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.codec.is_initialized()
    }

    /// Initialized and not muted: tones will actually be streamed.
    #[inline]
    pub fn is_audible(&self) -> bool {
        self.codec.is_initialized() && !self.codec.is_muted()
    }

    /// Play one tone, blocking until its last sample is accepted.
    ///
    /// Returns the number of stereo words streamed (0 when not audible).
    pub fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) -> usize {
        if !self.is_audible() {
            return 0;
        }
        self.stream_tone(ToneRequest::new(frequency_hz, duration_ms))
    }

    /// Replay the catalog sequence of `effect`, blocking until done.
    ///
    /// Returns the number of stereo words streamed (0 when not audible).
    pub fn play_effect(&mut self, effect: SoundEffect) -> usize {
        if !self.is_audible() {
            return 0;
        }
        audio_debug!("effect {}", effect.name());

        let mut words = 0;
        for step in effect.steps() {
            match *step {
                Step::Tone(request) => words += self.stream_tone(request),
                Step::Silence { duration_ms } => self.delay.delay_ms(duration_ms),
            }
        }
        words
    }

    /// Blocking pause on the delay provider.
    #[inline]
    pub fn pause(&mut self, duration_ms: u32) {
        self.delay.delay_ms(duration_ms);
    }

    fn stream_tone(&mut self, request: ToneRequest) -> usize {
        let tone = Tone::new(
            request,
            self.codec.state().sample_rate_hz,
            self.config.amplitude,
        );
        self.streamer.write_all(tone)
    }

    pub fn codec(&self) -> &Es8311 {
        &self.codec
    }

    pub fn streamer(&self) -> &SampleStreamer<S> {
        &self.streamer
    }

    pub fn config(&self) -> &AudioConfig {
        &self.config
    }

    /// Tear down, returning the sample transport and the delay provider.
    pub fn release(self) -> (S, D) {
        (self.streamer.release(), self.delay)
    }
}

impl<S: SampleSink, D: DelayNs> AlarmOutput for GameAudio<S, D> {
    fn is_ready(&self) -> bool {
        GameAudio::is_ready(self)
    }

    fn ring_cycle(&mut self, pause_ms: u32) {
        self.play_effect(SoundEffect::Alarm);
        self.pause(pause_ms);
    }
}
