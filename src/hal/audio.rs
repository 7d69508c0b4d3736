//! Audio HAL: blocking sample output.
//!
//! One call, one stereo word. The call returns when the transport has
//! taken the word, so the hardware sample clock alone sets the pace. There
//! is no queue here; the transport FIFO is the only buffer.

/// Output transport for packed stereo sample words.
///
/// Implementations block until the hardware accepts the word (I2S FIFO
/// slot free). A transport that can fail must absorb the failure itself:
/// audio errors are silent at the sound level.
pub trait SampleSink {
    fn put_blocking(&mut self, word: u32);
}

impl<S: SampleSink + ?Sized> SampleSink for &mut S {
    #[inline]
    fn put_blocking(&mut self, word: u32) {
        (**self).put_blocking(word)
    }
}

/// Pack one mono sample into both halves of a stereo word.
///
/// Left channel in bits 31:16, right channel in bits 15:0.
#[inline]
pub fn pack_stereo(sample: i16) -> u32 {
    let half = sample as u16 as u32;
    (half << 16) | half
}

/// Split a stereo word back into (left, right).
#[inline]
pub fn unpack_stereo(word: u32) -> (i16, i16) {
    ((word >> 16) as u16 as i16, word as u16 as i16)
}

/// Sample streamer
///
/// Sole owner of the output transport.
pub struct SampleStreamer<S> {
    sink: S,
    /// Words handed to the transport since creation
    written: u64,
}

impl<S: SampleSink> SampleStreamer<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, written: 0 }
    }

    /// Write one stereo word, blocking until the transport accepts it.
    #[inline]
    pub fn write(&mut self, word: u32) {
        self.sink.put_blocking(word);
        self.written += 1;
    }

    /// Stream every word of `words`, one blocking write at a time.
    ///
    /// Returns the number of words written.
    pub fn write_all<I: IntoIterator<Item = u32>>(&mut self, words: I) -> usize {
        let mut count = 0;
        for word in words {
            self.write(word);
            count += 1;
        }
        count
    }

    /// Total words written
    #[inline]
    pub fn words_written(&self) -> u64 {
        self.written
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give the transport back
    pub fn release(self) -> S {
        self.sink
    }
}
