//! WAV container for raw speech PCM.

use hound::{SampleFormat, WavSpec, WavWriter};
use lessonloom_error::{StageError, StageErrorKind};
use std::io::Cursor;

/// Speech output is always mono.
pub const CHANNELS: u16 = 1;

/// Sample rate of the PCM the speech model returns.
pub const SAMPLE_RATE: u32 = 24_000;

const BITS_PER_SAMPLE: u16 = 16;

/// Wrap 16-bit little-endian mono PCM in a WAV container.
///
/// A trailing odd byte (half a sample) is dropped.
///
/// # Examples
///
/// ```
/// use lessonloom_pipeline::pcm_to_wav;
///
/// let wav = pcm_to_wav(&[0x00, 0x00, 0xFF, 0x7F], 24_000).unwrap();
/// assert_eq!(&wav[0..4], b"RIFF");
/// assert_eq!(&wav[8..12], b"WAVE");
/// ```
pub fn pcm_to_wav(pcm: &[u8], sample_rate: u32) -> Result<Vec<u8>, StageError> {
    let spec = WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + pcm.len()));
    {
        let mut writer = WavWriter::new(&mut cursor, spec).map_err(audio_error)?;
        for sample in pcm.chunks_exact(2) {
            writer
                .write_sample(i16::from_le_bytes([sample[0], sample[1]]))
                .map_err(audio_error)?;
        }
        writer.finalize().map_err(audio_error)?;
    }

    Ok(cursor.into_inner())
}

#[track_caller]
fn audio_error(e: hound::Error) -> StageError {
    StageError::new(StageErrorKind::AudioEncoding(format!("{}", e)))
}
