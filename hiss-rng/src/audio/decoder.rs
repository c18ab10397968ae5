//! Audio decoder using symphonia
//!
//! Decodes WAV/PCM, FLAC, MP3, AAC and Vorbis to a single integer channel.
//!
//! Integer PCM keeps its native values so the same recording always hashes to
//! the same bytes. Unsigned formats are re-centered around zero. Float PCM is
//! scaled onto the full `i32` range.

use super::types::AudioStream;
use crate::error::{Error, Result};
use std::path::Path;
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;
use tracing::{debug, warn};

/// Simple whole-file audio decoder using symphonia.
pub struct SimpleDecoder;

impl SimpleDecoder {
    /// Decode an entire file and keep only its first channel.
    ///
    /// # Errors
    /// - Failed to open file
    /// - Unsupported audio format or no audio track
    /// - Sample rate unknown, or nothing decoded
    pub fn decode_first_channel(path: &Path) -> Result<AudioStream> {
        debug!("Decoding entire file: {}", path.display());

        let file = std::fs::File::open(path)
            .map_err(|e| Error::Decode(format!("Failed to open file {}: {}", path.display(), e)))?;

        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // Create a hint to help the format registry guess the format
        let mut hint = Hint::new();
        if let Some(ext_str) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext_str);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| Error::Decode(format!("Failed to probe format: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| Error::Decode("No audio track found".to_string()))?;

        let track_id = track.id;
        let mut sample_rate = track.codec_params.sample_rate;
        let channels = track.codec_params.channels.map(|c| c.count());

        debug!("Audio format: sample_rate={:?}, channels={:?}", sample_rate, channels);

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| Error::Decode(format!("Failed to create decoder: {}", e)))?;

        let mut samples = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(e) => {
                    Self::check_end_of_stream(e)?;
                    debug!("Reached end of file");
                    break;
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    if sample_rate.is_none() {
                        sample_rate = Some(decoded.spec().rate);
                    }
                    Self::append_first_channel(&decoded, &mut samples);
                }
                Err(e) => {
                    warn!("Decode error: {}", e);
                    continue;
                }
            }
        }

        let sample_rate =
            sample_rate.ok_or_else(|| Error::Decode("Sample rate not found".to_string()))?;

        if samples.is_empty() {
            return Err(Error::Decode(format!(
                "No samples decoded from {}",
                path.display()
            )));
        }

        debug!("Decoded {} first-channel samples at {} Hz", samples.len(), sample_rate);

        AudioStream::new(sample_rate, samples)
    }

    /// End of stream is the only packet error that ends decoding normally
    fn check_end_of_stream(err: SymphoniaError) -> Result<()> {
        match err {
            SymphoniaError::IoError(ref e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                Ok(())
            }
            other => Err(Error::Decode(format!("Failed to read packet: {}", other))),
        }
    }

    /// Convert the first channel of a decoded buffer to `i32` samples.
    fn append_first_channel(decoded: &AudioBufferRef, output: &mut Vec<i32>) {
        match decoded {
            AudioBufferRef::S8(buf) => Self::copy_channel(buf, output, |s| s as i32),
            AudioBufferRef::S16(buf) => Self::copy_channel(buf, output, |s| s as i32),
            AudioBufferRef::S24(buf) => Self::copy_channel(buf, output, |s| s.inner()),
            AudioBufferRef::S32(buf) => Self::copy_channel(buf, output, |s| s),
            AudioBufferRef::U8(buf) => Self::copy_channel(buf, output, |s| s as i32 - 128),
            AudioBufferRef::U16(buf) => Self::copy_channel(buf, output, |s| s as i32 - 32768),
            AudioBufferRef::U24(buf) => {
                Self::copy_channel(buf, output, |s| s.inner() as i32 - 8_388_608)
            }
            AudioBufferRef::U32(buf) => {
                Self::copy_channel(buf, output, |s| (s as i64 - 2_147_483_648) as i32)
            }
            AudioBufferRef::F32(buf) => Self::copy_channel(buf, output, |s| float_to_i32(s as f64)),
            AudioBufferRef::F64(buf) => Self::copy_channel(buf, output, float_to_i32),
        }
    }

    fn copy_channel<S, F>(buf: &AudioBuffer<S>, output: &mut Vec<i32>, convert: F)
    where
        S: Sample,
        F: Fn(S) -> i32,
    {
        if buf.spec().channels.count() == 0 {
            return;
        }
        output.extend(buf.chan(0).iter().map(|&s| convert(s)));
    }
}

/// Scale a [-1.0, 1.0] float sample onto the `i32` range
fn float_to_i32(sample: f64) -> i32 {
    (sample.clamp(-1.0, 1.0) * i32::MAX as f64).round() as i32
}
