//! Audio chunk decoding
//!
//! Reference clients send each segment as a complete WAV blob; raw 16-bit
//! little-endian PCM is accepted as well. Either way the backend wants i16
//! samples.

use std::io::Cursor;

use super::EngineError;

/// Decode one audio chunk into 16-bit PCM samples.
///
/// Chunks starting with a RIFF header are parsed as WAV (16-bit integer PCM
/// only); anything else is treated as raw s16le.
pub fn chunk_to_samples(chunk: &[u8]) -> Result<Vec<i16>, EngineError> {
    if chunk.len() >= 4 && &chunk[..4] == b"RIFF" {
        wav_to_samples(chunk)
    } else {
        raw_to_samples(chunk)
    }
}

fn wav_to_samples(chunk: &[u8]) -> Result<Vec<i16>, EngineError> {
    let reader = hound::WavReader::new(Cursor::new(chunk))
        .map_err(|e| EngineError::Decode(format!("invalid WAV chunk: {e}")))?;

    let spec = reader.spec();
    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(EngineError::Decode(format!(
            "unsupported WAV sample format: {:?} {} bit (expected 16-bit integer PCM)",
            spec.sample_format, spec.bits_per_sample
        )));
    }

    reader
        .into_samples::<i16>()
        .collect::<Result<Vec<i16>, _>>()
        .map_err(|e| EngineError::Decode(format!("failed to read WAV samples: {e}")))
}

fn raw_to_samples(chunk: &[u8]) -> Result<Vec<i16>, EngineError> {
    if chunk.len() % 2 != 0 {
        return Err(EngineError::Decode(format!(
            "raw PCM chunk has odd length {}",
            chunk.len()
        )));
    }

    Ok(chunk
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_chunk(samples: &[i16], sample_rate: u32) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for s in samples {
                writer.write_sample(*s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_wav_chunk_roundtrip() {
        let samples = vec![0i16, 1, -1, 32767, -32768];
        let chunk = wav_chunk(&samples, 8000);
        assert_eq!(chunk_to_samples(&chunk).unwrap(), samples);
    }

    #[test]
    fn test_raw_pcm_chunk() {
        let samples = vec![12i16, -34, 5600];
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        assert_eq!(chunk_to_samples(&bytes).unwrap(), samples);
    }

    #[test]
    fn test_empty_chunk_yields_no_samples() {
        assert!(chunk_to_samples(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_odd_length_raw_chunk_is_rejected() {
        let err = chunk_to_samples(&[1, 2, 3]).unwrap_err();
        assert!(err.to_string().contains("odd length"));
    }

    #[test]
    fn test_truncated_wav_chunk_is_rejected() {
        let mut chunk = wav_chunk(&[1, 2, 3, 4], 8000);
        chunk.truncate(10);
        assert!(chunk_to_samples(&chunk).is_err());
    }
}
