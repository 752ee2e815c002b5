//! Sanity checks for generated audio

use log::debug;

use crate::model::AudioStream;
use crate::{Result, TtsPrepError};

/// Validate a buffer of generated audio samples
///
/// The buffer must be non-empty and every sample finite.
pub fn validate_audio(samples: &[f32]) -> Result<()> {
    if samples.is_empty() {
        return Err(TtsPrepError::Audio("generated audio is empty".to_string()));
    }
    if samples.iter().any(|s| !s.is_finite()) {
        return Err(TtsPrepError::Audio(
            "audio contains NaN or infinite samples".to_string(),
        ));
    }
    Ok(())
}

/// Duration of a sample buffer in seconds
pub fn duration_secs(samples: &[f32], sample_rate: u32) -> f32 {
    samples.len() as f32 / sample_rate as f32
}

/// Drain a streaming synthesis call, validating every chunk
///
/// Fails when any chunk is invalid or when the stream yields nothing.
pub fn collect_stream(stream: AudioStream) -> Result<Vec<Vec<f32>>> {
    let mut chunks = Vec::new();
    for chunk in stream {
        let chunk = chunk?;
        validate_audio(&chunk)?;
        chunks.push(chunk);
    }
    if chunks.is_empty() {
        return Err(TtsPrepError::Audio(
            "stream yielded no audio chunks".to_string(),
        ));
    }
    debug!("Collected {} audio chunks", chunks.len());
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        assert!(validate_audio(&[0.0, 0.5, -0.5]).is_ok());
    }

    #[test]
    fn test_validate_empty() {
        assert!(matches!(validate_audio(&[]), Err(TtsPrepError::Audio(_))));
    }

    #[test]
    fn test_validate_nan() {
        assert!(validate_audio(&[0.1, f32::NAN]).is_err());
        assert!(validate_audio(&[f32::INFINITY]).is_err());
    }

    #[test]
    fn test_duration() {
        let samples = vec![0.0; 24_000];
        assert!((duration_secs(&samples, 24_000) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_collect_stream_validates_chunks() {
        let stream: AudioStream =
            Box::new(vec![Ok(vec![0.1, 0.2]), Ok(vec![0.3])].into_iter());
        let chunks = collect_stream(stream).unwrap();
        assert_eq!(chunks.len(), 2);

        let empty: AudioStream = Box::new(std::iter::empty());
        assert!(collect_stream(empty).is_err());

        let bad: AudioStream = Box::new(vec![Ok(vec![f32::NAN])].into_iter());
        assert!(collect_stream(bad).is_err());
    }
}
