//! Channel mixing utilities (multichannel to mono conversion)

/// Downmix interleaved multichannel samples to mono by averaging channels
///
/// # Arguments
///
/// * `interleaved` - Samples ordered frame by frame (`L R L R ...` for stereo)
/// * `channels` - Number of channels; 0 and 1 return the input unchanged
///
/// # Returns
///
/// One sample per frame. A trailing partial frame is averaged over the
/// channels it contains.
pub fn downmix_interleaved(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}
