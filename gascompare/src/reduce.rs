use crate::error::{PipelineError, Result};

/// Average across `chunks` interleaved experimental passes. Output position
/// `i` is the mean of the `chunks` samples `{data[j * chunks + i]}` for
/// `j = 0..chunks`; output length is `len / chunks`. This is vertical
/// striping, not contiguous slicing: the log is assumed to interleave
/// `chunks` repeated runs of the same request sequence.
///
/// The striped indexing reaches position `(chunks - 1) * chunks + i` at
/// most, so the series must hold at least `chunks * chunks` samples.
pub fn chunked_means(data: &[u64], chunks: usize) -> Result<Vec<f64>> {
    let need = chunks.max(1) * chunks.max(1);
    if chunks == 0 || data.len() < need {
        return Err(PipelineError::InsufficientSamples {
            have: data.len(),
            need,
        });
    }

    let out_len = data.len() / chunks;
    let mut means = Vec::with_capacity(out_len);
    for i in 0..out_len {
        let sum: u64 = (0..chunks).map(|j| data[j * chunks + i]).sum();
        means.push(sum as f64 / chunks as f64);
    }
    Ok(means)
}

/// Compress a long series into `n` contiguous bins for display, each bin the
/// arithmetic mean of its slice. Slice sizes differ by at most one, with the
/// larger slices at the tail, so every element is covered exactly once. If
/// the series is shorter than `n` there is one single-element bin per sample.
pub fn bin_means(data: &[u64], n: usize) -> Result<Vec<f64>> {
    if n == 0 || data.is_empty() {
        return Err(PipelineError::InsufficientSamples {
            have: data.len(),
            need: n.max(1),
        });
    }

    let bins = n.min(data.len());
    let base = data.len() / bins;
    let larger = data.len() % bins;

    let mut means = Vec::with_capacity(bins);
    let mut start = 0;
    for bin in 0..bins {
        let size = if bin >= bins - larger { base + 1 } else { base };
        let slice = &data[start..start + size];
        means.push(slice.iter().sum::<u64>() as f64 / size as f64);
        start += size;
    }
    Ok(means)
}
