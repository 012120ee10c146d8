use crate::error::{ProcessingError, Result};
use crate::models::ByteRange;

/// Split `[0, len)` into `workers` contiguous ranges of `len / workers` bytes,
/// the last one absorbing the remainder.
///
/// Ranges are not aligned to line boundaries here; each scanner realigns its
/// own start (see [`line_start_at_or_after`](super::chunk_scanner::line_start_at_or_after)).
pub fn partition(len: usize, workers: usize) -> Result<Vec<ByteRange>> {
    if workers == 0 {
        return Err(ProcessingError::InvalidWorkerCount(workers));
    }

    let chunk_size = len / workers;
    let ranges = (0..workers)
        .map(|i| {
            let start = i * chunk_size;
            let end = if i == workers - 1 {
                len
            } else {
                start + chunk_size
            };
            ByteRange::new(start, end)
        })
        .collect();

    Ok(ranges)
}
