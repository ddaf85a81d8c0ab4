//! Bounded integers.
//!
//! Values are mapped with `start + (value mod range_size)`. This carries
//! modulo bias for ranges that are not powers of two; the mapping is kept
//! as-is because downstream results are pinned to it.

use crate::capability::EntropyGenerator;
use crate::dispatch::HardwareRng;
use crate::error::RngError;

/// Bytes drawn for a range of `range_size` values.
///
/// 1 byte up to 256, 2 up to 65 536, 3 up to 16 777 216, otherwise 4; then
/// forced to 8 for anything above 2^32. The 8-byte override is applied
/// after the 4-byte choice and always wins.
pub fn byte_width(range_size: u64) -> usize {
    let mut width = if range_size <= 1 << 8 {
        1
    } else if range_size <= 1 << 16 {
        2
    } else if range_size <= 1 << 24 {
        3
    } else {
        4
    };
    if range_size > 1 << 32 {
        width = 8;
    }
    width
}

impl<G: EntropyGenerator + ?Sized> HardwareRng<G> {
    /// An integer in `[start, end)`.
    ///
    /// Fails with [`RngError::InvalidParameter`] unless `end > start`.
    pub fn generate_range(&self, start: i64, end: i64) -> Result<i64, RngError> {
        if end <= start {
            return Err(RngError::InvalidParameter(format!(
                "range end {} must be greater than start {}",
                end, start
            )));
        }

        let range_size = end.abs_diff(start);
        let width = byte_width(range_size);
        let bytes = self.generate(width)?;

        let mut word = [0u8; 8];
        word[..width].copy_from_slice(&bytes);
        let value = u64::from_le_bytes(word);

        tracing::trace!(range_size, width, "Drew bounded integer");
        Ok(start.wrapping_add((value % range_size) as i64))
    }
}
