//! Random choice and in-place shuffling.

use crate::capability::EntropyGenerator;
use crate::dispatch::HardwareRng;
use crate::error::RngError;

impl<G: EntropyGenerator + ?Sized> HardwareRng<G> {
    /// Picks one element uniformly (up to modulo bias) from `items`.
    pub fn choose<'a, T>(&self, items: &'a [T]) -> Result<&'a T, RngError> {
        if items.is_empty() {
            return Err(RngError::EmptyInput);
        }
        let index = self.generate_range(0, items.len() as i64)? as usize;
        Ok(&items[index])
    }

    /// Fisher–Yates shuffle in place, from the last index down to 1.
    ///
    /// Returns the same slice it was given.
    pub fn shuffle<'a, T>(&self, items: &'a mut [T]) -> Result<&'a mut [T], RngError> {
        for i in (1..items.len()).rev() {
            let j = self.generate_range(0, i as i64 + 1)? as usize;
            items.swap(i, j);
        }
        Ok(items)
    }
}
