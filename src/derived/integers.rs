//! Fixed-width integers and unit floats.

use crate::capability::EntropyGenerator;
use crate::dispatch::HardwareRng;
use crate::error::RngError;
use rand_core::RngCore;

/// 2^32 as a float, the divisor for [`HardwareRng::generate_f64`].
const TWO_POW_32: f64 = 4_294_967_296.0;

impl<G: EntropyGenerator + ?Sized> HardwareRng<G> {
    fn generate_array<const N: usize>(&self) -> Result<[u8; N], RngError> {
        let bytes = self.generate(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(&bytes);
        Ok(array)
    }

    /// Four fresh bytes read as a little-endian `u32`.
    pub fn generate_u32(&self) -> Result<u32, RngError> {
        self.generate_array().map(u32::from_le_bytes)
    }

    /// Eight fresh bytes read as a little-endian `u64`.
    pub fn generate_u64(&self) -> Result<u64, RngError> {
        self.generate_array().map(u64::from_le_bytes)
    }

    /// A float in `[0, 1)` computed as `u32 / 2^32`.
    ///
    /// Only multiples of 2^-32 can come out. Callers needing finer or
    /// cryptographic-grade floats should build them from raw bytes.
    pub fn generate_f64(&self) -> Result<f64, RngError> {
        self.generate_u32().map(|value| value as f64 / TWO_POW_32)
    }
}

/// Plugs the basic generation path into the `rand` ecosystem.
///
/// # Panics
///
/// The infallible methods panic if the generator fails, as
/// `rand_core::OsRng` does. Use [`RngCore::try_fill_bytes`] to handle
/// failure.
impl<G: EntropyGenerator + ?Sized> RngCore for HardwareRng<G> {
    fn next_u32(&mut self) -> u32 {
        let mut word = [0u8; 4];
        self.fill_bytes(&mut word);
        u32::from_le_bytes(word)
    }

    fn next_u64(&mut self) -> u64 {
        let mut word = [0u8; 8];
        self.fill_bytes(&mut word);
        u64::from_le_bytes(word)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.try_fill_bytes(dest) {
            panic!("hardware RNG failure: {}", e);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        if dest.is_empty() {
            return Ok(());
        }
        let bytes = self.generate(dest.len()).map_err(rand_core::Error::new)?;
        dest.copy_from_slice(&bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::MockGenerator;

    #[test]
    fn test_u32_little_endian() {
        let rng = HardwareRng::new(MockGenerator::new().with_script([0x01, 0x02, 0x03, 0x04]));
        assert_eq!(rng.generate_u32().unwrap(), 0x0403_0201);
    }

    #[test]
    fn test_u64_little_endian() {
        let rng = HardwareRng::new(
            MockGenerator::new().with_script([0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80]),
        );
        assert_eq!(rng.generate_u64().unwrap(), 0x8000_0000_0000_0001);
    }

    #[test]
    fn test_float_bounds() {
        let zero = HardwareRng::new(MockGenerator::new().with_script([0x00]));
        assert_eq!(zero.generate_f64().unwrap(), 0.0);

        let max = HardwareRng::new(MockGenerator::new().with_script([0xFF]));
        let value = max.generate_f64().unwrap();
        assert!(value < 1.0);
        assert_eq!(value, (u32::MAX as f64) / TWO_POW_32);
    }

    #[test]
    fn test_float_half() {
        let rng = HardwareRng::new(MockGenerator::new().with_script([0x00, 0x00, 0x00, 0x80]));
        assert_eq!(rng.generate_f64().unwrap(), 0.5);
    }

    #[test]
    fn test_failure_propagates() {
        let rng = HardwareRng::new(MockGenerator::new().failing());
        assert!(matches!(rng.generate_u32(), Err(RngError::GenerationFailure(_))));
        assert!(rng.generate_f64().is_err());
    }

    #[test]
    fn test_rng_core_fill() {
        let mut rng = HardwareRng::new(MockGenerator::new().with_script([0xAA]));
        let mut buf = [0u8; 6];
        rng.fill_bytes(&mut buf);
        assert_eq!(buf, [0xAA; 6]);
        assert_eq!(rng.next_u32(), 0xAAAA_AAAA);
    }

    #[test]
    fn test_rng_core_try_fill_error() {
        let mut rng = HardwareRng::new(MockGenerator::new().failing());
        let mut buf = [0u8; 4];
        assert!(rng.try_fill_bytes(&mut buf).is_err());
        assert!(rng.try_fill_bytes(&mut []).is_ok());
    }
}
