//! Randomized tower heights.

use rand_core::RngCore;

/// Draws the extra height of new towers.
///
/// The extra height is the number of heads in a run of fair coin flips
/// before the first tail, capped at `max`. Row *i* therefore holds about
/// `n / 2^i` entries. One `u32` supplies 32 flips: the count of its trailing
/// ones.
#[derive(Debug, Clone)]
pub(crate) struct HeightGen<R> {
    rng: R,
    max: u8,
}

impl<R: RngCore> HeightGen<R> {
    pub(crate) fn new(rng: R, max: u8) -> Self {
        Self { rng, max }
    }

    /// Returns the next extra height in `0..=max`.
    #[inline]
    pub(crate) fn next_height(&mut self) -> usize {
        let flips = self.rng.next_u32().trailing_ones() as usize;
        flips.min(self.max as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Replays a fixed sequence of words.
    struct Fixed(Vec<u32>);

    impl RngCore for Fixed {
        fn next_u32(&mut self) -> u32 {
            self.0.remove(0)
        }

        fn next_u64(&mut self) -> u64 {
            self.next_u32() as u64
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            rand_core::impls::fill_bytes_via_next(self, dst)
        }
    }

    #[test]
    fn counts_trailing_heads() {
        let mut heights = HeightGen::new(Fixed(vec![0b0, 0b1, 0b1011, u32::MAX]), 32);
        assert_eq!(heights.next_height(), 0);
        assert_eq!(heights.next_height(), 1);
        assert_eq!(heights.next_height(), 2);
        assert_eq!(heights.next_height(), 32);
    }

    #[test]
    fn clamped_to_max() {
        let mut heights = HeightGen::new(Fixed(vec![u32::MAX, 0b111]), 2);
        assert_eq!(heights.next_height(), 2);
        assert_eq!(heights.next_height(), 2);
    }

    #[test]
    fn roughly_geometric() {
        let mut heights = HeightGen::new(SmallRng::seed_from_u64(12345), 32);
        let mut histogram = [0usize; 33];
        for _ in 0..100_000 {
            histogram[heights.next_height()] += 1;
        }

        // Half the draws stay at 0, a quarter reach exactly 1.
        assert!((45_000..55_000).contains(&histogram[0]), "{:?}", histogram);
        assert!((20_000..30_000).contains(&histogram[1]), "{:?}", histogram);
        assert!(histogram[0] > histogram[1] && histogram[1] > histogram[2]);
    }
}
