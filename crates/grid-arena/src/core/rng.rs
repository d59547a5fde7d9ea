//! Seedable xorshift64 generator.
//! Deterministic for a given seed, so whole sessions can be replayed.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform integer in `[lo, hi]`, both ends included.
    pub fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi as i64 - lo as i64 + 1) as u64;
        (lo as i64 + (self.next_u64() % span) as i64) as i32
    }

    /// Uniform value in `[-amplitude, amplitude]` on a grid of hundredths.
    pub fn jitter(&mut self, amplitude: f32) -> f32 {
        self.range_inclusive(-100, 100) as f32 / 100.0 * amplitude
    }

    /// Uniform value in `[0, 1]` on a grid of hundredths.
    pub fn unit(&mut self) -> f32 {
        self.range_inclusive(0, 100) as f32 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.range_inclusive(0, 10), rng2.range_inclusive(0, 10));
        }
    }

    #[test]
    fn zero_seed_and_empty_ranges_are_handled() {
        let mut rng = Rng::new(0);
        assert_eq!(rng.range_inclusive(5, 5), 5);
        assert_eq!(rng.range_inclusive(5, 1), 5);
    }

    #[test]
    fn inclusive_range_hits_both_ends() {
        let mut rng = Rng::new(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let v = rng.range_inclusive(-1, 1);
            assert!((-1..=1).contains(&v));
            seen[(v + 1) as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn jitter_stays_within_amplitude() {
        let mut rng = Rng::new(99);
        for _ in 0..500 {
            let j = rng.jitter(0.5);
            assert!((-0.5..=0.5).contains(&j), "jitter was {j}");
        }
        assert_eq!(rng.jitter(0.0), 0.0);
    }

    #[test]
    fn unit_stays_in_range() {
        let mut rng = Rng::new(3);
        for _ in 0..500 {
            let u = rng.unit();
            assert!((0.0..=1.0).contains(&u));
        }
    }
}
