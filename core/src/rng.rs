/// Source of randomness for spawn decisions and asteroid generation.
///
/// Kept behind a trait so tests can drive the field with a fixed sequence.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn probability(&mut self) -> f64;

    /// Uniform draw in `[min, max)`; returns `min` when the range is empty.
    fn range(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        min + self.probability() * (max - min)
    }

    /// Uniform integer in `[0, max)`; returns 0 when `max` is 0.
    fn index(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        ((self.probability() * max as f64) as usize).min(max - 1)
    }
}

/// Xorshift32 generator; the same seed always yields the same game.
#[derive(Clone, Copy, Debug)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0xDEAD_BEEF } else { seed },
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        self.state
    }
}

impl RandomSource for SeededRng {
    fn probability(&mut self) -> f64 {
        // Top 24 bits keep the draw exactly representable and strictly below 1.
        f64::from(self.next() >> 8) / f64::from(1u32 << 24)
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct FixedSequence {
    draws: Vec<f64>,
    cursor: usize,
}

impl FixedSequence {
    pub fn new(draws: Vec<f64>) -> Self {
        debug_assert!(draws.iter().all(|d| (0.0..1.0).contains(d)));
        Self { draws, cursor: 0 }
    }
}

impl RandomSource for FixedSequence {
    fn probability(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw
    }
}
