//! Dark color generation for series and selections

use egui::Color32;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Highest value any channel may take, keeps colors readable on light backgrounds
pub const DARK_CHANNEL_MAX: u8 = 179;

const MAX_ATTEMPTS: usize = 16;

/// Seeded generator of dark RGB colors
pub struct DarkColorGenerator {
    rng: StdRng,
}

impl DarkColorGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Next color in the sequence, no uniqueness guarantee
    pub fn next_color(&mut self) -> Color32 {
        Color32::from_rgb(
            self.rng.gen_range(0..=DARK_CHANNEL_MAX),
            self.rng.gen_range(0..=DARK_CHANNEL_MAX),
            self.rng.gen_range(0..=DARK_CHANNEL_MAX),
        )
    }

    /// Next color for which `in_use` is false. Gives up after a few attempts
    /// and returns the last candidate.
    pub fn next_avoiding(&mut self, in_use: impl Fn(Color32) -> bool) -> Color32 {
        let mut candidate = self.next_color();
        for _ in 1..MAX_ATTEMPTS {
            if !in_use(candidate) {
                return candidate;
            }
            candidate = self.next_color();
        }
        tracing::warn!("No unused color found after {} attempts, reusing {:?}", MAX_ATTEMPTS, candidate);
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retries_past_used_colors() {
        let mut probe = DarkColorGenerator::new(3);
        let first = probe.next_color();

        let mut generator = DarkColorGenerator::new(3);
        let color = generator.next_avoiding(|c| c == first);
        assert_ne!(color, first);
    }

    #[test]
    fn test_gives_up_when_everything_is_taken() {
        let mut generator = DarkColorGenerator::new(11);
        let color = generator.next_avoiding(|_| true);
        assert!(color.r() <= DARK_CHANNEL_MAX);
    }
}
