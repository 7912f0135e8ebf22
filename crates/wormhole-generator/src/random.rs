use crate::Generator;
use jiff::Timestamp;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use typed_builder::TypedBuilder;
use wormhole_core::ShortCode;

/// The 62 characters a random short code is drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

/// Length of generated codes when none is configured.
pub const DEFAULT_LENGTH: usize = 10;

#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGeneratorSettings {
    #[builder(default = DEFAULT_LENGTH)]
    length: usize,
    /// Fixed seed for reproducible output. Seeded from the clock when unset.
    #[builder(default, setter(strip_option))]
    seed: Option<u64>,
}

/// Generates short codes of a fixed length drawn uniformly from [`ALPHABET`].
///
/// The underlying RNG is seeded once per generator, from the current time
/// unless a seed is given, so separate runs produce different sequences.
#[derive(Debug)]
pub struct RandomGenerator {
    length: usize,
    rng: Mutex<StdRng>,
}

impl RandomGenerator {
    pub fn new(settings: RandomGeneratorSettings) -> Self {
        let seed = settings.seed.unwrap_or_else(clock_seed);
        Self {
            length: settings.length,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Creates a clock-seeded generator producing codes of `length` characters.
    pub fn with_length(length: usize) -> Self {
        Self::new(RandomGeneratorSettings::builder().length(length).build())
    }

    pub fn length(&self) -> usize {
        self.length
    }

    fn next_code(&self) -> String {
        let mut rng = self.rng.lock();
        (0..self.length)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::with_length(DEFAULT_LENGTH)
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        ShortCode::new_unchecked(self.next_code())
    }
}

/// Produces a single random code of `length` characters.
pub fn generate(length: usize) -> ShortCode {
    RandomGenerator::with_length(length).generate()
}

fn clock_seed() -> u64 {
    // Truncation keeps the fast-moving low bits of the nanosecond clock.
    Timestamp::now().as_nanosecond() as u64
}
