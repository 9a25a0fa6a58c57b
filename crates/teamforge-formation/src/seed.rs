use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for a reproducible formation run.
///
/// A 128-bit (16-byte) seed that initializes the single random number generator
/// used by one formation request. Using the same seed with the same candidates
/// and configuration produces the same teams, enabling:
///
/// - Replaying a formation that was reported as unfair
/// - Deterministic testing
///
/// Seeds are written as 32 hexadecimal characters.
///
/// # Example
///
/// ```
/// use rand::Rng as _;
/// use teamforge_formation::FormationSeed;
///
/// let seed: FormationSeed = rand::rng().random();
/// let parsed: FormationSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormationSeed([u8; 16]);

impl FormationSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn from_u128(num: u128) -> Self {
        Self(num.to_be_bytes())
    }

    /// The random number generator this seed initializes.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for FormationSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed '{input}': expected 32 hexadecimal characters")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for FormationSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self::from_u128(num))
    }
}

impl Serialize for FormationSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FormationSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `FormationSeed` values with `rng.random()`.
impl Distribution<FormationSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> FormationSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        FormationSeed(seed)
    }
}
