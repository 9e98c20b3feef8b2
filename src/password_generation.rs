//! Utilities for generating passwords.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::{CharClass, ConfigError, Error, Override, PasswordConfig, PasswordSpec, Secret};

/// Generates passwords conforming to a validated [`PasswordSpec`].
///
/// A `Generator` holds no per-call state, so one instance may be shared between threads and
/// called concurrently.
#[derive(Clone, Debug)]
pub struct Generator {
    spec: PasswordSpec,
    /// Every enabled class's characters, concatenated in [`CharClass::ALL`] order.
    alphabet: Vec<char>,
}

impl Generator {
    /// Apply `overrides`, in order, to the default configuration and validate the result.
    pub fn new<I>(overrides: I) -> Result<Generator, ConfigError>
    where
        I: IntoIterator<Item = Override>,
    {
        Self::from_config(&PasswordConfig::with_overrides(overrides))
    }

    pub fn from_config(config: &PasswordConfig) -> Result<Generator, ConfigError> {
        Ok(Self::from_spec(config.validate()?))
    }

    pub fn from_spec(spec: PasswordSpec) -> Generator {
        let alphabet = spec
            .enabled_classes()
            .flat_map(|class| class.alphabet().iter().copied())
            .collect::<Vec<_>>();
        tracing::debug!(
            length = spec.length(),
            alphabet_size = alphabet.len(),
            minimum_total = spec.minimum_total(),
            "constructed password generator"
        );
        Generator { spec, alphabet }
    }

    pub fn spec(&self) -> &PasswordSpec {
        &self.spec
    }

    /// The union of all enabled classes' characters.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Generate a password using the operating system's random number generator.
    pub fn generate(&self) -> Result<Secret, Error> {
        self.generate_with(&mut OsRng)
    }

    /// Generate a password from the given cryptographically secure RNG.
    ///
    /// Each class with a minimum first gets that many characters drawn from its own alphabet.
    /// The rest of the length is drawn from the union alphabet, and the whole buffer is then
    /// shuffled so the required characters don't sit at the front.
    ///
    /// If the RNG fails at any point the call fails with [`Error::Randomness`]; nothing generated
    /// up to that point is returned.
    pub fn generate_with<R>(&self, rng: &mut R) -> Result<Secret, Error>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        tracing::trace!(length = self.spec.length(), "generating password");
        let mut buf = Vec::with_capacity(self.spec.length());
        self.fill(rng, &mut buf).map_err(|err| {
            tracing::warn!("random number generator failed: {err}");
            Error::Randomness(err)
        })?;
        debug_assert_eq!(buf.len(), self.spec.length());
        Ok(Secret(buf.into_iter().collect()))
    }

    fn fill<R>(&self, rng: &mut R, buf: &mut Vec<char>) -> Result<(), rand::Error>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        for class in CharClass::ALL {
            let count = self.spec.class_minimum(class);
            sample_into(rng, class.alphabet(), count, buf)?;
        }
        // The validated spec guarantees the minimums fit in the length.
        let remaining = self.spec.length() - buf.len();
        sample_into(rng, &self.alphabet, remaining, buf)?;
        shuffle(rng, buf)
    }
}

/// Append `count` characters drawn uniformly at random from `alphabet`.
fn sample_into<R>(
    rng: &mut R,
    alphabet: &[char],
    count: usize,
    out: &mut Vec<char>,
) -> Result<(), rand::Error>
where
    R: RngCore + CryptoRng + ?Sized,
{
    for _ in 0..count {
        out.push(alphabet[uniform_index(rng, alphabet.len())?]);
    }
    Ok(())
}

/// Fisher-Yates: walk from the end down to index 1, swapping each slot with a uniformly chosen
/// slot at or before it.
fn shuffle<R, T>(rng: &mut R, items: &mut [T]) -> Result<(), rand::Error>
where
    R: RngCore + CryptoRng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = uniform_index(rng, i + 1)?;
        items.swap(i, j);
    }
    Ok(())
}

/// A uniformly distributed index in `0..bound`.
///
/// `rand`'s own uniform sampler avoids modulo bias too, but it panics when the underlying RNG
/// fails. This draws through `try_fill_bytes` instead and rejects any 32-bit draw at or above the
/// largest multiple of `bound`, so every index is exactly equally likely.
///
/// `bound` must be non-zero and fit in a `u32`; callers pass alphabet sizes and positions within
/// a password, both far below that.
fn uniform_index<R>(rng: &mut R, bound: usize) -> Result<usize, rand::Error>
where
    R: RngCore + CryptoRng + ?Sized,
{
    debug_assert!(bound > 0 && bound <= u32::MAX as usize);
    if bound == 1 {
        return Ok(0);
    }
    let bound = bound as u32;
    let zone = (u32::MAX / bound) * bound;
    loop {
        let mut bytes = [0u8; 4];
        rng.try_fill_bytes(&mut bytes)?;
        let draw = u32::from_le_bytes(bytes);
        if draw < zone {
            return Ok((draw % bound) as usize);
        }
    }
}
