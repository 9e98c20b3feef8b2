//! Random passwords built from configurable character classes.
//!
//! A [`PasswordConfig`] (defaults plus any [`Override`]s) is validated into a [`PasswordSpec`],
//! from which a [`Generator`] produces passwords using a cryptographically secure RNG:
//!
//! ```
//! use passgen::{CharClass, Generator, Override};
//!
//! let generator = Generator::new([
//!     Override::Length(20),
//!     Override::Disable(CharClass::Symbols),
//!     Override::Minimum(CharClass::Digits, 4),
//! ])?;
//! let password = generator.generate()?;
//! assert_eq!(password.len(), 20);
//! assert!(password.as_str().chars().filter(char::is_ascii_digit).count() >= 4);
//! # Ok::<(), passgen::Error>(())
//! ```

use serde::{Deserialize, Serialize};

mod charset;
mod config;
mod error;
pub mod password_generation;

pub use charset::CharClass;
pub use config::{Override, PasswordConfig, PasswordSpec, DEFAULT_LENGTH, MAX_LENGTH};
pub use error::{ConfigError, Error, LoadConfigError};
pub use password_generation::Generator;

/// Build a generator from `overrides` and generate a single password with it.
pub fn generate<I>(overrides: I) -> Result<Secret, Error>
where
    I: IntoIterator<Item = Override>,
{
    Generator::new(overrides)?.generate()
}

/// A generated password.
///
/// Its `Debug` output is opaque and it deliberately has no `Display`, so it only ends up in
/// logs or terminals through an explicit [`as_str`](Secret::as_str).
#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Length in characters. Generated passwords are ASCII, so this is also the byte length.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}
