//! Password configuration: defaults, overrides, loading from files, and validation.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadConfigErrorRepr;
use crate::{CharClass, ConfigError, LoadConfigError};

/// The longest password a configuration may ask for.
pub const MAX_LENGTH: i64 = 10_000;

/// Length used when nothing overrides it.
pub const DEFAULT_LENGTH: i64 = 16;

/// An unvalidated password configuration.
///
/// Counts are signed so that nonsense like a negative length survives until [`validate`] can
/// report it. Nothing here is checked until then; use [`validate`] to get a [`PasswordSpec`].
///
/// [`validate`]: PasswordConfig::validate
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PasswordConfig {
    pub length: i64,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
    pub min_uppercase: i64,
    pub min_lowercase: i64,
    pub min_digits: i64,
    pub min_symbols: i64,
}

impl Default for PasswordConfig {
    fn default() -> PasswordConfig {
        PasswordConfig {
            length: DEFAULT_LENGTH,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
            min_uppercase: 0,
            min_lowercase: 0,
            min_digits: 0,
            min_symbols: 0,
        }
    }
}

/// A single change to a [`PasswordConfig`].
///
/// Overrides are applied in order; a later override of the same field replaces an earlier one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Override {
    Length(i64),
    Enable(CharClass),
    Disable(CharClass),
    Minimum(CharClass, i64),
    /// Set all four minimums at once.
    Minimums {
        uppercase: i64,
        lowercase: i64,
        digits: i64,
        symbols: i64,
    },
}

impl PasswordConfig {
    /// The defaults with `overrides` applied in order.
    pub fn with_overrides<I>(overrides: I) -> PasswordConfig
    where
        I: IntoIterator<Item = Override>,
    {
        let mut config = PasswordConfig::default();
        config.apply_all(overrides);
        config
    }

    pub fn apply(&mut self, change: Override) {
        match change {
            Override::Length(n) => self.length = n,
            Override::Enable(class) => *self.enabled_mut(class) = true,
            Override::Disable(class) => *self.enabled_mut(class) = false,
            Override::Minimum(class, n) => *self.minimum_mut(class) = n,
            Override::Minimums {
                uppercase,
                lowercase,
                digits,
                symbols,
            } => {
                self.min_uppercase = uppercase;
                self.min_lowercase = lowercase;
                self.min_digits = digits;
                self.min_symbols = symbols;
            }
        }
    }

    pub fn apply_all<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = Override>,
    {
        for change in overrides {
            self.apply(change);
        }
    }

    pub fn length(mut self, n: i64) -> PasswordConfig {
        self.apply(Override::Length(n));
        self
    }

    pub fn enable(mut self, class: CharClass) -> PasswordConfig {
        self.apply(Override::Enable(class));
        self
    }

    pub fn disable(mut self, class: CharClass) -> PasswordConfig {
        self.apply(Override::Disable(class));
        self
    }

    pub fn min(mut self, class: CharClass, n: i64) -> PasswordConfig {
        self.apply(Override::Minimum(class, n));
        self
    }

    pub fn min_requirements(
        mut self,
        uppercase: i64,
        lowercase: i64,
        digits: i64,
        symbols: i64,
    ) -> PasswordConfig {
        self.apply(Override::Minimums {
            uppercase,
            lowercase,
            digits,
            symbols,
        });
        self
    }

    pub fn is_enabled(&self, class: CharClass) -> bool {
        match class {
            CharClass::Uppercase => self.uppercase,
            CharClass::Lowercase => self.lowercase,
            CharClass::Digits => self.digits,
            CharClass::Symbols => self.symbols,
        }
    }

    pub fn minimum(&self, class: CharClass) -> i64 {
        match class {
            CharClass::Uppercase => self.min_uppercase,
            CharClass::Lowercase => self.min_lowercase,
            CharClass::Digits => self.min_digits,
            CharClass::Symbols => self.min_symbols,
        }
    }

    fn enabled_mut(&mut self, class: CharClass) -> &mut bool {
        match class {
            CharClass::Uppercase => &mut self.uppercase,
            CharClass::Lowercase => &mut self.lowercase,
            CharClass::Digits => &mut self.digits,
            CharClass::Symbols => &mut self.symbols,
        }
    }

    fn minimum_mut(&mut self, class: CharClass) -> &mut i64 {
        match class {
            CharClass::Uppercase => &mut self.min_uppercase,
            CharClass::Lowercase => &mut self.min_lowercase,
            CharClass::Digits => &mut self.min_digits,
            CharClass::Symbols => &mut self.min_symbols,
        }
    }

    /// Check every rule, in a fixed order, and return the first one broken.
    ///
    /// The order is: length lower bound, length upper bound, non-negative minimums (per class),
    /// at least one class enabled, no minimum on a disabled class (per class), and finally the
    /// sum of the minimums fitting in the length.
    pub fn validate(&self) -> Result<PasswordSpec, ConfigError> {
        if self.length <= 0 {
            return Err(ConfigError::LengthTooSmall(self.length));
        }
        if self.length > MAX_LENGTH {
            return Err(ConfigError::LengthTooLarge(self.length));
        }

        for class in CharClass::ALL {
            let value = self.minimum(class);
            if value < 0 {
                return Err(ConfigError::NegativeMinimum { class, value });
            }
        }

        if !CharClass::ALL.into_iter().any(|class| self.is_enabled(class)) {
            return Err(ConfigError::NoClassEnabled);
        }

        for class in CharClass::ALL {
            let value = self.minimum(class);
            if !self.is_enabled(class) && value > 0 {
                return Err(ConfigError::DisabledClassMinimum { class, value });
            }
        }

        let total = CharClass::ALL
            .into_iter()
            .fold(0i64, |sum, class| sum.saturating_add(self.minimum(class)));
        if total > self.length {
            return Err(ConfigError::MinimumsExceedLength {
                total,
                length: self.length,
            });
        }

        // Every count is now within 0..=MAX_LENGTH, so these conversions are lossless.
        let mut spec = PasswordSpec {
            length: self.length as usize,
            enabled: [false; 4],
            minimums: [0; 4],
        };
        for class in CharClass::ALL {
            spec.enabled[class.index()] = self.is_enabled(class);
            spec.minimums[class.index()] = self.minimum(class) as usize;
        }
        Ok(spec)
    }

    /// Validate and construct a [`Generator`](crate::Generator) in one step.
    pub fn build(&self) -> Result<crate::Generator, ConfigError> {
        crate::Generator::from_config(self)
    }

    pub fn from_yaml_reader(rdr: impl Read) -> Result<PasswordConfig, LoadConfigError> {
        Ok(serde_yaml::from_reader(rdr).map_err(LoadConfigErrorRepr::Yaml)?)
    }

    pub fn from_json_reader(rdr: impl Read) -> Result<PasswordConfig, LoadConfigError> {
        Ok(serde_json::from_reader(rdr).map_err(LoadConfigErrorRepr::Json)?)
    }

    /// Load a configuration file. Files ending in `.json` are read as JSON, anything else as YAML.
    ///
    /// Fields missing from the file keep their default values.
    pub fn from_path(path: &Path) -> Result<PasswordConfig, LoadConfigError> {
        let file = BufReader::new(File::open(path).map_err(LoadConfigErrorRepr::Io)?);
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::from_json_reader(file)
        } else {
            Self::from_yaml_reader(file)
        }
    }

    /// Render as YAML, in the same shape [`from_yaml_reader`](Self::from_yaml_reader) accepts.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// A validated, immutable password specification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PasswordSpec {
    length: usize,
    enabled: [bool; 4],
    minimums: [usize; 4],
}

impl PasswordSpec {
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn is_enabled(&self, class: CharClass) -> bool {
        self.enabled[class.index()]
    }

    /// The minimum number of characters drawn from `class`. Always zero for a disabled class.
    pub fn class_minimum(&self, class: CharClass) -> usize {
        self.minimums[class.index()]
    }

    pub fn enabled_classes(&self) -> impl Iterator<Item = CharClass> + '_ {
        CharClass::ALL
            .into_iter()
            .filter(move |&class| self.is_enabled(class))
    }

    /// The sum of all class minimums; never more than [`length`](Self::length).
    pub fn minimum_total(&self) -> usize {
        self.minimums.iter().sum()
    }
}

impl From<&PasswordSpec> for PasswordConfig {
    fn from(spec: &PasswordSpec) -> PasswordConfig {
        let mut config = PasswordConfig::default().length(spec.length as i64);
        for class in CharClass::ALL {
            *config.enabled_mut(class) = spec.is_enabled(class);
            *config.minimum_mut(class) = spec.class_minimum(class) as i64;
        }
        config
    }
}
