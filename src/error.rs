use std::io;

use crate::CharClass;

/// A configuration that cannot be turned into a [`PasswordSpec`](crate::PasswordSpec).
///
/// Validation stops at the first violated rule, so when several rules are broken at once the
/// variant reported is always the earliest one checked.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("password length must be greater than 0, got {0}")]
    LengthTooSmall(i64),
    #[error("password length must not exceed {max}, got {0}", max = crate::MAX_LENGTH)]
    LengthTooLarge(i64),
    #[error("minimum {class} count cannot be negative, got {value}")]
    NegativeMinimum { class: CharClass, value: i64 },
    #[error("at least one character set must be enabled")]
    NoClassEnabled,
    #[error("{} are disabled but minimum {class} requirement is {value}", .class.label())]
    DisabledClassMinimum { class: CharClass, value: i64 },
    #[error("sum of minimum requirements ({total}) cannot exceed password length ({length})")]
    MinimumsExceedLength { total: i64, length: i64 },
}

/// Anything that can go wrong constructing a generator or generating a password.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read random bytes")]
    Randomness(#[source] rand::Error),
}

impl Error {
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    pub fn is_randomness(&self) -> bool {
        matches!(self, Error::Randomness(_))
    }

    pub fn config_error(&self) -> Option<&ConfigError> {
        match self {
            Error::Config(err) => Some(err),
            Error::Randomness(_) => None,
        }
    }
}

/// Failure to read a configuration file; the file's contents are not validated here.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct LoadConfigError(LoadConfigErrorRepr);

impl From<LoadConfigErrorRepr> for LoadConfigError {
    fn from(err: LoadConfigErrorRepr) -> LoadConfigError {
        LoadConfigError(err)
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum LoadConfigErrorRepr {
    #[error("I/O error")]
    Io(#[source] io::Error),
    #[error("failed to parse YAML configuration")]
    Yaml(#[source] serde_yaml::Error),
    #[error("failed to parse JSON configuration")]
    Json(#[source] serde_json::Error),
}
