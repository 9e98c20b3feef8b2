use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;

use passgen::{CharClass, Generator, Override, PasswordConfig};

mod clipboard;
mod logging;
mod show;
mod table;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Log more; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Defaults to generating a single password.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate one or more passwords, one per line.
    #[command(alias = "gen")]
    Generate {
        #[command(flatten)]
        options: PasswordOptions,
        /// How many passwords to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Copy the password to the clipboard instead of printing it.
        #[arg(long, conflicts_with = "count")]
        copy: bool,
    },
    /// Validate the configuration and print the resulting password specification.
    Show {
        #[command(flatten)]
        options: PasswordOptions,
        #[arg(long, value_enum, default_value_t = show::Format::Table)]
        format: show::Format,
    },
}

/// Configuration shared by every subcommand. Flags are layered over `--config`, which is
/// layered over the defaults.
#[derive(clap::Args, Default)]
struct PasswordOptions {
    /// A YAML (or `.json`) file of password settings.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(short, long, allow_negative_numbers = true)]
    length: Option<i64>,
    #[arg(long, overrides_with = "no_uppercase")]
    uppercase: bool,
    #[arg(long, overrides_with = "uppercase")]
    no_uppercase: bool,
    #[arg(long, overrides_with = "no_lowercase")]
    lowercase: bool,
    #[arg(long, overrides_with = "lowercase")]
    no_lowercase: bool,
    #[arg(long, overrides_with = "no_digits")]
    digits: bool,
    #[arg(long, overrides_with = "digits")]
    no_digits: bool,
    #[arg(long, overrides_with = "no_symbols")]
    symbols: bool,
    #[arg(long, overrides_with = "symbols")]
    no_symbols: bool,
    /// Minimums for uppercase, lowercase, digits and symbols, in that order.
    #[arg(
        long,
        value_name = "UPPER,LOWER,DIGITS,SYMBOLS",
        value_parser = parse_min_all,
        allow_hyphen_values = true
    )]
    min_all: Option<[i64; 4]>,
    #[arg(long, allow_negative_numbers = true)]
    min_uppercase: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    min_lowercase: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    min_digits: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    min_symbols: Option<i64>,
}

impl PasswordOptions {
    fn overrides(&self) -> Vec<Override> {
        let mut overrides = Vec::new();
        if let Some(n) = self.length {
            overrides.push(Override::Length(n));
        }

        let toggles = [
            (CharClass::Uppercase, self.uppercase, self.no_uppercase),
            (CharClass::Lowercase, self.lowercase, self.no_lowercase),
            (CharClass::Digits, self.digits, self.no_digits),
            (CharClass::Symbols, self.symbols, self.no_symbols),
        ];
        for (class, enable, disable) in toggles {
            if enable {
                overrides.push(Override::Enable(class));
            } else if disable {
                overrides.push(Override::Disable(class));
            }
        }

        if let Some([uppercase, lowercase, digits, symbols]) = self.min_all {
            overrides.push(Override::Minimums {
                uppercase,
                lowercase,
                digits,
                symbols,
            });
        }

        let minimums = [
            (CharClass::Uppercase, self.min_uppercase),
            (CharClass::Lowercase, self.min_lowercase),
            (CharClass::Digits, self.min_digits),
            (CharClass::Symbols, self.min_symbols),
        ];
        for (class, min) in minimums {
            if let Some(n) = min {
                overrides.push(Override::Minimum(class, n));
            }
        }
        overrides
    }

    fn resolve(&self) -> Result<PasswordConfig, ProgError> {
        let mut config = match &self.config {
            Some(path) => PasswordConfig::from_path(path)
                .map_err(|err| ProgError::LoadConfig(path.clone(), err))?,
            None => PasswordConfig::default(),
        };
        config.apply_all(self.overrides());
        tracing::debug!(?config, "resolved password configuration");
        Ok(config)
    }

    fn generator(&self) -> Result<Generator, ProgError> {
        Ok(Generator::from_config(&self.resolve()?)?)
    }
}

fn parse_min_all(s: &str) -> Result<[i64; 4], String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<i64>().map_err(|err| format!("{v:?}: {err}")))
        .collect::<Result<Vec<_>, _>>()?;
    <[i64; 4]>::try_from(values)
        .map_err(|values| format!("expected 4 comma-separated counts, got {}", values.len()))
}

fn run(args: Args) -> Result<(), ProgError> {
    let command = args.command.unwrap_or(Command::Generate {
        options: PasswordOptions::default(),
        count: 1,
        copy: false,
    });
    match command {
        Command::Generate {
            options,
            count,
            copy,
        } => {
            let generator = options.generator()?;
            if copy {
                let password = generator.generate()?;
                clipboard::send_to_clipboard(password.as_str().as_bytes())?;
                eprintln!("Copied to the clipboard.");
            } else {
                let mut stdout = io::stdout().lock();
                for _ in 0..count {
                    let password = generator.generate()?;
                    writeln!(stdout, "{}", password.as_str())
                        .context("failed to write password to stdout")?;
                }
                tracing::info!(count, "generated passwords");
            }
        }
        Command::Show { options, format } => {
            let generator = options.generator()?;
            show::show_spec(&generator, format, io::stdout().lock())?;
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(err) = logging::init(args.verbose) {
        eprintln!("failed to initialize logging: {err}");
    }

    match run(args) {
        Ok(()) => (),
        Err(err @ ProgError::Config(_)) => {
            eprintln!("{err}");
            process::exit(2);
        }
        Err(ProgError::Other(err)) => {
            eprintln!("{err:?}");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{:#}", anyhow::Error::new(err));
            process::exit(1);
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error("Invalid password configuration: {0}")]
    Config(passgen::ConfigError),
    #[error("Failed to load configuration from {}", .0.display())]
    LoadConfig(PathBuf, #[source] passgen::LoadConfigError),
    #[error("Password generation failed")]
    Generation(#[source] passgen::Error),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<passgen::ConfigError> for ProgError {
    fn from(err: passgen::ConfigError) -> ProgError {
        ProgError::Config(err)
    }
}

impl From<passgen::Error> for ProgError {
    fn from(err: passgen::Error) -> ProgError {
        match err {
            passgen::Error::Config(err) => ProgError::Config(err),
            err => ProgError::Generation(err),
        }
    }
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}
