use std::collections::{HashMap, HashSet};

use passgen::{CharClass, ConfigError, Generator, Override, PasswordConfig};

use CharClass::*;

fn count_class(password: &str, class: CharClass) -> usize {
    password
        .chars()
        .filter(|&ch| CharClass::of(ch) == Some(class))
        .count()
}

fn configs() -> Vec<Vec<Override>> {
    vec![
        vec![],
        vec![Override::Length(24)],
        vec![
            Override::Length(12),
            Override::Disable(Lowercase),
            Override::Disable(Digits),
            Override::Disable(Symbols),
        ],
        vec![
            Override::Length(6),
            Override::Disable(Uppercase),
            Override::Disable(Lowercase),
            Override::Disable(Symbols),
        ],
        vec![Override::Disable(Symbols)],
        vec![
            Override::Length(20),
            Override::Minimum(Uppercase, 3),
            Override::Minimum(Lowercase, 3),
            Override::Minimum(Digits, 3),
            Override::Minimum(Symbols, 2),
        ],
        vec![
            Override::Length(10),
            Override::Minimums {
                uppercase: 2,
                lowercase: 3,
                digits: 3,
                symbols: 2,
            },
        ],
        vec![
            Override::Length(1),
            Override::Disable(Uppercase),
            Override::Minimum(Symbols, 1),
        ],
        vec![Override::Length(10_000), Override::Minimum(Digits, 5_000)],
    ]
}

#[test]
fn passwords_conform_to_their_spec() {
    for overrides in configs() {
        let generator = Generator::new(overrides.clone()).unwrap();
        let spec = generator.spec();
        for _ in 0..50 {
            let password = generator.generate().unwrap();
            let password = password.as_str();
            assert_eq!(password.chars().count(), spec.length(), "{overrides:?}");
            for ch in password.chars() {
                let class = CharClass::of(ch)
                    .unwrap_or_else(|| panic!("{ch:?} is in no class ({overrides:?})"));
                assert!(
                    spec.is_enabled(class),
                    "{ch:?} is from disabled class {class} ({overrides:?})"
                );
            }
            for class in CharClass::ALL {
                assert!(
                    count_class(password, class) >= spec.class_minimum(class),
                    "too few {class} in {password:?} ({overrides:?})"
                );
            }
        }
    }
}

#[test]
fn minimums_can_fill_the_whole_password() {
    let generator = Generator::new([
        Override::Length(10),
        Override::Minimums {
            uppercase: 1,
            lowercase: 1,
            digits: 1,
            symbols: 7,
        },
    ])
    .unwrap();
    for _ in 0..100 {
        let password = generator.generate().unwrap();
        let password = password.as_str();
        assert_eq!(count_class(password, Uppercase), 1);
        assert_eq!(count_class(password, Lowercase), 1);
        assert_eq!(count_class(password, Digits), 1);
        assert_eq!(count_class(password, Symbols), 7);
    }
}

#[test]
fn repeated_calls_differ() {
    let generator = Generator::new([Override::Length(12), Override::Disable(Symbols)]).unwrap();
    let mut seen = HashSet::new();
    for _ in 0..1000 {
        let password = generator.generate().unwrap().into_string();
        assert!(seen.insert(password.clone()), "duplicate password {password:?}");
    }
}

#[test]
fn concurrent_generation_on_a_shared_generator() {
    let generator = Generator::new([
        Override::Length(20),
        Override::Minimums {
            uppercase: 2,
            lowercase: 2,
            digits: 2,
            symbols: 2,
        },
    ])
    .unwrap();

    let passwords = std::thread::scope(|scope| {
        let handles = (0..16)
            .map(|_| {
                scope.spawn(|| {
                    (0..100)
                        .map(|_| generator.generate().unwrap().into_string())
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });

    assert_eq!(passwords.len(), 1600);
    let unique = passwords.iter().collect::<HashSet<_>>();
    assert_eq!(unique.len(), passwords.len());
    for password in &passwords {
        assert_eq!(password.len(), 20);
        for class in CharClass::ALL {
            assert!(count_class(password, class) >= 2);
        }
    }
}

/// Counts every character over many passwords and checks each count is within 5 standard
/// deviations of the binomial expectation.
fn assert_uniform(generator: &Generator, samples: usize) {
    let alphabet = generator.alphabet();
    let mut counts = HashMap::<char, usize>::new();
    for _ in 0..samples {
        for ch in generator.generate().unwrap().as_str().chars() {
            *counts.entry(ch).or_default() += 1;
        }
    }

    let n = (samples * generator.spec().length()) as f64;
    let p = 1.0 / alphabet.len() as f64;
    let expected = n * p;
    let tolerance = 5.0 * (n * p * (1.0 - p)).sqrt();
    for ch in alphabet {
        let count = counts.get(ch).copied().unwrap_or(0) as f64;
        assert!(
            (count - expected).abs() <= tolerance,
            "{ch:?} seen {count} times, expected {expected:.0} ± {tolerance:.0}"
        );
    }
    assert_eq!(counts.len(), alphabet.len());
}

#[test]
fn character_frequencies_are_uniform() {
    assert_uniform(&Generator::new([]).unwrap(), 10_000);
    assert_uniform(
        &Generator::new([
            Override::Length(6),
            Override::Disable(Uppercase),
            Override::Disable(Lowercase),
            Override::Disable(Symbols),
        ])
        .unwrap(),
        10_000,
    );
}

#[test]
fn required_characters_are_not_clustered_at_the_front() {
    // Half the password must be digits; unshuffled, the first character would always be one.
    let generator = Generator::new([Override::Length(16), Override::Minimum(Digits, 8)]).unwrap();
    let samples = 10_000;
    let digits_first = (0..samples)
        .filter(|_| {
            let password = generator.generate().unwrap();
            password
                .as_str()
                .starts_with(|ch: char| ch.is_ascii_digit())
        })
        .count();

    // Each position is a digit with probability 1/2 + (1/2)(10/88).
    let p = 0.5 + 0.5 * (10.0 / 88.0);
    let n = samples as f64;
    let tolerance = 4.0 * (n * p * (1.0 - p)).sqrt();
    assert!(
        (digits_first as f64 - n * p).abs() <= tolerance,
        "{digits_first} of {samples} passwords started with a digit"
    );
}

#[test]
fn validation_contract() {
    let cases: Vec<(Vec<Override>, ConfigError)> = vec![
        (vec![Override::Length(0)], ConfigError::LengthTooSmall(0)),
        (vec![Override::Length(-5)], ConfigError::LengthTooSmall(-5)),
        (
            vec![Override::Length(10_001)],
            ConfigError::LengthTooLarge(10_001),
        ),
        (
            vec![
                Override::Disable(Uppercase),
                Override::Disable(Lowercase),
                Override::Disable(Digits),
                Override::Disable(Symbols),
            ],
            ConfigError::NoClassEnabled,
        ),
        (
            vec![Override::Disable(Uppercase), Override::Minimum(Uppercase, 2)],
            ConfigError::DisabledClassMinimum {
                class: Uppercase,
                value: 2,
            },
        ),
        (
            vec![
                Override::Length(10),
                Override::Minimum(Uppercase, 3),
                Override::Minimum(Lowercase, 3),
                Override::Minimum(Digits, 3),
                Override::Minimum(Symbols, 3),
            ],
            ConfigError::MinimumsExceedLength {
                total: 12,
                length: 10,
            },
        ),
    ];
    for (overrides, expected) in cases {
        let err = Generator::new(overrides.clone()).unwrap_err();
        assert_eq!(err, expected, "{overrides:?}");

        let err = passgen::generate(overrides).unwrap_err();
        assert!(err.is_config());
        assert_eq!(err.config_error(), Some(&expected));
    }
}

#[test]
fn builder_and_overrides_agree() {
    let built = PasswordConfig::default()
        .length(10)
        .disable(Uppercase)
        .enable(Uppercase)
        .min_requirements(1, 1, 1, 1);
    let generator = Generator::from_config(&built).unwrap();
    assert_eq!(
        generator.spec(),
        Generator::new([
            Override::Length(10),
            Override::Minimums {
                uppercase: 1,
                lowercase: 1,
                digits: 1,
                symbols: 1,
            },
        ])
        .unwrap()
        .spec()
    );
}

#[test]
fn config_file_layers_under_overrides() {
    let dir = tempfile::tempdir().unwrap();

    let yaml_path = dir.path().join("passgen.yaml");
    std::fs::write(&yaml_path, "length: 32\ndigits: false\n").unwrap();
    let mut config = PasswordConfig::from_path(&yaml_path).unwrap();
    config.apply_all([Override::Enable(Digits), Override::Minimum(Digits, 30)]);
    let generator = Generator::from_config(&config).unwrap();
    let password = generator.generate().unwrap();
    assert_eq!(password.len(), 32);
    assert!(count_class(password.as_str(), Digits) >= 30);

    let json_path = dir.path().join("passgen.JSON");
    std::fs::write(&json_path, r#"{"length": 5, "min_symbols": 6}"#).unwrap();
    let config = PasswordConfig::from_path(&json_path).unwrap();
    assert_eq!(
        Generator::from_config(&config).unwrap_err(),
        ConfigError::MinimumsExceedLength {
            total: 6,
            length: 5
        }
    );

    assert!(PasswordConfig::from_path(&dir.path().join("missing.yaml")).is_err());
}
