//! Printing a resolved password specification.

use std::io::Write;

use anyhow::Context;

use passgen::{CharClass, Generator, PasswordConfig, PasswordSpec};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum Format {
    /// A human-readable table.
    Table,
    /// YAML accepted by `--config`.
    Yaml,
}

pub(crate) fn show_spec(
    generator: &Generator,
    format: Format,
    mut output: impl Write,
) -> anyhow::Result<()> {
    match format {
        Format::Table => {
            let rows = spec_rows(generator);
            crate::table::display_table(&rows, output).context("failed to output table")?;
        }
        Format::Yaml => {
            let yaml = PasswordConfig::from(generator.spec())
                .to_yaml()
                .context("failed to encode configuration as YAML")?;
            output
                .write_all(yaml.as_bytes())
                .context("failed to write configuration")?;
        }
    }
    Ok(())
}

struct SpecRow {
    setting: &'static str,
    value: String,
}

impl crate::table::TableDisplay for SpecRow {
    fn columns() -> usize {
        2
    }

    fn column_name(column_index: usize) -> &'static str {
        match column_index {
            0 => "Setting",
            1 => "Value",
            _ => panic!(),
        }
    }

    fn item(&self, column_index: usize) -> &str {
        match column_index {
            0 => self.setting,
            1 => &self.value,
            _ => panic!(),
        }
    }
}

fn spec_rows(generator: &Generator) -> Vec<SpecRow> {
    let spec = generator.spec();
    let mut rows = vec![SpecRow {
        setting: "length",
        value: spec.length().to_string(),
    }];
    rows.extend(CharClass::ALL.into_iter().map(|class| SpecRow {
        setting: match class {
            CharClass::Uppercase => "uppercase",
            CharClass::Lowercase => "lowercase",
            CharClass::Digits => "digits",
            CharClass::Symbols => "symbols",
        },
        value: class_summary(spec, class),
    }));
    rows.push(SpecRow {
        setting: "alphabet size",
        value: generator.alphabet().len().to_string(),
    });
    rows
}

fn class_summary(spec: &PasswordSpec, class: CharClass) -> String {
    if !spec.is_enabled(class) {
        return "disabled".to_owned();
    }
    match spec.class_minimum(class) {
        0 => "enabled".to_owned(),
        n => format!("enabled, at least {n}"),
    }
}
