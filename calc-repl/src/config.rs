use ariadne::Source;
use calc_compute::{EvalOptions, Locale};
use calc_error::simple_report;
use calc_graph::SamplerOptions;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};

/// Configuration of the REPL, read from a TOML file.
///
/// Every table and key is optional:
///
/// ```toml
/// [locale]
/// error = "Erreur"
/// sin = "sin"
/// mod = "mod"
/// x = "X"
///
/// [eval]
/// width = 12
/// infinity_is_error = false
///
/// [sampler]
/// range = [-5.0, 5.0]
/// step = 0.05
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Localized tokens.
    pub locale: Locale,

    /// Evaluation options, including the display width.
    pub eval: EvalOptions,

    /// Options for graphing equations.
    pub sampler: SamplerOptions,
}

/// Errors that can occur while loading the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(io::Error),

    /// The file is not valid TOML, or does not match [`ReplConfig`].
    Parse {
        contents: String,
        error: toml::de::Error,
    },
}

impl ConfigError {
    /// Report this error to stderr, highlighting the offending part of the file if known.
    pub fn report_to_stderr(&self, path: &str) {
        match self {
            Self::Io(err) => eprintln!("{}: {}", path, err),
            Self::Parse { contents, error } => {
                let spans = error.span().into_iter().collect::<Vec<_>>();
                let report = simple_report(path, &spans, "invalid configuration", error.message(), None);
                if report.eprint((path, Source::from(contents))).is_err() {
                    eprintln!("{}: {}", path, error);
                }
            },
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl ReplConfig {
    /// Parses the configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|error| ConfigError::Parse {
            contents: contents.to_string(),
            error,
        })
    }

    /// Loads the configuration from the given file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(ReplConfig::parse("").unwrap(), ReplConfig::default());
    }

    #[test]
    fn partial_tables() {
        let config = ReplConfig::parse(r#"
            [locale]
            error = "Erreur"
            x = "X"

            [eval]
            width = 12

            [sampler]
            range = [-5.0, 5.0]
        "#).unwrap();

        assert_eq!(config.locale.error, "Erreur");
        assert_eq!(config.locale.x, "X");
        assert_eq!(config.locale.y, "y");
        assert_eq!(config.eval.width, 12);
        assert!(config.eval.infinity_is_error);
        assert_eq!(config.sampler.range, (-5.0, 5.0));
        assert_eq!(config.sampler.step, 0.1);
    }

    #[test]
    fn remainder_key() {
        let config = ReplConfig::parse("[locale]\nmod = \"resto\"").unwrap();
        assert_eq!(config.locale.modulo, "resto");
    }

    #[test]
    fn invalid_file() {
        let err = ReplConfig::parse("[eval]\nwidth = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
